use crate::scenario::ScenarioId;

pub fn default_page() -> String {
    "app/index.html".to_string()
}

pub fn default_scenarios() -> Vec<ScenarioId> {
    ScenarioId::ALL.to_vec()
}

pub fn default_headless() -> bool {
    true
}

pub fn default_window_width() -> u32 {
    1920
}

pub fn default_window_height() -> u32 {
    1080
}

pub fn default_page_timeout_secs() -> u64 {
    10
}

pub fn default_settle_timeout_secs() -> u64 {
    15
}

pub fn default_poll_interval_ms() -> u64 {
    100
}

pub fn default_min_forecast_cards() -> usize {
    5
}
