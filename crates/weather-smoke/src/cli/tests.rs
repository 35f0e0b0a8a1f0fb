#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command};
    use crate::scenario::ScenarioId;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["weather-smoke", "run"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };

        assert!(args.page.is_none());
        assert!(args.only.is_empty());
        assert!(!args.visible);
        assert!(!args.lenient_dialogs);
        assert!(args.min_forecast_cards.is_none());
    }

    #[test]
    fn run_with_options() {
        let cli = Cli::try_parse_from([
            "weather-smoke",
            "run",
            "site/index.html",
            "--only",
            "valid-city,weather-theme",
            "--only",
            "empty-city",
            "--chrome",
            "/usr/bin/chromium",
            "--min-forecast-cards",
            "7",
            "--report",
            "smoke.json",
            "--lenient-dialogs",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };

        assert_eq!(args.page.as_deref(), Some("site/index.html"));
        assert_eq!(
            args.only,
            vec![
                ScenarioId::ValidCity,
                ScenarioId::WeatherTheme,
                ScenarioId::EmptyCity
            ]
        );
        assert_eq!(args.chrome, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(args.min_forecast_cards, Some(7));
        assert_eq!(args.report, Some(PathBuf::from("smoke.json")));
        assert!(args.lenient_dialogs);
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        assert!(Cli::try_parse_from(["weather-smoke", "run", "--only", "sunny-day"]).is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["weather-smoke", "-v", "-q", "list"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["weather-smoke", "list", "--no-color", "-q"]).unwrap();
        assert!(cli.no_color);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn init_default_path() {
        let cli = Cli::try_parse_from(["weather-smoke", "init"]).unwrap();
        let Command::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.path, PathBuf::from("weather-smoke.toml"));
        assert!(!args.force);
    }
}
