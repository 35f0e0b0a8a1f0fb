//! Browser lifecycle management and process control.
//!
//! `TestBrowser` launches Chrome with a throwaway profile, drives the CDP
//! handler, and hands out pages.
//!
//! # Resource Safety
//!
//! Dropping a `TestBrowser` kills the Chrome process through chromiumoxide's
//! own `Drop`, but only `close()` shuts down gracefully and removes the
//! profile directory.

use crate::bootstrap::{check_chrome_path, profile_dir};
use crate::dialog::DialogPolicy;
use crate::error::{BrowserError, Result};
use crate::page::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Configuration for launching a test browser.
#[derive(Debug, Clone)]
pub struct TestBrowserConfig {
    /// Run in headless mode (default: true unless the `visible` feature is on).
    pub headless: bool,

    /// Window and viewport size (default: 1920x1080).
    pub window_size: (u32, u32),

    /// Additional Chrome arguments.
    pub args: Vec<String>,

    /// Chrome executable path (None = auto-detect).
    pub chrome_path: Option<PathBuf>,

    /// Where per-launch profile directories are created (default: temp dir).
    pub profile_root: PathBuf,

    /// How dialogs opened by pages are answered.
    pub dialog_policy: DialogPolicy,
}

impl TestBrowserConfig {
    /// Creates a new config with defaults for headless testing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables visible mode for debugging.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Uses a specific Chrome executable.
    #[must_use]
    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Sets how page dialogs are answered.
    #[must_use]
    pub fn with_dialog_policy(mut self, policy: DialogPolicy) -> Self {
        self.dialog_policy = policy;
        self
    }

    /// Converts to chromiumoxide `BrowserConfig` using `profile` as the
    /// user data directory.
    fn to_browser_config(&self, profile: &std::path::Path) -> Result<BrowserConfig> {
        let (width, height) = self.window_size;
        let mut config = BrowserConfig::builder()
            .window_size(width, height)
            .viewport(Viewport {
                width,
                height,
                ..Viewport::default()
            })
            .user_data_dir(profile);

        if self.headless {
            config = config.new_headless_mode();
        } else {
            config = config.with_head();
        }

        for arg in &self.args {
            config = config.arg(arg.clone());
        }

        if let Some(path) = &self.chrome_path {
            check_chrome_path(path)?;
            config = config.chrome_executable(path.clone());
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for TestBrowserConfig {
    fn default() -> Self {
        Self {
            headless: !cfg!(feature = "visible"),
            window_size: (1920, 1080),
            args: vec![
                // No user namespaces inside most CI containers. Only ever
                // pointed at the local weather page.
                "--no-sandbox".to_string(),
                // /dev/shm is tiny in Docker
                "--disable-dev-shm-usage".to_string(),
                "--disable-gpu".to_string(),
            ],
            chrome_path: None,
            profile_root: std::env::temp_dir(),
            dialog_policy: DialogPolicy::Accept,
        }
    }
}

/// A managed browser instance.
///
/// ```ignore
/// let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
/// let page = browser.new_page().await?;
/// page.navigate("file:///srv/app/index.html").await?;
/// browser.close().await?;
/// ```
pub struct TestBrowser {
    inner: Arc<Mutex<Option<Browser>>>,
    profile: PathBuf,
    dialog_policy: DialogPolicy,
}

impl TestBrowser {
    /// Launches a new browser instance with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome is not installed, the configured
    /// executable does not exist, or the process fails to start.
    pub async fn launch(config: TestBrowserConfig) -> Result<Self> {
        let profile = profile_dir(&config.profile_root);
        debug!(profile = %profile.display(), "Launching browser with config: {:?}", config);

        let browser_config = config.to_browser_config(&profile)?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // chromiumoxide only processes CDP traffic while the handler is polled
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("Browser handler error: {}", e);
                }
            }
        });

        debug!("Browser launched successfully");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
            profile,
            dialog_policy: config.dialog_policy,
        })
    }

    /// Creates a new blank page (tab) with its dialog listener attached.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` if the browser has been closed.
    pub async fn new_page(&self) -> Result<Page> {
        let browser = self.inner.lock().await;
        let browser = browser.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let chrome_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        Page::attach(chrome_page, self.dialog_policy).await
    }

    /// Closes the browser, waits for the process to exit and removes the
    /// profile directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close gracefully.
    pub async fn close(self) -> Result<()> {
        let browser = self.inner.lock().await.take();

        if let Some(mut browser) = browser {
            debug!("Closing browser gracefully");
            browser
                .close()
                .await
                .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
            if let Err(e) = browser.wait().await {
                warn!("Browser process did not exit cleanly: {}", e);
            }
        }

        if self.profile.exists() {
            if let Err(e) = tokio::fs::remove_dir_all(&self.profile).await {
                warn!("Could not remove profile {}: {}", self.profile.display(), e);
            }
        }

        Ok(())
    }

    /// Returns true if the browser has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }

    /// The profile directory used by this instance.
    #[must_use]
    pub fn profile(&self) -> &std::path::Path {
        &self.profile
    }
}

impl Drop for TestBrowser {
    fn drop(&mut self) {
        // chromiumoxide's Browser::drop kills the process if close() never
        // took it out of the mutex.
        if let Ok(guard) = self.inner.try_lock() {
            if guard.is_some() {
                warn!("TestBrowser dropped without close() - forcing shutdown via Drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_container_needs() {
        let config = TestBrowserConfig::default();

        assert_eq!(config.window_size, (1920, 1080));
        assert!(config.args.iter().any(|a| a == "--no-sandbox"));
        assert!(config.args.iter().any(|a| a == "--disable-dev-shm-usage"));
        assert_eq!(config.dialog_policy, DialogPolicy::Accept);
        assert!(config.chrome_path.is_none());
    }

    #[test]
    fn builder_methods_compose() {
        let config = TestBrowserConfig::new()
            .visible()
            .with_window_size(1280, 720)
            .with_chrome_path("/opt/chrome/chrome")
            .with_dialog_policy(DialogPolicy::Dismiss);

        assert!(!config.headless);
        assert_eq!(config.window_size, (1280, 720));
        assert_eq!(config.chrome_path, Some(PathBuf::from("/opt/chrome/chrome")));
        assert_eq!(config.dialog_policy, DialogPolicy::Dismiss);
    }

    #[test]
    fn headless_switch_comes_from_the_builder() {
        // Any existing file stands in for Chrome so no detection runs
        let exe = std::env::current_exe().unwrap();
        let profile = std::path::Path::new("/tmp/profile");
        let headless = TestBrowserConfig::new().with_chrome_path(&exe);
        let visible = TestBrowserConfig::new().with_chrome_path(&exe).visible();

        assert!(!headless.args.iter().any(|a| a.starts_with("--headless")));
        assert!(headless.to_browser_config(profile).is_ok());
        assert!(visible.to_browser_config(profile).is_ok());
    }

    #[test]
    fn missing_chrome_executable_fails_before_launch() {
        let config = TestBrowserConfig::new().with_chrome_path("/definitely/not/chrome");
        let err = config
            .to_browser_config(std::path::Path::new("/tmp/profile"))
            .unwrap_err();

        assert!(matches!(err, BrowserError::LaunchFailed { .. }));
    }

    #[tokio::test]
    #[ignore] // Requires Chrome to be installed
    async fn browser_launch_and_close_removes_profile() {
        let browser = TestBrowser::launch(TestBrowserConfig::default())
            .await
            .expect("failed to launch browser");
        let profile = browser.profile().to_path_buf();

        assert!(!browser.is_closed().await);

        browser.close().await.expect("failed to close browser");
        assert!(!profile.exists());
    }
}
