//! The session seam scenarios are written against.
//!
//! A [`Session`] is one browser with one page, alive for exactly one
//! scenario. A [`SessionProvider`] knows how to acquire a fresh one. The
//! Chrome implementation lives here; tests plug in their own providers
//! without touching a real browser.

use crate::bootstrap::clean_stale_profiles;
use crate::browser::{TestBrowser, TestBrowserConfig};
use crate::dialog::Dialog;
use crate::error::Result;
use crate::page::Page;
use crate::wait::WaitConfig;
use async_trait::async_trait;
use std::fmt;
use tracing::{debug, warn};

/// The page operations a smoke scenario needs.
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigates to `url` and waits for the document to load.
    async fn open(&self, url: &str) -> Result<()>;

    /// Waits for `selector` to match an element.
    async fn wait_for_selector(&self, selector: &str, wait: WaitConfig) -> Result<()>;

    /// Types `text` into the element matching `selector`.
    async fn type_text(&self, selector: &str, text: &str) -> Result<()>;

    /// Clicks the element matching `selector`.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Reads the text content of the element matching `selector`.
    async fn text(&self, selector: &str) -> Result<String>;

    /// Reads the class tokens of the element matching `selector`.
    async fn class_list(&self, selector: &str) -> Result<Vec<String>>;

    /// Counts elements matching `selector`.
    async fn count(&self, selector: &str) -> Result<usize>;

    /// Waits for the next native dialog. The dialog has already been
    /// answered when it is returned.
    async fn next_dialog(&self, wait: WaitConfig) -> Result<Dialog>;

    /// Captures the current viewport as PNG bytes.
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// Releases the session and everything it owns.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Acquires fresh sessions.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Starts a new, independent session.
    async fn acquire(&self) -> Result<Box<dyn Session>>;
}

impl fmt::Debug for dyn SessionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionProvider")
    }
}

/// A Chrome process with a single page.
pub struct ChromeSession {
    browser: TestBrowser,
    page: Page,
}

impl ChromeSession {
    /// Launches Chrome and opens a blank page.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome cannot be started.
    pub async fn start(config: TestBrowserConfig) -> Result<Self> {
        let browser = TestBrowser::launch(config).await?;
        match browser.new_page().await {
            Ok(page) => Ok(Self { browser, page }),
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!("Failed to close browser after page error: {}", close_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Session for ChromeSession {
    async fn open(&self, url: &str) -> Result<()> {
        self.page.navigate(url).await
    }

    async fn wait_for_selector(&self, selector: &str, wait: WaitConfig) -> Result<()> {
        self.page.wait_for_selector(selector, wait).await
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        self.page.type_text(selector, text).await
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.page.click(selector).await
    }

    async fn text(&self, selector: &str) -> Result<String> {
        self.page.text(selector).await
    }

    async fn class_list(&self, selector: &str) -> Result<Vec<String>> {
        self.page.class_list(selector).await
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        self.page.count(selector).await
    }

    async fn next_dialog(&self, wait: WaitConfig) -> Result<Dialog> {
        self.page.wait_for_dialog(wait).await
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.page.screenshot().await
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let ChromeSession { browser, page } = *self;
        if let Err(e) = page.close().await {
            debug!("Page close failed, closing browser anyway: {}", e);
        }
        browser.close().await
    }
}

/// Launches one Chrome per acquired session.
#[derive(Debug, Clone)]
pub struct ChromeProvider {
    config: TestBrowserConfig,
}

impl ChromeProvider {
    /// Creates a provider that launches Chrome with `config`.
    #[must_use]
    pub fn new(config: TestBrowserConfig) -> Self {
        Self { config }
    }

    /// Removes profile directories left behind by earlier runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile root cannot be read.
    pub fn clean_stale_profiles(&self) -> Result<usize> {
        clean_stale_profiles(&self.config.profile_root)
    }
}

#[async_trait]
impl SessionProvider for ChromeProvider {
    async fn acquire(&self) -> Result<Box<dyn Session>> {
        let session = ChromeSession::start(self.config.clone()).await?;
        Ok(Box::new(session))
    }
}
