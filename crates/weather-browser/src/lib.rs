//! # weather-browser
//!
//! Headless Chrome plumbing for the weather page smoke suite, built on
//! chromiumoxide.
//!
//! ## Architecture
//!
//! - **TestBrowser**: Chrome process lifecycle with a throwaway profile
//! - **Page**: navigation, typing, clicking and DOM reads on one tab
//! - **DialogCapture**: native `alert()`/`confirm()` dialogs, answered and queued
//! - **WaitConfig / settle**: bounded polling instead of fixed sleeps
//! - **Session / SessionProvider**: the seam scenarios are written against
//! - **bootstrap**: stale profile cleanup and page URL resolution
//!
//! ## Example Usage
//!
//! ```ignore
//! use weather_browser::{ChromeProvider, SessionProvider, TestBrowserConfig, WaitConfig};
//! use std::time::Duration;
//!
//! let provider = ChromeProvider::new(TestBrowserConfig::default());
//! let session = provider.acquire().await?;
//! session.open("file:///srv/app/index.html").await?;
//! session
//!     .wait_for_selector("#city", WaitConfig::with_timeout(Duration::from_secs(10)))
//!     .await?;
//! session.click("#getBtn").await?;
//! let dialog = session.next_dialog(WaitConfig::default()).await?;
//! assert!(dialog.mentions("enter"));
//! session.close().await?;
//! ```
//!
//! ## Testing Strategy
//!
//! Unit tests cover waits, dialog queues, bootstrap and configuration.
//! Tests that need a real Chrome are `#[ignore]`d; run them with
//! `cargo test -p weather-browser -- --ignored`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bootstrap;
pub mod browser;
pub mod dialog;
pub mod error;
pub mod page;
pub mod session;
pub mod wait;

pub use bootstrap::{PROFILE_PREFIX, clean_stale_profiles, page_url};
pub use browser::{TestBrowser, TestBrowserConfig};
pub use dialog::{Dialog, DialogCapture, DialogKind, DialogPolicy};
pub use error::{BrowserError, Result};
pub use page::Page;
pub use session::{ChromeProvider, ChromeSession, Session, SessionProvider};
pub use wait::{
    DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, Unsettled, WaitConfig, settle, wait_for_result,
};
