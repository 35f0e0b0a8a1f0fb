//! Page-level operations: navigation, input, DOM reads and dialogs.
//!
//! DOM reads go through small scripts. Selectors are embedded as JSON string
//! literals so quotes, backticks and newlines in a selector can't break out
//! of the script.

use crate::dialog::{Dialog, DialogCapture, DialogPolicy, dialog_from_event};
use crate::error::{BrowserError, Result};
use crate::wait::{WaitConfig, settle, wait_for_result};
use chromiumoxide::cdp::browser_protocol::page::{
    EventJavascriptDialogOpening, HandleJavaScriptDialogParams,
};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A browser tab with the dialog listener attached.
#[derive(Debug)]
pub struct Page {
    inner: Arc<ChromePage>,
    dialogs: DialogCapture,
    dialog_task: Option<JoinHandle<()>>,
}

impl Page {
    /// Wraps a chromiumoxide page and starts answering its dialogs.
    ///
    /// The event subscription is established before this returns, so a
    /// dialog opened by the very first click is never missed.
    pub(crate) async fn attach(page: ChromePage, policy: DialogPolicy) -> Result<Self> {
        let page = Arc::new(page);
        let mut events = page
            .event_listener::<EventJavascriptDialogOpening>()
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        let dialogs = DialogCapture::new();
        let capture = dialogs.clone();
        let responder = page.clone();

        let dialog_task = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                let accept = policy.accepts();
                let accepted = match responder
                    .execute(HandleJavaScriptDialogParams::new(accept))
                    .await
                {
                    Ok(_) => accept,
                    Err(e) => {
                        warn!("Failed to answer javascript dialog: {}", e);
                        false
                    }
                };

                let dialog = dialog_from_event(&event, accepted);
                debug!(
                    kind = %dialog.kind,
                    message = %dialog.message,
                    accepted,
                    "javascript dialog"
                );
                capture.push(dialog);
            }
        });

        Ok(Self {
            inner: page,
            dialogs,
            dialog_task: Some(dialog_task),
        })
    }

    /// Dialogs observed on this page and not yet drained.
    #[must_use]
    pub fn dialogs(&self) -> &DialogCapture {
        &self.dialogs
    }

    /// Navigates to an absolute URL and waits for `document.readyState`
    /// to reach `"complete"`.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page fails to load, or `WaitTimeout`
    /// if it never finishes loading.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.inner
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_load(WaitConfig::default()).await
    }

    /// Waits for the document to finish loading.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the document is not complete in time.
    pub async fn wait_for_load(&self, config: WaitConfig) -> Result<()> {
        wait_for_result(
            || {
                let page = self.inner.clone();
                async move {
                    let result = page
                        .evaluate("document.readyState")
                        .await
                        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

                    Ok(result
                        .value()
                        .and_then(|v| v.as_str())
                        .is_some_and(|s| s == "complete"))
                }
            },
            config,
            "document ready",
        )
        .await
    }

    /// Executes JavaScript in the page context and deserializes the result.
    ///
    /// # Errors
    ///
    /// Returns `ScriptExecutionFailed` if the script throws or the result
    /// does not deserialize into `T`.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Waits for a CSS selector to match at least one element.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if nothing matches before the timeout.
    pub async fn wait_for_selector(&self, selector: &str, config: WaitConfig) -> Result<()> {
        let script = format!("!!document.querySelector({})", selector_literal(selector)?);

        wait_for_result(
            || {
                let page = self.inner.clone();
                let script = script.clone();
                async move {
                    let result = page
                        .evaluate(script.as_str())
                        .await
                        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

                    Ok(result
                        .value()
                        .and_then(serde_json::Value::as_bool)
                        .unwrap_or(false))
                }
            },
            config,
            &format!("selector '{selector}'"),
        )
        .await
    }

    /// Clicks the first element matching `selector`.
    ///
    /// If the click opens a dialog, the listener answers it and the dialog
    /// becomes available through [`Page::wait_for_dialog`].
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if nothing matches.
    pub async fn click(&self, selector: &str) -> Result<()> {
        self.find(selector).await?.click().await?;
        Ok(())
    }

    /// Focuses the element matching `selector` and types `text` into it
    /// as key events.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if nothing matches.
    pub async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        let element = self.find(selector).await?;
        element.click().await?;
        if !text.is_empty() {
            element.type_str(text).await?;
        }
        Ok(())
    }

    /// Returns the `textContent` of the first element matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if nothing matches.
    pub async fn text(&self, selector: &str) -> Result<String> {
        // Wrapped in an array: a bare `null` result carries no value over CDP
        let script = format!(
            "(() => {{ const el = document.querySelector({}); \
             return el ? [el.textContent] : []; }})()",
            selector_literal(selector)?
        );

        self.evaluate::<Vec<String>>(&script)
            .await?
            .pop()
            .ok_or_else(|| not_found(selector))
    }

    /// Returns the class tokens of the first element matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if nothing matches.
    pub async fn class_list(&self, selector: &str) -> Result<Vec<String>> {
        let script = format!(
            "(() => {{ const el = document.querySelector({}); \
             return el ? [Array.from(el.classList)] : []; }})()",
            selector_literal(selector)?
        );

        self.evaluate::<Vec<Vec<String>>>(&script)
            .await?
            .pop()
            .ok_or_else(|| not_found(selector))
    }

    /// Returns the number of elements matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn count(&self, selector: &str) -> Result<usize> {
        let script = format!(
            "document.querySelectorAll({}).length",
            selector_literal(selector)?
        );
        self.evaluate(&script).await
    }

    /// Waits for the page to open a dialog and returns it.
    ///
    /// Dialogs opened earlier and not yet drained are returned first.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if no dialog appears in time.
    pub async fn wait_for_dialog(&self, config: WaitConfig) -> Result<Dialog> {
        let capture = self.dialogs.clone();

        match settle(
            || {
                let capture = capture.clone();
                async move { Ok(capture.take_next()) }
            },
            Option::is_some,
            config,
        )
        .await
        {
            Ok(Some(dialog)) => Ok(dialog),
            Ok(None) => Err(BrowserError::WaitTimeout {
                condition: "javascript dialog".to_string(),
                timeout: config.timeout,
            }),
            Err(unsettled) => Err(unsettled.into_timeout("javascript dialog")),
        }
    }

    /// Returns the page title.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// Takes a screenshot of the page and returns PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if screenshot capture fails.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.inner
            .screenshot(chromiumoxide::page::ScreenshotParams::default())
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Closes the page.
    ///
    /// The dialog listener is stopped and awaited first so it releases its
    /// handle on the page. If the page is still shared after that, closing
    /// is left to the browser shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if closing the page fails.
    pub async fn close(mut self) -> Result<()> {
        if let Some(task) = self.dialog_task.take() {
            task.abort();
            let _ = task.await;
        }
        let inner = Arc::clone(&self.inner);
        drop(self);

        match Arc::try_unwrap(inner) {
            Ok(page) => {
                page.close().await?;
                Ok(())
            }
            Err(_arc) => {
                debug!("Page still referenced by listener - closing with the browser");
                Ok(())
            }
        }
    }

    async fn find(&self, selector: &str) -> Result<Element> {
        self.inner.find_element(selector).await.map_err(|e| {
            debug!("find_element('{}') failed: {}", selector, e);
            not_found(selector)
        })
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        if let Some(task) = &self.dialog_task {
            task.abort();
        }
    }
}

fn not_found(selector: &str) -> BrowserError {
    BrowserError::ElementNotFound {
        selector: selector.to_string(),
    }
}

/// Encodes a selector as a JavaScript string literal.
fn selector_literal(selector: &str) -> Result<String> {
    serde_json::to_string(selector).map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
}
