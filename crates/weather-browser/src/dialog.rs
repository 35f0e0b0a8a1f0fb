//! Native JavaScript dialog capture.
//!
//! `alert()`, `confirm()` and `prompt()` block the page's script until they
//! are answered. A listener attached to every page records each dialog and
//! answers it according to a [`DialogPolicy`], so the click that opened the
//! dialog can return and the test can inspect the message afterwards.
//!
//! Dialogs are queued in arrival order and drained one at a time.

use chromiumoxide::cdp::browser_protocol::page::{DialogType, EventJavascriptDialogOpening};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// The kind of native dialog the page opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DialogKind {
    /// `window.alert()`
    Alert,
    /// `window.confirm()`
    Confirm,
    /// `window.prompt()`
    Prompt,
    /// The `beforeunload` confirmation
    BeforeUnload,
}

impl From<&DialogType> for DialogKind {
    fn from(kind: &DialogType) -> Self {
        match kind {
            DialogType::Alert => DialogKind::Alert,
            DialogType::Confirm => DialogKind::Confirm,
            DialogType::Prompt => DialogKind::Prompt,
            DialogType::Beforeunload => DialogKind::BeforeUnload,
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialogKind::Alert => "alert",
            DialogKind::Confirm => "confirm",
            DialogKind::Prompt => "prompt",
            DialogKind::BeforeUnload => "beforeunload",
        };
        f.write_str(name)
    }
}

/// How the listener answers a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DialogPolicy {
    /// Press OK.
    #[default]
    Accept,
    /// Press Cancel (for alerts this is the same as closing the dialog).
    Dismiss,
}

impl DialogPolicy {
    /// The `accept` flag sent with `Page.handleJavaScriptDialog`.
    #[must_use]
    pub fn accepts(self) -> bool {
        matches!(self, DialogPolicy::Accept)
    }
}

/// A dialog the page opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialog {
    /// Which dialog function was called.
    pub kind: DialogKind,

    /// The message text passed to the dialog.
    pub message: String,

    /// Whether the dialog was answered with OK. False if it was dismissed or
    /// the answer could not be delivered.
    pub accepted: bool,
}

impl Dialog {
    /// Creates a dialog record.
    #[must_use]
    pub fn new(kind: DialogKind, message: impl Into<String>, accepted: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            accepted,
        }
    }

    /// Case-insensitive substring match on the message.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.message.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Thread-safe queue of dialogs observed on a page.
///
/// Cloning is cheap. The page's listener task pushes and test code drains.
#[derive(Debug, Clone, Default)]
pub struct DialogCapture {
    pending: Arc<Mutex<VecDeque<Dialog>>>,
}

impl DialogCapture {
    /// Creates an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a dialog. Called by the page's listener task.
    pub(crate) fn push(&self, dialog: Dialog) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(dialog);
    }

    /// Removes and returns the oldest undrained dialog.
    #[must_use]
    pub fn take_next(&self) -> Option<Dialog> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

/// Builds a [`Dialog`] from the CDP event once the answer is known.
pub(crate) fn dialog_from_event(event: &EventJavascriptDialogOpening, accepted: bool) -> Dialog {
    Dialog::new(DialogKind::from(&event.r#type), event.message.clone(), accepted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_drains_in_arrival_order() {
        let capture = DialogCapture::new();
        capture.push(Dialog::new(DialogKind::Alert, "Please enter a city name!", true));
        capture.push(Dialog::new(DialogKind::Alert, "City not found!", true));

        assert_eq!(
            capture.take_next().map(|d| d.message),
            Some("Please enter a city name!".to_string())
        );
        assert_eq!(
            capture.take_next().map(|d| d.message),
            Some("City not found!".to_string())
        );
        assert!(capture.take_next().is_none());
    }

    #[test]
    fn clones_share_the_queue() {
        let capture = DialogCapture::new();
        let listener_side = capture.clone();
        listener_side.push(Dialog::new(DialogKind::Confirm, "Sure?", false));

        assert_eq!(capture.take_next().map(|d| d.kind), Some(DialogKind::Confirm));
        assert!(listener_side.take_next().is_none());
    }

    #[test]
    fn mentions_ignores_case() {
        let dialog = Dialog::new(DialogKind::Alert, "City NOT FOUND!", true);
        assert!(dialog.mentions("not found"));
        assert!(!dialog.mentions("enter"));
    }

    #[test]
    fn policy_accept_flag() {
        assert!(DialogPolicy::default().accepts());
        assert!(!DialogPolicy::Dismiss.accepts());
    }
}
