//! Remote sync between the form state and the configuration service.
//!
//! Load and save each have one suspend point. They are split into a
//! `begin_*` half that raises the in-flight flag and a `finish_*` half that
//! consumes the outcome and always lowers it, so a front-end can run the
//! service call wherever it likes in between.

use crate::error::{Error, Result};
use crate::i18n::{Locale, Text};
use crate::identity::Identity;
use crate::state::IdentityState;
use tracing::{debug, info, warn};

/// Abstraction over the device configuration service.
///
/// Implementations report both transport failures and non-zero status codes
/// as errors; callers do not distinguish the two.
pub trait IdentityService: Send + Sync {
    /// Fetch the identity the device currently presents.
    fn get_usb_identity(&self) -> Result<Identity>;

    /// Store a new identity on the device.
    fn set_usb_identity(&self, identity: &Identity) -> Result<()>;
}

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl IdentityState {
    /// Mark a load as in flight.
    ///
    /// Loads are not guarded; the panel issues exactly one, at start-up.
    pub fn begin_load(&mut self) {
        self.is_loading = true;
    }

    /// Apply a finished load.
    ///
    /// Failures are logged and otherwise ignored: the form keeps its current
    /// values. Returns whether the fetched identity was adopted.
    pub fn finish_load(&mut self, outcome: Result<Identity>) -> bool {
        self.is_loading = false;
        match outcome {
            Ok(identity) => {
                self.replace_identity(identity);
                true
            }
            Err(e) => {
                warn!("Failed to load USB identity: {e}");
                false
            }
        }
    }

    /// Mark a save as in flight and return the identity to push.
    ///
    /// Returns `None` while another save is outstanding; that request is
    /// dropped, not queued.
    pub fn begin_save(&mut self) -> Option<Identity> {
        if self.is_saving {
            debug!("Save already in flight, ignoring request");
            return None;
        }
        self.is_saving = true;
        Some(self.identity.clone())
    }

    /// Apply a finished save and produce the notice to show.
    ///
    /// Preset selection is left as editing set it.
    pub fn finish_save(&mut self, outcome: Result<()>, locale: Locale) -> Notice {
        self.is_saving = false;
        match outcome {
            Ok(()) => {
                info!(identity = %self.identity, "USB identity saved");
                Notice::success(Text::SaveSuccess.localize(locale))
            }
            Err(e) => {
                warn!("Failed to save USB identity: {e}");
                Notice::error(save_failure_text(&e, locale))
            }
        }
    }

    /// Run a complete load against `service` on the current thread.
    pub fn load_with(&mut self, service: &dyn IdentityService) -> bool {
        self.begin_load();
        let outcome = service.get_usb_identity();
        self.finish_load(outcome)
    }

    /// Run a complete save against `service` on the current thread.
    ///
    /// Returns `None` if a save was already in flight.
    pub fn save_with(&mut self, service: &dyn IdentityService, locale: Locale) -> Option<Notice> {
        let identity = self.begin_save()?;
        let outcome = service.set_usb_identity(&identity);
        Some(self.finish_save(outcome, locale))
    }
}

/// Service-provided message if there is one, else the localized fallback.
fn save_failure_text(err: &Error, locale: Locale) -> String {
    err.service_message()
        .unwrap_or_else(|| Text::SaveFailed.localize(locale))
        .to_string()
}
