//! Working identity and preset selection.
//!
//! Keeps the form's four fields and the selected preset key in step. Edits
//! in one direction never re-derive the other except on wholesale
//! replacement, where the selection is recomputed from the catalog.

use crate::identity::{Field, Identity};
use crate::preset::{self, CUSTOM_KEY, DEFAULT_KEY};
use tracing::debug;

/// Form state for the identity settings panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityState {
    pub(crate) identity: Identity,
    pub(crate) selected: String,
    pub(crate) is_loading: bool,
    pub(crate) is_saving: bool,
}

impl Default for IdentityState {
    fn default() -> Self {
        Self {
            identity: preset::default_identity(),
            selected: DEFAULT_KEY.to_string(),
            is_loading: false,
            is_saving: false,
        }
    }
}

impl IdentityState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Key of the selected preset, or `custom`.
    pub fn selected_preset_key(&self) -> &str {
        &self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    /// Adopt a whole identity and re-detect the matching preset.
    pub fn replace_identity(&mut self, identity: Identity) {
        self.selected = preset::find_preset_by_identity(&identity)
            .map_or(CUSTOM_KEY, |p| p.key)
            .to_string();
        debug!(identity = %identity, preset = %self.selected, "Identity replaced");
        self.identity = identity;
    }

    /// Change one field. Selection always drops to `custom`.
    pub fn edit_field(&mut self, field: Field, value: impl Into<String>) {
        self.identity.set(field, value);
        self.selected = CUSTOM_KEY.to_string();
    }

    /// Choose a preset by key.
    ///
    /// `custom` and unknown keys only change the selection; any other key
    /// overwrites all four fields.
    pub fn select_preset(&mut self, key: &str) {
        self.selected = key.to_string();
        if key == CUSTOM_KEY {
            return;
        }
        match preset::find_preset_by_key(key) {
            Some(p) => self.identity = p.identity(),
            None => debug!(key, "Unknown preset key, fields left unchanged"),
        }
    }
}
