//! Catalog of known USB identities.
//!
//! The catalog is ordered for display. `custom` is always first and is the
//! fallback selection; its fields are all empty.

use crate::i18n::{Locale, Text};
use crate::identity::Identity;

/// Key of the sentinel entry that stands for "no preset".
pub const CUSTOM_KEY: &str = "custom";

/// Key of the appliance's factory identity.
pub const DEFAULT_KEY: &str = "default";

/// A named, predefined identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub key: &'static str,
    pub vid: &'static str,
    pub pid: &'static str,
    pub manufacturer: &'static str,
    pub product: &'static str,
    label: Option<&'static str>,
}

impl Preset {
    /// Owned copy of this preset's four fields.
    pub fn identity(&self) -> Identity {
        Identity::new(self.vid, self.pid, self.manufacturer, self.product)
    }

    /// Whether all four fields equal `identity` exactly (case-sensitive, untrimmed).
    pub fn matches(&self, identity: &Identity) -> bool {
        self.vid == identity.vid
            && self.pid == identity.pid
            && self.manufacturer == identity.manufacturer
            && self.product == identity.product
    }

    /// Dropdown label. Only the custom entry is translated.
    pub fn label(&self, locale: Locale) -> &'static str {
        self.label.unwrap_or_else(|| Text::Custom.localize(locale))
    }

    pub fn is_custom(&self) -> bool {
        self.key == CUSTOM_KEY
    }
}

static PRESETS: [Preset; 5] = [
    Preset {
        key: CUSTOM_KEY,
        vid: "",
        pid: "",
        manufacturer: "",
        product: "",
        label: None,
    },
    Preset {
        key: DEFAULT_KEY,
        vid: "0x3346",
        pid: "0x1009",
        manufacturer: "sipeed",
        product: "NanoKVM",
        label: Some("NanoKVM"),
    },
    Preset {
        key: "logitech",
        vid: "0x046d",
        pid: "0xc31c",
        manufacturer: "Logitech",
        product: "Keyboard K120",
        label: Some("Logitech Keyboard"),
    },
    Preset {
        key: "microsoft",
        vid: "0x045e",
        pid: "0x00db",
        manufacturer: "Microsoft",
        product: "Natural Ergonomic Keyboard",
        label: Some("Microsoft Keyboard"),
    },
    Preset {
        key: "generic",
        vid: "0x1d6b",
        pid: "0x0104",
        manufacturer: "Linux Foundation",
        product: "Multifunction Composite Gadget",
        label: Some("Generic HID"),
    },
];

/// The full catalog in display order.
pub fn presets() -> &'static [Preset] {
    &PRESETS
}

/// The appliance's factory identity.
pub fn default_identity() -> Identity {
    PRESETS[1].identity()
}

/// First preset, in declaration order, whose fields all equal `identity`.
///
/// An all-empty identity matches `custom`, which callers treat the same as
/// no match.
pub fn find_preset_by_identity(identity: &Identity) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.matches(identity))
}

/// Exact lookup by key.
pub fn find_preset_by_key(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order() {
        let keys: Vec<&str> = presets().iter().map(|p| p.key).collect();
        assert_eq!(
            keys,
            ["custom", "default", "logitech", "microsoft", "generic"]
        );
        assert!(presets()[0].is_custom());
    }

    #[test]
    fn every_non_custom_preset_detects_itself() {
        for preset in presets().iter().filter(|p| !p.is_custom()) {
            let found = find_preset_by_identity(&preset.identity()).unwrap();
            assert_eq!(found.key, preset.key);
        }
    }

    #[test]
    fn no_match_for_unknown_identity() {
        let id = Identity::new("0x1234", "0xc31c", "Logitech", "Keyboard K120");
        assert!(find_preset_by_identity(&id).is_none());
    }

    #[test]
    fn match_is_case_sensitive_and_untrimmed() {
        let upper = Identity::new("0x046D", "0xc31c", "Logitech", "Keyboard K120");
        assert!(find_preset_by_identity(&upper).is_none());

        let padded = Identity::new("0x046d", "0xc31c", "Logitech ", "Keyboard K120");
        assert!(find_preset_by_identity(&padded).is_none());
    }

    #[test]
    fn all_empty_identity_hits_custom_first() {
        let found = find_preset_by_identity(&Identity::default()).unwrap();
        assert_eq!(found.key, CUSTOM_KEY);
    }

    #[test]
    fn lookup_by_key() {
        let generic = find_preset_by_key("generic").unwrap();
        assert_eq!(generic.vid, "0x1d6b");
        assert_eq!(generic.product, "Multifunction Composite Gadget");
        assert!(find_preset_by_key("razer").is_none());
        assert!(find_preset_by_key("Generic").is_none());
    }

    #[test]
    fn default_identity_is_nanokvm() {
        let id = default_identity();
        assert_eq!(id, Identity::new("0x3346", "0x1009", "sipeed", "NanoKVM"));
        assert_eq!(find_preset_by_identity(&id).unwrap().key, DEFAULT_KEY);
    }

    #[test]
    fn labels() {
        assert_eq!(presets()[0].label(Locale::En), "Custom");
        assert_eq!(find_preset_by_key("generic").unwrap().label(Locale::Zh), "Generic HID");
    }
}
