//! On-device identity store.
//!
//! The USB gadget reads its descriptor strings from one file per field at
//! boot. Missing or blank files mean "use the factory value".

use crate::api::Response;
use crate::error::{Error, Result};
use crate::identity::{Field, Identity};
use crate::preset;
use crate::sync::IdentityService;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Directory holding the identity files on the appliance.
pub const DEFAULT_ROOT: &str = "/boot";

/// Status codes reported for write failures, one per field.
pub mod codes {
    pub const SAVE_VID: i32 = -2;
    pub const SAVE_PID: i32 = -3;
    pub const SAVE_MANUFACTURER: i32 = -4;
    pub const SAVE_PRODUCT: i32 = -5;
}

/// File-backed identity store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `field`.
    pub fn path(&self, field: Field) -> PathBuf {
        self.root.join(format!("usb.{}", field.name()))
    }

    /// Current identity, falling back to the factory value per field.
    pub fn read(&self) -> Identity {
        let defaults = preset::default_identity();
        let mut identity = Identity::default();
        for field in Field::ALL {
            identity.set(field, self.read_or_default(field, defaults.get(field)));
        }
        debug!(identity = %identity, root = %self.root.display(), "Read USB identity");
        identity
    }

    /// Persist `identity`.
    ///
    /// VID and PID are always written. An empty manufacturer or product
    /// removes its file so the factory value applies again. Stops at the
    /// first failing field.
    pub fn write(&self, identity: &Identity) -> std::result::Result<(), Response<()>> {
        self.write_field(Field::Vid, &identity.vid)?;
        self.write_field(Field::Pid, &identity.pid)?;

        for field in [Field::Manufacturer, Field::Product] {
            let value = identity.get(field);
            if value.is_empty() {
                let _ = fs::remove_file(self.path(field));
            } else {
                self.write_field(field, value)?;
            }
        }

        debug!(
            "Stored USB identity: vid={}, pid={}, manufacturer={}, product={}",
            identity.vid, identity.pid, identity.manufacturer, identity.product
        );
        Ok(())
    }

    fn read_or_default(&self, field: Field, default: &str) -> String {
        match fs::read_to_string(self.path(field)) {
            Ok(data) if !data.trim().is_empty() => data.trim().to_string(),
            _ => default.to_string(),
        }
    }

    fn write_field(&self, field: Field, value: &str) -> std::result::Result<(), Response<()>> {
        let path = self.path(field);
        fs::write(&path, value).map_err(|e| {
            error!("failed to write {}: {e}", path.display());
            write_failure(field)
        })
    }
}

fn write_failure(field: Field) -> Response<()> {
    let (code, what) = match field {
        Field::Vid => (codes::SAVE_VID, "VID"),
        Field::Pid => (codes::SAVE_PID, "PID"),
        Field::Manufacturer => (codes::SAVE_MANUFACTURER, "manufacturer"),
        Field::Product => (codes::SAVE_PRODUCT, "product"),
    };
    Response::err(code, format!("failed to save {what}"))
}

impl IdentityService for FileStore {
    fn get_usb_identity(&self) -> Result<Identity> {
        Ok(self.read())
    }

    fn set_usb_identity(&self, identity: &Identity) -> Result<()> {
        self.write(identity).map_err(|rsp| Error::Service {
            code: rsp.code,
            msg: rsp.msg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logitech() -> Identity {
        Identity::new("0x046d", "0xc31c", "Logitech", "Keyboard K120")
    }

    #[test]
    fn empty_root_reads_factory_identity() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.read(), preset::default_identity());
    }

    #[test]
    fn read_trims_and_defaults_blank_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.path(Field::Vid), "0x046d\n").unwrap();
        fs::write(store.path(Field::Product), "   \n").unwrap();

        let identity = store.read();
        assert_eq!(identity.vid, "0x046d");
        assert_eq!(identity.pid, "0x1009");
        assert_eq!(identity.product, "NanoKVM");
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.write(&logitech()).unwrap();

        assert_eq!(fs::read_to_string(store.path(Field::Pid)).unwrap(), "0xc31c");
        assert_eq!(store.read(), logitech());
    }

    #[test]
    fn empty_strings_remove_optional_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.write(&logitech()).unwrap();

        store.write(&Identity::new("0x046d", "0xc31c", "", "")).unwrap();
        assert!(!store.path(Field::Manufacturer).exists());
        assert!(!store.path(Field::Product).exists());

        let identity = store.read();
        assert_eq!(identity.manufacturer, "sipeed");
        assert_eq!(identity.product, "NanoKVM");
    }

    #[test]
    fn missing_root_reports_vid_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent"));

        let rsp = store.write(&logitech()).unwrap_err();
        assert_eq!(rsp.code, codes::SAVE_VID);
        assert_eq!(rsp.msg, "failed to save VID");

        match store.set_usb_identity(&logitech()) {
            Err(e) => assert_eq!(e.service_message(), Some("failed to save VID")),
            Ok(()) => panic!("write into a missing directory succeeded"),
        }
    }

    #[test]
    fn service_round_trip_through_state() {
        use crate::i18n::Locale;
        use crate::state::IdentityState;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let mut state = IdentityState::new();
        state.load_with(&store);
        assert_eq!(state.selected_preset_key(), "default");

        state.select_preset("generic");
        let notice = state.save_with(&store, Locale::En).unwrap();
        assert!(!notice.is_error());
        assert_eq!(store.read().manufacturer, "Linux Foundation");
    }
}
