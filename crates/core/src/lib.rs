//! usb-identity-core: preset catalog, form state, and remote sync for the
//! USB identity a KVM-over-IP appliance presents to its host.
//!
//! The appliance emulates a USB keyboard/mouse gadget. Its vendor ID,
//! product ID, manufacturer and product strings can be changed to match a
//! known device; changes take effect after the appliance reboots.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod i18n;
pub mod identity;
#[cfg(test)]
mod integration_tests;
pub mod preset;
pub mod state;
pub mod store;
pub mod sync;

pub use identity::{Field, Identity};
pub use state::IdentityState;
pub use sync::{IdentityService, Notice, NoticeKind};
