//! USB identity descriptor fields.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four-field USB descriptor presented by the emulated device.
///
/// `vid` and `pid` are opaque strings; no hex parsing is performed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub vid: String,
    pub pid: String,
    pub manufacturer: String,
    pub product: String,
}

impl Identity {
    pub fn new(
        vid: impl Into<String>,
        pid: impl Into<String>,
        manufacturer: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self {
            vid: vid.into(),
            pid: pid.into(),
            manufacturer: manufacturer.into(),
            product: product.into(),
        }
    }

    /// Read a single field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Vid => &self.vid,
            Field::Pid => &self.pid,
            Field::Manufacturer => &self.manufacturer,
            Field::Product => &self.product,
        }
    }

    /// Overwrite a single field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Vid => &mut self.vid,
            Field::Pid => &mut self.pid,
            Field::Manufacturer => &mut self.manufacturer,
            Field::Product => &mut self.product,
        };
        *slot = value.into();
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} \"{}\" \"{}\"",
            self.vid, self.pid, self.manufacturer, self.product
        )
    }
}

/// One of the four identity attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Vid,
    Pid,
    Manufacturer,
    Product,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 4] = [Self::Vid, Self::Pid, Self::Manufacturer, Self::Product];

    /// Stable lowercase name, matching the wire field name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vid => "vid",
            Self::Pid => "pid",
            Self::Manufacturer => "manufacturer",
            Self::Product => "product",
        }
    }

    /// Example value shown in empty inputs.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Vid => "0x046d",
            Self::Pid => "0xc31c",
            Self::Manufacturer => "Logitech",
            Self::Product => "Keyboard K120",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_touches_only_named_field() {
        let mut id = Identity::new("0x046d", "0xc31c", "Logitech", "Keyboard K120");
        id.set(Field::Vid, "0x1234");
        assert_eq!(id.vid, "0x1234");
        assert_eq!(id.pid, "0xc31c");
        assert_eq!(id.manufacturer, "Logitech");
        assert_eq!(id.product, "Keyboard K120");
    }

    #[test]
    fn get_matches_struct_fields() {
        let id = Identity::new("a", "b", "c", "d");
        let values: Vec<&str> = Field::ALL.iter().map(|f| id.get(*f)).collect();
        assert_eq!(values, ["a", "b", "c", "d"]);
    }

    #[test]
    fn field_from_name() {
        assert_eq!("manufacturer".parse::<Field>().unwrap(), Field::Manufacturer);
        assert!("serial".parse::<Field>().is_err());
    }

    #[test]
    fn values_are_opaque_strings() {
        // Not hex, not trimmed; stored as given.
        let mut id = Identity::default();
        id.set(Field::Pid, " not-a-number ");
        assert_eq!(id.pid, " not-a-number ");
    }

    #[test]
    fn wire_field_names() {
        let id = Identity::new("0x3346", "0x1009", "sipeed", "NanoKVM");
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json["vid"], "0x3346");
        assert_eq!(json["manufacturer"], "sipeed");
    }
}
