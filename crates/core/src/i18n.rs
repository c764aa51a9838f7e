//! User-facing strings for the identity settings panel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported display languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Parse a language tag such as `en`, `en-US` or `zh_CN`.
    ///
    /// Unknown tags fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        let lang = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "zh" => Self::Zh,
            _ => Self::En,
        }
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::En => "en",
            Self::Zh => "zh",
        })
    }
}

/// Message keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    Title,
    Description,
    Preset,
    Custom,
    Vid,
    Pid,
    Manufacturer,
    Product,
    RebootRequired,
    Save,
    Saving,
    Loading,
    SaveSuccess,
    SaveFailed,
}

impl Text {
    pub fn localize(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en(),
            Locale::Zh => self.zh(),
        }
    }

    fn en(self) -> &'static str {
        match self {
            Self::Title => "USB Identity",
            Self::Description => "Customize the USB device information reported to the host",
            Self::Preset => "Preset",
            Self::Custom => "Custom",
            Self::Vid => "Vendor ID",
            Self::Pid => "Product ID",
            Self::Manufacturer => "Manufacturer",
            Self::Product => "Product",
            Self::RebootRequired => "Reboot the device for changes to take effect",
            Self::Save => "Save",
            Self::Saving => "Saving...",
            Self::Loading => "Loading...",
            Self::SaveSuccess => "USB identity saved",
            Self::SaveFailed => "Failed to save USB identity",
        }
    }

    fn zh(self) -> &'static str {
        match self {
            Self::Title => "USB 标识",
            Self::Description => "自定义向主机报告的 USB 设备信息",
            Self::Preset => "预设",
            Self::Custom => "自定义",
            Self::Vid => "厂商 ID",
            Self::Pid => "产品 ID",
            Self::Manufacturer => "制造商",
            Self::Product => "产品",
            Self::RebootRequired => "重启设备后生效",
            Self::Save => "保存",
            Self::Saving => "保存中...",
            Self::Loading => "加载中...",
            Self::SaveSuccess => "USB 标识已保存",
            Self::SaveFailed => "USB 标识保存失败",
        }
    }
}
