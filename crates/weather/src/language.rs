//! Response language selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the HKO API can answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "tc")]
    TraditionalChinese,
    #[serde(rename = "sc")]
    SimplifiedChinese,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 3] = [
        LanguageCode::English,
        LanguageCode::TraditionalChinese,
        LanguageCode::SimplifiedChinese,
    ];

    /// HKO `lang` query value.
    pub fn param(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::TraditionalChinese => "tc",
            LanguageCode::SimplifiedChinese => "sc",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "en" | "english" => Some(LanguageCode::English),
            "tc" | "zh_hk" | "zh_tw" | "zh_hant" | "traditional_chinese" => {
                Some(LanguageCode::TraditionalChinese)
            }
            "sc" | "zh_cn" | "zh_hans" | "simplified_chinese" => {
                Some(LanguageCode::SimplifiedChinese)
            }
            _ => None,
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Map a requested language to an HKO language code.
///
/// Missing or unrecognized values fall back to English. Never fails.
pub fn resolve(requested: Option<&str>) -> LanguageCode {
    match requested.and_then(LanguageCode::parse) {
        Some(code) => code,
        None => {
            if let Some(value) = requested {
                tracing::debug!(requested = value, "Unrecognized language, using English");
            }
            LanguageCode::English
        }
    }
}
