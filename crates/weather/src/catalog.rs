//! Static catalog of the HKO endpoints this server can call.

use crate::error::WeatherError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of weather data a tool call can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Local weather forecast (`flw`)
    #[serde(rename = "local")]
    LocalForecast,
    /// 9-day weather forecast (`fnd`)
    #[serde(rename = "nine_day")]
    NineDayForecast,
    /// Current weather report (`rhrread`)
    #[serde(rename = "current")]
    CurrentReport,
    /// Weather warning summary (`warnsum`)
    #[serde(rename = "warning")]
    Warnings,
    /// Detailed weather warning statements (`warningInfo`)
    #[serde(rename = "warning_info")]
    WarningInfo,
    /// Special weather tips (`swt`)
    #[serde(rename = "special_tip")]
    SpecialTips,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::LocalForecast,
        Capability::NineDayForecast,
        Capability::CurrentReport,
        Capability::Warnings,
        Capability::WarningInfo,
        Capability::SpecialTips,
    ];

    /// Identifier used in tool arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::LocalForecast => "local",
            Capability::NineDayForecast => "nine_day",
            Capability::CurrentReport => "current",
            Capability::Warnings => "warning",
            Capability::WarningInfo => "warning_info",
            Capability::SpecialTips => "special_tip",
        }
    }

    /// HKO `dataType` query value.
    pub fn data_type(&self) -> &'static str {
        match self {
            Capability::LocalForecast => "flw",
            Capability::NineDayForecast => "fnd",
            Capability::CurrentReport => "rhrread",
            Capability::Warnings => "warnsum",
            Capability::WarningInfo => "warningInfo",
            Capability::SpecialTips => "swt",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Capability::LocalForecast => {
                "Local weather forecast: general situation, tropical cyclone info, fire danger, forecast period, description and outlook"
            }
            Capability::NineDayForecast => {
                "9-day forecast: daily weather, min/max temperature and humidity, wind, probability of significant rain, soil and sea temperature"
            }
            Capability::CurrentReport => {
                "Current weather report: temperature, rainfall, humidity, UV index and lightning by place"
            }
            Capability::Warnings => "Weather warning summary: warning names, action codes and issue times",
            Capability::WarningInfo => {
                "Weather warning details: warning statement code, subtype, update time and contents"
            }
            Capability::SpecialTips => "Special weather tips",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = WeatherError;

    /// Accepts tool identifiers and the raw HKO `dataType` codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "local" | "flw" => Ok(Capability::LocalForecast),
            "nine_day" | "fnd" => Ok(Capability::NineDayForecast),
            "current" | "rhrread" => Ok(Capability::CurrentReport),
            "warning" | "warnsum" => Ok(Capability::Warnings),
            "warning_info" | "warningInfo" => Ok(Capability::WarningInfo),
            "special_tip" | "swt" => Ok(Capability::SpecialTips),
            other => Err(WeatherError::UnknownTool(other.to_string())),
        }
    }
}

/// Static description of one upstream HKO resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointSpec {
    pub id: Capability,
    /// Path and fixed query, relative to the configured base URL.
    pub url_template: &'static str,
    /// Query parameters a caller may set.
    pub allowed_params: &'static [&'static str],
}

impl EndpointSpec {
    pub fn allows(&self, param: &str) -> bool {
        self.allowed_params.contains(&param)
    }
}

const LANG_ONLY: &[&str] = &["lang"];

static CATALOG: [EndpointSpec; 6] = [
    EndpointSpec {
        id: Capability::LocalForecast,
        url_template: "weather.php?dataType=flw",
        allowed_params: LANG_ONLY,
    },
    EndpointSpec {
        id: Capability::NineDayForecast,
        url_template: "weather.php?dataType=fnd",
        allowed_params: LANG_ONLY,
    },
    EndpointSpec {
        id: Capability::CurrentReport,
        url_template: "weather.php?dataType=rhrread",
        allowed_params: LANG_ONLY,
    },
    EndpointSpec {
        id: Capability::Warnings,
        url_template: "weather.php?dataType=warnsum",
        allowed_params: LANG_ONLY,
    },
    EndpointSpec {
        id: Capability::WarningInfo,
        url_template: "weather.php?dataType=warningInfo",
        allowed_params: LANG_ONLY,
    },
    EndpointSpec {
        id: Capability::SpecialTips,
        url_template: "weather.php?dataType=swt",
        allowed_params: LANG_ONLY,
    },
];

/// Look up the endpoint for a capability.
pub fn lookup(capability: Capability) -> Option<&'static EndpointSpec> {
    CATALOG.iter().find(|spec| spec.id == capability)
}
