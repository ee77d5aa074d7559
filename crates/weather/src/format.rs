//! Plain-text rendering of HKO payloads.
//!
//! Rendering is best effort: missing or oddly typed fields turn into
//! placeholders, never errors.

use crate::catalog::Capability;
use serde_json::Value;

/// Render a payload for the given capability as readable text.
pub fn render(capability: Capability, data: &Value) -> String {
    match capability {
        Capability::LocalForecast => local_forecast(data),
        Capability::NineDayForecast => nine_day_forecast(data),
        Capability::CurrentReport => current_report(data),
        Capability::Warnings => warning_summary(data),
        Capability::WarningInfo => warning_info(data),
        Capability::SpecialTips => special_tips(data),
    }
}

/// Human name for an HKO warning statement code.
pub fn warning_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "WFIRE" => "Fire Danger Warning",
        "WFROST" => "Frost Warning",
        "WHOT" => "Hot Weather Warning",
        "WCOLD" => "Cold Weather Warning",
        "WMSGNL" => "Strong Monsoon Signal",
        "WTCPRE8" => "Pre-no.8 Special Announcement",
        "WRAIN" => "Rainstorm Warning Signal",
        "WFNTSA" => "Special Announcement on Flooding in the northern New Territories",
        "WL" => "Landslip Warning",
        "WTCSGNL" => "Tropical Cyclone Warning Signal",
        "WTMW" => "Tsunami Warning",
        "WTS" => "Thunderstorm Warning",
        _ => return None,
    };
    Some(name)
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field(data: &Value, key: &str, fallback: &str) -> String {
    text(data.get(key)).unwrap_or_else(|| fallback.to_string())
}

fn items<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn local_forecast(data: &Value) -> String {
    [
        ("General Situation", "generalSituation", "Unknown"),
        ("Tropical Cyclone", "tcInfo", "None"),
        ("Fire Danger Warning", "fireDangerWarning", "None"),
        ("Forecast Period", "forecastPeriod", "Not provided"),
        ("Forecast", "forecastDesc", "No forecast description available"),
        ("Outlook", "outlook", "No outlook available"),
        ("Updated", "updateTime", "Unknown"),
    ]
    .iter()
    .map(|(label, key, fallback)| format!("{}: {}", label, field(data, key, fallback)))
    .collect::<Vec<_>>()
    .join("\n")
}

fn nine_day_forecast(data: &Value) -> String {
    let days = items(data, "weatherForecast");
    if days.is_empty() {
        return "No 9-day forecast available".to_string();
    }

    days.iter()
        .map(|day| {
            let min = day.get("forecastMintemp");
            let max = day.get("forecastMaxtemp");
            let unit = text(max.and_then(|t| t.get("unit")))
                .map(|u| unit_symbol(&u))
                .unwrap_or_default();
            format!(
                "{} ({}): {}, {}-{}{}",
                field(day, "week", "?"),
                field(day, "forecastDate", "?"),
                field(day, "forecastWeather", "no description"),
                text(min.and_then(|t| t.get("value"))).unwrap_or_else(|| "?".to_string()),
                text(max.and_then(|t| t.get("value"))).unwrap_or_else(|| "?".to_string()),
                unit,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn unit_symbol(unit: &str) -> String {
    match unit {
        "C" => "°C".to_string(),
        "percent" => "%".to_string(),
        other => other.to_string(),
    }
}

fn current_report(data: &Value) -> String {
    let mut sections = Vec::new();

    match data.get("temperature") {
        Some(temperature) if !items(temperature, "data").is_empty() => {
            let readings = items(temperature, "data")
                .iter()
                .map(|t| {
                    format!(
                        "  {}: {}{}",
                        field(t, "place", "?"),
                        field(t, "value", "?"),
                        unit_symbol(&field(t, "unit", "")),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            sections.push(format!(
                "Temperature (recorded at {}):\n{}",
                field(temperature, "recordTime", "unknown time"),
                readings
            ));
        }
        _ => sections.push("Temperature data not available".to_string()),
    }

    match data.get("rainfall") {
        Some(rainfall) if !items(rainfall, "data").is_empty() => {
            let readings = items(rainfall, "data")
                .iter()
                .map(|r| {
                    let maintenance = if field(r, "main", "FALSE").eq_ignore_ascii_case("TRUE") {
                        " (under maintenance)"
                    } else {
                        ""
                    };
                    format!(
                        "  {}: {}{}{}",
                        field(r, "place", "?"),
                        field(r, "max", "0"),
                        field(r, "unit", ""),
                        maintenance
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            sections.push(format!("Rainfall:\n{}", readings));
        }
        _ => sections.push("Rainfall data not available".to_string()),
    }

    let humidity = data.get("humidity");
    match humidity.map(|h| items(h, "data")).and_then(|d| d.first()) {
        Some(reading) => sections.push(format!(
            "Humidity: {}{} at {} (recorded at {})",
            field(reading, "value", "?"),
            unit_symbol(&field(reading, "unit", "")),
            field(reading, "place", "?"),
            humidity
                .map(|h| field(h, "recordTime", "unknown time"))
                .unwrap_or_default(),
        )),
        None => sections.push("Humidity data not available".to_string()),
    }

    // HKO sends an empty string instead of an object when there is no UV reading
    let uv = data.get("uvindex");
    match uv.map(|u| items(u, "data")).and_then(|d| d.first()) {
        Some(reading) => sections.push(format!(
            "UV Index: {} ({}) at {}. {}",
            field(reading, "value", "?"),
            field(reading, "desc", "no description"),
            field(reading, "place", "?"),
            uv.map(|u| field(u, "recordDesc", "")).unwrap_or_default(),
        )),
        None => sections.push("No UV index".to_string()),
    }

    sections.join("\n").trim_end().to_string()
}

fn warning_summary(data: &Value) -> String {
    let warnings = match data.as_object() {
        Some(map) if !map.is_empty() => map,
        _ => return "No warning issued.".to_string(),
    };

    warnings
        .iter()
        .map(|(code, info)| {
            format!(
                "{} ({}) - Action: {}, Issued at: {}",
                field(info, "name", "Unknown"),
                code,
                field(info, "actionCode", "Unknown"),
                field(info, "issueTime", "Unknown"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn warning_info(data: &Value) -> String {
    let details = items(data, "details");
    if details.is_empty() {
        return "No active warnings".to_string();
    }

    details
        .iter()
        .map(|warning| {
            let code = field(warning, "warningStatementCode", "UNKNOWN");
            let name = warning_name(&code).map(str::to_string).unwrap_or(code);
            let subtype = text(warning.get("subtype"))
                .map(|s| format!(" ({})", s))
                .unwrap_or_default();
            let contents = items(warning, "contents")
                .iter()
                .filter_map(|line| text(Some(line)))
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                "{}{} - {}: {}",
                name,
                subtype,
                field(warning, "updateTime", "unknown time"),
                contents
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn special_tips(data: &Value) -> String {
    let tips = items(data, "swt");
    if tips.is_empty() {
        return "No special weather tips.".to_string();
    }

    tips.iter()
        .map(|tip| {
            format!(
                "{}: {}",
                field(tip, "updateTime", "time unknown"),
                field(tip, "desc", "no description")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
