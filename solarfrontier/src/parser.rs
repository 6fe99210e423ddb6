//! Extraction of values from the HTML/JS fragments the inverter serves.
//!
//! The firmware emits markup that is not well formed enough for an HTML
//! parser, so every value is picked out with a regular expression. Nothing in
//! here fails: text that does not match simply yields no data.

use std::collections::HashMap;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Identity of the inverter as reported by `gen.info.table.sys.js`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// Number and unit, e.g. `"5.0 kW"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nominal_power: Option<String>,
}

impl SystemInfo {
    pub fn is_empty(&self) -> bool {
        self.model_name.is_none() && self.nominal_power.is_none()
    }
}

/// Live measurements keyed by metric name (`dc_power`, `ac_voltage_phase_1`,
/// ...) in the order the rows appear. A value is the number directly followed
/// by its unit (`"5.0W"`), or `None` if the device reported something that is
/// not a number.
pub type Measurements = IndexMap<String, Option<String>>;

lazy_static! {
    static ref MODEL_NAME: Regex = Regex::new(r"<td>Name</td><td>(.*?)</td>").unwrap();
    static ref NOMINAL_POWER: Regex =
        Regex::new(r"<td>Nominal Power</td><td>([\d.]+\s?[kM]?W)</td>").unwrap();
    static ref MEASUREMENT_ROW: Regex =
        Regex::new(r"<tr><td>(.*?)</td><td align='right'>(.*?)</td><td>(.*?)</td></tr>").unwrap();
    static ref YIELD: Regex = Regex::new(
        r#"document\.getElementById\("labelValueId"\)\.innerHTML\s*=\s*"[^"]*?(\d+(\.\d+)?[kM]?Wh)"#
    )
    .unwrap();
    static ref METRIC_NAMES: HashMap<&'static str, &'static str> = [
        ("P DC", "dc_power"),
        ("U DC", "dc_voltage"),
        ("I DC", "dc_current"),
        ("U AC1", "ac_voltage_phase_1"),
        ("U AC2", "ac_voltage_phase_2"),
        ("U AC3", "ac_voltage_phase_3"),
        ("I AC1", "ac_current_phase_1"),
        ("I AC2", "ac_current_phase_2"),
        ("I AC3", "ac_current_phase_3"),
        ("F AC", "ac_frequency"),
        ("F AC1", "ac_frequency_phase_1"),
        ("F AC2", "ac_frequency_phase_2"),
        ("F AC3", "ac_frequency_phase_3"),
        ("P AC", "ac_power"),
        ("P AC1", "ac_power_phase_1"),
        ("P AC2", "ac_power_phase_2"),
        ("P AC3", "ac_power_phase_3"),
    ]
    .into_iter()
    .collect();
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

/// Picks the model name and the nominal power out of the system info table.
/// Both lookups are independent, either may be missing.
pub fn parse_system_info(html: &str) -> SystemInfo {
    let model_name = MODEL_NAME
        .captures(html)
        .map(|caps| caps[1].to_string());
    let nominal_power = NOMINAL_POWER
        .captures(html)
        .map(|caps| caps[1].to_string());
    SystemInfo {
        model_name,
        nominal_power,
    }
}

/// Collects every `<tr><td>label</td><td align='right'>value</td><td>unit</td></tr>`
/// row. A label that shows up twice keeps the value of its last row.
pub fn parse_measurements(html: &str) -> Measurements {
    let mut measurements = Measurements::new();
    for caps in MEASUREMENT_ROW.captures_iter(html) {
        let key = metric_key(&caps[1]);
        let value = caps[2]
            .trim()
            .parse::<f64>()
            .ok()
            .map(|value| format!("{:?}{}", value, caps[3].trim()));
        measurements.insert(key, value);
    }
    if measurements.is_empty() {
        debug!("no measurement rows found");
    }
    measurements
}

/// Finds the `labelValueId` assignment of a yield chart script and returns
/// the number with its unit, e.g. `"10.5kWh"`.
pub fn parse_yield(js: &str) -> Option<String> {
    let value = YIELD.captures(js).map(|caps| caps[1].to_string());
    if value.is_none() {
        debug!("no yield value found");
    }
    value
}

/// `"U AC1"` becomes `ac_voltage_phase_1`. Labels we don't know are
/// snake-cased: `"Temp Heatsink"` becomes `temp_heatsink`.
fn metric_key(label: &str) -> String {
    let label = label.trim();
    match METRIC_NAMES.get(label) {
        Some(key) => key.to_string(),
        None => label.replace(' ', "_").to_lowercase(),
    }
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_info() {
        let html = "<td>Name</td><td>SF1234</td><td>Nominal Power</td><td>5.0 kW</td>";
        let info = parse_system_info(html);
        assert_eq!(info.model_name.as_deref(), Some("SF1234"));
        assert_eq!(info.nominal_power.as_deref(), Some("5.0 kW"));
    }

    #[test]
    fn system_info_partial() {
        let info = parse_system_info("<td>Nominal Power</td><td>4300W</td>");
        assert_eq!(info.model_name, None);
        assert_eq!(info.nominal_power.as_deref(), Some("4300W"));

        let info = parse_system_info("<td>Nominal Power</td><td>1.2 GW</td>");
        assert!(info.nominal_power.is_none());
    }

    #[test]
    fn system_info_unrelated() {
        let info = parse_system_info("<div>Some unrelated content</div>");
        assert!(info.is_empty());
        assert_eq!(info, SystemInfo::default());
    }

    #[test]
    fn measurements() {
        let html = "<tr><td>P DC</td><td align='right'>5.0</td><td>W</td></tr>";
        let result = parse_measurements(html);
        assert_eq!(result.len(), 1);
        assert_eq!(result["dc_power"].as_deref(), Some("5.0W"));
    }

    #[test]
    fn measurements_table() {
        let html = "<table>\
            <tr><td> U AC2 </td><td align='right'> 231 </td><td> V </td></tr>\
            <tr><td>F AC</td><td align='right'>49.98</td><td>Hz</td></tr>\
            <tr><td>Temp Heatsink</td><td align='right'>41.5</td><td>C</td></tr>\
            <tr><td>Status</td><td align='right'>MPP</td><td></td></tr>\
            </table>";
        let result = parse_measurements(html);
        let keys: Vec<_> = result.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["ac_voltage_phase_2", "ac_frequency", "temp_heatsink", "status"]
        );
        assert_eq!(result["ac_voltage_phase_2"].as_deref(), Some("231.0V"));
        assert_eq!(result["ac_frequency"].as_deref(), Some("49.98Hz"));
        assert_eq!(result["temp_heatsink"].as_deref(), Some("41.5C"));
        assert_eq!(result["status"], None);
    }

    #[test]
    fn measurements_last_row_wins() {
        let html = "<tr><td>P AC</td><td align='right'>1</td><td>W</td></tr>\
            <tr><td>I DC</td><td align='right'>2</td><td>A</td></tr>\
            <tr><td>P AC</td><td align='right'>3</td><td>kW</td></tr>";
        let result = parse_measurements(html);
        assert_eq!(result.len(), 2);
        assert_eq!(result["ac_power"].as_deref(), Some("3.0kW"));
    }

    #[test]
    fn measurements_float_text() {
        let html = "<tr><td>P AC</td><td align='right'>1e20</td><td>W</td></tr>\
            <tr><td>I AC</td><td align='right'>0.00001</td><td>A</td></tr>\
            <tr><td>U DC</td><td align='right'>-0.5</td><td>V</td></tr>";
        let result = parse_measurements(html);
        assert_eq!(result["ac_power"].as_deref(), Some("1e20W"));
        assert_eq!(result["i_ac"].as_deref(), Some("1e-5A"));
        assert_eq!(result["dc_voltage"].as_deref(), Some("-0.5V"));
    }

    #[test]
    fn measurements_unrelated() {
        assert!(parse_measurements("<div>Invalid content</div>").is_empty());
        // double quoted attributes are not what the firmware sends
        let html = r#"<tr><td>P DC</td><td align="right">5.0</td><td>W</td></tr>"#;
        assert!(parse_measurements(html).is_empty());
    }

    #[test]
    fn yields() {
        let js = r#"document.getElementById("labelValueId").innerHTML = "10.5Wh""#;
        assert_eq!(parse_yield(js).as_deref(), Some("10.5Wh"));

        let js = r#"document.getElementById("labelValueId").innerHTML = "100.0Wh""#;
        assert_eq!(parse_yield(js).as_deref(), Some("100.0Wh"));

        let js = r#"x();document.getElementById("labelValueId").innerHTML="Total: 12 MWh";"#;
        assert_eq!(parse_yield(js), None);

        let js = r#"document.getElementById("labelValueId").innerHTML="Total: 12MWh";"#;
        assert_eq!(parse_yield(js).as_deref(), Some("12MWh"));
    }

    #[test]
    fn yield_unrelated() {
        assert_eq!(parse_yield("<div>Invalid content</div>"), None);
        let js = r#"document.getElementById("otherId").innerHTML = "5.0Wh""#;
        assert_eq!(parse_yield(js), None);
    }
}
