use reqwest::blocking::Client;
use serde::{Serialize, Serializer};

use crate::api::{self, Endpoint};
use crate::error::Result;
use crate::parser::{self, Measurements, SystemInfo};

/// Outcome of reading one of the yield charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YieldValue {
    /// Number and unit as shown by the device, e.g. `"10.5kWh"`.
    Value(String),
    /// The inverter answered but the chart held no yield value.
    Missing,
    /// The inverter could not be reached. Reported as zero energy.
    Zero,
}

impl YieldValue {
    pub fn value(&self) -> Option<&str> {
        match self {
            YieldValue::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl std::fmt::Display for YieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YieldValue::Value(value) => write!(f, "{}", value),
            YieldValue::Missing => write!(f, "-"),
            YieldValue::Zero => write!(f, "0.0"),
        }
    }
}

impl Serialize for YieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            YieldValue::Value(value) => serializer.serialize_str(value),
            YieldValue::Missing => serializer.serialize_none(),
            YieldValue::Zero => serializer.serialize_f64(0.0),
        }
    }
}

/// Prefixes `http://` unless the host already names a scheme.
pub fn normalize_host(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

/// The main interface to read data from the inverter web interface.
///
/// None of the calls fail. When the inverter cannot be reached each call
/// falls back to an empty result (or [`YieldValue::Zero`] for yields) and
/// logs a warning.
#[derive(Debug)]
pub struct SolarFrontierClient {
    host: String,
    session: Option<Client>,
}

impl SolarFrontierClient {
    pub fn new(host: impl ToString) -> Self {
        SolarFrontierClient {
            host: normalize_host(&host.to_string()),
            session: None,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether an HTTP session is currently open.
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// True if the inverter reports a model name.
    pub fn test_connection(&mut self) -> bool {
        self.system_info().model_name.is_some()
    }

    pub fn system_info(&mut self) -> SystemInfo {
        match self.request(Endpoint::SystemInfo) {
            Ok(Some(body)) => parser::parse_system_info(&body),
            Ok(None) => SystemInfo::default(),
            Err(err) => {
                warn!("cannot read system info from {}: {}", self.host, err);
                SystemInfo::default()
            }
        }
    }

    pub fn measurements(&mut self) -> Measurements {
        match self.request(Endpoint::Measurements) {
            Ok(Some(body)) => parser::parse_measurements(&body),
            Ok(None) => Measurements::new(),
            Err(err) => {
                warn!("cannot read measurements from {}: {}", self.host, err);
                Measurements::new()
            }
        }
    }

    /// Yield of the current day.
    pub fn yield_day(&mut self) -> YieldValue {
        self.fetch_yield(Endpoint::YieldDay)
    }

    /// Yield of the current month.
    pub fn yield_month(&mut self) -> YieldValue {
        self.fetch_yield(Endpoint::YieldMonth)
    }

    /// Yield of the current year.
    pub fn yield_year(&mut self) -> YieldValue {
        self.fetch_yield(Endpoint::YieldYear)
    }

    /// Yield since the inverter was installed.
    pub fn yield_total(&mut self) -> YieldValue {
        self.fetch_yield(Endpoint::YieldTotal)
    }

    /// Drops the HTTP session. The next request opens a new one.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            debug!("closed session to {}", self.host);
        }
    }

    // -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

    /// Reuses the open session or opens a new one.
    fn request(&mut self, endpoint: Endpoint) -> Result<Option<String>> {
        let session = match self.session.take() {
            Some(session) => session,
            None => {
                debug!("opening session to {}", self.host);
                Client::builder().timeout(api::REQUEST_TIMEOUT).build()?
            }
        };
        let session = self.session.insert(session);
        api::fetch(session, &self.host, endpoint)
    }

    fn fetch_yield(&mut self, endpoint: Endpoint) -> YieldValue {
        match self.request(endpoint) {
            Ok(Some(body)) => parser::parse_yield(&body)
                .map(YieldValue::Value)
                .unwrap_or(YieldValue::Missing),
            Ok(None) => YieldValue::Missing,
            Err(err) => {
                warn!("cannot read {} from {}: {}", endpoint.path(), self.host, err);
                YieldValue::Zero
            }
        }
    }
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn normalizes_host() {
        assert_eq!(normalize_host("example.com"), "http://example.com");
        assert_eq!(normalize_host("192.168.1.1"), "http://192.168.1.1");
        assert_eq!(normalize_host("localhost"), "http://localhost");
        assert_eq!(normalize_host("http://example.com"), "http://example.com");
        assert_eq!(normalize_host("https://x"), "https://x");
        assert_eq!(normalize_host(""), "http://");
        // the scheme check is case sensitive
        assert_eq!(normalize_host("HTTP://x"), "http://HTTP://x");
    }

    #[test]
    fn normalize_host_is_idempotent() {
        for host in ["", "inverter.local", "http://a", "https://b:8080", "HTTPS://c"] {
            let once = normalize_host(host);
            assert_eq!(normalize_host(&once), once);
        }
    }

    #[test]
    fn new_client_has_no_session() {
        let mut client = SolarFrontierClient::new("inverter.local");
        assert_eq!(client.host(), "http://inverter.local");
        assert!(!client.has_session());
        client.close();
        client.close();
        assert!(!client.has_session());
    }

    #[test]
    fn yield_serialization() {
        let values = vec![
            YieldValue::Value("5.0Wh".to_string()),
            YieldValue::Missing,
            YieldValue::Zero,
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"["5.0Wh",null,0.0]"#);
        assert_eq!(values[0].value(), Some("5.0Wh"));
        assert_eq!(values[2].value(), None);
    }

    #[test]
    #[traced_test]
    fn transport_error_is_logged() {
        // nothing listens on port 1
        let mut client = SolarFrontierClient::new("127.0.0.1:1");
        assert_eq!(client.yield_total(), YieldValue::Zero);
        assert!(logs_contain("cannot read /gen.yield.total.chart.js"));
    }
}
