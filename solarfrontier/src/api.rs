use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::error::Result;

/// Every request to the inverter gives up after this long.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The script endpoints of the inverter web interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    SystemInfo,
    Measurements,
    YieldDay,
    YieldMonth,
    YieldYear,
    YieldTotal,
}

impl Endpoint {
    pub(crate) fn path(self) -> &'static str {
        use Endpoint::*;
        match self {
            SystemInfo => "/gen.info.table.sys.js",
            Measurements => "/gen.measurements.table.js",
            YieldDay => "/gen.yield.day.chart.js",
            YieldMonth => "/gen.yield.month.chart.js",
            YieldYear => "/gen.yield.year.chart.js",
            YieldTotal => "/gen.yield.total.chart.js",
        }
    }
}

/// Sends a raw GET for `endpoint` to the inverter at `host`.
///
/// Returns the body for a `200 OK` answer and `None` for any other status.
/// Connection, timeout and body errors are passed on to the caller.
pub(crate) fn fetch(session: &Client, host: &str, endpoint: Endpoint) -> Result<Option<String>> {
    let url = format!("{}{}", host, endpoint.path());
    let response = session.get(&url).timeout(REQUEST_TIMEOUT).send()?;
    let status = response.status();
    debug!(
        "[solarfrontier api] GET {} status: {:?} {:?}",
        endpoint.path(),
        status,
        status.canonical_reason().unwrap_or_default()
    );

    if status != StatusCode::OK {
        return Ok(None);
    }
    Ok(Some(response.text()?))
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-
