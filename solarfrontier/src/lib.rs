//! Library for reading data from the web interface of Solar Frontier inverters.
//!
//! The inverter serves a handful of small HTML/JS fragments which its own web
//! page stitches together. This crate fetches them and extracts the model
//! name, the live measurements and the energy yields.
//!
//! ## Example
//!
//! ```ignore
//! let mut client = solarfrontier::SolarFrontierClient::new("192.168.50.101");
//!
//! if client.test_connection() {
//!     println!("{:?}", client.system_info());
//!     println!("{:?}", client.measurements());
//!
//!     let total = client.yield_total();
//!     if let Some(total) = total.value() {
//!         let m = solarfrontier::units::parse_measurement(total)?;
//!         println!("total yield: {} {}", m.value, m.unit);
//!     }
//! }
//! client.close();
//! ```

#[macro_use]
extern crate tracing;

pub(crate) mod api;
pub(crate) mod client;
pub mod error;
pub mod parser;
pub mod units;

pub use client::{normalize_host, SolarFrontierClient, YieldValue};
pub use error::{Result, SolarFrontierError};
pub use parser::{Measurements, SystemInfo};
pub use units::Measurement;
