//! Reads everything the inverter offers once and prints it.
//!
//! ```bash
//! cargo run --example poll -- 192.168.50.101
//! ```

use solarfrontier::{units, SolarFrontierClient};

fn main() -> solarfrontier::Result<()> {
    let host = std::env::args()
        .nth(1)
        .expect("Expected the inverter address as first argument");
    let mut client = SolarFrontierClient::new(host);

    println!("Test connection: {}", client.test_connection());
    println!("System information: {:?}", client.system_info());
    println!("Measurement data: {:?}", client.measurements());
    println!("Yield of the current day: {}", client.yield_day());
    println!("Yield of the current month: {}", client.yield_month());
    println!("Yield of the current year: {}", client.yield_year());

    let total = client.yield_total();
    println!("Total yield: {}", total);

    client.close();

    if let Some(total) = total.value() {
        let m = units::parse_measurement(total)?;
        println!("Total yield value: {}, unit: {}", m.value, m.unit);
    }
    Ok(())
}
