use clap::ValueEnum;
use prettytable::{format, Cell, Row, Table};
use serde::Serialize;
use solarfrontier::{units, Measurements, SolarFrontierClient, SystemInfo, YieldValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Period {
    Day,
    Month,
    Year,
    Total,
    All,
}

impl Period {
    fn name(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Month => "month",
            Period::Year => "year",
            Period::Total => "total",
            Period::All => "all",
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct Yields {
    #[serde(skip_serializing_if = "Option::is_none")]
    day: Option<YieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<YieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<YieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<YieldValue>,
}

impl Yields {
    fn fetch(client: &mut SolarFrontierClient, period: Period) -> Self {
        let wanted = |p: Period| period == p || period == Period::All;
        Yields {
            day: wanted(Period::Day).then(|| client.yield_day()),
            month: wanted(Period::Month).then(|| client.yield_month()),
            year: wanted(Period::Year).then(|| client.yield_year()),
            total: wanted(Period::Total).then(|| client.yield_total()),
        }
    }

    fn entries(&self) -> Vec<(Period, &YieldValue)> {
        [
            (Period::Day, &self.day),
            (Period::Month, &self.month),
            (Period::Year, &self.year),
            (Period::Total, &self.total),
        ]
        .into_iter()
        .filter_map(|(period, value)| value.as_ref().map(|value| (period, value)))
        .collect()
    }
}

/// Everything the inverter reports, read one endpoint after the other.
#[derive(Debug, Serialize)]
struct Snapshot {
    host: String,
    connected: bool,
    system_info: SystemInfo,
    measurements: Measurements,
    yields: Yields,
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

pub(crate) fn check(client: &mut SolarFrontierClient, json: bool) -> anyhow::Result<()> {
    let connected = client.test_connection();
    if json {
        print_json(&serde_json::json!({ "host": client.host(), "connected": connected }))?;
    } else if connected {
        println!("{} is reachable", client.host());
    }
    if !connected {
        return Err(anyhow::anyhow!(
            "no Solar Frontier inverter answering at {}",
            client.host()
        ));
    }
    Ok(())
}

pub(crate) fn system_info(client: &mut SolarFrontierClient, json: bool) -> anyhow::Result<()> {
    let info = client.system_info();
    if json {
        return print_json(&info);
    }
    system_info_table(&info).printstd();
    Ok(())
}

pub(crate) fn measurements(client: &mut SolarFrontierClient, json: bool) -> anyhow::Result<()> {
    let measurements = client.measurements();
    if json {
        return print_json(&measurements);
    }
    info!("found {} measurements", measurements.len());
    measurements_table(&measurements).printstd();
    Ok(())
}

pub(crate) fn yields(
    client: &mut SolarFrontierClient,
    period: Period,
    json: bool,
) -> anyhow::Result<()> {
    let yields = Yields::fetch(client, period);
    if json {
        return print_json(&yields);
    }
    yields_table(&yields).printstd();
    Ok(())
}

pub(crate) fn all(client: &mut SolarFrontierClient, json: bool) -> anyhow::Result<()> {
    let snapshot = Snapshot {
        host: client.host().to_string(),
        connected: client.test_connection(),
        system_info: client.system_info(),
        measurements: client.measurements(),
        yields: Yields::fetch(client, Period::All),
    };
    if json {
        return print_json(&snapshot);
    }

    if !snapshot.connected {
        warn!("{} did not report a model name", snapshot.host);
    }
    system_info_table(&snapshot.system_info).printstd();
    println!();
    measurements_table(&snapshot.measurements).printstd();
    println!();
    yields_table(&snapshot.yields).printstd();
    Ok(())
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn create_table() -> Table {
    let mut table = Table::new();
    let fmt = format::FormatBuilder::new()
        .padding(1, 1)
        .separator(
            format::LinePosition::Title,
            format::LineSeparator::new('-', '+', '+', '+'),
        )
        .column_separator('|')
        .build();
    table.set_format(fmt);
    table
}

fn titles(names: &[&str]) -> Row {
    Row::new(
        names
            .iter()
            .map(|name| Cell::new_align(name, format::Alignment::CENTER))
            .collect(),
    )
}

fn system_info_table(info: &SystemInfo) -> Table {
    let mut table = create_table();
    table.set_titles(titles(&["model", "nominal power"]));
    table.add_row(Row::new(vec![
        Cell::new(info.model_name.as_deref().unwrap_or("-")),
        Cell::new_align(
            info.nominal_power.as_deref().unwrap_or("-"),
            format::Alignment::RIGHT,
        ),
    ]));
    table
}

fn measurements_table(measurements: &Measurements) -> Table {
    let mut table = create_table();
    table.set_titles(titles(&["metric", "value"]));
    for (key, value) in measurements {
        table.add_row(Row::new(vec![
            Cell::new(key),
            Cell::new_align(value.as_deref().unwrap_or("-"), format::Alignment::RIGHT),
        ]));
    }
    table
}

fn yields_table(yields: &Yields) -> Table {
    let mut table = create_table();
    table.set_titles(titles(&["period", "yield", "value", "unit"]));
    for (period, value) in yields.entries() {
        let (magnitude, unit) = match value.value().map(units::parse_measurement) {
            Some(Ok(m)) => (m.value.to_string(), m.unit),
            Some(Err(err)) => {
                warn!("cannot split {} yield: {}", period.name(), err);
                (String::new(), String::new())
            }
            None => (String::new(), String::new()),
        };
        table.add_row(Row::new(vec![
            Cell::new(period.name()),
            Cell::new_align(&value.to_string(), format::Alignment::RIGHT),
            Cell::new_align(&magnitude, format::Alignment::RIGHT),
            Cell::new(&unit),
        ]));
    }
    table
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-
