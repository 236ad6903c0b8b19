use anyhow::{ensure, Result};
use tracing::info;

use crate::cli::{Cli, GroupArgs};
use crate::cluster::{group_by_location_with, MAX_PRECISION};
use crate::types::QuotationSite;
use crate::view::MarkerSnapshot;

use super::{load_config, read_json, write_json};

/// Cluster every record, ignoring any spatial filter.
pub fn group(records: &[QuotationSite], precision: u32) -> Vec<MarkerSnapshot> {
    group_by_location_with(records, precision).iter()
        .map(MarkerSnapshot::from)
        .collect()
}

pub fn run(cli: &Cli, args: &GroupArgs) -> Result<()> {
    let config = load_config(cli)?;
    let precision = args.precision.unwrap_or(config.precision);
    ensure!(precision <= MAX_PRECISION, "[group] precision {precision} exceeds maximum of {MAX_PRECISION}");

    let records: Vec<QuotationSite> = read_json(&args.records)?;
    let markers = group(&records, precision);
    info!(records = records.len(), clusters = markers.len(), precision, "[group] done");

    write_json(&markers, args.output.as_deref(), args.pretty)
}
