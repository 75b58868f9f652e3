use super::*;
use crate::navdata::NavDatabase;

/// `wpNavFIX.txt`: 24 column name, 5 column ident, latitude, longitude.
pub struct FixTable;

impl LegacyFormat for FixTable {
    type Tag = ();

    const TABLE: &'static str = "wpNavFIX.txt";
    const LAT: (usize, usize) = (29, 39);
    const LON: (usize, usize) = (39, 50);

    fn identify(line: &str) -> Option<(String, ())> {
        Some((slice(line, 0, 24).trim().to_string(), ()))
    }

    fn identify_point(point: &Point) -> (String, ()) {
        (point.code.clone(), ())
    }

    fn format(point: &Point) -> String {
        format!(
            "{:<24}{:<5}{:>10}{:>11}",
            point.code, point.code, point.lat, point.lon
        )
    }
}

pub fn merge_fixes(
    table: &mut LegacyTable,
    db: &NavDatabase,
    config: &MergeConfig,
) -> Result<MergeReport> {
    let mut report = MergeReport::default();
    merge_points::<FixTable, _>(table, db.waypoints(), config, &mut report)?;
    Ok(report)
}
