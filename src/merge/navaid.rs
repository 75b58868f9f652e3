use super::*;
use crate::navdata::{NavDatabase, PointKind};

/// Legacy navaid types that take part in matching; anything else (ILS, ...) is passed through.
const MATCHED_TYPES: &[&str] = &["VORD", "VOR", "DME", "NDB"];

/// `wpNavAID.txt`: name, ident, type, latitude, longitude, frequency and class flag.
pub struct NavaidTable;

impl LegacyFormat for NavaidTable {
    type Tag = String;

    const TABLE: &'static str = "wpNavAID.txt";
    const LAT: (usize, usize) = (33, 43);
    const LON: (usize, usize) = (43, 54);

    fn identify(line: &str) -> Option<(String, String)> {
        let ty = slice(line, 29, 33).trim();
        if !MATCHED_TYPES.contains(&ty) {
            return None;
        }
        Some((slice(line, 24, 29).trim().to_string(), ty.to_string()))
    }

    fn identify_point(point: &Point) -> (String, String) {
        let ty: &str = point.kind.into();
        (point.code.clone(), ty.to_string())
    }

    fn format(point: &Point) -> String {
        let ty: &str = point.kind.into();
        format!(
            "{:<24}{:<5}{:<4}{:>10}{:>11}{}{}",
            slice(point.name(), 0, 24),
            point.code,
            ty,
            point.lat,
            point.lon,
            point.frequency.as_deref().unwrap_or(""),
            if point.kind == PointKind::Ndb { "N" } else { "H" },
        )
    }
}

pub fn merge_navaids(
    table: &mut LegacyTable,
    db: &NavDatabase,
    config: &MergeConfig,
) -> Result<MergeReport> {
    let mut report = MergeReport::default();
    merge_points::<NavaidTable, _>(table, db.navaids(), config, &mut report)?;
    Ok(report)
}
