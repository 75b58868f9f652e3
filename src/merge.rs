use crate::error::{Error, Result};
use crate::geo::LatLon;
use crate::navdata::Point;
use crate::txt_data::{slice, slice_from, DataFile};
use derive_builder::Builder;
use std::collections::HashMap;
use std::fmt;

pub mod airport;
pub mod fix;
pub mod navaid;

/// Records closer than this are taken to be the same physical point.
pub const MATCH_RADIUS_NM: f64 = 2.0;

/// Fields left unset on the builder fall back to `MergeConfig::default()`.
#[derive(Clone, Debug, Builder)]
#[builder(default)]
pub struct MergeConfig {
    /// Overwrite the coordinates of matched legacy lines with the export's.
    pub prefer_source_coords: bool,
    pub match_radius_nm: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            prefer_source_coords: true,
            match_radius_nm: MATCH_RADIUS_NM,
        }
    }
}

impl MergeConfig {
    /// Inclusive: a distance of exactly the radius still matches.
    pub fn is_match(&self, distance_nm: f64) -> bool {
        distance_nm <= self.match_radius_nm
    }
}

/// The lines of a legacy fixed-width table, edited in place and written back whole.
#[derive(Clone, Debug)]
pub struct LegacyTable {
    name: &'static str,
    lines: Vec<String>,
}

impl LegacyTable {
    pub fn new(name: &'static str, data: &DataFile) -> Self {
        LegacyTable {
            name,
            lines: data.lines().map(str::to_string).collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Data lines with their position. Comments (`;`) and blank lines are left out.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.lines
            .iter()
            .map(String::as_str)
            .enumerate()
            .filter(|(_, l)| !l.starts_with(';') && !l.trim().is_empty())
    }

    pub fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    /// Writes `lat`/`lon` right-justified into the given columns of line `i`, keeping every
    /// other column. Returns false when the line already holds those values.
    fn rewrite_coords(
        &mut self,
        i: usize,
        (lat_start, lat_end): (usize, usize),
        (lon_start, lon_end): (usize, usize),
        lat: &str,
        lon: &str,
    ) -> bool {
        let line = &self.lines[i];
        if slice(line, lat_start, lat_end).trim() == lat
            && slice(line, lon_start, lon_end).trim() == lon
        {
            return false;
        }

        let rewritten = format!(
            "{}{:>lat_w$}{:>lon_w$}{}",
            slice(line, 0, lat_start),
            lat,
            lon,
            slice_from(line, lon_end),
            lat_w = lat_end - lat_start,
            lon_w = lon_end - lon_start,
        );
        self.lines[i] = rewritten;
        true
    }
}

impl fmt::Display for LegacyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Column layout and identity rules of one legacy table.
pub trait LegacyFormat {
    /// Identity data besides the key that must also agree for a match.
    type Tag: PartialEq;

    const TABLE: &'static str;
    const LAT: (usize, usize);
    const LON: (usize, usize);

    /// Key and tag of a legacy line, or `None` if the line never takes part in matching.
    fn identify(line: &str) -> Option<(String, Self::Tag)>;

    fn identify_point(point: &Point) -> (String, Self::Tag);

    /// A brand new line for `point`.
    fn format(point: &Point) -> String;
}

struct Candidate<T> {
    line: usize,
    coord: LatLon,
    tag: T,
}

fn build_index<F: LegacyFormat>(
    table: &LegacyTable,
) -> Result<HashMap<String, Vec<Candidate<F::Tag>>>> {
    let mut index: HashMap<String, Vec<Candidate<F::Tag>>> = HashMap::new();

    for (i, line) in table.entries() {
        let (key, tag) = match F::identify(line) {
            Some(id) => id,
            None => continue,
        };
        let lat = slice(line, F::LAT.0, F::LAT.1);
        let lon = slice(line, F::LON.0, F::LON.1);
        let coord = LatLon::from_decimal(lat, lon).ok_or_else(|| Error::BadCoordinate {
            table: F::TABLE,
            line: i + 1,
            value: format!("{} {}", lat.trim(), lon.trim()),
        })?;

        index
            .entry(key)
            .or_default()
            .push(Candidate { line: i, coord, tag });
    }

    Ok(index)
}

#[derive(Debug, Default)]
pub struct MergeReport {
    /// Matched lines whose coordinates were rewritten.
    pub updated: usize,
    /// Matched lines left as they were.
    pub unchanged: usize,
    pub appended: usize,
    pub warnings: Vec<Error>,
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} updated, {} unchanged, {} appended",
            self.updated, self.unchanged, self.appended
        )
    }
}

/// Matches every point against `table`, updating matched lines and appending the rest.
///
/// The identity index is taken once up front, so appended lines are never matched against.
/// Returns the points that were appended.
pub fn merge_points<'p, F, I>(
    table: &mut LegacyTable,
    points: I,
    config: &MergeConfig,
    report: &mut MergeReport,
) -> Result<Vec<&'p Point>>
where
    F: LegacyFormat,
    I: IntoIterator<Item = &'p Point>,
{
    let index = build_index::<F>(table)?;
    let mut appended = Vec::new();

    for point in points {
        let (key, tag) = F::identify_point(point);

        let found = match index.get(&key) {
            Some(candidates) => {
                let coord = point.latlon()?;
                candidates
                    .iter()
                    .find(|c| c.tag == tag && config.is_match(c.coord.distance_nm(coord)))
            }
            None => None,
        };

        match found {
            Some(c) => {
                if config.prefer_source_coords
                    && table.rewrite_coords(c.line, F::LAT, F::LON, &point.lat, &point.lon)
                {
                    log::debug!("{}: moved {} on line {}", F::TABLE, key, c.line + 1);
                    report.updated += 1;
                } else {
                    report.unchanged += 1;
                }
            }
            None => {
                table.push(F::format(point));
                report.appended += 1;
                appended.push(point);
            }
        }
    }

    Ok(appended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navdata::tests::point;
    use crate::navdata::PointKind;

    struct Simple;

    impl LegacyFormat for Simple {
        type Tag = ();
        const TABLE: &'static str = "simple";
        const LAT: (usize, usize) = (5, 15);
        const LON: (usize, usize) = (15, 26);

        fn identify(line: &str) -> Option<(String, ())> {
            Some((slice(line, 0, 5).trim().to_string(), ()))
        }

        fn identify_point(point: &Point) -> (String, ()) {
            (point.code.clone(), ())
        }

        fn format(point: &Point) -> String {
            format!("{:<5}{:>10}{:>11}", point.code, point.lat, point.lon)
        }
    }

    fn table(text: &str) -> LegacyTable {
        LegacyTable::new("simple", &DataFile::from(text.to_string()))
    }

    #[test]
    fn radius_is_inclusive() {
        let config = MergeConfig::default();
        assert!(config.is_match(0.0));
        assert!(config.is_match(2.0));
        assert!(!config.is_match(2.000001));
    }

    #[test]
    fn builder_defaults() {
        let config = MergeConfigBuilder::default().build().unwrap();
        assert!(config.prefer_source_coords);
        assert_eq!(config.match_radius_nm, MATCH_RADIUS_NM);

        let config = MergeConfigBuilder::default()
            .prefer_source_coords(false)
            .build()
            .unwrap();
        assert!(!config.prefer_source_coords);
    }

    #[test]
    fn builder_and_default_agree() {
        let built = MergeConfigBuilder::default().build().unwrap();
        let default = MergeConfig::default();
        assert_eq!(built.prefer_source_coords, default.prefer_source_coords);
        assert_eq!(built.match_radius_nm, default.match_radius_nm);
    }

    #[test]
    fn radius_is_measured_on_the_ellipsoid() {
        // 0.033 degrees of latitude at 45N is about 1.98 nm, 0.034 about 2.04 nm.
        let mut t = table("ALPHA 45.000000   7.000000\nBRAVO 45.000000   7.000000");
        let inside = point(PointKind::Waypoint, "ALPHA", "45.033000", "7.000000");
        let outside = point(PointKind::Waypoint, "BRAVO", "45.034000", "7.000000");

        let mut report = MergeReport::default();
        merge_points::<Simple, _>(
            &mut t,
            vec![&inside, &outside],
            &MergeConfig::default(),
            &mut report,
        )
        .unwrap();
        assert_eq!((report.updated, report.appended), (1, 1));
        assert_eq!(t.lines()[0], "ALPHA 45.033000   7.000000");
        assert_eq!(t.lines()[1], "BRAVO 45.000000   7.000000");
    }

    #[test]
    fn radius_is_inclusive_on_real_coordinates() {
        let legacy = LatLon::from_decimal("45.000000", "7.000000").unwrap();
        let p = point(PointKind::Waypoint, "ALPHA", "45.033000", "7.000000");
        let exact = legacy.distance_nm(p.latlon().unwrap());

        let merge_with_radius = |radius: f64| {
            let mut t = table("ALPHA 45.000000   7.000000");
            let config = MergeConfigBuilder::default()
                .match_radius_nm(radius)
                .build()
                .unwrap();
            let mut report = MergeReport::default();
            merge_points::<Simple, _>(&mut t, vec![&p], &config, &mut report).unwrap();
            report.appended
        };
        assert_eq!(merge_with_radius(exact), 0);
        assert_eq!(merge_with_radius(exact - 1e-6), 1);
    }

    #[test]
    fn entries_skip_comments_and_blanks() {
        let t = table("; header\nALPHA 1.0 2.0\n\n   \nBRAVO 3.0 4.0");
        let entries: Vec<_> = t.entries().map(|(i, _)| i).collect();
        assert_eq!(entries, vec![1, 4]);
    }

    #[test]
    fn rewrite_keeps_other_columns() {
        let mut t = table("ALPHA  1.000000   2.000000 TAIL");
        assert!(t.rewrite_coords(0, Simple::LAT, Simple::LON, "1.500000", "-2.000000"));
        assert_eq!(t.lines()[0], "ALPHA  1.500000  -2.000000 TAIL");
        assert!(!t.rewrite_coords(0, Simple::LAT, Simple::LON, "1.500000", "-2.000000"));
    }

    #[test]
    fn matches_nearby_and_appends_distant() {
        let mut t = table("; fixes\nALPHA 45.000000   7.000000");
        let near = point(PointKind::Waypoint, "ALPHA", "45.010000", "7.000000");
        let far = point(PointKind::Waypoint, "ALPHA", "46.000000", "7.000000");
        let new = point(PointKind::Waypoint, "BRAVO", "1.000000", "1.000000");

        let mut report = MergeReport::default();
        let appended = merge_points::<Simple, _>(
            &mut t,
            vec![&near, &far, &new],
            &MergeConfig::default(),
            &mut report,
        )
        .unwrap();

        assert_eq!(report.updated, 1);
        assert_eq!(report.appended, 2);
        assert_eq!(appended, vec![&far, &new]);
        assert_eq!(
            t.lines(),
            &[
                "; fixes",
                "ALPHA 45.010000   7.000000",
                "ALPHA 46.000000   7.000000",
                "BRAVO  1.000000   1.000000",
            ]
        );
    }

    #[test]
    fn appended_lines_are_not_candidates() {
        let mut t = table("");
        let a = point(PointKind::Waypoint, "ALPHA", "45.000000", "7.000000");
        let mut report = MergeReport::default();
        merge_points::<Simple, _>(&mut t, vec![&a, &a], &MergeConfig::default(), &mut report)
            .unwrap();
        assert_eq!(report.appended, 2);
    }

    #[test]
    fn keeps_existing_coordinates_on_request() {
        let mut t = table("ALPHA 45.000000   7.000000");
        let near = point(PointKind::Waypoint, "ALPHA", "45.010000", "7.000000");
        let config = MergeConfigBuilder::default()
            .prefer_source_coords(false)
            .build()
            .unwrap();

        let mut report = MergeReport::default();
        merge_points::<Simple, _>(&mut t, vec![&near], &config, &mut report).unwrap();
        assert_eq!(report.unchanged, 1);
        assert_eq!(t.lines()[0], "ALPHA 45.000000   7.000000");
    }

    #[test]
    fn bad_legacy_coordinate_is_fatal() {
        let mut t = table("; c\nALPHA   garbage   7.000000");
        let p = point(PointKind::Waypoint, "ALPHA", "45.0", "7.0");
        let mut report = MergeReport::default();
        match merge_points::<Simple, _>(&mut t, vec![&p], &MergeConfig::default(), &mut report) {
            Err(Error::BadCoordinate { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected BadCoordinate, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn displays_with_trailing_newline() {
        let t = table("A\nB");
        assert_eq!(t.to_string(), "A\nB\n");
    }
}
