use super::*;
use crate::navdata::{NavDatabase, Runway};

/// `airports.dat`: ICAO, latitude, longitude.
pub struct AirportList;

impl LegacyFormat for AirportList {
    type Tag = ();

    const TABLE: &'static str = "airports.dat";
    const LAT: (usize, usize) = (4, 14);
    const LON: (usize, usize) = (14, 25);

    fn identify(line: &str) -> Option<(String, ())> {
        Some((slice(line, 0, 4).to_string(), ()))
    }

    fn identify_point(point: &Point) -> (String, ()) {
        (point.code.clone(), ())
    }

    fn format(point: &Point) -> String {
        format!("{}{:>10}{:>11}", point.code, point.lat, point.lon)
    }
}

/// One `wpNavAPT.txt` line per runway of a newly added airport.
pub fn runway_line(airport: &Point, runway: &Runway) -> String {
    format!(
        "{:<24}{}{:<3}{}{}{:>10}{:>11}000.00{}{}",
        slice(airport.name(), 0, 24),
        airport.code,
        runway.number,
        runway.length,
        runway.heading,
        runway.lat,
        runway.lon,
        runway.heading,
        airport.elevation.as_deref().unwrap_or(""),
    )
}

/// Merges the airports into `list` and adds the runways of every appended airport to `detail`.
pub fn merge_airports(
    list: &mut LegacyTable,
    detail: &mut LegacyTable,
    db: &NavDatabase,
    config: &MergeConfig,
) -> Result<MergeReport> {
    let mut report = MergeReport::default();
    let added = merge_points::<AirportList, _>(list, db.airports(), config, &mut report)?;

    for airport in added {
        let runways = db.runways(&airport.code);
        if runways.is_empty() {
            let warning = Error::NoRunwayData {
                icao: airport.code.clone(),
            };
            log::warn!("{}", warning);
            report.warnings.push(warning);
            continue;
        }
        for runway in runways {
            detail.push(runway_line(airport, runway));
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navdata::PointKind;

    fn kjfk(lat: &str, lon: &str) -> Point {
        Point {
            kind: PointKind::Airport,
            code: "KJFK".to_string(),
            name: Some("JOHN F KENNEDY INTERNATIONAL".to_string()),
            lat: lat.to_string(),
            lon: lon.to_string(),
            elevation: Some("00013".to_string()),
            frequency: None,
        }
    }

    fn runway() -> Runway {
        Runway {
            number: "04L".to_string(),
            length: "12079".to_string(),
            heading: "044".to_string(),
            lat: "40.622236".to_string(),
            lon: "-73.785589".to_string(),
        }
    }

    fn tables(list: &str, detail: &str) -> (LegacyTable, LegacyTable) {
        (
            LegacyTable::new("airports.dat", &DataFile::from(list.to_string())),
            LegacyTable::new("wpNavAPT.txt", &DataFile::from(detail.to_string())),
        )
    }

    #[test]
    fn formats_runway_line() {
        assert_eq!(
            runway_line(&kjfk("40.639751", "-73.778925"), &runway()),
            "JOHN F KENNEDY INTERNATIKJFK04L12079044 40.622236 -73.785589000.0004400013"
        );
    }

    #[test]
    fn present_airport_is_not_duplicated() {
        let (mut list, mut detail) = tables("; airports\nKJFK 40.639700 -73.778900", "");
        let mut db = NavDatabase::default();
        db.insert_airport("1", kjfk("40.639751", "-73.778925"));
        db.add_runway("KJFK", runway());

        let report = merge_airports(&mut list, &mut detail, &db, &MergeConfig::default()).unwrap();
        assert_eq!((report.updated, report.appended), (1, 0));
        assert_eq!(list.lines(), &["; airports", "KJFK 40.639751 -73.778925"]);
        assert!(detail.lines().is_empty());
    }

    #[test]
    fn identical_coordinates_are_left_alone() {
        let (mut list, mut detail) = tables("KJFK 40.639751 -73.778925   extra", "");
        let mut db = NavDatabase::default();
        db.insert_airport("1", kjfk("40.639751", "-73.778925"));

        let report = merge_airports(&mut list, &mut detail, &db, &MergeConfig::default()).unwrap();
        assert_eq!((report.updated, report.unchanged), (0, 1));
        assert_eq!(list.lines()[0], "KJFK 40.639751 -73.778925   extra");
    }

    #[test]
    fn new_airport_brings_its_runways() {
        let (mut list, mut detail) = tables("EGLL 51.477500  -0.461389", "; runways");
        let mut db = NavDatabase::default();
        db.insert_airport("1", kjfk("40.639751", "-73.778925"));
        db.add_runway("KJFK", runway());
        db.add_runway("KJFK", Runway { number: "22R".to_string(), ..runway() });

        let report = merge_airports(&mut list, &mut detail, &db, &MergeConfig::default()).unwrap();
        assert_eq!(report.appended, 1);
        assert_eq!(list.lines()[1], "KJFK 40.639751 -73.778925");
        assert_eq!(detail.lines().len(), 3);
        assert_eq!(&detail.lines()[2][24..31], "KJFK22R");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn new_airport_without_runways_warns() {
        let (mut list, mut detail) = tables("", "");
        let mut db = NavDatabase::default();
        db.insert_airport("1", kjfk("40.639751", "-73.778925"));

        let report = merge_airports(&mut list, &mut detail, &db, &MergeConfig::default()).unwrap();
        assert_eq!(list.lines().len(), 1);
        assert!(detail.lines().is_empty());
        match report.warnings.as_slice() {
            [Error::NoRunwayData { icao }] => assert_eq!(icao, "KJFK"),
            other => panic!("unexpected warnings {:?}", other),
        }
    }
}
