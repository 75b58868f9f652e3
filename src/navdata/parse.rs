use super::*;
use crate::error::{Error, Result};
use crate::pmdg::*;
use crate::txt_data::{DataFile, Record};

const RWY_DELIM: &[(usize, usize)] = &[
    (0, 3),   // Type
    (4, 4),   // ICAO
    (8, 5),   // Runway number
    (13, 5),  // Length
    (21, 3),  // Heading
    (27, 9),  // Lat
    (36, 10), // Lon
];

const WPT_DELIM: &[(usize, usize)] = &[
    (0, 3),   // Type
    (12, 1),  // WPT type code
    (4, 4),   // ICAO (airports)
    (4, 8),   // Ident
    (25, 30), // Name
    (55, 6),  // Internal id
    (61, 5),  // Frequency
    (66, 9),  // Lat
    (75, 10), // Lon
    (85, 6),  // Elevation
];

const AWY_DELIM: &[(usize, usize)] = &[
    (0, 3),   // Type
    (4, 6),   // Airway code
    (13, 6),  // Start id
    (19, 6),  // End id
    (26, 9),  // Start lat
    (35, 10), // Start lon
    (45, 9),  // End lat
    (54, 10), // End lon
];

/// Builds the navigation database from a decoded export.
///
/// Any malformed scalar column aborts the whole parse. Waypoints with an unknown type code and
/// navaids without a frequency are skipped and recorded as warnings.
pub fn parse_navdata(data: &DataFile) -> Result<NavDatabase> {
    let mut db = NavDatabase::default();

    log::info!("Processing runway records...");
    for r in data.records("RWY", RWY_DELIM) {
        db.add_runway(
            r[1],
            Runway {
                number: r[2].trim().to_string(),
                length: r[3].to_string(),
                heading: r[4].to_string(),
                lat: to_pmdg_lat(r[5])?,
                lon: to_pmdg_lon(r[6])?,
            },
        );
    }

    log::info!("Processing waypoint records...");
    for r in data.records("WPT", WPT_DELIM) {
        parse_point(&mut db, &r)?;
    }

    log::info!("Processing airway records...");
    for r in data.records("AWY", AWY_DELIM) {
        db.add_airway_edge(
            r[1].trim(),
            AirwayEdge {
                start_id: r[2].to_string(),
                end_id: r[3].to_string(),
                start_lat: to_pmdg_lat(r[4])?,
                start_lon: to_pmdg_lon(r[5])?,
                end_lat: to_pmdg_lat(r[6])?,
                end_lon: to_pmdg_lon(r[7])?,
            },
        );
    }

    log::info!(
        "Parsed {} airports, {} waypoints, {} navaids and {} airways",
        db.airports().count(),
        db.waypoints().count(),
        db.navaids().count(),
        db.airways().len()
    );

    Ok(db)
}

fn parse_point(db: &mut NavDatabase, r: &Record) -> Result<()> {
    let (ty, id, freq) = (r[1], r[5], r[6]);

    // Coordinates are checked for every WPT line, including ones skipped below.
    let lat = to_pmdg_lat(r[7])?;
    let lon = to_pmdg_lon(r[8])?;
    let elevation = to_pmdg_elev(r[9])?;

    match ty {
        "0" => {
            db.insert_airport(
                id,
                Point {
                    kind: PointKind::Airport,
                    code: r[2].to_string(),
                    name: Some(r[4].trim().to_string()),
                    lat,
                    lon,
                    elevation: Some(elevation),
                    frequency: None,
                },
            );
        }
        // VFR waypoints are type 1 without a frequency
        _ if ty == "6" || (ty == "1" && is_blank(freq)) => {
            db.insert_waypoint(
                id,
                Point {
                    kind: PointKind::Waypoint,
                    code: r[3].trim().to_string(),
                    name: None,
                    lat,
                    lon,
                    elevation: None,
                    frequency: None,
                },
            );
        }
        _ => match PointKind::from_navaid_code(ty) {
            Some(_) if is_blank(freq) => {
                log::debug!("Navaid without frequency: {}", r.line());
                db.warn(Error::MissingFrequency {
                    ident: r[3].trim().to_string(),
                });
            }
            Some(kind) => {
                db.insert_navaid(
                    id,
                    Point {
                        kind,
                        code: r[3].trim().to_string(),
                        name: Some(r[4].trim().to_string()),
                        lat,
                        lon,
                        elevation: None,
                        frequency: Some(to_pmdg_freq(freq, kind.into())?),
                    },
                );
            }
            None => db.warn(Error::UnknownTypeCode {
                code: ty.to_string(),
                ident: r[3].trim().to_string(),
            }),
        },
    }

    Ok(())
}
