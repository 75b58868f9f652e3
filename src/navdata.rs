use crate::error::{Error, Result};
use crate::geo::LatLon;
use std::collections::HashMap;

pub mod parse;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PointKind {
    Airport,
    Waypoint,
    Vor,
    VorDme,
    Dme,
    Ndb,
}

impl PointKind {
    /// Navaid kind for a WPT type code.
    pub fn from_navaid_code(code: &str) -> Option<PointKind> {
        match code {
            "1" | "2" => Some(PointKind::Vor),
            "3" | "9" => Some(PointKind::Dme),
            "4" => Some(PointKind::VorDme),
            "5" => Some(PointKind::Ndb),
            _ => None,
        }
    }
}

impl From<PointKind> for &str {
    fn from(x: PointKind) -> &'static str {
        match x {
            PointKind::Airport => "APT",
            PointKind::Waypoint => "WPT",
            PointKind::Vor => "VOR",
            PointKind::VorDme => "VORD",
            PointKind::Dme => "DME",
            PointKind::Ndb => "NDB",
        }
    }
}

/// An airport, waypoint or navaid. Coordinates are kept in their decimal text form since that
/// is what gets compared against and written into the legacy tables.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub kind: PointKind,
    pub code: String,
    pub name: Option<String>,
    pub lat: String,
    pub lon: String,
    pub elevation: Option<String>,
    pub frequency: Option<String>,
}

impl Point {
    pub fn latlon(&self) -> Result<LatLon> {
        LatLon::from_decimal(&self.lat, &self.lon).ok_or_else(|| Error::NotANumber {
            field: "coordinate",
            value: format!("{} {}", self.lat, self.lon),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Runway {
    pub number: String,
    pub length: String,
    pub heading: String,
    pub lat: String,
    pub lon: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AirwayEdge {
    pub start_id: String,
    pub end_id: String,
    pub start_lat: String,
    pub start_lon: String,
    pub end_lat: String,
    pub end_lon: String,
}

#[derive(Clone, Debug)]
pub struct Airway {
    pub code: String,
    pub edges: Vec<AirwayEdge>,
}

/// Stable handle of a point in the database arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PointIdx(pub(crate) usize);

/// Everything parsed out of the export.
///
/// Points live in a single arena; the id lookup and the per-kind lists only hold handles into
/// it, so a coordinate fixed up through one view is seen through every other.
#[derive(Debug, Default)]
pub struct NavDatabase {
    pub(crate) points: Vec<Point>,
    pub(crate) by_id: HashMap<String, PointIdx>,
    airports: Vec<PointIdx>,
    airport_slots: HashMap<String, usize>,
    waypoints: Vec<PointIdx>,
    navaids: Vec<PointIdx>,
    runways: HashMap<String, Vec<Runway>>,
    pub(crate) airways: Vec<Airway>,
    airway_slots: HashMap<String, usize>,
    warnings: Vec<Error>,
}

impl NavDatabase {
    /// Stores `point` under `id`. A redefined id points at the newest definition from now on.
    fn insert(&mut self, id: &str, point: Point) -> PointIdx {
        let idx = PointIdx(self.points.len());
        self.points.push(point);
        self.by_id.insert(id.to_string(), idx);
        idx
    }

    /// Airports are unique per ICAO code: a later definition takes over the earlier slot.
    pub fn insert_airport(&mut self, id: &str, airport: Point) -> PointIdx {
        let icao = airport.code.clone();
        let idx = self.insert(id, airport);
        match self.airport_slots.get(&icao) {
            Some(&slot) => self.airports[slot] = idx,
            None => {
                self.airport_slots.insert(icao, self.airports.len());
                self.airports.push(idx);
            }
        }
        idx
    }

    pub fn insert_waypoint(&mut self, id: &str, waypoint: Point) -> PointIdx {
        let idx = self.insert(id, waypoint);
        self.waypoints.push(idx);
        idx
    }

    pub fn insert_navaid(&mut self, id: &str, navaid: Point) -> PointIdx {
        let idx = self.insert(id, navaid);
        self.navaids.push(idx);
        idx
    }

    pub fn add_runway(&mut self, icao: &str, runway: Runway) {
        self.runways
            .entry(icao.to_string())
            .or_default()
            .push(runway);
    }

    /// Appends an edge to the named airway, creating the airway on first sight.
    pub fn add_airway_edge(&mut self, code: &str, edge: AirwayEdge) {
        let slot = match self.airway_slots.get(code) {
            Some(&slot) => slot,
            None => {
                self.airway_slots.insert(code.to_string(), self.airways.len());
                self.airways.push(Airway {
                    code: code.to_string(),
                    edges: Vec::new(),
                });
                self.airways.len() - 1
            }
        };
        self.airways[slot].edges.push(edge);
    }

    pub fn warn(&mut self, warning: Error) {
        debug_assert!(warning.is_warning());
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn point(&self, idx: PointIdx) -> &Point {
        &self.points[idx.0]
    }

    pub fn point_by_id(&self, id: &str) -> Option<&Point> {
        self.by_id.get(id).map(|&idx| self.point(idx))
    }

    pub fn airports(&self) -> impl Iterator<Item = &Point> + '_ {
        self.airports.iter().map(move |&idx| self.point(idx))
    }

    pub fn waypoints(&self) -> impl Iterator<Item = &Point> + '_ {
        self.waypoints.iter().map(move |&idx| self.point(idx))
    }

    pub fn navaids(&self) -> impl Iterator<Item = &Point> + '_ {
        self.navaids.iter().map(move |&idx| self.point(idx))
    }

    pub fn runways(&self, icao: &str) -> &[Runway] {
        self.runways.get(icao).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn airways(&self) -> &[Airway] {
        &self.airways
    }

    pub fn warnings(&self) -> &[Error] {
        &self.warnings
    }
}
