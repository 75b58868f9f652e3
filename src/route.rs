use crate::error::Error;
use crate::navdata::{Airway, NavDatabase};
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;

/// One line of `wpNavRTE.txt`.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRecord {
    pub airway: String,
    pub sequence: usize,
    pub code: String,
    pub lat: String,
    pub lon: String,
}

impl fmt::Display for RouteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sequence = format!("{:03}", self.sequence);
        let fields = [
            self.airway.as_str(),
            sequence.as_str(),
            self.code.as_str(),
            self.lat.as_str(),
            self.lon.as_str(),
        ];
        write!(f, "{}", fields.iter().join(" "))
    }
}

#[derive(Debug, Default)]
pub struct RouteTable {
    pub records: Vec<RouteRecord>,
    pub warnings: Vec<Error>,
}

impl fmt::Display for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.records {
            writeln!(f, "{}", r)?;
        }
        Ok(())
    }
}

/// Orders the points of every airway along its edges.
///
/// Points that never appear as an edge target seed a stack; each popped point is numbered and
/// releases the successors whose last incoming edge it was. Points on a cycle are never
/// released and so are missing from the listing.
pub fn reconstruct_routes(db: &NavDatabase) -> RouteTable {
    let mut table = RouteTable::default();
    for airway in db.airways() {
        order_airway(db, airway, &mut table);
    }
    log::info!(
        "Rebuilt {} airways into {} route points",
        db.airways().len(),
        table.records.len()
    );
    table
}

fn order_airway(db: &NavDatabase, airway: &Airway, table: &mut RouteTable) {
    let mut in_degrees: HashMap<&str, usize> = HashMap::new();
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();

    // First-seen order of the points with the coordinates of the last edge naming them.
    let mut order: Vec<&str> = Vec::new();
    let mut coords: HashMap<&str, (&str, &str)> = HashMap::new();

    for edge in &airway.edges {
        let ends = [
            (edge.start_id.as_str(), edge.start_lat.as_str(), edge.start_lon.as_str()),
            (edge.end_id.as_str(), edge.end_lat.as_str(), edge.end_lon.as_str()),
        ];
        for &(id, lat, lon) in ends.iter() {
            if coords.insert(id, (lat, lon)).is_none() {
                order.push(id);
            }
        }

        *in_degrees.entry(edge.end_id.as_str()).or_insert(0) += 1;
        successors
            .entry(edge.start_id.as_str())
            .or_default()
            .push(edge.end_id.as_str());
    }

    let mut stack: Vec<&str> = order
        .iter()
        .copied()
        .filter(|id| !in_degrees.contains_key(id))
        .collect();

    let mut sequence = 1;
    while let Some(id) = stack.pop() {
        match db.point_by_id(id) {
            Some(point) => {
                let (lat, lon) = coords[id];
                table.records.push(RouteRecord {
                    airway: airway.code.clone(),
                    sequence,
                    code: point.code.clone(),
                    lat: lat.to_string(),
                    lon: lon.to_string(),
                });
                sequence += 1;
            }
            None => {
                let warning = Error::UnknownPoint {
                    airway: airway.code.clone(),
                    id: id.to_string(),
                };
                log::warn!("{}", warning);
                table.warnings.push(warning);
            }
        }

        for &next in successors.get(id).into_iter().flatten() {
            if let Some(degree) = in_degrees.get_mut(next) {
                *degree -= 1;
                if *degree == 0 {
                    stack.push(next);
                }
            }
        }
    }

    let emitted = in_degrees.values().filter(|&&d| d == 0).count();
    if emitted < in_degrees.len() {
        log::debug!(
            "Airway {} is cyclic, {} points left out",
            airway.code,
            in_degrees.len() - emitted
        );
    }
}
