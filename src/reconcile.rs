use crate::navdata::NavDatabase;

/// Copies airway endpoint coordinates onto the points they reference.
///
/// Edges are visited airway by airway in file order, so the last edge mentioning a point wins.
/// Returns how many coordinate values were changed.
pub fn apply_airway_coords(db: &mut NavDatabase) -> usize {
    let NavDatabase {
        points,
        by_id,
        airways,
        ..
    } = db;

    let mut changed = 0;
    let mut set = |value: &mut String, new: &str| {
        if value.as_str() != new {
            *value = new.to_string();
            changed += 1;
        }
    };

    for edge in airways.iter().flat_map(|a| a.edges.iter()) {
        let ends = [
            (&edge.start_id, &edge.start_lat, &edge.start_lon),
            (&edge.end_id, &edge.end_lat, &edge.end_lon),
        ];
        for &(id, lat, lon) in ends.iter() {
            if let Some(&idx) = by_id.get(id) {
                let point = &mut points[idx.0];
                set(&mut point.lat, lat);
                set(&mut point.lon, lon);
            }
        }
    }

    log::info!("Applied {} airway coordinate corrections", changed);
    changed
}
