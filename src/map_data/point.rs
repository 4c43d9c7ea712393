use std::fmt::Display;

use super::geometry::GeoPos;

#[derive(Clone, Debug, PartialEq)]
pub struct MapDataPoint {
    pub id: u64,
    pub pos: GeoPos,
}

impl Display for MapDataPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Point({}: {}, {})", self.id, self.pos.lat, self.pos.lon)
    }
}
