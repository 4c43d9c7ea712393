use std::fmt::Display;

use super::{geometry::GeoBBox, tags::TagSet};

/// Ordered sequence of point references describing a line or, when closed,
/// a polygon boundary. `bounds`, `closed` and `clockwise` are derived when
/// the path's closing markup event is processed; `clockwise` is only
/// meaningful for a closed path.
#[derive(Clone, Debug, PartialEq)]
pub struct MapDataPath {
    pub id: u64,
    pub point_ids: Vec<u64>,
    pub tags: TagSet,
    pub bounds: GeoBBox,
    pub closed: bool,
    pub clockwise: bool,
}

impl MapDataPath {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            point_ids: Vec::new(),
            tags: TagSet::new(),
            bounds: GeoBBox::empty(),
            closed: false,
            clockwise: false,
        }
    }
}

impl Display for MapDataPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Path({}: {} points)", self.id, self.point_ids.len())
    }
}
