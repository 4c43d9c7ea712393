use std::fmt::Display;

/// Position in fixed-point decimal degrees (degrees * 10^7).
/// Longitude is the x axis, latitude the y axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeoPos {
    pub lon: i32,
    pub lat: i32,
}

impl Display for GeoPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GeoPos({}, {})", self.lat, self.lon)
    }
}

/// Axis-aligned box in the same fixed-point coordinate space.
///
/// The empty box is represented with inverted extents so that including the
/// first position collapses it to that position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeoBBox {
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
    pub top: i32,
}

impl GeoBBox {
    pub fn new(left: i32, bottom: i32, right: i32, top: i32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    pub fn empty() -> Self {
        Self {
            left: i32::MAX,
            bottom: i32::MAX,
            right: i32::MIN,
            top: i32::MIN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.bottom > self.top
    }

    pub fn include(&mut self, pos: GeoPos) {
        self.left = self.left.min(pos.lon);
        self.right = self.right.max(pos.lon);
        self.bottom = self.bottom.min(pos.lat);
        self.top = self.top.max(pos.lat);
    }

    pub fn intersects(&self, other: &GeoBBox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        other.left <= self.right
            && other.right >= self.left
            && other.bottom <= self.top
            && other.top >= self.bottom
    }

    /// Midpoint of the box. Meaningless for an empty box.
    pub fn center(&self) -> GeoPos {
        GeoPos {
            lon: ((i64::from(self.left) + i64::from(self.right)) / 2) as i32,
            lat: ((i64::from(self.bottom) + i64::from(self.top)) / 2) as i32,
        }
    }
}
