use std::collections::HashMap;

use super::{
    geometry::{GeoBBox, GeoPos},
    path::MapDataPath,
    point::MapDataPoint,
    relation::MapDataRelation,
    MapDataError,
};

/// In-memory store for one loaded map dump.
///
/// Records live in arenas with per-kind id maps; records under construction
/// are addressed by arena index so the containers may reallocate while a
/// load runs. A load populates the dataset in a single pass; afterwards it
/// is read-only and shared references are safe to hand out to any number of
/// readers. Callers must not run a new load or `clear` concurrently with
/// reads.
pub struct MapDataset {
    points: Vec<MapDataPoint>,
    points_map: HashMap<u64, usize>,
    paths: Vec<MapDataPath>,
    paths_map: HashMap<u64, usize>,
    relations: Vec<MapDataRelation>,
    relations_map: HashMap<u64, usize>,
    bounds: GeoBBox,
}

impl MapDataset {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            points_map: HashMap::new(),
            paths: Vec::new(),
            paths_map: HashMap::new(),
            relations: Vec::new(),
            relations_map: HashMap::new(),
            bounds: GeoBBox::empty(),
        }
    }

    pub(crate) fn insert_point(&mut self, point: MapDataPoint) {
        let idx = self.points.len();
        self.points_map.insert(point.id, idx);
        self.points.push(point);
    }

    pub(crate) fn insert_path(&mut self, path: MapDataPath) -> usize {
        let idx = self.paths.len();
        self.paths_map.insert(path.id, idx);
        self.paths.push(path);
        idx
    }

    pub(crate) fn insert_relation(&mut self, relation: MapDataRelation) -> usize {
        let idx = self.relations.len();
        self.relations_map.insert(relation.id, idx);
        self.relations.push(relation);
        idx
    }

    pub(crate) fn path(&self, idx: usize) -> &MapDataPath {
        &self.paths[idx]
    }

    pub(crate) fn path_mut(&mut self, idx: usize) -> &mut MapDataPath {
        &mut self.paths[idx]
    }

    pub(crate) fn relation_mut(&mut self, idx: usize) -> &mut MapDataRelation {
        &mut self.relations[idx]
    }

    /// Derives closure, bounds and winding for the path at `idx`. Runs once,
    /// at the path's closing markup event. A path without point references
    /// is left untouched.
    pub(crate) fn close_path(&mut self, idx: usize) -> Result<(), MapDataError> {
        let path = &mut self.paths[idx];
        if path.point_ids.is_empty() {
            return Ok(());
        }

        path.closed = path.point_ids.first() == path.point_ids.last();

        let mut area: i64 = 0;
        let mut prev_pos: Option<GeoPos> = None;
        for point_id in &path.point_ids {
            let point_idx =
                self.points_map
                    .get(point_id)
                    .ok_or(MapDataError::MissingPoint {
                        point_id: *point_id,
                        path_id: path.id,
                    })?;
            let pos = self.points[*point_idx].pos;
            if path.closed {
                if let Some(prev_pos) = prev_pos {
                    area += i64::from(prev_pos.lon) * i64::from(pos.lat)
                        - i64::from(pos.lon) * i64::from(prev_pos.lat);
                }
                prev_pos = Some(pos);
            }
            path.bounds.include(pos);
        }

        if path.closed {
            path.clockwise = area < 0;
        }

        Ok(())
    }

    pub fn point_by_id(&self, id: u64) -> Result<&MapDataPoint, MapDataError> {
        self.points_map
            .get(&id)
            .map(|idx| &self.points[*idx])
            .ok_or(MapDataError::PointNotFound { point_id: id })
    }

    pub fn path_by_id(&self, id: u64) -> Result<&MapDataPath, MapDataError> {
        self.paths_map
            .get(&id)
            .map(|idx| &self.paths[*idx])
            .ok_or(MapDataError::PathNotFound { path_id: id })
    }

    pub fn relation_by_id(&self, id: u64) -> Result<&MapDataRelation, MapDataError> {
        self.relations_map
            .get(&id)
            .map(|idx| &self.relations[*idx])
            .ok_or(MapDataError::RelationNotFound { relation_id: id })
    }

    /// Paths whose bounds intersect `bounds`. Linear scan; the dataset is
    /// loaded once and queried with coarse view boxes.
    pub fn paths_in_bounds(&self, bounds: &GeoBBox) -> Vec<&MapDataPath> {
        self.paths
            .iter()
            .filter(|path| path.bounds.intersects(bounds))
            .collect()
    }

    pub fn bounds(&self) -> GeoBBox {
        self.bounds
    }

    pub fn center(&self) -> GeoPos {
        self.bounds.center()
    }

    pub(crate) fn set_bounds(&mut self, bounds: GeoBBox) {
        self.bounds = bounds;
    }

    pub(crate) fn reset_bounds(&mut self) {
        self.bounds = GeoBBox::empty();
    }

    pub(crate) fn derive_bounds_from_points(&mut self) {
        for point in &self.points {
            self.bounds.include(point.pos);
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// Discards all records. The overall bounding box is left as is; a load
    /// always resets it before parsing.
    pub fn clear(&mut self) {
        self.points.clear();
        self.points_map.clear();
        self.paths.clear();
        self.paths_map.clear();
        self.relations.clear();
        self.relations_map.clear();
    }
}

impl Default for MapDataset {
    fn default() -> Self {
        Self::new()
    }
}
