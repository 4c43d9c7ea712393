pub mod dataset;
pub mod geometry;
pub mod path;
pub mod point;
pub mod relation;
pub mod tags;

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum MapDataError {
    #[error("Point {point_id} referenced by path {path_id} is not in the dataset")]
    MissingPoint { point_id: u64, path_id: u64 },

    #[error("Point with ID {point_id} not found")]
    PointNotFound { point_id: u64 },

    #[error("Path with ID {path_id} not found")]
    PathNotFound { path_id: u64 },

    #[error("Relation with ID {relation_id} not found")]
    RelationNotFound { relation_id: u64 },
}
