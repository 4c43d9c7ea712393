//! In-memory OSM map data loading.
//!
//! Streams an OSM XML document from a file or standard input into a
//! queryable [`map_data::dataset::MapDataset`]: points, paths with derived
//! closure/winding/bounding boxes, relations, and the overall dataset
//! bounds. A renderer consumes the dataset through the read API only;
//! decoding stays behind [`osm_xml`].

pub mod map_data;
pub mod osm_xml;

#[cfg(test)]
mod test_utils;
