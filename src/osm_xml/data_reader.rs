use std::{
    fs::File,
    io::{self, BufReader},
    time::Instant,
};

use tracing::trace;

use crate::map_data::dataset::MapDataset;

use super::{xml_reader::XmlReader, DataSource, OsmXmlReaderError};

/// Runs one complete load from a data source into a fresh dataset.
pub struct OsmDataReader {
    source: DataSource,
    map_data: MapDataset,
}

impl OsmDataReader {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            map_data: MapDataset::new(),
        }
    }

    pub fn read_data(mut self) -> Result<MapDataset, OsmXmlReaderError> {
        let read_start = Instant::now();
        match self.source {
            DataSource::File { ref file } => {
                let f = File::open(file).map_err(|error| OsmXmlReaderError::FileOpen { error })?;
                XmlReader::new(&mut self.map_data).read(BufReader::new(f))?;
            }
            DataSource::Stdin => {
                let stdin = io::stdin();
                XmlReader::new(&mut self.map_data).read(stdin.lock())?;
            }
        }

        let read_duration = read_start.elapsed();
        trace!(
            read_duration_secs = read_duration.as_secs(),
            "Data read done"
        );

        Ok(self.map_data)
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::OsmDataReader;
    use crate::osm_xml::{DataSource, OsmXmlReaderError};
    use crate::test_utils::get_test_data_osm_xml;

    #[test]
    fn reads_from_file() {
        let path = std::env::temp_dir().join("osm_atlas_data_reader_test.osm");
        fs::write(&path, get_test_data_osm_xml().join("\n")).unwrap();

        let reader = OsmDataReader::new(DataSource::File { file: path.clone() });
        let map_data = reader.read_data().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(map_data.point_count(), 7);
        assert_eq!(map_data.path_count(), 2);
        assert_eq!(map_data.relation_count(), 1);
    }

    #[test]
    fn open_failure_for_missing_file() {
        let reader = OsmDataReader::new(DataSource::File {
            file: std::env::temp_dir().join("osm_atlas_no_such_file.osm"),
        });
        match reader.read_data() {
            Err(OsmXmlReaderError::FileOpen { .. }) => {}
            other => panic!("expected open failure, got {:?}", other.map(|_| ())),
        }
    }
}
