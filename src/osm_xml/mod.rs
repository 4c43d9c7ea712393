use std::{io, path::PathBuf};

use xml_parser::OsmXmlParserError;

pub mod coord;
pub mod data_reader;
pub mod xml_parser;
pub mod xml_reader;

#[derive(Debug, thiserror::Error)]
pub enum OsmXmlReaderError {
    #[error("OSM XML parser error at line {line} column {column}: {error}")]
    Parser {
        error: OsmXmlParserError,
        line: u64,
        column: u64,
    },

    #[error("Cannot open input file: {error}")]
    FileOpen { error: io::Error },

    #[error("Input read error: {error}")]
    Read { error: io::Error },
}

#[derive(Debug, PartialEq, Clone)]
pub enum DataSource {
    File { file: PathBuf },
    Stdin,
}

impl DataSource {
    /// Maps a path argument to a source; `-` selects standard input.
    pub fn from_path(path: &str) -> Self {
        if path == "-" {
            DataSource::Stdin
        } else {
            DataSource::File {
                file: PathBuf::from(path),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::DataSource;

    #[test]
    fn dash_token_selects_stdin() {
        assert_eq!(DataSource::from_path("-"), DataSource::Stdin);
        assert_eq!(DataSource::from_path("riga.osm"), DataSource::File {
            file: PathBuf::from("riga.osm")
        });
    }
}
