use std::io::{self, BufRead, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::map_data::dataset::MapDataset;

use super::{
    xml_parser::{OsmXmlParser, OsmXmlParserError},
    OsmXmlReaderError,
};

/// BufRead adapter counting the line and byte column of the consumed input,
/// so decode failures can be reported with the position a text editor shows.
struct PositionedReader<R> {
    inner: R,
    line: u64,
    column: u64,
}

impl<R: BufRead> PositionedReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            line: 1,
            column: 0,
        }
    }
}

impl<R: BufRead> Read for PositionedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let len = available.len().min(buf.len());
        buf[..len].copy_from_slice(&available[..len]);
        self.consume(len);
        Ok(len)
    }
}

impl<R: BufRead> BufRead for PositionedReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        if let Ok(buffered) = self.inner.fill_buf() {
            for &byte in &buffered[..amt.min(buffered.len())] {
                if byte == b'\n' {
                    self.line += 1;
                    self.column = 0;
                } else {
                    self.column += 1;
                }
            }
        }
        self.inner.consume(amt);
    }
}

/// One complete streaming pass over an OSM XML document, feeding element
/// events into the classifier.
pub struct XmlReader<'a> {
    map_data: &'a mut MapDataset,
}

impl<'a> XmlReader<'a> {
    pub fn new(map_data: &'a mut MapDataset) -> Self {
        Self { map_data }
    }

    pub fn read(self, source: impl BufRead) -> Result<(), OsmXmlReaderError> {
        self.map_data.reset_bounds();

        let mut reader = Reader::from_reader(PositionedReader::new(source));
        let mut parser = OsmXmlParser::new(self.map_data);
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Err(quick_xml::Error::Io(error)) => {
                    return Err(OsmXmlReaderError::Read {
                        error: io::Error::new(error.kind(), error.to_string()),
                    })
                }
                Err(error) => {
                    return Err(position_error(
                        OsmXmlParserError::MalformedXml {
                            message: error.to_string(),
                        },
                        &reader,
                    ))
                }
                Ok(Event::Eof) => break,
                Ok(Event::Start(element)) => {
                    let (name, attrs) =
                        decode_element(&element).map_err(|error| position_error(error, &reader))?;
                    parser
                        .open_element(&name, &attrs)
                        .map_err(|error| position_error(error, &reader))?;
                }
                Ok(Event::Empty(element)) => {
                    let (name, attrs) =
                        decode_element(&element).map_err(|error| position_error(error, &reader))?;
                    parser
                        .open_element(&name, &attrs)
                        .map_err(|error| position_error(error, &reader))?;
                    parser
                        .close_element()
                        .map_err(|error| position_error(error, &reader))?;
                }
                Ok(Event::End(_)) => {
                    parser
                        .close_element()
                        .map_err(|error| position_error(error, &reader))?;
                }
                // declarations, text, comments and processing instructions
                Ok(_) => {}
            }
            buf.clear();
        }

        if self.map_data.bounds().is_empty() {
            self.map_data.derive_bounds_from_points();
        }

        Ok(())
    }
}

fn position_error<R>(
    error: OsmXmlParserError,
    reader: &Reader<PositionedReader<R>>,
) -> OsmXmlReaderError {
    OsmXmlReaderError::Parser {
        error,
        line: reader.get_ref().line,
        column: reader.get_ref().column,
    }
}

fn decode_element(element: &BytesStart) -> Result<(String, Vec<(String, String)>), OsmXmlParserError> {
    let name = std::str::from_utf8(element.name().as_ref())
        .map_err(|error| OsmXmlParserError::Utf8ParseError { error })?
        .to_string();
    let mut attrs = Vec::new();
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|error| OsmXmlParserError::MalformedXml {
            message: error.to_string(),
        })?;
        let attr_name = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|error| OsmXmlParserError::Utf8ParseError { error })?
            .to_string();
        let value = attribute
            .unescape_value()
            .map_err(|error| OsmXmlParserError::MalformedXml {
                message: error.to_string(),
            })?
            .into_owned();
        attrs.push((attr_name, value));
    }
    Ok((name, attrs))
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::XmlReader;
    use crate::map_data::{
        dataset::MapDataset,
        geometry::{GeoBBox, GeoPos},
        relation::{MapDataMember, MapDataMemberType},
    };
    use crate::osm_xml::{xml_parser::OsmXmlParserError, OsmXmlReaderError};
    use crate::test_utils::get_test_data_osm_xml;

    fn read_into(map_data: &mut MapDataset, xml: &str) -> Result<(), OsmXmlReaderError> {
        XmlReader::new(map_data).read(Cursor::new(xml))
    }

    #[test]
    fn reads_full_document() {
        let mut map_data = MapDataset::new();
        read_into(&mut map_data, &get_test_data_osm_xml().join("\n")).unwrap();

        assert_eq!(map_data.point_count(), 7);
        assert_eq!(map_data.path_count(), 2);
        assert_eq!(map_data.relation_count(), 1);

        let point = map_data.point_by_id(18483373).unwrap();
        assert_eq!(point.pos, GeoPos {
            lon: 250_419_124,
            lat: 571_995_635
        });

        let street = map_data.path_by_id(80944232).unwrap();
        assert_eq!(street.point_ids, vec![18483373, 18483475, 18483521]);
        assert!(!street.closed);
        assert_eq!(street.tags.get("highway"), Some("living_street"));
        assert_eq!(street.tags.get("name"), Some("Alūksnes iela"));
        assert_eq!(
            street.bounds,
            GeoBBox::new(248_561_211, 571_455_443, 250_419_124, 571_995_635)
        );

        let square = map_data.path_by_id(200).unwrap();
        assert!(square.closed);
        assert!(!square.clockwise);
        assert_eq!(
            square.bounds,
            GeoBBox::new(249_000_000, 571_000_000, 249_100_000, 571_100_000)
        );

        let relation = map_data.relation_by_id(14385700).unwrap();
        assert_eq!(relation.members, vec![
            MapDataMember {
                member_type: MapDataMemberType::Path,
                member_ref: 80944232,
                role: String::from("from")
            },
            MapDataMember {
                member_type: MapDataMemberType::Point,
                member_ref: 18483475,
                role: String::from("via")
            },
            MapDataMember {
                member_type: MapDataMemberType::Path,
                member_ref: 80944232,
                role: String::from("to")
            }
        ]);
    }

    #[test]
    fn derives_bounds_from_points_when_absent() {
        let mut map_data = MapDataset::new();
        read_into(&mut map_data, &get_test_data_osm_xml().join("\n")).unwrap();

        assert_eq!(
            map_data.bounds(),
            GeoBBox::new(248_561_211, 571_000_000, 250_419_124, 571_995_635)
        );
        assert_eq!(map_data.center(), GeoPos {
            lon: 249_490_167,
            lat: 571_497_817
        });
    }

    #[test]
    fn takes_bounds_from_bounds_element() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6">
  <bounds minlat="57.1400000" minlon="24.8500000" maxlat="57.2000000" maxlon="25.0500000"/>
  <node id="1" lat="57.1500000" lon="24.9000000"/>
</osm>"#;
        let mut map_data = MapDataset::new();
        read_into(&mut map_data, xml).unwrap();

        assert_eq!(
            map_data.bounds(),
            GeoBBox::new(248_500_000, 571_400_000, 250_500_000, 572_000_000)
        );
    }

    #[test]
    fn takes_bounds_from_bound_element() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6">
  <bound box="57.14,24.85,57.2,25.05" origin="osmosis"/>
</osm>"#;
        let mut map_data = MapDataset::new();
        read_into(&mut map_data, xml).unwrap();

        assert_eq!(
            map_data.bounds(),
            GeoBBox::new(248_500_000, 571_400_000, 250_500_000, 572_000_000)
        );
    }

    #[test]
    fn reports_position_of_malformed_bound_box() {
        let xml = "<?xml version=\"1.0\"?>\n<osm>\n  <bound box=\"57.14,24.85\"/>\n</osm>\n";
        let mut map_data = MapDataset::new();

        match read_into(&mut map_data, xml) {
            Err(OsmXmlReaderError::Parser {
                error: OsmXmlParserError::BadBoundsBox { value },
                line,
                column,
            }) => {
                assert_eq!(value, "57.14,24.85");
                assert_eq!(line, 3);
                assert!(column > 0);
            }
            other => panic!("expected positioned parser error, got {:?}", other),
        }
    }

    #[test]
    fn reports_malformed_xml() {
        let xml = "<osm>\n</notosm>\n";
        let mut map_data = MapDataset::new();

        match read_into(&mut map_data, xml) {
            Err(OsmXmlReaderError::Parser {
                error: OsmXmlParserError::MalformedXml { .. },
                ..
            }) => {}
            other => panic!("expected malformed XML error, got {:?}", other),
        }
    }

    #[test]
    fn failed_load_requires_a_fresh_load() {
        let bad_xml = "<osm>\n  <node id=\"1\" lat=\"999.0\" lon=\"1.0\"/>\n</osm>\n";
        let mut map_data = MapDataset::new();
        match read_into(&mut map_data, bad_xml) {
            Err(OsmXmlReaderError::Parser {
                error: OsmXmlParserError::CoordValueTooLarge { .. },
                line,
                ..
            }) => assert_eq!(line, 2),
            other => panic!("expected coordinate error, got {:?}", other),
        }

        // the aborted pass leaves the dataset unspecified; a fresh dataset
        // and a full reload make it usable again
        let mut map_data = MapDataset::new();
        read_into(&mut map_data, &get_test_data_osm_xml().join("\n")).unwrap();
        assert_eq!(map_data.point_count(), 7);
    }
}
