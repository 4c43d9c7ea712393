use std::num::ParseIntError;
use std::str::Utf8Error;

use crate::map_data::{
    dataset::MapDataset,
    geometry::{GeoBBox, GeoPos},
    path::MapDataPath,
    point::MapDataPoint,
    relation::{MapDataMember, MapDataMemberType, MapDataRelation},
    tags::TagSet,
    MapDataError,
};

use super::coord::parse_coord;

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum OsmXmlParserError {
    #[error("Bad coordinate '{text}': value too large")]
    CoordValueTooLarge { text: String },

    #[error("Bad coordinate '{text}': unexpected symbol")]
    CoordUnexpectedSymbol { text: String },

    #[error("Bad coordinate '{text}': multiple dots")]
    CoordMultipleDots { text: String },

    #[error("Failed to parse ID: {error}")]
    FailedToParseId { error: ParseIntError },

    #[error("Bad bounding box '{value}'")]
    BadBoundsBox { value: String },

    #[error("Bounds element produced an empty bounding box")]
    EmptyBounds,

    #[error("Unexpected element '{name}' in node")]
    UnexpectedElementInNode { name: String },

    #[error("Unexpected element '{name}' in way")]
    UnexpectedElementInWay { name: String },

    #[error("Unexpected element '{name}' in relation")]
    UnexpectedElementInRelation { name: String },

    #[error("Unexpected element '{name}' at depth {depth}")]
    UnexpectedNesting { name: String, depth: u32 },

    #[error("No ref attribute on nd element in way {path_id}")]
    MissingNodeRef { path_id: u64 },

    #[error("Unknown member type '{member_type}'")]
    UnknownMemberType { member_type: String },

    #[error("Member without a type attribute")]
    MissingMemberType,

    #[error("Unexpected attribute '{name}' in relation member")]
    UnexpectedMemberAttribute { name: String },

    #[error("Malformed XML: {message}")]
    MalformedXml { message: String },

    #[error("Failed to parse UTF-8: {error}")]
    Utf8ParseError { error: Utf8Error },

    #[error("Map data error: {error}")]
    MapData { error: MapDataError },
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum RecordKind {
    None,
    Point,
    Path(usize),
    Relation(usize),
}

/// Streaming element classifier.
///
/// Consumes the strictly ordered open/close element events of one forward
/// pass over an OSM XML document and populates the dataset. The only state
/// is the nesting depth and the kind of the record under construction;
/// under-construction paths and relations are addressed by arena index.
/// Events must be balanced, which the XML layer guarantees for well-formed
/// input.
pub struct OsmXmlParser<'a> {
    map_data: &'a mut MapDataset,
    depth: u32,
    kind: RecordKind,
}

impl<'a> OsmXmlParser<'a> {
    pub fn new(map_data: &'a mut MapDataset) -> Self {
        Self {
            map_data,
            depth: 0,
            kind: RecordKind::None,
        }
    }

    pub fn open_element(
        &mut self,
        name: &str,
        attrs: &[(String, String)],
    ) -> Result<(), OsmXmlParserError> {
        match self.kind {
            RecordKind::None if self.depth == 1 => self.open_record(name, attrs)?,
            RecordKind::Point if self.depth == 2 => {
                if name != "tag" {
                    return Err(OsmXmlParserError::UnexpectedElementInNode {
                        name: name.to_string(),
                    });
                }
                // node tags are accepted but their payload is not retained
            }
            RecordKind::Path(path_idx) if self.depth == 2 => {
                self.open_in_path(path_idx, name, attrs)?
            }
            RecordKind::Relation(relation_idx) if self.depth == 2 => {
                self.open_in_relation(relation_idx, name, attrs)?
            }
            _ if self.depth >= 2 => {
                return Err(OsmXmlParserError::UnexpectedNesting {
                    name: name.to_string(),
                    depth: self.depth,
                });
            }
            // document root; nothing to classify
            _ => {}
        }
        self.depth += 1;
        Ok(())
    }

    pub fn close_element(&mut self) -> Result<(), OsmXmlParserError> {
        if self.depth == 2 {
            if let RecordKind::Path(path_idx) = self.kind {
                self.map_data
                    .close_path(path_idx)
                    .map_err(|error| OsmXmlParserError::MapData { error })?;
            }
            self.kind = RecordKind::None;
        }
        self.depth -= 1;
        Ok(())
    }

    fn open_record(
        &mut self,
        name: &str,
        attrs: &[(String, String)],
    ) -> Result<(), OsmXmlParserError> {
        match name {
            "node" => {
                let mut id = 0;
                let mut lat = 0;
                let mut lon = 0;
                for (attr_name, value) in attrs {
                    match attr_name.as_str() {
                        "id" => id = parse_id(value)?,
                        "lat" => lat = parse_coord(value)?,
                        "lon" => lon = parse_coord(value)?,
                        _ => {}
                    }
                }
                self.map_data.insert_point(MapDataPoint {
                    id,
                    pos: GeoPos { lon, lat },
                });
                self.kind = RecordKind::Point;
            }
            "way" => {
                let idx = self
                    .map_data
                    .insert_path(MapDataPath::new(parse_record_id(attrs)?));
                self.kind = RecordKind::Path(idx);
            }
            "relation" => {
                let idx = self
                    .map_data
                    .insert_relation(MapDataRelation::new(parse_record_id(attrs)?));
                self.kind = RecordKind::Relation(idx);
            }
            "bounds" => {
                let bounds = parse_bounds(attrs)?;
                self.map_data.set_bounds(bounds);
            }
            "bound" => {
                let bounds = parse_bound(attrs)?;
                self.map_data.set_bounds(bounds);
            }
            // unknown top level markup is tolerated
            _ => {}
        }
        Ok(())
    }

    fn open_in_path(
        &mut self,
        path_idx: usize,
        name: &str,
        attrs: &[(String, String)],
    ) -> Result<(), OsmXmlParserError> {
        match name {
            "tag" => {
                parse_tag(&mut self.map_data.path_mut(path_idx).tags, attrs);
            }
            "nd" => {
                let ref_value = attrs
                    .iter()
                    .find(|(attr_name, _)| attr_name.as_str() == "ref")
                    .map(|(_, value)| value.as_str());
                match ref_value {
                    Some(value) => {
                        let point_id = parse_id(value)?;
                        self.map_data.path_mut(path_idx).point_ids.push(point_id);
                    }
                    None => {
                        return Err(OsmXmlParserError::MissingNodeRef {
                            path_id: self.map_data.path(path_idx).id,
                        })
                    }
                }
            }
            _ => {
                return Err(OsmXmlParserError::UnexpectedElementInWay {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }

    fn open_in_relation(
        &mut self,
        relation_idx: usize,
        name: &str,
        attrs: &[(String, String)],
    ) -> Result<(), OsmXmlParserError> {
        match name {
            "tag" => {
                // relation tags are accepted but their payload is not retained
            }
            "member" => {
                let mut member_type = None;
                let mut member_ref = 0;
                let mut role = String::new();
                for (attr_name, value) in attrs {
                    match attr_name.as_str() {
                        "type" => {
                            member_type = Some(match value.as_str() {
                                "node" => MapDataMemberType::Point,
                                "way" => MapDataMemberType::Path,
                                "relation" => MapDataMemberType::Relation,
                                _ => {
                                    return Err(OsmXmlParserError::UnknownMemberType {
                                        member_type: value.clone(),
                                    })
                                }
                            })
                        }
                        "ref" => member_ref = parse_id(value)?,
                        "role" => role = value.clone(),
                        _ => {
                            return Err(OsmXmlParserError::UnexpectedMemberAttribute {
                                name: attr_name.clone(),
                            })
                        }
                    }
                }
                let member_type = member_type.ok_or(OsmXmlParserError::MissingMemberType)?;
                self.map_data
                    .relation_mut(relation_idx)
                    .members
                    .push(MapDataMember {
                        member_type,
                        member_ref,
                        role,
                    });
            }
            _ => {
                return Err(OsmXmlParserError::UnexpectedElementInRelation {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }
}

fn parse_id(value: &str) -> Result<u64, OsmXmlParserError> {
    value
        .parse()
        .map_err(|error| OsmXmlParserError::FailedToParseId { error })
}

fn parse_record_id(attrs: &[(String, String)]) -> Result<u64, OsmXmlParserError> {
    match attrs
        .iter()
        .find(|(attr_name, _)| attr_name.as_str() == "id")
    {
        Some((_, value)) => parse_id(value),
        None => Ok(0),
    }
}

/// Copies the k/v attribute pair of a tag element into `tags`. Unknown
/// attribute names are skipped; repeated keys are all retained.
fn parse_tag(tags: &mut TagSet, attrs: &[(String, String)]) {
    let mut key = None;
    let mut value = None;
    for (attr_name, attr_value) in attrs {
        match attr_name.as_str() {
            "k" => key = Some(attr_value.as_str()),
            "v" => value = Some(attr_value.as_str()),
            _ => {}
        }
    }
    tags.insert(
        key.unwrap_or("").to_string(),
        value.unwrap_or("").to_string(),
    );
}

/// Dataset bounds from the four named attributes of a bounds element.
/// Ending up with an empty box means no recognized attribute was present.
fn parse_bounds(attrs: &[(String, String)]) -> Result<GeoBBox, OsmXmlParserError> {
    let mut bounds = GeoBBox::empty();
    for (attr_name, value) in attrs {
        match attr_name.as_str() {
            "minlat" => bounds.bottom = parse_coord(value)?,
            "maxlat" => bounds.top = parse_coord(value)?,
            "minlon" => bounds.left = parse_coord(value)?,
            "maxlon" => bounds.right = parse_coord(value)?,
            _ => {}
        }
    }
    if bounds.is_empty() {
        return Err(OsmXmlParserError::EmptyBounds);
    }
    Ok(bounds)
}

/// Dataset bounds from the single box attribute of a bound element, four
/// comma-separated coordinates in minlat,minlon,maxlat,maxlon order.
fn parse_bound(attrs: &[(String, String)]) -> Result<GeoBBox, OsmXmlParserError> {
    let mut bounds = GeoBBox::empty();
    for (attr_name, value) in attrs {
        if attr_name.as_str() == "box" {
            let mut parts = value.splitn(4, ',');
            let (Some(minlat), Some(minlon), Some(maxlat), Some(maxlon)) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                return Err(OsmXmlParserError::BadBoundsBox {
                    value: value.clone(),
                });
            };
            bounds.bottom = parse_coord(minlat)?;
            bounds.left = parse_coord(minlon)?;
            bounds.top = parse_coord(maxlat)?;
            bounds.right = parse_coord(maxlon)?;
        }
    }
    Ok(bounds)
}
