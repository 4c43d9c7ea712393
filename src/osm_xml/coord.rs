use super::xml_parser::OsmXmlParserError;

/// Fractional decimal digits kept by the fixed-point coordinate encoding.
pub const COORD_FRACTION_DIGITS: u32 = 7;

const COORD_SCALE: i64 = 10_000_000;

/// Decodes decimal-degree text in the form `[-]DDD[.FFFFFFF...]` into a
/// fixed-point integer (degrees * 10^7). Fractional digits beyond the
/// seventh are truncated, never rounded; missing ones are zero-padded. The
/// unsigned integer part is capped at 180 for both axes.
pub fn parse_coord(text: &str) -> Result<i32, OsmXmlParserError> {
    let bytes = text.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let digits = if negative { &bytes[1..] } else { bytes };

    let mut value: i32 = 0;
    let mut fraction_digits: u32 = 0;
    let mut dots: u32 = 0;
    for &byte in digits {
        match byte {
            b'0'..=b'9' => {
                value = value * 10 + i32::from(byte - b'0');
                if dots == 0 && value > 180 {
                    return Err(OsmXmlParserError::CoordValueTooLarge {
                        text: text.to_string(),
                    });
                }
                if dots > 0 {
                    fraction_digits += 1;
                    if fraction_digits == COORD_FRACTION_DIGITS {
                        break;
                    }
                }
            }
            b'.' => dots += 1,
            _ => {
                return Err(OsmXmlParserError::CoordUnexpectedSymbol {
                    text: text.to_string(),
                })
            }
        }
    }

    if dots > 1 {
        return Err(OsmXmlParserError::CoordMultipleDots {
            text: text.to_string(),
        });
    }

    while fraction_digits < COORD_FRACTION_DIGITS {
        value *= 10;
        fraction_digits += 1;
    }

    Ok(if negative { -value } else { value })
}

/// Renders a fixed-point coordinate back to decimal-degree text with exactly
/// seven fractional digits. Inverse of [`parse_coord`] for text written with
/// the full fraction.
pub fn format_coord(value: i32) -> String {
    let abs = i64::from(value).abs();
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}.{:07}", abs / COORD_SCALE, abs % COORD_SCALE)
}
