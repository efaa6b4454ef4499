//! Parser for XML guide documents.
//!
//! ```xml
//! <guides order="radial" origin="0,0,0" flipped="false">
//!   <line from="0,0,0" to="1,0,0"/>
//!   <polyline>
//!     <point>1,0,0</point>
//!     <point>1,1,0</point>
//!     <point>0,1,0</point>
//!   </polyline>
//! </guides>
//! ```
//!
//! Lines and polylines are added to the path in document order.

use quick_xml::de::from_str;
use serde::Deserialize;
use thiserror::Error;

use crate::dla::{GuideError, GuidePath, RadialDistanceOrder};
use crate::geom::Point3;

/// Result type for guide document parsing.
pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The XML document could not be deserialized.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),
    /// The root element is not `<guides>`.
    #[error("unknown guide document: expected a <guides> root element")]
    UnknownRoot,
    /// A coordinate triple could not be read.
    #[error("invalid point `{0}`, expected `x,y,z`")]
    Point(String),
    /// The `order` attribute names no known ordering.
    #[error("unknown segment order `{0}`")]
    Order(String),
    /// The guides themselves were rejected.
    #[error("invalid guide: {0}")]
    Guide(#[from] GuideError),
}

/// Reads a guide document and builds the corresponding [`GuidePath`].
pub fn parse_str(input: &str) -> ParseResult<GuidePath> {
    let trimmed = strip_xml_preamble(input);
    if !has_guides_root(trimmed) {
        return Err(ParseError::UnknownRoot);
    }

    log::debug!("start parsing guide document");
    let document: GuideDocument = from_str(trimmed)?;
    log::debug!("found {} guide elements", document.items.len());

    let mut path = build_path(&document)?;
    for item in &document.items {
        match item {
            GuideItem::Line(line) => {
                path.add_line(parse_point(&line.from)?, parse_point(&line.to)?)?;
            }
            GuideItem::Polyline(polyline) => {
                let points = polyline
                    .points
                    .iter()
                    .map(|raw| parse_point(raw))
                    .collect::<ParseResult<Vec<_>>>()?;
                path.add_polyline(&points)?;
            }
        }
    }

    Ok(path)
}

fn build_path(document: &GuideDocument) -> ParseResult<GuidePath> {
    let name = document
        .order
        .as_deref()
        .map_or_else(|| "pipeline".to_owned(), |raw| raw.trim().to_lowercase());

    match name.as_str() {
        "pipeline" => Ok(GuidePath::new()),
        "radial" => {
            let origin = match document.origin.as_deref() {
                Some(raw) => parse_point(raw)?,
                None => Point3::ORIGIN,
            };
            let flipped = document.flipped.unwrap_or(false);
            Ok(GuidePath::with_order(RadialDistanceOrder::new(origin, flipped)))
        }
        _ => Err(ParseError::Order(name)),
    }
}

/// The element name must end right after `guides`.
fn has_guides_root(text: &str) -> bool {
    text.strip_prefix("<guides").is_some_and(|rest| {
        rest.starts_with(|c: char| c == '>' || c == '/' || c.is_whitespace())
    })
}

/// Skips a BOM, the XML declaration and any leading comments.
fn strip_xml_preamble(input: &str) -> &str {
    let mut rest = input.trim_start_matches(|c: char| c == '\u{feff}' || c.is_whitespace());
    loop {
        let skipped = if let Some(decl) = rest.strip_prefix("<?") {
            decl.find("?>").map(|idx| &decl[idx + 2..])
        } else if let Some(comment) = rest.strip_prefix("<!--") {
            comment.find("-->").map(|idx| &comment[idx + 3..])
        } else {
            None
        };
        match skipped {
            Some(next) => rest = next.trim_start(),
            None => return rest,
        }
    }
}

fn parse_point(text: &str) -> ParseResult<Point3> {
    let invalid = || ParseError::Point(text.trim().to_owned());
    let parts: Vec<f64> = text
        .trim()
        .trim_matches(|c| c == '{' || c == '}')
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| invalid())?;

    match parts.as_slice() {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(invalid()),
    }
}

#[derive(Debug, Deserialize)]
struct GuideDocument {
    #[serde(default, rename = "@order")]
    order: Option<String>,
    #[serde(default, rename = "@origin")]
    origin: Option<String>,
    #[serde(default, rename = "@flipped")]
    flipped: Option<bool>,
    #[serde(default, rename = "$value")]
    items: Vec<GuideItem>,
}

#[derive(Debug, Deserialize)]
enum GuideItem {
    #[serde(rename = "line")]
    Line(LineElement),
    #[serde(rename = "polyline")]
    Polyline(PolylineElement),
}

#[derive(Debug, Deserialize)]
struct LineElement {
    #[serde(rename = "@from")]
    from: String,
    #[serde(rename = "@to")]
    to: String,
}

#[derive(Debug, Deserialize)]
struct PolylineElement {
    #[serde(default, rename = "point")]
    points: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{ParseError, parse_point, parse_str};
    use crate::dla::GuideError;
    use crate::geom::Point3;

    #[test]
    fn parses_lines_and_polylines_in_document_order() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
            <guides>
              <line from="5,0,0" to="6,0,0"/>
              <polyline>
                <point>0,0,0</point>
                <point>1,0,0</point>
                <point>1,1,0</point>
              </polyline>
              <line from="-1,0,0" to="-2,0,0"/>
            </guides>"#;

        let path = parse_str(xml).expect("guide document parsed");
        assert_eq!(path.len(), 4);
        assert_eq!(path.order_name(), "pipeline");

        let starts: Vec<Point3> = path.segments().iter().map(|s| s.start()).collect();
        assert_eq!(
            starts,
            vec![
                Point3::new(5.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(-1.0, 0.0, 0.0),
            ]
        );
        assert_eq!(path.segments()[1].next(), Some(Point3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn parses_radial_order_attributes() {
        let xml = r#"<guides order="Radial" origin="10,0,0" flipped="true">
              <line from="0,0,0" to="1,0,0"/>
              <line from="9,0,0" to="9,1,0"/>
            </guides>"#;

        let path = parse_str(xml).expect("radial document parsed");
        assert_eq!(path.order_name(), "radial");
        // Flipped: farthest from the origin first.
        assert_eq!(path.segments()[0].start(), Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn rejects_unknown_order() {
        let xml = r#"<guides order="spiral"><line from="0,0,0" to="1,0,0"/></guides>"#;
        assert!(matches!(parse_str(xml), Err(ParseError::Order(name)) if name == "spiral"));
    }

    #[test]
    fn rejects_other_root_elements() {
        assert!(matches!(parse_str("<ghx></ghx>"), Err(ParseError::UnknownRoot)));
        assert!(matches!(
            parse_str("<guidesx><line from=\"0,0,0\" to=\"1,0,0\"/></guidesx>"),
            Err(ParseError::UnknownRoot)
        ));
        assert!(matches!(parse_str("<guides"), Err(ParseError::UnknownRoot)));
    }

    #[test]
    fn accepts_root_with_attributes_on_next_line() {
        let xml = "<guides\n  order=\"pipeline\"><line from=\"0,0,0\" to=\"1,0,0\"/></guides>";
        assert_eq!(parse_str(xml).expect("root spanning lines").len(), 1);
    }

    #[test]
    fn reports_bad_points_and_degenerate_guides() {
        let bad_point = r#"<guides><line from="0,0" to="1,0,0"/></guides>"#;
        assert!(matches!(parse_str(bad_point), Err(ParseError::Point(raw)) if raw == "0,0"));

        let degenerate = r#"<guides><line from="1,1,1" to="1,1,1"/></guides>"#;
        assert!(matches!(
            parse_str(degenerate),
            Err(ParseError::Guide(GuideError::DegenerateSegment))
        ));
    }

    #[test]
    fn skips_declaration_and_comments() {
        let xml = "\u{feff}<?xml version=\"1.0\"?>\n<!-- stem -->\n<guides><line from=\"0,0,0\" to=\"0,0,1\"/></guides>";
        let path = parse_str(xml).expect("document with comments parsed");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn parses_braced_points() {
        let point = parse_point(" {1.5, -2, 3e1} ").expect("point parsed");
        assert_eq!(point, Point3::new(1.5, -2.0, 30.0));
    }
}
