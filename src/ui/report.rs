//! ui::report
//!
//! Text reports over a schema: the block view, verification results, and
//! the coordinate report of the extracted fields.

use std::fmt::Write;
use std::str::FromStr;

use serde::Serialize;

use crate::core::blocks::BlockView;
use crate::core::schema::Schema;
use crate::core::verify::VerifyResult;

/// Layout of the coordinate report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CoordsFormat {
    /// One line per field
    #[default]
    Simple,
    /// JSON list
    Json,
    /// Multi-line block per field, with area
    Detailed,
}

impl FromStr for CoordsFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(CoordsFormat::Simple),
            "json" => Ok(CoordsFormat::Json),
            "detailed" => Ok(CoordsFormat::Detailed),
            other => Err(format!("unknown coordinate format '{}'", other)),
        }
    }
}

/// One source field with a known rect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldCoordinates {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub page: Option<u32>,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Collect coordinates from every provenance record that has a rect.
pub fn collect_coordinates(schema: &Schema) -> Vec<FieldCoordinates> {
    schema
        .iter()
        .flat_map(|item| &item.pdf_attributes)
        .filter_map(|pdf| {
            let c = pdf.coordinates()?;
            Some(FieldCoordinates {
                name: pdf.pdf_field.clone(),
                field_type: pdf.field_type.clone(),
                page: pdf.page,
                x: c.x,
                y: c.y,
                width: c.width,
                height: c.height,
            })
        })
        .collect()
}

fn or_unknown<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(T::to_string)
        .unwrap_or_else(|| "?".to_string())
}

/// Render the coordinate report.
pub fn format_coordinates(
    fields: &[FieldCoordinates],
    format: CoordsFormat,
) -> Result<String, serde_json::Error> {
    Ok(match format {
        CoordsFormat::Simple => fields
            .iter()
            .map(|f| {
                format!(
                    "{}: page={}, x={}, y={}, w={}, h={}",
                    f.name,
                    or_unknown(&f.page),
                    f.x,
                    f.y,
                    f.width,
                    f.height
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        CoordsFormat::Json => serde_json::to_string_pretty(fields)?,
        CoordsFormat::Detailed => fields
            .iter()
            .map(|f| {
                format!(
                    "Field: {}\n  Type: {}\n  Page: {}\n  Position: ({}, {})\n  Size: {} x {}\n  Area: {} square units",
                    f.name,
                    or_unknown(&f.field_type),
                    or_unknown(&f.page),
                    f.x,
                    f.y,
                    f.width,
                    f.height,
                    f.width * f.height
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    })
}

/// Render the block view: blocks in first-appearance order, then the
/// unassigned items.
pub fn format_block_view(view: &BlockView) -> String {
    let mut out = String::new();
    for block in &view.blocks {
        let _ = writeln!(
            out,
            "{} [{}] \"{}\" ({} fields)",
            block.name,
            block.color_theme(),
            block.display_title(),
            block.members.len()
        );
        for id in &block.members {
            let _ = writeln!(out, "  - {}", id);
        }
    }
    let _ = writeln!(out, "unassigned ({} fields)", view.unassigned.len());
    for id in &view.unassigned {
        let _ = writeln!(out, "  - {}", id);
    }
    out.trim_end().to_string()
}

/// Render a verification result.
pub fn format_verify(result: &VerifyResult) -> String {
    if result.ok {
        return "ok".to_string();
    }
    let lines: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
    format!(
        "{} violation(s):\n{}",
        lines.len(),
        super::output::format_list(&lines, "  - ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::blocks;
    use crate::core::schema::{DisplayAttributes, PdfAttributes, SchemaItem};
    use crate::core::types::{ColorTheme, InputType, UniqueId};

    fn schema() -> Schema {
        let mut pdf = PdfAttributes::new("Buyer Name");
        pdf.field_type = Some("text".into());
        pdf.page = Some(2);
        pdf.rect = Some([100.4, 200.6, 300.4, 220.6]);

        let no_rect = PdfAttributes::new("Hidden");

        Schema::new(vec![
            SchemaItem::new(
                UniqueId::new("buyer_name").unwrap(),
                DisplayAttributes::new("Buyer name", InputType::Text),
            )
            .with_pdf_attributes(vec![pdf, no_rect]),
            SchemaItem::new(
                UniqueId::new("agree").unwrap(),
                DisplayAttributes::new("Agree", InputType::Checkbox),
            ),
        ])
        .unwrap()
    }

    mod coordinates {
        use super::*;

        #[test]
        fn skips_records_without_rect() {
            let fields = collect_coordinates(&schema());
            assert_eq!(fields.len(), 1);
            assert_eq!((fields[0].x, fields[0].y), (100, 201));
            assert_eq!((fields[0].width, fields[0].height), (200, 20));
        }

        #[test]
        fn simple_format() {
            let text = format_coordinates(&collect_coordinates(&schema()), CoordsFormat::Simple)
                .unwrap();
            assert_eq!(text, "Buyer Name: page=2, x=100, y=201, w=200, h=20");
        }

        #[test]
        fn detailed_format() {
            let text =
                format_coordinates(&collect_coordinates(&schema()), CoordsFormat::Detailed)
                    .unwrap();
            assert!(text.starts_with("Field: Buyer Name\n  Type: text\n  Page: 2"));
            assert!(text.ends_with("Area: 4000 square units"));
        }

        #[test]
        fn json_format() {
            let text =
                format_coordinates(&collect_coordinates(&schema()), CoordsFormat::Json).unwrap();
            let value: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(value[0]["type"], "text");
            assert_eq!(value[0]["width"], 200);
        }

        #[test]
        fn parse_format() {
            assert_eq!("detailed".parse::<CoordsFormat>(), Ok(CoordsFormat::Detailed));
            assert!("xml".parse::<CoordsFormat>().is_err());
        }
    }

    mod block_view {
        use super::*;

        #[test]
        fn lists_blocks_then_unassigned() {
            let s = schema();
            let ids = [UniqueId::new("agree").unwrap()];
            let s = blocks::create_block(&s, &ids, "terms", Some("Terms".into()), None, ColorTheme::Blue)
                .unwrap();

            let text = format_block_view(&blocks::view(&s));
            assert_eq!(
                text,
                "terms [blue] \"Terms\" (1 fields)\n  - agree\nunassigned (1 fields)\n  - buyer_name"
            );
        }
    }

    mod verify_report {
        use super::*;
        use crate::core::verify::VerifyError;

        #[test]
        fn ok_and_violations() {
            assert_eq!(format_verify(&VerifyResult::success()), "ok");
            let result = VerifyResult::from_errors(vec![VerifyError::StyleWithoutBlock(
                UniqueId::new("a").unwrap(),
            )]);
            assert_eq!(
                format_verify(&result),
                "1 violation(s):\n  - item 'a' has a block_style but no block"
            );
        }
    }
}
