//! codec::import
//!
//! Lenient re-parse of hand-edited declaration text.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::CodecError;
use crate::core::schema::{Schema, SchemaItem};

static SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:export\s+)?const\s+\w+\s*:\s*Schema\s*=\s*")
        .expect("signature pattern is valid")
});

/// Find the bracketed literal bound by a `const <name>: Schema =`
/// declaration. Declarations not followed by a literal are skipped.
///
/// The closing bracket is found by depth counting outside string literals,
/// so brackets inside display names do not end the span early.
pub fn locate_literal(text: &str) -> Result<&str, CodecError> {
    let rest = SIGNATURE
        .find_iter(text)
        .map(|m| &text[m.end()..])
        .find(|rest| rest.starts_with(['[', '{']))
        .ok_or(CodecError::SignatureNotFound)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&rest[..=i]);
                }
            }
            _ => {}
        }
    }

    Err(CodecError::SignatureNotFound)
}

/// Remove commas that directly precede `]` or `}` (whitespace allowed in
/// between). Commas inside string literals are kept.
pub fn repair_trailing_commas(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in literal.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = literal[i + 1..].trim_start();
            if next.starts_with([']', '}']) {
                continue;
            }
        }
        out.push(c);
    }

    out
}

/// Locate, repair and parse the literal, checking it is a sequence.
pub fn parse_literal(text: &str) -> Result<Vec<Value>, CodecError> {
    let literal = locate_literal(text)?;
    let repaired = repair_trailing_commas(literal);
    match serde_json::from_str(&repaired).map_err(CodecError::MalformedLiteral)? {
        Value::Array(items) => Ok(items),
        _ => Err(CodecError::NotASequence),
    }
}

/// Recover a schema from declaration text.
///
/// # Errors
///
/// - `SignatureNotFound` if no declaration holds a bracketed literal
/// - `MalformedLiteral` if the repaired literal is not valid JSON
/// - `NotASequence` if the literal is not a list
/// - `InvalidItem` if an element is not a schema item
/// - `Schema(DuplicateId)` if two items share an id
pub fn import_declaration(text: &str) -> Result<Schema, CodecError> {
    let items = parse_literal(text)?
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<SchemaItem>(value)
                .map_err(|source| CodecError::InvalidItem { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let schema = Schema::new(items)?;
    tracing::debug!(items = schema.len(), "imported schema");
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::SchemaError;
    use serde_json::json;

    fn wrap(literal: &str) -> String {
        format!(
            "import {{ Schema, SchemaItem }} from '@/types/schema';\n\n\
             export const f_schema: Schema = {};\n\nexport default f_schema;",
            literal
        )
    }

    mod locate_literal {
        use super::*;

        #[test]
        fn finds_span() {
            let text = wrap("[1, [2]]");
            assert_eq!(locate_literal(&text).unwrap(), "[1, [2]]");
        }

        #[test]
        fn accepts_plain_const() {
            assert_eq!(locate_literal("const x: Schema = [];").unwrap(), "[]");
        }

        #[test]
        fn brackets_in_strings_ignored() {
            let text = wrap(r#"[{"display_name": "Total ] \" [x"}]"#);
            assert_eq!(
                locate_literal(&text).unwrap(),
                r#"[{"display_name": "Total ] \" [x"}]"#
            );
        }

        #[test]
        fn skips_declaration_without_literal() {
            let text = "// const draft: Schema = legacy;\nconst other: Schema = base;\n\
                        export const f_schema: Schema = [1];";
            assert_eq!(locate_literal(text).unwrap(), "[1]");
        }

        #[test]
        fn missing_signature() {
            assert!(matches!(
                locate_literal("export const x = [];"),
                Err(CodecError::SignatureNotFound)
            ));
        }

        #[test]
        fn unterminated_literal() {
            assert!(matches!(
                locate_literal("const x: Schema = [{\"a\": 1}"),
                Err(CodecError::SignatureNotFound)
            ));
        }
    }

    mod repair_trailing_commas {
        use super::*;

        #[test]
        fn removes_before_close() {
            assert_eq!(repair_trailing_commas("[1, 2 ,\n ]"), "[1, 2 \n ]");
            assert_eq!(repair_trailing_commas(r#"{"a":1,}"#), r#"{"a":1}"#);
        }

        #[test]
        fn keeps_commas_in_strings() {
            let s = r#"["a,]", "b"]"#;
            assert_eq!(repair_trailing_commas(s), s);
        }
    }

    mod parse_literal {
        use super::*;

        #[test]
        fn trailing_comma_example() {
            let items = parse_literal(&wrap(r#"[{"a":1,}]"#)).unwrap();
            assert_eq!(items, vec![json!({ "a": 1 })]);
        }

        #[test]
        fn other_syntax_errors_not_repaired() {
            let err = parse_literal(&wrap("[{'a': 1}]")).unwrap_err();
            assert!(matches!(err, CodecError::MalformedLiteral(_)));
        }

        #[test]
        fn object_literal_not_a_sequence() {
            let err = parse_literal(&wrap(r#"{"a": 1}"#)).unwrap_err();
            assert!(matches!(err, CodecError::NotASequence));
        }
    }

    mod import_declaration {
        use super::*;

        #[test]
        fn decodes_items() {
            let text = wrap(
                r#"[
  {
    "unique_id": "agree",
    "display_attributes": {
      "display_name": "I agree",
      "input_type": "checkbox",
      "block": "terms",
      "block_style": { "title": "Terms", "color_theme": "blue" },
    },
  },
]"#,
            );
            let schema = import_declaration(&text).unwrap();
            assert_eq!(schema.len(), 1);
            assert_eq!(schema.all()[0].block().unwrap().as_str(), "terms");
        }

        #[test]
        fn invalid_item_reports_index() {
            let text = wrap(
                r#"[{"unique_id": "a", "display_attributes": {"display_name": "A", "input_type": "text"}}, {"nope": 1}]"#,
            );
            assert!(matches!(
                import_declaration(&text),
                Err(CodecError::InvalidItem { index: 1, .. })
            ));
        }

        #[test]
        fn duplicate_ids_rejected() {
            let item = r#"{"unique_id": "a", "display_attributes": {"display_name": "A", "input_type": "text"}}"#;
            let text = wrap(&format!("[{item}, {item}]"));
            assert!(matches!(
                import_declaration(&text),
                Err(CodecError::Schema(SchemaError::DuplicateId(_)))
            ));
        }

        #[test]
        fn fractional_coordinates_survive() {
            use crate::codec::export_declaration;
            use crate::core::schema::{DisplayAttributes, PdfAttributes};
            use crate::core::types::{InputType, UniqueId};

            let mut pdf = PdfAttributes::new("Buyer Name");
            pdf.rect = Some([472.07173375535365, 0.1 + 0.2, 1e-7, 612.000_000_000_1]);
            let mut display = DisplayAttributes::new("Buyer name", InputType::Text);
            display.width = serde_json::Number::from_f64(5.5);
            display.order = serde_json::Number::from_f64(2.675);
            let schema = Schema::new(vec![SchemaItem::new(
                UniqueId::new("buyer_name").unwrap(),
                display,
            )
            .with_pdf_attributes(vec![pdf])])
            .unwrap();

            let back = import_declaration(&export_declaration(&schema, "f").unwrap()).unwrap();
            assert_eq!(back, schema);
            assert_eq!(
                back.all()[0].pdf_attributes[0].rect.unwrap()[0].to_bits(),
                472.07173375535365f64.to_bits()
            );
        }

        #[test]
        fn unsanitized_keys_accepted() {
            let text = wrap(
                r#"[{"unique_id": "a", "display_attributes": {"display_name": "A", "input_type": "text", "width": 40, "custom": true}}]"#,
            );
            let schema = import_declaration(&text).unwrap();
            let attrs = &schema.all()[0].display_attributes;
            assert_eq!(attrs.width.as_ref().and_then(|w| w.as_u64()), Some(40));
            assert_eq!(attrs.extra.get("custom"), Some(&json!(true)));
        }
    }
}
