// src/extract.rs

//! Rule-driven content extraction.
//!
//! Turns a fetched document into an ordered list of items using a
//! compiled rule: the document is entity-decoded once, segmented by the
//! item pattern, and each segment must yield exactly one title, link, and
//! description match. Extraction is all-or-nothing; a single bad segment
//! fails the whole call so a stale rule never emits degraded data.

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::{CompiledRule, ExtractedItem};

/// Extract items from raw document bytes.
///
/// Returns the items in document order, duplicates preserved. Fails if
/// the item pattern matches nothing, or if any field pattern matches
/// zero or multiple times within a segment.
pub fn extract(content: &[u8], rule: &CompiledRule) -> Result<Vec<ExtractedItem>> {
    let text = String::from_utf8_lossy(content);
    let decoded = decode_entities(&text);

    let mut segments = Vec::new();
    for caps in rule.item.captures_iter(&decoded) {
        let Some(matched) = caps.get(1) else {
            return Err(AppError::MissingCaptureGroup { field: "item" });
        };
        segments.push(matched.as_str());
    }

    if segments.is_empty() {
        return Err(AppError::NoSegments);
    }

    let mut items = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        items.push(ExtractedItem {
            title: field_value("title", &rule.title, segment, index)?,
            link: field_value("link", &rule.link, segment, index)?,
            description: field_value("description", &rule.description, segment, index)?,
        });
    }
    Ok(items)
}

/// Match a field pattern against one segment, requiring exactly one match.
///
/// The pattern is applied to the segment sub-slice only, never the whole
/// document, so matches in neighboring segments cannot leak in.
fn field_value(
    field: &'static str,
    regex: &Regex,
    segment: &str,
    index: usize,
) -> Result<String> {
    let caps: Vec<_> = regex.captures_iter(segment).collect();
    if caps.len() != 1 {
        return Err(AppError::FieldMatch {
            field,
            segment: index,
            found: caps.len(),
        });
    }
    let value = caps[0]
        .get(1)
        .ok_or(AppError::MissingCaptureGroup { field })?;
    Ok(value.as_str().to_string())
}

/// Decode HTML character entities, falling back to the original text when
/// the document contains malformed entities.
fn decode_entities(text: &str) -> String {
    match htmlescape::decode_html(text) {
        Ok(decoded) => decoded,
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rule;

    fn feed_rule() -> CompiledRule {
        Rule {
            item_pattern: "(?s)<item>(.*?)</item>".to_string(),
            title_pattern: "<title>(.*?)</title>".to_string(),
            link_pattern: "<link>(.*?)</link>".to_string(),
            description_pattern: "<description>(.*?)</description>".to_string(),
        }
        .compile()
        .unwrap()
    }

    const TWO_ITEMS: &str = "<item><title>A</title><link>L1</link><description>D1</description></item>\
         <item><title>B</title><link>L2</link><description>D2</description></item>";

    #[test]
    fn test_extracts_items_in_document_order() {
        let items = extract(TWO_ITEMS.as_bytes(), &feed_rule()).unwrap();

        assert_eq!(
            items,
            vec![
                ExtractedItem {
                    title: "A".to_string(),
                    link: "L1".to_string(),
                    description: "D1".to_string(),
                },
                ExtractedItem {
                    title: "B".to_string(),
                    link: "L2".to_string(),
                    description: "D2".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_field_matching_stays_within_segment() {
        // A stray title between segments must not be visible to either
        // segment's field matching.
        let doc = "<item><title>A</title><link>L1</link><description>D1</description></item>\
             <junk><title>X</title></junk>\
             <item><title>B</title><link>L2</link><description>D2</description></item>";

        let items = extract(doc.as_bytes(), &feed_rule()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "A");
        assert_eq!(items[1].title, "B");
    }

    #[test]
    fn test_missing_field_fails_whole_extraction() {
        let rule = Rule {
            item_pattern: "(?s)<item>(.*?)</item>".to_string(),
            title_pattern: "<subtitle>(.*?)</subtitle>".to_string(),
            link_pattern: "<link>(.*?)</link>".to_string(),
            description_pattern: "<description>(.*?)</description>".to_string(),
        }
        .compile()
        .unwrap();

        let err = extract(TWO_ITEMS.as_bytes(), &rule).unwrap_err();
        assert!(matches!(
            err,
            AppError::FieldMatch {
                field: "title",
                segment: 0,
                found: 0,
            }
        ));
    }

    #[test]
    fn test_multiple_field_matches_name_the_segment() {
        let doc = "<item><title>A</title><link>L1</link><description>D1</description></item>\
             <item><title>B</title><link>L2</link><link>L3</link><description>D2</description></item>";

        let err = extract(doc.as_bytes(), &feed_rule()).unwrap_err();
        assert!(matches!(
            err,
            AppError::FieldMatch {
                field: "link",
                segment: 1,
                found: 2,
            }
        ));
    }

    #[test]
    fn test_zero_segments_is_an_error() {
        let err = extract(b"<html><body>nothing here</body></html>", &feed_rule()).unwrap_err();
        assert!(matches!(err, AppError::NoSegments));
    }

    #[test]
    fn test_entities_are_decoded_before_matching() {
        let doc = "<item><title>A</title><link>L1</link><description>&lt;b&gt;</description></item>";

        let items = extract(doc.as_bytes(), &feed_rule()).unwrap();
        assert_eq!(items[0].description, "<b>");
    }

    #[test]
    fn test_entities_are_decoded_before_segmentation() {
        let doc =
            "&lt;item&gt;<title>A</title><link>L1</link><description>D1</description>&lt;/item&gt;";

        let items = extract(doc.as_bytes(), &feed_rule()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "A");
    }

    #[test]
    fn test_duplicate_items_are_preserved() {
        let doc = "<item><title>A</title><link>L</link><description>D</description></item>\
             <item><title>A</title><link>L</link><description>D</description></item>";

        let items = extract(doc.as_bytes(), &feed_rule()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], items[1]);
    }
}
