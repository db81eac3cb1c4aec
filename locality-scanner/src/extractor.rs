use crate::error::{Result, ScanError};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Elements that reference another resource, and the attribute holding it
const REFERENCE_ATTRIBUTES: [(&str, &str); 6] = [
    ("a", "href"),
    ("link", "href"),
    ("img", "src"),
    ("script", "src"),
    ("iframe", "src"),
    ("form", "action"),
];

/// A raw reference pulled out of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedReference {
    pub reference: String,
    pub tag: String,
    pub text: Option<String>,
}

/// Extract every reference in document order. Empty attributes are skipped.
pub fn extract_references(html: &str) -> Result<Vec<ExtractedReference>> {
    let document = Html::parse_document(html);

    let selector_text = REFERENCE_ATTRIBUTES
        .iter()
        .map(|(tag, attr)| format!("{}[{}]", tag, attr))
        .collect::<Vec<_>>()
        .join(", ");
    let selector = Selector::parse(&selector_text)
        .map_err(|e| ScanError::ParseError(format!("Invalid selector {}: {}", selector_text, e)))?;

    let mut references = Vec::new();

    for element in document.select(&selector) {
        let tag = element.value().name();
        let Some((_, attr)) = REFERENCE_ATTRIBUTES.iter().find(|(t, _)| *t == tag) else {
            continue;
        };
        let Some(value) = element.value().attr(attr) else {
            continue;
        };

        let reference = value.trim();
        if reference.is_empty() {
            debug!("Skipping empty {} on <{}>", attr, tag);
            continue;
        }

        let text = if tag == "a" {
            let text = element.text().collect::<String>();
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            (!text.is_empty()).then_some(text)
        } else {
            None
        };

        debug!("Found reference: {} (<{}>)", reference, tag);
        references.push(ExtractedReference {
            reference: reference.to_string(),
            tag: tag.to_string(),
            text,
        });
    }

    Ok(references)
}
