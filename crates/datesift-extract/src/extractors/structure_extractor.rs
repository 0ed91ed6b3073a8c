//! Dates carried by document structure: `<time>`, microdata, `<abbr>`
//! microformats, edit markers and JSON-LD blocks.

use datesift::DateType;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::{debug, trace};

use super::extractor::DateExtractor;
use crate::types::{Candidate, DateSource, ExtractError};

/// Microdata and schema.org properties holding a date.
const DATE_PROPERTIES: [&str; 4] = ["datePublished", "dateCreated", "dateModified", "uploadDate"];

/// Microformat classes on `<abbr>`.
const ABBR_CLASSES: [&str; 2] = ["published", "updated"];

/// Finds dates in structured markup.
///
/// Offsets are element indices in document order, so candidates from one
/// page sort the way their elements appear.
#[derive(Debug, Clone, Default)]
pub struct StructureExtractor {
    selectors: Vec<(String, Selector)>,
}

impl StructureExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also read dates from elements matching these CSS selectors.
    pub fn with_selectors(selectors: &[String]) -> Result<Self, ExtractError> {
        let selectors = selectors
            .iter()
            .map(|raw| {
                Selector::parse(raw)
                    .map(|selector| (raw.clone(), selector))
                    .map_err(|err| ExtractError::InvalidSelector(format!("{raw}: {err}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selectors })
    }

    pub fn extract_from_document(&self, document: &Html) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let elements = document.root_element().descendants().filter_map(ElementRef::wrap);
        for (index, element) in elements.enumerate() {
            if is_json_ld(&element) {
                candidates.extend(json_ld_dates(&element, index));
            } else if let Some(candidate) = self.element_date(&element, index) {
                trace!(label = ?candidate.label, text = %candidate.text, "structured date");
                candidates.push(candidate);
            }
        }
        candidates
    }

    /// At most one candidate per element, first matching rule wins.
    fn element_date(&self, element: &ElementRef, index: usize) -> Option<Candidate> {
        let value = element.value();
        let name = value.name();
        let attr = |key: &str| value.attr(key).map(str::trim).filter(|v| !v.is_empty());
        let found = |text: String, label: &str| {
            (!text.is_empty()).then(|| Candidate::new(text, index).with_label(label))
        };

        match name {
            "time" => {
                return match attr("datetime") {
                    Some(datetime) => found(datetime.to_string(), "time[datetime]"),
                    None => found(element_text(element), "time"),
                };
            }
            "ins" | "del" => {
                if let Some(datetime) = attr("datetime") {
                    return found(datetime.to_string(), name);
                }
            }
            "abbr" if value.classes().any(|c| ABBR_CLASSES.contains(&c)) => {
                return match attr("title") {
                    Some(title) => found(title.to_string(), "abbr[title]"),
                    None => found(element_text(element), "abbr"),
                };
            }
            _ => {}
        }

        // `<meta itemprop>` belongs to the meta extractor.
        if name != "meta" {
            if let Some(prop) = attr("itemprop").filter(|p| DATE_PROPERTIES.contains(p)) {
                let text = attr("datetime")
                    .or_else(|| attr("content"))
                    .map(str::to_string)
                    .unwrap_or_else(|| element_text(element));
                return found(text, prop);
            }
        }

        let (raw, _) = self.selectors.iter().find(|(_, s)| s.matches(element))?;
        let text = attr("datetime")
            .or_else(|| attr("content"))
            .map(str::to_string)
            .unwrap_or_else(|| element_text(element));
        found(text, raw.as_str())
    }
}

impl DateExtractor for StructureExtractor {
    fn name(&self) -> &str {
        "structure"
    }

    fn provenance(&self) -> DateType {
        DateType::Structure
    }

    fn extract(&self, source: &DateSource) -> Vec<Candidate> {
        let Some(html) = &source.html else {
            return Vec::new();
        };
        self.extract_from_document(&Html::parse_document(html))
    }
}

fn element_text(element: &ElementRef) -> String {
    let text: String = element.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_json_ld(element: &ElementRef) -> bool {
    element.value().name() == "script"
        && element
            .value()
            .attr("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"))
}

/// Date properties anywhere inside a JSON-LD block.
fn json_ld_dates(element: &ElementRef, index: usize) -> Vec<Candidate> {
    let raw: String = element.text().collect();
    let root: Value = match serde_json::from_str(raw.trim()) {
        Ok(value) => value,
        Err(err) => {
            debug!(%err, "skipping malformed JSON-LD block");
            return Vec::new();
        }
    };

    let mut candidates = Vec::new();
    let mut stack = vec![&root];
    while let Some(value) = stack.pop() {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    match child {
                        Value::String(text) if DATE_PROPERTIES.contains(&key.as_str()) => {
                            let text = text.trim();
                            if !text.is_empty() {
                                candidates.push(
                                    Candidate::new(text, index).with_label(format!("json-ld:{key}")),
                                );
                            }
                        }
                        _ => stack.push(child),
                    }
                }
            }
            Value::Array(items) => stack.extend(items.iter().rev()),
            _ => {}
        }
    }
    candidates
}
