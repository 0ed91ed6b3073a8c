//! Date candidates from URL paths and queries.

use std::sync::LazyLock;

use datesift::patterns::names::month_from_name;
use datesift::DateType;
use regex::Regex;
use tracing::trace;
use url::{Position, Url};

use super::extractor::DateExtractor;
use crate::types::{Candidate, DateSource};

const SEPARATORS: [char; 4] = ['-', '_', '.', '/'];

/// `YYYY<sep>MM[<sep>DD]`, one regex per separator so a URL may mix them.
static SEPARATED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SEPARATORS
        .iter()
        .map(|sep| {
            let sep = regex::escape(&sep.to_string());
            Regex::new(&format!(
                r"(?P<year>(?:19|20)\d{{2}}){sep}(?P<month>1[0-2]|0?[1-9])(?:{sep}(?P<day>3[01]|[12]\d|0?[1-9]))?"
            ))
            .expect("URL date regex should compile")
        })
        .collect()
});

static MONTH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<year>(?:19|20)\d{2})[-_./](?P<mname>\p{L}{3,9})(?:[-_./](?P<day>3[01]|[12]\d|0?[1-9]))?",
    )
    .expect("URL month name regex should compile")
});

static COMPACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:19|20)\d{2}(?:0[1-9]|1[0-2])(?:0[1-9]|[12]\d|3[01])")
        .expect("URL compact date regex should compile")
});

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:19|20)\d{2}").expect("URL year regex should compile"));

/// Finds dates in the path and query of the source URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlDateExtractor;

/// A hit inside the scanned URL region, byte offsets relative to it.
#[derive(Debug, Clone, Copy)]
struct Hit {
    start: usize,
    end: usize,
    /// 1 = year, 2 = year+month, 3 = full date.
    depth: u8,
}

impl UrlDateExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Candidates in `raw`, with character offsets into the URL string.
    pub fn extract_from_url(&self, raw: &str) -> Vec<Candidate> {
        let (url, region_start) = scan_region(raw);
        let region = &url[region_start..];

        let mut hits = separated_hits(region);
        hits.extend(month_name_hits(region));
        hits.extend(digit_bounded(region, &COMPACT).map(|(start, end)| Hit { start, end, depth: 3 }));

        let mut chosen = keep_most_specific(hits);
        if chosen.is_empty() {
            chosen = digit_bounded(region, &YEAR)
                .map(|(start, end)| Hit { start, end, depth: 1 })
                .collect();
        }
        chosen.sort_by_key(|hit| hit.start);

        chosen
            .into_iter()
            .map(|hit| {
                let start = region_start + hit.start;
                let offset = url[..start].chars().count();
                Candidate::new(&url[start..region_start + hit.end], offset).with_label("url")
            })
            .collect()
    }
}

impl DateExtractor for UrlDateExtractor {
    fn name(&self) -> &str {
        "url"
    }

    fn provenance(&self) -> DateType {
        DateType::Url
    }

    fn extract(&self, source: &DateSource) -> Vec<Candidate> {
        match &source.url {
            Some(url) => self.extract_from_url(url),
            None => Vec::new(),
        }
    }
}

/// The string to scan and the byte offset where its path begins.
///
/// Parsed URLs are scanned from the path through the query. Anything
/// unparsable (relative links, bare paths) falls back to the raw string
/// minus its fragment, skipping a `scheme://host` prefix if present.
fn scan_region(raw: &str) -> (&str, usize) {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) if url.has_host() && raw.starts_with(&url[..Position::AfterQuery]) => {
            let path_start = url[..Position::BeforePath].len();
            let query_end = url[..Position::AfterQuery].len();
            (&raw[..query_end], path_start)
        }
        parsed => {
            if let Err(err) = parsed {
                trace!(url = raw, %err, "scanning unparsed URL");
            }
            let without_fragment = raw.split('#').next().unwrap_or(raw);
            let path_start = without_fragment
                .find("://")
                .and_then(|i| {
                    let after = i + 3;
                    without_fragment[after..].find('/').map(|p| after + p)
                })
                .unwrap_or(0);
            (without_fragment, path_start)
        }
    }
}

fn separated_hits(region: &str) -> Vec<Hit> {
    let mut hits = Vec::new();
    for regex in SEPARATED.iter() {
        for caps in regex.captures_iter(region) {
            let (Some(year), Some(month)) = (caps.name("year"), caps.name("month")) else {
                continue;
            };
            if !starts_clean(region, year.start()) {
                continue;
            }
            match caps.name("day") {
                Some(day) if ends_clean(region, day.end()) => hits.push(Hit {
                    start: year.start(),
                    end: day.end(),
                    depth: 3,
                }),
                _ if ends_clean(region, month.end()) => hits.push(Hit {
                    start: year.start(),
                    end: month.end(),
                    depth: 2,
                }),
                _ => {}
            }
        }
    }
    hits
}

fn month_name_hits(region: &str) -> Vec<Hit> {
    let mut hits = Vec::new();
    for caps in MONTH_NAME.captures_iter(region) {
        let (Some(year), Some(name)) = (caps.name("year"), caps.name("mname")) else {
            continue;
        };
        if !starts_clean(region, year.start()) || month_from_name(name.as_str()).is_none() {
            continue;
        }
        match caps.name("day") {
            Some(day) if ends_clean(region, day.end()) => hits.push(Hit {
                start: year.start(),
                end: day.end(),
                depth: 3,
            }),
            _ if !region[name.end()..].starts_with(char::is_alphanumeric) => hits.push(Hit {
                start: year.start(),
                end: name.end(),
                depth: 2,
            }),
            _ => {}
        }
    }
    hits
}

/// Matches not glued to surrounding digits.
fn digit_bounded<'r>(
    region: &'r str,
    regex: &'r Regex,
) -> impl Iterator<Item = (usize, usize)> + 'r {
    regex
        .find_iter(region)
        .filter(move |m| starts_clean(region, m.start()) && ends_clean(region, m.end()))
        .map(|m| (m.start(), m.end()))
}

fn starts_clean(region: &str, start: usize) -> bool {
    !region[..start].ends_with(|c: char| c.is_ascii_digit())
}

fn ends_clean(region: &str, end: usize) -> bool {
    !region[end..].starts_with(|c: char| c.is_ascii_digit())
}

/// Resolve overlaps in favor of the most specific hit, then the earliest.
fn keep_most_specific(mut hits: Vec<Hit>) -> Vec<Hit> {
    hits.sort_by(|a, b| b.depth.cmp(&a.depth).then(a.start.cmp(&b.start)));
    let mut kept: Vec<Hit> = Vec::new();
    for hit in hits {
        if !kept.iter().any(|k| hit.start < k.end && k.start < hit.end) {
            kept.push(hit);
        }
    }
    kept
}
