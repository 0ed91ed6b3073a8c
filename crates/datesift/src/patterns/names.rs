//! Month, weekday and timezone vocabularies used by the pattern bank.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Month names and abbreviations (English, German, French, Spanish).
const MONTHS: &[(&str, u32)] = &[
    // English
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
    // German
    ("januar", 1),
    ("jänner", 1),
    ("jän", 1),
    ("februar", 2),
    ("märz", 3),
    ("maerz", 3),
    ("mär", 3),
    ("mai", 5),
    ("juni", 6),
    ("juli", 7),
    ("oktober", 10),
    ("okt", 10),
    ("dezember", 12),
    ("dez", 12),
    // French
    ("janvier", 1),
    ("janv", 1),
    ("février", 2),
    ("fevrier", 2),
    ("févr", 2),
    ("fevr", 2),
    ("mars", 3),
    ("avril", 4),
    ("avr", 4),
    ("juin", 6),
    ("juillet", 7),
    ("juil", 7),
    ("août", 8),
    ("aout", 8),
    ("septembre", 9),
    ("octobre", 10),
    ("novembre", 11),
    ("décembre", 12),
    ("decembre", 12),
    ("déc", 12),
    // Spanish
    ("enero", 1),
    ("ene", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("abr", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("ago", 8),
    ("septiembre", 9),
    ("setiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
    ("dic", 12),
];

/// Leading letters of weekday names; the rest of the word is matched loosely.
const WEEKDAY_STEMS: &[&str] = &[
    "mon", "tue", "wed", "thu", "fri", "sat", "sun", // English
    "die", "mit", "don", "fre", "sam", "son", // German
    "lun", "mar", "mer", "jeu", "ven", "dim", // French
    "mié", "mie", "jue", "vie", "sáb", "sab", "dom", // Spanish
];

/// Named timezones and their offsets from UTC in minutes.
const TIMEZONES: &[(&str, i32)] = &[
    ("z", 0),
    ("utc", 0),
    ("gmt", 0),
    ("ut", 0),
    ("wet", 0),
    ("west", 60),
    ("bst", 60),
    ("cet", 60),
    ("mez", 60),
    ("cest", 120),
    ("mesz", 120),
    ("eet", 120),
    ("eest", 180),
    ("est", -300),
    ("edt", -240),
    ("cst", -360),
    ("cdt", -300),
    ("mst", -420),
    ("mdt", -360),
    ("pst", -480),
    ("pdt", -420),
];

static MONTH_LOOKUP: LazyLock<HashMap<&'static str, u32>> =
    LazyLock::new(|| MONTHS.iter().copied().collect());

static TIMEZONE_LOOKUP: LazyLock<HashMap<&'static str, i32>> =
    LazyLock::new(|| TIMEZONES.iter().copied().collect());

/// Month number for a (possibly abbreviated, possibly dotted) month name.
pub fn month_from_name(name: &str) -> Option<u32> {
    let key = name.trim().trim_end_matches('.').to_lowercase();
    MONTH_LOOKUP.get(key.as_str()).copied()
}

/// Offset from UTC in minutes for a timezone designator.
///
/// Accepts names (`GMT`, `CEST`), `Z`, and numeric offsets with or without
/// a `UTC`/`GMT` prefix (`+02:00`, `-0530`, `+1`, `GMT+2`).
pub fn timezone_offset(raw: &str) -> Option<i32> {
    let lower: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if let Some(offset) = TIMEZONE_LOOKUP.get(lower.as_str()) {
        return Some(*offset);
    }
    let numeric = ["utc", "gmt", "ut"]
        .iter()
        .find_map(|prefix| lower.strip_prefix(prefix))
        .unwrap_or(&lower);
    numeric_offset(numeric)
}

fn numeric_offset(s: &str) -> Option<i32> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes): (i32, i32) = match digits.len() {
        1 | 2 => (digits.parse().ok()?, 0),
        3 => (digits[..1].parse().ok()?, digits[1..].parse().ok()?),
        4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        _ => return None,
    };
    if minutes > 59 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

/// Regex alternation over all month names, longest first.
pub(crate) fn month_alternation() -> String {
    alternation(MONTHS.iter().map(|(name, _)| *name))
}

pub(crate) fn weekday_alternation() -> String {
    alternation(WEEKDAY_STEMS.iter().copied())
}

/// Named zones only; `z` and numeric offsets are spelled out in the pattern.
pub(crate) fn timezone_alternation() -> String {
    alternation(
        TIMEZONES
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| *name != "z"),
    )
}

fn alternation<'a>(words: impl Iterator<Item = &'a str>) -> String {
    let mut words: Vec<&str> = words.collect();
    words.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    words.dedup();
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}
