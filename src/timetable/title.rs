//! Class title rewriting.
//!
//! A class title looks like `CS32102(L)` or `MA101 Lab (P)`. The leading run
//! of uppercase letters and digits is the subject code; if there is none the
//! whole title is used as the code. The first `(L)`, `(T)` or `(P)` found
//! anywhere in the title is carried over as the session suffix.

use once_cell::sync::Lazy;
use regex::Regex;

use super::resolver::SubjectMap;
use crate::types::{ClassRecord, NormalizedClass};

static CODE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9]+").unwrap());
static SESSION_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([LTP]\)").unwrap());

/// Leading subject code of a class title, or the whole title when it has none
pub fn extract_code(title: &str) -> &str {
    CODE_PREFIX
        .find(title)
        .map(|m| m.as_str())
        .unwrap_or(title)
}

/// First session marker in the title, e.g. `(T)`, or `""`
pub fn extract_session_suffix(title: &str) -> &str {
    SESSION_SUFFIX
        .find(title)
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// Resolve a single title. Unknown codes leave the title as it was.
pub fn resolve_title(title: &str, subjects: &SubjectMap) -> String {
    match subjects.get(extract_code(title)) {
        Some(name) => format!("{} {}", name, extract_session_suffix(title))
            .trim_end()
            .to_string(),
        None => title.to_string(),
    }
}

/// Rewrite the title of one class record; every other field is copied.
pub fn normalize_class(record: &ClassRecord, subjects: &SubjectMap) -> NormalizedClass {
    NormalizedClass {
        class_title: resolve_title(&record.class_title, subjects),
        ..record.clone()
    }
}

/// Normalize class records, one output per input, order preserved
pub fn normalize_titles<'a, I>(records: I, subjects: &SubjectMap) -> Vec<NormalizedClass>
where
    I: IntoIterator<Item = &'a ClassRecord>,
{
    records
        .into_iter()
        .map(|record| normalize_class(record, subjects))
        .collect()
}
