use std::collections::BTreeMap;
use tracing::debug;

use crate::constants::MAPPING_SEPARATOR;
use crate::types::MappingRecord;

/// Subject code to full subject name
pub type SubjectMap = BTreeMap<String, String>;

/// Parse a `CODE = Full Subject Name` title into its trimmed halves.
///
/// Returns `None` unless splitting on the separator yields exactly two
/// non-empty parts.
pub fn parse_mapping(title: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = title.split(MAPPING_SEPARATOR).collect();
    if parts.len() != 2 {
        return None;
    }
    let code = parts[0].trim();
    let name = parts[1].trim();
    if code.is_empty() || name.is_empty() {
        return None;
    }
    Some((code.to_string(), name.to_string()))
}

/// Build the subject map from mapping records, in the order given.
///
/// Malformed titles contribute nothing. A later record for the same code
/// replaces an earlier one.
pub fn build_subject_map<'a, I>(records: I) -> SubjectMap
where
    I: IntoIterator<Item = &'a MappingRecord>,
{
    let mut map = SubjectMap::new();
    for record in records {
        match parse_mapping(&record.title) {
            Some((code, name)) => {
                if let Some(previous) = map.insert(code.clone(), name) {
                    debug!("Subject code {} redefined (was '{}')", code, previous);
                }
            }
            None => debug!("Skipping malformed mapping record: '{}'", record.title),
        }
    }
    map
}
