use std::collections::HashSet;

use crate::models::job::{JobRecord, is_resolved};

/// Which links are canonical enough to identify a listing on their own.
#[derive(Debug, Clone, Copy)]
pub struct KeyPolicy<'a> {
    pub link_prefix: &'a str,
}

/// Identity of a record within one response.
///
/// Preference order: canonical link, source-assigned id, then the lowercased
/// `title|company|location` composite. Records with neither a title nor a
/// company have no key.
pub fn dedupe_key(record: &JobRecord, policy: KeyPolicy<'_>) -> Option<String> {
    if !record.has_title() && !record.has_company() {
        return None;
    }

    if is_resolved(&record.link) && record.link.starts_with(policy.link_prefix) {
        return Some(record.link.clone());
    }

    if let Some(id) = &record.source_id {
        return Some(format!("id:{id}"));
    }

    Some(format!(
        "{}|{}|{}",
        fold(&record.title),
        fold(&record.company_name),
        fold(&record.location)
    ))
}

/// Keep the first occurrence of every key, in input order. Unkeyable records are dropped.
pub fn dedupe(records: Vec<JobRecord>, policy: KeyPolicy<'_>) -> Vec<JobRecord> {
    let total = records.len();
    let mut seen = HashSet::with_capacity(total);

    let unique: Vec<JobRecord> = records
        .into_iter()
        .filter(|record| match dedupe_key(record, policy) {
            Some(key) => seen.insert(key),
            None => false,
        })
        .collect();

    if unique.len() < total {
        tracing::debug!("Dropped {} duplicate or empty records", total - unique.len());
    }
    unique
}

fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}
