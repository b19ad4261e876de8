//! Publication record types and ingestion

pub mod json;

use anyhow::Result;
use serde::{Serialize, Deserialize};

/// A publication record as it arrives from the fetch collaborator.
///
/// The wire shape is loose: `id` may be missing on malformed rows, and the
/// original data source spells several fields differently (`doi`, `terms`,
/// `refs`), so aliases are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Stable identifier, typically a DOI
    #[serde(alias = "doi")]
    pub id: Option<String>,

    /// Topic labels, in the order the source lists them
    #[serde(default, alias = "terms")]
    pub topics: Vec<String>,

    /// Ids of cited publications
    #[serde(default, alias = "refs")]
    pub references: Vec<String>,

    /// Display title, carried through untouched
    #[serde(default)]
    pub title: Option<String>,

    /// Author names, carried through untouched
    #[serde(default)]
    pub authors: Vec<String>,

    /// Publication date string, carried through untouched
    #[serde(default)]
    pub date: Option<String>,

    /// Landing page URL, carried through untouched
    #[serde(default)]
    pub url: Option<String>,
}

/// A validated record: `id` is guaranteed present. Immutable for the
/// remainder of the pass that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct PublicationRecord {
    pub id: String,
    pub topics: Vec<String>,
    pub references: Vec<String>,
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub date: Option<String>,
    pub url: Option<String>,
}

/// Validate raw records, dropping malformed ones.
///
/// A record without an id cannot participate in clustering and is excluded
/// with a warning; the pass itself continues. Returns the surviving records
/// in input order plus the number dropped.
pub fn normalize_records(raw: Vec<RawRecord>) -> (Vec<PublicationRecord>, usize) {
    let mut records = Vec::with_capacity(raw.len());
    let mut dropped = 0;

    for (position, record) in raw.into_iter().enumerate() {
        match record.id {
            Some(id) if !id.is_empty() => {
                records.push(PublicationRecord {
                    id,
                    topics: record.topics,
                    references: record.references,
                    title: record.title,
                    authors: record.authors,
                    date: record.date,
                    url: record.url,
                });
            }
            _ => {
                log::warn!("Dropping record at position {} with missing id", position);
                dropped += 1;
            }
        }
    }

    (records, dropped)
}

/// Flat storage for the validated records of one pass.
///
/// Pure storage and lookup; all graph logic lives downstream of it.
pub struct RecordRepository {
    records: Vec<PublicationRecord>,
}

impl RecordRepository {
    pub fn new(records: Vec<PublicationRecord>) -> Self {
        Self { records }
    }

    /// All records, in input order
    pub fn records(&self) -> &[PublicationRecord] {
        &self.records
    }

    /// Look up one record by id
    pub fn get(&self, id: &str) -> Option<&PublicationRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// External source of raw publication records.
///
/// Network fetch, retry and timeout policy all live behind this seam; the
/// engine only awaits the result and propagates total failure to the caller.
pub trait RecordSource {
    /// Fetch the full raw record list for one pass
    fn fetch(&self) -> Result<Vec<RawRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: Option<&str>) -> RawRecord {
        RawRecord {
            id: id.map(String::from),
            topics: vec![],
            references: vec![],
            title: None,
            authors: vec![],
            date: None,
            url: None,
        }
    }

    #[test]
    fn normalize_keeps_valid_records_in_order() {
        let (records, dropped) = normalize_records(vec![raw(Some("a")), raw(Some("b"))]);
        assert_eq!(dropped, 0);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn normalize_drops_records_without_id() {
        let (records, dropped) = normalize_records(vec![raw(Some("a")), raw(None), raw(Some(""))]);
        assert_eq!(dropped, 2);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "a");
    }

    #[test]
    fn repository_looks_up_by_id() {
        let (records, _) = normalize_records(vec![raw(Some("a")), raw(Some("b"))]);
        let repository = RecordRepository::new(records);

        assert_eq!(repository.len(), 2);
        assert_eq!(repository.get("b").map(|r| r.id.as_str()), Some("b"));
        assert!(repository.get("missing").is_none());
    }

    #[test]
    fn raw_record_accepts_source_field_names() {
        let parsed: RawRecord = serde_json::from_str(
            r#"{"doi": "10.1000/0001", "terms": ["AI"], "refs": ["10.1000/0002"]}"#,
        )
        .unwrap();
        assert_eq!(parsed.id.as_deref(), Some("10.1000/0001"));
        assert_eq!(parsed.topics, ["AI"]);
        assert_eq!(parsed.references, ["10.1000/0002"]);
    }
}
