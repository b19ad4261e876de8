//! Reference adjacency index

use std::collections::HashMap;

use crate::data::PublicationRecord;

/// Fast adjacency lookup over the citation graph.
///
/// Built once per pass and never mutated afterwards. Outgoing references are
/// stored verbatim, without validating targets against the record set; the
/// incoming side is indexed as well so that undirected traversal touches each
/// edge a constant number of times instead of scanning all records per step.
pub struct ReferenceIndex {
    /// id -> ids it cites, in the record's original reference order
    outgoing: HashMap<String, Vec<String>>,

    /// id -> ids citing it, in record input order
    incoming: HashMap<String, Vec<String>>,
}

impl ReferenceIndex {
    /// Build the index from the validated record list
    pub fn build(records: &[PublicationRecord]) -> Self {
        let mut outgoing: HashMap<String, Vec<String>> = HashMap::with_capacity(records.len());
        let mut incoming: HashMap<String, Vec<String>> = HashMap::with_capacity(records.len());

        for record in records {
            outgoing
                .entry(record.id.clone())
                .or_default()
                .extend(record.references.iter().cloned());

            for target in &record.references {
                incoming
                    .entry(target.clone())
                    .or_default()
                    .push(record.id.clone());
            }
        }

        Self { outgoing, incoming }
    }

    /// Ids cited by `id`; empty for unknown ids
    pub fn references_of(&self, id: &str) -> &[String] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids citing `id`; empty for unknown ids
    pub fn referenced_by(&self, id: &str) -> &[String] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Undirected neighbors of `id`: outgoing references first, then
    /// incoming referrers. Order is deterministic for identical input.
    pub fn neighbors_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a String> {
        self.references_of(id)
            .iter()
            .chain(self.referenced_by(id).iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, references: &[&str]) -> PublicationRecord {
        PublicationRecord {
            id: id.to_string(),
            topics: vec![],
            references: references.iter().map(|r| r.to_string()).collect(),
            title: None,
            authors: vec![],
            date: None,
            url: None,
        }
    }

    #[test]
    fn unknown_id_yields_empty_slices() {
        let index = ReferenceIndex::build(&[record("a", &["b"])]);
        assert!(index.references_of("nope").is_empty());
        assert!(index.referenced_by("nope").is_empty());
    }

    #[test]
    fn outgoing_order_is_preserved() {
        let index = ReferenceIndex::build(&[record("a", &["c", "b", "d"])]);
        assert_eq!(index.references_of("a"), ["c", "b", "d"]);
    }

    #[test]
    fn incoming_edges_are_indexed_in_input_order() {
        let records = [record("a", &["c"]), record("b", &["c"])];
        let index = ReferenceIndex::build(&records);
        assert_eq!(index.referenced_by("c"), ["a", "b"]);
    }

    #[test]
    fn neighbors_combine_both_directions() {
        let records = [record("a", &["b"]), record("c", &["a"])];
        let index = ReferenceIndex::build(&records);
        let neighbors: Vec<_> = index.neighbors_of("a").cloned().collect();
        assert_eq!(neighbors, ["b", "c"]);
    }
}
