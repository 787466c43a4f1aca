use super::records::{field_text, load_collection, Collection, Record, RecordCollection};
use super::render::render_records;
use crate::intent::mentions_any;
use crate::types::Answer;
use assist_core::AppResult;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Maximum records rendered per lookup.
pub const MAX_MATCHES: usize = 5;

/// Record count of one collection.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionStats {
    pub collection: Collection,
    pub records: usize,
}

/// In-memory official dataset, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct OfficialStore {
    collections: HashMap<Collection, RecordCollection>,
}

impl OfficialStore {
    /// Load every collection file from `dir`.
    pub fn load(dir: &Path) -> AppResult<Self> {
        let mut collections = HashMap::new();
        for collection in Collection::ALL {
            collections.insert(collection, load_collection(dir, collection)?);
        }

        let store = Self { collections };
        tracing::info!(
            "Official store loaded from {:?} ({} records)",
            dir,
            store.total_records()
        );
        Ok(store)
    }

    /// Store with no records.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace one collection's records.
    pub fn with_collection(mut self, collection: Collection, items: Vec<Record>) -> Self {
        self.collections
            .insert(collection, RecordCollection::new(items));
        self
    }

    pub fn records(&self, collection: Collection) -> &[Record] {
        self.collections
            .get(&collection)
            .map(|c| c.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn stats(&self) -> Vec<CollectionStats> {
        Collection::ALL
            .into_iter()
            .map(|collection| CollectionStats {
                collection,
                records: self.records(collection).len(),
            })
            .collect()
    }

    pub fn total_records(&self) -> usize {
        self.collections.values().map(|c| c.items.len()).sum()
    }

    /// Keyword-scoped lookup.
    ///
    /// Groups are tried in [`Collection::ALL`] order. The first group whose
    /// lookup keywords appear in the query and which has at least one
    /// matching record governs the answer. Returns [`Answer::empty`] when no
    /// group does.
    pub fn lookup(&self, query: &str) -> Answer {
        let q = query.to_lowercase();

        for collection in Collection::ALL {
            if !mentions_any(&q, collection.intent().lookup_keywords()) {
                continue;
            }

            let matches = search_items(self.records(collection), &q, collection.key_field());
            tracing::debug!("Lookup group {}: {} matching records", collection, matches.len());

            if !matches.is_empty() {
                return render_records(collection, &matches);
            }
        }

        Answer::empty()
    }
}

/// Records whose key field contains the query, or any token of it.
///
/// `query_lower` must already be lowercased. Records with an empty key
/// field never match.
fn search_items<'a>(items: &'a [Record], query_lower: &str, key: &str) -> Vec<&'a Record> {
    let tokens: Vec<&str> = query_lower.split_whitespace().collect();

    items
        .iter()
        .filter(|record| {
            let field = field_text(record, key).to_lowercase();
            if field.is_empty() {
                return false;
            }
            field.contains(query_lower) || tokens.iter().any(|t| field.contains(t))
        })
        .take(MAX_MATCHES)
        .collect()
}
