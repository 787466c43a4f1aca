//! Official record collections and their on-disk format.
//!
//! Each collection lives in its own `<name>.json` file holding
//! `{ "items": [ {field: value, ...}, ... ] }`.

use crate::intent::Intent;
use assist_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

/// A flat field mapping. Values are strings, numbers or lists of strings.
pub type Record = Map<String, Value>;

/// The five official collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Contacts,
    Addresses,
    Fees,
    Requirements,
    Procedures,
}

impl Collection {
    /// Lookup order.
    pub const ALL: [Collection; 5] = [
        Collection::Contacts,
        Collection::Addresses,
        Collection::Fees,
        Collection::Requirements,
        Collection::Procedures,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Contacts => "contacts",
            Collection::Addresses => "addresses",
            Collection::Fees => "fees",
            Collection::Requirements => "requirements",
            Collection::Procedures => "procedures",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }

    /// Field matched against the query.
    pub fn key_field(&self) -> &'static str {
        match self {
            Collection::Contacts | Collection::Addresses => "office",
            Collection::Fees | Collection::Requirements | Collection::Procedures => "service",
        }
    }

    /// Intent whose lookup keywords select this collection.
    pub fn intent(&self) -> Intent {
        match self {
            Collection::Contacts => Intent::Contact,
            Collection::Addresses => Intent::Address,
            Collection::Fees => Intent::Fee,
            Collection::Requirements => Intent::Requirement,
            Collection::Procedures => Intent::Procedure,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contents of one collection file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordCollection {
    #[serde(default)]
    pub items: Vec<Record>,
}

impl RecordCollection {
    pub fn new(items: Vec<Record>) -> Self {
        Self { items }
    }
}

/// Read one collection file. A missing file is an empty collection.
pub fn load_collection(dir: &Path, collection: Collection) -> AppResult<RecordCollection> {
    let path = dir.join(collection.file_name());

    if !path.exists() {
        tracing::debug!("No {} file at {:?}; using empty collection", collection, path);
        return Ok(RecordCollection::default());
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        AppError::Knowledge(format!("Failed to read {:?}: {}", path, e))
    })?;

    let parsed: RecordCollection = serde_json::from_str(&contents).map_err(|e| {
        AppError::Serialization(format!("Failed to parse {:?}: {}", path, e))
    })?;

    tracing::debug!("Loaded {} {} records", parsed.items.len(), collection);
    Ok(parsed)
}

/// Display text of a scalar field; missing and null render empty.
pub fn field_text(record: &Record, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Items of a list field; anything else renders as an empty list.
pub fn list_field(record: &Record, key: &str) -> Vec<String> {
    match record.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_collection() {
        let temp = TempDir::new().unwrap();
        let loaded = load_collection(temp.path(), Collection::Fees).unwrap();
        assert!(loaded.items.is_empty());
    }

    #[test]
    fn test_file_without_items_key_is_empty() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("contacts.json"), "{}").unwrap();
        let loaded = load_collection(temp.path(), Collection::Contacts).unwrap();
        assert!(loaded.items.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("fees.json"), "{ items: ").unwrap();
        let result = load_collection(temp.path(), Collection::Fees);
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }

    #[test]
    fn test_field_text_display_forms() {
        let r = record(json!({"service": "Calibration", "fee_php": 500, "rate": 12.5, "notes": null}));
        assert_eq!(field_text(&r, "service"), "Calibration");
        assert_eq!(field_text(&r, "fee_php"), "500");
        assert_eq!(field_text(&r, "rate"), "12.5");
        assert_eq!(field_text(&r, "notes"), "");
        assert_eq!(field_text(&r, "absent"), "");
    }

    #[test]
    fn test_list_field() {
        let r = record(json!({"steps": ["Submit form", "Pay fee"], "service": "x"}));
        assert_eq!(list_field(&r, "steps"), vec!["Submit form", "Pay fee"]);
        assert!(list_field(&r, "service").is_empty());
        assert!(list_field(&r, "required_docs").is_empty());
    }

    #[test]
    fn test_key_fields() {
        assert_eq!(Collection::Contacts.key_field(), "office");
        assert_eq!(Collection::Addresses.key_field(), "office");
        assert_eq!(Collection::Procedures.key_field(), "service");
        assert_eq!(Collection::Requirements.file_name(), "requirements.json");
    }
}
