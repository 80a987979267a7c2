//! Data types for the Lernziel scraper
//!
//! Entities (`Event`, `Lernziel`) are immutable values that implement
//! Serialize and Deserialize so callers can store them as JSON.
//! `RawRow` and `PageResult` only live for the extraction of a single page.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LernzielError, Result};

/// A teaching event (lecture, seminar, ...) of the curriculum
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Identifier taken from the last segment of the event link
    pub id: String,
    /// Module the event belongs to
    pub module: String,
    /// Week within the module
    pub week: String,
    /// Category label (e.g. "Vorlesung", "Seminar")
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event title
    pub title: String,
}

/// A learning objective attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lernziel {
    /// Identifier taken from the last segment of the objective link
    pub id: String,
    /// Event rebuilt from the same table row
    pub event: Event,
    /// Dimension label (e.g. "Wissen", "Fertigkeiten")
    #[serde(rename = "type")]
    pub objective_type: String,
    /// Free-form objective text
    pub text: String,
}

/// One table row: cell texts keyed by column header, plus link identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    columns: HashMap<String, String>,
    links: HashMap<String, String>,
}

impl RawRow {
    /// Zip column names with cell texts by position.
    ///
    /// Surplus cells or surplus columns are dropped. A repeated column name
    /// keeps the value of its last occurrence.
    pub fn from_cells<S: AsRef<str>>(column_names: &[S], cells: Vec<String>) -> Self {
        let columns = column_names
            .iter()
            .map(|name| name.as_ref().to_string())
            .zip(cells)
            .collect();

        Self {
            columns,
            links: HashMap::new(),
        }
    }

    /// Record the identifier extracted for a link field
    pub fn insert_link(&mut self, field: impl Into<String>, id: impl Into<String>) {
        self.links.insert(field.into(), id.into());
    }

    pub fn column(&self, name: &str) -> Option<&str> {
        self.columns.get(name).map(String::as_str)
    }

    pub fn link(&self, field: &str) -> Option<&str> {
        self.links.get(field).map(String::as_str)
    }

    /// Look up a value by name, link fields taking precedence over columns.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.link(name).or_else(|| self.column(name))
    }

    /// Like [`RawRow::get`], but a missing name is a mapping error.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| LernzielError::MappingError(format!("missing column '{}'", name)))
    }

    pub fn columns(&self) -> &HashMap<String, String> {
        &self.columns
    }

    pub fn links(&self) -> &HashMap<String, String> {
        &self.links
    }
}

/// Rows of one page together with the pagination caption counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    /// Rows in document order
    pub rows: Vec<RawRow>,
    /// Last item index shown on this page
    pub end: u32,
    /// Total number of items across all pages
    pub total: u32,
}

impl PageResult {
    pub fn new(rows: Vec<RawRow>, end: u32, total: u32) -> Self {
        Self { rows, end, total }
    }

    /// Whether the caption reports items beyond this page
    pub fn has_next_page(&self) -> bool {
        self.end < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        Event {
            id: "17".to_string(),
            module: "M1".to_string(),
            week: "W2".to_string(),
            event_type: "Seminar".to_string(),
            title: "Anatomie".to_string(),
        }
    }

    #[test]
    fn test_event_serializes_type_field() {
        let json = serde_json::to_value(sample_event()).unwrap();
        assert_eq!(json["type"], "Seminar");
        assert_eq!(json["id"], "17");
        assert!(json.get("event_type").is_none());
    }

    #[test]
    fn test_lernziel_serialization() {
        let lernziel = Lernziel {
            id: "42".to_string(),
            event: sample_event(),
            objective_type: "Wissen".to_string(),
            text: "Verstehen der Anatomie".to_string(),
        };

        let json = serde_json::to_string(&lernziel).unwrap();
        let deserialized: Lernziel = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, lernziel);
    }

    #[test]
    fn test_event_equality_covers_all_fields() {
        let a = sample_event();
        let mut b = sample_event();
        assert_eq!(a, b);

        b.week = "W3".to_string();
        assert_ne!(a, b);
    }

    #[test]
    fn test_raw_row_zip_drops_extra_cell() {
        let row = RawRow::from_cells(
            &["A", "B"],
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
        );

        let expected: HashMap<String, String> = [("A", "x"), ("B", "y")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(row.columns(), &expected);
    }

    #[test]
    fn test_raw_row_zip_drops_missing_cell() {
        let row = RawRow::from_cells(&["A", "B", "C"], vec!["x".to_string()]);
        assert_eq!(row.columns().len(), 1);
        assert_eq!(row.column("A"), Some("x"));
        assert_eq!(row.column("B"), None);
    }

    #[test]
    fn test_raw_row_link_takes_precedence() {
        let mut row = RawRow::from_cells(&["EventId"], vec!["cell text".to_string()]);
        row.insert_link("EventId", "17");
        assert_eq!(row.get("EventId"), Some("17"));
        assert_eq!(row.column("EventId"), Some("cell text"));
    }

    #[test]
    fn test_raw_row_require_missing() {
        let row = RawRow::default();
        match row.require("Modul") {
            Err(LernzielError::MappingError(msg)) => assert!(msg.contains("Modul")),
            other => panic!("Expected MappingError, got {:?}", other),
        }
    }

    #[test]
    fn test_page_result_has_next_page() {
        assert!(PageResult::new(Vec::new(), 1000, 2500).has_next_page());
        assert!(!PageResult::new(Vec::new(), 2500, 2500).has_next_page());
        assert!(!PageResult::new(Vec::new(), 0, 0).has_next_page());
    }
}
