//! HTML parsers for Lernzielplattform pages
//!
//! - `table`: Parse a paginated results table into raw rows

pub mod table;

// Re-export main parsing functions
pub use table::{
    extract_link_id, extract_table, parse_pagination_caption, LinkField, TableLayout,
    PAGINATION_CONTROL_SELECTOR,
};
