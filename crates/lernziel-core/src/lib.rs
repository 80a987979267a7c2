//! Lernzielplattform Scraper Core Library
//!
//! This crate scrapes learning objectives ("Lernziele") and teaching
//! events from the Charité Lernzielplattform.
//!
//! # Features
//! - Cookie-based login session
//! - Extraction of paginated result tables by structural selectors
//! - Sequential page accumulation until the reported total is reached
//! - Typed `Event` and `Lernziel` entities

pub mod client;
pub mod config;
pub mod error;
pub mod mapper;
pub mod pagination;
pub mod parser;
pub mod scraper;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, LernzielSession};
pub use config::{Credentials, ScraperConfig, StudyParams};
pub use error::{LernzielError, Result};
pub use mapper::{EventMapper, EventShape, LernzielMapper, RowMapper};
pub use scraper::{LernzielScraper, TableScraper};
pub use types::{Event, Lernziel, PageResult, RawRow};
