//! Scraper configuration values
//!
//! Each listing scraper is described by an immutable [`ScraperConfig`]:
//! where the listing lives, which study program/term/grade to request and
//! how the results table is laid out.

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mapper::columns;
use crate::parser::{LinkField, TableLayout};

/// Listing of the learning objectives
pub const LERNZIELE_LISTING_PATH: &str = "/studentenlernziele/index";

/// Listing of the teaching events
pub const EVENTS_LISTING_PATH: &str = "/plan/list";

/// Page size requested from the server, large to keep the page count low
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 1000;

/// Environment variable holding the login name
pub const USER_ENV: &str = "LERNZIEL_USER";

/// Environment variable holding the password
pub const PASSWORD_ENV: &str = "LERNZIEL_PASS";

/// Study program, term and grade selecting one listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyParams {
    /// Study program (e.g. "Modellstudiengang2")
    pub study: String,
    /// Term (e.g. "WiSe2019", "SoSe2019")
    pub term: String,
    /// Grade/semester stage (e.g. "1", "2", or "ind" for all)
    pub grade: String,
}

impl Default for StudyParams {
    fn default() -> Self {
        Self {
            study: "Modellstudiengang2".to_string(),
            term: "WiSe2019".to_string(),
            grade: "ind".to_string(),
        }
    }
}

impl StudyParams {
    pub fn new(
        study: impl Into<String>,
        term: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            study: study.into(),
            term: term.into(),
            grade: grade.into(),
        }
    }

    /// Same parameters with a different term
    pub fn with_term(self, term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..self
        }
    }

    /// Same parameters with a different grade
    pub fn with_grade(self, grade: impl Into<String>) -> Self {
        Self {
            grade: grade.into(),
            ..self
        }
    }
}

/// Build the study part of a listing path.
///
/// # Examples
/// ```
/// use lernziel_core::config::{build_study_path, StudyParams};
///
/// assert_eq!(
///     build_study_path(&StudyParams::default()),
///     "/studiengang/Modellstudiengang2/zeitsemester/WiSe2019/fachsemester/ind"
/// );
/// ```
pub fn build_study_path(params: &StudyParams) -> String {
    format!(
        "/studiengang/{}/zeitsemester/{}/fachsemester/{}",
        urlencoding::encode(&params.study),
        urlencoding::encode(&params.term),
        urlencoding::encode(&params.grade)
    )
}

/// Build the path of one listing page.
///
/// `page` is the 0-based page index. The first page has no page segment;
/// later pages use the server's 1-based page number.
pub fn build_listing_path(listing: &str, params: &StudyParams, page: u32) -> String {
    let mut path = format!("{}{}", listing, build_study_path(params));
    if page > 0 {
        path.push_str(&format!("/page/{}", page + 1));
    }
    path
}

/// Everything needed to scrape one listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// Listing path, e.g. [`LERNZIELE_LISTING_PATH`]
    pub listing_path: String,
    pub study: StudyParams,
    /// Value of the `itemsPerPage` query parameter
    pub items_per_page: u32,
    pub layout: TableLayout,
}

impl ScraperConfig {
    /// Objectives listing: second table of the content block.
    ///
    /// The objective link is the first anchor in cell 7, the event link
    /// the anchor in cell 3.
    pub fn lernziele() -> Self {
        Self {
            listing_path: LERNZIELE_LISTING_PATH.to_string(),
            study: StudyParams::default(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            layout: TableLayout::content_table(
                2,
                vec![
                    LinkField::new(
                        columns::LERNZIEL_ID,
                        "td:nth-of-type(7) > ul > li > a:nth-of-type(1)",
                    ),
                    LinkField::new(columns::EVENT_ID, "td:nth-of-type(3) > ul > li > a"),
                ],
            ),
        }
    }

    /// Event listing: third table of the content block, event link in cell 1.
    pub fn events() -> Self {
        Self {
            listing_path: EVENTS_LISTING_PATH.to_string(),
            study: StudyParams::default(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            layout: TableLayout::content_table(
                3,
                vec![LinkField::new(
                    columns::EVENT_ID,
                    "td:nth-of-type(1) > ul > li > a",
                )],
            ),
        }
    }

    pub fn with_study(self, study: StudyParams) -> Self {
        Self { study, ..self }
    }

    pub fn with_items_per_page(self, items_per_page: u32) -> Self {
        Self {
            items_per_page,
            ..self
        }
    }

    /// Path of the page with the given 0-based index
    pub fn page_path(&self, page: u32) -> String {
        build_listing_path(&self.listing_path, &self.study, page)
    }
}

/// Login name and password
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Read credentials from `LERNZIEL_USER` and `LERNZIEL_PASS`.
    ///
    /// Returns `None` if either variable is unset or empty.
    pub fn from_env() -> Option<Self> {
        let user = env::var(USER_ENV).ok().filter(|v| !v.is_empty())?;
        let password = env::var(PASSWORD_ENV).ok().filter(|v| !v.is_empty())?;
        Some(Self::new(user, password))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}
