//! Main Lernzielplattform scraper API
//!
//! [`TableScraper`] binds a listing configuration to a row mapper and
//! drives the paginated extraction over a logged-in session.
//! [`LernzielScraper`] wraps the session and offers one call per listing.

use tracing::info;

use crate::client::LernzielSession;
use crate::config::{ScraperConfig, StudyParams};
use crate::error::Result;
use crate::mapper::{EventMapper, LernzielMapper, RowMapper};
use crate::pagination::fetch_all;
use crate::parser::extract_table;
use crate::types::{Event, Lernziel, RawRow};

/// Scraper for one listing, producing `M::Output` entities
#[derive(Debug, Clone)]
pub struct TableScraper<M> {
    config: ScraperConfig,
    mapper: M,
}

impl<M: RowMapper> TableScraper<M> {
    pub fn new(config: ScraperConfig, mapper: M) -> Self {
        Self { config, mapper }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Fetch every page of the listing and return the raw rows in order.
    ///
    /// # Errors
    /// Transport and extraction errors of any page; no rows are returned
    /// if one page fails.
    pub async fn fetch_rows(&self, session: &LernzielSession) -> Result<Vec<RawRow>> {
        let items_per_page = self.config.items_per_page.to_string();
        let items_per_page = items_per_page.as_str();

        fetch_all(move |page| {
            let path = self.config.page_path(page);
            async move {
                let document = session
                    .get(&path, &[("itemsPerPage", items_per_page)])
                    .await?;
                extract_table(&document, &self.config.layout)
            }
        })
        .await
    }

    /// Fetch every page of the listing and map all rows.
    ///
    /// # Errors
    /// Transport, extraction and mapping errors; the first one aborts.
    pub async fn scrape(&self, session: &LernzielSession) -> Result<Vec<M::Output>> {
        let rows = self.fetch_rows(session).await?;
        let items = self.mapper.map_rows(&rows)?;

        info!(
            listing = %self.config.listing_path,
            items = items.len(),
            "Scraped listing"
        );
        Ok(items)
    }
}

impl TableScraper<LernzielMapper> {
    /// Scraper for the learning objectives of the given study parameters
    pub fn lernziele(study: StudyParams) -> Self {
        Self::new(ScraperConfig::lernziele().with_study(study), LernzielMapper)
    }
}

impl TableScraper<EventMapper> {
    /// Scraper for the teaching events of the given study parameters
    pub fn events(study: StudyParams) -> Self {
        Self::new(
            ScraperConfig::events().with_study(study),
            EventMapper::composite(),
        )
    }
}

/// High-level API over one authenticated session
///
/// # Example
/// ```no_run
/// use lernziel_core::{LernzielScraper, StudyParams};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = LernzielScraper::new()?;
///     scraper.login("student", "secret").await?;
///
///     let lernziele = scraper.get_lernziele(&StudyParams::default()).await?;
///     println!("Found {} learning objectives", lernziele.len());
///
///     Ok(())
/// }
/// ```
pub struct LernzielScraper {
    session: LernzielSession,
}

impl LernzielScraper {
    /// Create a new scraper with a default session.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let session = LernzielSession::new()?;
        Ok(Self { session })
    }

    /// Create a scraper over an existing session.
    ///
    /// Useful for tests or custom client configuration.
    pub fn with_session(session: LernzielSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &LernzielSession {
        &self.session
    }

    /// Log in; see [`LernzielSession::login`].
    pub async fn login(&self, user: &str, password: &str) -> Result<()> {
        self.session.login(user, password).await
    }

    /// All learning objectives of a study program, term and grade.
    pub async fn get_lernziele(&self, study: &StudyParams) -> Result<Vec<Lernziel>> {
        self.scrape(&TableScraper::lernziele(study.clone())).await
    }

    /// All teaching events of a study program, term and grade.
    pub async fn get_events(&self, study: &StudyParams) -> Result<Vec<Event>> {
        self.scrape(&TableScraper::events(study.clone())).await
    }

    /// Run any table scraper over this session.
    pub async fn scrape<M: RowMapper>(&self, scraper: &TableScraper<M>) -> Result<Vec<M::Output>> {
        scraper.scrape(&self.session).await
    }
}
