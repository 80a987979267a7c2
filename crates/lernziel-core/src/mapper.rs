//! Row mappers turning raw table rows into entities
//!
//! Column labels are the German headers used by the Lernzielplattform.
//! Mapping is strict: a missing column or an unexpected packed title is an
//! error, never a default value.

use crate::error::{LernzielError, Result};
use crate::types::{Event, Lernziel, RawRow};

/// Column headers and link field names used on the listing pages
pub mod columns {
    pub const MODULE: &str = "Modul";
    pub const WEEK: &str = "Woche";
    pub const EVENT: &str = "Veranstaltung";
    pub const TITLE: &str = "Titel";
    pub const OBJECTIVE_DIMENSION: &str = "Lernziel-dimension";
    pub const OBJECTIVE_TEXT: &str = "Lernziel – Die Studierenden sollen…";

    /// Link field holding the event identifier
    pub const EVENT_ID: &str = "EventId";
    /// Link field holding the objective identifier
    pub const LERNZIEL_ID: &str = "LernzielId";
}

/// Converts one raw row into a typed entity
pub trait RowMapper {
    type Output;

    fn map_row(&self, row: &RawRow) -> Result<Self::Output>;

    /// Map every row in order, stopping at the first failure.
    fn map_rows(&self, rows: &[RawRow]) -> Result<Vec<Self::Output>> {
        rows.iter().map(|row| self.map_row(row)).collect()
    }
}

/// How the event columns are laid out in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventShape {
    /// Separate module, week, type and title columns (objectives listing)
    #[default]
    Direct,
    /// One packed "Veranstaltung" column (event listing)
    Composite,
}

/// Parts of a packed `"<type>: <title> (<module>, <week>)"` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeTitle {
    pub event_type: String,
    pub title: String,
    pub module: String,
    pub week: String,
}

/// Split a packed event title of the form `"<type>: <title> (<module>, <week>)"`.
///
/// The type ends at the first `": "`, the title at the last `" ("`. The
/// trailing group must contain exactly one `", "`.
///
/// # Examples
/// ```
/// use lernziel_core::mapper::split_composite_title;
///
/// let parts = split_composite_title("Seminar: Zellbiologie (M02, W1)").unwrap();
/// assert_eq!(parts.event_type, "Seminar");
/// assert_eq!(parts.title, "Zellbiologie");
/// assert_eq!(parts.module, "M02");
/// assert_eq!(parts.week, "W1");
/// ```
pub fn split_composite_title(raw: &str) -> Result<CompositeTitle> {
    let malformed = |reason: &str| {
        LernzielError::MappingError(format!("{} in event title '{}'", reason, raw))
    };

    let (event_type, rest) = raw.split_once(": ").ok_or_else(|| malformed("no ': '"))?;
    let (title, module_week) = rest.rsplit_once(" (").ok_or_else(|| malformed("no ' ('"))?;

    let mut parts = module_week.trim_matches(')').split(", ");
    let (module, week) = match (parts.next(), parts.next(), parts.next()) {
        (Some(module), Some(week), None) => (module, week),
        _ => return Err(malformed("expected '<module>, <week>'")),
    };

    Ok(CompositeTitle {
        event_type: event_type.trim().to_string(),
        title: title.to_string(),
        module: module.to_string(),
        week: week.to_string(),
    })
}

/// Builds `Event`s from rows of either listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventMapper {
    shape: EventShape,
}

impl EventMapper {
    pub fn new(shape: EventShape) -> Self {
        Self { shape }
    }

    /// Mapper for rows with separate event columns
    pub fn direct() -> Self {
        Self::new(EventShape::Direct)
    }

    /// Mapper for rows with a packed "Veranstaltung" column
    pub fn composite() -> Self {
        Self::new(EventShape::Composite)
    }

    pub fn shape(&self) -> EventShape {
        self.shape
    }
}

impl RowMapper for EventMapper {
    type Output = Event;

    fn map_row(&self, row: &RawRow) -> Result<Event> {
        match self.shape {
            EventShape::Direct => direct_event(row),
            EventShape::Composite => composite_event(row),
        }
    }
}

fn direct_event(row: &RawRow) -> Result<Event> {
    Ok(Event {
        id: row.require(columns::EVENT_ID)?.to_string(),
        module: row.require(columns::MODULE)?.to_string(),
        week: row.require(columns::WEEK)?.to_string(),
        event_type: row.require(columns::EVENT)?.to_string(),
        title: row.require(columns::TITLE)?.to_string(),
    })
}

fn composite_event(row: &RawRow) -> Result<Event> {
    let id = row.require(columns::EVENT_ID)?;
    let parts = split_composite_title(row.require(columns::EVENT)?)?;

    Ok(Event {
        id: id.to_string(),
        module: parts.module,
        week: parts.week,
        event_type: parts.event_type,
        title: parts.title,
    })
}

/// Builds `Lernziel`s, each with its own copy of the row's event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LernzielMapper;

impl RowMapper for LernzielMapper {
    type Output = Lernziel;

    fn map_row(&self, row: &RawRow) -> Result<Lernziel> {
        Ok(Lernziel {
            id: row.require(columns::LERNZIEL_ID)?.to_string(),
            event: direct_event(row)?,
            objective_type: row.require(columns::OBJECTIVE_DIMENSION)?.to_string(),
            text: row.require(columns::OBJECTIVE_TEXT)?.to_string(),
        })
    }
}
