//! Results table parser for Lernzielplattform listing pages
//!
//! A listing page carries one pagination caption
//! ("1 - 1000 von 2500 Elementen") and one results table whose first row
//! holds the column headers. Cells are matched to headers purely by
//! position, so the tree must be walked in document order.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::error::{LernzielError, Result};
use crate::types::{PageResult, RawRow};

/// Selector for the pagination caption block
pub const PAGINATION_CONTROL_SELECTOR: &str = "div[class*='paginationControl']";

/// A column whose value is the identifier at the end of a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkField {
    /// Key under which the identifier is stored in the row
    pub name: String,
    /// Selector evaluated against the row element; the first match is used
    pub selector: String,
}

impl LinkField {
    pub fn new(name: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
        }
    }
}

/// Structural selectors describing one results table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// Element holding the pagination caption
    pub pagination: String,
    /// Header cells, in column order
    pub header: String,
    /// Body rows, in item order
    pub body_rows: String,
    /// Link columns extracted per row
    pub link_fields: Vec<LinkField>,
}

impl TableLayout {
    /// Layout for the `table_index`-th table (1-based) of the content block.
    ///
    /// The content block is the fourth `div` directly under `body`; the
    /// first table row holds the headers and every later row is an item.
    pub fn content_table(table_index: usize, link_fields: Vec<LinkField>) -> Self {
        let table = format!(
            "body > div:nth-of-type(4) > table:nth-of-type({}) > tbody",
            table_index
        );
        Self {
            pagination: PAGINATION_CONTROL_SELECTOR.to_string(),
            header: format!("{} > tr:nth-of-type(1) > td", table),
            body_rows: format!("{} > tr:nth-of-type(n+2)", table),
            link_fields,
        }
    }
}

/// Parse a pagination caption of the form `"<start> - <end> von <total> Elementen"`.
///
/// The caption must start the text; non-breaking spaces count as whitespace.
///
/// # Returns
/// * `Some((start, end, total))` if the caption matches
/// * `None` otherwise
///
/// # Examples
/// ```
/// use lernziel_core::parser::parse_pagination_caption;
///
/// assert_eq!(parse_pagination_caption("1 - 1000 von 2500 Elementen"), Some((1, 1000, 2500)));
/// assert_eq!(parse_pagination_caption("Seite 1"), None);
/// ```
pub fn parse_pagination_caption(text: &str) -> Option<(u32, u32, u32)> {
    let re = regex_lite::Regex::new(r"^(\d+) - (\d+)\s+von (\d+) Elementen").ok()?;
    let text = text.trim().replace('\u{a0}', " ");
    let caps = re.captures(&text)?;

    let start = caps.get(1)?.as_str().parse().ok()?;
    let end = caps.get(2)?.as_str().parse().ok()?;
    let total = caps.get(3)?.as_str().parse().ok()?;

    Some((start, end, total))
}

/// Take the identifier from a link target: everything after the last `/`.
///
/// # Examples
/// ```
/// use lernziel_core::parser::extract_link_id;
///
/// assert_eq!(extract_link_id("/path/to/item/999"), Some("999"));
/// assert_eq!(extract_link_id("/path/to/item/"), None);
/// ```
pub fn extract_link_id(href: &str) -> Option<&str> {
    href.rsplit('/').next().filter(|id| !id.is_empty())
}

/// Extract rows and pagination counts from a listing page.
///
/// # Errors
/// * `LernzielError::ElementNotFound` if the pagination control is missing
/// * `LernzielError::ExtractionError` if the caption does not match, a
///   selector is invalid, or a link field has no match or no usable
///   identifier in some row
pub fn extract_table(document: &Html, layout: &TableLayout) -> Result<PageResult> {
    let (end, total) = extract_pagination(document, &layout.pagination)?;

    let header_selector = parse_selector(&layout.header)?;
    let column_names: Vec<String> = document
        .select(&header_selector)
        .map(|cell| flatten_text(&cell).trim().to_string())
        .collect();

    let row_selector = parse_selector(&layout.body_rows)?;
    let link_selectors = layout
        .link_fields
        .iter()
        .map(|field| Ok((field.name.as_str(), parse_selector(&field.selector)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::new();
    for (index, row) in document.select(&row_selector).enumerate() {
        let cells = row_cells(&row);
        if cells.len() != column_names.len() {
            warn!(
                row = index,
                cells = cells.len(),
                columns = column_names.len(),
                "Row cell count differs from header"
            );
        }

        let mut raw = RawRow::from_cells(&column_names, cells);
        for (name, selector) in &link_selectors {
            let id = extract_row_link(&row, selector, name, index)?;
            raw.insert_link(*name, id);
        }
        rows.push(raw);
    }

    debug!(rows = rows.len(), end, total, "Extracted table page");
    Ok(PageResult::new(rows, end, total))
}

/// Locate the pagination control and return `(end, total)` from its caption.
fn extract_pagination(document: &Html, selector: &str) -> Result<(u32, u32)> {
    let control_selector = parse_selector(selector)?;
    let control = document
        .select(&control_selector)
        .next()
        .ok_or_else(|| LernzielError::ElementNotFound(selector.to_string()))?;

    let caption = leading_text(&control);
    let (_start, end, total) = parse_pagination_caption(&caption).ok_or_else(|| {
        LernzielError::ExtractionError(format!(
            "Unexpected pagination caption: '{}'",
            caption.trim()
        ))
    })?;

    Ok((end, total))
}

/// Trimmed text of every `td` directly under the row, in document order.
fn row_cells(row: &ElementRef) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == "td")
        .map(|cell| flatten_text(&cell).trim().to_string())
        .collect()
}

/// Identifier of the first link matched by `selector` inside `row`.
fn extract_row_link(
    row: &ElementRef,
    selector: &Selector,
    field: &str,
    index: usize,
) -> Result<String> {
    let link = row.select(selector).next().ok_or_else(|| {
        LernzielError::ExtractionError(format!(
            "link field '{}' in row {} matched nothing",
            field, index
        ))
    })?;

    let href = link.value().attr("href").ok_or_else(|| {
        LernzielError::ExtractionError(format!(
            "link field '{}' in row {} has no href",
            field, index
        ))
    })?;

    extract_link_id(href).map(str::to_string).ok_or_else(|| {
        LernzielError::ExtractionError(format!(
            "link field '{}' in row {} has no identifier: '{}'",
            field, index, href
        ))
    })
}

/// Text before the element's first child element; the page links follow it.
fn leading_text(element: &ElementRef) -> String {
    element
        .children()
        .map_while(|node| node.value().as_text().map(|text| &**text))
        .collect()
}

fn flatten_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        LernzielError::ExtractionError(format!("Invalid selector '{}': {:?}", selector, e))
    })
}
