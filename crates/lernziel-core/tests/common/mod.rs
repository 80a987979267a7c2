//! HTML fixtures shaped like Lernzielplattform listing pages
#![allow(dead_code)]

use lernziel_core::{ClientConfig, LernzielSession};
use wiremock::MockServer;

pub const STUDY_PATH: &str =
    "/studiengang/Modellstudiengang2/zeitsemester/WiSe2019/fachsemester/ind";

pub struct LernzielFixture<'a> {
    pub id: &'a str,
    pub event_id: &'a str,
    pub module: &'a str,
    pub week: &'a str,
    pub event_type: &'a str,
    pub title: &'a str,
    pub dimension: &'a str,
    pub text: &'a str,
}

pub struct EventFixture<'a> {
    pub id: &'a str,
    pub packed_title: &'a str,
    pub date: &'a str,
}

/// Session pointing at the mock server's `/zend` prefix
pub fn session_for(server: &MockServer) -> LernzielSession {
    LernzielSession::with_config(ClientConfig::with_base_url(format!("{}/zend", server.uri())))
        .expect("session")
}

pub fn caption(start: u32, end: u32, total: u32) -> String {
    format!("{} - {} von {} Elementen", start, end, total)
}

/// Wrap result tables the way the site does: the fourth top-level div holds
/// the pagination control followed by the tables.
fn layout_page(caption: &str, tables: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Lernzielplattform</title></head>
<body>
<div id="top"></div>
<div id="menu"><a href="/zend/login/logout">Logout</a></div>
<div id="breadcrumb"></div>
<div id="content">
<div class="paginationControl">{}
<a href="#">&lt;</a> <a href="#">&gt;</a>
</div>
{}
</div>
</body>
</html>"##,
        caption, tables
    )
}

const FILTER_TABLE: &str = "<table><tr><td>Filter</td><td><select></select></td></tr></table>";

pub fn lernziele_page(caption: &str, rows: &[LernzielFixture]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            format!(
                concat!(
                    "<tr>",
                    "<td>{module}</td>",
                    "<td>{week}</td>",
                    r#"<td><ul><li><a href="/zend/plan/detail/id/{event_id}">{event_type}</a></li></ul></td>"#,
                    "<td>{title}</td>",
                    "<td>{dimension}</td>",
                    "<td>{text}</td>",
                    r#"<td><ul><li><a href="/zend/studentenlernziele/detail/id/{id}">Details</a>"#,
                    r#"<a href="/zend/studentenlernziele/merken/id/{id}-m">Merken</a></li></ul></td>"#,
                    "</tr>\n"
                ),
                module = row.module,
                week = row.week,
                event_id = row.event_id,
                event_type = row.event_type,
                title = row.title,
                dimension = row.dimension,
                text = row.text,
                id = row.id,
            )
        })
        .collect();

    let table = format!(
        concat!(
            "<table>\n<tr><td>Modul</td><td>Woche</td><td>Veranstaltung</td><td>Titel</td>",
            "<td>Lernziel-dimension</td><td>Lernziel – Die Studierenden sollen…</td><td>Aktionen</td></tr>\n",
            "{}</table>"
        ),
        body
    );

    layout_page(caption, &format!("{}\n{}", FILTER_TABLE, table))
}

pub fn events_page(caption: &str, rows: &[EventFixture]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            format!(
                r#"<tr><td><ul><li><a href="/zend/plan/detail/id/{}">{}</a></li></ul></td><td>{}</td></tr>
"#,
                row.id, row.packed_title, row.date
            )
        })
        .collect();

    let table = format!(
        "<table>\n<tr><td>Veranstaltung</td><td>Datum</td></tr>\n{}</table>",
        body
    );

    layout_page(
        caption,
        &format!("{}\n<table><tr><td>Legende</td></tr></table>\n{}", FILTER_TABLE, table),
    )
}

pub fn lernziel(id: &'static str, event_id: &'static str) -> LernzielFixture<'static> {
    LernzielFixture {
        id,
        event_id,
        module: "M1",
        week: "W2",
        event_type: "Seminar",
        title: "Anatomie",
        dimension: "Wissen",
        text: "Verstehen der Anatomie",
    }
}
