//! Student database table.

use dioxus::prelude::*;

use crate::app::shell::submitter;
use crate::roster::{self, PhotoCell, StudentRow};

#[component]
pub fn Show() -> Element {
    let mut students = use_resource(|| async { submitter().client().students().await });

    let content = match &*students.read() {
        None => rsx! {
            p { aria_busy: "true", "Loading students..." }
        },
        Some(Err(e)) => rsx! {
            p { class: "status-err", "Could not load students: {e}" }
        },
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { "No students registered yet." }
        },
        Some(Ok(list)) => {
            let rows = roster::rows(list);
            rsx! {
                figure {
                    table { class: "striped",
                        thead {
                            tr {
                                for column in roster::COLUMNS {
                                    th { scope: "col", "{column}" }
                                }
                            }
                        }
                        tbody {
                            for row in rows {
                                StudentTableRow { key: "{row.id}", row: row.clone() }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        h2 { "Student Database" }
        button { class: "outline", onclick: move |_| students.restart(), "Refresh" }
        div { id: "table", {content} }
    }
}

#[component]
fn StudentTableRow(row: StudentRow) -> Element {
    let photo = match &row.photo {
        PhotoCell::Url(url) => rsx! {
            img { class: "photo-thumb", src: "{url}", alt: "{row.name}", loading: "lazy" }
        },
        PhotoCell::Placeholder => rsx! {
            span { class: "photo-placeholder", title: "No photo", "—" }
        },
    };

    rsx! {
        tr {
            td { {photo} }
            td { "{row.roll_no}" }
            td { "{row.name}" }
            td { "{row.course}" }
            td { "{row.branch}" }
        }
    }
}
