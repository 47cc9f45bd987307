//! Status line and summary widgets.

use dioxus::prelude::*;

use crate::forms::StatusLine;
use crate::roster::Summary;

/// Renders a form's status element. Empty when there is nothing to say.
#[component]
pub fn StatusText(line: Option<StatusLine>) -> Element {
    match line {
        Some(line) => rsx! {
            p { class: line.tone.class(), role: "status", "{line.text}" }
        },
        None => rsx! {
            p { role: "status" }
        },
    }
}

/// Student counts. Blank values while loading or after a failed fetch.
#[component]
pub fn SummaryCards(summary: Option<Summary>) -> Element {
    let total = summary.map(|s| s.total.to_string()).unwrap_or_default();
    let courses = summary.map(|s| s.courses.to_string()).unwrap_or_default();

    rsx! {
        div { class: "stats",
            article {
                small { "Registered students" }
                div { class: "stat-value", id: "student-count", "{total}" }
            }
            article {
                small { "Courses" }
                div { class: "stat-value", id: "course-count", "{courses}" }
            }
        }
    }
}
