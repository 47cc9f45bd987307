//! Dashboard page component.
//!
//! Student counts plus shortcuts into the authenticated pages.

use dioxus::prelude::*;

use crate::app::components::SummaryCards;
use crate::app::shell::use_shell;
use crate::nav::Page;

/// Dashboard page component.
#[component]
pub fn Dashboard() -> Element {
    let shell = use_shell();
    let summary = *shell.summary.read();

    rsx! {
        h1 { "Dashboard" }

        section { id: "summary",
            hgroup {
                h2 { "Overview" }
                p { "Students currently on record" }
            }
            SummaryCards { summary }
        }

        section { id: "shortcuts",
            h2 { "Quick actions" }
            div { class: "hub",
                Shortcut { page: Page::Register, text: "Add or update a student record" }
                Shortcut { page: Page::Show, text: "Browse the student database" }
                Shortcut { page: Page::ScanLive, text: "Mark attendance from the camera" }
                Shortcut { page: Page::Scan, text: "Match a face from a photo file" }
            }
        }
    }
}

#[component]
pub(super) fn Shortcut(page: Page, text: &'static str) -> Element {
    let shell = use_shell();
    let title = page.title();

    rsx! {
        article {
            h3 { "{title}" }
            p { "{text}" }
            button { class: "outline", onclick: move |_| shell.navigate(page), "Open" }
        }
    }
}
