//! Student management hub.

use dioxus::prelude::*;

use super::dashboard::Shortcut;
use crate::nav::Page;

#[component]
pub fn Manage() -> Element {
    rsx! {
        h1 { "Manage Students" }
        div { class: "hub",
            Shortcut { page: Page::Register, text: "Add a new student or update an existing roll number" }
            Shortcut { page: Page::Show, text: "View every registered student" }
            Shortcut { page: Page::Delete, text: "Remove a student by roll number" }
        }
    }
}
