//! Fallback for identifiers that name no page.

use dioxus::prelude::*;

use crate::app::shell::use_shell;
use crate::nav::Page;

#[component]
pub fn NotFound(requested: String) -> Element {
    let shell = use_shell();

    rsx! {
        article { class: "narrow",
            h2 { "Page not found" }
            p { "There is no page called " code { "{requested}" } "." }
            button { onclick: move |_| shell.navigate(Page::Home), "Back to Home" }
        }
    }
}
