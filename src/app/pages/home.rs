//! Landing page.

use dioxus::prelude::*;

use crate::app::components::SummaryCards;
use crate::app::shell::use_shell;
use crate::nav::Page;

#[component]
pub fn Home() -> Element {
    let shell = use_shell();
    let logged_in = shell.router.read().logged_in();
    let summary = *shell.summary.read();

    rsx! {
        article {
            h1 { "Welcome to " span { class: "brand", "FRASS" } }
            p { "Smart Student Record & Attendance System" }
            div { role: "group",
                if logged_in {
                    button { onclick: move |_| shell.navigate(Page::Dashboard), "Open Dashboard" }
                    button { class: "outline", onclick: move |_| shell.navigate(Page::ScanLive), "Start Live Scan" }
                } else {
                    button { onclick: move |_| shell.navigate(Page::Login), "Login" }
                    button { class: "outline", onclick: move |_| shell.navigate(Page::Signup), "Create Account" }
                }
            }
        }

        SummaryCards { summary }

        div { class: "stats",
            article { h3 { "⚡ Fast" } p { "Quick access to records" } }
            article { h3 { "🔒 Secure" } p { "Data protection" } }
            article { h3 { "🤖 Automated" } p { "Face-match attendance" } }
        }
    }
}
