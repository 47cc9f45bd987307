//! Layout component wrapping every view with Pico CSS and the nav bar.

use dioxus::prelude::*;

use super::nav::Nav;

/// CSS styles for the application (extends Pico CSS).
const CUSTOM_STYLES: &str = r#"
:root { --pico-font-size: 15px; }
.brand { color: #2563eb; }
.status-ok { color: var(--pico-ins-color); }
.status-err { color: var(--pico-del-color); }
.status-pending { color: var(--pico-muted-color); }
.narrow { max-width: 420px; margin: 0 auto; }
.medium { max-width: 640px; margin: 0 auto; }
.stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 1rem; }
.stat-value { font-size: 2rem; font-weight: 700; }
.hub { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 1rem; }
.photo-thumb { width: 48px; height: 48px; object-fit: cover; border-radius: 4px; }
.photo-placeholder { display: inline-block; width: 48px; height: 48px; line-height: 48px; text-align: center; border-radius: 4px; background: var(--pico-muted-border-color); }
.live-preview { width: 100%; max-width: 640px; background: #000; border-radius: 6px; }
nav .active { font-weight: 700; text-decoration: underline; }
small { color: var(--pico-muted-color); }
"#;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    /// Page content
    pub children: Element,
}

#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("CARGO_PKG_VERSION");
    let full_title = format!("{} - FRASS", props.title);

    rsx! {
        document::Title { "{full_title}" }
        document::Link { rel: "stylesheet", href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css" }
        document::Style { {CUSTOM_STYLES} }

        header { class: "container",
            Nav {}
        }
        main { class: "container", id: "content",
            {props.children}
        }
        footer { class: "container",
            small { "FRASS - Smart Student Record & Attendance System v{version}" }
        }
    }
}
