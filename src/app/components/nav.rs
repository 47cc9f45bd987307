//! Navigation bar. Shows the anonymous or the authenticated menu.

use dioxus::prelude::*;

use crate::app::shell::use_shell;
use crate::nav::MenuItem;

/// Navigation bar with mobile toggle.
#[component]
pub fn Nav() -> Element {
    let shell = use_shell();
    let mut menu_open = use_signal(|| false);

    let router = shell.router.read();
    let active = router.view().active_id().to_string();
    let items = router.session().menu().items();

    let mobile_style = if menu_open() { "" } else { "display:none;" };

    rsx! {
        nav {
            ul {
                li {
                    a {
                        href: "#home",
                        onclick: move |evt: MouseEvent| {
                            evt.prevent_default();
                            shell.navigate(crate::nav::Page::Home);
                        },
                        strong { span { class: "brand", "FRASS" } }
                    }
                }
            }
            ul {
                for item in items.iter().copied() {
                    li { NavEntry { item, active: active.clone(), on_follow: move |_| menu_open.set(false) } }
                }
                li {
                    button {
                        class: "outline secondary",
                        r#type: "button",
                        aria_label: "Toggle menu",
                        onclick: move |_| menu_open.toggle(),
                        if menu_open() { "✕" } else { "☰" }
                    }
                }
            }
        }
        // Collapsed copy of the menu for narrow screens
        div { id: "mobile-menu", style: "{mobile_style}",
            ul {
                for item in items.iter().copied() {
                    li { NavEntry { item, active: active.clone(), on_follow: move |_| menu_open.set(false) } }
                }
            }
        }
    }
}

#[component]
fn NavEntry(item: MenuItem, active: String, on_follow: EventHandler<()>) -> Element {
    let shell = use_shell();

    match item {
        MenuItem::Link { page, label } => {
            let class = if active == page.id() { "active" } else { "" };
            let href = page.fragment();
            rsx! {
                a {
                    class,
                    href,
                    onclick: move |evt: MouseEvent| {
                        evt.prevent_default();
                        on_follow.call(());
                        shell.navigate(page);
                    },
                    "{label}"
                }
            }
        }
        MenuItem::Logout => rsx! {
            a {
                href: "#home",
                onclick: move |evt: MouseEvent| {
                    evt.prevent_default();
                    on_follow.call(());
                    shell.logout();
                },
                "Logout"
            }
        },
    }
}
