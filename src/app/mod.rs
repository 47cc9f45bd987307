//! Dioxus browser application.
//!
//! A single-page app: the [`Router`](crate::nav::Router) held by the shell
//! decides which page the content region shows, and the browser history only
//! ever mirrors that state.

use dioxus::prelude::*;

pub mod components;
pub mod pages;
pub mod platform;
pub mod shell;

use components::Layout;
use pages::{
    Dashboard, Delete, Home, Login, Manage, NotFound, Register, Scan, ScanLive, Show, Signup,
};
use shell::use_shell_provider;

use crate::nav::{Page, View};

/// Mount the app into the page's `#main` element.
pub fn launch() {
    dioxus::launch(App);
}

/// Root app component
#[component]
pub fn App() -> Element {
    let shell = use_shell_provider();

    let view = shell.router.read().view().clone();
    let title = match &view {
        View::Page(page) => page.title().to_string(),
        View::NotFound { .. } => "Not Found".to_string(),
    };

    rsx! {
        Layout { title,
            {render(view)}
        }
    }
}

fn render(view: View) -> Element {
    match view {
        View::NotFound { requested } => rsx! { NotFound { requested } },
        View::Page(page) => match page {
            Page::Home => rsx! { Home {} },
            Page::Login => rsx! { Login {} },
            Page::Signup => rsx! { Signup {} },
            Page::Dashboard => rsx! { Dashboard {} },
            Page::Manage => rsx! { Manage {} },
            Page::Register => rsx! { Register {} },
            Page::Show => rsx! { Show {} },
            Page::Delete => rsx! { Delete {} },
            Page::Scan => rsx! { Scan {} },
            Page::ScanLive => rsx! { ScanLive {} },
        },
    }
}
