//! Session state owned by the router.

use super::menu::Menu;
use super::page::{Page, View};

/// Everything the router knows about the running session.
///
/// Lives for one page load; nothing here is persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub(crate) view: View,
    pub(crate) logged_in: bool,
    /// Whether the router has asked for a camera stream that it has not yet released.
    pub(crate) camera_held: bool,
    /// Bumped on every navigation; summary results carry the value they were requested under.
    pub(crate) generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            view: View::Page(Page::Home),
            logged_in: false,
            camera_held: false,
            generation: 0,
        }
    }
}

impl Session {
    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn camera_held(&self) -> bool {
        self.camera_held
    }

    pub fn menu(&self) -> Menu {
        Menu::for_login(self.logged_in)
    }

    /// Apply the authentication gate to a requested page.
    pub fn gate(&self, requested: Page) -> Page {
        if self.logged_in || requested.is_public() {
            requested
        } else {
            Page::Login
        }
    }
}
