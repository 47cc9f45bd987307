//! Page identifiers and the views they resolve to.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Every view the app can display.
///
/// The identifier strings double as URL fragments (`#scan_live`) and as the
/// `page` field stored in browser history entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    Signup,
    Dashboard,
    Manage,
    Register,
    Show,
    Delete,
    Scan,
    ScanLive,
}

/// Raised when a history entry or URL fragment names a page that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown page identifier: {0:?}")]
pub struct UnknownPage(pub String);

impl Page {
    pub const ALL: [Page; 10] = [
        Page::Home,
        Page::Login,
        Page::Signup,
        Page::Dashboard,
        Page::Manage,
        Page::Register,
        Page::Show,
        Page::Delete,
        Page::Scan,
        Page::ScanLive,
    ];

    /// Stable identifier used in history state and the URL fragment.
    pub fn id(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Login => "login",
            Page::Signup => "signup",
            Page::Dashboard => "dashboard",
            Page::Manage => "manage",
            Page::Register => "register",
            Page::Show => "show",
            Page::Delete => "delete",
            Page::Scan => "scan",
            Page::ScanLive => "scan_live",
        }
    }

    /// Browser tab title.
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Login => "Login",
            Page::Signup => "Sign Up",
            Page::Dashboard => "Dashboard",
            Page::Manage => "Manage Students",
            Page::Register => "Add / Update Student",
            Page::Show => "Student Database",
            Page::Delete => "Delete Student",
            Page::Scan => "Scan Photo",
            Page::ScanLive => "Live Scan",
        }
    }

    /// Pages reachable without an authenticated session.
    pub fn is_public(self) -> bool {
        matches!(self, Page::Home | Page::Login | Page::Signup)
    }

    /// Pages that show the student-count summary.
    pub fn shows_summary(self) -> bool {
        matches!(self, Page::Home | Page::Dashboard)
    }

    /// `#<identifier>`
    pub fn fragment(self) -> String {
        format!("#{}", self.id())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.id() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// What the content region shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Page(Page),
    /// Fallback for identifiers that name no page.
    NotFound { requested: String },
}

impl View {
    pub fn page(&self) -> Option<Page> {
        match self {
            View::Page(page) => Some(*page),
            View::NotFound { .. } => None,
        }
    }

    /// Identifier for the nav menu's active marker.
    pub fn active_id(&self) -> &str {
        match self {
            View::Page(page) => page.id(),
            View::NotFound { .. } => "",
        }
    }
}

impl From<Page> for View {
    fn from(page: Page) -> Self {
        View::Page(page)
    }
}

/// Strip the leading `#` (and any stray whitespace) off a `location.hash` value.
///
/// Returns `None` for an empty fragment.
pub fn fragment_id(hash: &str) -> Option<&str> {
    let id = hash.trim().trim_start_matches('#').trim();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_round_trip_through_from_str() {
        for page in Page::ALL {
            assert_eq!(page.id().parse::<Page>(), Ok(page));
        }
    }

    #[test]
    fn test_unknown_identifier_is_rejected() {
        assert_eq!(
            "attendance".parse::<Page>(),
            Err(UnknownPage("attendance".to_string()))
        );
        // Identifiers are case sensitive
        assert!("Home".parse::<Page>().is_err());
    }

    #[test]
    fn test_public_subset() {
        let public: Vec<Page> = Page::ALL.into_iter().filter(|p| p.is_public()).collect();
        assert_eq!(public, vec![Page::Home, Page::Login, Page::Signup]);
    }

    #[test]
    fn test_fragment_helpers() {
        assert_eq!(Page::ScanLive.fragment(), "#scan_live");
        assert_eq!(fragment_id("#dashboard"), Some("dashboard"));
        assert_eq!(fragment_id("manage"), Some("manage"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id(""), None);
    }

    #[test]
    fn test_not_found_view_has_no_page() {
        let view = View::NotFound {
            requested: "nope".to_string(),
        };
        assert_eq!(view.page(), None);
        assert_eq!(view.active_id(), "");
        assert_eq!(View::from(Page::Show).page(), Some(Page::Show));
    }
}
