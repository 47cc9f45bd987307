//! The two fixed navigation menus.

use super::page::Page;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Menu {
    Anonymous,
    Authenticated,
}

/// One entry in the top navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Link { page: Page, label: &'static str },
    Logout,
}

const ANONYMOUS_ITEMS: &[MenuItem] = &[
    MenuItem::Link {
        page: Page::Home,
        label: "Home",
    },
    MenuItem::Link {
        page: Page::Login,
        label: "Login",
    },
    MenuItem::Link {
        page: Page::Signup,
        label: "Sign Up",
    },
];

const AUTHENTICATED_ITEMS: &[MenuItem] = &[
    MenuItem::Link {
        page: Page::Home,
        label: "Home",
    },
    MenuItem::Link {
        page: Page::Dashboard,
        label: "Dashboard",
    },
    MenuItem::Link {
        page: Page::Manage,
        label: "Manage",
    },
    MenuItem::Link {
        page: Page::Scan,
        label: "Scan",
    },
    MenuItem::Link {
        page: Page::ScanLive,
        label: "Live Scan",
    },
    MenuItem::Logout,
];

impl Menu {
    pub fn for_login(logged_in: bool) -> Self {
        if logged_in {
            Menu::Authenticated
        } else {
            Menu::Anonymous
        }
    }

    pub fn items(self) -> &'static [MenuItem] {
        match self {
            Menu::Anonymous => ANONYMOUS_ITEMS,
            Menu::Authenticated => AUTHENTICATED_ITEMS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_menu_only_links_public_pages() {
        for item in Menu::for_login(false).items() {
            match item {
                MenuItem::Link { page, .. } => assert!(page.is_public(), "{page} is restricted"),
                MenuItem::Logout => panic!("anonymous menu must not offer logout"),
            }
        }
    }

    #[test]
    fn test_authenticated_menu_ends_with_logout() {
        let items = Menu::for_login(true).items();
        assert_eq!(items.last(), Some(&MenuItem::Logout));
        assert!(!items.contains(&MenuItem::Link {
            page: Page::Login,
            label: "Login"
        }));
    }
}
