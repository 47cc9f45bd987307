//! View router: authentication gate, history synchronization and page
//! entry/exit effects.
//!
//! The router never touches the browser. Every call returns a [`Transition`]
//! describing the new view and the [`Effect`]s the shell has to carry out
//! (camera, summary fetch, history), in the order they must run. That keeps
//! the gating and history rules testable on the host.

use tracing::{debug, info};

use super::menu::Menu;
use super::page::{fragment_id, Page, View};
use super::session::Session;

/// Where a navigation request came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationOrigin {
    /// Link click, form result, logout.
    User,
    /// Browser back/forward. Must never push a history entry.
    PopState,
    /// First render after load. Replaces the landing entry.
    Startup,
}

/// Permission to write a summary fetched for a particular navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SummaryTicket {
    generation: u64,
}

/// Side effect requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Stop every track of the held camera stream. Safe when nothing is held.
    ReleaseCamera,
    /// Open the camera and bind it to the live preview.
    AcquireCamera,
    /// Fetch the student-count summary in the background.
    LoadSummary(SummaryTicket),
    /// `history.pushState({page}, "", "#page")`
    PushHistory(Page),
    /// `history.replaceState({page}, "", "#page")`
    ReplaceHistory(Page),
}

/// Result of one navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: View,
    pub to: View,
    /// The authentication gate substituted `login` for the requested page.
    pub redirected: bool,
    pub menu: Menu,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn pushes_history(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, Effect::PushHistory(_)))
    }
}

enum Requested {
    Page(Page),
    Unknown(String),
}

impl Requested {
    fn parse(id: &str) -> Self {
        match id.parse::<Page>() {
            Ok(page) => Requested::Page(page),
            Err(_) => Requested::Unknown(id.to_string()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Router {
    session: Session,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &View {
        &self.session.view
    }

    pub fn logged_in(&self) -> bool {
        self.session.logged_in
    }

    /// Initial render. Honors a deep-link fragment (still gated), otherwise `home`.
    pub fn start(&mut self, fragment: Option<&str>) -> Transition {
        let requested = fragment
            .and_then(fragment_id)
            .map(Requested::parse)
            .unwrap_or(Requested::Page(Page::Home));
        self.transition(requested, NavigationOrigin::Startup)
    }

    /// Navigate to a page in response to a user action.
    pub fn navigate(&mut self, page: Page) -> Transition {
        self.transition(Requested::Page(page), NavigationOrigin::User)
    }

    /// Browser back/forward. `page` is the `page` field of the popped history
    /// state, if there was one. Unknown identifiers resolve to the not-found
    /// view.
    pub fn handle_pop_state(&mut self, page: Option<&str>) -> Transition {
        let requested = page
            .map(Requested::parse)
            .unwrap_or(Requested::Page(Page::Home));
        self.transition(requested, NavigationOrigin::PopState)
    }

    /// The backend accepted the credentials.
    pub fn login_succeeded(&mut self) -> Transition {
        info!("Session authenticated");
        self.session.logged_in = true;
        self.navigate(Page::Dashboard)
    }

    /// Drop the authenticated session and return to `home`.
    ///
    /// Always releases the camera, even if the router did not record a stream.
    pub fn logout(&mut self) -> Transition {
        info!("Session logged out");
        let force_release = !self.session.camera_held;
        self.session.logged_in = false;
        let mut transition = self.navigate(Page::Home);
        if force_release {
            transition.effects.insert(0, Effect::ReleaseCamera);
        }
        transition
    }

    /// Whether a summary fetched under `ticket` may still be written.
    ///
    /// False once the user has navigated again, even back to the same page.
    pub fn accept_summary(&self, ticket: SummaryTicket) -> bool {
        ticket.generation == self.session.generation
            && self
                .session
                .view
                .page()
                .is_some_and(|page| page.shows_summary())
    }

    fn resolve(&self, requested: Requested) -> (View, bool) {
        match requested {
            Requested::Page(page) => {
                let gated = self.session.gate(page);
                (View::Page(gated), gated != page)
            }
            // The gate runs before the lookup: unknown ids are not public.
            Requested::Unknown(_) if !self.session.logged_in => (View::Page(Page::Login), true),
            Requested::Unknown(requested) => (View::NotFound { requested }, false),
        }
    }

    fn transition(&mut self, requested: Requested, origin: NavigationOrigin) -> Transition {
        let (to, redirected) = self.resolve(requested);
        let from = std::mem::replace(&mut self.session.view, to.clone());
        self.session.generation += 1;

        let mut effects = Vec::new();

        // Exit effects for the previous view
        if self.session.camera_held {
            effects.push(Effect::ReleaseCamera);
            self.session.camera_held = false;
        }

        // Entry effects for the new view
        if let Some(page) = to.page() {
            if page == Page::ScanLive {
                effects.push(Effect::AcquireCamera);
                self.session.camera_held = true;
            }
            if page.shows_summary() {
                effects.push(Effect::LoadSummary(SummaryTicket {
                    generation: self.session.generation,
                }));
            }
            match origin {
                NavigationOrigin::User => effects.push(Effect::PushHistory(page)),
                NavigationOrigin::Startup => effects.push(Effect::ReplaceHistory(page)),
                NavigationOrigin::PopState => {}
            }
        }

        if redirected {
            debug!(to = %to.active_id(), "Restricted page requested while logged out");
        }
        debug!(
            from = %from.active_id(),
            to = %to.active_id(),
            ?origin,
            effects = effects.len(),
            "Navigate"
        );

        Transition {
            from,
            to,
            redirected,
            menu: self.session.menu(),
            effects,
        }
    }
}
