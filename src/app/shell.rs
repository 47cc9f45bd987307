//! App-wide session context.
//!
//! Holds the router and the camera in signals and carries out the effects
//! each transition asks for. Provided once at the root by
//! [`use_shell_provider`]; pages reach it with [`use_shell`].
//!
//! Effect tasks run in the root scope so they outlive the component that
//! triggered the transition.

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::camera::{CameraCapture, CameraError, MediaDevices};
use crate::forms::{self, Outcome, StatusLine, Submitter};
use crate::nav::{Effect, Page, Router, SummaryTicket, Transition};
use crate::roster::Summary;

use super::platform::{self, BrowserMedia, FetchBackend};

pub type AppSubmitter = Submitter<FetchBackend>;

pub fn submitter() -> AppSubmitter {
    Submitter::new(ApiClient::new(FetchBackend))
}

#[derive(Clone, Copy)]
pub struct Shell {
    pub router: Signal<Router>,
    pub camera: Signal<CameraCapture<BrowserMedia>>,
    /// Problem with the live camera, shown on the live scan page.
    pub camera_status: Signal<Option<StatusLine>>,
    /// Student counts for home/dashboard; `None` while loading or on failure.
    pub summary: Signal<Option<Summary>>,
}

impl Shell {
    /// Initial render from the current URL fragment.
    pub fn start(mut self) {
        let transition = self.router.write().start(platform::current_fragment().as_deref());
        self.apply(transition);
    }

    pub fn navigate(mut self, page: Page) {
        let transition = self.router.write().navigate(page);
        self.apply(transition);
    }

    pub fn pop_state(mut self, page: Option<String>) {
        let transition = self.router.write().handle_pop_state(page.as_deref());
        self.apply(transition);
    }

    /// Enter the dashboard if the backend accepted the login.
    pub fn login(mut self, outcome: &Outcome) -> bool {
        let transition = forms::apply_login(outcome, &mut self.router.write());
        match transition {
            Some(transition) => {
                self.apply(transition);
                true
            }
            None => false,
        }
    }

    /// Drop the session now, then tell the backend. Its answer is only logged.
    pub fn logout(mut self) {
        let transition = self.router.write().logout();
        self.apply(transition);
        spawn_forever(async move {
            let outcome = submitter().logout().await;
            debug!(?outcome, "Logout request finished");
        });
    }

    fn apply(self, transition: Transition) {
        for effect in transition.effects {
            match effect {
                Effect::ReleaseCamera => self.release_camera(),
                Effect::AcquireCamera => self.acquire_camera(),
                Effect::LoadSummary(ticket) => self.load_summary(ticket),
                Effect::PushHistory(page) => platform::push_history(page),
                Effect::ReplaceHistory(page) => platform::replace_history(page),
            }
        }
    }

    fn release_camera(mut self) {
        self.camera.write().release();
        self.camera_status.set(None);
    }

    fn acquire_camera(mut self) {
        let ticket = self.camera.write().begin_acquire();
        let devices = self.camera.peek().devices().clone();
        self.camera_status
            .set(Some(StatusLine::pending("Starting camera…")));

        spawn_forever(async move {
            let opened = devices.open_video().await;
            let result = self.camera.write().complete_acquire(ticket, opened);
            match result {
                Ok(()) => self.camera_status.set(None),
                // Page already left; nothing to show
                Err(CameraError::Superseded) => {}
                Err(e) => self.camera_status.set(Some(StatusLine::error(e.to_string()))),
            }
        });
    }

    fn load_summary(mut self, ticket: SummaryTicket) {
        self.summary.set(None);
        spawn_forever(async move {
            let result = submitter().client().students().await;
            if !self.router.peek().accept_summary(ticket) {
                debug!("Dropping summary for a page that is no longer shown");
                return;
            }
            match result {
                Ok(students) => self.summary.set(Some(Summary::of(&students))),
                Err(e) => warn!("Failed to load student summary: {}", e),
            }
        });
    }
}

/// Create the shell at the app root and wire browser back/forward into it.
pub fn use_shell_provider() -> Shell {
    let router = use_signal(Router::new);
    let camera = use_signal(|| CameraCapture::new(BrowserMedia));
    let camera_status = use_signal(|| None);
    let summary = use_signal(|| None);

    let shell = use_context_provider(|| Shell {
        router,
        camera,
        camera_status,
        summary,
    });

    use_hook(move || platform::on_pop_state(move |page| shell.pop_state(page)));
    // Writes only, so this runs once after the first render
    use_effect(move || shell.start());

    shell
}

pub fn use_shell() -> Shell {
    use_context::<Shell>()
}
