//! Page model and the view router.

pub mod menu;
pub mod page;
pub mod router;
pub mod session;

pub use menu::{Menu, MenuItem};
pub use page::{fragment_id, Page, UnknownPage, View};
pub use router::{Effect, NavigationOrigin, Router, SummaryTicket, Transition};
pub use session::Session;
