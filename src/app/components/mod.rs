//! Shared UI components.

pub mod layout;
pub mod nav;
pub mod status;

pub use layout::Layout;
pub use nav::Nav;
pub use status::{StatusText, SummaryCards};
