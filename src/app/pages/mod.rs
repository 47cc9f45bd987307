//! One component per page, plus the not-found fallback.

mod dashboard;
mod delete;
mod home;
mod login;
mod manage;
mod not_found;
mod register;
mod scan;
mod scan_live;
mod show;
mod signup;

pub use dashboard::Dashboard;
pub use delete::Delete;
pub use home::Home;
pub use login::Login;
pub use manage::Manage;
pub use not_found::NotFound;
pub use register::Register;
pub use scan::Scan;
pub use scan_live::ScanLive;
pub use show::Show;
pub use signup::Signup;
