//! FRASS web front end.
//!
//! Browser client for the Face Recognition Attendance & Student System:
//! - Page routing with an authentication gate and browser history sync
//! - Student registration, listing and deletion forms
//! - Face matching from an uploaded photo or the live camera
//! - A small native host that serves the bundle and forwards `/api/*`

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus UI app (browser)
pub mod app;

// Platform-independent core, unit tested natively
pub mod api;
pub mod camera;
pub mod forms;
pub mod nav;
pub mod roster;
pub mod validate;

// Server-only modules (excluded from WASM build)
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod host;
