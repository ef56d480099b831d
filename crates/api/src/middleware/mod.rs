//! Request extractors.
//!
//! - [`auth::CurrentSession`] -- the optional session.
//! - [`auth::RequireSession`] -- requires a signed-in visitor (API routes).
//! - [`auth::PageGate`] -- the resolved page gate (HTML routes).

pub mod auth;
