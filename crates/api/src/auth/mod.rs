//! Authentication primitives.
//!
//! - [`jwt`] -- session token generation and validation.
//! - [`session`] -- the session gateway pages and handlers resolve identity through.
//! - [`provider`] -- OAuth identity provider (Google).
//! - [`cookies`] -- cookie parsing and `Set-Cookie` builders.
//! - [`redirect`] -- post-sign-in redirect resolution.

pub mod cookies;
pub mod jwt;
pub mod provider;
pub mod redirect;
pub mod session;
