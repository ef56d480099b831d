//! Domain model and view-state logic for the movie discovery app.
//!
//! Nothing here performs I/O directly: the controllers talk to a
//! [`catalog::MovieCatalog`] and the server crate decides how to render.

pub mod catalog;
pub mod detail;
pub mod display;
pub mod error;
pub mod fetch;
pub mod gate;
pub mod list;
pub mod movie;
pub mod session;
pub mod suggestion;

#[cfg(test)]
mod testing;
