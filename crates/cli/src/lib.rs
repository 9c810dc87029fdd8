//! Terminal client for the bookstore catalogue.
//!
//! [`api`] speaks to the `/api/books` endpoints; [`views`] holds the state
//! of the catalogue and home screens and renders them as text.

pub mod api;
pub mod views;

/// Where the client looks for the API unless told otherwise.
pub const DEFAULT_API_URL: &str = "http://localhost:5009/api";
