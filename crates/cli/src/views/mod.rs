//! Screen state for the client, one struct per view.

pub mod catalogue;
pub mod home;

pub use catalogue::{BookDraft, CatalogueView, DraftField};
pub use home::{HomeView, SignupForm};
