//! Core business logic layer
//!
//! Catalogue data structures and the network seam shared by the scraper and
//! the download manager.

pub mod catalogue;
pub mod traits;
