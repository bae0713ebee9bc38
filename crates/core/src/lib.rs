//! Domain core for the Hookforge gallery.
//!
//! Holds everything that does not need a database or an HTTP stack: shared
//! types, the error taxonomy, the category matcher, the rate limiter, and the
//! [`service::GalleryService`] that orchestrates them over the
//! [`repository::GalleryRepository`] contract.

pub mod category;
pub mod error;
pub mod gallery;
pub mod hashing;
pub mod rate_limit;
pub mod repository;
pub mod service;
pub mod types;
