//! Core types and trait definitions for the gloomy feed backend.
//!
//! Records, the author and lifecycle rules they obey, and the persistence
//! traits a backend implements. No HTTP or database dependencies.

pub mod author;
pub mod comment;
pub mod entity;
pub mod error;
pub mod feed;
pub mod lifecycle;
pub mod notice;
pub mod page;
pub mod reply;
pub mod store;
pub mod user;

pub use error::{Error, Result};
