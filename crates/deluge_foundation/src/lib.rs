//! Core identifiers and error types for Deluge.
//!
//! This crate provides:
//! - [`EntityId`] - Plain integer entity identities
//! - [`ComponentTypeId`] - Dense per-type identifiers assigned on registration
//! - [`Error`] - Error kinds for presence and layout failures

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;

pub use entity::{ComponentTypeId, EntityId};
pub use error::{Error, ErrorContext, ErrorKind, Result};
