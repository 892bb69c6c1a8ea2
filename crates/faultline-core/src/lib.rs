//! Structured HTTP failures for Faultline
//!
//! [`DomainError`] carries a status code and a message from the point a
//! failure is detected up to the boundary that renders it. [`HttpError`] is
//! the capability the boundary relies on to build a response.

#![allow(clippy::must_use_candidate)]

mod domain;
mod error;

pub use domain::{BoxError, DomainError, InvalidStatusCode};
pub use error::HttpError;
