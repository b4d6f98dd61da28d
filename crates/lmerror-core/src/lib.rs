//! Structured error values
//!
//! An [`ErrorValue`] carries a validated message/code pair, an optional
//! snapshot of the HTTP response that triggered it, an optional previous error
//! and its creation time. It renders to a stable multi-line text form and
//! exports to JSON.

#![allow(clippy::must_use_candidate)]

mod descriptor;
mod error;
mod export;
pub mod input;
mod patterns;
pub mod render;
mod response;
mod value;

pub use descriptor::ErrorDescriptor;
pub use error::{DescribedError, Error, Result};
pub use input::ForeignError;
pub use patterns::{DEFAULT_CODE_PATTERN, DEFAULT_MESSAGE_PATTERN, DEFAULT_STATUS_CODE_PATTERN, Patterns};
pub use response::{HeaderEntry, ResponseSnapshot};
pub use value::{ErrorValue, Previous};
