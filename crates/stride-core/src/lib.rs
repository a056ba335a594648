//! Stride Core Library
//!
//! Domain models and business logic for the Stride planning backend.

pub mod assist;
pub mod conversation;
pub mod error;
pub mod goal;
pub mod sprint;
pub mod task;
pub mod user;

pub use error::{StrideError, StrideResult};
