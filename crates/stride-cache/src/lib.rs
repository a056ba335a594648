//! Stride Cache Layer
//!
//! Optional Redis side-channel. The cache is strictly best-effort: when the
//! URL is unset or the connection fails, every operation degrades to a no-op
//! and callers fall back to the primary store. A cache failure never
//! propagates past this crate's boundary.

pub mod client;

pub use client::{Cache, CacheStatus};
