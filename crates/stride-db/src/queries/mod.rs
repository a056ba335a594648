//! Row-level queries, one module per entity.

pub mod conversations;
pub mod goals;
pub mod sessions;
pub mod sprints;
pub mod tasks;
pub mod users;
