//! Entity row structs and their create/update/filter DTOs.

pub mod proposal;
pub mod subtask;
pub mod task;
pub mod user;
