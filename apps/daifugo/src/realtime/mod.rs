//! Best-effort fan-out of room changes to observers.

pub mod hub;
pub mod protocol;
