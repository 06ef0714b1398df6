//! Infrastructure layer: in-process room storage.

pub mod room_store;
