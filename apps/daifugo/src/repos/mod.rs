//! Repository traits for the room layer.

pub mod rooms;
