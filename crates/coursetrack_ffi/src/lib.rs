//! FFI crate exposing the course core to the Flutter app.

pub mod api;
