//! Deserialization helpers for backend payloads and local data files
//!
//! Backend payloads are parsed strictly: a record that fails to deserialize turns the
//! whole response into a malformed-response error instead of being silently dropped.
//! The places dataset is a local convenience file and is loaded with `anyhow` context.

pub mod deserializers;
pub mod places;

pub use places::load_places;
