//! Background Tasks Module
//!
//! Detached tasks spawned during request handling.

mod refresh;

pub use refresh::spawn_refresh;
