//! Command handlers.

pub mod scaffold;
