//! Command implementations.

pub mod pack;
pub mod unpack;
