//! Command handlers

pub mod config;
pub mod entry;
pub mod serve;
pub mod status;
