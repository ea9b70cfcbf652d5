//! Configuration and platform wire models

pub mod config;
pub mod models;
