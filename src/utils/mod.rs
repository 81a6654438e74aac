//! Utility modules for the SUS Digital API

pub mod error;
