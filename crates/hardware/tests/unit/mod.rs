//! # Unit Components
//!
//! This module serves as the central hub for the controller's unit tests.


/// Unit tests for configuration records, variants, and JSON loading.
pub mod config;
