//! core
//!
//! Core domain types and configuration for committag.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid, ImageName, StatusCode, TagRef
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing

pub mod config;
pub mod types;
