//! Shared types and configuration for Vestra.
//!
//! This crate provides the primitives every other crate builds on:
//! - Money conversion between decimals and integer minor units
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
