//! Core types shared across CapTrack facilities
//!
//! This crate provides the canonical schema constants used by both the
//! error facility and the logging facility: structured field keys and
//! lifecycle event names.

pub mod schema;
