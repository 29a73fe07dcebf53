//! Data ingestion layer for the exam schedule converter.
//!
//! Reads exported schedule sheets, classifies each row, merges overflow rows
//! into the open course and writes the resulting schedule as JSON.

pub mod aggregator;
pub mod classifier;
pub mod convert;
pub mod merger;
pub mod reader;
pub mod writer;

pub use schedule_core as core;
