#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! dimlog — shop-floor dimensional measurement entry.
//!
//! One record at a time: a traceability code, an inspector name, and two
//! groups of four dimensional readings. Records are cached in a single-slot
//! snapshot file and submitted to the QC server over HTTP on explicit
//! confirmation.

pub mod config;
pub mod logging;
pub mod model;
pub mod remote;
pub mod storage;
pub mod tui;
