//! K* harness: caller-side collaborators for the search crate.
//!
//! The harness supplies concrete graphs and result handling around
//! `kstar_search`; it never reaches into the search internals.
//!
//! - [`memory::MemoryGraph`]: in-memory multigraph implementing `Graph`
//! - [`graph_file`]: `.graph` / `.in` text loaders
//! - [`report`]: JSON path reports and golden comparison
//! - [`digest`]: domain-separated SHA-256 of a report
//! - [`runner`]: one case or a whole case file to reports

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod digest;
pub mod graph_file;
pub mod memory;
pub mod report;
pub mod runner;
