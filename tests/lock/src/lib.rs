//! Shared helpers for the lock tests and the fixture binary.

#![forbid(unsafe_code)]

pub mod fixture_helpers;
