//! Canonical hashing of path reports.
//!
//! A report digest is SHA-256 over a domain prefix followed by a fixed
//! binary encoding of the report, so it is independent of JSON formatting
//! and stable across processes and platforms.
//!
//! Encoding (all integers `u64` little-endian):
//!
//! ```text
//! name length, name bytes (UTF-8), path count,
//! per path: edge count, per edge (tail, head, index), cost as IEEE 754 bits
//! ```

use sha2::{Digest, Sha256};

use crate::report::PathReport;

/// Domain prefix for path report digests. Null-terminated.
pub const DOMAIN_PATH_REPORT: &[u8] = b"KSTAR::PATH_REPORT::V1\0";

/// SHA-256 of `domain || data`, as `"sha256:<hex>"`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

fn put_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_len(out: &mut Vec<u8>, len: usize) {
    put_u64(out, len as u64);
}

/// The canonical byte encoding of a report.
#[must_use]
pub fn report_bytes(report: &PathReport) -> Vec<u8> {
    let mut out = Vec::new();
    put_len(&mut out, report.name.len());
    out.extend_from_slice(report.name.as_bytes());
    put_len(&mut out, report.paths.len());
    for path in &report.paths {
        put_len(&mut out, path.edges.len());
        for edge in &path.edges {
            put_u64(&mut out, edge.tail);
            put_u64(&mut out, edge.head);
            put_len(&mut out, edge.index);
        }
        put_u64(&mut out, path.cost.to_bits());
    }
    out
}

/// Digest of a report under [`DOMAIN_PATH_REPORT`].
#[must_use]
pub fn report_digest(report: &PathReport) -> String {
    canonical_hash(DOMAIN_PATH_REPORT, &report_bytes(report))
}
