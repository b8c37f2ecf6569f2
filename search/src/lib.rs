//! K* search: the k shortest source → target paths of a weighted directed
//! multigraph, produced one at a time in non-decreasing cost.
//!
//! The graph is never materialized. An incremental A* grows a shortest-path
//! tree from the source on demand; every examined edge that is not a tree
//! edge is a *sidetrack*, and each path corresponds to a sequence of
//! sidetracks. The sidetracks are organized in heaps over the tree (the
//! *path graph*), and a best-first walk over that structure yields the
//! sidetrack sequences cheapest first.
//!
//! # Crate dependency graph
//!
//! ```text
//! kstar_search  ←  kstar_harness  ←  lock_tests, kstar_benchmarks
//! (algorithm)      (graphs, files, reports)
//! ```
//!
//! # Key types
//!
//! - [`Graph`]: the capability a caller implements
//! - [`KStar`]: iterator over paths; [`run`] takes the first k
//! - [`KStarPolicy`]: growth factor, loop filter, step budget
//! - [`SearchTree`]: the pausable A* tree
//! - [`PathGraph`]: `Hin`/`Ht` sidetrack heaps
//! - [`Enumerator`]: best-first walk with step/resume control

#![forbid(unsafe_code)]

pub mod assemble;
pub mod astar;
pub mod contract;
pub mod enumerator;
pub mod error;
pub mod heap;
pub mod kstar;
pub mod node;
pub mod path_graph;
pub mod policy;

#[cfg(test)]
mod test_graph;

pub use astar::{GrowthOutcome, SearchTree};
pub use contract::{EdgeGroup, Graph};
pub use enumerator::{Deviation, Enumerator, Transition};
pub use error::KStarError;
pub use kstar::{run, KStar};
pub use node::{Cost, Edge, NodeId, Path};
pub use path_graph::{PathGraph, PathGraphNode};
pub use policy::KStarPolicy;
