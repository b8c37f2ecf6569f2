//! Text formats for test graphs and k-cases.
//!
//! # Graph file (`.graph`)
//!
//! One record per line, fields separated by whitespace:
//!
//! ```text
//! c <anything>                          comment
//! p <name> <nodes> <source> <target>    problem line (exactly one)
//! h <node> <estimate>                   heuristic estimate to the target
//! e <tail> <head> <cost>                edge; repeats create parallel edges
//! ```
//!
//! Blank lines are ignored. Records may appear in any order; node ids must be
//! below the declared node count.
//!
//! # Case file (`.in`)
//!
//! Lines `k <n>`, each naming a case `<graph name>.<n>` that asks for the
//! first `n` paths.

use std::path::{Path, PathBuf};

use kstar_search::{Cost, NodeId};
use thiserror::Error;

use crate::memory::MemoryGraph;

/// Error loading a graph or case file.
#[derive(Debug, Error)]
pub enum GraphFileError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no problem line")]
    MissingProblem,
    #[error("line {line}: {detail}")]
    Malformed { line: usize, detail: String },
    #[error("line {line}: edge cost {cost} is not positive and finite")]
    InvalidCost { line: usize, cost: Cost },
}

/// A parsed graph file.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphFile {
    pub name: String,
    pub node_count: u64,
    pub graph: MemoryGraph,
}

/// One k-case from a case file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    /// `<graph name>.<k>`
    pub name: String,
    pub k: usize,
}

struct Problem {
    line: usize,
    name: String,
    node_count: u64,
    source: NodeId,
    target: NodeId,
}

fn malformed(line: usize, detail: impl Into<String>) -> GraphFileError {
    GraphFileError::Malformed {
        line,
        detail: detail.into(),
    }
}

fn field<T: std::str::FromStr>(fields: &[&str], at: usize, what: &str, line: usize) -> Result<T, GraphFileError> {
    let raw = fields
        .get(at)
        .ok_or_else(|| malformed(line, format!("missing {what}")))?;
    raw.parse()
        .map_err(|_| malformed(line, format!("invalid {what} `{raw}`")))
}

fn expect_arity(fields: &[&str], arity: usize, line: usize) -> Result<(), GraphFileError> {
    if fields.len() == arity {
        Ok(())
    } else {
        Err(malformed(
            line,
            format!("`{}` record takes {} fields, found {}", fields[0], arity - 1, fields.len() - 1),
        ))
    }
}

/// Parse the contents of a graph file.
///
/// # Errors
///
/// Returns [`GraphFileError`] for a missing or repeated problem line, an
/// unknown record, a bad field, a node id out of range, or a cost that is
/// not positive and finite.
pub fn parse_graph(text: &str) -> Result<GraphFile, GraphFileError> {
    let mut problem: Option<Problem> = None;
    let mut edges: Vec<(usize, NodeId, NodeId, Cost)> = Vec::new();
    let mut heuristics: Vec<(usize, NodeId, Cost)> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let fields: Vec<&str> = raw.split_whitespace().collect();
        let Some(&mark) = fields.first() else {
            continue;
        };
        match mark {
            "c" => {}
            "p" => {
                expect_arity(&fields, 5, line)?;
                if problem.is_some() {
                    return Err(malformed(line, "second problem line"));
                }
                problem = Some(Problem {
                    line,
                    name: fields[1].to_string(),
                    node_count: field(&fields, 2, "node count", line)?,
                    source: field(&fields, 3, "source", line)?,
                    target: field(&fields, 4, "target", line)?,
                });
            }
            "h" => {
                expect_arity(&fields, 3, line)?;
                heuristics.push((
                    line,
                    field(&fields, 1, "node", line)?,
                    field(&fields, 2, "estimate", line)?,
                ));
            }
            "e" => {
                expect_arity(&fields, 4, line)?;
                let cost: Cost = field(&fields, 3, "cost", line)?;
                if !(cost.is_finite() && cost > 0.0) {
                    return Err(GraphFileError::InvalidCost { line, cost });
                }
                edges.push((
                    line,
                    field(&fields, 1, "tail", line)?,
                    field(&fields, 2, "head", line)?,
                    cost,
                ));
            }
            other => return Err(malformed(line, format!("unknown record `{other}`"))),
        }
    }

    let problem = problem.ok_or(GraphFileError::MissingProblem)?;
    let in_range = |line: usize, node: NodeId| {
        if node < problem.node_count {
            Ok(())
        } else {
            Err(malformed(
                line,
                format!("node {node} outside 0..{}", problem.node_count),
            ))
        }
    };

    in_range(problem.line, problem.source)?;
    in_range(problem.line, problem.target)?;
    let mut graph = MemoryGraph::new(problem.source, problem.target);
    for (line, node, estimate) in heuristics {
        in_range(line, node)?;
        if !(estimate.is_finite() && estimate >= 0.0) {
            return Err(malformed(line, format!("heuristic {estimate} is negative or not finite")));
        }
        graph.set_heuristic(node, estimate);
    }
    for (line, tail, head, cost) in edges {
        in_range(line, tail)?;
        in_range(line, head)?;
        graph.add_edge(tail, head, cost);
    }

    Ok(GraphFile {
        name: problem.name,
        node_count: problem.node_count,
        graph,
    })
}

/// Read and parse a graph file.
///
/// # Errors
///
/// See [`parse_graph`]; also [`GraphFileError::Io`].
pub fn load_graph(path: &Path) -> Result<GraphFile, GraphFileError> {
    parse_graph(&read(path)?)
}

/// Parse the contents of a case file for the graph named `graph_name`.
///
/// # Errors
///
/// Returns [`GraphFileError::Malformed`] for an unknown record or a bad `k`.
pub fn parse_cases(text: &str, graph_name: &str) -> Result<Vec<Case>, GraphFileError> {
    let mut cases = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let fields: Vec<&str> = raw.split_whitespace().collect();
        match fields.first() {
            None | Some(&"c") => {}
            Some(&"k") => {
                expect_arity(&fields, 2, line)?;
                let k: usize = field(&fields, 1, "k", line)?;
                cases.push(Case {
                    name: format!("{graph_name}.{k}"),
                    k,
                });
            }
            Some(other) => return Err(malformed(line, format!("unknown record `{other}`"))),
        }
    }
    Ok(cases)
}

/// Read and parse a case file.
///
/// # Errors
///
/// See [`parse_cases`]; also [`GraphFileError::Io`].
pub fn load_cases(path: &Path, graph_name: &str) -> Result<Vec<Case>, GraphFileError> {
    parse_cases(&read(path)?, graph_name)
}

fn read(path: &Path) -> Result<String, GraphFileError> {
    std::fs::read_to_string(path).map_err(|source| GraphFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}
