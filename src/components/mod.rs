//! UI components.

pub mod commit_graph;
