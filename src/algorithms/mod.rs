//! # Graph Algorithms
//!
//! ## Available Algorithms
//!
//! ### Topological Operations
//! - [`topological_order`]: three Kahn-style topological sorts sharing one
//!   result type. They differ in how they find the next vertex without
//!   pending predecessors:
//!   - [`TopoAlgorithm::CopyScan`]: repeated scans over a private copy of the
//!     graph whose edges are removed as vertices are placed;
//!   - [`TopoAlgorithm::Scan`]: the same scans over the original graph, with
//!     removals tracked in a pending in-degree array;
//!   - [`TopoAlgorithm::Kahn`]: a FIFO queue of ready vertices, `O(V + E)`.
//!
//! The scans always take the smallest ready id; Kahn seeds its queue in
//! ascending id order and then follows it. Every order is deterministic.

pub mod topological_order;

pub use topological_order::{TopoAlgorithm, TopoError, TopoSortResult, UnknownAlgorithm};
