//! # adjgraph
//!
//! adjgraph is a small library for directed and undirected graphs stored as
//! adjacency lists. Its primary focus is on keeping the degree bookkeeping of
//! the graph exact under edge insertion and removal, and on comparing three
//! topological sorting strategies on the same representation.
//!
//! ```
//! use adjgraph::{graph, algorithms::TopoAlgorithm};
//!
//! let g = graph!(1 0 4 4  0 1  0 2  1 3  2 3).unwrap();
//! for algorithm in TopoAlgorithm::ALL {
//!     let order = g.topo_sort(algorithm).unwrap();
//!     assert_eq!(order.sequence().map(<[_]>::len), Some(4));
//! }
//! ```

pub mod typed_vec;

pub mod algorithms;
pub mod display;
pub mod graph;
pub mod instrumentation;
pub mod parser;
pub mod sorted_list;

pub use algorithms::{TopoAlgorithm, TopoSortResult};
pub use graph::{Graph, GraphError, VertexIndex};
