//! # Adjacency-List Graphs
//!
//! [`Graph`] stores a fixed set of vertices `0..n`, each owning a
//! [`SortedList`] of outgoing [`Edge`]s ordered by adjacent vertex. Degrees and
//! the edge count are maintained incrementally by every mutation and can be
//! recomputed from scratch with [`Graph::check_invariants`].
//!
//! Undirected graphs store each edge twice, once in each endpoint's list, and
//! count it once. Both records are inserted and removed together, and both
//! endpoints see the edge in their in- and out-degree.
//!
//! ```
//! use adjgraph::graph::Graph;
//!
//! let mut g = Graph::new(3, true, false);
//! assert_eq!(g.add_edge(0, 1), Ok(true));
//! assert_eq!(g.add_edge(0, 1), Ok(false)); // duplicate
//! assert_eq!(g.in_degree(1), Ok(1));
//! assert!(g.check_invariants());
//! ```

use std::cmp::Ordering;

use thiserror::Error;

use crate::{
    define_indexed_vec,
    instrumentation::Instrument,
    sorted_list::{Comparator, SortedList},
};

pub mod invariants;
pub mod random;

pub use invariants::InvariantViolation;

define_indexed_vec! {
    /// Id of a vertex, equal to its creation-order position.
    pub struct VertexIndex;

    /// Per-vertex data indexed by [`VertexIndex`].
    pub struct VertexVec;
}

/// Weight given to every edge of an unweighted graph.
pub const UNIT_WEIGHT: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    adjacent: VertexIndex,
    weight: f64,
}

impl Edge {
    pub fn new(adjacent: VertexIndex, weight: f64) -> Self {
        Edge { adjacent, weight }
    }

    pub fn adjacent(&self) -> VertexIndex {
        self.adjacent
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Orders edges by adjacent vertex, so a vertex cannot hold two edges to the
/// same neighbour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeOrder;

impl Comparator<Edge> for EdgeOrder {
    fn compare(&self, a: &Edge, b: &Edge) -> Ordering {
        a.adjacent.cmp(&b.adjacent)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    id: VertexIndex,
    in_degree: usize,
    out_degree: usize,
    edges: SortedList<Edge, EdgeOrder>,
}

impl Vertex {
    fn new(id: VertexIndex) -> Self {
        Vertex {
            id,
            in_degree: 0,
            out_degree: 0,
            edges: SortedList::new(),
        }
    }

    pub fn id(&self) -> VertexIndex {
        self.id
    }

    pub fn in_degree(&self) -> usize {
        self.in_degree
    }

    pub fn out_degree(&self) -> usize {
        self.out_degree
    }

    pub fn edges(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    fn find_edge(&self, to: VertexIndex) -> Option<&Edge> {
        let pos = self.edges.search_by(|e| e.adjacent.cmp(&to)).ok()?;
        self.edges.get(pos)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexOrder;

impl Comparator<Vertex> for VertexOrder {
    fn compare(&self, a: &Vertex, b: &Vertex) -> Ordering {
        a.id.cmp(&b.id)
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum GraphError {
    #[error("Vertex {vertex} out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange {
        vertex: VertexIndex,
        vertex_count: usize,
    },
    #[error("Self-loop on vertex {0} is not allowed")]
    SelfLoop(VertexIndex),
    #[error("Weighted edge added to an unweighted graph")]
    UnexpectedWeight,
    #[error("Unweighted edge added to a weighted graph")]
    MissingWeight,
    #[error("Operation requires a directed graph")]
    RequiresDirected,
    #[error("Operation requires an undirected graph")]
    RequiresUndirected,
    #[error("No edge {from} -> {to}")]
    MissingEdge { from: VertexIndex, to: VertexIndex },
}

/// Deserialized graphs go through [`Graph::validate`] and are rejected with
/// the first [`InvariantViolation`] found.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "UncheckedGraph"))]
pub struct Graph {
    directed: bool,
    weighted: bool,
    complete: bool,
    n_vertices: usize,
    n_edges: usize,
    vertices: SortedList<Vertex, VertexOrder>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedGraph {
    directed: bool,
    weighted: bool,
    complete: bool,
    n_vertices: usize,
    n_edges: usize,
    vertices: SortedList<Vertex, VertexOrder>,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedGraph> for Graph {
    type Error = InvariantViolation;

    fn try_from(raw: UncheckedGraph) -> Result<Self, Self::Error> {
        let graph = Graph {
            directed: raw.directed,
            weighted: raw.weighted,
            complete: raw.complete,
            n_vertices: raw.n_vertices,
            n_edges: raw.n_edges,
            vertices: raw.vertices,
        };
        graph.validate()?;
        Ok(graph)
    }
}

/// Number of edges of a complete graph on `vertex_count` vertices.
pub fn max_edges(vertex_count: usize, directed: bool) -> usize {
    let pairs = vertex_count * vertex_count.saturating_sub(1);
    if directed {
        pairs
    } else {
        pairs / 2
    }
}

impl Graph {
    /// A graph with vertices `0..vertex_count` and no edges.
    pub fn new(vertex_count: usize, is_directed: bool, is_weighted: bool) -> Self {
        let mut vertices = SortedList::with_capacity(vertex_count);
        for i in 0..vertex_count {
            // ids are fresh and increasing, the insert always lands at the end
            let _ = vertices.insert(Vertex::new(VertexIndex(i)));
        }

        Graph {
            directed: is_directed,
            weighted: is_weighted,
            complete: false,
            n_vertices: vertex_count,
            n_edges: 0,
            vertices,
        }
    }

    /// The unweighted graph with an edge between every pair of distinct
    /// vertices (every ordered pair when directed).
    pub fn complete(vertex_count: usize, is_directed: bool) -> Self {
        let mut g = Graph::new(vertex_count, is_directed, false);
        g.complete = true;

        let degree = vertex_count.saturating_sub(1);
        for vertex in g.vertices.iter_mut() {
            for j in (0..vertex_count).filter(|&j| j != vertex.id.0) {
                let _ = vertex.edges.insert(Edge::new(VertexIndex(j), UNIT_WEIGHT));
            }
            vertex.in_degree = degree;
            vertex.out_degree = degree;
        }
        g.n_edges = max_edges(vertex_count, is_directed);
        g
    }

    /// Deep copy preserving ids, degrees, the edge count, the flags and the
    /// edge ordering.
    pub fn copy(&self) -> Self {
        self.copy_instrumented(&mut ())
    }

    /// [`Graph::copy`], counting one vertex iteration per vertex and one edge
    /// iteration per edge copied.
    pub fn copy_instrumented(&self, instr: &mut impl Instrument) -> Self {
        let mut vertices = SortedList::with_capacity(self.n_vertices);
        for original in &self.vertices {
            instr.vertex_iter();
            let mut vertex = Vertex {
                id: original.id,
                in_degree: original.in_degree,
                out_degree: original.out_degree,
                edges: SortedList::with_capacity(original.edges.len()),
            };
            for edge in &original.edges {
                instr.edge_iter();
                let _ = vertex.edges.insert(*edge);
            }
            let _ = vertices.insert(vertex);
        }

        Graph {
            directed: self.directed,
            weighted: self.weighted,
            complete: self.complete,
            n_vertices: self.n_vertices,
            n_edges: self.n_edges,
            vertices,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn vertex_count(&self) -> usize {
        self.n_vertices
    }

    pub fn edge_count(&self) -> usize {
        self.n_edges
    }

    pub fn vertices(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    pub fn vertex(&self, v: impl Into<VertexIndex>) -> Result<&Vertex, GraphError> {
        let v = v.into();
        self.vertices.get(v.0).ok_or(GraphError::VertexOutOfRange {
            vertex: v,
            vertex_count: self.n_vertices,
        })
    }

    fn vertex_mut(&mut self, v: VertexIndex) -> Result<&mut Vertex, GraphError> {
        let vertex_count = self.n_vertices;
        self.vertices
            .get_mut(v.0)
            .ok_or(GraphError::VertexOutOfRange {
                vertex: v,
                vertex_count,
            })
    }

    fn require_directed(&self) -> Result<(), GraphError> {
        if self.directed {
            Ok(())
        } else {
            Err(GraphError::RequiresDirected)
        }
    }

    fn require_undirected(&self) -> Result<(), GraphError> {
        if self.directed {
            Err(GraphError::RequiresUndirected)
        } else {
            Ok(())
        }
    }

    /// Average vertex degree, `2E / V`. Undirected graphs only; an empty
    /// graph has average degree 0.
    pub fn average_degree(&self) -> Result<f64, GraphError> {
        self.require_undirected()?;
        if self.n_vertices == 0 {
            return Ok(0.0);
        }
        Ok(2.0 * self.n_edges as f64 / self.n_vertices as f64)
    }

    fn largest_out_degree(&self) -> usize {
        self.vertices
            .iter()
            .map(|v| v.out_degree)
            .max()
            .unwrap_or(0)
    }

    /// Undirected graphs only.
    pub fn max_degree(&self) -> Result<usize, GraphError> {
        self.require_undirected()?;
        Ok(self.largest_out_degree())
    }

    /// Directed graphs only.
    pub fn max_out_degree(&self) -> Result<usize, GraphError> {
        self.require_directed()?;
        Ok(self.largest_out_degree())
    }

    /// Degree of `v` in an undirected graph.
    pub fn degree(&self, v: impl Into<VertexIndex>) -> Result<usize, GraphError> {
        self.require_undirected()?;
        Ok(self.vertex(v)?.out_degree)
    }

    pub fn in_degree(&self, v: impl Into<VertexIndex>) -> Result<usize, GraphError> {
        Ok(self.vertex(v)?.in_degree)
    }

    pub fn out_degree(&self, v: impl Into<VertexIndex>) -> Result<usize, GraphError> {
        Ok(self.vertex(v)?.out_degree)
    }

    pub fn edges(
        &self,
        v: impl Into<VertexIndex>,
    ) -> Result<std::slice::Iter<'_, Edge>, GraphError> {
        Ok(self.vertex(v)?.edges())
    }

    /// Neighbours of `v` in increasing id order.
    pub fn adjacents(&self, v: impl Into<VertexIndex>) -> Result<Vec<VertexIndex>, GraphError> {
        Ok(self.edges(v)?.map(Edge::adjacent).collect())
    }

    /// Weights of the edges leaving `v`, in the order of [`Graph::adjacents`].
    pub fn distances_to_adjacents(
        &self,
        v: impl Into<VertexIndex>,
    ) -> Result<Vec<f64>, GraphError> {
        Ok(self.edges(v)?.map(Edge::weight).collect())
    }

    pub fn has_edge(&self, v: impl Into<VertexIndex>, w: impl Into<VertexIndex>) -> bool {
        let w = w.into();
        self.vertex(v)
            .map(|vertex| vertex.find_edge(w).is_some())
            .unwrap_or(false)
    }

    pub fn edge_weight(&self, v: impl Into<VertexIndex>, w: impl Into<VertexIndex>) -> Option<f64> {
        let w = w.into();
        self.vertex(v).ok()?.find_edge(w).map(Edge::weight)
    }

    fn check_endpoints(&self, v: VertexIndex, w: VertexIndex) -> Result<(), GraphError> {
        for vertex in [v, w] {
            if vertex.0 >= self.n_vertices {
                return Err(GraphError::VertexOutOfRange {
                    vertex,
                    vertex_count: self.n_vertices,
                });
            }
        }
        if v == w {
            return Err(GraphError::SelfLoop(v));
        }
        Ok(())
    }

    /// Adds the edge `v -> w` (and `w -> v` when undirected) to an unweighted
    /// graph.
    ///
    /// Returns `Ok(false)` without touching the graph if the edge already
    /// exists.
    pub fn add_edge(
        &mut self,
        v: impl Into<VertexIndex>,
        w: impl Into<VertexIndex>,
    ) -> Result<bool, GraphError> {
        if self.weighted {
            return Err(GraphError::MissingWeight);
        }
        self.insert_edge(v.into(), w.into(), UNIT_WEIGHT)
    }

    /// [`Graph::add_edge`] for weighted graphs.
    pub fn add_weighted_edge(
        &mut self,
        v: impl Into<VertexIndex>,
        w: impl Into<VertexIndex>,
        weight: f64,
    ) -> Result<bool, GraphError> {
        if !self.weighted {
            return Err(GraphError::UnexpectedWeight);
        }
        self.insert_edge(v.into(), w.into(), weight)
    }

    fn insert_edge(
        &mut self,
        v: VertexIndex,
        w: VertexIndex,
        weight: f64,
    ) -> Result<bool, GraphError> {
        self.check_endpoints(v, w)?;
        if self.has_edge(v, w) || (!self.directed && self.has_edge(w, v)) {
            return Ok(false);
        }

        self.attach(v, w, weight)?;
        if !self.directed {
            self.attach(w, v, weight)?;
        }
        self.n_edges += 1;
        Ok(true)
    }

    fn attach(&mut self, v: VertexIndex, w: VertexIndex, weight: f64) -> Result<(), GraphError> {
        let vertex = self.vertex_mut(v)?;
        if vertex.edges.insert(Edge::new(w, weight)).is_ok() {
            vertex.out_degree += 1;
            self.vertex_mut(w)?.in_degree += 1;
        }
        Ok(())
    }

    /// Removes the edge `v -> w` (and its mirror when undirected).
    ///
    /// A missing edge is reported as [`GraphError::MissingEdge`] and leaves
    /// the graph untouched.
    pub fn remove_edge(
        &mut self,
        v: impl Into<VertexIndex>,
        w: impl Into<VertexIndex>,
    ) -> Result<(), GraphError> {
        let (v, w) = (v.into(), w.into());
        self.check_endpoints(v, w)?;
        if !self.has_edge(v, w) {
            return Err(GraphError::MissingEdge { from: v, to: w });
        }
        if !self.directed && !self.has_edge(w, v) {
            return Err(GraphError::MissingEdge { from: w, to: v });
        }

        self.detach(v, w)?;
        if !self.directed {
            self.detach(w, v)?;
        }
        self.n_edges -= 1;
        Ok(())
    }

    fn detach(&mut self, v: VertexIndex, w: VertexIndex) -> Result<Edge, GraphError> {
        let vertex = self.vertex_mut(v)?;
        let edge = vertex
            .edges
            .remove_by(|e| e.adjacent.cmp(&w))
            .ok_or(GraphError::MissingEdge { from: v, to: w })?;
        vertex.out_degree -= 1;
        self.vertex_mut(w)?.in_degree -= 1;
        Ok(edge)
    }
}

#[cfg(test)]
mod tests;
