use thiserror::Error;

use super::{max_edges, Graph, VertexIndex, VertexVec};

/// First inconsistency found by [`Graph::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("Graph declares {declared} vertices but stores {stored}")]
    VertexCount { declared: usize, stored: usize },
    #[error("Vertex at position {position} has id {id}")]
    VertexId { position: usize, id: VertexIndex },
    #[error("Vertex {vertex} has edge to {adjacent}, which does not exist")]
    DanglingEdge {
        vertex: VertexIndex,
        adjacent: VertexIndex,
    },
    #[error("Vertex {0} has a self-loop")]
    SelfLoop(VertexIndex),
    #[error("Edges of vertex {0} are not strictly ordered by adjacent vertex")]
    UnorderedEdges(VertexIndex),
    #[error("Vertex {vertex} records out-degree {recorded} but has {actual} edges")]
    OutDegree {
        vertex: VertexIndex,
        recorded: usize,
        actual: usize,
    },
    #[error("Vertex {vertex} records in-degree {recorded} but has {actual} incoming edges")]
    InDegree {
        vertex: VertexIndex,
        recorded: usize,
        actual: usize,
    },
    #[error("Undirected edge {from} -> {to} has no mirror")]
    MissingMirror { from: VertexIndex, to: VertexIndex },
    #[error("Degree sums (in {in_sum}, out {out_sum}) do not match {edges} edges")]
    DegreeSum {
        in_sum: usize,
        out_sum: usize,
        edges: usize,
    },
    #[error("Complete graph has {edges} edges, expected {expected}")]
    CompleteEdgeCount { edges: usize, expected: usize },
    #[error("Graph not marked complete has {edges} edges, the maximum is {max}")]
    TooManyEdges { edges: usize, max: usize },
}

impl Graph {
    /// Recomputes degrees and sums from the edge lists and compares them with
    /// the recorded bookkeeping.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.n_vertices != self.vertices.len() {
            return Err(InvariantViolation::VertexCount {
                declared: self.n_vertices,
                stored: self.vertices.len(),
            });
        }

        let mut incoming = VertexVec::from_fn(self.n_vertices, |_| 0usize);
        let mut in_sum = 0;
        let mut out_sum = 0;

        for (position, vertex) in self.vertices.iter().enumerate() {
            if vertex.id.0 != position {
                return Err(InvariantViolation::VertexId {
                    position,
                    id: vertex.id,
                });
            }
            if !vertex.edges.is_strictly_sorted() {
                return Err(InvariantViolation::UnorderedEdges(vertex.id));
            }
            if vertex.out_degree != vertex.edges.len() {
                return Err(InvariantViolation::OutDegree {
                    vertex: vertex.id,
                    recorded: vertex.out_degree,
                    actual: vertex.edges.len(),
                });
            }

            for edge in &vertex.edges {
                let Some(count) = incoming.get_mut(edge.adjacent) else {
                    return Err(InvariantViolation::DanglingEdge {
                        vertex: vertex.id,
                        adjacent: edge.adjacent,
                    });
                };
                if edge.adjacent == vertex.id {
                    return Err(InvariantViolation::SelfLoop(vertex.id));
                }
                *count += 1;

                if !self.directed && !self.has_edge(edge.adjacent, vertex.id) {
                    return Err(InvariantViolation::MissingMirror {
                        from: vertex.id,
                        to: edge.adjacent,
                    });
                }
            }

            in_sum += vertex.in_degree;
            out_sum += vertex.out_degree;
        }

        for vertex in &self.vertices {
            let actual = incoming[vertex.id];
            if vertex.in_degree != actual {
                return Err(InvariantViolation::InDegree {
                    vertex: vertex.id,
                    recorded: vertex.in_degree,
                    actual,
                });
            }
        }

        let expected_sum = if self.directed {
            self.n_edges
        } else {
            2 * self.n_edges
        };
        if in_sum != out_sum || out_sum != expected_sum {
            return Err(InvariantViolation::DegreeSum {
                in_sum,
                out_sum,
                edges: self.n_edges,
            });
        }

        let max = max_edges(self.n_vertices, self.directed);
        if self.complete {
            if self.n_edges != max {
                return Err(InvariantViolation::CompleteEdgeCount {
                    edges: self.n_edges,
                    expected: max,
                });
            }
        } else if max > 0 && self.n_edges >= max {
            return Err(InvariantViolation::TooManyEdges {
                edges: self.n_edges,
                max,
            });
        }

        Ok(())
    }

    /// `true` iff [`Graph::validate`] finds nothing wrong.
    pub fn check_invariants(&self) -> bool {
        self.validate().is_ok()
    }
}
