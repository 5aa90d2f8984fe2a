//! Console rendering of graphs and topological orders.
//!
//! Everything here only reads the public query API.

use std::fmt;

use itertools::Itertools;

use crate::{
    algorithms::TopoSortResult,
    graph::{Graph, GraphError, VertexIndex},
};

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---")?;
        if self.is_weighted() {
            write!(f, "Weighted ")?;
        }
        if self.is_complete() {
            write!(f, "COMPLETE ")?;
        }

        let max_degree = self.vertices().map(|v| v.out_degree()).max().unwrap_or(0);
        if self.is_directed() {
            writeln!(f, "Digraph")?;
            writeln!(f, "Max Out-Degree = {max_degree}")?;
        } else {
            writeln!(f, "Graph")?;
            writeln!(f, "Max Degree = {max_degree}")?;
        }
        writeln!(
            f,
            "Vertices = {:2} | Edges = {:2}",
            self.vertex_count(),
            self.edge_count()
        )?;

        for vertex in self.vertices() {
            write!(f, "{:2} ->", vertex.id().0)?;
            for edge in vertex.edges() {
                if self.is_weighted() {
                    write!(f, "   {:2}({:4.2})", edge.adjacent().0, edge.weight())?;
                } else {
                    write!(f, "   {:2}", edge.adjacent().0)?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "---")
    }
}

/// Neighbour summary of one vertex, see [`Graph::adjacents_display`].
pub struct AdjacentsDisplay {
    vertex: VertexIndex,
    adjacents: Vec<VertexIndex>,
}

impl fmt::Display for AdjacentsDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---")?;
        writeln!(
            f,
            "Vertex {} has {} adjacent vertices -> {}",
            self.vertex,
            self.adjacents.len(),
            self.adjacents.iter().join(" ")
        )?;
        writeln!(f, "---")
    }
}

impl Graph {
    pub fn adjacents_display(
        &self,
        v: impl Into<VertexIndex>,
    ) -> Result<AdjacentsDisplay, GraphError> {
        let vertex = v.into();
        Ok(AdjacentsDisplay {
            vertex,
            adjacents: self.adjacents(vertex)?,
        })
    }
}

/// A topological order followed by the adjacency lists of the vertices in
/// that order.
pub struct TopoSortDisplay<'a> {
    result: &'a TopoSortResult,
    graph: &'a Graph,
}

impl TopoSortResult {
    /// Renders just the order (or the failure notice).
    pub fn sequence_display(&self) -> String {
        match self.sequence() {
            Some(sequence) => format!(
                "Topological Sorting - Vertex indices:\n{}\n",
                sequence.iter().join(" ")
            ),
            None => "*** The topological sorting could not be computed!! ***\n".to_string(),
        }
    }

    /// `graph` must be the graph the result was computed from.
    pub fn display<'a>(&'a self, graph: &'a Graph) -> TopoSortDisplay<'a> {
        TopoSortDisplay {
            result: self,
            graph,
        }
    }
}

impl fmt::Display for TopoSortDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.result.sequence_display())?;

        let Some(sequence) = self.result.sequence() else {
            return Ok(());
        };
        for &v in sequence {
            let adjacents = self.graph.adjacents_display(v).map_err(|_| fmt::Error)?;
            write!(f, "{adjacents}")?;
        }
        writeln!(f)
    }
}
