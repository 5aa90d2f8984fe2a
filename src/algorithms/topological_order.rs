use std::{collections::VecDeque, fmt, str::FromStr};

use bitvec::{bitvec, vec::BitVec};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    graph::{Graph, GraphError, VertexIndex, VertexVec},
    instrumentation::Instrument,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopoError {
    #[error("Not a DAG: {placed} vertices placed out of {total} total vertices. Remaining vertices with non-zero in-degrees: {remaining:?}")]
    NotDag {
        placed: usize,
        total: usize,
        remaining: Vec<(VertexIndex, usize)>,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown topological sort algorithm {0:?}, expected v1, v2 or v3")]
pub struct UnknownAlgorithm(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TopoAlgorithm {
    /// V1: repeated scans over a copy of the graph, removing the edges of
    /// each placed vertex from the copy.
    CopyScan,
    /// V2: repeated scans over the graph itself, decrementing pending
    /// in-degrees instead of removing edges.
    Scan,
    /// V3: Kahn's algorithm with a FIFO queue of ready vertices.
    Kahn,
}

impl TopoAlgorithm {
    pub const ALL: [TopoAlgorithm; 3] = [
        TopoAlgorithm::CopyScan,
        TopoAlgorithm::Scan,
        TopoAlgorithm::Kahn,
    ];

    pub fn short_name(self) -> &'static str {
        match self {
            TopoAlgorithm::CopyScan => "v1",
            TopoAlgorithm::Scan => "v2",
            TopoAlgorithm::Kahn => "v3",
        }
    }
}

impl fmt::Display for TopoAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TopoAlgorithm::CopyScan => "copy-scan",
            TopoAlgorithm::Scan => "scan",
            TopoAlgorithm::Kahn => "kahn",
        };
        write!(f, "{} ({})", self.short_name(), name)
    }
}

impl FromStr for TopoAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" | "copy-scan" => Ok(TopoAlgorithm::CopyScan),
            "v2" | "2" | "scan" => Ok(TopoAlgorithm::Scan),
            "v3" | "3" | "kahn" | "queue" => Ok(TopoAlgorithm::Kahn),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Outcome of a topological sort.
///
/// When the graph has a cycle the result is invalid and only the prefix of
/// vertices placed before the sort got stuck is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopoSortResult {
    algorithm: TopoAlgorithm,
    valid: bool,
    vertex_count: usize,
    sequence: Vec<VertexIndex>,
    remaining: Vec<(VertexIndex, usize)>,
}

impl TopoSortResult {
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn algorithm(&self) -> TopoAlgorithm {
        self.algorithm
    }

    /// Number of vertices of the graph the result was computed from.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// The full order, or `None` if the graph has a cycle.
    pub fn sequence(&self) -> Option<&[VertexIndex]> {
        self.valid.then_some(self.sequence.as_slice())
    }

    /// Vertices placed so far, the whole order when valid.
    pub fn placed(&self) -> &[VertexIndex] {
        &self.sequence
    }

    /// Vertices left out by an invalid sort, with the number of their
    /// predecessors that were never placed.
    pub fn remaining(&self) -> &[(VertexIndex, usize)] {
        &self.remaining
    }

    pub fn into_sequence(self) -> Option<Vec<VertexIndex>> {
        self.valid.then_some(self.sequence)
    }

    pub fn into_result(self) -> Result<Vec<VertexIndex>, TopoError> {
        if self.valid {
            Ok(self.sequence)
        } else {
            Err(TopoError::NotDag {
                placed: self.sequence.len(),
                total: self.vertex_count,
                remaining: self.remaining,
            })
        }
    }

    /// Checks that the order is valid for `graph`: every vertex appears once
    /// and every edge goes forward.
    pub fn respects(&self, graph: &Graph) -> bool {
        let Some(sequence) = self.sequence() else {
            return false;
        };
        if sequence.len() != graph.vertex_count() {
            return false;
        }

        let mut position = VertexVec::from_fn(graph.vertex_count(), |_| None::<usize>);
        for (i, &v) in sequence.iter().enumerate() {
            let Some(slot) = position.get_mut(v) else {
                return false;
            };
            if slot.replace(i).is_some() {
                return false;
            }
        }

        graph.vertices().all(|vertex| {
            vertex
                .edges()
                .all(|e| position[vertex.id()] < position[e.adjacent()])
        })
    }
}

/// Per-run bookkeeping, dropped once the result is built.
struct Scratch {
    visited: BitVec,
    pending: VertexVec<usize>,
    sequence: Vec<VertexIndex>,
}

impl Scratch {
    fn new(graph: &Graph) -> Self {
        let n = graph.vertex_count();
        Scratch {
            visited: bitvec![0; n],
            pending: graph.vertices().map(|v| v.in_degree()).collect(),
            sequence: Vec::with_capacity(n),
        }
    }

    fn is_complete(&self) -> bool {
        self.sequence.len() == self.pending.len()
    }

    fn place(&mut self, v: VertexIndex) {
        trace!(vertex = %v, position = self.sequence.len(), "placed");
        self.visited.set(v.0, true);
        self.sequence.push(v);
    }

    fn finish(self, algorithm: TopoAlgorithm) -> TopoSortResult {
        let valid = self.is_complete();
        let remaining = self
            .pending
            .iter()
            .filter(|(v, _)| !self.visited[v.0])
            .map(|(v, &d)| (v, d))
            .collect();

        debug!(
            %algorithm,
            valid,
            placed = self.sequence.len(),
            total = self.pending.len(),
            "topological sort finished"
        );

        TopoSortResult {
            algorithm,
            valid,
            vertex_count: self.pending.len(),
            sequence: self.sequence,
            remaining,
        }
    }
}

impl Graph {
    pub fn topo_sort(&self, algorithm: TopoAlgorithm) -> Result<TopoSortResult, GraphError> {
        self.topo_sort_instrumented(algorithm, &mut ())
    }

    /// [`Graph::topo_sort`] reporting its vertex visits, edge visits and
    /// edge removals to `instr`.
    pub fn topo_sort_instrumented(
        &self,
        algorithm: TopoAlgorithm,
        instr: &mut impl Instrument,
    ) -> Result<TopoSortResult, GraphError> {
        if !self.is_directed() {
            return Err(GraphError::RequiresDirected);
        }
        debug!(
            %algorithm,
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            "topological sort started"
        );

        match algorithm {
            TopoAlgorithm::CopyScan => self.copy_scan(instr),
            TopoAlgorithm::Scan => self.scan(instr),
            TopoAlgorithm::Kahn => self.kahn(instr),
        }
    }

    pub fn topo_sort_copy_scan(&self) -> Result<TopoSortResult, GraphError> {
        self.topo_sort(TopoAlgorithm::CopyScan)
    }

    pub fn topo_sort_scan(&self) -> Result<TopoSortResult, GraphError> {
        self.topo_sort(TopoAlgorithm::Scan)
    }

    pub fn topo_sort_kahn(&self) -> Result<TopoSortResult, GraphError> {
        self.topo_sort(TopoAlgorithm::Kahn)
    }

    fn copy_scan(&self, instr: &mut impl Instrument) -> Result<TopoSortResult, GraphError> {
        let mut work = self.copy_instrumented(instr);
        let mut scratch = Scratch::new(self);

        while !scratch.is_complete() {
            let mut found = None;
            for v in (0..work.vertex_count()).map(VertexIndex) {
                instr.vertex_iter();
                if !scratch.visited[v.0] && work.in_degree(v)? == 0 {
                    found = Some(v);
                    break;
                }
            }
            let Some(v) = found else {
                break;
            };

            scratch.place(v);
            for w in work.adjacents(v)? {
                instr.edge_iter();
                work.remove_edge(v, w)?;
                instr.edge_removed();
            }
        }

        for (v, pending) in scratch.pending.iter_mut() {
            *pending = work.in_degree(v)?;
        }
        Ok(scratch.finish(TopoAlgorithm::CopyScan))
    }

    fn scan(&self, instr: &mut impl Instrument) -> Result<TopoSortResult, GraphError> {
        let mut scratch = Scratch::new(self);

        while !scratch.is_complete() {
            let mut found = None;
            for (v, &pending) in scratch.pending.iter() {
                instr.vertex_iter();
                if !scratch.visited[v.0] && pending == 0 {
                    found = Some(v);
                    break;
                }
            }
            let Some(v) = found else {
                break;
            };

            scratch.place(v);
            for edge in self.edges(v)? {
                instr.edge_iter();
                scratch.pending[edge.adjacent()] -= 1;
                instr.edge_removed();
            }
        }

        Ok(scratch.finish(TopoAlgorithm::Scan))
    }

    fn kahn(&self, instr: &mut impl Instrument) -> Result<TopoSortResult, GraphError> {
        let mut scratch = Scratch::new(self);

        let mut queue = VecDeque::with_capacity(self.vertex_count());
        for (v, &pending) in scratch.pending.iter() {
            instr.vertex_iter();
            if pending == 0 {
                queue.push_back(v);
            }
        }

        while let Some(v) = queue.pop_front() {
            scratch.place(v);
            for edge in self.edges(v)? {
                instr.edge_iter();
                let w = edge.adjacent();
                scratch.pending[w] -= 1;
                instr.edge_removed();
                if scratch.pending[w] == 0 {
                    queue.push_back(w);
                }
            }
        }

        Ok(scratch.finish(TopoAlgorithm::Kahn))
    }
}
