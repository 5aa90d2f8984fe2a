//! # Text Format Parser and Serializer
//!
//! Graphs are exchanged as whitespace-delimited tokens:
//!
//! ```text
//! <directed> <weighted> <vertex count> <edge count>
//! <from> <to> [<weight>]      (edge count times)
//! ```
//!
//! The flags are integers, non-zero meaning true. The weight is present iff
//! the graph is weighted. Line breaks carry no meaning, but
//! [`Graph::write_text`] puts the four header fields and each edge record on
//! their own line.
//!
//! While reading, self-loop records are skipped and repeated records are
//! ignored (the first one wins). Any other problem aborts the parse and no
//! graph is returned.
//!
//! The [`graph!`](crate::graph!) macro parses its tokens with the same rules,
//! which keeps test fixtures short:
//!
//! ```
//! let g = adjgraph::graph!(1 0 3 2  0 1  1 2).unwrap();
//! assert_eq!(g.edge_count(), 2);
//! ```

use std::{fmt, io, path::Path, str::FromStr, str::SplitWhitespace};

use itertools::Itertools;
use tracing::{debug, trace};

use crate::graph::{Graph, VertexIndex};

pub mod error;
pub use error::{Field, ParseError};

#[macro_export]
macro_rules! graph {
    ($($t:tt)*) => {
        $crate::graph::Graph::from_text(stringify!($($t)*))
    };
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Tokens {
            inner: text.split_whitespace(),
        }
    }

    /// `Ok(None)` at end of input.
    fn next<T: FromStr>(&mut self, field: Field) -> Result<Option<T>, ParseError> {
        let Some(token) = self.inner.next() else {
            return Ok(None);
        };
        token
            .parse()
            .map(Some)
            .map_err(|_| ParseError::InvalidNumber {
                field,
                token: token.to_string(),
            })
    }

    fn header<T: FromStr>(&mut self, field: Field) -> Result<T, ParseError> {
        self.next(field)?.ok_or(ParseError::MissingField(field))
    }

    fn edge_field<T: FromStr>(
        &mut self,
        field: Field,
        index: usize,
        expected: usize,
    ) -> Result<T, ParseError> {
        self.next(field)?.ok_or(ParseError::TruncatedEdge {
            index,
            expected,
            field,
        })
    }
}

impl FromStr for Graph {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(text);

        let directed = tokens.header::<i64>(Field::Directed)? != 0;
        let weighted = tokens.header::<i64>(Field::Weighted)? != 0;
        let vertex_count: usize = tokens.header(Field::VertexCount)?;
        let edge_count: usize = tokens.header(Field::EdgeCount)?;

        let mut graph = Graph::new(vertex_count, directed, weighted);

        for index in 0..edge_count {
            let from: usize = tokens.edge_field(Field::EdgeSource(index), index, edge_count)?;
            let to: usize = tokens.edge_field(Field::EdgeTarget(index), index, edge_count)?;
            let weight: Option<f64> = if weighted {
                Some(tokens.edge_field(Field::EdgeWeight(index), index, edge_count)?)
            } else {
                None
            };

            if from == to {
                trace!(index, vertex = from, "skipping self-loop record");
                continue;
            }

            let inserted = match weight {
                Some(weight) => graph.add_weighted_edge(from, to, weight),
                None => graph.add_edge(from, to),
            }
            .map_err(|source| ParseError::InvalidEdge { index, source })?;

            if !inserted {
                trace!(index, from, to, "ignoring repeated edge record");
            }
        }

        debug!(
            directed,
            weighted,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "parsed graph"
        );
        Ok(graph)
    }
}

impl Graph {
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        text.parse()
    }

    pub fn from_reader(mut reader: impl io::Read) -> Result<Self, ParseError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_text(&text)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    /// Edges in the order they are serialized: by source, then target, and
    /// only once per undirected pair.
    fn records(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex, f64)> + '_ {
        self.vertices().flat_map(move |vertex| {
            vertex
                .edges()
                .filter(move |e| self.is_directed() || vertex.id() < e.adjacent())
                .map(move |e| (vertex.id(), e.adjacent(), e.weight()))
        })
    }

    pub fn write_text_fmt(&self, writer: &mut impl fmt::Write) -> fmt::Result {
        writeln!(writer, "{}", u8::from(self.is_directed()))?;
        writeln!(writer, "{}", u8::from(self.is_weighted()))?;
        writeln!(writer, "{}", self.vertex_count())?;
        writeln!(writer, "{}", self.edge_count())?;

        for (v, w, weight) in self.records() {
            if self.is_weighted() {
                writeln!(writer, "{v} {w} {weight}")?;
            } else {
                writeln!(writer, "{v} {w}")?;
            }
        }
        Ok(())
    }

    pub fn write_text(&self, writer: &mut impl io::Write) -> io::Result<()> {
        writer.write_all(self.to_text().as_bytes())
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_text_fmt(&mut out);
        out
    }

    /// Compact single-line edge list such as `0->1 0->2`, or `0-1` for
    /// undirected graphs.
    pub fn edge_list(&self) -> String {
        let arrow = if self.is_directed() { "->" } else { "-" };
        self.records()
            .map(|(v, w, _)| format!("{v}{arrow}{w}"))
            .join(" ")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::GraphError;

    #[test]
    fn parses_directed_unweighted() {
        let g = Graph::from_text("1\n0\n4\n4\n0 1\n0 2\n1 3\n2 3\n").unwrap();
        assert!(g.is_directed());
        assert!(!g.is_weighted());
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.in_degree(3), Ok(2));
        assert!(g.check_invariants());
    }

    #[test]
    fn parses_weighted_undirected() {
        let g = graph!(0 1 3 2  0 1 2.5  2 1 0.75).unwrap();
        assert!(!g.is_directed());
        assert!(g.is_weighted());
        assert_eq!(g.edge_weight(1, 0), Some(2.5));
        assert_eq!(g.edge_weight(1, 2), Some(0.75));
        assert_eq!(g.degree(1), Ok(2));
    }

    #[test]
    fn self_loops_and_repeats_are_skipped() {
        let g = graph!(1 1 3 4  0 0 9.0  0 1 1.0  0 1 5.0  1 2 2.0).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edge_weight(0, 1), Some(1.0));
        assert!(!g.has_edge(0, 0));
    }

    #[test]
    fn missing_header_field() {
        let err = Graph::from_text("1 0 4").unwrap_err();
        assert!(matches!(err, ParseError::MissingField(Field::EdgeCount)));
        assert_eq!(err.to_string(), "Missing edge count");
    }

    #[test]
    fn invalid_number() {
        let err = Graph::from_text("1 0 x 0").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidNumber {
                field: Field::VertexCount,
                ref token
            } if token == "x"
        ));
    }

    #[test]
    fn truncated_edge_records() {
        let err = Graph::from_text("1 0 3 2  0 1  2").unwrap_err();
        assert!(matches!(
            err,
            ParseError::TruncatedEdge {
                index: 1,
                expected: 2,
                field: Field::EdgeTarget(1)
            }
        ));

        let err = Graph::from_text("1 1 3 1  0 1").unwrap_err();
        assert!(matches!(
            err,
            ParseError::TruncatedEdge {
                field: Field::EdgeWeight(0),
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let err = Graph::from_text("1 0 2 1  0 5").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidEdge {
                index: 0,
                source: GraphError::VertexOutOfRange { .. }
            }
        ));
    }

    #[test]
    fn reads_from_reader() {
        let g = Graph::from_reader("0 0 2 1 1 0".as_bytes()).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert!(matches!(
            Graph::from_file("/this/path/does/not/exist.txt"),
            Err(ParseError::Io(_))
        ));
    }

    #[test]
    fn serialization_round_trips() {
        for g in [
            Graph::complete(4, false),
            Graph::random(9, true, 0.4, 11),
            graph!(0 1 4 3  0 1 0.5  1 2 1.5  3 0 2).unwrap(),
        ] {
            let text = g.to_text();
            let back = Graph::from_text(&text).unwrap();
            assert_eq!(back.to_text(), text);
            assert_eq!(back.edge_count(), g.edge_count());
            for v in 0..g.vertex_count() {
                assert_eq!(back.adjacents(v), g.adjacents(v));
                assert_eq!(back.distances_to_adjacents(v), g.distances_to_adjacents(v));
            }
        }
    }

    #[test]
    fn text_layout() {
        let g = graph!(0 1 3 2  2 0 0.5  1 2 3).unwrap();
        similar_asserts::assert_eq!(g.to_text(), "0\n1\n3\n2\n0 2 0.5\n1 2 3\n");

        let mut bytes = Vec::new();
        g.write_text(&mut bytes).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), g.to_text());
    }

    #[test]
    fn edge_list_snapshot() {
        let g = graph!(1 0 4 4  0 1  0 2  1 3  2 3).unwrap();
        insta::assert_snapshot!(g.edge_list(), @"0->1 0->2 1->3 2->3");

        let u = Graph::complete(3, false);
        insta::assert_snapshot!(u.edge_list(), @"0-1 0-2 1-2");
    }
}
