//! Optional operation counters for complexity analysis.
//!
//! Algorithms that support counting take a `&mut impl Instrument`. Passing
//! `&mut ()` disables counting; passing a [`Counters`] records how many
//! vertices were visited, how many edges were walked and how many edges were
//! removed (or, for the non-destructive sorts, logically removed).

use std::fmt;

pub trait Instrument {
    /// One vertex visited by a scan or copied.
    fn vertex_iter(&mut self) {}
    /// One outgoing edge walked.
    fn edge_iter(&mut self) {}
    /// One edge removed from a graph or from the pending in-degree counts.
    fn edge_removed(&mut self) {}
}

impl Instrument for () {}

impl<I: Instrument + ?Sized> Instrument for &mut I {
    fn vertex_iter(&mut self) {
        (**self).vertex_iter()
    }

    fn edge_iter(&mut self) {
        (**self).edge_iter()
    }

    fn edge_removed(&mut self) {
        (**self).edge_removed()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    pub vertex_iter: u64,
    pub edge_iter: u64,
    pub edge_rem: u64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Instrument for Counters {
    fn vertex_iter(&mut self) {
        self.vertex_iter += 1;
    }

    fn edge_iter(&mut self) {
        self.edge_iter += 1;
    }

    fn edge_removed(&mut self) {
        self.edge_rem += 1;
    }
}

impl fmt::Display for Counters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VERTEX_ITER={} EDGE_ITER={} EDGE_REM={}",
            self.vertex_iter, self.edge_iter, self.edge_rem
        )
    }
}
