// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::fmt;

use thiserror::Error;

use crate::geometry::{Point2, Segment2};
use crate::subdivision::Subdivision;

/// Errors raised while building or mutating a triangulation.
///
/// The structural variants (`InvalidEndpoint`, `CoincidentEdges`,
/// `CollinearPoints`) are recoverable. A caller can skip or reorder the
/// offending constraint and continue. The convergence variants signal
/// numerical breakdown and abort the operation that hit them.
#[derive(Debug, Error)]
pub enum TriangulationError {
    #[error("point set is empty")]
    EmptyPointSet,

    /// No non-collinear triple exists among the (rounded) input points, so no
    /// bounded triangle can be located for any of them.
    #[error("degenerate input: all points are collinear at the working precision")]
    DegenerateInput,

    /// Neither the bounded location walk nor the exhaustive fallback scan
    /// found an edge whose face contains the point.
    #[error("no containing edge found for point {0:?}")]
    LocateFailed(Point2),

    #[error("constraint endpoint {0:?} is not a vertex of the subdivision")]
    VertexNotFound(Point2),

    /// The requested edge target coincides with its own origin.
    #[error("edge target coincides with its origin at {0:?}")]
    InvalidEndpoint(Point2),

    /// Two consecutive fan edges at the origin point the same way, so the
    /// requested direction cannot be assigned to either wedge.
    #[error("coincident fan edges at {0:?}")]
    CoincidentEdges(Point2),

    /// The requested direction runs exactly along an existing fan edge that
    /// does not end at the target.
    #[error("direction from {origin:?} toward {toward:?} is collinear with the edge to {along:?}")]
    CollinearPoints {
        origin: Point2,
        along: Point2,
        toward: Point2,
    },

    /// The full edge fan was scanned without finding a containing wedge,
    /// which means the fan itself is malformed.
    #[error("no fan wedge at {0:?} contains the requested direction")]
    WedgeNotFound(Point2),

    /// A bounded walk exceeded its iteration cap. Indicates numerical
    /// inconsistency in the graph, not a transient condition.
    #[error("{context} exceeded {max} iterations")]
    DidNotConverge { context: &'static str, max: usize },

    #[error("constraint {index} rejected: {source}")]
    Constraint {
        index: usize,
        #[source]
        source: Box<TriangulationError>,
    },

    /// The caller cancelled. For batch construction the partial subdivision
    /// built so far is carried along and remains valid to use.
    #[error("operation cancelled")]
    Cancelled { partial: Option<Box<Subdivision>> },

    #[error(transparent)]
    Validation(#[from] ValidationReport),
}

/// A single structural defect found by validation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Defect {
    #[error("zero-length edge at {0:?}")]
    ZeroLengthEdge(Point2),

    #[error("edges cross: {0:?} and {1:?}")]
    CrossingEdges(Segment2, Segment2),
}

/// Every defect found in one validation pass, aggregated so a caller sees
/// the whole picture instead of the first failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub defects: Vec<Defect>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }

    pub fn push(&mut self, defect: Defect) {
        self.defects.push(defect);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subdivision failed validation with {} defect(s)", self.defects.len())?;
        for defect in &self.defects {
            write!(f, "; {defect}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}
