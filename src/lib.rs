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

//! Incremental planar Delaunay triangulation over a quad-edge subdivision,
//! with support for inserting required segments (constraints) that survive
//! in the final triangulation even when they are not Delaunay-legal.
//!
//! The building blocks layer bottom-up: [`geometry`] holds the concrete 2D
//! primitives with fixed-decimal vertex identity, [`kernel`] the orientation
//! and in-circle predicates, [`quadedge`] the edge algebra over an arena of
//! quad-edge records, and [`subdivision`] the triangulation itself together
//! with the vertex index and constraint insertion.

pub mod cancel;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod quadedge;
pub mod subdivision;
pub mod trace;

pub use cancel::CancelToken;
pub use error::{Defect, TriangulationError, ValidationReport};
pub use geometry::{Point2, ROUNDING_FACTOR, Segment2, TOLERANCE};
pub use quadedge::{EdgeId, QuadEdges};
pub use subdivision::{Subdivision, VertexIndex};
pub use trace::{NoopRecorder, Recorder, TraceEvent};
