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
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

use crate::kernel::predicates::{in_circle, orient2d};

/// Fixed decimal precision for vertex identity. Coordinates are snapped to
/// `1 / ROUNDING_FACTOR` before comparison and hashing, so near-duplicate
/// vertices collapse onto one grid cell.
pub const ROUNDING_FACTOR: f64 = 1000.0;

/// Cutoff below which a cross product counts as zero. Distinct grid points
/// produce cross products orders of magnitude above this.
pub const TOLERANCE: f64 = 1e-9;

/// A 2D coordinate. Equality, ordering and hashing all go through the
/// rounded integer key, so two points closer than the grid spacing are the
/// same vertex.
#[derive(Clone, Copy, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The rounded integer pair that defines this point's identity.
    pub fn key(&self) -> (i64, i64) {
        (
            (self.x * ROUNDING_FACTOR).round() as i64,
            (self.y * ROUNDING_FACTOR).round() as i64,
        )
    }

    /// This point snapped onto the rounding grid.
    pub fn rounded(&self) -> Point2 {
        let (kx, ky) = self.key();
        Point2::new(kx as f64 / ROUNDING_FACTOR, ky as f64 / ROUNDING_FACTOR)
    }

    pub fn cross(&self, other: &Point2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(&self, other: &Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance_to(&self, other: &Point2) -> f64 {
        (*other - *self).magnitude()
    }

    /// Strict in-circle test: true when this point lies inside the circle
    /// through `a`, `b`, `c`. The winding of the triangle does not matter.
    pub fn within_circle(&self, a: Point2, b: Point2, c: Point2) -> bool {
        let orientation = orient2d((a.x, a.y), (b.x, b.y), (c.x, c.y));
        if orientation.abs() <= TOLERANCE {
            return false;
        }
        let det = in_circle((a.x, a.y), (b.x, b.y), (c.x, c.y), (self.x, self.y));
        det * orientation.signum() > TOLERANCE
    }
}

impl Add for Point2 {
    type Output = Point2;
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl PartialEq for Point2 {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point2 {}

impl Hash for Point2 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Point2 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point2 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Debug for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
