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

use num_traits::Float;

use crate::geometry::point::TOLERANCE;

/// Sign classification of a cross product or signed area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Returns twice the signed area of triangle (a, b, c):
/// - >0 if counter-clockwise
/// - <0 if clockwise
/// - =0 if collinear
pub fn orient2d<T: Float>(a: (T, T), b: (T, T), c: (T, T)) -> T {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

/// Determinant of the in-circle matrix for the circle through `a`, `b`, `c`
/// and the query point `d`. Positive when (a, b, c) winds counter-clockwise
/// and `d` lies strictly inside the circle.
pub fn in_circle<T: Float>(a: (T, T), b: (T, T), c: (T, T), d: (T, T)) -> T {
    let adx = a.0 - d.0;
    let ady = a.1 - d.1;
    let bdx = b.0 - d.0;
    let bdy = b.1 - d.1;
    let cdx = c.0 - d.0;
    let cdy = c.1 - d.1;

    let ad2 = adx * adx + ady * ady;
    let bd2 = bdx * bdx + bdy * bdy;
    let cd2 = cdx * cdx + cdy * cdy;

    adx * (bdy * cd2 - cdy * bd2) - ady * (bdx * cd2 - cdx * bd2)
        + ad2 * (bdx * cdy - cdx * bdy)
}

/// Classifies a signed value against the shared tolerance.
pub fn classify(value: f64) -> Orientation {
    if value > TOLERANCE {
        Orientation::CounterClockwise
    } else if value < -TOLERANCE {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}
