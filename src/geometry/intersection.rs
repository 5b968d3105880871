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

use std::cmp::Ordering;

use crate::geometry::point::TOLERANCE;
use crate::geometry::segment::Segment2;

/// Reports every pair of segments that properly cross or collinearly
/// overlap, as `(i, j)` index pairs with `i < j`.
///
/// Segments are swept in x order and only compared while their x intervals
/// overlap, which keeps well-distributed inputs close to linear even though
/// the worst case stays quadratic.
pub fn crossing_pairs(segments: &[Segment2]) -> Vec<(usize, usize)> {
    let min_x = |s: &Segment2| s.a.x.min(s.b.x);
    let max_x = |s: &Segment2| s.a.x.max(s.b.x);

    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.sort_by(|&i, &j| {
        min_x(&segments[i])
            .partial_cmp(&min_x(&segments[j]))
            .unwrap_or(Ordering::Equal)
    });

    let mut pairs = Vec::new();
    for (pos, &i) in order.iter().enumerate() {
        let reach = max_x(&segments[i]);
        for &j in &order[pos + 1..] {
            if min_x(&segments[j]) > reach + TOLERANCE {
                break;
            }
            if segments[i].crosses(&segments[j]) || segments[i].overlaps(&segments[j]) {
                pairs.push((i.min(j), i.max(j)));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point::Point2;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment2 {
        Segment2::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn finds_every_crossing_pair() {
        let segments = [
            seg(0.0, 0.0, 10.0, 10.0),
            seg(0.0, 10.0, 10.0, 0.0),
            seg(20.0, 0.0, 30.0, 0.0),
            seg(25.0, -5.0, 25.0, 5.0),
        ];
        let mut pairs = crossing_pairs(&segments);
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn shared_endpoints_are_clean() {
        // a triangle touches only at vertices
        let segments = [
            seg(0.0, 0.0, 10.0, 0.0),
            seg(10.0, 0.0, 5.0, 8.0),
            seg(5.0, 8.0, 0.0, 0.0),
        ];
        assert!(crossing_pairs(&segments).is_empty());
    }

    #[test]
    fn collinear_overlap_is_reported() {
        let segments = [seg(0.0, 0.0, 10.0, 0.0), seg(4.0, 0.0, 14.0, 0.0)];
        assert_eq!(crossing_pairs(&segments), vec![(0, 1)]);
    }
}
