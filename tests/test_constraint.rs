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

use quadtri::{CancelToken, Point2, Subdivision, TriangulationError};

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn square() -> Vec<Point2> {
    vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]
}

/// True when the triangulation has an edge between `a` and `b`.
fn has_edge(sd: &Subdivision, a: Point2, b: Point2) -> bool {
    let index = sd.vertex_index();
    let e = index.get(a).expect("vertex present");
    sd.graph().find_onext_dest(e, b).is_some()
}

#[test]
fn constraint_forces_the_other_diagonal() {
    let mut sd = Subdivision::new_for_points(&square()).unwrap();
    let mut index = sd.vertex_index();

    // constrain whichever diagonal the unconstrained run did not pick
    let main_exists = has_edge(&sd, p(0.0, 0.0), p(10.0, 10.0));
    let (start, end, gone_a, gone_b) = if main_exists {
        (p(10.0, 0.0), p(0.0, 10.0), p(0.0, 0.0), p(10.0, 10.0))
    } else {
        (p(0.0, 0.0), p(10.0, 10.0), p(10.0, 0.0), p(0.0, 10.0))
    };

    sd.insert_constraint(&mut index, start, end).unwrap();

    // the constraint survives as an edge reachable from its start fan
    let e = index.get(start).unwrap();
    assert!(sd.graph().find_onext_dest(e, end).is_some());
    // and the opposite diagonal was removed
    assert!(!has_edge(&sd, gone_a, gone_b));

    assert!(sd.is_valid(&CancelToken::new()));
    assert_eq!(sd.triangles(false).len(), 2);
}

#[test]
fn existing_edge_constraint_is_a_noop() {
    let mut sd = Subdivision::new_for_points(&square()).unwrap();
    let mut index = sd.vertex_index();
    let edges_before = sd.segments().len();

    // the square's bottom edge is always present
    sd.insert_constraint(&mut index, p(0.0, 0.0), p(10.0, 0.0))
        .unwrap();

    assert_eq!(sd.segments().len(), edges_before);
    assert!(sd.is_valid(&CancelToken::new()));
}

#[test]
fn constraint_cuts_across_a_strip_of_triangles() {
    let mut points = Vec::new();
    for i in 0..4 {
        points.push(p(i as f64 * 2.0, 0.0));
        points.push(p(i as f64 * 2.0, 2.0));
    }
    let mut sd = Subdivision::new_for_points(&points).unwrap();
    let mut index = sd.vertex_index();

    sd.insert_constraint(&mut index, p(0.0, 0.0), p(6.0, 2.0))
        .unwrap();

    assert!(has_edge(&sd, p(0.0, 0.0), p(6.0, 2.0)));
    assert!(sd.is_valid(&CancelToken::new()));

    // the maintained index still resolves every vertex
    for q in &points {
        let e = index.get(*q).expect("vertex still indexed");
        assert_eq!(sd.graph().org(e), *q);
    }
}

#[test]
fn constraint_insertion_keeps_the_triangle_count() {
    // forcing a diagonal rebuilds the corridor without changing the
    // number of interior triangles
    let mut points = Vec::new();
    for i in 0..4 {
        points.push(p(i as f64 * 2.0, 0.0));
        points.push(p(i as f64 * 2.0, 2.0));
    }
    let mut sd = Subdivision::new_for_points(&points).unwrap();
    let before = sd.triangles(false).len();
    let mut index = sd.vertex_index();
    sd.insert_constraint(&mut index, p(0.0, 0.0), p(6.0, 2.0))
        .unwrap();
    assert_eq!(sd.triangles(false).len(), before);
}

#[test]
fn vertex_on_the_segment_blocks_the_constraint() {
    let points = [
        p(0.0, 0.0),
        p(2.0, 0.0),
        p(4.0, 0.0),
        p(2.0, 3.0),
        p(2.0, -3.0),
    ];
    let mut sd = Subdivision::new_for_points(&points).unwrap();
    let mut index = sd.vertex_index();

    let err = sd
        .insert_constraint(&mut index, p(0.0, 0.0), p(4.0, 0.0))
        .unwrap_err();
    match err {
        TriangulationError::CollinearPoints { along, .. } => {
            assert_eq!(along, p(2.0, 0.0));
        }
        other => panic!("expected collinear points, got {other}"),
    }
    // the failed insertion left the graph untouched
    assert!(sd.is_valid(&CancelToken::new()));
}

#[test]
fn unknown_endpoint_is_reported() {
    let mut sd = Subdivision::new_for_points(&square()).unwrap();
    let mut index = sd.vertex_index();
    let err = sd
        .insert_constraint(&mut index, p(0.0, 0.0), p(55.0, 55.0))
        .unwrap_err();
    assert!(matches!(err, TriangulationError::VertexNotFound(_)));
}

#[test]
fn batch_reports_the_failing_constraint_index() {
    let points = [
        p(0.0, 0.0),
        p(2.0, 0.0),
        p(4.0, 0.0),
        p(2.0, 3.0),
        p(2.0, -3.0),
    ];
    let mut sd = Subdivision::new_for_points(&points).unwrap();

    let constraints = [
        (p(0.0, 0.0), p(2.0, 3.0)),  // already satisfiable
        (p(0.0, 0.0), p(4.0, 0.0)),  // blocked by the vertex at (2, 0)
    ];
    let err = sd
        .insert_constraints(&constraints, &CancelToken::new())
        .unwrap_err();
    match err {
        TriangulationError::Constraint { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(
                *source,
                TriangulationError::CollinearPoints { .. }
            ));
        }
        other => panic!("expected constraint failure, got {other}"),
    }
}

#[test]
fn batch_polls_for_cancellation() {
    let mut sd = Subdivision::new_for_points(&square()).unwrap();
    let token = CancelToken::new();
    token.cancel();
    let err = sd
        .insert_constraints(&[(p(0.0, 0.0), p(10.0, 10.0))], &token)
        .unwrap_err();
    assert!(matches!(err, TriangulationError::Cancelled { partial: None }));
}

#[test]
fn long_constraint_through_a_grid_keeps_planarity() {
    let mut points = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            points.push(p(i as f64 * 3.0, j as f64 * 3.0));
        }
    }
    let mut sd = Subdivision::new_for_points(&points).unwrap();
    let mut index = sd.vertex_index();

    // crosses three columns without touching any grid vertex
    sd.insert_constraint(&mut index, p(0.0, 0.0), p(9.0, 6.0))
        .unwrap();
    assert!(has_edge(&sd, p(0.0, 0.0), p(9.0, 6.0)));
    assert!(sd.is_valid(&CancelToken::new()));

    for q in &points {
        let e = index.get(*q).expect("vertex still indexed");
        assert_eq!(sd.graph().org(e), *q);
    }
}
