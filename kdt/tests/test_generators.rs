/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use kdt::prelude::*;

#[test]
fn test_fully_connected() -> Result<()> {
    for n in [1, 2, 5, 17] {
        let g = DiGraph::fully_connected(n, None);
        assert_eq!(g.num_vertices(), VertexCount::Square(n));
        assert_eq!(g.num_edges(), n * n);
        assert!(g.degree(Direction::Out)?.iter().all(|&d| d == n));
        assert!(g.degree(Direction::In)?.iter().all(|&d| d == n));
        assert!(g.sum(Direction::Out)?.iter().all(|&s| s == n as f64));
        // Self-loops are included
        let (s, d, _) = g.decompose();
        assert_eq!(s.iter().zip(&d).filter(|(s, d)| s == d).count(), n);
    }

    let g = DiGraph::fully_connected(2, Some(3));
    assert_eq!(
        g.num_vertices(),
        VertexCount::Rectangular {
            num_out: 2,
            num_in: 3
        }
    );
    assert_eq!(
        g.decompose(),
        (
            vec![0, 0, 0, 1, 1, 1],
            vec![0, 1, 2, 0, 1, 2],
            vec![1.0; 6]
        )
    );

    assert_eq!(DiGraph::fully_connected(0, None), DiGraph::new());
    Ok(())
}

#[test]
fn test_torus() -> Result<()> {
    for n in [3, 4, 10] {
        let g = DiGraph::torus(n);
        assert_eq!(g.num_vertices(), VertexCount::Square(n * n));
        assert_eq!(g.num_edges(), 4 * n * n);
        assert!(g.degree(Direction::Out)?.iter().all(|&d| d == 4));
        assert!(g.degree(Direction::In)?.iter().all(|&d| d == 4));
        assert_eq!(g.transposed(), g);
    }

    // Vertex 0 of a 3 x 3 torus: north 6, south 3, west 2, east 1
    let g = DiGraph::torus(3);
    assert_eq!(g.index(0_usize, Selector::All)?.decompose().1, vec![1, 2, 3, 6]);
    Ok(())
}

#[test]
fn test_small_torus_sums_coinciding_edges() -> Result<()> {
    // On a 2 x 2 torus north and south (and west and east) coincide
    let g = DiGraph::torus(2);
    assert_eq!(g.num_edges(), 8);
    assert!(g.degree(Direction::Out)?.iter().all(|&d| d == 2));
    assert!(g.sum(Direction::Out)?.iter().all(|&s| s == 4.0));
    assert!(g.sum(Direction::In)?.iter().all(|&s| s == 4.0));

    let g = DiGraph::torus(1);
    assert_eq!(g.decompose(), (vec![0], vec![0], vec![4.0]));

    assert_eq!(DiGraph::torus(0).num_edges(), 0);
    Ok(())
}
