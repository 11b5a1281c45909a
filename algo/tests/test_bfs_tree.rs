/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::no_logging;
use kdt::graphs::{DiGraph, GraphError};
use kdt_algo::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

fn random_graph(n: usize, m: usize, seed: u64) -> Result<DiGraph> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let sources: Vec<usize> = (0..m).map(|_| rng.random_range(0..n)).collect();
    let dests: Vec<usize> = (0..m).map(|_| rng.random_range(0..n)).collect();
    Ok(DiGraph::from_triples(&sources, &dests, 1.0, n)?)
}

fn successors(graph: &DiGraph) -> Vec<Vec<usize>> {
    let n = graph.num_vertices().num_out();
    let mut succ = vec![vec![]; n];
    let (s, d, _) = graph.decompose();
    for (s, d) in s.into_iter().zip(d) {
        succ[s].push(d);
    }
    succ
}

/// Sequential visit returning distances and parents, the parent of a vertex
/// being its greatest predecessor on the previous level.
fn correct_visit(graph: &DiGraph, root: usize) -> (Vec<Option<usize>>, Vec<Option<usize>>) {
    let succ = successors(graph);
    let n = succ.len();
    let mut dist = vec![None; n];
    let mut queue = VecDeque::new();
    dist[root] = Some(0);
    queue.push_back(root);
    while let Some(v) = queue.pop_front() {
        for &w in &succ[v] {
            if dist[w].is_none() {
                dist[w] = dist[v].map(|d| d + 1);
                queue.push_back(w);
            }
        }
    }

    let mut parents = vec![None; n];
    parents[root] = Some(root);
    for (v, vs) in succ.iter().enumerate() {
        for &w in vs {
            if w != root && dist[v].is_some() && dist[w] == dist[v].map(|d| d + 1) {
                parents[w] = parents[w].max(Some(v));
            }
        }
    }
    (dist, parents)
}

#[test]
fn test_diamond() -> Result<()> {
    // 0 → 1, 0 → 2, 1 → 3, 2 → 3, 3 → 4
    let g = DiGraph::from_triples(&[0, 0, 1, 2, 3], &[1, 2, 3, 3, 4], 1.0, 6)?;
    let parents = bfs_tree(&g, 0, false, no_logging![])?;
    assert_eq!(
        &*parents,
        &[Some(0), Some(0), Some(0), Some(2), Some(3), None]
    );
    let levels = bfs_levels(&g, 0, false, no_logging![])?;
    assert_eq!(&*levels, &[Some(0), Some(1), Some(1), Some(2), Some(3), None]);

    let check = validate_bfs_tree(&g, 0, &parents, false, no_logging![])?;
    assert_eq!(check.code(), 1);
    assert_eq!(check, BfsTreeCheck::Valid { levels });
    Ok(())
}

#[test]
fn test_isolated_root() -> Result<()> {
    let g = DiGraph::from_triples(&[1], &[2], 1.0, 3)?;
    let parents = bfs_tree(&g, 0, false, no_logging![])?;
    assert_eq!(&*parents, &[Some(0), None, None]);
    assert!(validate_bfs_tree(&g, 0, &parents, false, no_logging![])?.is_valid());
    Ok(())
}

#[test]
fn test_random() -> Result<()> {
    for seed in 0..10 {
        let g = random_graph(100, 250, seed)?;
        for root in [0, 17, 99] {
            let (dist, correct_parents) = correct_visit(&g, root);
            let parents = bfs_tree(&g, root, false, no_logging![])?;
            assert_eq!(&*parents, &correct_parents[..], "seed {seed}, root {root}");
            let levels = bfs_levels(&g, root, false, no_logging![])?;
            assert_eq!(&*levels, &dist[..]);

            let check = validate_bfs_tree(&g, root, &parents, false, no_logging![])?;
            assert_eq!(check.code(), 1, "seed {seed}, root {root}");
        }
    }
    Ok(())
}

#[test]
fn test_torus() -> Result<()> {
    let g = DiGraph::torus(8);
    let n = 64;
    let parents = bfs_tree(&g, 0, false, no_logging![])?;
    let symmetric = bfs_tree(&g, 0, true, no_logging![])?;
    assert_eq!(parents, symmetric);
    assert!(parents.iter().all(Option::is_some));

    let check = validate_bfs_tree(&g, 0, &parents, true, no_logging![])?;
    let BfsTreeCheck::Valid { levels } = check else {
        panic!("Expected a valid tree, got {check:?}");
    };
    // Manhattan distance with wrap-around
    for v in 0..n {
        let (r, c) = (v / 8, v % 8);
        let d = r.min(8 - r) + c.min(8 - c);
        assert_eq!(levels[v], Some(d));
    }
    Ok(())
}

#[test]
fn test_corrupted() -> Result<()> {
    let g = random_graph(50, 200, 7)?;
    let parents = bfs_tree(&g, 0, false, no_logging![])?;
    let v = (1..50)
        .find(|&v| parents[v].is_some())
        .expect("the root should reach some vertex");

    // A vertex that is its own parent is not reachable from the root
    let mut corrupted = parents.to_vec();
    corrupted[v] = Some(v);
    assert_eq!(
        validate_bfs_tree(&g, 0, &corrupted, false, no_logging![])?,
        BfsTreeCheck::NotATree
    );

    // The root has a parent
    let mut corrupted = parents.to_vec();
    corrupted[0] = Some(v);
    assert_eq!(
        validate_bfs_tree(&g, 0, &corrupted, false, no_logging![])?.code(),
        -1
    );

    // A parent that is not a vertex
    let mut corrupted = parents.to_vec();
    corrupted[v] = Some(50);
    assert_eq!(
        validate_bfs_tree(&g, 0, &corrupted, false, no_logging![])?.code(),
        -1
    );
    Ok(())
}

#[test]
fn test_cycle_in_parents() -> Result<()> {
    // 0 → 1 → 2 → 3
    let g = DiGraph::from_triples(&[0, 1, 2], &[1, 2, 3], 1.0, 4)?;
    // 2 and 3 point at each other, and are thus unreachable from the root
    let parents = [Some(0), Some(0), Some(3), Some(2)];
    assert_eq!(
        validate_bfs_tree(&g, 0, &parents, false, no_logging![])?,
        BfsTreeCheck::NotATree
    );
    Ok(())
}

#[test]
fn test_level_mismatch() -> Result<()> {
    // 0 → 1 → 2, 0 → 2
    let g = DiGraph::from_triples(&[0, 1, 0], &[1, 2, 2], 1.0, 3)?;
    // A tree, but 2 is at distance one from the root
    let parents = [Some(0), Some(0), Some(1)];
    let check = validate_bfs_tree(&g, 0, &parents, false, no_logging![])?;
    assert_eq!(check, BfsTreeCheck::LevelMismatch);
    assert_eq!(check.code(), -2);

    let parents = [Some(0), Some(0), Some(0)];
    assert!(validate_bfs_tree(&g, 0, &parents, false, no_logging![])?.is_valid());
    Ok(())
}

#[test]
fn test_does_not_modify_graph() -> Result<()> {
    let g = random_graph(30, 80, 1)?;
    let copy = g.clone();
    bfs_tree(&g, 3, false, no_logging![])?;
    assert_eq!(g, copy);
    Ok(())
}

#[test]
fn test_errors() -> Result<()> {
    let g = DiGraph::from_triples(&[0, 1], &[1, 2], 1.0, 3)?;
    assert!(matches!(
        bfs_tree(&g, 3, false, no_logging![]),
        Err(GraphError::VertexOutOfRange { vertex: 3, n: 3 })
    ));
    assert!(matches!(
        validate_bfs_tree(&g, 0, &[Some(0), Some(0)], false, no_logging![]),
        Err(GraphError::VectorLength { got: 2, expected: 3 })
    ));

    let rect = DiGraph::from_triples_rect(&[0], &[1], 1.0, 2, 3)?;
    assert!(matches!(
        bfs_tree(&rect, 0, false, no_logging![]),
        Err(GraphError::NotSquare(_))
    ));
    Ok(())
}
