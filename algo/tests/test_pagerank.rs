/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::prelude::*;
use kdt::graphs::{DiGraph, GraphError};
use kdt_algo::rank::pagerank::{PageRank, page_rank, preds};
use predicates::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_graph(n: usize, m: usize, seed: u64) -> Result<DiGraph> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let sources: Vec<usize> = (0..m).map(|_| rng.random_range(0..n)).collect();
    let dests: Vec<usize> = (0..m).map(|_| rng.random_range(0..n)).collect();
    let weights: Vec<f64> = (0..m).map(|_| rng.random_range(1..5) as f64).collect();
    Ok(DiGraph::from_triples(&sources, &dests, &weights[..], n)?)
}

/// Dense power iteration: arcs are deduplicated, self-loops are ignored and
/// the rank of sinks is spread uniformly.
fn correct_pagerank(graph: &DiGraph, damping: f64, iterations: usize) -> Vec<f64> {
    let n = graph.num_vertices().num_out();
    let (s, d, _) = graph.decompose();
    let mut arcs: Vec<(usize, usize)> = s.into_iter().zip(d).filter(|(s, d)| s != d).collect();
    arcs.sort();
    arcs.dedup();
    let mut outdegree = vec![0_usize; n];
    for &(s, _) in &arcs {
        outdegree[s] += 1;
    }

    let mut rank = vec![1.0 / n as f64; n];
    for _ in 0..iterations {
        let sink_share = (0..n)
            .filter(|&v| outdegree[v] == 0)
            .map(|v| rank[v])
            .sum::<f64>()
            / n as f64;
        let mut next = vec![0.0; n];
        for &(s, d) in &arcs {
            next[d] += rank[s] / outdegree[s] as f64;
        }
        for x in next.iter_mut() {
            *x = damping * (*x + sink_share) + (1.0 - damping) / n as f64;
        }
        rank = next;
    }
    rank
}

#[test]
fn test_probability_distribution() -> Result<()> {
    for seed in 0..5 {
        // Sparse enough to contain sinks
        let g = random_graph(200, 250, seed)?;
        let rank = page_rank(&g, 1E-10, 0.85)?;
        assert_eq!(rank.len(), 200);
        assert!(rank.iter().all(|&r| r > 0.0));
        assert!((rank.iter().sum::<f64>() - 1.0).abs() < 1E-9, "seed {seed}");
    }
    Ok(())
}

#[test]
fn test_against_power_iteration() -> Result<()> {
    for seed in 0..5 {
        let g = random_graph(100, 300, seed)?;
        for damping in [0.5, 0.85, 0.99] {
            let mut pr = PageRank::new(&g)?;
            pr.damping(damping);
            pr.run(preds::MaxIter::from(30));
            assert_eq!(pr.iterations(), 30);

            let correct = correct_pagerank(&g, damping, 30);
            for (v, (&r, &c)) in pr.rank().iter().zip(&correct).enumerate() {
                assert!(
                    (r - c).abs() < 1E-12,
                    "seed {seed}, damping {damping}, vertex {v}: {r} != {c}"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_torus_is_uniform() -> Result<()> {
    let g = DiGraph::torus(10);
    let rank = page_rank(&g, 1E-12, 0.85)?;
    assert!(rank.iter().all(|&r| (r - 0.01).abs() < 1E-12));
    Ok(())
}

#[test]
fn test_no_edges() -> Result<()> {
    let g = DiGraph::empty(5);
    let mut pr = PageRank::new(&g)?;
    pr.run(preds::L1Norm::try_from(1E-9)?);
    // All vertices are sinks, so the uniform distribution is a fixed point
    assert_eq!(pr.iterations(), 1);
    assert!(pr.rank().iter().all(|&r| (r - 0.2).abs() < 1E-15));
    assert!(pr.norm_delta() < 1E-15);
    Ok(())
}

#[test]
fn test_star() -> Result<()> {
    // 1 → 0, 2 → 0, 3 → 0, 4 → 0; 0 is a sink
    let g = DiGraph::from_triples(&[1, 2, 3, 4], &[0, 0, 0, 0], 1.0, 5)?;
    let rank = page_rank(&g, 1E-12, 0.85)?;
    for v in 1..5 {
        assert!(rank[0] > rank[v]);
        assert!((rank[v] - rank[1]).abs() < 1E-15);
    }
    let correct = correct_pagerank(&g, 0.85, 200);
    for (r, c) in rank.iter().zip(&correct) {
        assert!((r - c).abs() < 1E-10);
    }
    Ok(())
}

#[test]
fn test_self_loops_and_weights_ignored() -> Result<()> {
    // 0 → 1, 1 → 2, 2 → 0, 2 → 1
    let g = DiGraph::from_triples(&[0, 1, 2, 2], &[1, 2, 0, 1], 1.0, 3)?;
    let h = DiGraph::from_triples(
        &[0, 1, 2, 2, 0, 1],
        &[1, 2, 0, 1, 0, 1],
        &[3.0, 1.0, 5.0, 0.5, 2.0, 7.0][..],
        3,
    )?;
    let copy = h.clone();
    let rank_g = page_rank(&g, 1E-12, 0.85)?;
    let rank_h = page_rank(&h, 1E-12, 0.85)?;
    for (a, b) in rank_g.iter().zip(rank_h.iter()) {
        assert!((a - b).abs() < 1E-14);
    }
    // The graph passed by the caller is left untouched
    assert_eq!(h, copy);
    Ok(())
}

#[test]
fn test_zero_damping() -> Result<()> {
    let g = random_graph(50, 200, 3)?;
    let rank = page_rank(&g, 1E-12, 0.0)?;
    assert!(rank.iter().all(|&r| (r - 0.02).abs() < 1E-15));
    Ok(())
}

#[test]
fn test_stopping() -> Result<()> {
    let g = random_graph(100, 400, 0)?;
    let mut pr = PageRank::new(&g)?;
    pr.run(preds::L1Norm::try_from(1E-6)?.or(preds::MaxIter::from(5)));
    assert_eq!(pr.iterations(), 5);

    pr.run(preds::L1Norm::try_from(1E-6)?.or(preds::MaxIter::default()));
    assert!(pr.iterations() < preds::MaxIter::DEFAULT_MAX_ITER);
    assert!(pr.norm_delta() < 1E-6);
    Ok(())
}

#[test]
fn test_with_logging() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let g = DiGraph::torus(4);
    let mut pl = ProgressLogger::default();
    pl.display_memory(true);
    let mut pr = PageRank::new(&g)?;
    pr.run_with_logging(preds::L1Norm::try_from(1E-9)?, &mut pl);
    assert!(pr.rank().iter().all(|&r| (r - 1.0 / 16.0).abs() < 1E-12));
    Ok(())
}

#[test]
fn test_empty_graph() -> Result<()> {
    let g = DiGraph::new();
    let mut pr = PageRank::new(&g)?;
    pr.run(preds::MaxIter::from(10));
    assert!(pr.rank().is_empty());
    assert_eq!(pr.iterations(), 0);
    assert!(page_rank(&g, 1E-6, 0.85)?.is_empty());
    Ok(())
}

#[test]
fn test_errors() -> Result<()> {
    let g = DiGraph::torus(3);
    assert!(page_rank(&g, 0.0, 0.85).is_err());
    assert!(page_rank(&g, -1.0, 0.85).is_err());
    assert!(page_rank(&g, f64::NAN, 0.85).is_err());
    assert!(page_rank(&g, 1E-6, 1.0).is_err());
    assert!(page_rank(&g, 1E-6, -0.1).is_err());

    let rect = DiGraph::from_triples_rect(&[0], &[1], 1.0, 2, 3)?;
    assert!(matches!(PageRank::new(&rect), Err(GraphError::NotSquare(_))));
    assert!(page_rank(&rect, 1E-6, 0.85).is_err());
    Ok(())
}

#[test]
#[should_panic]
fn test_damping_out_of_range() {
    let g = DiGraph::torus(3);
    if let Ok(mut pr) = PageRank::new(&g) {
        pr.damping(1.5);
    }
}
