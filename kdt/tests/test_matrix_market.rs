/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::no_logging;
use kdt::graphs::matrix_market::{read_matrix_market, write_matrix_market};
use kdt::prelude::*;

fn read(text: &str) -> Result<DiGraph> {
    read_matrix_market(text.as_bytes(), no_logging![])
}

#[test]
fn test_read_general() -> Result<()> {
    let g = read(
        "%%MatrixMarket matrix coordinate real general
% a comment
%
3 4 4
1 2 1.5
3 4 -2
1 2 0.5

2 1 7e1
",
    )?;
    assert_eq!(
        g.num_vertices(),
        VertexCount::Rectangular {
            num_out: 3,
            num_in: 4
        }
    );
    assert_eq!(
        g.decompose(),
        (vec![0, 1, 2], vec![1, 0, 3], vec![2.0, 70.0, -2.0])
    );
    Ok(())
}

#[test]
fn test_read_symmetric() -> Result<()> {
    let g = read(
        "%%MatrixMarket matrix coordinate pattern symmetric
3 3 3
2 1
3 1
3 3
",
    )?;
    assert_eq!(
        g.decompose(),
        (vec![0, 0, 1, 2, 2], vec![1, 2, 0, 0, 2], vec![1.0; 5])
    );
    assert_eq!(g.transposed(), g);

    let g = read(
        "%%MatrixMarket matrix coordinate integer skew-symmetric
2 2 1
2 1 3
",
    )?;
    assert_eq!(g.decompose(), (vec![0, 1], vec![1, 0], vec![-3.0, 3.0]));
    Ok(())
}

#[test]
fn test_read_errors() {
    for text in [
        "",
        "%%MatrixMarket matrix array real general\n2 2\n",
        "%%MatrixMarket matrix coordinate complex general\n1 1 0\n",
        "%%MatrixMarket matrix coordinate real hermitian\n1 1 0\n",
        "%%MatrixMarket matrix coordinate real general\n",
        "%%MatrixMarket matrix coordinate real general\n2 2\n",
        "%%MatrixMarket matrix coordinate real general\n2 2 1\n0 1 1.0\n",
        "%%MatrixMarket matrix coordinate real general\n2 2 1\n3 1 1.0\n",
        "%%MatrixMarket matrix coordinate real general\n2 2 1\n1 1\n",
        "%%MatrixMarket matrix coordinate real general\n2 2 1\n1 1 x\n",
        "%%MatrixMarket matrix coordinate real general\n2 2 2\n1 1 1.0\n",
        "%%MatrixMarket matrix coordinate real general\n2 2 1\n1 1 1.0\n2 2 1.0\n",
        "%%MatrixMarket matrix coordinate real symmetric\n2 3 0\n",
        // Declared entry counts are not trusted for allocation
        "%%MatrixMarket matrix coordinate real general\n2 2 18446744073709551615\n1 2 1.0\n",
    ] {
        assert!(read(text).is_err(), "{text:?} should not parse");
    }
}

#[test]
fn test_write() -> Result<()> {
    let g = DiGraph::from_triples_rect(&[1, 0], &[0, 2], &[0.25, 3.0], 2, 3)?;
    let mut buffer = Vec::new();
    write_matrix_market(&g, &mut buffer)?;
    assert_eq!(
        String::from_utf8(buffer)?,
        "%%MatrixMarket matrix coordinate real general\n2 3 2\n1 3 3\n2 1 0.25\n"
    );

    let mut b = g.clone();
    b.to_boolean_weights();
    let mut buffer = Vec::new();
    write_matrix_market(&b, &mut buffer)?;
    assert_eq!(
        String::from_utf8(buffer)?,
        "%%MatrixMarket matrix coordinate pattern general\n2 3 2\n1 3\n2 1\n"
    );
    Ok(())
}

#[test]
fn test_save_load() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("torus.mtx");

    let mut g = DiGraph::torus(5);
    g.scale_by_scalar(0.1);
    g.save(&path)?;
    let h = DiGraph::load(&path)?;
    assert_eq!(h, g);

    assert!(DiGraph::load(dir.path().join("missing.mtx")).is_err());
    Ok(())
}
