/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Loading and saving graphs in the [Matrix Market] coordinate format.
//!
//! A file starts with a header line
//!
//! ```text
//! %%MatrixMarket matrix coordinate <field> <symmetry>
//! ```
//!
//! followed by comment lines starting with `%`, a size line with the number
//! of rows, columns and entries, and one line per entry. Indices are
//! 1-based on disk and 0-based in memory.
//!
//! Supported fields are `real`, `integer` and `pattern` (every entry weighs
//! one). Supported symmetries are `general`, `symmetric` (each off-diagonal
//! entry also stands for its mirror image) and `skew-symmetric` (the mirror
//! image has opposite weight). Duplicate entries are summed.
//!
//! Graphs are always saved as `general`, using the `pattern` field if the
//! graph [has boolean weights](DiGraph::has_boolean_weights) and `real`
//! otherwise.
//!
//! [Matrix Market]: https://math.nist.gov/MatrixMarket/formats.html

use super::DiGraph;
use anyhow::{Context, Result, bail, ensure};
use dsi_progress_logger::prelude::*;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const BANNER: &str = "%%MatrixMarket";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Real,
    Integer,
    Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symmetry {
    General,
    Symmetric,
    SkewSymmetric,
}

fn parse_header(line: &str) -> Result<(Field, Symmetry)> {
    let tokens: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
    ensure!(
        tokens.len() == 5 && tokens[0] == BANNER.to_lowercase(),
        "Malformed Matrix Market header {line:?}"
    );
    ensure!(
        tokens[1] == "matrix" && tokens[2] == "coordinate",
        "Only coordinate matrices are supported, found {} {}",
        tokens[1],
        tokens[2]
    );
    let field = match tokens[3].as_str() {
        "real" => Field::Real,
        "integer" => Field::Integer,
        "pattern" => Field::Pattern,
        other => bail!("Unsupported Matrix Market field {other:?}"),
    };
    let symmetry = match tokens[4].as_str() {
        "general" => Symmetry::General,
        "symmetric" => Symmetry::Symmetric,
        "skew-symmetric" => Symmetry::SkewSymmetric,
        other => bail!("Unsupported Matrix Market symmetry {other:?}"),
    };
    Ok((field, symmetry))
}

fn parse_index(token: Option<&str>, bound: usize, line_num: usize) -> Result<usize> {
    let token = token.with_context(|| format!("Missing index at line {line_num}"))?;
    let index = token
        .parse::<usize>()
        .with_context(|| format!("Cannot parse index {token:?} at line {line_num}"))?;
    ensure!(
        (1..=bound).contains(&index),
        "Index {index} at line {line_num} out of range [1..{bound}]"
    );
    Ok(index - 1)
}

/// Reads a graph in Matrix Market format, logging progress on the entry
/// lines.
pub fn read_matrix_market(reader: impl BufRead, pl: &mut impl ProgressLog) -> Result<DiGraph> {
    let mut lines = reader.lines().enumerate();

    let (_, header) = lines.next().context("Empty Matrix Market input")?;
    let header = header.context("Cannot read Matrix Market header")?;
    let (field, symmetry) = parse_header(&header)?;

    let mut size = None;
    for (line_num, line) in lines.by_ref() {
        let line = line.with_context(|| format!("Cannot read line {}", line_num + 1))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        size = Some((line_num + 1, line.to_owned()));
        break;
    }
    let (line_num, size) = size.context("Missing Matrix Market size line")?;
    let dims = size
        .split_whitespace()
        .map(str::parse::<usize>)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Cannot parse size line {size:?} at line {line_num}"))?;
    ensure!(
        dims.len() == 3,
        "Size line at line {line_num} must contain rows, columns and entries"
    );
    let (num_rows, num_cols, num_entries) = (dims[0], dims[1], dims[2]);
    ensure!(
        symmetry == Symmetry::General || num_rows == num_cols,
        "A {symmetry:?} matrix must be square, but it is {num_rows} x {num_cols}"
    );

    // The declared count is untrusted until the entries have been read
    let capacity = num_entries.min(1 << 20);
    let mut sources = Vec::with_capacity(capacity);
    let mut dests = Vec::with_capacity(capacity);
    let mut weights = Vec::with_capacity(capacity);
    let mut read = 0;

    pl.item_name("entry");
    pl.expected_updates(Some(num_entries));
    pl.start(format!(
        "Reading {num_entries} Matrix Market entries ({num_rows} x {num_cols}, {:?}, {:?})",
        field, symmetry
    ));

    for (line_num, line) in lines {
        let line_num = line_num + 1;
        let line = line.with_context(|| format!("Cannot read line {line_num}"))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        ensure!(
            read < num_entries,
            "Found more than the {num_entries} declared entries"
        );
        let mut tokens = line.split_whitespace();
        let i = parse_index(tokens.next(), num_rows, line_num)?;
        let j = parse_index(tokens.next(), num_cols, line_num)?;
        let w = match field {
            Field::Pattern => 1.0,
            Field::Real | Field::Integer => {
                let token = tokens
                    .next()
                    .with_context(|| format!("Missing value at line {line_num}"))?;
                token
                    .parse::<f64>()
                    .with_context(|| format!("Cannot parse value {token:?} at line {line_num}"))?
            }
        };
        sources.push(i);
        dests.push(j);
        weights.push(w);
        if i != j {
            match symmetry {
                Symmetry::General => {}
                Symmetry::Symmetric => {
                    sources.push(j);
                    dests.push(i);
                    weights.push(w);
                }
                Symmetry::SkewSymmetric => {
                    sources.push(j);
                    dests.push(i);
                    weights.push(-w);
                }
            }
        }
        read += 1;
        pl.light_update();
    }
    pl.done();
    ensure!(
        read == num_entries,
        "Expected {num_entries} entries, found {read}"
    );

    Ok(DiGraph::from_triples_rect(
        &sources, &dests, &weights, num_rows, num_cols,
    )?)
}

/// Writes a graph in Matrix Market format.
pub fn write_matrix_market(graph: &DiGraph, mut writer: impl Write) -> Result<()> {
    let pattern = graph.has_boolean_weights();
    writeln!(
        writer,
        "{BANNER} matrix coordinate {} general",
        if pattern { "pattern" } else { "real" }
    )?;
    let vertices = graph.num_vertices();
    writeln!(
        writer,
        "{} {} {}",
        vertices.num_out(),
        vertices.num_in(),
        graph.num_edges()
    )?;
    let (sources, dests, weights) = graph.decompose();
    for ((s, d), w) in sources.iter().zip(&dests).zip(&weights) {
        if pattern {
            writeln!(writer, "{} {}", s + 1, d + 1)?;
        } else {
            writeln!(writer, "{} {} {}", s + 1, d + 1, w)?;
        }
    }
    writer.flush()?;
    Ok(())
}

impl DiGraph {
    /// Loads a graph from a file in [Matrix Market](crate::graphs::matrix_market)
    /// format.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Cannot open {}", path.display()))?;
        let mut pl = ProgressLogger::default();
        pl.display_memory(true);
        let graph = read_matrix_market(BufReader::new(file), &mut pl)
            .with_context(|| format!("Cannot parse {} as a Matrix Market file", path.display()))?;
        log::info!(
            "Loaded graph with {} vertices and {} edges from {}",
            graph.num_vertices(),
            graph.num_edges(),
            path.display()
        );
        Ok(graph)
    }

    /// Saves the graph to a file in [Matrix Market](crate::graphs::matrix_market)
    /// format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .with_context(|| format!("Cannot create {}", path.display()))?;
        write_matrix_market(self, BufWriter::new(file))
            .with_context(|| format!("Cannot write {}", path.display()))?;
        log::info!(
            "Saved graph with {} vertices and {} edges to {}",
            self.num_vertices(),
            self.num_edges(),
            path.display()
        );
        Ok(())
    }
}
