//! Text-file readers for plane graphs, spanning trees and canonical
//! orderings.
//!
//! All three formats are line based. Graph files start with the vertex
//! count and the edge count, followed by one counter-clockwise
//! adjacency list per vertex:
//!
//! ```text
//! 3
//! 3
//! 0 1 2
//! 1 2 0
//! 2 0 1
//! ```
//!
//! Tree files look the same but omit the edge-count line. Order files
//! start with the vertex count, followed by `<vertex> <order>` lines.

use std::fs::File;
use std::path::Path;

use atoi::FromRadix10;
use log::info;

use crate::graph::{PlaneGraph, SpanningTree};
use crate::Error;

/// Reads an embedded plane graph from an adjacency-list file.
pub fn read_plane_graph<P: AsRef<Path>>(path: P) -> Result<PlaneGraph, Error> {
    let file = File::open(path.as_ref())?;
    let mmap = unsafe { memmap2::MmapOptions::new().populate().map(&file)? };
    parse_plane_graph(&mmap)
}

/// Reads a spanning tree from an adjacency-list file.
pub fn read_spanning_tree<P: AsRef<Path>>(path: P) -> Result<SpanningTree, Error> {
    let file = File::open(path.as_ref())?;
    let mmap = unsafe { memmap2::MmapOptions::new().populate().map(&file)? };
    parse_spanning_tree(&mmap)
}

/// Reads a canonical ordering. The result maps each vertex to its
/// position; validation against a graph happens in
/// [`PlaneGraph::assign_order`].
pub fn read_canonical_order<P: AsRef<Path>>(path: P) -> Result<Vec<u32>, Error> {
    let file = File::open(path.as_ref())?;
    let mmap = unsafe { memmap2::MmapOptions::new().populate().map(&file)? };
    parse_canonical_order(&mmap)
}

pub(crate) fn parse_plane_graph(bytes: &[u8]) -> Result<PlaneGraph, Error> {
    let mut lines = Lines::new(bytes);

    let n = single_number(&mut lines)? as usize;
    let m = single_number(&mut lines)? as usize;
    if n == 0 {
        return Err(Error::EmptyGraph);
    }
    if m + 1 < n {
        return Err(Error::NotEnoughEdges { n, m });
    }

    let adjacency = parse_adjacency(&mut lines, n)?;
    let graph = PlaneGraph::from_adjacency(adjacency)?;

    if graph.half_edge_count() != 2 * m {
        return Err(Error::EdgeCountMismatch {
            expected: 2 * m,
            actual: graph.half_edge_count(),
        });
    }

    info!(
        "Read plane graph (node_count = {}, edge_count = {})",
        n, m
    );

    Ok(graph)
}

pub(crate) fn parse_spanning_tree(bytes: &[u8]) -> Result<SpanningTree, Error> {
    let mut lines = Lines::new(bytes);

    let n = single_number(&mut lines)? as usize;
    if n == 0 {
        return Err(Error::EmptyGraph);
    }

    let adjacency = parse_adjacency(&mut lines, n)?;
    let tree = SpanningTree::from_adjacency(adjacency)?;

    info!("Read spanning tree (node_count = {})", n);

    Ok(tree)
}

pub(crate) fn parse_canonical_order(bytes: &[u8]) -> Result<Vec<u32>, Error> {
    let mut lines = Lines::new(bytes);

    let n = single_number(&mut lines)? as usize;

    let mut order = vec![0_u32; n];
    let mut filled = vec![false; n];
    let mut seen = 0_usize;

    while let Some((line, line_no)) = lines.next_line() {
        if is_blank(line) {
            continue;
        }
        let mut numbers = Numbers::new(line, line_no);
        let vertex = numbers.expect_next()?;
        let position = numbers.expect_next()?;

        if vertex as usize >= n {
            return Err(Error::VertexOutOfRange {
                vertex,
                node_count: n,
            });
        }
        if std::mem::replace(&mut filled[vertex as usize], true) {
            return Err(Error::OrderNotAPermutation);
        }

        order[vertex as usize] = position;
        seen += 1;
    }

    if seen != n {
        return Err(Error::OrderLengthMismatch {
            expected: n,
            actual: seen,
        });
    }

    Ok(order)
}

fn parse_adjacency(lines: &mut Lines<'_>, n: usize) -> Result<Vec<Vec<u32>>, Error> {
    let mut adjacency = vec![Vec::new(); n];
    let mut seen = 0_usize;

    while let Some((line, line_no)) = lines.next_line() {
        if is_blank(line) {
            continue;
        }
        let mut numbers = Numbers::new(line, line_no);
        let src = numbers.expect_next()?;
        if src as usize >= n {
            return Err(Error::VertexOutOfRange {
                vertex: src,
                node_count: n,
            });
        }

        adjacency[src as usize] = numbers.collect::<Result<_, _>>()?;
        seen += 1;
    }

    if seen != n {
        return Err(Error::MissingAdjacency {
            expected: n,
            actual: seen,
        });
    }

    Ok(adjacency)
}

fn single_number(lines: &mut Lines<'_>) -> Result<u32, Error> {
    let last_line = lines.line;
    match lines.next_line() {
        Some((line, line_no)) => Numbers::new(line, line_no).expect_next(),
        None => Err(Error::UnexpectedEof { line: last_line }),
    }
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

struct Lines<'a> {
    bytes: &'a [u8],
    line: usize,
}

impl<'a> Lines<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, line: 0 }
    }

    fn next_line(&mut self) -> Option<(&'a [u8], usize)> {
        if self.bytes.is_empty() {
            return None;
        }
        self.line += 1;

        let end = self
            .bytes
            .iter()
            .position(|&b| b == b'\n')
            .unwrap_or(self.bytes.len());

        let mut line = &self.bytes[..end];
        if line.last() == Some(&b'\r') {
            line = &line[..line.len() - 1];
        }
        self.bytes = &self.bytes[usize::min(end + 1, self.bytes.len())..];

        Some((line, self.line))
    }
}

struct Numbers<'a> {
    bytes: &'a [u8],
    line: usize,
}

impl<'a> Numbers<'a> {
    fn new(bytes: &'a [u8], line: usize) -> Self {
        Self { bytes, line }
    }

    fn expect_next(&mut self) -> Result<u32, Error> {
        self.next()
            .unwrap_or(Err(Error::InvalidNumber { line: self.line }))
    }
}

impl Iterator for Numbers<'_> {
    type Item = Result<u32, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((b' ' | b'\t', rest)) = self.bytes.split_first().map(|(b, r)| (*b, r)) {
            self.bytes = rest;
        }
        if self.bytes.is_empty() {
            return None;
        }

        let (value, digits) = u32::from_radix_10(self.bytes);
        if digits == 0 {
            return Some(Err(Error::InvalidNumber { line: self.line }));
        }
        self.bytes = &self.bytes[digits..];

        Some(Ok(value))
    }
}
