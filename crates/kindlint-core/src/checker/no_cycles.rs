use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use super::{CheckContext, FileCache};
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::symbol::ArchSymbol;

/// An import site witnessing a symbol-level edge.
#[derive(Debug, Clone)]
struct Witness {
    file: PathBuf,
    line: usize,
    column: usize,
}

/// Builds the symbol graph and reports each elementary cycle found by DFS.
pub(super) fn check(
    cx: &CheckContext<'_>,
    files: &mut FileCache<'_>,
    symbols: &[Arc<ArchSymbol>],
) -> Vec<Diagnostic> {
    // Repeated entries name one graph node.
    let mut unique: Vec<&Arc<ArchSymbol>> = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let duplicate = unique.iter().any(|seen| {
            Arc::ptr_eq(seen, symbol)
                || (seen.location().is_some() && seen.location() == symbol.location())
        });
        if !duplicate {
            unique.push(symbol);
        }
    }
    let symbols = unique;
    let resolved: Vec<_> = symbols.iter().map(|s| files.of(s)).collect();

    // edges[i][j] = first import site from a file of i into a file of j
    let mut edges: Vec<BTreeMap<usize, Witness>> = vec![BTreeMap::new(); symbols.len()];
    for (i, from) in resolved.iter().enumerate() {
        let Some(from) = from else { continue };
        for file in from.files() {
            for edge in cx.imports.imports_of(file) {
                for (j, to) in resolved.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let Some(to) = to else { continue };
                    if to.contains(&edge.target) {
                        edges[i].entry(j).or_insert_with(|| Witness {
                            file: file.clone(),
                            line: edge.line,
                            column: edge.column,
                        });
                    }
                }
            }
        }
    }

    let adjacency: Vec<Vec<usize>> = edges.iter().map(|e| e.keys().copied().collect()).collect();
    find_cycles(&adjacency)
        .into_iter()
        .map(|cycle| {
            let names: Vec<&str> = cycle.iter().map(|&i| symbols[i].name()).collect();
            let witness = &edges[cycle[0]][&cycle[1 % cycle.len()]];
            Diagnostic::new(
                DiagnosticCode::CircularDependency,
                format!(
                    "Circular dependency detected: {} \u{2192} {}",
                    names.join(" \u{2192} "),
                    names[0]
                ),
                witness.file.clone(),
                witness.line,
                witness.column,
            )
        })
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Colour {
    White,
    Grey,
    Black,
}

/// Three-colour DFS. Every back edge yields the cycle on the current path;
/// cycles are rotated to start at their smallest node and de-duplicated.
fn find_cycles(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut colour = vec![Colour::White; adjacency.len()];
    let mut path = Vec::new();
    let mut seen = HashSet::new();
    let mut cycles = Vec::new();

    for start in 0..adjacency.len() {
        if colour[start] == Colour::White {
            visit(start, adjacency, &mut colour, &mut path, &mut seen, &mut cycles);
        }
    }
    cycles
}

fn visit(
    node: usize,
    adjacency: &[Vec<usize>],
    colour: &mut [Colour],
    path: &mut Vec<usize>,
    seen: &mut HashSet<Vec<usize>>,
    cycles: &mut Vec<Vec<usize>>,
) {
    colour[node] = Colour::Grey;
    path.push(node);

    for &next in &adjacency[node] {
        match colour[next] {
            Colour::White => visit(next, adjacency, colour, path, seen, cycles),
            Colour::Grey => {
                if let Some(pos) = path.iter().position(|&n| n == next) {
                    let cycle = canonical(&path[pos..]);
                    if seen.insert(cycle.clone()) {
                        cycles.push(cycle);
                    }
                }
            }
            Colour::Black => {}
        }
    }

    path.pop();
    colour[node] = Colour::Black;
}

fn canonical(cycle: &[usize]) -> Vec<usize> {
    let min_pos = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, &n)| n)
        .map_or(0, |(i, _)| i);
    cycle[min_pos..]
        .iter()
        .chain(&cycle[..min_pos])
        .copied()
        .collect()
}
