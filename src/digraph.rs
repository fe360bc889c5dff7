//! Digraph pairing and the Playfair substitution rule

use crate::error::{ErrorKind, PlayfairError, Result};
use crate::grid::{Grid, Position};

/// Which way the substitution rule moves along a shared row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Right along rows, down along columns (encoding).
    Forward,
    /// Left along rows, up along columns (decoding).
    Backward,
}

/// Split `text` into a character sequence of even length with no digraph
/// holding the same character twice.
///
/// When the second character of a digraph would equal the first,
/// `separator` is inserted between them and the repeated character starts
/// the next digraph. An odd-length result is padded with one trailing
/// `separator`. Apart from the inserted separators, input order is kept.
pub fn pairs(text: &str, separator: char) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len() + 1);
    for c in text.chars() {
        if out.len() % 2 == 1 && out.last() == Some(&c) {
            out.push(separator);
        }
        out.push(c);
    }
    if out.len() % 2 == 1 {
        out.push(separator);
    }
    out
}

/// Apply the substitution rule to the two cells of a digraph.
///
/// Same row: columns shift by one with wraparound. Same column: rows shift
/// by one with wraparound. Otherwise the two cells swap columns and keep
/// their rows, which is its own inverse.
pub fn substitute(grid: &Grid, a: Position, b: Position, dir: Direction) -> (Position, Position) {
    if a.row == b.row {
        let width = grid.width();
        (
            Position::new(a.row, step(a.col, width, dir)),
            Position::new(b.row, step(b.col, width, dir)),
        )
    } else if a.col == b.col {
        let height = grid.height();
        (
            Position::new(step(a.row, height, dir), a.col),
            Position::new(step(b.row, height, dir), b.col),
        )
    } else {
        (Position::new(a.row, b.col), Position::new(b.row, a.col))
    }
}

fn step(i: usize, len: usize, dir: Direction) -> usize {
    match dir {
        Direction::Forward => (i + 1) % len,
        Direction::Backward => (i + len - 1) % len,
    }
}

/// Position of `c`, or a `CharacterNotInGrid` input error.
pub(crate) fn locate(grid: &Grid, c: char) -> Result<Position> {
    grid.position(c).ok_or_else(|| {
        PlayfairError::input(
            ErrorKind::CharacterNotInGrid,
            format!("character {c:?} not found in grid"),
        )
    })
}
