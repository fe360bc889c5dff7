//! Keyed character grid
//!
//! The grid lays an alphabet out row by row. Distinct key characters
//! claim the first cells in order of first occurrence, and the rest of
//! the alphabet fills the remaining cells in alphabet order.

use crate::error::{ErrorKind, PlayfairError, Result};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Smallest allowed height or width.
pub const MIN_DIMENSION: usize = 2;

/// A cell coordinate. Values handed out by a [`Grid`] are always in range
/// for that grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Immutable height x width table of characters with a reverse lookup.
///
/// A configuration change produces a new `Grid`; existing values are
/// never modified, so clones may be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<char>,
    positions: HashMap<char, Position>,
}

/// Build a grid, see [`Grid::build`].
pub fn build_grid(
    alphabet: &[char],
    height: usize,
    width: usize,
    key: &str,
    separator: char,
) -> Result<Grid> {
    Grid::build(alphabet, height, width, key, separator)
}

impl Grid {
    /// Lay `alphabet` out into a `height` x `width` grid seeded by `key`.
    ///
    /// Fails if a dimension is below two, the alphabet does not fill the
    /// grid exactly, the key is empty or uses characters outside the
    /// alphabet, the separator is not in the alphabet, or the alphabet
    /// repeats a character.
    pub fn build(
        alphabet: &[char],
        height: usize,
        width: usize,
        key: &str,
        separator: char,
    ) -> Result<Self> {
        if height < MIN_DIMENSION {
            return Err(PlayfairError::config(
                ErrorKind::InvalidDimension,
                format!("height must be at least {MIN_DIMENSION}, got {height}"),
            ));
        }
        if width < MIN_DIMENSION {
            return Err(PlayfairError::config(
                ErrorKind::InvalidDimension,
                format!("width must be at least {MIN_DIMENSION}, got {width}"),
            ));
        }

        let count = height.checked_mul(width).ok_or_else(|| {
            PlayfairError::config(
                ErrorKind::InvalidDimension,
                format!("grid of {height}x{width} cells is too large"),
            )
        })?;
        if alphabet.len() != count {
            return Err(PlayfairError::config(
                ErrorKind::SizeMismatch,
                format!(
                    "alphabet has {} characters but a {height}x{width} grid needs {count}",
                    alphabet.len()
                ),
            ));
        }

        if key.is_empty() {
            return Err(PlayfairError::config(
                ErrorKind::InvalidKey,
                "key must be a non-empty string",
            ));
        }
        let members: HashSet<char> = alphabet.iter().copied().collect();
        if let Some(c) = key.chars().find(|c| !members.contains(c)) {
            return Err(PlayfairError::config(
                ErrorKind::InvalidKey,
                format!("key character {c:?} is not in the alphabet"),
            ));
        }
        if !members.contains(&separator) {
            return Err(PlayfairError::config(
                ErrorKind::InvalidSeparator,
                format!("separator {separator:?} is not in the alphabet"),
            ));
        }

        let mut cells = Vec::with_capacity(count);
        let mut positions = HashMap::with_capacity(count);
        for c in key.chars().chain(alphabet.iter().copied()) {
            if positions.contains_key(&c) {
                continue;
            }
            let q = cells.len();
            positions.insert(c, Position::new(q / width, q % width));
            cells.push(c);
        }

        if positions.len() < count {
            return Err(PlayfairError::config(
                ErrorKind::DuplicateCharacter,
                format!(
                    "alphabet repeats characters: only {} distinct of {count}",
                    positions.len()
                ),
            ));
        }

        Ok(Self {
            height,
            width,
            cells,
            positions,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells in row-major order. The cell at (row, col) is at index
    /// `row * width + col`.
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Iterate over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width)
    }

    /// Where `c` sits in the grid, if it is part of the alphabet.
    pub fn position(&self, c: char) -> Option<Position> {
        self.positions.get(&c).copied()
    }

    pub fn contains(&self, c: char) -> bool {
        self.positions.contains_key(&c)
    }

    /// The character at `pos`.
    ///
    /// # Panics
    /// Panics if `pos` is outside the grid.
    pub fn char_at(&self, pos: Position) -> char {
        assert!(
            pos.row < self.height && pos.col < self.width,
            "position out of bounds"
        );
        self.cells[pos.row * self.width + pos.col]
    }

    /// One line per row, rows joined by `\n`, no trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter());
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
