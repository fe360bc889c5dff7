//! Plaintext to ciphertext

use crate::digraph::{self, Direction};
use crate::error::{ErrorKind, PlayfairError, Result};
use crate::grid::Grid;

/// Encode `plaintext` through `grid`.
///
/// The separator breaks repeated-letter digraphs and pads odd input, so it
/// may not appear in `plaintext` itself.
pub fn encode(plaintext: &str, grid: &Grid, separator: char) -> Result<String> {
    if plaintext.contains(separator) {
        return Err(PlayfairError::input(
            ErrorKind::SeparatorInInput,
            format!("text must not contain the separator {separator:?}"),
        ));
    }
    if !grid.contains(separator) {
        return Err(PlayfairError::config(
            ErrorKind::InvalidSeparator,
            format!("separator {separator:?} is not in the grid"),
        ));
    }

    let seq = digraph::pairs(plaintext, separator);
    let mut out = String::with_capacity(seq.len());
    for pair in seq.chunks_exact(2) {
        let a = digraph::locate(grid, pair[0])?;
        let b = digraph::locate(grid, pair[1])?;
        if a == b {
            return Err(PlayfairError::internal(
                ErrorKind::DuplicatePosition,
                format!("digraph {:?}{:?} maps to a single cell", pair[0], pair[1]),
            ));
        }
        let (a, b) = digraph::substitute(grid, a, b, Direction::Forward);
        out.push(grid.char_at(a));
        out.push(grid.char_at(b));
    }
    Ok(out)
}

/// A grid and separator bundled for repeated encoding.
#[derive(Debug, Clone)]
pub struct Encoder {
    grid: Grid,
    separator: char,
}

impl Encoder {
    /// Fails with `InvalidSeparator` if `separator` has no cell in `grid`.
    pub fn new(grid: Grid, separator: char) -> Result<Self> {
        if !grid.contains(separator) {
            return Err(PlayfairError::config(
                ErrorKind::InvalidSeparator,
                format!("separator {separator:?} is not in the grid"),
            ));
        }
        Ok(Self { grid, separator })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn encode(&self, plaintext: &str) -> Result<String> {
        encode(plaintext, &self.grid, self.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    fn classic_grid() -> Grid {
        let alphabet: Vec<char> = ('a'..='z').filter(|&c| c != 'j').collect();
        Grid::build(&alphabet, 5, 5, "playfairexample", 'x').unwrap()
    }

    #[test]
    fn test_known_vector() {
        // The text carries its own padding, so any separator absent from it
        // yields the same ciphertext.
        let grid = classic_grid();
        let ct = encode("hidethegoldinthetrexestump", &grid, 'q').unwrap();
        assert_eq!(ct, "bmodzbxdnabekudmuixmmouvif");
    }

    #[test]
    fn test_repeated_letters_are_split() {
        let grid = classic_grid();
        // he lx lo
        let ct = encode("hello", &grid, 'x').unwrap();
        assert_eq!(ct.chars().count(), 6);
        assert_eq!(ct, encode("helxlo", &grid, 'q').unwrap());
    }

    #[test]
    fn test_odd_input_padded() {
        let grid = classic_grid();
        let ct = encode("abc", &grid, 'x').unwrap();
        assert_eq!(ct.chars().count(), 4);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(encode("", &classic_grid(), 'x').unwrap(), "");
    }

    #[test]
    fn test_separator_in_input() {
        let err = encode("extra", &classic_grid(), 'x').unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::SeparatorInInput));
        assert_eq!(err.category, ErrorCategory::Input);
    }

    #[test]
    fn test_separator_not_in_grid() {
        let err = encode("hello", &classic_grid(), 'j').unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::InvalidSeparator));
    }

    #[test]
    fn test_character_not_in_grid() {
        let err = encode("hello world", &classic_grid(), 'x').unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::CharacterNotInGrid));
        assert_eq!(err.category, ErrorCategory::Input);
    }

    #[test]
    fn test_encoder_value() {
        let encoder = Encoder::new(classic_grid(), 'x').unwrap();
        assert_eq!(encoder.separator(), 'x');
        assert_eq!(encoder.encode("hi").unwrap(), "bm");
        assert_eq!(encoder.grid().width(), 5);

        let err = Encoder::new(classic_grid(), 'j').unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::InvalidSeparator));
    }

    #[test]
    fn test_encoder_shared_across_threads() {
        let encoder = std::sync::Arc::new(Encoder::new(classic_grid(), 'x').unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let encoder = encoder.clone();
                std::thread::spawn(move || encoder.encode("hidethegold").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), encoder.encode("hidethegold").unwrap());
        }
    }
}
