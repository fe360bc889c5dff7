//! Ciphertext to plaintext

use crate::digraph::{self, Direction};
use crate::error::{ErrorKind, PlayfairError, Result};
use crate::grid::Grid;

/// Decode `ciphertext` through `grid`.
///
/// With `Some(separator)`, every occurrence of the separator is removed
/// from the recovered text, whether it was padding or not. With `None`
/// the recovered text is returned as is.
pub fn decode(ciphertext: &str, grid: &Grid, separator: Option<char>) -> Result<String> {
    let chars: Vec<char> = ciphertext.chars().collect();
    if chars.len() % 2 == 1 {
        return Err(PlayfairError::input(
            ErrorKind::OddLengthInput,
            format!(
                "ciphertext must have an even number of characters, got {}",
                chars.len()
            ),
        ));
    }

    let mut raw = Vec::with_capacity(chars.len());
    for pair in chars.chunks_exact(2) {
        let a = digraph::locate(grid, pair[0])?;
        let b = digraph::locate(grid, pair[1])?;
        if a == b {
            return Err(PlayfairError::input(
                ErrorKind::InvalidCiphertext,
                format!("digraph {:?}{:?} cannot occur in ciphertext", pair[0], pair[1]),
            ));
        }
        let (a, b) = digraph::substitute(grid, a, b, Direction::Backward);
        raw.push(grid.char_at(a));
        raw.push(grid.char_at(b));
    }

    Ok(match separator {
        Some(sep) => raw.into_iter().filter(|&c| c != sep).collect(),
        None => raw.into_iter().collect(),
    })
}

/// A grid and optional separator bundled for repeated decoding.
#[derive(Debug, Clone)]
pub struct Decoder {
    grid: Grid,
    separator: Option<char>,
}

impl Decoder {
    pub fn new(grid: Grid, separator: Option<char>) -> Self {
        Self { grid, separator }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn separator(&self) -> Option<char> {
        self.separator
    }

    pub fn decode(&self, ciphertext: &str) -> Result<String> {
        decode(ciphertext, &self.grid, self.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::error::ErrorCategory;

    fn classic_grid() -> Grid {
        let alphabet: Vec<char> = ('a'..='z').filter(|&c| c != 'j').collect();
        Grid::build(&alphabet, 5, 5, "playfairexample", 'x').unwrap()
    }

    #[test]
    fn test_known_vector() {
        let grid = classic_grid();
        let pt = decode("bmodzbxdnabekudmuixmmouvif", &grid, None).unwrap();
        assert_eq!(pt, "hidethegoldinthetrexestump");
    }

    #[test]
    fn test_separator_stripped() {
        let grid = classic_grid();
        let ct = encode("hello", &grid, 'x').unwrap();
        assert_eq!(decode(&ct, &grid, None).unwrap(), "helxlo");
        assert_eq!(decode(&ct, &grid, Some('x')).unwrap(), "hello");
    }

    #[test]
    fn test_stripping_is_lossy() {
        // The classical vector contains genuine x's; they are stripped too.
        let grid = classic_grid();
        let pt = decode("bmodzbxdnabekudmuixmmouvif", &grid, Some('x')).unwrap();
        assert_eq!(pt, "hidethegoldinthetreestump");
    }

    #[test]
    fn test_odd_length() {
        // 'j' is not in the grid, but the length check comes first
        let err = decode("abj", &classic_grid(), Some('x')).unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::OddLengthInput));
        assert_eq!(err.category, ErrorCategory::Input);
    }

    #[test]
    fn test_character_not_in_grid() {
        let err = decode("abjk", &classic_grid(), Some('x')).unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::CharacterNotInGrid));
    }

    #[test]
    fn test_identical_digraph_rejected() {
        let err = decode("abcc", &classic_grid(), Some('x')).unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::InvalidCiphertext));
        assert!(!err.is_internal());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode("", &classic_grid(), Some('x')).unwrap(), "");
    }

    #[test]
    fn test_decoder_value() {
        let decoder = Decoder::new(classic_grid(), Some('x'));
        assert_eq!(decoder.separator(), Some('x'));
        assert_eq!(decoder.grid().height(), 5);
        assert_eq!(decoder.decode("bm").unwrap(), "hi");
    }
}
