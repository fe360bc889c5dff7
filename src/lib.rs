//! Playfair - keyed digraph substitution over arbitrary alphabets
//!
//! The core is three pure operations: [`build_grid`] lays an alphabet out
//! into a keyed grid, [`encode`] and [`decode`] run text through it using
//! the classical Playfair digraph rules.
//!
//! ```
//! let alphabet: Vec<char> = ('a'..='z').filter(|&c| c != 'j').collect();
//! let grid = playfair::build_grid(&alphabet, 5, 5, "playfairexample", 'x').unwrap();
//!
//! let ciphertext = playfair::encode("hello", &grid, 'x').unwrap();
//! let plaintext = playfair::decode(&ciphertext, &grid, Some('x')).unwrap();
//! assert_eq!(plaintext, "hello");
//! ```
//!
//! Playfair is a classical teaching cipher and offers no confidentiality.

#![forbid(unsafe_code)]

pub mod config;
pub mod decoder;
pub mod digraph;
pub mod encoder;
pub mod error;
pub mod file_ops;
pub mod grid;
pub mod key;

pub use decoder::{Decoder, decode};
pub use encoder::{Encoder, encode};
pub use error::{ErrorCategory, ErrorKind, PlayfairError, Result};
pub use grid::{Grid, Position, build_grid};
