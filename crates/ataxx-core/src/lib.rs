//! Core types for Ataxx.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Color`] for the two players and [`Piece`] for cell contents
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for move representation and its text notation
//! - Board notation splitting and serialization via [`FenFields`]

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::FenFields;
pub use mov::{Move, MoveError};
pub use piece::Piece;
pub use square::{File, Rank, Square};
