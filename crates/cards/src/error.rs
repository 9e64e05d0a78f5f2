// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deck errors.
use thiserror::Error;

/// Errors returned when creating a deck.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    /// A deck needs at least one standard deck of cards.
    #[error("a deck must contain at least one standard deck, got {0}")]
    NoDecks(u32),
    /// The composite deck size does not fit in memory indices.
    #[error("too many cards: {decks} decks, {jokers} jokers, {shuffle_markers} shuffle markers")]
    TooManyCards {
        /// Number of standard decks.
        decks: u32,
        /// Number of jokers.
        jokers: u32,
        /// Number of shuffle markers.
        shuffle_markers: u32,
    },
}
