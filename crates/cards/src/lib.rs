// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardshoe multi-deck cards dispenser.
//!
//! A [Deck] merges one or more standard 52 cards decks with optional jokers
//! and shuffle markers, as used by blackjack shoes. The deck tracks how many
//! times each card has been drawn and never deals a card more times than the
//! number of merged decks:
//!
//! ```
//! # use cardshoe_cards::*;
//! // A six decks shoe with two jokers and a shuffle marker.
//! let mut deck = create_deck(6, 2, 1).unwrap();
//! assert_eq!(deck.available_cards(), 6 * 52 + 2);
//!
//! let card = deck.draw();
//! if card.is_regular() {
//!     println!("{} of {}", value_name(card), suit_name(card));
//! }
//! ```
//!
//! The deck reshuffles itself when all cards have been drawn or when a shuffle
//! marker is drawn, use [Deck::on_shuffle] to get notified:
//!
//! ```
//! # use cardshoe_cards::*;
//! let mut deck = Deck::new(DeckConfig::default()).unwrap();
//! deck.on_shuffle(|reason| assert_eq!(reason, ShuffleReason::Exhausted));
//!
//! for _ in 0..Deck::SIZE {
//!     deck.draw();
//! }
//! assert!(deck.all_cards_drawn());
//!
//! deck.draw();
//! assert_eq!(deck.available_cards(), 51);
//! ```
//!
//! Decks draw from a process wide generator seeded once on first use, for
//! reproducible draws use a seeded generator:
//!
//! ```
//! # use cardshoe_cards::*;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let config = DeckConfig { decks: 2, jokers: 0, shuffle_markers: 0 };
//! let mut d1 = Deck::with_rng(config, StdRng::seed_from_u64(7)).unwrap();
//! let mut d2 = Deck::with_rng(config, StdRng::seed_from_u64(7)).unwrap();
//! assert!((0..100).all(|_| d1.draw() == d2.draw()));
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod card;
mod deck;
mod error;
mod rng;

pub use card::{Card, Face, INVALID_SUIT_NAME, INVALID_VALUE_NAME, Suit, suit_name, value_name};
pub use deck::{Deck, DeckConfig, ShuffleReason, create_deck};
pub use error::DeckError;
pub use rng::{Randomness, SharedRng};
