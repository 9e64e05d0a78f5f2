// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards definitions and display names.
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name returned by [suit_name] for a suit without a display name.
pub const INVALID_SUIT_NAME: &str = "ERROR - SUIT";

/// Name returned by [value_name] for a face without a display name.
pub const INVALID_VALUE_NAME: &str = "ERROR - VALUE";

/// A card drawn from a [Deck](crate::Deck).
///
/// A card is either a regular card, with one of the four real suits and one of
/// the thirteen real faces, a joker or a shuffle marker. Jokers and shuffle
/// markers always carry their matching sentinel face.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct Card {
    suit: Suit,
    face: Face,
}

/// Unchecked card fields, validated when deserializing a [Card].
#[derive(Deserialize)]
struct RawCard {
    suit: Suit,
    face: Face,
}

impl TryFrom<RawCard> for Card {
    type Error = String;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        Card::try_new(raw.face, raw.suit)
            .ok_or_else(|| format!("invalid card {:?} of {:?}", raw.face, raw.suit))
    }
}

impl Card {
    /// The joker card.
    pub const JOKER: Card = Card {
        suit: Suit::Joker,
        face: Face::Joker,
    };

    /// The shuffle marker card.
    pub const SHUFFLE_MARKER: Card = Card {
        suit: Suit::ShuffleMarker,
        face: Face::ShuffleMarker,
    };

    /// Create a regular card given a face and suit.
    ///
    /// Panics if either the face or the suit is a sentinel, use [Card::JOKER]
    /// and [Card::SHUFFLE_MARKER] for those.
    pub fn new(face: Face, suit: Suit) -> Card {
        match Self::try_new(face, suit) {
            Some(card) if card.is_regular() => card,
            _ => panic!("Invalid regular card {face:?} of {suit:?}"),
        }
    }

    /// Create a card if the face matches the suit.
    pub fn try_new(face: Face, suit: Suit) -> Option<Card> {
        let valid = match suit {
            Suit::Joker => face == Face::Joker,
            Suit::ShuffleMarker => face == Face::ShuffleMarker,
            _ => face.is_regular(),
        };

        valid.then_some(Card { suit, face })
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the card face.
    pub fn face(&self) -> Face {
        self.face
    }

    /// Checks if this is a joker.
    pub fn is_joker(&self) -> bool {
        self.suit == Suit::Joker
    }

    /// Checks if this is a shuffle marker.
    pub fn is_shuffle_marker(&self) -> bool {
        self.suit == Suit::ShuffleMarker
    }

    /// Checks if this is neither a joker nor a shuffle marker.
    pub fn is_regular(&self) -> bool {
        self.suit.is_regular()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Suit::Joker => write!(f, "Joker"),
            Suit::ShuffleMarker => write!(f, "Shuffle Marker"),
            _ => write!(f, "{} of {}", value_name(*self), suit_name(*self)),
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({:?}, {:?})", self.face, self.suit)
    }
}

/// Card suit.
///
/// The declaration order is the scan order used when looking for the next
/// available card, [Suit::Joker] and [Suit::ShuffleMarker] are sentinels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts suit.
    Hearts = 0,
    /// Diamonds suit.
    Diamonds,
    /// Spades suit.
    Spades,
    /// Clubs suit.
    Clubs,
    /// Joker sentinel.
    Joker,
    /// Shuffle marker sentinel.
    ShuffleMarker,
}

impl Suit {
    /// The number of real suits.
    pub const COUNT: usize = 4;

    pub(crate) const SUITS: [Suit; Self::COUNT] = [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs];

    /// Returns the real suits in scan order.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        Self::SUITS.into_iter()
    }

    /// Returns the real suit at `index` in scan order.
    pub fn from_index(index: usize) -> Option<Suit> {
        Self::SUITS.get(index).copied()
    }

    /// The suit position in scan order.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Checks if this is one of the four real suits.
    pub fn is_regular(&self) -> bool {
        self.index() < Self::COUNT
    }
}

/// Card face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Ace
    Ace = 0,
    /// Two
    Two,
    /// Three
    Three,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Joker sentinel.
    Joker,
    /// Shuffle marker sentinel.
    ShuffleMarker,
}

impl Face {
    /// The number of real faces in a suit.
    pub const COUNT: usize = 13;

    pub(crate) const FACES: [Face; Self::COUNT] = {
        use Face::*;
        [
            Ace, Two, Three, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King,
        ]
    };

    /// Returns the real faces in scan order.
    pub fn faces() -> impl DoubleEndedIterator<Item = Face> {
        Self::FACES.into_iter()
    }

    /// Returns the real face at `index` in scan order.
    pub fn from_index(index: usize) -> Option<Face> {
        Self::FACES.get(index).copied()
    }

    /// The face position in scan order.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Checks if this is one of the thirteen real faces.
    pub fn is_regular(&self) -> bool {
        self.index() < Self::COUNT
    }
}

/// Returns the display name of the card suit.
///
/// Shuffle markers have no suit name, for them this logs a diagnostic and
/// returns [INVALID_SUIT_NAME].
pub fn suit_name(card: Card) -> &'static str {
    match card.suit {
        Suit::Hearts => "Hearts",
        Suit::Diamonds => "Diamonds",
        Suit::Spades => "Spades",
        Suit::Clubs => "Clubs",
        Suit::Joker => "Joker",
        Suit::ShuffleMarker => {
            warn!("Error: the card has an invalid suit");
            INVALID_SUIT_NAME
        }
    }
}

/// Returns the display name of the card face value.
///
/// Shuffle markers have no value name, for them this logs a diagnostic and
/// returns [INVALID_VALUE_NAME].
pub fn value_name(card: Card) -> &'static str {
    match card.face {
        Face::Ace => "Ace",
        Face::Two => "Two",
        Face::Three => "Three",
        Face::Four => "Four",
        Face::Five => "Five",
        Face::Six => "Six",
        Face::Seven => "Seven",
        Face::Eight => "Eight",
        Face::Nine => "Nine",
        Face::Ten => "Ten",
        Face::Jack => "Jack",
        Face::Queen => "Queen",
        Face::King => "King",
        Face::Joker => "Joker",
        Face::ShuffleMarker => {
            warn!("Error: the card has an invalid face value");
            INVALID_VALUE_NAME
        }
    }
}
