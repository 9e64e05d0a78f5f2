// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Multi-deck cards dispenser.
use log::{debug, info};
use serde::Deserialize;
use std::fmt;

use crate::{
    card::{Card, Face, Suit},
    error::DeckError,
    rng::{Randomness, SharedRng},
};

/// Deck creation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Number of standard 52 cards decks merged together.
    pub decks: u32,
    /// Number of jokers.
    pub jokers: u32,
    /// Number of shuffle markers.
    pub shuffle_markers: u32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            decks: 1,
            jokers: 0,
            shuffle_markers: 0,
        }
    }
}

/// Why a deck reshuffled itself while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleReason {
    /// All regular cards and jokers had been drawn.
    Exhausted,
    /// A shuffle marker has been drawn.
    ShuffleMarker,
}

/// Cards in a standard deck.
const STANDARD_DECK: usize = Suit::COUNT * Face::COUNT;

type ShuffleListener = Box<dyn FnMut(ShuffleReason) + Send>;

/// Cards drawn since the last shuffle.
#[derive(Debug, Default, Clone)]
struct Drawn {
    cards: [[u32; Face::COUNT]; Suit::COUNT],
    jokers: u32,
}

/// A composite deck of cards.
///
/// The deck doesn't store cards, it counts how many times each card has been
/// drawn since the last shuffle and never deals a card more times than the
/// number of merged decks. Drawing from an exhausted deck, or drawing a shuffle
/// marker, puts all cards back in the deck.
pub struct Deck<R = SharedRng> {
    copies: u32,
    jokers: u32,
    shuffle_markers: u32,
    drawn: Drawn,
    rng: R,
    listener: Option<ShuffleListener>,
}

impl Deck {
    /// The number of cards in a standard deck.
    pub const SIZE: usize = STANDARD_DECK;

    /// Creates a deck that draws from the process wide random generator.
    pub fn new(config: DeckConfig) -> Result<Self, DeckError> {
        Self::with_rng(config, SharedRng)
    }
}

impl<R: Randomness> Deck<R> {
    /// Creates a deck with user provided randomness.
    pub fn with_rng(config: DeckConfig, rng: R) -> Result<Self, DeckError> {
        if config.decks == 0 {
            return Err(DeckError::NoDecks(config.decks));
        }

        (config.decks as usize)
            .checked_mul(STANDARD_DECK)
            .and_then(|n| n.checked_add(config.jokers as usize))
            .and_then(|n| n.checked_add(config.shuffle_markers as usize))
            .ok_or(DeckError::TooManyCards {
                decks: config.decks,
                jokers: config.jokers,
                shuffle_markers: config.shuffle_markers,
            })?;

        Ok(Self {
            copies: config.decks,
            jokers: config.jokers,
            shuffle_markers: config.shuffle_markers,
            drawn: Drawn::default(),
            rng,
            listener: None,
        })
    }

    /// Registers a callback invoked every time drawing reshuffles the deck.
    pub fn on_shuffle<F>(&mut self, f: F)
    where
        F: FnMut(ShuffleReason) + Send + 'static,
    {
        self.listener = Some(Box::new(f));
    }

    /// Draws a card from the deck.
    ///
    /// A joker, a shuffle marker or a regular card is selected in proportion
    /// to the cards still in the deck. If the randomly picked regular card has
    /// no copies left the first available card after it is returned instead.
    pub fn draw(&mut self) -> Card {
        if self.all_cards_drawn() && self.all_jokers_drawn() {
            info!("All cards have been drawn. Shuffling...");
            self.reset();
            info!("The deck has been shuffled");
            self.notify(ShuffleReason::Exhausted);
        }

        let remaining_jokers = self.remaining_jokers();
        let shuffle_markers = self.shuffle_markers as usize;

        // Shuffle markers are not part of the available cards count, they
        // take their slots from the range of regular cards.
        let pick = self.rng.below(self.available_cards());

        if pick < remaining_jokers {
            self.drawn.jokers += 1;
            return Card::JOKER;
        }

        if pick < remaining_jokers + shuffle_markers {
            info!("A shuffle marker has been drawn. Shuffling...");
            self.reset();
            info!("The deck has been shuffled");
            self.notify(ShuffleReason::ShuffleMarker);
            return Card::SHUFFLE_MARKER;
        }

        let suit = self.rng.below(Suit::COUNT);
        let face = self.rng.below(Face::COUNT);

        let (suit, face) = if self.drawn.cards[suit][face] < self.copies {
            (suit, face)
        } else {
            // The exhaustion check above leaves at least one regular card.
            let Some(next) = self.next_available(suit, face) else {
                unreachable!("No regular card available in a non exhausted deck");
            };
            next
        };

        self.drawn.cards[suit][face] += 1;
        Card::new(Face::FACES[face], Suit::SUITS[suit])
    }

    /// Puts all drawn cards back in the deck.
    pub fn shuffle(&mut self) {
        self.reset();
        debug!("The deck has been shuffled");
    }

    /// Returns the number of regular cards and jokers not yet drawn.
    ///
    /// Shuffle markers are not counted.
    pub fn available_cards(&self) -> usize {
        let regular = self
            .drawn
            .cards
            .iter()
            .flatten()
            .map(|&n| (self.copies - n) as usize)
            .sum::<usize>();
        self.remaining_jokers() + regular
    }

    /// Checks if all regular cards have been drawn.
    pub fn all_cards_drawn(&self) -> bool {
        self.drawn.cards.iter().flatten().all(|&n| n == self.copies)
    }

    /// Checks if all jokers have been drawn.
    pub fn all_jokers_drawn(&self) -> bool {
        self.drawn.jokers == self.jokers
    }

    /// Number of standard decks merged in this deck.
    pub fn copies(&self) -> u32 {
        self.copies
    }

    /// Number of regular cards in the deck.
    pub fn total_cards(&self) -> usize {
        self.copies as usize * STANDARD_DECK
    }

    /// Number of jokers in the deck.
    pub fn joker_count(&self) -> u32 {
        self.jokers
    }

    /// Number of shuffle markers in the deck.
    pub fn shuffle_marker_count(&self) -> u32 {
        self.shuffle_markers
    }

    /// Number of jokers drawn since the last shuffle.
    pub fn jokers_drawn(&self) -> u32 {
        self.drawn.jokers
    }

    /// Number of times a card has been drawn since the last shuffle.
    ///
    /// Shuffle markers are never counted and always return zero.
    pub fn occurrences(&self, card: Card) -> u32 {
        if card.is_joker() {
            self.drawn.jokers
        } else if card.is_regular() {
            self.drawn.cards[card.suit().index()][card.face().index()]
        } else {
            0
        }
    }

    /// Number of regular cards and jokers drawn since the last shuffle.
    pub fn drawn_cards(&self) -> usize {
        let regular = self
            .drawn
            .cards
            .iter()
            .flatten()
            .map(|&n| n as usize)
            .sum::<usize>();
        self.drawn.jokers as usize + regular
    }

    fn remaining_jokers(&self) -> usize {
        (self.jokers - self.drawn.jokers) as usize
    }

    /// Finds the first card after (suit, face) that has copies left.
    ///
    /// Scans the remaining faces of `suit` and all the following suits, then
    /// wraps around from the first suit up to and including `suit`.
    fn next_available(&self, suit: usize, face: usize) -> Option<(usize, usize)> {
        let after = (suit..Suit::COUNT).flat_map(|s| {
            let start = if s == suit { face } else { 0 };
            (start..Face::COUNT).map(move |f| (s, f))
        });
        let before = (0..=suit).flat_map(|s| (0..Face::COUNT).map(move |f| (s, f)));

        after
            .chain(before)
            .find(|&(s, f)| self.drawn.cards[s][f] < self.copies)
    }

    fn reset(&mut self) {
        self.drawn = Drawn::default();
    }

    fn notify(&mut self, reason: ShuffleReason) {
        if let Some(listener) = self.listener.as_mut() {
            listener(reason);
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Deck<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deck")
            .field("copies", &self.copies)
            .field("jokers", &self.jokers)
            .field("shuffle_markers", &self.shuffle_markers)
            .field("drawn", &self.drawn)
            .field("rng", &self.rng)
            .finish_non_exhaustive()
    }
}

/// Creates a deck made of `decks` standard decks, `jokers` jokers and
/// `shuffle_markers` shuffle markers.
pub fn create_deck(decks: u32, jokers: u32, shuffle_markers: u32) -> Result<Deck, DeckError> {
    Deck::new(DeckConfig {
        decks,
        jokers,
        shuffle_markers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::{HashMap, HashSet};
    use parking_lot::Mutex;
    use rand::{SeedableRng, rngs::StdRng};
    use std::{collections::VecDeque, sync::Arc};

    /// Randomness that replays a fixed script of values.
    #[derive(Debug, Default)]
    struct Scripted(VecDeque<usize>);

    impl Scripted {
        fn push(&mut self, values: &[usize]) {
            self.0.extend(values);
        }
    }

    impl Randomness for Scripted {
        fn below(&mut self, upper: usize) -> usize {
            let v = self.0.pop_front().expect("script exhausted");
            assert!(v < upper, "scripted value {v} out of range 0..{upper}");
            v
        }
    }

    fn scripted_deck(decks: u32, jokers: u32, shuffle_markers: u32) -> Deck<Scripted> {
        let config = DeckConfig {
            decks,
            jokers,
            shuffle_markers,
        };
        Deck::with_rng(config, Scripted::default()).unwrap()
    }

    fn seeded_deck(decks: u32, jokers: u32, shuffle_markers: u32) -> Deck<StdRng> {
        let config = DeckConfig {
            decks,
            jokers,
            shuffle_markers,
        };
        Deck::with_rng(config, StdRng::seed_from_u64(13)).unwrap()
    }

    fn record_shuffles<R: Randomness>(deck: &mut Deck<R>) -> Arc<Mutex<Vec<ShuffleReason>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let tx = events.clone();
        deck.on_shuffle(move |reason| tx.lock().push(reason));
        events
    }

    /// Marks all regular cards as drawn except the `keep` ones.
    fn exhaust_all_but<R: Randomness>(deck: &mut Deck<R>, keep: &[(usize, usize)]) {
        for s in 0..Suit::COUNT {
            for f in 0..Face::COUNT {
                if !keep.contains(&(s, f)) {
                    deck.drawn.cards[s][f] = deck.copies;
                }
            }
        }
    }

    fn assert_bounds<R: Randomness>(deck: &Deck<R>) {
        assert!(deck.drawn.cards.iter().flatten().all(|&n| n <= deck.copies));
        assert!(deck.drawn.jokers <= deck.jokers);
    }

    #[test]
    fn create() {
        let deck = create_deck(6, 2, 1).unwrap();
        assert_eq!(deck.copies(), 6);
        assert_eq!(deck.total_cards(), 312);
        assert_eq!(deck.joker_count(), 2);
        assert_eq!(deck.shuffle_marker_count(), 1);
        assert_eq!(deck.jokers_drawn(), 0);
        assert_eq!(deck.drawn_cards(), 0);
        assert_eq!(deck.available_cards(), 314);
        assert!(!deck.all_cards_drawn());
        assert!(!deck.all_jokers_drawn());

        let deck = Deck::new(DeckConfig::default()).unwrap();
        assert_eq!(deck.available_cards(), 52);
        assert!(deck.all_jokers_drawn());
    }

    #[test]
    fn config_from_json() {
        let config: DeckConfig = serde_json::from_str(r#"{"decks": 6, "jokers": 2}"#).unwrap();
        assert_eq!(
            config,
            DeckConfig {
                decks: 6,
                jokers: 2,
                shuffle_markers: 0,
            }
        );

        let config: DeckConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DeckConfig::default());
    }

    #[test]
    fn create_without_decks() {
        assert_eq!(create_deck(0, 2, 1).unwrap_err(), DeckError::NoDecks(0));
    }

    #[test]
    fn available_cards_excludes_shuffle_markers() {
        let deck = scripted_deck(1, 4, 1);
        assert_eq!(deck.available_cards(), 52 + 4);
    }

    #[test]
    fn draw_all_cards_then_reshuffle() {
        let mut deck = scripted_deck(1, 0, 0);
        let events = record_shuffles(&mut deck);

        for s in 0..Suit::COUNT {
            for f in 0..Face::COUNT {
                deck.rng.push(&[0, s, f]);
            }
        }

        let mut cards = HashSet::default();
        for n in 0..Deck::SIZE {
            let card = deck.draw();
            assert!(card.is_regular());
            assert!(cards.insert(card));
            assert_eq!(deck.available_cards(), 51 - n);
        }

        assert!(deck.all_cards_drawn());
        assert!(deck.all_jokers_drawn());
        assert!(events.lock().is_empty());

        // The next draw puts all cards back before drawing.
        deck.rng.push(&[51, 2, 12]);
        let card = deck.draw();
        assert_eq!(card, Card::new(Face::King, Suit::Spades));
        assert_eq!(*events.lock(), vec![ShuffleReason::Exhausted]);
        assert_eq!(deck.available_cards(), 51);
        assert_eq!(deck.occurrences(card), 1);
    }

    #[test]
    fn draw_joker() {
        let mut deck = scripted_deck(1, 2, 0);

        deck.rng.push(&[1]);
        assert_eq!(deck.draw(), Card::JOKER);
        assert_eq!(deck.jokers_drawn(), 1);
        assert_eq!(deck.available_cards(), 53);

        // Only one joker left so slot 1 is a regular card.
        deck.rng.push(&[1, 0, 0]);
        assert_eq!(deck.draw(), Card::new(Face::Ace, Suit::Hearts));

        deck.rng.push(&[0]);
        assert_eq!(deck.draw(), Card::JOKER);
        assert!(deck.all_jokers_drawn());
        assert_eq!(deck.occurrences(Card::JOKER), 2);
    }

    #[test]
    fn only_jokers_left() {
        let mut deck = scripted_deck(1, 2, 3);
        exhaust_all_but(&mut deck, &[]);
        assert!(deck.all_cards_drawn());
        assert_eq!(deck.available_cards(), 2);

        deck.rng.push(&[1]);
        assert_eq!(deck.draw(), Card::JOKER);
        deck.rng.push(&[0]);
        assert_eq!(deck.draw(), Card::JOKER);
        assert_eq!(deck.available_cards(), 0);

        let events = record_shuffles(&mut deck);
        deck.rng.push(&[0]);
        assert_eq!(deck.draw(), Card::JOKER);
        assert_eq!(*events.lock(), vec![ShuffleReason::Exhausted]);
        assert_eq!(deck.jokers_drawn(), 1);
    }

    #[test]
    fn shuffle_marker_resets_everything() {
        let mut deck = scripted_deck(1, 4, 1);
        let events = record_shuffles(&mut deck);

        deck.rng.push(&[0]);
        assert_eq!(deck.draw(), Card::JOKER);

        deck.rng.push(&[10, 1, 2]);
        let card = deck.draw();
        assert_eq!(card, Card::new(Face::Three, Suit::Diamonds));
        assert_eq!(deck.drawn_cards(), 2);

        // Three jokers left, the shuffle marker takes slot 3.
        deck.rng.push(&[3]);
        assert_eq!(deck.draw(), Card::SHUFFLE_MARKER);
        assert_eq!(*events.lock(), vec![ShuffleReason::ShuffleMarker]);

        assert_eq!(deck.jokers_drawn(), 0);
        assert_eq!(deck.occurrences(card), 0);
        assert_eq!(deck.drawn_cards(), 0);
        assert_eq!(deck.available_cards(), 56);
        assert!(deck.drawn.cards.iter().flatten().all(|&n| n == 0));
    }

    #[test]
    fn shuffle_marker_on_exhausted_regular_cards() {
        let mut deck = scripted_deck(2, 0, 2);
        exhaust_all_but(&mut deck, &[(3, 4)]);
        assert_eq!(deck.available_cards(), 2);

        // Markers are not in the available count but still take slots 0 and 1.
        deck.rng.push(&[1]);
        assert_eq!(deck.draw(), Card::SHUFFLE_MARKER);
        assert_eq!(deck.available_cards(), 104);
    }

    #[test]
    fn fallback_after_drawn_card() {
        let mut deck = scripted_deck(1, 0, 0);
        exhaust_all_but(&mut deck, &[(1, 3), (2, 7)]);

        deck.rng.push(&[0, 1, 5]);
        assert_eq!(deck.draw(), Card::new(Face::Eight, Suit::Spades));

        // Wraps around to the start of the deck.
        deck.rng.push(&[0, 2, 8]);
        assert_eq!(deck.draw(), Card::new(Face::Four, Suit::Diamonds));
        assert!(deck.all_cards_drawn());
    }

    #[test]
    fn fallback_in_same_suit() {
        let mut deck = scripted_deck(1, 0, 0);
        exhaust_all_but(&mut deck, &[(2, 1)]);

        deck.rng.push(&[0, 2, 5]);
        assert_eq!(deck.draw(), Card::new(Face::Two, Suit::Spades));
    }

    #[test]
    fn fallback_to_first_card() {
        let mut deck = scripted_deck(1, 0, 0);
        exhaust_all_but(&mut deck, &[(0, 0)]);

        deck.rng.push(&[0, 3, 12]);
        assert_eq!(deck.draw(), Card::new(Face::Ace, Suit::Hearts));
    }

    #[test]
    fn fallback_finds_last_card() {
        for s in 0..Suit::COUNT {
            for f in 0..Face::COUNT {
                let mut deck = scripted_deck(3, 1, 0);
                exhaust_all_but(&mut deck, &[(1, 9)]);
                deck.drawn.jokers = 1;
                deck.drawn.cards[1][9] = 2;

                deck.rng.push(&[0, s, f]);
                assert_eq!(deck.draw(), Card::new(Face::Ten, Suit::Diamonds));
                assert!(deck.all_cards_drawn());
            }
        }
    }

    #[test]
    fn manual_shuffle() {
        let mut deck = seeded_deck(2, 2, 0);
        let events = record_shuffles(&mut deck);

        for _ in 0..50 {
            deck.draw();
        }
        assert_eq!(deck.drawn_cards(), 50);

        deck.shuffle();
        assert_eq!(deck.drawn_cards(), 0);
        assert_eq!(deck.jokers_drawn(), 0);
        assert_eq!(deck.available_cards(), 106);
        assert_eq!(deck.copies(), 2);
        assert_eq!(deck.joker_count(), 2);
        assert!(events.lock().is_empty());
    }

    #[test]
    fn draw_whole_deck() {
        let mut deck = seeded_deck(2, 2, 0);
        let mut counts = HashMap::<Card, u32>::default();

        for _ in 0..106 {
            *counts.entry(deck.draw()).or_default() += 1;
            assert_bounds(&deck);
        }

        assert!(deck.all_cards_drawn());
        assert!(deck.all_jokers_drawn());
        assert_eq!(deck.available_cards(), 0);
        assert_eq!(counts.len(), 53);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn never_overdraw() {
        let mut deck = seeded_deck(2, 3, 1);
        let events = record_shuffles(&mut deck);
        let mut counts = HashMap::<Card, u32>::default();
        let mut seen = 0;

        for _ in 0..20_000 {
            let card = deck.draw();

            let shuffles = events.lock().len();
            if shuffles != seen {
                seen = shuffles;
                counts.clear();
            }

            assert_bounds(&deck);
            if card.is_shuffle_marker() {
                assert_eq!(deck.drawn_cards(), 0);
                continue;
            }

            let n = counts.entry(card).or_default();
            *n += 1;
            assert!(*n <= if card.is_joker() { 3 } else { 2 });
            assert_eq!(*n, deck.occurrences(card));
            assert_eq!(deck.drawn_cards(), counts.values().sum::<u32>() as usize);
        }

        let events = events.lock();
        assert!(events.contains(&ShuffleReason::ShuffleMarker));
    }
}
