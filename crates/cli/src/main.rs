// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardshoe command line dealer.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use std::io::{self, Write};

use cardshoe_cards::{Deck, DeckConfig, Randomness};

#[derive(Debug, Parser)]
struct Cli {
    /// Number of standard decks merged in the shoe.
    #[clap(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=64))]
    decks: u32,
    /// Number of jokers.
    #[clap(long, short, default_value_t = 0)]
    jokers: u32,
    /// Number of shuffle markers.
    #[clap(long, short = 'm', default_value_t = 0)]
    shuffle_markers: u32,
    /// Number of cards to draw.
    #[clap(long, short = 'n', default_value_t = 10)]
    draws: usize,
    /// Seed for reproducible draws.
    #[clap(long, short)]
    seed: Option<u64>,
    /// Print cards as JSON lines.
    #[clap(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = DeckConfig {
        decks: cli.decks,
        jokers: cli.jokers,
        shuffle_markers: cli.shuffle_markers,
    };

    match cli.seed {
        Some(seed) => deal(Deck::with_rng(config, StdRng::seed_from_u64(seed))?, &cli),
        None => deal(Deck::new(config)?, &cli),
    }
}

/// Draws the requested cards and prints them to stdout.
fn deal<R: Randomness>(mut deck: Deck<R>, cli: &Cli) -> Result<()> {
    info!(
        "Dealing {} cards from {} decks, {} jokers, {} shuffle markers",
        cli.draws,
        deck.copies(),
        deck.joker_count(),
        deck.shuffle_marker_count()
    );

    let mut out = io::stdout().lock();
    for _ in 0..cli.draws {
        let card = deck.draw();
        if cli.json {
            writeln!(out, "{}", serde_json::to_string(&card)?)?;
        } else {
            writeln!(out, "{card}")?;
        }
    }

    writeln!(out, "{} cards left in the deck", deck.available_cards())?;
    Ok(())
}
