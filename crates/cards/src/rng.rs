// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Random sources used for drawing cards.
use log::debug;
use parking_lot::Mutex;
use rand::{prelude::*, rngs::StdRng};
use std::sync::LazyLock;

/// The process wide generator, seeded from the OS on first use.
static SHARED_RNG: LazyLock<Mutex<StdRng>> = LazyLock::new(|| {
    debug!("Seeding the shared random generator");
    Mutex::new(StdRng::from_os_rng())
});

/// A source of uniformly distributed indices.
pub trait Randomness {
    /// Returns a uniformly distributed value in `0..upper`.
    ///
    /// Callers never pass an `upper` of zero.
    fn below(&mut self, upper: usize) -> usize;
}

impl Randomness for StdRng {
    fn below(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }
}

/// A handle to the process wide random generator.
///
/// All handles share one generator that is seeded exactly once, the first
/// time any handle draws from it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedRng;

impl Randomness for SharedRng {
    fn below(&mut self, upper: usize) -> usize {
        SHARED_RNG.lock().random_range(0..upper)
    }
}
