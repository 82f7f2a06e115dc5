use std::thread;
use std::time::Duration;
use rand::Rng;
use crate::constants::*;
use crate::deck::Deck;
use crate::error::{Result, RouletteError};

/// Plays the flicker sequence that precedes every draw.
#[derive(Debug, Clone)]
pub struct Animator {
    image_count: usize,
    steps: usize,
    interval: Duration,
}

impl Animator {
    pub fn new(image_count: usize) -> Self {
        Self::with_timing(image_count, FLICKER_STEPS, FLICKER_INTERVAL)
    }

    pub fn with_timing(image_count: usize, steps: usize, interval: Duration) -> Self {
        Self { image_count, steps, interval }
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }

    /// Flickers through random images, then draws the next deck entry.
    ///
    /// `on_frame` sees every displayed index, the committed draw last.
    /// Returns `true` when the draw exhausted the deck. Blocks the calling
    /// thread for `steps * interval`.
    pub fn play<R, F>(&self, deck: &mut Deck, rng: &mut R, mut on_frame: F) -> Result<bool>
    where
        R: Rng,
        F: FnMut(usize),
    {
        if self.image_count == 0 {
            return Err(RouletteError::EmptyImageSet);
        }

        for _ in 0..self.steps {
            on_frame(rng.random_range(0..self.image_count));
            thread::sleep(self.interval);
        }

        let (index, exhausted) = deck.draw()?;
        on_frame(index);
        Ok(exhausted)
    }
}
