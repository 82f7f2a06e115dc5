use rand::Rng;
use rand::seq::SliceRandom;
use crate::error::{Result, RouletteError};

/// Shuffle bag of image indices, drawn without replacement from the end.
#[derive(Debug, Clone)]
pub struct Deck {
    indices: Vec<usize>,
}

impl Deck {
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, &mut rand::rng())
    }

    pub fn with_rng<R: Rng>(count: usize, rng: &mut R) -> Self {
        let mut indices: Vec<usize> = (0..count).collect();
        indices.shuffle(rng);
        Self { indices }
    }

    /// Removes the next index. The flag is `true` when this draw emptied the deck.
    pub fn draw(&mut self) -> Result<(usize, bool)> {
        let index = self.indices.pop().ok_or(RouletteError::DeckExhausted)?;
        Ok((index, self.is_empty()))
    }

    pub fn remaining(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
