//! Candidate target words and random word selection.

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// The fixed list of words the player may be asked to spell.
///
/// Entries are trimmed and upper-cased on construction; blank entries are
/// dropped.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    words: Vec<String>,
}

impl WordBank {
    /// Build a bank from raw entries; fails if nothing usable remains.
    pub fn new<I, S>(entries: I) -> GameResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = entries
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(GameError::EmptyWordBank);
        }
        Ok(Self { words })
    }

    /// Build the bank from [`GameConfig::words`].
    pub fn from_config(config: &GameConfig) -> GameResult<Self> {
        Self::new(&config.words)
    }

    /// First word; the game always opens with it.
    pub fn first(&self) -> &str {
        &self.words[0]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Draw a random word, avoiding `current` whenever another word exists.
    pub fn pick_next(&self, current: &str, rng: &mut impl Rng) -> String {
        let others: Vec<&String> = self.words.iter().filter(|w| *w != current).collect();
        match others.choose(rng) {
            Some(word) => (*word).clone(),
            None => current.to_string(),
        }
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self {
            words: crate::constants::DEFAULT_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

/// Number of letters in a word, counting characters rather than bytes.
pub fn word_len(word: &str) -> usize {
    word.chars().count()
}
