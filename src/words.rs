//! Vocabulary and word selection
//!
//! Holds the built-in word list and the random selection logic for one
//! session: a distinct subset of display words, and a hidden target drawn
//! from that subset. Both are picked once at session start; the game core
//! never touches the RNG afterwards.

use anyhow::{ensure, Result};
use rand::seq::IndexedRandom;
use rand::Rng;

/// Built-in vocabulary the display subset is sampled from.
pub const VOCABULARY: &[&str] = &[
    "apple", "mango", "grape", "banana", "cherry", "papaya", "orange", "peach", "lemon",
    "plum", "guitar", "piano", "violin", "trumpet", "drum", "flute", "river", "mountain",
    "valley", "forest", "island", "desert", "meadow", "harbour", "glacier", "canyon",
    "pencil", "ladder", "mirror", "candle", "basket", "bottle", "garden", "window",
    "bridge", "castle", "lantern", "anchor", "compass", "saddle", "hammer", "needle",
    "barrel", "whistle", "ribbon", "marble", "feather", "shadow", "thunder", "blossom",
];

/// The ordered set of words shown to the player for one session.
///
/// Invariants enforced at construction: non-empty, all entries distinct.
/// The set is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSet {
    words: Vec<String>,
}

impl WordSet {
    /// Build a word set from explicit words, validating the invariants.
    pub fn new(words: Vec<String>) -> Result<Self> {
        ensure!(!words.is_empty(), "word set must not be empty");
        for (i, word) in words.iter().enumerate() {
            ensure!(
                !words[..i].contains(word),
                "word set contains duplicate entry: {}",
                word
            );
        }
        Ok(Self { words })
    }

    /// Sample `count` distinct words from the built-in vocabulary.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Result<Self> {
        ensure!(
            count > 0 && count <= VOCABULARY.len(),
            "word count must be between 1 and {}, got {}",
            VOCABULARY.len(),
            count
        );

        let indices = rand::seq::index::sample(rng, VOCABULARY.len(), count);
        let words = indices
            .iter()
            .map(|i| VOCABULARY[i].to_string())
            .collect::<Vec<_>>();

        tracing::debug!("Drew {} words from vocabulary", words.len());
        Self::new(words)
    }

    /// Pick the hidden target uniformly from this set.
    pub fn pick_target<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.words
            .choose(rng)
            .expect("word set is non-empty by construction")
            .clone()
    }

    /// Whether `word` appears in the set, compared exactly as spoken.
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// The display words, in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; kept for API completeness alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
