//! Sphinx - voice-driven word guessing game
//!
//! A subset of the vocabulary is shown on screen, one word is secretly
//! chosen from it, and the player must name that word by speaking.
//! Guesses are captured from the microphone and transcribed by a
//! speech-to-text service; the game core resolves each transcript
//! against the hidden target with a bounded recapture budget per guess.

pub mod audio;
pub mod config;
pub mod game;
pub mod narrator;
pub mod recognition;
pub mod words;
