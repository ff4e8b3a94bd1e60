//! Game session state machine
//!
//! Owns the hidden target, the displayed word set, and the guess budget.
//! Runs the introduction, then one round per remaining guess, and decides
//! the terminal outcome. A fatal round always ends the session; only
//! failed recaptures are retried, and only inside a round.

use std::time::Duration;

use crate::config::GameConfig;
use crate::game::round::{run_round, RoundResult};
use crate::narrator::Narrator;
use crate::recognition::SpeechRecognizer;
use crate::words::WordSet;

const GREETING: &str =
    "Hello, my name is Bella, and I am your instructor for this game.";
const WORDS_ON_SCREEN: &str =
    "The words are on your screen. Go through them and we will start the game.";
const START: &str = "Let's start the game.";
const QUIT_HINT: &str = "Say 'quit' to end the game.";
const WIN_MESSAGE: &str = "Kudos, you successfully guessed the word. Well done!";
const WRONG_IN_LIST: &str = "No. This is not the word. Try again.";
const WRONG_OFF_LIST: &str = "Way off. That word is not even in the list. Try again.";
const QUIT_MESSAGE: &str = "Quitting the game.";
const FAREWELL: &str = "Thanks for playing. See you next time.";

/// Terminal result of one session.
///
/// The sole externally observable outcome of a game; the hosting binary
/// maps it to an exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The player named the target word
    Won,
    /// The guess budget ran out; carries the revealed target
    LostOutOfAttempts(String),
    /// The player spoke the quit keyword
    QuitByPlayer,
    /// An irrecoverable capture or service error ended the game
    AbortedOnError(String),
}

impl SessionOutcome {
    /// Returns a human-readable description of the outcome
    pub fn description(&self) -> &'static str {
        match self {
            SessionOutcome::Won => "Player guessed the word",
            SessionOutcome::LostOutOfAttempts(_) => "Player ran out of guesses",
            SessionOutcome::QuitByPlayer => "Player quit the game",
            SessionOutcome::AbortedOnError(_) => "Session aborted on error",
        }
    }

    /// Whether this outcome should map to a failing exit status
    pub fn is_error(&self) -> bool {
        matches!(self, SessionOutcome::AbortedOnError(_))
    }
}

/// Session rule set, fixed at construction.
#[derive(Debug, Clone)]
pub struct GameRules {
    /// Total rounds before a forced loss
    pub total_guesses: u32,
    /// Recapture attempts per round
    pub retry_limit: u32,
    /// Spoken word ending the session voluntarily
    pub quit_keyword: String,
    /// Pause for the player to study the word list before round one
    pub study_pause: Duration,
}

impl Default for GameRules {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl GameRules {
    /// Build the rule set from config.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            total_guesses: config.total_guesses,
            retry_limit: config.retry_limit,
            quit_keyword: config.quit_keyword.clone(),
            study_pause: Duration::from_secs(3),
        }
    }

    /// Drop the study pause so tests run instantly.
    pub fn without_pauses(mut self) -> Self {
        self.study_pause = Duration::ZERO;
        self
    }
}

/// One game session over a fixed word set and hidden target.
pub struct GameSession {
    words: WordSet,
    target: String,
    rules: GameRules,
}

impl GameSession {
    /// Create a session. `target` must be a member of `words`; the word
    /// source guarantees this in production.
    pub fn new(words: WordSet, target: String, rules: GameRules) -> Self {
        if !words.contains(&target) {
            tracing::warn!("Target '{}' is not in the displayed word set", target);
        }
        Self {
            words,
            target,
            rules,
        }
    }

    /// The displayed word set.
    pub fn words(&self) -> &WordSet {
        &self.words
    }

    /// Run the session to completion and return its terminal outcome.
    pub fn run<R, N>(&self, recognizer: &mut R, narrator: &N) -> SessionOutcome
    where
        R: SpeechRecognizer,
        N: Narrator,
    {
        tracing::info!(
            "Session started: {} words, {} guesses, retry limit {}",
            self.words.len(),
            self.rules.total_guesses,
            self.rules.retry_limit
        );

        self.introduce(narrator);
        let outcome = self.play(recognizer, narrator);
        narrator.announce(FAREWELL);

        tracing::info!("Session ended: {}", outcome.description());
        outcome
    }

    /// Introduction phase: rules, word display, study pause.
    fn introduce<N: Narrator>(&self, narrator: &N) {
        narrator.announce(GREETING);
        narrator.announce(&format!(
            "A list of {} words will be displayed on your screen, out of which \
             I will select one word at random. You have to guess which word \
             I have selected. You have {} guesses to guess that word.",
            self.words.len(),
            self.rules.total_guesses
        ));

        // Screen-only presentation; the word list itself is never spoken
        clear_screen();
        for word in self.words.words() {
            println!("{}", word);
        }
        println!("{}", QUIT_HINT);

        narrator.announce(WORDS_ON_SCREEN);
        if !self.rules.study_pause.is_zero() {
            std::thread::sleep(self.rules.study_pause);
        }
        narrator.announce(START);
    }

    /// Playing phase: one round per remaining guess.
    fn play<R, N>(&self, recognizer: &mut R, narrator: &N) -> SessionOutcome
    where
        R: SpeechRecognizer,
        N: Narrator,
    {
        let total = self.rules.total_guesses;

        for attempt in 0..total {
            println!("Guess {} of {}", attempt + 1, total);

            let result = run_round(
                recognizer,
                narrator,
                self.rules.retry_limit,
                &self.rules.quit_keyword,
            );
            tracing::info!("Round {} resolved: {:?}", attempt + 1, result);

            match result {
                RoundResult::Fatal(reason) => {
                    narrator.announce(&reason);
                    return SessionOutcome::AbortedOnError(reason);
                }
                RoundResult::Quit => {
                    narrator.announce(QUIT_MESSAGE);
                    return SessionOutcome::QuitByPlayer;
                }
                RoundResult::Guessed(text) => {
                    narrator.announce(&format!("You said {}", text));

                    if text.to_lowercase() == self.target.to_lowercase() {
                        narrator.announce(WIN_MESSAGE);
                        return SessionOutcome::Won;
                    }

                    if attempt < total - 1 {
                        // Membership is checked on the text as spoken;
                        // casing differences read as "not in the list"
                        if self.words.contains(&text) {
                            narrator.announce(WRONG_IN_LIST);
                        } else {
                            narrator.announce(WRONG_OFF_LIST);
                        }
                    } else {
                        narrator.announce(&format!(
                            "This is not that word either. You have used all your \
                             attempts. Hard luck! The selected word was: {}. \
                             Game ends here. You lose.",
                            self.target
                        ));
                        return SessionOutcome::LostOutOfAttempts(self.target.clone());
                    }
                }
            }
        }

        // Unreachable when total_guesses > 0; the last round always
        // resolves the session above
        tracing::warn!("Guess loop completed without a terminal round");
        SessionOutcome::LostOutOfAttempts(self.target.clone())
    }
}

/// Clear the terminal and home the cursor.
fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}
