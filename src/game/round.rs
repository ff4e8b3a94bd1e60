//! Round resolution: one guess attempt with bounded recapture
//!
//! A round repeatedly asks the recognizer for a clip until a transcript
//! arrives, the recapture budget runs out, or the service fails. The
//! guess budget is not touched here; a round always resolves to exactly
//! one [`RoundResult`].

use crate::narrator::Narrator;
use crate::recognition::{RecognizeOutcome, SpeechRecognizer};

/// Announced at the start of every round
const GUESS_PROMPT: &str = "Say the word";

/// Announced when a clip was captured but not understood
const RETRY_PROMPT: &str = "Didn't get what you said. Let's try again.";

/// Fatal reason when every recapture attempt went unheard
const NO_SPEECH_REASON: &str = "no speech understood";

/// The resolved outcome of one guess round.
///
/// Consumed exactly once by the session; the raw recognizer outcomes
/// never leave this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundResult {
    /// A usable transcript was obtained, original casing preserved
    Guessed(String),
    /// The player spoke the quit keyword
    Quit,
    /// The round cannot produce a guess; the session must end
    Fatal(String),
}

/// Resolve exactly one guess attempt into a [`RoundResult`].
///
/// At most `retry_limit` clips are captured. A `ServiceUnavailable`
/// outcome short-circuits the remaining attempts immediately and is
/// never masked by a later failed recapture. The quit keyword is only
/// recognised once a transcript has been obtained; quitting has no
/// special transcription path.
pub fn run_round<R, N>(
    recognizer: &mut R,
    narrator: &N,
    retry_limit: u32,
    quit_keyword: &str,
) -> RoundResult
where
    R: SpeechRecognizer + ?Sized,
    N: Narrator + ?Sized,
{
    narrator.announce(GUESS_PROMPT);

    let mut transcript = None;
    for attempt in 1..=retry_limit {
        match recognizer.capture() {
            RecognizeOutcome::Transcript(text) => {
                transcript = Some(text);
                break;
            }
            RecognizeOutcome::ServiceUnavailable(reason) => {
                tracing::error!(
                    "Recognition service failed on attempt {}: {}",
                    attempt,
                    reason
                );
                return RoundResult::Fatal(reason);
            }
            RecognizeOutcome::Unintelligible => {
                tracing::debug!("Attempt {} of {} not understood", attempt, retry_limit);
                if attempt < retry_limit {
                    narrator.announce(RETRY_PROMPT);
                }
            }
        }
    }

    let Some(text) = transcript else {
        tracing::warn!(
            "Recapture budget of {} exhausted with no transcript",
            retry_limit
        );
        return RoundResult::Fatal(NO_SPEECH_REASON.to_string());
    };

    if text.to_lowercase() == quit_keyword.to_lowercase() {
        tracing::info!("Player spoke the quit keyword");
        return RoundResult::Quit;
    }

    RoundResult::Guessed(text)
}
