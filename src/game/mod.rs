//! Game core: turn-taking guess resolution
//!
//! The round controller resolves one spoken guess with bounded recapture;
//! the session drives rounds against the guess budget and decides the
//! final outcome. All failure is data here: the core returns closed
//! result enums, never `Result`.

pub mod round;
pub mod session;

pub use round::{run_round, RoundResult};
pub use session::{GameRules, GameSession, SessionOutcome};
