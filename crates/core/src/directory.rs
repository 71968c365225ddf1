//! The participant-directory boundary.
//!
//! The directory that enumerates connected participants lives in the host;
//! the pipeline only consumes it through [`PlayerDirectory`].

use chatproc_api::{PlayerId, Team};

/// Read-only view of one participant at lookup time.
#[derive(Clone, Debug)]
pub struct PlayerSnapshot {
    pub name: String,
    pub team: Team,
    pub alive: bool,
    /// Automated participant. Bot messages bypass the pipeline and bots
    /// never appear in recipient sets.
    pub bot: bool,
}

/// Enumerates connected participants.
pub trait PlayerDirectory {
    /// Resolves a participant handle, or `None` if it does not refer to a
    /// connected participant.
    fn player(&self, id: PlayerId) -> Option<PlayerSnapshot>;

    /// All currently-connected non-bot participants in a stable order,
    /// optionally restricted to one team.
    fn connected(&self, team: Option<Team>) -> Vec<PlayerId>;
}
