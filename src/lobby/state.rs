//! State for the lobby shown after access is granted.

use crate::mvi::FlowState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LobbyStatus {
    /// Teammate is being provisioned.
    #[default]
    Spawning,
    /// Teammate is live in the user's game.
    Ready,
}

impl FlowState for LobbyStatus {}

impl LobbyStatus {
    pub fn message(&self) -> &'static str {
        match self {
            LobbyStatus::Spawning => "Spawning your AI teammate...",
            LobbyStatus::Ready => "Ready! Open your game, AI is in your friends list & guild.",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LobbyStatus::Ready)
    }
}
