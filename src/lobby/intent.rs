//! Intents for the lobby.

use crate::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyIntent {
    /// The spawn delay elapsed.
    SpawnCompleted,
}

impl Intent for LobbyIntent {}
