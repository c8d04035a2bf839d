use crate::mvi::Reducer;

use super::intent::LobbyIntent;
use super::state::LobbyStatus;

pub struct LobbyReducer;

impl Reducer for LobbyReducer {
    type State = LobbyStatus;
    type Intent = LobbyIntent;

    fn reduce(_state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LobbyIntent::SpawnCompleted => LobbyStatus::Ready,
        }
    }
}
