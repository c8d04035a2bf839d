//! Reducer for the gated session flow.

use crate::mvi::Reducer;
use crate::router::{Navigation, ScreenId};

use super::intent::SessionIntent;
use super::state::{Notice, ScreenState};
use crate::purchase::PurchaseOutcome;

pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = ScreenState;
    type Intent = SessionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            (ScreenState::Granted, _) => ScreenState::Granted,

            (ScreenState::Home, SessionIntent::EntitlementChecked(status)) => {
                if status.is_active() {
                    ScreenState::Granted
                } else {
                    ScreenState::Home
                }
            }

            (ScreenState::Home, SessionIntent::AccessRequested(status)) => {
                if status.is_active() {
                    ScreenState::Granted
                } else {
                    ScreenState::paywall()
                }
            }

            (ScreenState::PaywallOffering { .. }, SessionIntent::PurchaseResolved(outcome)) => {
                match outcome {
                    PurchaseOutcome::Granted(status) if status.is_active() => ScreenState::Granted,
                    other => ScreenState::PaywallOffering {
                        notice: Notice::for_outcome(&other),
                    },
                }
            }

            (ScreenState::PaywallOffering { .. }, SessionIntent::Dismissed) => ScreenState::Home,

            (ScreenState::PaywallOffering { .. }, SessionIntent::NoticeDismissed) => {
                ScreenState::paywall()
            }

            (state, _) => state,
        }
    }
}

/// Router call for a transition, if the screen changed.
///
/// Auto-advance and purchase success replace the current screen so the
/// user cannot navigate back into the gate. Explicit user navigation pushes.
pub fn route_for(
    from: &ScreenState,
    to: &ScreenState,
    intent: &SessionIntent,
) -> Option<Navigation> {
    match (from, to) {
        (ScreenState::Home, ScreenState::Granted) => match intent {
            SessionIntent::EntitlementChecked(_) => Some(Navigation::Replace(ScreenId::Lobby)),
            _ => Some(Navigation::Forward(ScreenId::Lobby)),
        },
        (ScreenState::Home, ScreenState::PaywallOffering { .. }) => {
            Some(Navigation::Forward(ScreenId::Paywall))
        }
        (ScreenState::PaywallOffering { .. }, ScreenState::Granted) => {
            Some(Navigation::Replace(ScreenId::Lobby))
        }
        (ScreenState::PaywallOffering { .. }, ScreenState::Home) => Some(Navigation::Back),
        _ => None,
    }
}
