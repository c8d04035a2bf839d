//! Screen router capability.
//!
//! The orchestrator decides *where* to go; the router owns *how* a screen
//! change is rendered. Rendering is out of scope for this crate.

use std::fmt;

/// Screens reachable from the gated flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Home,
    Paywall,
    /// The teammate lobby, shown once access is granted.
    Lobby,
}

impl ScreenId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenId::Home => "Home",
            ScreenId::Paywall => "Paywall",
            ScreenId::Lobby => "Lobby",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single router call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Replace the current screen, discarding it from history.
    Replace(ScreenId),
    /// Push a screen on top of the current one.
    Forward(ScreenId),
    /// Pop back to the previous screen.
    Back,
}

impl Navigation {
    pub fn apply(self, router: &mut dyn ScreenRouter) {
        match self {
            Navigation::Replace(screen) => router.navigate_replace(screen),
            Navigation::Forward(screen) => router.navigate_forward(screen),
            Navigation::Back => router.navigate_back(),
        }
    }
}

pub trait ScreenRouter: Send {
    fn navigate_replace(&mut self, screen: ScreenId);
    fn navigate_forward(&mut self, screen: ScreenId);
    fn navigate_back(&mut self);
}

/// Router that keeps a navigation stack and logs every transition.
#[derive(Debug, Clone)]
pub struct TracingRouter {
    stack: Vec<ScreenId>,
}

impl TracingRouter {
    pub fn new(initial: ScreenId) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    /// Screen on top of the stack.
    pub fn current(&self) -> Option<ScreenId> {
        self.stack.last().copied()
    }

    pub fn stack(&self) -> &[ScreenId] {
        &self.stack
    }
}

impl Default for TracingRouter {
    fn default() -> Self {
        Self::new(ScreenId::Home)
    }
}

impl ScreenRouter for TracingRouter {
    fn navigate_replace(&mut self, screen: ScreenId) {
        let from = self.stack.pop();
        self.stack.push(screen);
        tracing::info!(from = ?from, to = %screen, "navigate replace");
    }

    fn navigate_forward(&mut self, screen: ScreenId) {
        let from = self.current();
        self.stack.push(screen);
        tracing::info!(from = ?from, to = %screen, depth = self.stack.len(), "navigate forward");
    }

    fn navigate_back(&mut self) {
        // The root screen is never popped.
        if self.stack.len() > 1 {
            let from = self.stack.pop();
            tracing::info!(from = ?from, to = ?self.current(), "navigate back");
        } else {
            tracing::debug!("navigate back ignored at root");
        }
    }
}
