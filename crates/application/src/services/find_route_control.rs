//! Find-route control state machine
//!
//! `Idle(disabled)` → (both points set) → `Idle(enabled)` → (invoked) →
//! `Busy` → (settled) → `Idle(enabled iff both points set)`.
//! There is no transition from `Busy` into another `Busy`.

use tracing::{debug, warn};

/// Button label while idle
pub const IDLE_LABEL: &str = "FIND ROUTE";

/// Button label while a request is in flight
pub const BUSY_LABEL: &str = "Calculating...";

/// State of the find-route control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Idle { enabled: bool },
    /// A request numbered `generation` is in flight
    Busy { generation: u64 },
}

/// The find-route control
#[derive(Debug, Clone)]
pub struct FindRouteControl {
    state: ControlState,
    last_generation: u64,
}

impl Default for FindRouteControl {
    fn default() -> Self {
        Self::new()
    }
}

impl FindRouteControl {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ControlState::Idle { enabled: false },
            last_generation: 0,
        }
    }

    /// Enablement signal from the point store; ignored while busy
    pub fn set_points_ready(&mut self, ready: bool) {
        if let ControlState::Idle { .. } = self.state {
            self.state = ControlState::Idle { enabled: ready };
        }
    }

    /// Invoke the control
    ///
    /// Returns the generation of the new request, or `None` when the
    /// control is disabled or already busy.
    pub fn begin(&mut self) -> Option<u64> {
        match self.state {
            ControlState::Idle { enabled: true } => {
                self.last_generation += 1;
                self.state = ControlState::Busy {
                    generation: self.last_generation,
                };
                debug!(generation = self.last_generation, "Route request started");
                Some(self.last_generation)
            },
            state => {
                debug!(?state, "Find route ignored");
                None
            },
        }
    }

    /// Settle the in-flight request and return to idle
    ///
    /// Returns `false` if `generation` is not the request in flight, in
    /// which case the state is left alone.
    pub fn settle(&mut self, generation: u64, points_ready: bool) -> bool {
        match self.state {
            ControlState::Busy { generation: current } if current == generation => {
                self.state = ControlState::Idle {
                    enabled: points_ready,
                };
                true
            },
            state => {
                warn!(generation, ?state, "Settle for a request that is not in flight");
                false
            },
        }
    }

    #[must_use]
    pub const fn state(&self) -> ControlState {
        self.state
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self.state, ControlState::Idle { enabled: true })
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self.state, ControlState::Busy { .. })
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.is_busy() { BUSY_LABEL } else { IDLE_LABEL }
    }
}
