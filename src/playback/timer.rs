/// Handle for one scheduled tick.
///
/// Tokens are never reused: re-arming bumps the generation, so a token held across a cancel can
/// never fire into the new state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickToken {
    generation: u64,
    deadline_ms: u64,
}

impl TickToken {
    /// Time at which this tick is due.
    pub fn deadline_ms(self) -> u64 {
        self.deadline_ms
    }
}

/// Single-slot cancellable timer. At most one token is live.
#[derive(Debug, Default)]
pub(crate) struct TickTimer {
    generation: u64,
    live: Option<TickToken>,
}

impl TickTimer {
    pub(crate) fn arm(&mut self, deadline_ms: u64) -> TickToken {
        self.generation += 1;
        let token = TickToken {
            generation: self.generation,
            deadline_ms,
        };
        self.live = Some(token);
        token
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(t) = self.live.take() {
            tracing::trace!(generation = t.generation, "cancel tick");
        }
    }

    pub(crate) fn is_live(&self, token: TickToken) -> bool {
        self.live == Some(token)
    }

    /// Consume the live token if it matches `token`.
    pub(crate) fn take(&mut self, token: TickToken) -> bool {
        if self.is_live(token) {
            self.live = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn deadline(&self) -> Option<u64> {
        self.live.map(|t| t.deadline_ms)
    }

    pub(crate) fn live(&self) -> Option<TickToken> {
        self.live
    }

    pub(crate) fn due(&self, now_ms: u64) -> Option<TickToken> {
        self.live.filter(|t| t.deadline_ms <= now_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/timer.rs"]
mod tests;
