use crate::foundation::core::SpeedMs;
use crate::playback::clock::{Clock, SystemClock};
use crate::playback::sink::{PlaybackFrame, PlaybackSink, PlaybackStatus};
use crate::playback::timer::{TickTimer, TickToken};
use crate::step::model::Step;
use crate::step::sequence::StepSequence;

/// Handle returned by [`PlaybackController::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Drives one loaded [`StepSequence`] through time.
///
/// States are `idle`, `running`, `paused` and `finished`. Every command cancels the live tick
/// before touching state, and every cursor change notifies each subscriber exactly once before the
/// next tick is armed. Misuse (start before load, jump on an empty sequence) is a no-op.
pub struct PlaybackController<C: Clock = SystemClock> {
    clock: C,
    steps: StepSequence,
    cursor: Option<usize>,
    status: PlaybackStatus,
    speed: SpeedMs,
    timer: TickTimer,
    sinks: Vec<(SubscriptionId, Box<dyn PlaybackSink>)>,
    next_sub: u64,
}

impl<C: Clock> PlaybackController<C> {
    /// Idle controller with nothing loaded.
    pub fn new(clock: C, speed: SpeedMs) -> Self {
        Self {
            clock,
            steps: StepSequence::empty(),
            cursor: None,
            status: PlaybackStatus::Idle,
            speed,
            timer: TickTimer::default(),
            sinks: Vec::new(),
            next_sub: 0,
        }
    }

    /// Current state.
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Cursor position; `None` before the first [`load`](Self::load).
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Step under the cursor, if any.
    pub fn current_step(&self) -> Option<&Step> {
        self.cursor.and_then(|i| self.steps.get(i))
    }

    /// Loaded sequence.
    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    /// Tick interval.
    pub fn speed(&self) -> SpeedMs {
        self.speed
    }

    /// Clock the controller reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// When the pending tick is due, if one is scheduled.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    /// Token of the pending tick, for hosts that schedule callbacks themselves.
    pub fn pending_tick(&self) -> Option<TickToken> {
        self.timer.live()
    }

    /// Register a subscriber.
    pub fn subscribe(&mut self, sink: impl PlaybackSink + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_sub);
        self.next_sub += 1;
        self.sinks.push((id, Box::new(sink)));
        id
    }

    /// Remove a subscriber; returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|(sid, _)| *sid != id);
        self.sinks.len() != before
    }

    /// Replace the sequence. Cursor goes to `0`; an empty sequence finishes immediately.
    pub fn load(&mut self, steps: StepSequence) {
        self.timer.cancel();
        tracing::debug!(len = steps.len(), "load");
        self.steps = steps;
        self.cursor = Some(0);
        let next = if self.steps.is_empty() {
            PlaybackStatus::Finished
        } else {
            PlaybackStatus::Idle
        };
        self.transition(next);
    }

    /// Begin playback, presenting the step under the cursor now.
    ///
    /// No-op while running or with nothing loaded. From `paused` this resumes; from `finished` it
    /// restarts at step 0.
    pub fn start(&mut self) {
        match self.status {
            PlaybackStatus::Running => {}
            PlaybackStatus::Paused => self.resume(),
            PlaybackStatus::Idle | PlaybackStatus::Finished => {
                if self.steps.is_empty() {
                    return;
                }
                self.timer.cancel();
                if self.status == PlaybackStatus::Finished {
                    self.cursor = Some(0);
                }
                tracing::debug!(cursor = ?self.cursor, "start");
                self.transition(PlaybackStatus::Running);
                self.emit();
                let now = self.clock.now_ms();
                self.schedule_after(now);
            }
        }
    }

    /// Stop ticking; only meaningful while running.
    pub fn pause(&mut self) {
        if self.status != PlaybackStatus::Running {
            return;
        }
        self.timer.cancel();
        tracing::debug!(cursor = ?self.cursor, "pause");
        self.transition(PlaybackStatus::Paused);
    }

    /// Continue from `paused`; the next tick is one interval from now.
    pub fn resume(&mut self) {
        if self.status != PlaybackStatus::Paused {
            return;
        }
        tracing::debug!(cursor = ?self.cursor, "resume");
        self.transition(PlaybackStatus::Running);
        let now = self.clock.now_ms();
        self.schedule_after(now);
    }

    /// Play/pause button: pause when running, resume when paused, otherwise start.
    pub fn toggle(&mut self) {
        match self.status {
            PlaybackStatus::Running => self.pause(),
            PlaybackStatus::Paused => self.resume(),
            PlaybackStatus::Idle | PlaybackStatus::Finished => self.start(),
        }
    }

    /// Drop the sequence and return to `idle` at cursor 0.
    pub fn reset(&mut self) {
        self.timer.cancel();
        tracing::debug!("reset");
        self.steps = StepSequence::empty();
        self.cursor = Some(0);
        self.transition(PlaybackStatus::Idle);
    }

    /// Keep the sequence, go back to step 0 and stop.
    pub fn rewind(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        self.timer.cancel();
        tracing::debug!("rewind");
        self.cursor = Some(0);
        self.transition(PlaybackStatus::Idle);
        self.emit();
    }

    /// Move the cursor to `index` (clamped) and present that step. Status is unchanged; a running
    /// controller restarts its interval from now.
    pub fn jump_to(&mut self, index: usize) {
        let Some(last) = self.steps.len().checked_sub(1) else {
            return;
        };
        self.timer.cancel();
        let index = index.min(last);
        tracing::debug!(index, "jump_to");
        self.cursor = Some(index);
        self.emit();
        if self.status == PlaybackStatus::Running {
            let now = self.clock.now_ms();
            self.schedule_after(now);
        }
    }

    /// Jump one step forward; no-op on the last step.
    pub fn step_forward(&mut self) {
        match (self.cursor, self.steps.len().checked_sub(1)) {
            (Some(i), Some(last)) if i < last => self.jump_to(i + 1),
            _ => {}
        }
    }

    /// Jump one step back; no-op on the first step.
    pub fn step_back(&mut self) {
        if let Some(i) = self.cursor.filter(|&i| i > 0 && !self.steps.is_empty()) {
            self.jump_to(i - 1);
        }
    }

    /// Change the tick interval. The pending tick keeps its deadline.
    pub fn set_speed(&mut self, speed: SpeedMs) {
        tracing::debug!(speed_ms = speed.get(), "set_speed");
        self.speed = speed;
    }

    /// Fire every tick due at the clock's current time; returns how many fired.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut fired = 0;
        while let Some(token) = self.timer.due(now) {
            if !self.fire(token) {
                break;
            }
            fired += 1;
        }
        fired
    }

    /// Apply one scheduled tick. Stale tokens (cancelled or superseded) are ignored.
    pub fn fire(&mut self, token: TickToken) -> bool {
        if !self.timer.take(token) {
            tracing::debug!(deadline_ms = token.deadline_ms(), "stale tick ignored");
            return false;
        }
        let (Some(i), Some(last)) = (self.cursor, self.steps.len().checked_sub(1)) else {
            return false;
        };
        if i >= last {
            self.finish();
            return true;
        }
        self.cursor = Some(i + 1);
        self.emit();
        if i + 1 == last {
            self.finish();
        } else {
            self.schedule_after(token.deadline_ms());
        }
        true
    }

    fn schedule_after(&mut self, from_ms: u64) {
        let token = self.timer.arm(from_ms.saturating_add(self.speed.get()));
        tracing::trace!(deadline_ms = token.deadline_ms(), "tick armed");
    }

    fn finish(&mut self) {
        self.timer.cancel();
        tracing::debug!(cursor = ?self.cursor, "finished");
        self.transition(PlaybackStatus::Finished);
    }

    fn transition(&mut self, next: PlaybackStatus) {
        self.status = next;
        for (_, sink) in &mut self.sinks {
            sink.on_status(next);
        }
    }

    fn emit(&mut self) {
        let Some(index) = self.cursor else { return };
        let Some(step) = self.steps.get(index) else {
            return;
        };
        let frame = PlaybackFrame {
            index,
            total: self.steps.len(),
            step,
        };
        for (_, sink) in &mut self.sinks {
            sink.on_step(&frame);
        }
    }
}

impl<C: Clock> Drop for PlaybackController<C> {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}

impl<C: Clock> std::fmt::Debug for PlaybackController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("status", &self.status)
            .field("cursor", &self.cursor)
            .field("len", &self.steps.len())
            .field("speed", &self.speed)
            .field("subscribers", &self.sinks.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
