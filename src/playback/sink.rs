use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::step::model::Step;

/// Lifecycle state of a [`PlaybackController`](super::controller::PlaybackController).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackStatus {
    /// Loaded (or reset) and not yet started.
    Idle,
    /// A tick is scheduled.
    Running,
    /// Stopped mid-sequence; resumable.
    Paused,
    /// Reached the last step, or loaded an empty sequence.
    Finished,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Finished => "finished",
        })
    }
}

/// The step under the cursor, as delivered to subscribers.
#[derive(Clone, Copy, Debug)]
pub struct PlaybackFrame<'a> {
    /// Cursor position.
    pub index: usize,
    /// Length of the loaded sequence.
    pub total: usize,
    /// Step at `index`.
    pub step: &'a Step,
}

/// Receives every step the controller presents, synchronously and in order.
pub trait PlaybackSink {
    /// Called once per cursor change.
    fn on_step(&mut self, frame: &PlaybackFrame<'_>);

    /// Called after every status transition.
    fn on_status(&mut self, _status: PlaybackStatus) {}
}

impl<F> PlaybackSink for F
where
    F: FnMut(&PlaybackFrame<'_>),
{
    fn on_step(&mut self, frame: &PlaybackFrame<'_>) {
        self(frame)
    }
}

#[derive(Debug, Default)]
struct Recorded {
    frames: Vec<(usize, Step)>,
    statuses: Vec<PlaybackStatus>,
}

/// In-memory sink for tests and debugging.
///
/// Clones share one buffer, so keep a clone and hand the other to
/// [`subscribe`](super::controller::PlaybackController::subscribe).
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    inner: Rc<RefCell<Recorded>>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor positions received, in order.
    pub fn indices(&self) -> Vec<usize> {
        self.inner.borrow().frames.iter().map(|(i, _)| *i).collect()
    }

    /// Steps received, in order.
    pub fn steps(&self) -> Vec<Step> {
        self.inner
            .borrow()
            .frames
            .iter()
            .map(|(_, s)| s.clone())
            .collect()
    }

    /// Status transitions received, in order.
    pub fn statuses(&self) -> Vec<PlaybackStatus> {
        self.inner.borrow().statuses.clone()
    }

    /// Number of steps received.
    pub fn len(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    /// Whether no step was received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlaybackSink for InMemorySink {
    fn on_step(&mut self, frame: &PlaybackFrame<'_>) {
        self.inner
            .borrow_mut()
            .frames
            .push((frame.index, frame.step.clone()));
    }

    fn on_status(&mut self, status: PlaybackStatus) {
        self.inner.borrow_mut().statuses.push(status);
    }
}
