//! Timer-driven playback of a [`StepSequence`](crate::StepSequence).
//!
//! The controller is single-threaded and host-driven: the host asks for
//! [`next_deadline`](controller::PlaybackController::next_deadline), waits however it likes, then
//! calls [`poll`](controller::PlaybackController::poll). Time comes from a [`clock::Clock`], so
//! tests run on a [`clock::VirtualClock`] and never sleep.

pub(crate) mod clock;
pub(crate) mod controller;
pub(crate) mod sink;
pub(crate) mod timer;
