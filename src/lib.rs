//! algoviz turns algorithm runs into replayable step sequences.
//!
//! The crate has two halves:
//!
//! 1. **Generate**: a pure generator per algorithm family (search, sort, recursion, linear
//!    structures, tree traversal) records every comparison, mutation, call and return as an
//!    immutable [`Step`] carrying a full [`Snapshot`] and a narration string.
//! 2. **Play**: a [`PlaybackController`] walks a loaded [`StepSequence`] through time, notifying
//!    subscribers on every cursor change. Time comes from a [`Clock`], so hosts can drive it from
//!    any event loop and tests can use a [`VirtualClock`].
//!
//! [`to_visual`] maps any step to backend-agnostic drawing primitives; [`TextRenderer`] draws them
//! for a terminal.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same input always yields a structurally equal sequence.
//! - **Self-contained steps**: rendering a step never consults another step.
//! - **Single-threaded playback**: at most one tick is pending per controller, and every command
//!   cancels it before changing state.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod generate;
mod playback;
mod render;
mod step;

pub use config::{VisualizerSettings, VizConfig};
pub use foundation::core::{IndexRange, NodeId, SpeedMs};
pub use foundation::error::{VizError, VizResult};
pub use generate::random::random_request;
pub use generate::recursion::RecursionAlgorithm;
pub use generate::search::SearchAlgorithm;
pub use generate::sort::SortAlgorithm;
pub use generate::structure::{Structure, StructureOp, StructureOutcome, apply};
pub use generate::traversal::BinaryTree;
pub use generate::{Algorithm, GenerateRequest, generate, new_structure};
pub use playback::clock::{Clock, SystemClock, VirtualClock};
pub use playback::controller::{PlaybackController, SubscriptionId};
pub use playback::sink::{InMemorySink, PlaybackFrame, PlaybackSink, PlaybackStatus};
pub use playback::timer::TickToken;
pub use render::layout::{LEAF_GAP, LEVEL_GAP, Point, tidy};
pub use render::primitives::{
    Bar, Cell, FrameBody, FrameRenderer, Highlight, MergeRuns, PlacedNode, VisualFrame, to_visual,
};
pub use render::text::{TextRenderer, TextSink};
pub use step::model::{
    CallNode, CallStatus, Family, IndexRoles, MergeBuffers, Peg, Pegs, RecursionSnapshot,
    SearchSnapshot, SearchWindow, Snapshot, SortSnapshot, Step, StepKind, StructureKind,
    StructureSnapshot, TraversalOrder, TraversalSnapshot, TreeNodeView, TreeSide,
};
pub use step::sequence::StepSequence;

/// Family-level generators, for callers that already know the algorithm family.
pub mod generators {
    pub use crate::generate::recursion::generate as recursion;
    pub use crate::generate::search::generate as search;
    pub use crate::generate::sort::generate as sort;
    pub use crate::generate::traversal::generate as traversal;
}
