use std::collections::BTreeSet;
use std::fmt;

use crate::foundation::core::{IndexRange, NodeId};

/// Algorithm family a step (and its renderer) belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// Linear and binary search.
    Search,
    /// Comparison sorts over a numeric array.
    Sort,
    /// Recursion / divide-and-conquer call trees.
    Recursion,
    /// Stack, queue and linked-list mutation.
    Structure,
    /// Binary tree traversal orders.
    Traversal,
}

/// Tag identifying which renderer interprets a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    /// Initial search window before any probe.
    SearchStart,
    /// An index is being examined.
    SearchProbe,
    /// Comparison outcome narrowed the search window.
    SearchDiscard,
    /// Target located; snapshot carries `found`.
    SearchFound,
    /// Target absent; snapshot has no `found`.
    SearchMiss,
    /// Two positions are compared.
    SortCompare,
    /// Two positions exchanged values (post-swap snapshot).
    SortSwap,
    /// One position was overwritten (shift or merge placement).
    SortOverwrite,
    /// A divide boundary of a divide-and-conquer sort.
    SortDivide,
    /// A merge of two sorted runs begins.
    SortMerge,
    /// A pivot was chosen for a partition.
    SortPivot,
    /// A key / running minimum was selected.
    SortKey,
    /// The sorted set grew (pass complete, pivot placed, early exit).
    SortMark,
    /// The array is fully sorted.
    SortComplete,
    /// A function was entered.
    RecursionCall,
    /// A call hit its base case.
    RecursionBaseCase,
    /// A waiting call continues with its next sub-call.
    RecursionResume,
    /// Sub-results were combined into this call's result.
    RecursionCombine,
    /// A Tower of Hanoi disk move.
    RecursionMove,
    /// A call returned its value.
    RecursionReturn,
    /// The whole recursion finished.
    RecursionComplete,
    /// A linear structure changed.
    StructureMutate,
    /// A linear structure was read or walked without changing.
    StructureInspect,
    /// Traversal is about to begin.
    TraversalStart,
    /// A tree node was visited.
    TraversalVisit,
    /// All nodes were visited.
    TraversalComplete,
}

impl StepKind {
    /// Family this kind belongs to.
    pub fn family(self) -> Family {
        use StepKind::*;
        match self {
            SearchStart | SearchProbe | SearchDiscard | SearchFound | SearchMiss => Family::Search,
            SortCompare | SortSwap | SortOverwrite | SortDivide | SortMerge | SortPivot
            | SortKey | SortMark | SortComplete => Family::Sort,
            RecursionCall | RecursionBaseCase | RecursionResume | RecursionCombine
            | RecursionMove | RecursionReturn | RecursionComplete => Family::Recursion,
            StructureMutate | StructureInspect => Family::Structure,
            TraversalStart | TraversalVisit | TraversalComplete => Family::Traversal,
        }
    }

    /// Wire tag, e.g. `sort-compare`.
    pub fn as_str(self) -> &'static str {
        use StepKind::*;
        match self {
            SearchStart => "search-start",
            SearchProbe => "search-probe",
            SearchDiscard => "search-discard",
            SearchFound => "search-found",
            SearchMiss => "search-miss",
            SortCompare => "sort-compare",
            SortSwap => "sort-swap",
            SortOverwrite => "sort-overwrite",
            SortDivide => "sort-divide",
            SortMerge => "sort-merge",
            SortPivot => "sort-pivot",
            SortKey => "sort-key",
            SortMark => "sort-mark",
            SortComplete => "sort-complete",
            RecursionCall => "recursion-call",
            RecursionBaseCase => "recursion-base-case",
            RecursionResume => "recursion-resume",
            RecursionCombine => "recursion-combine",
            RecursionMove => "recursion-move",
            RecursionReturn => "recursion-return",
            RecursionComplete => "recursion-complete",
            StructureMutate => "structure-mutate",
            StructureInspect => "structure-inspect",
            TraversalStart => "traversal-start",
            TraversalVisit => "traversal-visit",
            TraversalComplete => "traversal-complete",
        }
    }

    /// Fallback narration used when a generator supplies a blank one.
    pub(crate) fn default_narration(self) -> &'static str {
        use StepKind::*;
        match self {
            SearchStart => "Starting search.",
            SearchProbe => "Checking a candidate index.",
            SearchDiscard => "Narrowing the search range.",
            SearchFound => "Target found.",
            SearchMiss => "Target not found.",
            SortCompare => "Comparing two elements.",
            SortSwap => "Swapped two elements.",
            SortOverwrite => "Wrote an element into place.",
            SortDivide => "Dividing the array.",
            SortMerge => "Merging two sorted runs.",
            SortPivot => "Choosing a pivot.",
            SortKey => "Selecting a key element.",
            SortMark => "An element reached its final position.",
            SortComplete => "Sorting complete!",
            RecursionCall => "Entering a call.",
            RecursionBaseCase => "Base case reached.",
            RecursionResume => "Continuing with the next call.",
            RecursionCombine => "Combining sub-results.",
            RecursionMove => "Moving a disk.",
            RecursionReturn => "Returning from a call.",
            RecursionComplete => "Recursion complete.",
            StructureMutate => "Structure updated.",
            StructureInspect => "Inspecting the structure.",
            TraversalStart => "Starting traversal.",
            TraversalVisit => "Visiting a node.",
            TraversalComplete => "Traversal complete.",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive `[low, high]` window of a binary search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SearchWindow {
    /// Lowest candidate index.
    pub low: usize,
    /// Highest candidate index.
    pub high: usize,
}

/// Render state of a search frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SearchSnapshot {
    /// Full array being searched.
    pub values: Vec<i64>,
    /// Value searched for.
    pub target: i64,
    /// Remaining candidate window (binary search); `None` once it is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<SearchWindow>,
    /// Midpoint under test (binary search).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<usize>,
    /// Index under test (linear search).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<usize>,
    /// Index where the target was found. Only present on the terminal success step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found: Option<usize>,
}

/// Named index roles of a sort frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IndexRoles {
    /// Positions being compared.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comparing: Vec<usize>,
    /// Positions that just exchanged values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub swapped: Vec<usize>,
    /// Current pivot position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<usize>,
    /// Key / running-minimum position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<usize>,
    /// Active sub-range (partition, merge run, sorted prefix, heap region).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<IndexRange>,
    /// Position just written by an overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed: Option<usize>,
    /// Positions holding their final value. Never shrinks within one sequence.
    #[serde(default)]
    pub sorted: BTreeSet<usize>,
}

/// Auxiliary runs of a merge in progress.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MergeBuffers {
    /// Copy of the left run.
    pub left: Vec<i64>,
    /// Copy of the right run.
    pub right: Vec<i64>,
    /// Next unconsumed index into `left`.
    pub left_next: usize,
    /// Next unconsumed index into `right`.
    pub right_next: usize,
}

/// Render state of a sort frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SortSnapshot {
    /// Array contents after this step.
    pub values: Vec<i64>,
    /// Highlighted positions.
    pub roles: IndexRoles,
    /// Merge buffers, present only while merge sort is merging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge: Option<MergeBuffers>,
}

/// Lifecycle of one call-tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    /// Just entered.
    Calling,
    /// Suspended on a sub-call.
    Waiting,
    /// Resolved without recursing.
    BaseCase,
    /// Returned; no longer on the call stack.
    Returning,
}

/// One call in a recursion tree.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CallNode {
    /// Unique within the sequence.
    pub id: NodeId,
    /// Display label, e.g. `fib(3)`.
    pub label: String,
    /// Caller, `None` for the root call.
    pub parent: Option<NodeId>,
    /// Distance from the root call.
    pub depth: u32,
    /// Current lifecycle status.
    pub status: CallStatus,
    /// Computed value, `None` until known.
    pub result: Option<u64>,
}

/// Tower of Hanoi rod.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Peg {
    /// Source rod.
    A,
    /// Auxiliary rod.
    B,
    /// Destination rod.
    C,
}

impl Peg {
    /// Array slot of this rod in [`Pegs::rods`].
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }

    /// Single-letter rod name.
    pub fn name(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }
}

/// Disks stacked on the three rods, bottom first. Disk `1` is the smallest.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pegs {
    /// Rods A, B, C.
    pub rods: [Vec<u32>; 3],
}

impl Pegs {
    /// All `disks` stacked on rod A.
    pub fn new(disks: u32) -> Self {
        Self {
            rods: [(1..=disks).rev().collect(), Vec::new(), Vec::new()],
        }
    }

    /// Disks on `peg`, bottom first.
    pub fn rod(&self, peg: Peg) -> &[u32] {
        &self.rods[peg.index()]
    }

    pub(crate) fn move_top(&mut self, from: Peg, to: Peg) -> Option<u32> {
        let disk = self.rods[from.index()].pop()?;
        self.rods[to.index()].push(disk);
        Some(disk)
    }
}

/// Render state of a recursion frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecursionSnapshot {
    /// Every call created so far, in creation order.
    pub nodes: Vec<CallNode>,
    /// Labels of calls not yet returned, outermost first.
    pub stack: Vec<String>,
    /// Highlighted pseudo-code line (1-based).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u8>,
    /// Rod contents (Tower of Hanoi only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pegs: Option<Pegs>,
    /// Moves performed so far (Tower of Hanoi only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moves: Option<u32>,
}

impl RecursionSnapshot {
    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&CallNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Linear structure variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureKind {
    /// LIFO; the top is the tail.
    Stack,
    /// FIFO; front is the head, rear is the tail.
    Queue,
    /// Singly linked list.
    LinkedList,
}

impl StructureKind {
    /// Human-readable name used in narration.
    pub fn label(self) -> &'static str {
        match self {
            Self::Stack => "Stack",
            Self::Queue => "Queue",
            Self::LinkedList => "List",
        }
    }
}

/// Render state of a linear-structure frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StructureSnapshot {
    /// Structure variant.
    pub kind: StructureKind,
    /// Elements from head to tail (bottom to top for a stack).
    pub values: Vec<String>,
    /// Head index, `None` when empty.
    pub head: Option<usize>,
    /// Tail index, `None` when empty.
    pub tail: Option<usize>,
    /// Element the operation is acting on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<usize>,
    /// Configured maximum size.
    pub capacity: usize,
}

/// Binary tree visiting orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// Left, root, right.
    InOrder,
    /// Root, left, right.
    PreOrder,
    /// Left, right, root.
    PostOrder,
    /// Breadth first.
    LevelOrder,
}

impl TraversalOrder {
    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::InOrder => "In Order",
            Self::PreOrder => "Pre Order",
            Self::PostOrder => "Post Order",
            Self::LevelOrder => "Level Order",
        }
    }

    /// Visiting rule shown to the learner.
    pub fn rule(self) -> &'static str {
        match self {
            Self::InOrder => "(Left, Root, Right)",
            Self::PreOrder => "(Root, Left, Right)",
            Self::PostOrder => "(Left, Right, Root)",
            Self::LevelOrder => "(Visit level by level)",
        }
    }
}

/// Which child slot a tree node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreeSide {
    /// Left child.
    Left,
    /// Right child.
    Right,
}

/// Flattened binary tree node.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TreeNodeView {
    /// Pre-order id.
    pub id: NodeId,
    /// Node label.
    pub label: String,
    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,
    /// Child slot under the parent.
    pub side: Option<TreeSide>,
    /// Distance from the root.
    pub depth: u32,
}

/// Render state of a traversal frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TraversalSnapshot {
    /// Order being animated.
    pub order: TraversalOrder,
    /// Whole tree, pre-order.
    pub nodes: Vec<TreeNodeView>,
    /// Nodes visited so far, in visiting order.
    pub visited: Vec<NodeId>,
    /// Node visited by this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<NodeId>,
    /// Pending queue (level order only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frontier: Vec<NodeId>,
}

impl TraversalSnapshot {
    /// Labels of visited nodes, in visiting order.
    pub fn visited_labels(&self) -> Vec<&str> {
        self.visited
            .iter()
            .filter_map(|id| self.nodes.iter().find(|n| n.id == *id))
            .map(|n| n.label.as_str())
            .collect()
    }
}

/// Render-sufficient payload of a step.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum Snapshot {
    /// Search frame.
    Search(SearchSnapshot),
    /// Sort frame.
    Sort(SortSnapshot),
    /// Recursion frame.
    Recursion(RecursionSnapshot),
    /// Linear-structure frame.
    Structure(StructureSnapshot),
    /// Traversal frame.
    Traversal(TraversalSnapshot),
}

impl Snapshot {
    /// Family of the payload.
    pub fn family(&self) -> Family {
        match self {
            Self::Search(_) => Family::Search,
            Self::Sort(_) => Family::Sort,
            Self::Recursion(_) => Family::Recursion,
            Self::Structure(_) => Family::Structure,
            Self::Traversal(_) => Family::Traversal,
        }
    }

    /// Search payload, if any.
    pub fn as_search(&self) -> Option<&SearchSnapshot> {
        match self {
            Self::Search(s) => Some(s),
            _ => None,
        }
    }

    /// Sort payload, if any.
    pub fn as_sort(&self) -> Option<&SortSnapshot> {
        match self {
            Self::Sort(s) => Some(s),
            _ => None,
        }
    }

    /// Recursion payload, if any.
    pub fn as_recursion(&self) -> Option<&RecursionSnapshot> {
        match self {
            Self::Recursion(s) => Some(s),
            _ => None,
        }
    }

    /// Structure payload, if any.
    pub fn as_structure(&self) -> Option<&StructureSnapshot> {
        match self {
            Self::Structure(s) => Some(s),
            _ => None,
        }
    }

    /// Traversal payload, if any.
    pub fn as_traversal(&self) -> Option<&TraversalSnapshot> {
        match self {
            Self::Traversal(s) => Some(s),
            _ => None,
        }
    }
}

/// One immutable, renderable frame: kind tag, full snapshot, narration.
///
/// A step owns every byte it needs; rendering it never consults earlier steps or shared state.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    kind: StepKind,
    snapshot: Snapshot,
    narration: String,
}

impl Step {
    pub(crate) fn new(kind: StepKind, snapshot: Snapshot, narration: String) -> Self {
        Self {
            kind,
            snapshot,
            narration,
        }
    }

    /// Renderer tag.
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Render payload.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Precomputed explanation; never empty.
    pub fn narration(&self) -> &str {
        &self.narration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/step/model.rs"]
mod tests;
