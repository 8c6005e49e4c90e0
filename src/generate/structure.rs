use crate::foundation::error::{VizError, VizResult};
use crate::step::model::{Snapshot, StepKind, StructureKind, StructureSnapshot};
use crate::step::sequence::{StepRecorder, StepSequence};

/// Current contents of a stack, queue or singly linked list.
///
/// Values are ordered head to tail (bottom to top for a stack). A `Structure` is never mutated in
/// place by [`apply`]; each operation hands back the next state.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Structure {
    kind: StructureKind,
    values: Vec<String>,
    capacity: usize,
}

impl Structure {
    /// Empty structure holding at most `capacity` elements.
    pub fn new(kind: StructureKind, capacity: usize) -> VizResult<Self> {
        Self::with_values(kind, Vec::new(), capacity)
    }

    /// Pre-populated structure.
    pub fn with_values(
        kind: StructureKind,
        values: Vec<String>,
        capacity: usize,
    ) -> VizResult<Self> {
        if capacity == 0 {
            return Err(VizError::invalid_input("structure capacity must be > 0"));
        }
        if values.len() > capacity {
            return Err(VizError::limit_exceeded(format!(
                "{} is full (max size: {capacity}).",
                kind.label()
            )));
        }
        for v in &values {
            check_value(v)?;
        }
        Ok(Self {
            kind,
            values,
            capacity,
        })
    }

    /// Structure variant.
    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    /// Elements, head first.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Maximum number of elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn snapshot(&self, highlight: Option<usize>) -> Snapshot {
        let last = self.values.len().checked_sub(1);
        Snapshot::Structure(StructureSnapshot {
            kind: self.kind,
            values: self.values.clone(),
            head: last.map(|_| 0),
            tail: last,
            highlight,
            capacity: self.capacity,
        })
    }

    fn ensure_room(&self) -> VizResult<()> {
        if self.values.len() >= self.capacity {
            return Err(VizError::limit_exceeded(format!(
                "{} is full (max size: {}).",
                self.kind.label(),
                self.capacity
            )));
        }
        Ok(())
    }

    fn ensure_nonempty(&self, verb: &str) -> VizResult<()> {
        if self.values.is_empty() {
            return Err(VizError::operation(format!(
                "{} is empty. Cannot {verb}.",
                self.kind.label()
            )));
        }
        Ok(())
    }
}

fn check_value(v: &str) -> VizResult<()> {
    if v.trim().is_empty() {
        return Err(VizError::invalid_input("value cannot be empty"));
    }
    Ok(())
}

/// Operations on a [`Structure`]; each kind supports its own subset plus `clear`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum StructureOp {
    Push { value: String },
    Pop,
    Peek,
    Enqueue { value: String },
    Dequeue,
    Front,
    InsertHead { value: String },
    InsertTail { value: String },
    InsertAt { index: usize, value: String },
    DeleteHead,
    DeleteTail,
    DeleteAt { index: usize },
    /// Empty the structure; valid for every kind.
    Clear,
}

impl StructureOp {
    /// Wire name, e.g. `insert-at`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Push { .. } => "push",
            Self::Pop => "pop",
            Self::Peek => "peek",
            Self::Enqueue { .. } => "enqueue",
            Self::Dequeue => "dequeue",
            Self::Front => "front",
            Self::InsertHead { .. } => "insert-head",
            Self::InsertTail { .. } => "insert-tail",
            Self::InsertAt { .. } => "insert-at",
            Self::DeleteHead => "delete-head",
            Self::DeleteTail => "delete-tail",
            Self::DeleteAt { .. } => "delete-at",
            Self::Clear => "clear",
        }
    }

    /// Whether `kind` accepts this operation.
    pub fn supported_by(&self, kind: StructureKind) -> bool {
        match self {
            Self::Clear => true,
            Self::Push { .. } | Self::Pop | Self::Peek => kind == StructureKind::Stack,
            Self::Enqueue { .. } | Self::Dequeue | Self::Front => kind == StructureKind::Queue,
            _ => kind == StructureKind::LinkedList,
        }
    }
}

/// Result of applying one [`StructureOp`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureOutcome {
    /// Frames animating the operation. Never empty.
    pub steps: StepSequence,
    /// State after the operation; feed it into the next call.
    pub structure: Structure,
    /// Element removed by a pop/dequeue/delete.
    pub removed: Option<String>,
    /// Element read by peek/front.
    pub observed: Option<String>,
}

/// Apply `op` to `structure`, returning the animation and the next state.
///
/// Overflow is `LimitExceeded`; underflow, bad indices and operations foreign to the structure's
/// kind are `Operation` errors. On error the caller's state is untouched.
#[tracing::instrument(skip(structure), fields(kind = ?structure.kind, len = structure.len()))]
pub fn apply(structure: &Structure, op: &StructureOp) -> VizResult<StructureOutcome> {
    if !op.supported_by(structure.kind) {
        return Err(VizError::operation(format!(
            "'{}' is not supported by a {}",
            op.name(),
            structure.kind.label().to_lowercase()
        )));
    }

    let mut s = structure.clone();
    let mut rec = StepRecorder::new();
    let mut removed = None;
    let mut observed = None;

    match op {
        StructureOp::Push { value } => {
            check_value(value)?;
            s.ensure_room()?;
            s.values.push(value.clone());
            rec.push(
                StepKind::StructureMutate,
                s.snapshot(Some(s.len() - 1)),
                format!("Pushed '{value}' onto the stack."),
            );
        }
        StructureOp::Pop => {
            s.ensure_nonempty("pop")?;
            let top = s.len() - 1;
            rec.push(
                StepKind::StructureInspect,
                s.snapshot(Some(top)),
                format!("Top element is '{}'.", s.values[top]),
            );
            let v = s.values.remove(top);
            rec.push(
                StepKind::StructureMutate,
                s.snapshot(None),
                format!("Popped '{v}' from the stack."),
            );
            removed = Some(v);
        }
        StructureOp::Peek => {
            s.ensure_nonempty("peek")?;
            let top = s.len() - 1;
            let v = s.values[top].clone();
            rec.push(
                StepKind::StructureInspect,
                s.snapshot(Some(top)),
                format!("Top element is '{v}'."),
            );
            observed = Some(v);
        }
        StructureOp::Enqueue { value } => {
            check_value(value)?;
            s.ensure_room()?;
            s.values.push(value.clone());
            rec.push(
                StepKind::StructureMutate,
                s.snapshot(Some(s.len() - 1)),
                format!("Enqueued '{value}' to the rear of the queue."),
            );
        }
        StructureOp::Dequeue => {
            s.ensure_nonempty("dequeue")?;
            rec.push(
                StepKind::StructureInspect,
                s.snapshot(Some(0)),
                format!("Front element is '{}'.", s.values[0]),
            );
            let v = s.values.remove(0);
            rec.push(
                StepKind::StructureMutate,
                s.snapshot(None),
                format!("Dequeued '{v}' from the front of the queue."),
            );
            removed = Some(v);
        }
        StructureOp::Front => {
            s.ensure_nonempty("read the front")?;
            let v = s.values[0].clone();
            rec.push(
                StepKind::StructureInspect,
                s.snapshot(Some(0)),
                format!("Front element is '{v}'."),
            );
            observed = Some(v);
        }
        StructureOp::InsertHead { value } => insert(&mut s, &mut rec, 0, value, false)?,
        StructureOp::InsertTail { value } => {
            let at = s.len();
            insert(&mut s, &mut rec, at, value, false)?;
        }
        StructureOp::InsertAt { index, value } => insert(&mut s, &mut rec, *index, value, true)?,
        StructureOp::DeleteHead => removed = Some(delete(&mut s, &mut rec, Some(0), false)?),
        StructureOp::DeleteTail => removed = Some(delete(&mut s, &mut rec, None, false)?),
        StructureOp::DeleteAt { index } => {
            removed = Some(delete(&mut s, &mut rec, Some(*index), true)?);
        }
        StructureOp::Clear => {
            s.values.clear();
            rec.push(
                StepKind::StructureMutate,
                s.snapshot(None),
                format!("{} has been cleared.", s.kind.label()),
            );
        }
    }

    Ok(StructureOutcome {
        steps: rec.finish(),
        structure: s,
        removed,
        observed,
    })
}

/// Visits nodes `0..until` one frame each, as a singly linked list must.
fn walk(s: &Structure, rec: &mut StepRecorder, until: usize) {
    for i in 0..until {
        rec.push(
            StepKind::StructureInspect,
            s.snapshot(Some(i)),
            format!("Traversing: visiting node {i} ('{}').", s.values[i]),
        );
    }
}

fn insert(
    s: &mut Structure,
    rec: &mut StepRecorder,
    index: usize,
    value: &str,
    traverse: bool,
) -> VizResult<()> {
    check_value(value)?;
    if index > s.len() {
        return Err(VizError::operation(format!(
            "Invalid index. Must be between 0 and {}.",
            s.len()
        )));
    }
    s.ensure_room()?;
    if traverse {
        walk(s, rec, index);
    }
    s.values.insert(index, value.to_owned());
    let narration = match index {
        0 => format!("Inserted '{value}' at the head."),
        i if i + 1 == s.len() => format!("Inserted '{value}' at the tail."),
        i => format!("Inserted '{value}' at index {i}."),
    };
    rec.push(StepKind::StructureMutate, s.snapshot(Some(index)), narration);
    Ok(())
}

/// Removes `index` (the tail when `None`) and returns the removed value.
fn delete(
    s: &mut Structure,
    rec: &mut StepRecorder,
    index: Option<usize>,
    traverse: bool,
) -> VizResult<String> {
    s.ensure_nonempty("delete")?;
    let index = index.unwrap_or(s.len() - 1);
    if index >= s.len() {
        return Err(VizError::operation(format!(
            "Invalid index. Must be between 0 and {}.",
            s.len() - 1
        )));
    }
    if traverse {
        walk(s, rec, index);
    }
    rec.push(
        StepKind::StructureInspect,
        s.snapshot(Some(index)),
        format!("Removing '{}' at index {index}.", s.values[index]),
    );
    let v = s.values.remove(index);
    rec.push(
        StepKind::StructureMutate,
        s.snapshot(None),
        format!("Deleted '{v}' from index {index}."),
    );
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/structure.rs"]
mod tests;
