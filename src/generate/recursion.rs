use crate::foundation::core::NodeId;
use crate::foundation::error::{VizError, VizResult};
use crate::step::model::{
    CallNode, CallStatus, Peg, Pegs, RecursionSnapshot, Snapshot, StepKind,
};
use crate::step::sequence::{StepRecorder, StepSequence};

/// Recursive algorithms animated as a call tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecursionAlgorithm {
    /// `n!` with base case `n <= 1`.
    Factorial,
    /// Naive doubly recursive Fibonacci.
    Fibonacci,
    /// Tower of Hanoi from rod A to rod C.
    TowerOfHanoi,
}

impl RecursionAlgorithm {
    fn name(self) -> &'static str {
        match self {
            Self::Factorial => "factorial",
            Self::Fibonacci => "fibonacci",
            Self::TowerOfHanoi => "tower-of-hanoi",
        }
    }
}

/// Trace the call tree of `algorithm(n)`; for Tower of Hanoi `n` is the disk count.
///
/// Every call gets a node; a node's `result` is `None` until it is known. The stack in each
/// snapshot holds the labels of calls that have not yet returned.
#[tracing::instrument]
pub fn generate(algorithm: RecursionAlgorithm, n: u32, max_n: u32) -> VizResult<StepSequence> {
    if n > max_n {
        return Err(VizError::limit_exceeded(format!(
            "{} accepts n <= {max_n} for visualization, got {n}",
            algorithm.name()
        )));
    }

    match algorithm {
        RecursionAlgorithm::Factorial => {
            let mut t = CallTrace::new(None);
            let result = factorial(&mut t, u64::from(n), None)?;
            t.finish(format!("Recursion complete. Final result: {n}! = {result}."))
        }
        RecursionAlgorithm::Fibonacci => {
            let mut t = CallTrace::new(None);
            let result = fibonacci(&mut t, u64::from(n), None)?;
            t.finish(format!(
                "Recursion complete. Final result: fib({n}) = {result}."
            ))
        }
        RecursionAlgorithm::TowerOfHanoi => {
            if n == 0 {
                return Err(VizError::invalid_input(
                    "tower-of-hanoi needs at least 1 disk",
                ));
            }
            let mut t = CallTrace::new(Some(Pegs::new(n)));
            hanoi(&mut t, n, Peg::A, Peg::C, Peg::B, None)?;
            let moves = t.moves;
            t.finish(format!("Complete! Total moves: {moves}."))
        }
    }
}

struct CallTrace {
    nodes: Vec<CallNode>,
    pegs: Option<Pegs>,
    moves: u32,
    rec: StepRecorder,
}

impl CallTrace {
    fn new(pegs: Option<Pegs>) -> Self {
        Self {
            nodes: Vec::new(),
            pegs,
            moves: 0,
            rec: StepRecorder::new(),
        }
    }

    fn enter(&mut self, label: String, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let depth = parent.map_or(0, |p| self.node_mut(p).depth + 1);
        if let Some(p) = parent {
            self.node_mut(p).status = CallStatus::Waiting;
        }
        self.nodes.push(CallNode {
            id,
            label,
            parent,
            depth,
            status: CallStatus::Calling,
            result: None,
        });
        id
    }

    fn node_mut(&mut self, id: NodeId) -> &mut CallNode {
        &mut self.nodes[id.0 as usize]
    }

    fn label(&self, id: NodeId) -> &str {
        &self.nodes[id.0 as usize].label
    }

    fn set(&mut self, id: NodeId, status: CallStatus, result: Option<u64>) {
        let node = self.node_mut(id);
        node.status = status;
        if result.is_some() {
            node.result = result;
        }
    }

    fn emit(&mut self, kind: StepKind, line: Option<u8>, narration: String) {
        let stack = self
            .nodes
            .iter()
            .filter(|n| n.status != CallStatus::Returning)
            .map(|n| n.label.clone())
            .collect();
        let snap = RecursionSnapshot {
            nodes: self.nodes.clone(),
            stack,
            line,
            pegs: self.pegs.clone(),
            moves: self.pegs.as_ref().map(|_| self.moves),
        };
        self.rec.push(kind, Snapshot::Recursion(snap), narration);
    }

    fn move_disk(&mut self, from: Peg, to: Peg) -> VizResult<u32> {
        let disk = self
            .pegs
            .as_mut()
            .and_then(|p| p.move_top(from, to))
            .ok_or_else(|| {
                VizError::operation(format!("no disk on rod {} to move", from.name()))
            })?;
        self.moves += 1;
        Ok(disk)
    }

    fn finish(mut self, narration: String) -> VizResult<StepSequence> {
        debug_assert!(
            self.nodes.iter().all(|n| n.status == CallStatus::Returning),
            "recursion finished with live calls"
        );
        self.emit(StepKind::RecursionComplete, None, narration);
        Ok(self.rec.finish())
    }
}

// Pseudo-code:
// 1  if n <= 1:
// 2      return 1
// 3  else:
// 4      return n * factorial(n - 1)
fn factorial(t: &mut CallTrace, n: u64, parent: Option<NodeId>) -> VizResult<u64> {
    let id = t.enter(format!("f({n})"), parent);
    t.emit(
        StepKind::RecursionCall,
        Some(4),
        format!("Calling factorial({n}). Pushing f({n}) to the stack."),
    );

    if n <= 1 {
        t.set(id, CallStatus::BaseCase, Some(1));
        t.emit(
            StepKind::RecursionBaseCase,
            Some(1),
            format!("Base case n <= 1 is true for f({n}). Returning 1."),
        );
        t.set(id, CallStatus::Returning, None);
        t.emit(
            StepKind::RecursionReturn,
            Some(2),
            format!("f({n}) returns 1. Popping from stack."),
        );
        return Ok(1);
    }

    let sub = factorial(t, n - 1, Some(id))?;
    let result = n.checked_mul(sub).ok_or_else(|| {
        VizError::operation(format!("factorial({n}) overflows a 64-bit result"))
    })?;
    t.set(id, CallStatus::Waiting, Some(result));
    t.emit(
        StepKind::RecursionCombine,
        Some(4),
        format!(
            "f({}) returned {sub}. Calculating {n} * {sub} = {result}.",
            n - 1
        ),
    );
    t.set(id, CallStatus::Returning, None);
    t.emit(
        StepKind::RecursionReturn,
        Some(4),
        format!("f({n}) returns {result}. Popping from stack."),
    );
    Ok(result)
}

// Pseudo-code:
// 1  if n <= 1:
// 2      return n
// 3  else:
// 4      return fib(n - 1) + fib(n - 2)
fn fibonacci(t: &mut CallTrace, n: u64, parent: Option<NodeId>) -> VizResult<u64> {
    let id = t.enter(format!("fib({n})"), parent);
    t.emit(
        StepKind::RecursionCall,
        Some(4),
        format!("Calling fib({n}). Pushing to stack."),
    );

    if n <= 1 {
        t.set(id, CallStatus::BaseCase, Some(n));
        t.emit(
            StepKind::RecursionBaseCase,
            Some(1),
            format!("Base case n <= 1 is true for fib({n})."),
        );
        t.set(id, CallStatus::Returning, None);
        t.emit(
            StepKind::RecursionReturn,
            Some(2),
            format!("fib({n}) returns {n}. Popping from stack."),
        );
        return Ok(n);
    }

    let left = fibonacci(t, n - 1, Some(id))?;
    t.set(id, CallStatus::Waiting, None);
    t.emit(
        StepKind::RecursionResume,
        Some(4),
        format!(
            "fib({}) returned {left}. Now calling fib({})...",
            n - 1,
            n - 2
        ),
    );
    let right = fibonacci(t, n - 2, Some(id))?;
    let result = left.checked_add(right).ok_or_else(|| {
        VizError::operation(format!("fib({n}) overflows a 64-bit result"))
    })?;
    t.set(id, CallStatus::Waiting, Some(result));
    t.emit(
        StepKind::RecursionCombine,
        Some(4),
        format!(
            "fib({}) returned {right}. Calculating {left} + {right} = {result}.",
            n - 2
        ),
    );
    t.set(id, CallStatus::Returning, None);
    t.emit(
        StepKind::RecursionReturn,
        Some(4),
        format!("fib({n}) returns {result}. Popping from stack."),
    );
    Ok(result)
}

// Pseudo-code:
// 1  if n == 1:
// 2      move disk 1 from src to dest
// 3      return
// 4  hanoi(n - 1, src, aux, dest)
// 5  move disk n from src to dest
// 6  hanoi(n - 1, aux, dest, src)
fn hanoi(
    t: &mut CallTrace,
    n: u32,
    src: Peg,
    dest: Peg,
    aux: Peg,
    parent: Option<NodeId>,
) -> VizResult<u64> {
    let id = t.enter(format!("h({n}, {}, {})", src.name(), dest.name()), parent);
    t.emit(
        StepKind::RecursionCall,
        Some(if n > 1 { 4 } else { 1 }),
        format!(
            "Calling hanoi({n}, from '{}', to '{}').",
            src.name(),
            dest.name()
        ),
    );

    if n == 1 {
        t.set(id, CallStatus::BaseCase, None);
        t.emit(
            StepKind::RecursionBaseCase,
            Some(1),
            "Base case: a single disk moves directly.".to_owned(),
        );
        let disk = t.move_disk(src, dest)?;
        t.set(id, CallStatus::BaseCase, Some(1));
        t.emit(
            StepKind::RecursionMove,
            Some(2),
            format!(
                "Move disk {disk} from '{}' to '{}'. ({} moves)",
                src.name(),
                dest.name(),
                t.moves
            ),
        );
        t.set(id, CallStatus::Returning, None);
        t.emit(
            StepKind::RecursionReturn,
            Some(3),
            format!("Returning from {}.", t.label(id)),
        );
        return Ok(1);
    }

    let before = hanoi(t, n - 1, src, aux, dest, Some(id))?;
    t.set(id, CallStatus::Waiting, None);
    let disk = t.move_disk(src, dest)?;
    t.emit(
        StepKind::RecursionMove,
        Some(5),
        format!(
            "Move disk {disk} from '{}' to '{}'. ({} moves)",
            src.name(),
            dest.name(),
            t.moves
        ),
    );
    let after = hanoi(t, n - 1, aux, dest, src, Some(id))?;

    let total = before + 1 + after;
    t.set(id, CallStatus::Returning, Some(total));
    t.emit(
        StepKind::RecursionReturn,
        Some(6),
        format!("Returning from {} after {total} moves.", t.label(id)),
    );
    Ok(total)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/recursion.rs"]
mod tests;
