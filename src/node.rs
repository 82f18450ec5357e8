use crate::reference::Ref;
use crate::utils::{pairing3, MyHash};

/// A node of the unique table.
///
/// Branch nodes are immutable once created; the manager guarantees there is at
/// most one branch per `(variable, low, high)` triple and that `low != high`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Node {
    Terminal(bool),
    Branch { variable: u32, low: Ref, high: Ref },
}

impl Node {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }

    /// Variable of a branch node, `None` for terminals.
    pub fn variable(&self) -> Option<u32> {
        match *self {
            Node::Terminal(_) => None,
            Node::Branch { variable, .. } => Some(variable),
        }
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        match *self {
            Node::Terminal(value) => value as u64,
            Node::Branch {
                variable,
                low,
                high,
            } => pairing3(variable as u64, low.raw() as u64, high.raw() as u64),
        }
    }
}
