use std::fmt::{Display, Formatter};

/// A handle to a node in the [`Bdd`][crate::bdd::Bdd] manager.
///
/// The handle is just the node's identity in the unique table, so equality and
/// hashing are O(1). Because every node is hash-consed, two handles from the same
/// manager are equal if and only if they represent the same boolean function.
///
/// Identity `0` is the `false` terminal and identity `1` is the `true` terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Ref(u32);

impl Ref {
    /// The `false` terminal.
    pub const FALSE: Self = Self(0);
    /// The `true` terminal.
    pub const TRUE: Self = Self(1);

    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Terminal handle for the given constant.
    pub const fn constant(value: bool) -> Self {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    /// Return the index of the node in the unique table.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the raw identity.
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_terminal(self) -> bool {
        self.0 <= 1
    }

    /// Return the constant value if this is a terminal.
    pub const fn as_constant(self) -> Option<bool> {
        match self.0 {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.as_constant() {
            Some(false) => write!(f, "⊥"),
            Some(true) => write!(f, "⊤"),
            None => write!(f, "@{}", self.0),
        }
    }
}
