//! The BDD manager.
//!
//! All diagrams live in a [`Bdd`] manager, which owns the unique table and the
//! variable order. Diagrams are referred to by lightweight [`Ref`] handles.
//!
//! The manager maintains three invariants for every node it hands out:
//!
//! - **Uniqueness**: there is at most one node per `(variable, low, high)` triple,
//!   so two handles are equal if and only if they denote the same function.
//! - **Reducedness**: no node has `low == high`. The smart constructor
//!   [`Bdd::mk_node`] is the only way nodes are created, and it never creates one.
//! - **Ordering**: along any path, variables strictly increase according to the
//!   manager's [`ItemOrder`].
//!
//! The algorithms themselves are spread over several modules, each adding methods
//! to [`Bdd`]:
//!
//! - [`apply`][crate::apply]: negation, conjunction, disjunction and friends;
//! - [`restrict`][crate::restrict]: cofactors and generalized cofactors;
//! - [`subst`][crate::subst]: composition;
//! - [`fold`][crate::fold]: structural folds, support and evaluation;
//! - [`sat`][crate::sat]: model counting.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;

use log::{debug, trace};

use crate::node::Node;
use crate::order::{ItemOrder, NaturalOrder};
use crate::reference::Ref;
use crate::table::Table;

/// Manager configuration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BddConfig {
    /// Initial size of the unique table, in bits. The table grows on demand.
    pub storage_bits: usize,
    /// Initial size of the per-operation memo tables, in bits.
    pub cache_bits: usize,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            storage_bits: 16,
            cache_bits: 10,
        }
    }
}

impl BddConfig {
    pub fn with_storage_bits(mut self, storage_bits: usize) -> Self {
        assert!(
            storage_bits <= 31,
            "Storage bits should be in the range 0..=31"
        );
        self.storage_bits = storage_bits;
        self
    }

    pub fn with_cache_bits(mut self, cache_bits: usize) -> Self {
        assert!(cache_bits <= 31, "Cache bits should be in the range 0..=31");
        self.cache_bits = cache_bits;
        self
    }
}

pub struct Bdd<O = NaturalOrder> {
    storage: RefCell<Table<Node>>,
    order: O,
    config: BddConfig,
}

impl Bdd {
    pub fn new(storage_bits: usize) -> Self {
        Self::with_config(BddConfig::default().with_storage_bits(storage_bits))
    }

    pub fn with_config(config: BddConfig) -> Self {
        Self::with_config_and_order(config, NaturalOrder)
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::with_config(BddConfig::default())
    }
}

impl<O> Debug for Bdd<O>
where
    O: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("Bdd")
            .field("order", &self.order)
            .field("nodes", &storage.len())
            .field("buckets", &storage.num_buckets())
            .finish()
    }
}

impl<O> Bdd<O>
where
    O: ItemOrder,
{
    pub fn with_order(order: O) -> Self {
        Self::with_config_and_order(BddConfig::default(), order)
    }

    pub fn with_config_and_order(config: BddConfig, order: O) -> Self {
        let mut storage = Table::new(config.storage_bits);

        // Allocate the terminals:
        let zero = storage.add(Node::Terminal(false));
        assert_eq!(zero, Ref::FALSE.index());
        let one = storage.add(Node::Terminal(true));
        assert_eq!(one, Ref::TRUE.index());

        Self {
            storage: RefCell::new(storage),
            order,
            config,
        }
    }

    pub fn config(&self) -> &BddConfig {
        &self.config
    }

    pub fn order(&self) -> &O {
        &self.order
    }

    pub fn zero(&self) -> Ref {
        Ref::FALSE
    }
    pub fn one(&self) -> Ref {
        Ref::TRUE
    }
    pub fn constant(&self, value: bool) -> Ref {
        Ref::constant(value)
    }

    pub fn is_zero(&self, node: Ref) -> bool {
        node == Ref::FALSE
    }
    pub fn is_one(&self, node: Ref) -> bool {
        node == Ref::TRUE
    }
    pub fn is_terminal(&self, node: Ref) -> bool {
        node.is_terminal()
    }

    /// Number of nodes in the unique table, terminals included.
    pub fn num_nodes(&self) -> usize {
        self.storage.borrow().len()
    }

    pub fn node(&self, node: Ref) -> Node {
        let storage = self.storage.borrow();
        debug_assert!(
            node.index() < storage.len(),
            "Node {} does not belong to this manager",
            node
        );
        storage[node.index()]
    }

    /// Variable of a branch node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is a terminal.
    pub fn variable(&self, node: Ref) -> u32 {
        match self.node(node) {
            Node::Branch { variable, .. } => variable,
            Node::Terminal(_) => panic!("Terminal {} has no variable", node),
        }
    }
    pub fn low(&self, node: Ref) -> Ref {
        match self.node(node) {
            Node::Branch { low, .. } => low,
            Node::Terminal(_) => panic!("Terminal {} has no children", node),
        }
    }
    pub fn high(&self, node: Ref) -> Ref {
        match self.node(node) {
            Node::Branch { high, .. } => high,
            Node::Terminal(_) => panic!("Terminal {} has no children", node),
        }
    }

    /// Variable of the node, `None` for terminals.
    pub fn top_variable(&self, node: Ref) -> Option<u32> {
        self.node(node).variable()
    }

    /// Earliest top variable among the given nodes, `None` if all are terminals.
    pub fn min_top_variable(&self, nodes: impl IntoIterator<Item = Ref>) -> Option<u32> {
        nodes
            .into_iter()
            .filter_map(|node| self.top_variable(node))
            .reduce(|i, j| self.order.min_item(i, j))
    }

    /// Cofactors of `node` with respect to `v`, which must not follow the top variable of `node`.
    pub fn top_cofactors(&self, node: Ref, v: u32) -> (Ref, Ref) {
        match self.node(node) {
            Node::Terminal(_) => (node, node),
            Node::Branch {
                variable,
                low,
                high,
            } => {
                if variable == v {
                    (low, high)
                } else {
                    debug_assert!(
                        self.order.precedes(v, variable),
                        "Variable {} follows the top variable {} of {}",
                        v,
                        variable,
                        node
                    );
                    (node, node)
                }
            }
        }
    }

    /// Check whether `v` cannot occur in `node`, i.e. `node` is a terminal or
    /// its top variable strictly follows `v`.
    pub(crate) fn is_below(&self, node: Ref, v: u32) -> bool {
        match self.top_variable(node) {
            None => true,
            Some(top) => self.order.precedes(v, top),
        }
    }

    /// Smart constructor.
    ///
    /// Returns `low` when both children coincide, and the canonical node for the
    /// `(v, low, high)` triple otherwise.
    pub fn mk_node(&self, v: u32, low: Ref, high: Ref) -> Ref {
        trace!("mk(v = {}, low = {}, high = {})", v, low, high);

        // Handle duplicates
        if low == high {
            trace!("mk: duplicates {} == {}", low, high);
            return low;
        }

        debug_assert!(
            self.is_below(low, v) && self.is_below(high, v),
            "Children {} and {} must be below variable {}",
            low,
            high,
            v
        );

        let i = self.storage.borrow_mut().put(Node::Branch {
            variable: v,
            low,
            high,
        });
        Ref::new(i as u32)
    }

    pub fn mk_var(&self, v: u32) -> Ref {
        self.mk_node(v, Ref::FALSE, Ref::TRUE)
    }

    pub fn mk_literal(&self, v: u32, positive: bool) -> Ref {
        if positive {
            self.mk_node(v, Ref::FALSE, Ref::TRUE)
        } else {
            self.mk_node(v, Ref::TRUE, Ref::FALSE)
        }
    }

    /// Sort literals by the variable order, bottom-most first.
    ///
    /// Returns `None` if some variable occurs with both polarities.
    fn sorted_literals(
        &self,
        literals: impl IntoIterator<Item = (u32, bool)>,
    ) -> Option<Vec<(u32, bool)>> {
        let mut literals = literals.into_iter().collect::<Vec<_>>();
        literals.sort_by(|a, b| self.order.compare_item(b.0, a.0));
        literals.dedup();
        if literals.windows(2).any(|w| w[0].0 == w[1].0) {
            return None;
        }
        Some(literals)
    }

    /// Conjunction of the given literals, each a `(variable, polarity)` pair.
    pub fn cube(&self, literals: impl IntoIterator<Item = (u32, bool)>) -> Ref {
        let Some(literals) = self.sorted_literals(literals) else {
            debug!("cube: contradicting literals");
            return Ref::FALSE;
        };
        debug!("cube(literals = {:?})", literals);
        let mut current = Ref::TRUE;
        for (v, positive) in literals {
            current = if positive {
                self.mk_node(v, Ref::FALSE, current)
            } else {
                self.mk_node(v, current, Ref::FALSE)
            };
        }
        current
    }

    /// Disjunction of the given literals, each a `(variable, polarity)` pair.
    pub fn clause(&self, literals: impl IntoIterator<Item = (u32, bool)>) -> Ref {
        let Some(literals) = self.sorted_literals(literals) else {
            debug!("clause: complementary literals");
            return Ref::TRUE;
        };
        debug!("clause(literals = {:?})", literals);
        let mut current = Ref::FALSE;
        for (v, positive) in literals {
            current = if positive {
                self.mk_node(v, current, Ref::TRUE)
            } else {
                self.mk_node(v, Ref::TRUE, current)
            };
        }
        current
    }

    /// All nodes reachable from `roots`, terminals included.
    pub fn descendants(&self, roots: impl IntoIterator<Item = Ref>) -> HashSet<Ref> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from_iter(roots);

        while let Some(node) = queue.pop_front() {
            if visited.insert(node) {
                if let Node::Branch { low, high, .. } = self.node(node) {
                    queue.push_back(low);
                    queue.push_back(high);
                }
            }
        }

        visited
    }

    /// Number of distinct nodes reachable from `node`, terminals included.
    pub fn size(&self, node: Ref) -> usize {
        self.descendants([node]).len()
    }

    /// Check reducedness and ordering of every node reachable from `node`.
    pub fn is_well_formed(&self, node: Ref) -> bool {
        self.descendants([node]).into_iter().all(|n| match self.node(n) {
            Node::Terminal(value) => n == Ref::constant(value),
            Node::Branch {
                variable,
                low,
                high,
            } => low != high && self.is_below(low, variable) && self.is_below(high, variable),
        })
    }

    pub fn to_bracket_string(&self, node: Ref) -> String {
        match self.node(node) {
            Node::Terminal(false) => "(0)".to_string(),
            Node::Terminal(true) => "(1)".to_string(),
            Node::Branch {
                variable,
                low,
                high,
            } => format!(
                "{}:(x{}, {}, {})",
                node,
                variable,
                self.to_bracket_string(high),
                self.to_bracket_string(low)
            ),
        }
    }
}
