//! Boolean operations.
//!
//! Binary operations use the classic *apply* algorithm: both operands are split on
//! the earliest of their top variables, the operation is applied to the matching
//! cofactors, and the results are joined with [`Bdd::mk_node`]. The memo table of
//! a single call is keyed by the *unordered* pair of operands, since all binary
//! operators here are commutative.

use log::{debug, trace};

use crate::bdd::Bdd;
use crate::cache::Cache;
use crate::node::Node;
use crate::order::ItemOrder;
use crate::reference::Ref;

/// Commutative binary operators supported by [`Bdd::apply`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinOp {
    And,
    Or,
    Xor,
}

impl BinOp {
    /// Result of the operation if it can be decided without looking at the nodes.
    fn terminal_case(self, f: Ref, g: Ref) -> Option<Ref> {
        match self {
            BinOp::And => {
                if f == Ref::FALSE || g == Ref::FALSE {
                    Some(Ref::FALSE)
                } else if f == Ref::TRUE || f == g {
                    Some(g)
                } else if g == Ref::TRUE {
                    Some(f)
                } else {
                    None
                }
            }
            BinOp::Or => {
                if f == Ref::TRUE || g == Ref::TRUE {
                    Some(Ref::TRUE)
                } else if f == Ref::FALSE || f == g {
                    Some(g)
                } else if g == Ref::FALSE {
                    Some(f)
                } else {
                    None
                }
            }
            BinOp::Xor => {
                if f == g {
                    Some(Ref::FALSE)
                } else if f == Ref::FALSE {
                    Some(g)
                } else if g == Ref::FALSE {
                    Some(f)
                } else if f.is_terminal() && g.is_terminal() {
                    Some(Ref::constant(f != g))
                } else {
                    None
                }
            }
        }
    }
}

impl<O> Bdd<O>
where
    O: ItemOrder,
{
    pub fn apply_not(&self, f: Ref) -> Ref {
        debug!("apply_not(f = {})", f);
        let mut cache = Cache::new(self.config().cache_bits);
        let res = self.not_rec(f, &mut cache);
        debug!(
            "apply_not: {} hits, {} misses",
            cache.hits(),
            cache.misses()
        );
        res
    }

    fn not_rec(&self, f: Ref, cache: &mut Cache<Ref, Ref>) -> Ref {
        let (v, low, high) = match self.node(f) {
            Node::Terminal(value) => return Ref::constant(!value),
            Node::Branch {
                variable,
                low,
                high,
            } => (variable, low, high),
        };

        if let Some(&res) = cache.get(&f) {
            return res;
        }

        let low = self.not_rec(low, cache);
        let high = self.not_rec(high, cache);
        let res = self.mk_node(v, low, high);
        cache.insert(f, res);
        res
    }

    /// Apply the binary operator to the arguments.
    pub fn apply(&self, op: BinOp, f: Ref, g: Ref) -> Ref {
        debug!("apply(op = {:?}, f = {}, g = {})", op, f, g);
        let mut cache = Cache::new(self.config().cache_bits);
        let res = self.apply_rec(op, f, g, &mut cache);
        debug!(
            "apply({:?}): {} hits, {} misses",
            op,
            cache.hits(),
            cache.misses()
        );
        res
    }

    fn apply_rec(&self, op: BinOp, f: Ref, g: Ref, cache: &mut Cache<(Ref, Ref), Ref>) -> Ref {
        if let Some(res) = op.terminal_case(f, g) {
            trace!("{:?}({}, {}) => {}", op, f, g, res);
            return res;
        }

        let key = if f <= g { (f, g) } else { (g, f) };
        if let Some(&res) = cache.get(&key) {
            return res;
        }

        let v = match (self.top_variable(f), self.top_variable(g)) {
            (Some(i), Some(j)) => self.order().min_item(i, j),
            (Some(i), None) => i,
            (None, Some(j)) => j,
            (None, None) => unreachable!("Terminals {} and {} reached the split", f, g),
        };

        let (f0, f1) = self.top_cofactors(f, v);
        let (g0, g1) = self.top_cofactors(g, v);

        let low = self.apply_rec(op, f0, g0, cache);
        let high = self.apply_rec(op, f1, g1, cache);
        let res = self.mk_node(v, low, high);
        cache.insert(key, res);
        res
    }

    pub fn apply_and(&self, u: Ref, v: Ref) -> Ref {
        self.apply(BinOp::And, u, v)
    }

    pub fn apply_or(&self, u: Ref, v: Ref) -> Ref {
        self.apply(BinOp::Or, u, v)
    }

    pub fn apply_xor(&self, u: Ref, v: Ref) -> Ref {
        self.apply(BinOp::Xor, u, v)
    }

    pub fn apply_iff(&self, u: Ref, v: Ref) -> Ref {
        debug!("apply_iff(u = {}, v = {})", u, v);
        self.apply_not(self.apply_xor(u, v))
    }

    pub fn apply_imply(&self, u: Ref, v: Ref) -> Ref {
        debug!("apply_imply(u = {}, v = {})", u, v);
        self.apply_or(self.apply_not(u), v)
    }

    /// If-then-else.
    ///
    /// ```text
    /// ITE(f, g, h) = (f ∧ g) ∨ (¬f ∧ h)
    /// ```
    pub fn apply_ite(&self, f: Ref, g: Ref, h: Ref) -> Ref {
        debug!("apply_ite(f = {}, g = {}, h = {})", f, g, h);
        let then = self.apply_and(f, g);
        let otherwise = self.apply_and(self.apply_not(f), h);
        self.apply_or(then, otherwise)
    }

    pub fn apply_and_all(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        debug!("apply_and_all(...)");
        let mut res = Ref::TRUE;
        for node in nodes.into_iter() {
            res = self.apply_and(res, node);
        }
        res
    }

    pub fn apply_or_all(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        debug!("apply_or_all(...)");
        let mut res = Ref::FALSE;
        for node in nodes.into_iter() {
            res = self.apply_or(res, node);
        }
        res
    }
}
