//! Cofactors.
//!
//! - [`Bdd::restrict`] fixes one variable to a constant.
//! - [`Bdd::restrict_set`] fixes many variables at once, in a single traversal.
//! - [`Bdd::restrict_law`] is the generalized cofactor (Coudert's *constrain*):
//!   the result agrees with `f` wherever the law holds.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::{debug, trace};

use crate::bdd::Bdd;
use crate::cache::Cache;
use crate::node::Node;
use crate::order::ItemOrder;
use crate::reference::Ref;

impl<O> Bdd<O>
where
    O: ItemOrder,
{
    // f|v<-b
    pub fn restrict(&self, f: Ref, v: u32, value: bool) -> Ref {
        debug!("restrict(f = {}, v = {}, value = {})", f, v, value);
        let mut cache = Cache::new(self.config().cache_bits);
        let res = self.restrict_rec(f, v, value, &mut cache);
        debug!(
            "restrict: {} hits, {} misses",
            cache.hits(),
            cache.misses()
        );
        res
    }

    pub(crate) fn restrict_rec(
        &self,
        f: Ref,
        v: u32,
        value: bool,
        cache: &mut Cache<Ref, Ref>,
    ) -> Ref {
        let (i, low, high) = match self.node(f) {
            Node::Terminal(_) => return f,
            Node::Branch {
                variable,
                low,
                high,
            } => (variable, low, high),
        };

        match self.order().compare_item(i, v) {
            // 'f' does not depend on 'v'
            Ordering::Greater => f,
            // 'v' cannot occur below, by ordering
            Ordering::Equal => {
                if value {
                    high
                } else {
                    low
                }
            }
            Ordering::Less => {
                if let Some(&res) = cache.get(&f) {
                    return res;
                }
                let low = self.restrict_rec(low, v, value, cache);
                let high = self.restrict_rec(high, v, value, cache);
                let res = self.mk_node(i, low, high);
                cache.insert(f, res);
                res
            }
        }
    }

    /// Restrict `f` to all the given variable values simultaneously.
    pub fn restrict_set(&self, f: Ref, values: &HashMap<u32, bool>) -> Ref {
        debug!("restrict_set(f = {}, values = {:?})", f, values);

        let mut entries = values.iter().map(|(&v, &b)| (v, b)).collect::<Vec<_>>();
        entries.sort_by(|a, b| self.order().compare_item(a.0, b.0));

        let mut cache = Cache::new(self.config().cache_bits);
        let res = self.restrict_set_rec(f, &entries, &mut cache);
        debug!(
            "restrict_set: {} hits, {} misses",
            cache.hits(),
            cache.misses()
        );
        res
    }

    fn restrict_set_rec(
        &self,
        f: Ref,
        mut entries: &[(u32, bool)],
        cache: &mut Cache<Ref, Ref>,
    ) -> Ref {
        let (i, low, high) = match self.node(f) {
            Node::Terminal(_) => return f,
            Node::Branch {
                variable,
                low,
                high,
            } => (variable, low, high),
        };

        // Entries preceding `i` cannot occur in `f` anymore.
        while let Some(&(v, _)) = entries.first() {
            if self.order().precedes(v, i) {
                entries = &entries[1..];
            } else {
                break;
            }
        }
        let Some(&(v, value)) = entries.first() else {
            return f;
        };

        // The remaining entries are determined by the top variable of `f`,
        // so the node alone is a valid key.
        if let Some(&res) = cache.get(&f) {
            return res;
        }

        let res = if v == i {
            let child = if value { high } else { low };
            self.restrict_set_rec(child, &entries[1..], cache)
        } else {
            let low = self.restrict_set_rec(low, entries, cache);
            let high = self.restrict_set_rec(high, entries, cache);
            self.mk_node(i, low, high)
        };
        cache.insert(f, res);
        res
    }

    /// Generalized cofactor of `f` with respect to `law`.
    ///
    /// The result agrees with `f` on every assignment satisfying `law`. When `law` is
    /// a cube, this is the same as [`Bdd::restrict_set`] with the cube's literals.
    ///
    /// An unsatisfiable `law` yields `false`, whatever `f` is.
    pub fn restrict_law(&self, f: Ref, law: Ref) -> Ref {
        debug!("restrict_law(f = {}, law = {})", f, law);
        let mut cache = Cache::new(self.config().cache_bits);
        let res = self.restrict_law_rec(f, law, &mut cache);
        debug!(
            "restrict_law: {} hits, {} misses",
            cache.hits(),
            cache.misses()
        );
        res
    }

    fn restrict_law_rec(&self, f: Ref, law: Ref, cache: &mut Cache<(Ref, Ref), Ref>) -> Ref {
        if self.is_one(law) {
            trace!("law is one => f|law = f");
            return f;
        }
        if self.is_zero(law) {
            trace!("law is zero => f|law = 0");
            return Ref::FALSE;
        }
        if self.is_terminal(f) {
            trace!("f is terminal => f|law = f");
            return f;
        }
        if f == law {
            trace!("f = law => f|law = 1");
            return Ref::TRUE;
        }

        let key = (law, f);
        if let Some(&res) = cache.get(&key) {
            return res;
        }

        let i = self.variable(law);
        let j = self.variable(f);
        let (v, (l0, l1), (f0, f1)) = match self.order().compare_item(i, j) {
            Ordering::Less => (i, (self.low(law), self.high(law)), (f, f)),
            Ordering::Greater => (j, (law, law), (self.low(f), self.high(f))),
            Ordering::Equal => (
                i,
                (self.low(law), self.high(law)),
                (self.low(f), self.high(f)),
            ),
        };

        let res = if self.is_zero(l1) {
            trace!("law|{}=1 is zero", v);
            self.restrict_law_rec(f0, l0, cache)
        } else if self.is_zero(l0) {
            trace!("law|{}=0 is zero", v);
            self.restrict_law_rec(f1, l1, cache)
        } else {
            let low = self.restrict_law_rec(f0, l0, cache);
            let high = self.restrict_law_rec(f1, l1, cache);
            self.mk_node(v, low, high)
        };
        cache.insert(key, res);
        res
    }
}
