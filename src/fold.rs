//! Structural folds over diagrams, and the queries built on them.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::bdd::Bdd;
use crate::cache::Cache;
use crate::node::Node;
use crate::order::ItemOrder;
use crate::reference::Ref;

impl<O> Bdd<O>
where
    O: ItemOrder,
{
    /// Bottom-up fold of the diagram rooted at `f`.
    ///
    /// Terminals map to `for_false` and `for_true`, every branch node maps to
    /// `combine(variable, &low, &high)` applied to the results of its children.
    /// Each node is combined exactly once, shared subgraphs are not revisited.
    ///
    /// ```
    /// # use robdd::bdd::Bdd;
    /// let bdd = Bdd::default();
    /// let f = bdd.apply_and(bdd.mk_var(1), bdd.mk_var(2));
    /// // Number of branch nodes on the longest path:
    /// let depth = bdd.fold(f, 0, 0, |_, l: &usize, h: &usize| 1 + l.max(h));
    /// assert_eq!(depth, 2);
    /// ```
    pub fn fold<T, F>(&self, f: Ref, for_false: T, for_true: T, mut combine: F) -> T
    where
        T: Clone,
        F: FnMut(u32, &T, &T) -> T,
    {
        debug!("fold(f = {})", f);
        let mut cache = Cache::new(self.config().cache_bits);
        let res = self.fold_rec(f, &for_false, &for_true, &mut combine, &mut cache);
        debug!("fold: {} hits, {} misses", cache.hits(), cache.misses());
        res
    }

    fn fold_rec<T, F>(
        &self,
        f: Ref,
        for_false: &T,
        for_true: &T,
        combine: &mut F,
        cache: &mut Cache<Ref, T>,
    ) -> T
    where
        T: Clone,
        F: FnMut(u32, &T, &T) -> T,
    {
        let (v, low, high) = match self.node(f) {
            Node::Terminal(false) => return for_false.clone(),
            Node::Terminal(true) => return for_true.clone(),
            Node::Branch {
                variable,
                low,
                high,
            } => (variable, low, high),
        };

        if let Some(res) = cache.get(&f) {
            return res.clone();
        }

        let low = self.fold_rec(low, for_false, for_true, combine, cache);
        let high = self.fold_rec(high, for_false, for_true, combine, cache);
        let res = combine(v, &low, &high);
        cache.insert(f, res.clone());
        res
    }

    /// Same as [`Bdd::fold`], but without recursion.
    ///
    /// Nodes are visited in post-order from an explicit stack, so every value is
    /// computed before any parent consumes it.
    pub fn fold_strict<T, F>(&self, f: Ref, for_false: T, for_true: T, mut combine: F) -> T
    where
        T: Clone,
        F: FnMut(u32, &T, &T) -> T,
    {
        debug!("fold_strict(f = {})", f);

        let mut values: HashMap<Ref, T> = HashMap::new();
        values.insert(Ref::FALSE, for_false);
        values.insert(Ref::TRUE, for_true);

        // (node, children already pushed)
        let mut stack = vec![(f, false)];
        while let Some((node, expanded)) = stack.pop() {
            if values.contains_key(&node) {
                continue;
            }
            let (v, low, high) = match self.node(node) {
                Node::Branch {
                    variable,
                    low,
                    high,
                } => (variable, low, high),
                Node::Terminal(_) => unreachable!("Terminals are always folded"),
            };
            if expanded {
                let res = match (values.get(&low), values.get(&high)) {
                    (Some(l), Some(h)) => combine(v, l, h),
                    _ => unreachable!("Children of {} are folded before it", node),
                };
                values.insert(node, res);
            } else {
                stack.push((node, true));
                stack.push((high, false));
                stack.push((low, false));
            }
        }

        debug!("fold_strict: {} values", values.len());
        match values.remove(&f) {
            Some(res) => res,
            None => unreachable!("Root {} is folded", f),
        }
    }

    /// Variables occurring in `f`.
    pub fn support(&self, f: Ref) -> BTreeSet<u32> {
        self.fold(f, BTreeSet::new(), BTreeSet::new(), |v, low, high| {
            let mut vars = low | high;
            vars.insert(v);
            vars
        })
    }

    /// Value of `f` under the given valuation of its variables.
    pub fn evaluate(&self, f: Ref, valuation: impl Fn(u32) -> bool) -> bool {
        let mut current = f;
        loop {
            match self.node(current) {
                Node::Terminal(value) => return value,
                Node::Branch {
                    variable,
                    low,
                    high,
                } => {
                    current = if valuation(variable) { high } else { low };
                }
            }
        }
    }
}
