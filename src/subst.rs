//! Composition.
//!
//! [`Bdd::subst`] replaces one variable by a function, [`Bdd::subst_set`] replaces
//! several variables by functions *simultaneously*:
//!
//! ```text
//! subst(f, x, g)          = f[x := g]
//! subst_set(f, {x: g, y: h}) = f[x := g, y := h]   (not f[x := g][y := h])
//! ```

use std::collections::HashMap;

use log::{debug, trace};

use crate::bdd::Bdd;
use crate::cache::Cache;
use crate::order::ItemOrder;
use crate::reference::Ref;

/// Memo tables of a single [`Bdd::subst`] call.
struct SubstCaches {
    compose: Cache<(Ref, Ref, Ref), Ref>,
    restrict_low: Cache<Ref, Ref>,
    restrict_high: Cache<Ref, Ref>,
}

/// A substituted variable whose replacement has not become a constant yet.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct Pending {
    variable: u32,
    /// Replacement, cofactored along the current path.
    replacement: Ref,
    /// Whether the fragments have already been split on this variable.
    conditioned: bool,
}

/// A piece of the target, valid under an assumption about the replacements.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct Fragment {
    /// Assumed values of conditioned replacements.
    condition: Vec<(u32, bool)>,
    node: Ref,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct SubstState {
    /// Sorted by the variable order.
    pending: Vec<Pending>,
    fragments: Vec<Fragment>,
}

impl<O> Bdd<O>
where
    O: ItemOrder,
{
    // f|v<-g
    pub fn subst(&self, f: Ref, v: u32, g: Ref) -> Ref {
        debug!("subst(f = {}, v = {}, g = {})", f, v, g);
        let bits = self.config().cache_bits;
        let mut caches = SubstCaches {
            compose: Cache::new(bits),
            restrict_low: Cache::new(bits),
            restrict_high: Cache::new(bits),
        };
        let res = self.subst_rec(f, f, g, v, &mut caches);
        debug!(
            "subst: {} hits, {} misses",
            caches.compose.hits(),
            caches.compose.misses()
        );
        res
    }

    /// `f0` and `f1` are the target with `v` still to be fixed to false and true.
    fn subst_rec(&self, f0: Ref, f1: Ref, g: Ref, v: u32, caches: &mut SubstCaches) -> Ref {
        // A view branching on `v` is resolved right away.
        let f0 = match self.top_variable(f0) {
            Some(i) if i == v => self.low(f0),
            _ => f0,
        };
        let f1 = match self.top_variable(f1) {
            Some(i) if i == v => self.high(f1),
            _ => f1,
        };

        match g.as_constant() {
            Some(false) => return self.restrict_rec(f0, v, false, &mut caches.restrict_low),
            Some(true) => return self.restrict_rec(f1, v, true, &mut caches.restrict_high),
            None => {}
        }

        if f0 == f1 && self.is_below(f0, v) {
            trace!("{} does not depend on {}", f0, v);
            return f0;
        }

        let key = (f0, f1, g);
        if let Some(&res) = caches.compose.get(&key) {
            return res;
        }

        let m = self
            .min_top_variable([f0, f1, g])
            .unwrap_or_else(|| unreachable!("Replacement {} is a terminal", g));

        let (a0, a1) = self.top_cofactors(f0, m);
        let (b0, b1) = self.top_cofactors(f1, m);
        let (g0, g1) = self.top_cofactors(g, m);

        let low = self.subst_rec(a0, b0, g0, v, caches);
        let high = self.subst_rec(a1, b1, g1, v, caches);
        let res = self.mk_node(m, low, high);
        caches.compose.insert(key, res);
        res
    }

    /// Substitute all the given variables simultaneously.
    pub fn subst_set(&self, f: Ref, replacements: &HashMap<u32, Ref>) -> Ref {
        debug!("subst_set(f = {}, replacements = {:?})", f, replacements);

        let mut pending = replacements
            .iter()
            .map(|(&variable, &replacement)| Pending {
                variable,
                replacement,
                conditioned: false,
            })
            .collect::<Vec<_>>();
        pending.sort_by(|a, b| self.order().compare_item(a.variable, b.variable));

        let state = SubstState {
            pending,
            fragments: vec![Fragment {
                condition: Vec::new(),
                node: f,
            }],
        };

        let mut cache = Cache::new(self.config().cache_bits);
        let res = self.subst_set_rec(state, &mut cache);
        debug!(
            "subst_set: {} hits, {} misses",
            cache.hits(),
            cache.misses()
        );
        res
    }

    fn subst_set_rec(&self, state: SubstState, cache: &mut Cache<SubstState, Ref>) -> Ref {
        let mut state = self.settle(state);

        let node = state.fragments[0].node;
        let unanimous = state.fragments.iter().all(|fragment| fragment.node == node);
        if unanimous && state.pending.iter().all(|p| p.conditioned) {
            return node;
        }

        if let Some(&res) = cache.get(&state) {
            return res;
        }
        let key = state.clone();

        let m = self
            .min_top_variable(
                state
                    .fragments
                    .iter()
                    .map(|fragment| fragment.node)
                    .chain(state.pending.iter().map(|p| p.replacement)),
            )
            .unwrap_or_else(|| unreachable!("Stuck substitution state {:?}", state));

        let res = if let Some(i) = state
            .pending
            .iter()
            .position(|p| !p.conditioned && p.variable == m)
        {
            // The target reached a substituted variable: split every fragment on it.
            trace!("conditioning on replacement of {}", m);
            state.pending[i].conditioned = true;
            state.fragments = state
                .fragments
                .iter()
                .flat_map(|fragment| {
                    let (low, high) = self.top_cofactors(fragment.node, m);
                    [(false, low), (true, high)].map(|(value, node)| {
                        let mut condition = fragment.condition.clone();
                        condition.push((m, value));
                        Fragment { condition, node }
                    })
                })
                .collect();
            self.subst_set_rec(state, cache)
        } else {
            let [low, high] = [false, true].map(|value| {
                let cofactor = |node: Ref| {
                    let (low, high) = self.top_cofactors(node, m);
                    if value {
                        high
                    } else {
                        low
                    }
                };
                let child = SubstState {
                    pending: state
                        .pending
                        .iter()
                        .map(|p| Pending {
                            replacement: cofactor(p.replacement),
                            ..p.clone()
                        })
                        .collect(),
                    fragments: state
                        .fragments
                        .iter()
                        .map(|fragment| Fragment {
                            condition: fragment.condition.clone(),
                            node: cofactor(fragment.node),
                        })
                        .collect(),
                };
                self.subst_set_rec(child, cache)
            });
            self.mk_node(m, low, high)
        };

        cache.insert(key, res);
        res
    }

    /// Fold resolved replacements into the fragments and drop stale variables.
    fn settle(&self, mut state: SubstState) -> SubstState {
        let resolved = state
            .pending
            .iter()
            .filter(|p| p.conditioned)
            .filter_map(|p| Some((p.variable, p.replacement.as_constant()?)))
            .collect::<Vec<_>>();
        for (x, value) in resolved {
            state
                .fragments
                .retain(|fragment| fragment.condition.contains(&(x, value)));
            for fragment in state.fragments.iter_mut() {
                fragment.condition.retain(|&(y, _)| y != x);
            }
            state.pending.retain(|p| p.variable != x);
        }
        assert!(
            !state.fragments.is_empty(),
            "Substitution dropped every fragment"
        );

        // No fragment can contain these variables anymore.
        let fragments = &state.fragments;
        state.pending.retain(|p| {
            p.conditioned
                || !fragments
                    .iter()
                    .all(|fragment| self.is_below(fragment.node, p.variable))
        });
        state
    }
}
