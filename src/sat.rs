use log::debug;
use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::order::ItemOrder;
use crate::reference::Ref;

impl<O> Bdd<O>
where
    O: ItemOrder,
{
    /// Returns one satisfying assignment for the BDD, if any exists.
    ///
    /// The assignment is a path to the `true` terminal, as `(variable, value)`
    /// pairs in the variable order. Variables not on the path are free.
    ///
    /// Returns `None` if the BDD represents the constant false function.
    pub fn one_sat(&self, node: Ref) -> Option<Vec<(u32, bool)>> {
        if self.is_zero(node) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = node;

        // Reduced diagrams have no dead branches: every non-false node reaches `true`.
        while !self.is_one(current) {
            let v = self.variable(current);
            let high = self.high(current);
            if !self.is_zero(high) {
                path.push((v, true));
                current = high;
            } else {
                path.push((v, false));
                current = self.low(current);
            }
        }

        Some(path)
    }

    /// Number of satisfying assignments over `num_vars` variables.
    ///
    /// The support of `node` must consist of at most `num_vars` variables.
    pub fn sat_count(&self, node: Ref, num_vars: usize) -> BigUint {
        debug!("sat_count(node = {}, num_vars = {})", node, num_vars);
        let max = BigUint::from(1u32) << num_vars;
        self.fold(node, BigUint::ZERO, max, |_, low, high| (low + high) >> 1)
    }

    /// Check whether `f` implies `g`.
    pub fn is_implies(&self, f: Ref, g: Ref) -> bool {
        self.is_zero(self.apply_and(f, self.apply_not(g)))
    }
}
