//! Variable orders.
//!
//! Every [`Bdd`][crate::bdd::Bdd] manager is parameterized by one [`ItemOrder`],
//! fixed for the whole lifetime of the manager. All diagrams built by the manager
//! respect it: along any root-to-terminal path, variables strictly increase
//! according to [`ItemOrder::compare_item`].
//!
//! ```
//! use std::cmp::Ordering;
//! use robdd::order::{CustomOrder, ItemOrder, NaturalOrder, ReverseOrder};
//!
//! assert_eq!(NaturalOrder.compare_item(1, 2), Ordering::Less);
//! assert_eq!(ReverseOrder.compare_item(1, 2), Ordering::Greater);
//!
//! // Even variables first, then odd ones.
//! let order = CustomOrder::new(|i: u32, j: u32| (i % 2, i).cmp(&(j % 2, j)));
//! assert!(order.precedes(4, 1));
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

/// A total order over variable indices.
///
/// Implementations must be pure: the same pair must always compare the same way.
pub trait ItemOrder {
    fn compare_item(&self, i: u32, j: u32) -> Ordering;

    /// Check whether `i` strictly precedes `j`.
    fn precedes(&self, i: u32, j: u32) -> bool {
        self.compare_item(i, j) == Ordering::Less
    }

    /// Return the earlier of the two variables.
    fn min_item(&self, i: u32, j: u32) -> u32 {
        if self.precedes(j, i) {
            j
        } else {
            i
        }
    }

    /// Sort the slice of variables by this order.
    fn sort_items(&self, items: &mut [u32]) {
        items.sort_by(|&i, &j| self.compare_item(i, j));
    }
}

/// Ascending integer order.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct NaturalOrder;

impl ItemOrder for NaturalOrder {
    fn compare_item(&self, i: u32, j: u32) -> Ordering {
        i.cmp(&j)
    }
}

/// Descending integer order.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct ReverseOrder;

impl ItemOrder for ReverseOrder {
    fn compare_item(&self, i: u32, j: u32) -> Ordering {
        j.cmp(&i)
    }
}

/// An order given by a caller-supplied comparator.
pub struct CustomOrder<F> {
    compare: F,
}

impl<F> CustomOrder<F>
where
    F: Fn(u32, u32) -> Ordering,
{
    pub fn new(compare: F) -> Self {
        Self { compare }
    }
}

impl CustomOrder<Box<dyn Fn(u32, u32) -> Ordering>> {
    /// Order variables by their position in `ranking`.
    ///
    /// Variables missing from `ranking` come after all ranked ones, in natural order.
    pub fn from_ranking(ranking: &[u32]) -> Self {
        let position: HashMap<u32, usize> =
            ranking.iter().enumerate().map(|(p, &v)| (v, p)).collect();
        let key = move |v: u32| (position.get(&v).copied().unwrap_or(usize::MAX), v);
        Self {
            compare: Box::new(move |i, j| key(i).cmp(&key(j))),
        }
    }
}

impl<F> ItemOrder for CustomOrder<F>
where
    F: Fn(u32, u32) -> Ordering,
{
    fn compare_item(&self, i: u32, j: u32) -> Ordering {
        (self.compare)(i, j)
    }
}

impl<F> Debug for CustomOrder<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomOrder").finish_non_exhaustive()
    }
}
