//! # robdd: Reduced Ordered Binary Decision Diagrams
//!
//! **`robdd`** is a manager-centric library for representing boolean functions as
//! **Reduced Ordered Binary Decision Diagrams**.
//!
//! ## What is an ROBDD?
//!
//! A Binary Decision Diagram represents a boolean function as a directed acyclic graph
//! whose inner nodes branch on a variable and whose leaves are `false` and `true`.
//! When variables appear in the same order on every path and no node is redundant, the
//! diagram is **canonical**: for a fixed order, every boolean function has exactly one
//! representation. Since all nodes are hash-consed, checking two functions for equality
//! is comparing two integers.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: All nodes live in the [`Bdd`][crate::bdd::Bdd] manager,
//!   which hands out lightweight [`Ref`][crate::reference::Ref] handles.
//! - **Pluggable Variable Order**: The manager is generic over an [`ItemOrder`][crate::order::ItemOrder].
//!   Natural, reverse and caller-defined orders are provided.
//! - **Per-call Caching**: Every operation memoizes its subproblems in its own [`Cache`][crate::cache::Cache],
//!   dropped when the operation returns.
//! - **Rich API**: Boolean operators (NOT, AND, OR, XOR, ITE), cofactors (single variable,
//!   sets of variables, generalized cofactor), functional composition (single and
//!   simultaneous), structural folds and model counting.
//!
//! ## Basic Usage
//!
//! ```rust
//! use robdd::bdd::Bdd;
//!
//! // 1. Initialize the manager
//! let bdd = Bdd::default();
//!
//! // 2. Create variables
//! let x1 = bdd.mk_var(1);
//! let x2 = bdd.mk_var(2);
//!
//! // 3. Build a formula: f = x1 AND (NOT x2)
//! let not_x2 = bdd.apply_not(x2);
//! let f = bdd.apply_and(x1, not_x2);
//!
//! // 4. Check properties
//! assert!(!bdd.is_zero(f)); // It is satisfiable
//! assert!(!bdd.is_one(f));  // It is not a tautology
//!
//! // 5. Evaluate (x1=true, x2=false) -> should be true
//! assert!(bdd.evaluate(f, |v| v == 1));
//!
//! // 6. Swap the variables: f[x1 := x2, x2 := x1] = x2 AND (NOT x1)
//! let g = bdd.subst_set(f, &[(1, x2), (2, x1)].into());
//! assert_eq!(g, bdd.apply_and(x2, bdd.apply_not(x1)));
//! ```
//!
//! ## Core Components
//!
//! - **[`bdd`]**: The [`Bdd`][crate::bdd::Bdd] manager, its configuration and the smart constructor.
//! - **[`apply`]**: Negation and binary operators.
//! - **[`restrict`]**: Cofactors.
//! - **[`subst`]**: Functional composition.
//! - **[`fold`]**: Structural folds, support and evaluation.
//! - **[`sat`]**: Satisfying assignments and model counting.

pub mod apply;
pub mod bdd;
pub mod cache;
pub mod fold;
pub mod node;
pub mod order;
pub mod reference;
pub mod restrict;
pub mod sat;
pub mod subst;
pub mod table;
pub mod utils;
