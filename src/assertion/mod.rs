//! Quantified content assertions.
//!
//! A [`Session`] resolves a path under a quantifier into a [`Selector`];
//! the selector's verbs walk the selected units and check each against the
//! expected content, counting matches against the quantifier's [`Bound`].
//!
//! | Quantifier | min | max (exclusive) |
//! |---|---|---|
//! | `select` | 1 | 2 (whole selection as one unit) |
//! | `every_existent` / `every` | number of units | unbounded |
//! | `exactly(n)` | n | n + 1 |
//! | `at_least(n)` | n | unbounded |
//! | `at_most(n)` | 0 | n + 1 |
//! | `one` / `some` / `no` | `exactly(1)` / `at_least(1)` / `at_most(0)` | |

pub mod bound;
pub mod error;
pub mod matcher;
pub mod ops;
pub mod selector;
pub mod session;

pub use bound::{Bound, Quantifier};
pub use error::{AssertionError, Violation};
pub use selector::{Check, Selector};
pub use session::Session;
