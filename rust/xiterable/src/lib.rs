//! Lazy, composable sequences with array-like operations.
//!
//! A [`LazySequence`] wraps a restartable producer of elements together with
//! a declared [`Length`] and, optionally, a random-access function. Its
//! transformations ([`map`](LazySequence::map), [`filter`](LazySequence::filter),
//! [`slice`](LazySequence::slice), [`zip`], ...) build new sequences without
//! pulling a single element, and derive both the length and the random-access
//! capability of the result analytically. This keeps infinite sources usable
//! and makes, for example, reversing a mapped range O(1) per element:
//!
//! ```
//! use xiterable::range_to;
//!
//! let squares = range_to(1_000_000u64).map(|v, _, _| v * v);
//! let last = squares.reversed().unwrap().take(2);
//! assert_eq!(last.to_vec().unwrap(), vec![999_998_000_001, 999_996_000_004]);
//! ```
//!
//! Consuming operations (`reduce`, `find`, `index_of`, `join`, ...) pull from
//! one fresh pass, and those that must reach the end refuse unbounded
//! sequences with a range [`Error`].

pub mod dynamic;
pub mod length;
pub mod nested;
pub mod query;
pub mod range;
pub mod repeat;
pub mod same_value;
pub mod sequence;
pub mod source;
pub mod transform;
pub mod value;
pub mod zip;


pub use dynamic::{wrap_value, zip_values, zip_with_values};
pub use length::Length;
pub use nested::Nested;
pub use range::{RangeValue, range, range_between, range_from, range_step, range_to};
pub use repeat::{repeat, repeat_n};
pub use same_value::SameValue;
pub use sequence::{Iter, LazySequence};
pub use source::{Accessor, IntoLazySequence, Producer, Source, wrap};
pub use transform::Segment;
pub use value::{Callable, NumericBuffer, Value, is_integer_value, is_iterable_value};
pub use xiterable_common::{Error, ErrorKind, Result};
pub use zip::{zip, zip_all, zip_all_with, zip_with};

/// The crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
