//! Declared element counts of lazy sequences and the arithmetic that derives
//! them analytically, without consuming a producer.

use std::fmt;

use xiterable_common::{Result, result::range_error};

/// Declared element count of a [`LazySequence`](crate::LazySequence).
///
/// `Infinite` and `Unknown` are the two *unbounded* states: operations that
/// need to reach the end of a sequence (reduce, reversal, negative indexing)
/// refuse both of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Length {
    /// Exactly `n` elements.
    Exact(usize),
    /// Finite, with at most `n` elements (e.g. a filtered finite sequence).
    AtMost(usize),
    /// Known to never end.
    Infinite,
    /// Not known; the producer may or may not end.
    Unknown,
}

impl Length {
    pub const EMPTY: Length = Length::Exact(0);

    /// Returns `true` for the unbounded states (`Infinite` and `Unknown`).
    #[inline]
    pub fn is_endless(&self) -> bool {
        matches!(self, Length::Infinite | Length::Unknown)
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        !self.is_endless()
    }

    /// The exact element count, if known.
    #[inline]
    pub fn exact(&self) -> Option<usize> {
        match self {
            Length::Exact(n) => Some(*n),
            _ => None,
        }
    }

    /// The largest possible element count, if the sequence is bounded.
    #[inline]
    pub fn upper_bound(&self) -> Option<usize> {
        match self {
            Length::Exact(n) | Length::AtMost(n) => Some(*n),
            Length::Infinite | Length::Unknown => None,
        }
    }

    /// Returns `true` if a forward `index` may address an element.
    #[inline]
    pub fn admits(&self, index: usize) -> bool {
        match self.upper_bound() {
            Some(n) => index < n,
            None => true,
        }
    }

    /// Length after keeping at most the first `n` elements.
    pub fn take(self, n: usize) -> Length {
        match self {
            Length::Exact(m) => Length::Exact(m.min(n)),
            Length::AtMost(m) => Length::AtMost(m.min(n)),
            Length::Infinite => Length::Exact(n),
            Length::Unknown => Length::AtMost(n),
        }
    }

    /// Length after discarding the first `n` elements.
    pub fn skip(self, n: usize) -> Length {
        match self {
            Length::Exact(m) => Length::Exact(m.saturating_sub(n)),
            Length::AtMost(m) => Length::AtMost(m.saturating_sub(n)),
            endless => endless,
        }
    }

    /// Length of the half-open window `[start, end)`; `end == None` keeps
    /// everything from `start` onwards.
    pub fn window(self, start: usize, end: Option<usize>) -> Length {
        let rest = self.skip(start);
        match end {
            Some(end) => rest.take(end.saturating_sub(start)),
            None => rest,
        }
    }

    /// Length after dropping an unpredictable subset of the elements.
    pub fn filtered(self) -> Length {
        match self {
            Length::Exact(n) | Length::AtMost(n) => Length::AtMost(n),
            Length::Infinite | Length::Unknown => Length::Unknown,
        }
    }

    /// Length of a lock-step combination that stops with its shortest input.
    pub fn min(self, other: Length) -> Length {
        use Length::*;
        match (self, other) {
            (Exact(a), Exact(b)) => Exact(a.min(b)),
            (Exact(a), AtMost(b)) | (AtMost(a), Exact(b)) | (AtMost(a), AtMost(b)) => {
                AtMost(a.min(b))
            }
            (Exact(a), Infinite) | (Infinite, Exact(a)) => Exact(a),
            (AtMost(a), Infinite) | (Infinite, AtMost(a)) => AtMost(a),
            (Exact(a), Unknown)
            | (Unknown, Exact(a))
            | (AtMost(a), Unknown)
            | (Unknown, AtMost(a)) => AtMost(a),
            (Infinite, Infinite) => Infinite,
            (Infinite, Unknown) | (Unknown, Infinite) | (Unknown, Unknown) => Unknown,
        }
    }

    /// Length of `self` followed by `other`.
    pub fn concat(self, other: Length) -> Length {
        use Length::*;
        match (self, other) {
            (Infinite, _) | (_, Infinite) => Infinite,
            (Unknown, _) | (_, Unknown) => Unknown,
            (Exact(a), Exact(b)) => a.checked_add(b).map_or(Unknown, Exact),
            (Exact(a) | AtMost(a), Exact(b) | AtMost(b)) => a.checked_add(b).map_or(Unknown, AtMost),
        }
    }

    /// Resolves a signed element index into a forward offset.
    ///
    /// Non-negative indices are returned as is. Negative indices count from
    /// the end and need an exact length; `None` when one reaches past the
    /// front of the sequence.
    pub fn resolve(&self, index: isize, operation: &str) -> Result<Option<usize>> {
        if let Ok(index) = usize::try_from(index) {
            return Ok(Some(index));
        }
        match self.exact() {
            Some(n) => Ok(n.checked_sub(index.unsigned_abs())),
            None => range_error(operation, "cannot go backwards without an exact length"),
        }
    }

    /// Resolves a signed slice bound, clamping at the front of the sequence.
    pub fn resolve_bound(&self, bound: isize, operation: &str) -> Result<usize> {
        Ok(self.resolve(bound, operation)?.unwrap_or(0))
    }
}

impl From<usize> for Length {
    fn from(n: usize) -> Self {
        Length::Exact(n)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Exact(n) => write!(f, "{n}"),
            Length::AtMost(n) => write!(f, "<={n}"),
            Length::Infinite => f.write_str("infinite"),
            Length::Unknown => f.write_str("unknown"),
        }
    }
}
