//! Consuming operations: searches, folds and materialization.
//!
//! Everything here pulls elements from one fresh pass over the sequence.
//! Operations that must reach the end refuse unbounded sequences up front
//! instead of looping forever; short-circuiting searches accept them and
//! simply never return when nothing matches.

use std::fmt;

use xiterable_common::{Result, result::type_error, verify_range};

use crate::{LazySequence, SameValue};

impl<T: Clone + 'static> LazySequence<T> {
    /// Calls `f` with every element, its index and this sequence.
    ///
    /// Never returns on an endless sequence.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(T, usize, &LazySequence<T>),
    {
        for (i, v) in self.iter().enumerate() {
            f(v, i, self);
        }
    }

    /// Index of the first element satisfying `predicate`.
    pub fn find_index<F>(&self, mut predicate: F) -> Option<usize>
    where
        F: FnMut(&T, usize, &LazySequence<T>) -> bool,
    {
        self.iter()
            .enumerate()
            .find(|(i, v)| predicate(v, *i, self))
            .map(|(i, _)| i)
    }

    /// First element satisfying `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T, usize, &LazySequence<T>) -> bool,
    {
        self.iter()
            .enumerate()
            .find(|(i, v)| predicate(v, *i, self))
            .map(|(_, v)| v)
    }

    /// Index of the first element equal to `value` under [`SameValue`],
    /// starting the search at `from`.
    ///
    /// A negative `from` counts from the end and needs an exact length.
    pub fn index_of(&self, value: &T, from: isize) -> Result<Option<usize>>
    where
        T: SameValue,
    {
        let from = self.len().resolve_bound(from, "index_of")?;
        Ok(self.position_from(value, from))
    }

    /// Index of the last element equal to `value` under [`SameValue`],
    /// searching backwards from `from` (the last element when `None`).
    ///
    /// The search runs forward over the [`reversed`](Self::reversed) view, so
    /// it needs an exact length and random access.
    pub fn last_index_of(&self, value: &T, from: Option<isize>) -> Result<Option<usize>>
    where
        T: SameValue,
    {
        verify_range!(
            "last_index_of",
            self.len().exact().is_some(),
            "cannot search backwards without an exact length"
        );
        let reversed = self.reversed()?;
        let Some(last) = self.len().exact().and_then(|n| n.checked_sub(1)) else {
            return Ok(None);
        };
        let from = match from {
            None => last,
            Some(from) => match self.len().resolve(from, "last_index_of")? {
                Some(from) => from.min(last),
                None => return Ok(None),
            },
        };
        Ok(reversed
            .position_from(value, last - from)
            .map(|found| last - found))
    }

    /// Returns `true` if [`index_of`](Self::index_of) finds `value`.
    pub fn includes(&self, value: &T, from: isize) -> Result<bool>
    where
        T: SameValue,
    {
        Ok(self.index_of(value, from)?.is_some())
    }

    fn position_from(&self, value: &T, from: usize) -> Option<usize>
    where
        T: SameValue,
    {
        self.entries()
            .find_index(|(i, v), _, _| *i >= from && v.same_value(value))
    }

    /// Returns `true` if every element satisfies `predicate`; `true` for an
    /// empty sequence.
    pub fn every<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&T, usize, &LazySequence<T>) -> bool,
    {
        self.iter()
            .enumerate()
            .all(|(i, v)| predicate(&v, i, self))
    }

    /// Returns `true` if some element satisfies `predicate`; `false` for an
    /// empty sequence.
    pub fn some<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&T, usize, &LazySequence<T>) -> bool,
    {
        self.iter()
            .enumerate()
            .any(|(i, v)| predicate(&v, i, self))
    }

    /// Left fold seeded with the first element.
    ///
    /// The callback receives the accumulator, the element, its index (from
    /// 1) and this sequence. Fails with a range error on an unbounded
    /// sequence and with a type error on an empty one.
    pub fn reduce<F>(&self, mut f: F) -> Result<T>
    where
        F: FnMut(T, T, usize, &LazySequence<T>) -> T,
    {
        self.verify_bounded("reduce")?;
        let mut iter = self.iter().enumerate();
        let Some((_, first)) = iter.next() else {
            return type_error("reduce", "reduce of empty sequence with no initial value");
        };
        Ok(iter.fold(first, |acc, (i, v)| f(acc, v, i, self)))
    }

    /// Left fold seeded with `init`; callback indices start at 0.
    pub fn reduce_with<A, F>(&self, init: A, mut f: F) -> Result<A>
    where
        F: FnMut(A, T, usize, &LazySequence<T>) -> A,
    {
        self.verify_bounded("reduce")?;
        Ok(self
            .iter()
            .enumerate()
            .fold(init, |acc, (i, v)| f(acc, v, i, self)))
    }

    /// [`reduce`](Self::reduce) over the [`reversed`](Self::reversed) view.
    ///
    /// The callback sees indices and the sequence of the reversed view.
    pub fn reduce_right<F>(&self, f: F) -> Result<T>
    where
        F: FnMut(T, T, usize, &LazySequence<T>) -> T,
    {
        self.verify_bounded("reduce_right")?;
        self.reversed()?.reduce(f)
    }

    /// [`reduce_with`](Self::reduce_with) over the reversed view.
    pub fn reduce_right_with<A, F>(&self, init: A, f: F) -> Result<A>
    where
        F: FnMut(A, T, usize, &LazySequence<T>) -> A,
    {
        self.verify_bounded("reduce_right")?;
        self.reversed()?.reduce_with(init, f)
    }

    /// Renders every element with [`Display`](fmt::Display) and joins them
    /// with `separator`. An empty sequence joins to `""`.
    pub fn join(&self, separator: &str) -> Result<String>
    where
        T: fmt::Display,
    {
        self.verify_bounded("join")?;
        let mut texts = self.iter().map(|v| v.to_string());
        let Some(first) = texts.next() else {
            return Ok(String::new());
        };
        Ok(texts.fold(first, |mut acc, v| {
            acc.push_str(separator);
            acc.push_str(&v);
            acc
        }))
    }

    /// Collects the elements into a `Vec`, refusing unbounded sequences.
    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.verify_bounded("to_vec")?;
        Ok(self.iter().collect())
    }

    pub(crate) fn verify_bounded(&self, operation: &str) -> Result<()> {
        verify_range!(
            operation,
            self.len().is_bounded(),
            "cannot consume an endless sequence"
        );
        Ok(())
    }
}
