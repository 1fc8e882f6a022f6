//! The [`LazySequence`] wrapper: construction, metadata, iteration and
//! indexed lookup.
//!
//! Transformations live in [`crate::transform`] and [`crate::nested`],
//! consuming operations in [`crate::query`].

use std::{cell::RefCell, fmt, rc::Rc};

use xiterable_common::{Result, result::range_error};

use crate::{
    Length,
    source::{Accessor, BoxedIter, Producer, Source},
};

/// An immutable, cheaply cloneable, lazy sequence of `T`.
///
/// A sequence is a producer of fresh iterators plus what is known about it:
/// a declared [`Length`] and, optionally, an [`Accessor`] for indexed
/// lookup. Transformations never touch the producer; they build a new
/// sequence whose producer, length and accessor are derived from the
/// inputs. Only consuming operations (iteration, `reduce`, `find`, ...)
/// pull elements.
///
/// Iterating more than once works whenever the underlying producer is
/// restartable, which holds for every sequence built by this crate except
/// [`LazySequence::from_single_pass`].
pub struct LazySequence<T> {
    producer: Producer<T>,
    length: Length,
    access: Option<Accessor<T>>,
}

impl<T: Clone + 'static> LazySequence<T> {
    /// Builds a sequence from a capability-tagged source description.
    pub fn from_source(source: Source<T>) -> Self {
        match source {
            Source::Plain(producer) => {
                LazySequence::from_parts("wrap", producer, Length::Unknown, None)
            }
            Source::Sized(producer, len) => {
                LazySequence::from_parts("wrap", producer, Length::Exact(len), None)
            }
            Source::RandomAccess(producer, length, accessor) => {
                LazySequence::from_parts("wrap", producer, length, Some(accessor))
            }
        }
    }

    /// Wraps a zero-argument producer function. Every iteration calls it
    /// again, so the sequence can be traversed any number of times.
    ///
    /// The length is [`Length::Unknown`] until declared with
    /// [`with_len`](Self::with_len).
    pub fn from_fn<F, I>(producer: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        LazySequence::from_source(Source::Plain(Producer::new(producer)))
    }

    /// Wraps a cloneable iterable value; each pass iterates a fresh clone.
    pub fn from_iterable<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + 'static,
        I::IntoIter: 'static,
    {
        LazySequence::from_fn(move || iterable.clone())
    }

    /// Wraps an iterator that can only be traversed once.
    ///
    /// The first pass drains the iterator; every later pass, including
    /// passes made by derived sequences, observes no elements.
    pub fn from_single_pass<I>(iter: I) -> Self
    where
        I: Iterator<Item = T> + 'static,
    {
        let cell = Rc::new(RefCell::new(Some(iter)));
        LazySequence::from_fn(move || cell.borrow_mut().take().into_iter().flatten())
    }

    /// A sequence with no elements.
    pub fn empty() -> Self {
        LazySequence::from_parts(
            "empty",
            Producer::empty(),
            Length::EMPTY,
            Some(Accessor::new(|_| None)),
        )
    }

    /// Returns a copy of this sequence with the declared length replaced.
    ///
    /// The declared length must agree with what the producer yields; it is
    /// trusted, not verified.
    pub fn with_len(&self, length: Length) -> Self {
        LazySequence::from_parts(
            "with_len",
            self.producer.clone(),
            length,
            self.access.clone(),
        )
    }

    /// Returns a copy of this sequence with the random-access function
    /// replaced.
    pub fn with_access<F>(&self, accessor: F) -> Self
    where
        F: Fn(usize) -> Option<T> + 'static,
    {
        LazySequence::from_parts(
            "with_access",
            self.producer.clone(),
            self.length,
            Some(Accessor::new(accessor)),
        )
    }

    pub(crate) fn from_parts(
        operation: &str,
        producer: Producer<T>,
        length: Length,
        access: Option<Accessor<T>>,
    ) -> Self {
        log::trace!(
            "{operation}: length {length}, random access {}",
            if access.is_some() { "kept" } else { "none" }
        );
        LazySequence {
            producer,
            length,
            access,
        }
    }

    /// The declared length.
    #[inline]
    pub fn len(&self) -> Length {
        self.length
    }

    /// Returns `true` if the sequence is declared to have no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length.upper_bound() == Some(0)
    }

    /// Returns `true` if the length is unbounded (infinite or unknown).
    #[inline]
    pub fn is_endless(&self) -> bool {
        self.length.is_endless()
    }

    #[inline]
    pub fn has_random_access(&self) -> bool {
        self.access.is_some()
    }

    /// Starts a fresh pass over the elements.
    pub fn iter(&self) -> Iter<T> {
        Iter {
            inner: self.producer.start(),
        }
    }

    /// Looks up the element at `index` without iterating.
    ///
    /// Negative indices count from the end and need an exact length.
    /// Indices outside the sequence yield `Ok(None)`; a sequence without
    /// random access fails with a range error.
    pub fn at(&self, index: isize) -> Result<Option<T>> {
        if self.access.is_none() {
            return range_error("at", "I do not know how to random access");
        }
        match self.length.resolve(index, "at")? {
            Some(index) => Ok(self.fetch(index)),
            None => Ok(None),
        }
    }

    /// Bounds-checked lookup at a forward index; `None` when out of range
    /// or without an accessor.
    pub(crate) fn fetch(&self, index: usize) -> Option<T> {
        if !self.length.admits(index) {
            return None;
        }
        self.access.as_ref()?.get(index)
    }

    /// Returns `true` if both handles share one producer.
    pub(crate) fn same_instance(&self, other: &LazySequence<T>) -> bool {
        self.producer.ptr_eq(&other.producer)
    }
}

impl<T> Clone for LazySequence<T> {
    fn clone(&self) -> Self {
        LazySequence {
            producer: self.producer.clone(),
            length: self.length,
            access: self.access.clone(),
        }
    }
}

impl<T> fmt::Debug for LazySequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySequence")
            .field("length", &self.length)
            .field("random_access", &self.access.is_some())
            .finish()
    }
}

/// A single pass over a [`LazySequence`].
pub struct Iter<T> {
    inner: BoxedIter<T>,
}

impl<T> Iterator for Iter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T: Clone + 'static> IntoIterator for LazySequence<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

impl<T: Clone + 'static> IntoIterator for &LazySequence<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::IntoLazySequence;

    #[test]
    fn test_from_fn_restarts() {
        let seq = LazySequence::from_fn(|| vec![1, 2, 3]);
        assert_eq!(seq.len(), Length::Unknown);
        assert_eq!(seq.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(seq.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_from_iterable_restarts() {
        let seq = LazySequence::from_iterable(0..3);
        let mut total = 0;
        for v in &seq {
            total += v;
        }
        for v in seq.clone() {
            total += v;
        }
        assert_eq!(total, 6);
    }

    #[test]
    fn test_single_pass_exhausts() {
        let seq = LazySequence::from_single_pass(vec![1, 2].into_iter());
        assert_eq!(seq.iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(seq.iter().count(), 0);
    }

    #[test]
    fn test_declared_metadata_overrides() {
        let seq = LazySequence::from_fn(|| 0..5)
            .with_len(Length::Exact(5))
            .with_access(|i| if i < 5 { Some(i) } else { None });
        assert_eq!(seq.len(), Length::Exact(5));
        assert_eq!(seq.at(-2).unwrap(), Some(3));

        let adopted = vec![1, 2, 3].into_lazy().with_len(Length::Exact(2));
        assert_eq!(adopted.at(2).unwrap(), None);
    }

    #[test]
    fn test_at_without_access_fails() {
        let seq = LazySequence::from_fn(|| 0..5);
        let err = seq.at(0).unwrap_err();
        assert!(err.is_range_error());
        assert_eq!(err.kind().message(), "I do not know how to random access");
    }

    #[test]
    fn test_negative_index_on_endless_fails() {
        let seq = LazySequence::from_fn(|| 0..).with_access(Some);
        assert_eq!(seq.at(7).unwrap(), Some(7));
        assert!(seq.at(-1).unwrap_err().is_range_error());
    }

    #[test]
    fn test_empty() {
        let seq = LazySequence::<u8>::empty();
        assert!(seq.is_empty());
        assert_eq!(seq.at(0).unwrap(), None);
        assert_eq!(seq.iter().next(), None);
    }

    #[test]
    fn test_construction_does_not_iterate() {
        let started = Rc::new(Cell::new(0));
        let counter = started.clone();
        let seq = LazySequence::from_fn(move || {
            counter.set(counter.get() + 1);
            0..3
        });
        let _view = seq.with_len(Length::Exact(3));
        assert_eq!(started.get(), 0);
        let _ = seq.iter();
        assert_eq!(started.get(), 1);
    }

    #[test]
    fn test_debug() {
        let seq = vec![1].into_lazy();
        assert_eq!(
            format!("{seq:?}"),
            "LazySequence { length: Exact(1), random_access: true }"
        );
    }
}
