//! Lazy transformations of a [`LazySequence`].
//!
//! Each transformation returns a new sequence and leaves its input untouched.
//! The derived length is computed with [`Length`] arithmetic, and random access
//! is composed from the input's accessor whenever the element-to-index
//! correspondence survives the transformation (map, slice, take, skip,
//! reversed, zip). Filtering and chaining break that correspondence, so their
//! results have no accessor.

use std::{
    ops::{Bound, RangeBounds},
    rc::Rc,
};

use xiterable_common::{Result, result::range_error, verify_range};

use crate::{
    IntoLazySequence, LazySequence, Length,
    source::{Accessor, Producer},
};

/// One argument of [`LazySequence::concat`]: either a whole sequence to
/// splice in, or a single element.
pub enum Segment<T> {
    Items(LazySequence<T>),
    Item(T),
}

impl<T> From<LazySequence<T>> for Segment<T> {
    fn from(items: LazySequence<T>) -> Self {
        Segment::Items(items)
    }
}

impl<T: Clone + 'static> LazySequence<T> {
    /// Lazily applies `f` to every element.
    ///
    /// `f` receives the element, its index, and this sequence. It is only
    /// called when the corresponding element is pulled (by iteration or by
    /// [`at`](Self::at)). The length is unchanged and random access is kept.
    pub fn map<U, F>(&self, f: F) -> LazySequence<U>
    where
        U: Clone + 'static,
        F: Fn(T, usize, &LazySequence<T>) -> U + 'static,
    {
        let f = Rc::new(f);
        let producer = {
            let source = self.clone();
            let f = f.clone();
            Producer::new(move || {
                let seed = source.clone();
                let f = f.clone();
                source
                    .iter()
                    .enumerate()
                    .map(move |(i, v)| f(v, i, &seed))
            })
        };
        let access = self.has_random_access().then(|| {
            let source = self.clone();
            Accessor::new(move |i| source.fetch(i).map(|v| f(v, i, &source)))
        });
        LazySequence::from_parts("map", producer, self.len(), access)
    }

    /// Lazily keeps the elements for which `predicate` holds.
    ///
    /// The resulting length can only be bounded from above, and random
    /// access is lost.
    pub fn filter<F>(&self, predicate: F) -> LazySequence<T>
    where
        F: Fn(&T, usize, &LazySequence<T>) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        let source = self.clone();
        let producer = Producer::new(move || {
            let seed = source.clone();
            let predicate = predicate.clone();
            source
                .iter()
                .enumerate()
                .filter(move |(i, v)| predicate(v, *i, &seed))
                .map(|(_, v)| v)
        });
        LazySequence::from_parts("filter", producer, self.len().filtered(), None)
    }

    /// Pairs every element with its index.
    pub fn entries(&self) -> LazySequence<(usize, T)> {
        self.map(|v, i, _| (i, v))
    }

    /// The indices of the elements.
    pub fn keys(&self) -> LazySequence<usize> {
        self.map(|_, i, _| i)
    }

    /// The elements themselves, as a new view.
    pub fn values(&self) -> LazySequence<T> {
        self.map(|v, _, _| v)
    }

    /// Replaces every element with `value`.
    pub fn filled(&self, value: T) -> LazySequence<T> {
        self.map(move |_, _, _| value.clone())
    }

    /// Selects the elements in `range`, like `Array.prototype.slice`.
    ///
    /// Negative bounds count from the end and need an exact length. An empty
    /// range yields an empty sequence without touching the source.
    ///
    /// ```
    /// use xiterable::range_to;
    ///
    /// let seq = range_to(10).slice(2..-5).unwrap();
    /// assert_eq!(seq.to_vec().unwrap(), vec![2, 3, 4]);
    /// ```
    pub fn slice(&self, range: impl RangeBounds<isize>) -> Result<LazySequence<T>> {
        let length = self.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => length.resolve_bound(start, "slice")?,
            Bound::Excluded(&start) => length.resolve_bound(start, "slice")? + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => Some(
                length
                    .resolve(end, "slice")?
                    .map_or(0, |end| end.saturating_add(1)),
            ),
            Bound::Excluded(&end) => Some(length.resolve_bound(end, "slice")?),
            Bound::Unbounded => None,
        };
        Ok(self.window("slice", start, end))
    }

    /// Keeps at most the first `n` elements.
    pub fn take(&self, n: usize) -> LazySequence<T> {
        self.window("take", 0, Some(n))
    }

    /// Discards the first `n` elements.
    #[doc(alias = "drop")]
    pub fn skip(&self, n: usize) -> LazySequence<T> {
        self.window("skip", n, None)
    }

    fn window(&self, operation: &str, start: usize, end: Option<usize>) -> LazySequence<T> {
        if end.is_some_and(|end| end <= start) {
            return LazySequence::empty();
        }
        let count = end.map_or(usize::MAX, |end| end - start);
        let producer = {
            let source = self.clone();
            Producer::new(move || source.iter().skip(start).take(count))
        };
        let access = self.has_random_access().then(|| {
            let source = self.clone();
            Accessor::new(move |i| source.fetch(start.checked_add(i)?))
        });
        LazySequence::from_parts(operation, producer, self.len().window(start, end), access)
    }

    /// The elements in reverse order.
    ///
    /// Needs an exact length and random access: the reversed producer walks
    /// the indices from the back through the accessor, so nothing is
    /// materialized.
    pub fn reversed(&self) -> Result<LazySequence<T>> {
        verify_range!(
            "reversed",
            !self.is_endless(),
            "cannot reverse an endless sequence"
        );
        let Some(len) = self.len().exact() else {
            return range_error(
                "reversed",
                "cannot reverse a sequence without an exact length",
            );
        };
        verify_range!(
            "reversed",
            self.has_random_access(),
            "cannot reverse without random access"
        );
        let producer = {
            let source = self.clone();
            Producer::new(move || {
                let source = source.clone();
                (0..len).rev().map_while(move |i| source.fetch(i))
            })
        };
        let source = self.clone();
        let access = Accessor::new(move |i| source.fetch(len.checked_sub(i)?.checked_sub(1)?));
        Ok(LazySequence::from_parts(
            "reversed",
            producer,
            Length::Exact(len),
            Some(access),
        ))
    }

    /// Chains this sequence with each segment in order.
    ///
    /// The length is the sum of the parts when every part is bounded;
    /// random access is not carried over.
    pub fn concat<I>(&self, segments: I) -> LazySequence<T>
    where
        I: IntoIterator<Item = Segment<T>>,
    {
        let parts = std::iter::once(self.clone())
            .chain(segments.into_iter().map(|segment| match segment {
                Segment::Items(items) => items,
                Segment::Item(item) => LazySequence::from(vec![item]),
            }))
            .collect::<Rc<[_]>>();
        let length = parts
            .iter()
            .fold(Length::EMPTY, |length, part| length.concat(part.len()));
        let producer = Producer::new(move || {
            let parts = parts.clone();
            (0..parts.len()).flat_map(move |k| parts[k].iter())
        });
        LazySequence::from_parts("concat", producer, length, None)
    }

    /// Inlines the elements of every element, one level deep.
    pub fn flatten<U>(&self) -> LazySequence<U>
    where
        T: IntoLazySequence<U>,
        U: Clone + 'static,
    {
        let source = self.clone();
        let producer =
            Producer::new(move || source.iter().flat_map(|item| item.into_lazy().into_iter()));
        LazySequence::from_parts("flatten", producer, Length::Unknown, None)
    }

    /// Pairs this sequence with `other`, stopping with the shorter one.
    ///
    /// See [`zip`](crate::zip()).
    pub fn zip<U, S>(&self, other: S) -> LazySequence<(T, U)>
    where
        U: Clone + 'static,
        S: IntoLazySequence<U>,
    {
        crate::zip::zip(self.clone(), other)
    }
}
