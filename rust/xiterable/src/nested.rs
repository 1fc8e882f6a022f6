//! Depth-limited flattening of self-similar element types.

use crate::{
    LazySequence, Length,
    source::{BoxedIter, Producer},
};

/// An element type whose values may themselves be sequences of the same
/// type, such as [`Value`](crate::Value).
pub trait Nested: Sized {
    /// The inner elements when this value is iterable, `None` for a leaf.
    fn nested(&self) -> Option<LazySequence<Self>>;
}

impl<T: Nested + Clone + 'static> LazySequence<T> {
    /// Inlines iterable elements up to `depth` levels deep; leaves pass
    /// through unchanged. `flat(0)` is a plain copy.
    ///
    /// The resulting length is [`Length::Unknown`] and random access is lost.
    pub fn flat(&self, depth: usize) -> LazySequence<T> {
        let source = self.clone();
        let producer = Producer::new(move || flat_iter(source.iter(), depth));
        LazySequence::from_parts("flat", producer, Length::Unknown, None)
    }
}

impl<T: Clone + 'static> LazySequence<T> {
    /// [`map`](Self::map) followed by [`flat(1)`](Self::flat).
    pub fn flat_map<U, F>(&self, f: F) -> LazySequence<U>
    where
        U: Nested + Clone + 'static,
        F: Fn(T, usize, &LazySequence<T>) -> U + 'static,
    {
        self.map(f).flat(1)
    }
}

fn flat_iter<T, I>(iter: I, depth: usize) -> BoxedIter<T>
where
    T: Nested + Clone + 'static,
    I: Iterator<Item = T> + 'static,
{
    if depth == 0 {
        return Box::new(iter);
    }
    Box::new(iter.flat_map(move |item| match item.nested() {
        Some(inner) => flat_iter(inner.into_iter(), depth - 1),
        None => Box::new(std::iter::once(item)) as BoxedIter<T>,
    }))
}
