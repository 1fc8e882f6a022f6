//! Source descriptions a [`LazySequence`] is built from.
//!
//! A source is a restartable [`Producer`] tagged with the capabilities known
//! about it when it is described: nothing ([`Source::Plain`]), an exact size
//! ([`Source::Sized`]), or a length plus an [`Accessor`] for indexed lookup
//! ([`Source::RandomAccess`]). The tag is fixed once, at construction.

use std::{fmt, rc::Rc};

use crate::{Length, LazySequence};

pub(crate) type BoxedIter<T> = Box<dyn Iterator<Item = T>>;

/// A restartable producer: every call to [`Producer::start`] returns a fresh,
/// independent iterator over the same elements.
pub struct Producer<T>(Rc<dyn Fn() -> BoxedIter<T>>);

impl<T: 'static> Producer<T> {
    /// Wraps a zero-argument function returning anything iterable.
    pub fn new<F, I>(f: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Producer(Rc::new(move || Box::new(f().into_iter()) as BoxedIter<T>))
    }

    pub fn empty() -> Self {
        Producer::new(std::iter::empty::<T>)
    }

    /// Starts a new pass over the elements.
    #[inline]
    pub fn start(&self) -> BoxedIter<T> {
        (self.0)()
    }
}

impl<T> Producer<T> {
    pub(crate) fn ptr_eq(&self, other: &Producer<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Producer<T> {
    fn clone(&self) -> Self {
        Producer(self.0.clone())
    }
}

impl<T> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Producer")
    }
}

/// Indexed lookup of a single element.
///
/// The function receives forward indices only; negative-index normalization
/// and bounds checks against the declared length are applied by the
/// sequence before the accessor is consulted. It may still return `None`
/// for an index it cannot serve.
pub struct Accessor<T>(Rc<dyn Fn(usize) -> Option<T>>);

impl<T> Accessor<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(usize) -> Option<T> + 'static,
    {
        Accessor(Rc::new(f))
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        (self.0)(index)
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        Accessor(self.0.clone())
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Accessor")
    }
}

/// A producer tagged with what is known about it.
pub enum Source<T> {
    /// Nothing is known; the length is [`Length::Unknown`].
    Plain(Producer<T>),
    /// Yields exactly the given number of elements.
    Sized(Producer<T>, usize),
    /// Supports indexed lookup over the given length.
    RandomAccess(Producer<T>, Length, Accessor<T>),
}

/// Conversion into a [`LazySequence`], adopting whatever length and random
/// access the source already offers.
///
/// A `LazySequence` converts into itself, so wrapping is idempotent.
pub trait IntoLazySequence<T> {
    fn into_lazy(self) -> LazySequence<T>;
}

impl<T: Clone + 'static> IntoLazySequence<T> for LazySequence<T> {
    #[inline]
    fn into_lazy(self) -> LazySequence<T> {
        self
    }
}

impl<T: Clone + 'static> IntoLazySequence<T> for Rc<[T]> {
    fn into_lazy(self) -> LazySequence<T> {
        shared_slice(self)
    }
}

impl<T: Clone + 'static> IntoLazySequence<T> for Vec<T> {
    fn into_lazy(self) -> LazySequence<T> {
        shared_slice(self.into())
    }
}

impl<T: Clone + 'static, const N: usize> IntoLazySequence<T> for [T; N] {
    fn into_lazy(self) -> LazySequence<T> {
        shared_slice(Rc::from(self.to_vec()))
    }
}

impl<T: Clone + 'static> IntoLazySequence<T> for &[T] {
    fn into_lazy(self) -> LazySequence<T> {
        shared_slice(self.into())
    }
}

impl IntoLazySequence<char> for Rc<str> {
    fn into_lazy(self) -> LazySequence<char> {
        text(self)
    }
}

impl IntoLazySequence<char> for &str {
    fn into_lazy(self) -> LazySequence<char> {
        text(self.into())
    }
}

impl IntoLazySequence<char> for String {
    fn into_lazy(self) -> LazySequence<char> {
        text(self.into())
    }
}

/// Wraps anything convertible into a sequence; a sequence wraps to itself.
pub fn wrap<T, S: IntoLazySequence<T>>(source: S) -> LazySequence<T> {
    source.into_lazy()
}

impl<T: Clone + 'static> From<Vec<T>> for LazySequence<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_lazy()
    }
}

/// Elements shared with the caller; iteration and lookup clone out of the
/// same reference-counted slice.
pub(crate) fn shared_slice<T: Clone + 'static>(items: Rc<[T]>) -> LazySequence<T> {
    let len = items.len();
    let producer = {
        let items = items.clone();
        Producer::new(move || {
            let items = items.clone();
            (0..len).map(move |i| items[i].clone())
        })
    };
    let accessor = Accessor::new(move |i| items.get(i).cloned());
    LazySequence::from_source(Source::RandomAccess(
        producer,
        Length::Exact(len),
        accessor,
    ))
}

/// Text as a sequence of `char`s. Lookup is O(1) for ASCII text and a
/// forward scan otherwise.
pub(crate) fn text(text: Rc<str>) -> LazySequence<char> {
    let len = text.chars().count();
    let producer = {
        let text = text.clone();
        Producer::new(move || {
            let text = text.clone();
            let mut offset = 0;
            std::iter::from_fn(move || {
                let c = text[offset..].chars().next()?;
                offset += c.len_utf8();
                Some(c)
            })
        })
    };
    let accessor = if text.is_ascii() {
        Accessor::new(move |i| text.as_bytes().get(i).map(|&b| b as char))
    } else {
        Accessor::new(move |i| text.chars().nth(i))
    };
    LazySequence::from_source(Source::RandomAccess(
        producer,
        Length::Exact(len),
        accessor,
    ))
}
