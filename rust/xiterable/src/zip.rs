//! Lock-step combination of several sequences.
//!
//! A zipped sequence is as long as its shortest input ([`Length::min`]) and
//! stops as soon as any input runs dry at runtime. It has random access
//! only when every input has it.

use std::rc::Rc;

use crate::{
    IntoLazySequence, LazySequence, Length,
    source::{Accessor, Producer},
};

/// Pairs the elements of `a` and `b`.
///
/// ```
/// use xiterable::{range, repeat, zip};
///
/// let pairs = zip(range(), repeat('x')).take(2);
/// assert_eq!(pairs.to_vec().unwrap(), vec![(0, 'x'), (1, 'x')]);
/// ```
pub fn zip<A, B, SA, SB>(a: SA, b: SB) -> LazySequence<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
    SA: IntoLazySequence<A>,
    SB: IntoLazySequence<B>,
{
    let (a, b) = (a.into_lazy(), b.into_lazy());
    let length = a.len().min(b.len());
    let producer = {
        let (a, b) = (a.clone(), b.clone());
        Producer::new(move || a.iter().zip(b.iter()))
    };
    let access = (a.has_random_access() && b.has_random_access())
        .then(|| Accessor::new(move |i| Some((a.fetch(i)?, b.fetch(i)?))));
    LazySequence::from_parts("zip", producer, length, access)
}

/// Rows of the i-th elements of every source. No sources give an empty
/// sequence.
pub fn zip_all<T, I>(sources: I) -> LazySequence<Vec<T>>
where
    T: Clone + 'static,
    I: IntoIterator<Item = LazySequence<T>>,
{
    let sources = sources.into_iter().collect::<Rc<[_]>>();
    let Some(length) = sources.iter().map(LazySequence::len).reduce(Length::min) else {
        return LazySequence::empty();
    };
    let producer = {
        let sources = sources.clone();
        Producer::new(move || {
            let mut iters = sources.iter().map(LazySequence::iter).collect::<Vec<_>>();
            std::iter::from_fn(move || {
                iters
                    .iter_mut()
                    .map(Iterator::next)
                    .collect::<Option<Vec<T>>>()
            })
            .fuse()
        })
    };
    let access = sources
        .iter()
        .all(LazySequence::has_random_access)
        .then(|| {
            Accessor::new(move |i| {
                sources
                    .iter()
                    .map(|s| s.fetch(i))
                    .collect::<Option<Vec<T>>>()
            })
        });
    LazySequence::from_parts("zip_all", producer, length, access)
}

/// [`zip`] followed by a map over the pairs.
pub fn zip_with<A, B, U, SA, SB, F>(f: F, a: SA, b: SB) -> LazySequence<U>
where
    A: Clone + 'static,
    B: Clone + 'static,
    U: Clone + 'static,
    SA: IntoLazySequence<A>,
    SB: IntoLazySequence<B>,
    F: Fn(A, B) -> U + 'static,
{
    zip(a, b).map(move |(x, y), _, _| f(x, y))
}

/// [`zip_all`] followed by a map over the rows.
pub fn zip_all_with<T, U, I, F>(f: F, sources: I) -> LazySequence<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
    I: IntoIterator<Item = LazySequence<T>>,
    F: Fn(Vec<T>) -> U + 'static,
{
    zip_all(sources).map(move |row, _, _| f(row))
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{range, range_between, range_to, repeat};

    #[test]
    fn test_zip_endless_with_endless() {
        let seq = zip(range::<u64>(), repeat('x'));
        assert_eq!(seq.len(), Length::Infinite);
        assert_eq!(
            seq.take(4).iter().collect::<Vec<_>>(),
            vec![(0, 'x'), (1, 'x'), (2, 'x'), (3, 'x')]
        );
        assert_eq!(seq.at(10).unwrap(), Some((10, 'x')));
    }

    #[test]
    fn test_zip_with() {
        let seq = zip_with(|a, b| format!("{a}{b}"), range::<u32>(), repeat('x'));
        assert_eq!(
            seq.take(4).iter().collect::<Vec<_>>(),
            vec!["0x", "1x", "2x", "3x"]
        );
    }

    #[test]
    fn test_zip_shortest_wins() {
        let seq = zip("abc", range_to(10));
        assert_eq!(seq.len(), Length::Exact(3));
        assert_eq!(
            seq.iter().collect::<Vec<_>>(),
            vec![('a', 0), ('b', 1), ('c', 2)]
        );
        assert_eq!(seq.reversed().unwrap().at(0).unwrap(), Some(('c', 2)));
    }

    #[test]
    fn test_zip_stops_on_runtime_exhaustion() {
        let declared_long = LazySequence::from_fn(|| 0..2).with_len(Length::Infinite);
        let seq = zip(declared_long, range::<i32>());
        assert_eq!(seq.iter().count(), 2);
        assert!(!seq.has_random_access());
    }

    #[test]
    fn test_zip_all() {
        let seq = zip_all([range_to(3), range_between(10, 20), repeat(7)]);
        assert_eq!(seq.len(), Length::Exact(3));
        assert_eq!(
            seq.iter().collect::<Vec<_>>(),
            vec![vec![0, 10, 7], vec![1, 11, 7], vec![2, 12, 7]]
        );
        assert_eq!(seq.at(-1).unwrap(), Some(vec![2, 12, 7]));

        let sums = zip_all_with(
            |row: Vec<i32>| row.iter().sum::<i32>(),
            [range_to(3), range_to(3)],
        );
        assert_eq!(sums.iter().collect::<Vec<_>>(), vec![0, 2, 4]);

        let none = zip_all(Vec::<LazySequence<u8>>::new());
        assert!(none.is_empty());
        assert_eq!(none.iter().count(), 0);
    }

    #[test]
    fn test_zip_all_stops_advancing_after_exhaustion() {
        let pulls = Rc::new(Cell::new(0));
        let counter = pulls.clone();
        let counted = range::<i32>().map(move |v, _, _| {
            counter.set(counter.get() + 1);
            v
        });
        let seq = zip_all([range_to(2), counted]);
        assert_eq!(seq.iter().count(), 2);
        assert_eq!(pulls.get(), 2);
    }
}
