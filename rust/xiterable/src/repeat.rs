use crate::{
    LazySequence, Length,
    source::{Accessor, BoxedIter, Producer},
};

/// `value` forever.
pub fn repeat<T: Clone + 'static>(value: T) -> LazySequence<T> {
    repeated("repeat", value, Length::Infinite)
}

/// `value`, `times` times.
pub fn repeat_n<T: Clone + 'static>(value: T, times: usize) -> LazySequence<T> {
    repeated("repeat_n", value, Length::Exact(times))
}

fn repeated<T: Clone + 'static>(operation: &str, value: T, length: Length) -> LazySequence<T> {
    let producer = {
        let value = value.clone();
        Producer::new(move || {
            let items = std::iter::repeat(value.clone());
            match length {
                Length::Exact(n) => Box::new(items.take(n)) as BoxedIter<T>,
                _ => Box::new(items),
            }
        })
    };
    // Indices past `times` are rejected by the sequence's bounds check.
    let accessor = Accessor::new(move |_| Some(value.clone()));
    LazySequence::from_parts(operation, producer, length, Some(accessor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat() {
        let seq = repeat('x');
        assert!(seq.is_endless());
        assert_eq!(seq.take(3).iter().collect::<String>(), "xxx");
        assert_eq!(seq.at(1 << 40).unwrap(), Some('x'));
    }

    #[test]
    fn test_repeat_n() {
        let seq = repeat_n("ab", 3);
        assert_eq!(seq.len(), Length::Exact(3));
        assert_eq!(seq.join("").unwrap(), "ababab");
        assert_eq!(seq.at(2).unwrap(), Some("ab"));
        assert_eq!(seq.at(3).unwrap(), None);
        assert_eq!(seq.at(-3).unwrap(), Some("ab"));
        assert!(repeat_n(0, 0).is_empty());
    }
}
