//! Entry points for dynamically typed input.
//!
//! These accept arbitrary [`Value`]s and sort out at runtime whether they can
//! be iterated, raising a type error for values that cannot.

use xiterable_common::{Result, result::type_error};

use crate::{
    LazySequence, Value,
    source::Source,
    transform::Segment,
    zip::zip_all,
};

/// Wraps an iterable value or a generator function.
///
/// A [`Value::Sequence`] is returned as is. Arrays, text and numeric buffers
/// adopt their length and random access; generators have an unknown length.
/// Anything else is a type error.
pub fn wrap_value(value: Value) -> Result<LazySequence<Value>> {
    sequence_of(value, "wrap")
}

fn sequence_of(value: Value, operation: &str) -> Result<LazySequence<Value>> {
    if let Value::Generator(producer) = &value {
        return Ok(LazySequence::from_source(Source::Plain(producer.clone())));
    }
    match value.elements() {
        Some(seq) => Ok(seq),
        None => type_error(
            operation,
            &format!("{value} is neither iterable nor a generator"),
        ),
    }
}

impl LazySequence<Value> {
    /// Chains dynamically typed arguments onto this sequence.
    ///
    /// Primitives, text included, are appended as single elements; arrays,
    /// buffers and sequences are spliced in element by element. Records,
    /// functions and generators cannot be spliced and are a type error.
    pub fn concat_values<I>(&self, values: I) -> Result<LazySequence<Value>>
    where
        I: IntoIterator<Item = Value>,
    {
        let segments = values
            .into_iter()
            .map(|value| {
                if value.is_primitive() {
                    return Ok(Segment::Item(value));
                }
                match value.elements() {
                    Some(items) => Ok(Segment::Items(items)),
                    None => type_error("concat", &format!("{value} is not iterable")),
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.concat(segments))
    }
}

/// [`zip_all`] over dynamically typed sources; rows are [`Value::Array`]s.
pub fn zip_values<I>(sources: I) -> Result<LazySequence<Value>>
where
    I: IntoIterator<Item = Value>,
{
    let sources = sequences_of(sources, "zip")?;
    Ok(zip_all(sources).map(|row, _, _| Value::Array(row.into())))
}

/// Zips `sources` and calls `f` with each row as positional arguments.
///
/// `f` must be a [`Value::Function`].
pub fn zip_with_values<I>(f: &Value, sources: I) -> Result<LazySequence<Value>>
where
    I: IntoIterator<Item = Value>,
{
    let Value::Function(f) = f else {
        return type_error("zip_with", &format!("{f} is not a function"));
    };
    let f = f.clone();
    let sources = sequences_of(sources, "zip_with")?;
    Ok(zip_all(sources).map(move |row, _, _| f.call(&row)))
}

fn sequences_of<I>(sources: I, operation: &str) -> Result<Vec<LazySequence<Value>>>
where
    I: IntoIterator<Item = Value>,
{
    sources
        .into_iter()
        .map(|source| sequence_of(source, operation))
        .collect()
}
