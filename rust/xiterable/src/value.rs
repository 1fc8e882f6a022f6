//! A dynamically typed element universe.
//!
//! [`Value`] models the kinds of values a loosely typed host hands to a lazy
//! sequence: primitives, text, arrays, fixed-width numeric buffers, plain
//! records, functions, generator functions and sequences themselves. It is
//! what [`flat`](crate::LazySequence::flat) recurses into, what the
//! [`is_iterable_value`] and [`is_integer_value`] checks inspect, and what
//! the functions in [`crate::dynamic`] accept.

use std::{collections::BTreeMap, fmt, rc::Rc};

#[cfg(feature = "bigint")]
use num_bigint::BigInt;

use crate::{
    LazySequence, Length, Nested, SameValue,
    source::{Accessor, Producer, Source},
};

#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    #[cfg(feature = "bigint")]
    BigInt(BigInt),
    Str(Rc<str>),
    Array(Rc<[Value]>),
    Buffer(Rc<NumericBuffer>),
    /// A plain keyed record; not iterable.
    Record(Rc<BTreeMap<String, Value>>),
    Sequence(LazySequence<Value>),
    Function(Callable),
    /// A zero-argument function producing a fresh iterator per call.
    Generator(Producer<Value>),
}

impl Value {
    pub fn str(text: &str) -> Value {
        Value::Str(text.into())
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Array(items.into_iter().collect())
    }

    pub fn record<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Value {
        Value::Record(Rc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    pub fn function<F>(f: F) -> Value
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Value::Function(Callable::new(f))
    }

    pub fn generator<F, I>(f: F) -> Value
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Value::Generator(Producer::new(f))
    }

    /// Returns `true` for the values that are not objects: undefined, null,
    /// booleans, numbers, big integers and text.
    pub fn is_primitive(&self) -> bool {
        match self {
            Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_) => {
                true
            }
            #[cfg(feature = "bigint")]
            Value::BigInt(_) => true,
            _ => false,
        }
    }

    /// The elements of an iterable value, adopting its length and random
    /// access; `None` for anything else.
    ///
    /// Text yields one-character strings. Generators are not iterable
    /// themselves; see [`wrap_value`](crate::wrap_value).
    pub fn elements(&self) -> Option<LazySequence<Value>> {
        match self {
            Value::Str(text) => Some(
                crate::source::text(text.clone()).map(|c, _, _| Value::Str(c.to_string().into())),
            ),
            Value::Array(items) => Some(crate::source::shared_slice(items.clone())),
            Value::Buffer(buffer) => Some(buffer_elements(buffer.clone())),
            Value::Sequence(seq) => Some(seq.clone()),
            _ => None,
        }
    }
}

/// Returns `true` if `value` can be iterated: text, arrays, numeric buffers
/// and sequences.
pub fn is_iterable_value(value: &Value) -> bool {
    matches!(
        value,
        Value::Str(_) | Value::Array(_) | Value::Buffer(_) | Value::Sequence(_)
    )
}

/// Returns `true` for integral numbers and big integers.
pub fn is_integer_value(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_finite() && n.trunc() == *n,
        #[cfg(feature = "bigint")]
        Value::BigInt(_) => true,
        _ => false,
    }
}

impl Nested for Value {
    /// Iterable values are inner sequences, except one-character strings,
    /// which would otherwise nest into themselves forever.
    fn nested(&self) -> Option<LazySequence<Value>> {
        if let Value::Str(text) = self {
            if text.chars().nth(1).is_none() && !text.is_empty() {
                return None;
            }
        }
        self.elements()
    }
}

impl SameValue for Value {
    /// Primitives compare by value; objects compare by identity.
    fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.same_value(b),
            #[cfg(feature = "bigint")]
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Buffer(a), Value::Buffer(b)) => Rc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Rc::ptr_eq(a, b),
            (Value::Sequence(a), Value::Sequence(b)) => a.same_instance(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Generator(a), Value::Generator(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    /// Structural equality for data; identity for sequences and functions.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Buffer(a), Value::Buffer(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            _ => self.same_value(other),
        }
    }
}

impl fmt::Display for Value {
    /// Text coercion: arrays and buffers render as comma-separated elements
    /// (with undefined and null as empty), records as `[object Object]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => fmt_number(*n, f),
            #[cfg(feature = "bigint")]
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Str(text) => f.write_str(text),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !matches!(item, Value::Undefined | Value::Null) {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Value::Buffer(buffer) => {
                for i in 0..buffer.len() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if let Some(item) = buffer.get(i) {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Value::Record(_) | Value::Sequence(_) => f.write_str("[object Object]"),
            Value::Function(_) => f.write_str("function"),
            Value::Generator(_) => f.write_str("generator"),
        }
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else if (1e-6..1e21).contains(&n.abs()) {
        write!(f, "{n}")
    } else {
        // Exponent notation carries an explicit sign: `1e+21`, `1.5e-7`.
        let text = format!("{n:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{mantissa}e+{exponent}")
            }
            _ => f.write_str(&text),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::str(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Str(text.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items.into())
    }
}

impl From<NumericBuffer> for Value {
    fn from(buffer: NumericBuffer) -> Self {
        Value::Buffer(Rc::new(buffer))
    }
}

impl From<LazySequence<Value>> for Value {
    fn from(seq: LazySequence<Value>) -> Self {
        Value::Sequence(seq)
    }
}

#[cfg(feature = "bigint")]
impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::BigInt(n)
    }
}

/// A host function taking positional arguments.
#[derive(Clone)]
pub struct Callable(Rc<dyn Fn(&[Value]) -> Value>);

impl Callable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Callable(Rc::new(f))
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable")
    }
}

/// A fixed-width numeric array.
///
/// Elements read as [`Value::Number`], except 64-bit integers, which read as
/// [`Value::BigInt`] when the `bigint` feature is enabled.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericBuffer {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

macro_rules! each_buffer {
    ($buffer:expr, $items:ident => $body:expr) => {
        match $buffer {
            NumericBuffer::I8($items) => $body,
            NumericBuffer::U8($items) => $body,
            NumericBuffer::I16($items) => $body,
            NumericBuffer::U16($items) => $body,
            NumericBuffer::I32($items) => $body,
            NumericBuffer::U32($items) => $body,
            NumericBuffer::I64($items) => $body,
            NumericBuffer::U64($items) => $body,
            NumericBuffer::F32($items) => $body,
            NumericBuffer::F64($items) => $body,
        }
    };
}

impl NumericBuffer {
    pub fn len(&self) -> usize {
        each_buffer!(self, items => items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        each_buffer!(self, items => items.get(index).map(|&x| x.to_value()))
    }
}

trait BufferElement: Copy {
    fn to_value(self) -> Value;
}

macro_rules! number_element {
    ($($ty:ty),*) => {
        $(
            impl BufferElement for $ty {
                #[inline]
                fn to_value(self) -> Value {
                    Value::Number(f64::from(self))
                }
            }
        )*
    };
}

number_element!(i8, u8, i16, u16, i32, u32, f32, f64);

macro_rules! wide_element {
    ($($ty:ty),*) => {
        $(
            impl BufferElement for $ty {
                #[cfg(feature = "bigint")]
                fn to_value(self) -> Value {
                    Value::BigInt(BigInt::from(self))
                }

                #[cfg(not(feature = "bigint"))]
                fn to_value(self) -> Value {
                    Value::Number(self as f64)
                }
            }
        )*
    };
}

wide_element!(i64, u64);

fn buffer_elements(buffer: Rc<NumericBuffer>) -> LazySequence<Value> {
    let len = buffer.len();
    let producer = {
        let buffer = buffer.clone();
        Producer::new(move || {
            let buffer = buffer.clone();
            (0..len).map_while(move |i| buffer.get(i))
        })
    };
    let accessor = Accessor::new(move |i| buffer.get(i));
    LazySequence::from_source(Source::RandomAccess(producer, Length::Exact(len), accessor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_iterable_value() {
        assert!(is_iterable_value(&Value::str("")));
        assert!(is_iterable_value(&Value::array([])));
        assert!(is_iterable_value(&NumericBuffer::U8(vec![]).into()));
        let seq = crate::range_to(0).map(|v: i32, _, _| Value::from(v));
        assert!(is_iterable_value(&seq.into()));
        assert!(!is_iterable_value(&Value::Bool(false)));
        assert!(!is_iterable_value(&Value::Number(0.0)));
        assert!(!is_iterable_value(&Value::Null));
        assert!(!is_iterable_value(&Value::Undefined));
        assert!(!is_iterable_value(&Value::record::<&str>([])));
        assert!(!is_iterable_value(&Value::function(|_| Value::Undefined)));
        assert!(!is_iterable_value(&Value::generator(Vec::new)));
    }

    #[test]
    fn test_is_integer_value() {
        assert!(is_integer_value(&Value::Number(3.0)));
        assert!(is_integer_value(&Value::Number(-0.0)));
        assert!(!is_integer_value(&Value::Number(3.5)));
        assert!(!is_integer_value(&Value::Number(f64::NAN)));
        assert!(!is_integer_value(&Value::Number(f64::INFINITY)));
        assert!(!is_integer_value(&Value::str("3")));
    }

    #[cfg(feature = "bigint")]
    #[test]
    fn test_bigint_values() {
        let big = Value::from(BigInt::from(1) << 80);
        assert!(is_integer_value(&big));
        assert!(!is_iterable_value(&big));
        assert_eq!(big.to_string(), "1208925819614629174706176");

        let buffer = Value::from(NumericBuffer::I64(vec![-1, 2]));
        let items = buffer.elements().unwrap();
        assert_eq!(items.at(0).unwrap(), Some(Value::BigInt(BigInt::from(-1))));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Number(1.0).to_string(), "1");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::Number(123456.75).to_string(), "123456.75");
        assert_eq!(Value::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::Number(1e21).to_string(), "1e+21");
        assert_eq!(Value::Number(-2.5e30).to_string(), "-2.5e+30");
        assert_eq!(Value::Number(1e-6).to_string(), "0.000001");
        assert_eq!(Value::Number(1e-7).to_string(), "1e-7");
        assert_eq!(Value::Number(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(
            Value::array([Value::from(1), Value::Null, Value::array(["a".into(), true.into()])])
                .to_string(),
            "1,,a,true"
        );
        assert_eq!(Value::record([("k", Value::Null)]).to_string(), "[object Object]");
        assert_eq!(
            Value::from(NumericBuffer::F32(vec![1.5, 2.0])).to_string(),
            "1.5,2"
        );
    }

    #[test]
    fn test_same_value_identity() {
        let items = Value::array([Value::from(1)]);
        assert!(items.same_value(&items.clone()));
        assert!(!items.same_value(&Value::array([Value::from(1)])));
        assert_eq!(items, Value::array([Value::from(1)]));
        assert!(Value::Number(f64::NAN).same_value(&Value::Number(f64::NAN)));
        assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert!(Value::str("a").same_value(&Value::str("a")));
    }

    #[test]
    fn test_elements() {
        let text = Value::str("héllo").elements().unwrap();
        assert_eq!(text.len(), Length::Exact(5));
        assert_eq!(text.at(1).unwrap(), Some(Value::str("é")));

        let buffer = Value::from(NumericBuffer::U16(vec![7, 8, 9]));
        let items = buffer.elements().unwrap();
        assert_eq!(items.len(), Length::Exact(3));
        assert_eq!(items.at(-1).unwrap(), Some(Value::Number(9.0)));
        assert_eq!(items.join("+").unwrap(), "7+8+9");

        assert!(Value::Number(1.0).elements().is_none());
    }

    #[test]
    fn test_callable() {
        let add = Value::function(|args| {
            let numbers = args.iter().filter_map(|a| match a {
                Value::Number(n) => Some(*n),
                _ => None,
            });
            Value::Number(numbers.sum())
        });
        let Value::Function(f) = &add else {
            panic!("expected a function");
        };
        assert_eq!(f.call(&[Value::from(1), Value::from(2)]), Value::Number(3.0));
        assert!(add.same_value(&add.clone()));
    }
}
