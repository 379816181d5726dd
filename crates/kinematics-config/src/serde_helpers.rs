//! Serde helpers for configuration deserialization.

use serde::de::{Deserializer, Error as DeError, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// Deserialize either a whitespace-separated string of names or an
/// array of names into `Vec<String>`.
///
/// The scalar form (`solvers = "kdl cached_ik"`) is the historical
/// spelling and remains accepted alongside the array form.
pub fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	struct StringOrSeq;

	impl<'de> Visitor<'de> for StringOrSeq {
		type Value = Vec<String>;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("a string of whitespace-separated names or an array of names")
		}

		fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
			Ok(value.split_whitespace().map(str::to_string).collect())
		}

		fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
			let mut names = Vec::new();
			while let Some(name) = seq.next_element::<String>()? {
				names.push(name);
			}
			Ok(names)
		}
	}

	deserializer.deserialize_any(StringOrSeq)
}

/// Deserialize either a single number or an array of numbers into
/// `Vec<f64>`, accepting integer spellings for whole values.
pub fn float_or_seq<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	struct FloatOrSeq;

	impl<'de> Visitor<'de> for FloatOrSeq {
		type Value = Vec<f64>;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("a number or an array of numbers")
		}

		fn visit_f64<E: DeError>(self, value: f64) -> Result<Self::Value, E> {
			Ok(vec![value])
		}

		fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
			Ok(vec![value as f64])
		}

		fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
			Ok(vec![value as f64])
		}

		fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
			let mut values = Vec::new();
			while let Some(Number(value)) = seq.next_element()? {
				values.push(value);
			}
			Ok(values)
		}
	}

	deserializer.deserialize_any(FloatOrSeq)
}

/// A float that also accepts integer spellings.
struct Number(f64);

impl<'de> Deserialize<'de> for Number {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct NumberVisitor;

		impl Visitor<'_> for NumberVisitor {
			type Value = Number;

			fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("a number")
			}

			fn visit_f64<E: DeError>(self, value: f64) -> Result<Self::Value, E> {
				Ok(Number(value))
			}

			fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
				Ok(Number(value as f64))
			}

			fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
				Ok(Number(value as f64))
			}
		}

		deserializer.deserialize_any(NumberVisitor)
	}
}
