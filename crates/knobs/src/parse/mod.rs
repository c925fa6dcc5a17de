//! String conversions for environment values.
//!
//! Every helper has the transform signature expected by
//! [`EnvSource::with_transform`](crate::EnvSource::with_transform), so they can
//! be attached directly:
//!
//! ```ignore
//! let workers = Definition::new(4usize).env_with("APP_WORKERS", parse_int);
//! ```

use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use crate::KnobError;

#[cfg(test)]
mod tests;

/// Accepts any string unchanged.
pub fn parse_string(raw: &str) -> Result<String, KnobError> {
	Ok(raw.to_owned())
}

/// Parses `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Result<bool, KnobError> {
	match raw {
		"1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
		"0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
		_ => Err(KnobError::invalid("boolean", raw)),
	}
}

/// Parses a decimal integer. Floating-point input such as `1.0` is rejected.
pub fn parse_int<T>(raw: &str) -> Result<T, KnobError>
where
	T: FromStr<Err = ParseIntError>,
{
	raw.parse().map_err(|_| KnobError::invalid("integer", raw))
}

/// Parses a floating-point number.
pub fn parse_float<T>(raw: &str) -> Result<T, KnobError>
where
	T: FromStr<Err = ParseFloatError>,
{
	raw.parse().map_err(|_| KnobError::invalid("float", raw))
}
