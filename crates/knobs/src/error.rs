/// Reason an environment value was not accepted.
///
/// Returned by transforms and [`KnobValue::from_raw`](crate::KnobValue::from_raw).
/// Resolution logs the error and moves on to the next source; it never reaches
/// callers of [`get`](crate::get).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KnobError {
	/// The raw string does not parse as the expected type.
	#[error("invalid {expected}: '{value}'")]
	Invalid {
		/// Human-readable name of the expected type.
		expected: &'static str,
		/// The trimmed raw value.
		value: String,
	},

	/// A custom transform declined the value.
	#[error("{0}")]
	Rejected(String),

	/// The value type has no conversion from environment strings.
	#[error("no conversion from environment strings to {type_name}")]
	Unsupported { type_name: &'static str },
}

impl KnobError {
	pub fn invalid(expected: &'static str, value: &str) -> Self {
		Self::Invalid {
			expected,
			value: value.to_owned(),
		}
	}

	pub fn rejected(reason: impl Into<String>) -> Self {
		Self::Rejected(reason.into())
	}
}
