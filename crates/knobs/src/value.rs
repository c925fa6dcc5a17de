use std::path::PathBuf;

use crate::KnobError;
use crate::parse::{parse_bool, parse_float, parse_int};

/// Types a knob can hold.
///
/// `Default` supplies the value returned for unknown knobs. [`from_raw`]
/// converts a trimmed environment value when the source carries no transform;
/// the provided implementation rejects every input, so custom types either
/// override it or attach a transform to each source.
///
/// [`from_raw`]: KnobValue::from_raw
pub trait KnobValue: Clone + Default + Send + Sync + 'static {
	/// Converts a trimmed, non-empty environment value.
	fn from_raw(raw: &str) -> Result<Self, KnobError> {
		let _ = raw;
		Err(KnobError::Unsupported {
			type_name: std::any::type_name::<Self>(),
		})
	}
}

impl KnobValue for String {
	fn from_raw(raw: &str) -> Result<Self, KnobError> {
		Ok(raw.to_owned())
	}
}

impl KnobValue for bool {
	fn from_raw(raw: &str) -> Result<Self, KnobError> {
		parse_bool(raw)
	}
}

impl KnobValue for PathBuf {
	fn from_raw(raw: &str) -> Result<Self, KnobError> {
		Ok(PathBuf::from(raw))
	}
}

impl<T: KnobValue> KnobValue for Option<T> {
	fn from_raw(raw: &str) -> Result<Self, KnobError> {
		T::from_raw(raw).map(Some)
	}
}

macro_rules! knob_value_via {
	($parse:ident: $($ty:ty),+ $(,)?) => {
		$(
			impl KnobValue for $ty {
				fn from_raw(raw: &str) -> Result<Self, KnobError> {
					$parse(raw)
				}
			}
		)+
	};
}

knob_value_via!(parse_int: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
knob_value_via!(parse_float: f32, f64);
