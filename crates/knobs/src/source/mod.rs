use std::fmt;
use std::sync::Arc;

use crate::{Environment, KnobError, KnobValue};


/// Converts and validates a trimmed environment value.
pub type Transform<T> = Arc<dyn Fn(&str) -> Result<T, KnobError> + Send + Sync>;

/// One environment variable feeding a knob.
///
/// Sources are listed on a [`Definition`](crate::Definition) in precedence
/// order. Without a transform the value type's [`KnobValue::from_raw`] is used.
pub struct EnvSource<T> {
	key: Box<str>,
	transform: Option<Transform<T>>,
}

impl<T> Clone for EnvSource<T> {
	fn clone(&self) -> Self {
		Self {
			key: self.key.clone(),
			transform: self.transform.clone(),
		}
	}
}

impl<T> fmt::Debug for EnvSource<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EnvSource")
			.field("key", &self.key)
			.field("transform", &self.transform.is_some())
			.finish()
	}
}

impl<T: KnobValue> EnvSource<T> {
	/// Creates a source converted with [`KnobValue::from_raw`].
	///
	/// An empty key is accepted but never resolves.
	pub fn new(key: impl Into<Box<str>>) -> Self {
		let key = key.into();
		if key.is_empty() {
			tracing::warn!(domain = "knobs", "environment source with empty key will never resolve");
		}
		Self {
			key,
			transform: None,
		}
	}

	/// Creates a source whose values pass through `transform`.
	pub fn with_transform<F>(key: impl Into<Box<str>>, transform: F) -> Self
	where
		F: Fn(&str) -> Result<T, KnobError> + Send + Sync + 'static,
	{
		Self {
			transform: Some(Arc::new(transform)),
			..Self::new(key)
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	/// Reads and converts the variable.
	///
	/// Returns `None` when the variable is unset, blank after trimming, or
	/// rejected by the conversion. Rejections are logged.
	pub fn resolve(&self, env: &dyn Environment) -> Option<T> {
		if self.key.is_empty() {
			return None;
		}
		let raw = env.lookup(&self.key)?;
		let raw = raw.trim();
		if raw.is_empty() {
			return None;
		}

		let converted = match &self.transform {
			Some(transform) => transform(raw),
			None => T::from_raw(raw),
		};
		match converted {
			Ok(value) => Some(value),
			Err(error) => {
				tracing::warn!(domain = "knobs", key = %self.key, %error, "rejected environment value");
				None
			}
		}
	}
}
