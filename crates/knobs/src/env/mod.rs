//! Environment lookups.
//!
//! Resolution never touches `std::env` directly; it goes through an
//! [`Environment`] owned by the [`Scope`](crate::Scope). Production scopes use
//! [`ProcessEnv`]. Tests and sandboxes hand a [`MapEnv`] (or a closure) to
//! [`ScopeBuilder::env`](crate::ScopeBuilder::env) so they never mutate the
//! process environment.

use rustc_hash::FxHashMap as HashMap;

#[cfg(test)]
mod tests;

/// Key to string lookup consulted during lazy resolution.
pub trait Environment: Send + Sync {
	/// Returns the raw value of `key`, or `None` when unset.
	fn lookup(&self, key: &str) -> Option<String>;
}

impl<F> Environment for F
where
	F: Fn(&str) -> Option<String> + Send + Sync,
{
	fn lookup(&self, key: &str) -> Option<String> {
		self(key)
	}
}

/// The process environment, read on every lookup.
///
/// Keys that the platform cannot represent (empty, or containing `=` or NUL)
/// and values that are not valid UTF-8 are reported as unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
	fn lookup(&self, key: &str) -> Option<String> {
		if key.is_empty() || key.contains(['=', '\0']) {
			return None;
		}
		std::env::var_os(key)?.into_string().ok()
	}
}

/// In-memory environment.
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
	vars: HashMap<String, String>,
}

impl MapEnv {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(key, value);
		self
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.vars.insert(key.into(), value.into());
	}

	pub fn remove(&mut self, key: &str) -> Option<String> {
		self.vars.remove(key)
	}
}

impl Environment for MapEnv {
	fn lookup(&self, key: &str) -> Option<String> {
		self.vars.get(key).cloned()
	}
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}
}
