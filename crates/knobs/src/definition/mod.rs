//! Knob declarations.
//!
//! A [`Definition`] is built once, handed to
//! [`Registry::register`](crate::Registry::register), and never mutated
//! afterwards. It declares three things:
//!
//! 1. the default value,
//! 2. the environment sources, checked in the order they were added,
//! 3. the origins allowed to overwrite the value at runtime.
//!
//! # Resolution Order
//!
//! The first source whose variable is set, non-blank, and accepted by its
//! conversion wins with [`Origin::Env`]. A rejected value does not stop the
//! search; later sources are still consulted. When no source produces a
//! value the default is used with [`Origin::Default`].

use rustc_hash::FxHashSet as HashSet;

use crate::{EnvSource, Environment, KnobError, KnobValue, Origin};


/// Declaration of a knob.
///
/// # Example
///
/// ```
/// use knobs::{Definition, Origin, parse::parse_int};
///
/// let def = Definition::new(8u32)
/// 	.name("worker_threads")
/// 	.env_with("APP_WORKERS", parse_int)
/// 	.env("LEGACY_WORKERS")
/// 	.origin(Origin::Custom("admin"));
///
/// assert_eq!(def.sources().len(), 2);
/// assert!(def.allows(Origin::Code));
/// assert!(!def.allows(Origin::Env));
/// ```
#[derive(Debug, Clone)]
pub struct Definition<T> {
	default: T,
	sources: Vec<EnvSource<T>>,
	origins: HashSet<Origin>,
	name: Option<&'static str>,
}

impl<T: KnobValue> Default for Definition<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: KnobValue> Definition<T> {
	pub fn new(default: T) -> Self {
		Self {
			default,
			sources: Vec::new(),
			origins: HashSet::default(),
			name: None,
		}
	}

	/// Label used in log events.
	pub fn name(mut self, name: &'static str) -> Self {
		self.name = Some(name);
		self
	}

	/// Appends a source converted with [`KnobValue::from_raw`].
	pub fn env(self, key: impl Into<Box<str>>) -> Self {
		self.source(EnvSource::new(key))
	}

	/// Appends a source with a transform.
	pub fn env_with<F>(self, key: impl Into<Box<str>>, transform: F) -> Self
	where
		F: Fn(&str) -> Result<T, KnobError> + Send + Sync + 'static,
	{
		self.source(EnvSource::with_transform(key, transform))
	}

	pub fn source(mut self, source: EnvSource<T>) -> Self {
		self.sources.push(source);
		self
	}

	/// Permits runtime writes from `origin`.
	pub fn origin(mut self, origin: Origin) -> Self {
		self.origins.insert(origin);
		self
	}

	pub fn origins(mut self, origins: impl IntoIterator<Item = Origin>) -> Self {
		self.origins.extend(origins);
		self
	}

	pub fn default_value(&self) -> &T {
		&self.default
	}

	pub fn sources(&self) -> &[EnvSource<T>] {
		&self.sources
	}

	pub fn label(&self) -> Option<&'static str> {
		self.name
	}

	/// Returns true if a write tagged `origin` is honored.
	///
	/// [`Origin::Code`] is always allowed.
	pub fn allows(&self, origin: Origin) -> bool {
		origin == Origin::Code || self.origins.contains(&origin)
	}

	/// Computes the initial value from `env`.
	pub fn resolve(&self, env: &dyn Environment) -> (T, Origin) {
		match self.sources.iter().find_map(|source| source.resolve(env)) {
			Some(value) => (value, Origin::Env),
			None => (self.default.clone(), Origin::Default),
		}
	}
}
