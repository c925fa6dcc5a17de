use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::{KnobValue, Origin, Scope, default_scope};

/// Process-unique knob identifier.
///
/// Identifiers are handed out by a single monotonic counter shared by every
/// [`Registry`](crate::Registry) and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KnobId(pub(crate) u64);

impl KnobId {
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for KnobId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Typed handle to a registered or derived knob.
///
/// The handle holds no value. It pins the knob's value type at compile time,
/// so every read and write through it agrees on `T`.
pub struct Knob<T> {
	id: KnobId,
	_marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Knob<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Knob<T> {}

impl<T> PartialEq for Knob<T> {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl<T> Eq for Knob<T> {}

impl<T> Hash for Knob<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl<T> fmt::Debug for Knob<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Knob")
			.field(&self.id.0)
			.field(&std::any::type_name::<T>())
			.finish()
	}
}

impl<T> Knob<T> {
	pub(crate) const fn new(id: KnobId) -> Self {
		Self {
			id,
			_marker: PhantomData,
		}
	}

	pub const fn id(&self) -> KnobId {
		self.id
	}
}

impl<T: KnobValue> Knob<T> {
	/// Reads the value from the default scope.
	pub fn get(self) -> T {
		default_scope().get(self)
	}

	pub fn get_in(self, scope: &Scope) -> T {
		scope.get(self)
	}

	/// Writes the value into the default scope.
	pub fn set(self, origin: Origin, value: T) {
		default_scope().set(self, origin, value);
	}

	pub fn set_in(self, scope: &Scope, origin: Origin, value: T) {
		scope.set(self, origin, value);
	}

	pub fn origin(self) -> Option<Origin> {
		default_scope().origin(self)
	}

	pub fn origin_in(self, scope: &Scope) -> Option<Origin> {
		scope.origin(self)
	}
}
