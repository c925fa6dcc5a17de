use std::any::Any;
use std::sync::Arc;

use parking_lot::{Once, RwLock};

use crate::{Definition, Environment, KnobId, KnobValue, Origin};

/// Type-erased view of a [`State`] stored in a scope table.
pub(crate) trait ErasedState: Send + Sync {
	/// Copies the state into a fresh cell with its own init guard.
	fn fork(&self) -> Arc<dyn ErasedState>;

	fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

struct Cell<T> {
	current: Option<T>,
	origin: Origin,
}

/// Per-(scope, knob) value cell.
///
/// Defined knobs carry their definition and resolve lazily behind `init`.
/// Derived knobs carry only a parent id and start empty.
pub(crate) struct State<T> {
	def: Option<Arc<Definition<T>>>,
	parent: Option<KnobId>,
	cell: RwLock<Cell<T>>,
	init: Once,
}

impl<T: KnobValue> State<T> {
	pub(crate) fn defined(def: Arc<Definition<T>>) -> Self {
		Self::with_parts(Some(def), None, None, Origin::Default)
	}

	pub(crate) fn derived(parent: KnobId) -> Self {
		Self::with_parts(None, Some(parent), None, Origin::Default)
	}

	fn with_parts(
		def: Option<Arc<Definition<T>>>,
		parent: Option<KnobId>,
		current: Option<T>,
		origin: Origin,
	) -> Self {
		Self {
			def,
			parent,
			cell: RwLock::new(Cell { current, origin }),
			init: Once::new(),
		}
	}

	pub(crate) fn parent(&self) -> Option<KnobId> {
		self.parent
	}

	/// Resolves the initial value at most once.
	///
	/// Concurrent callers block until the first one finishes. Resolution is
	/// skipped when a write already populated the cell, and the resolved value
	/// never overwrites one that lands while the environment is being read.
	pub(crate) fn init(&self, id: KnobId, env: &dyn Environment) {
		let Some(def) = &self.def else {
			return;
		};
		self.init.call_once(|| {
			if self.cell.read().current.is_some() {
				return;
			}
			let (value, origin) = def.resolve(env);
			let mut cell = self.cell.write();
			if cell.current.is_none() {
				tracing::trace!(domain = "knobs", %id, name = def.label().unwrap_or_default(), %origin, "knob resolved");
				cell.current = Some(value);
				cell.origin = origin;
			}
		});
	}

	/// Returns the cell's own value and origin, ignoring any parent.
	pub(crate) fn current(&self) -> Option<(T, Origin)> {
		let cell = self.cell.read();
		cell.current.clone().map(|value| (value, cell.origin))
	}

	/// Derived knobs declare no origins, so only [`Origin::Code`] passes.
	pub(crate) fn allows(&self, origin: Origin) -> bool {
		match &self.def {
			Some(def) => def.allows(origin),
			None => origin == Origin::Code,
		}
	}

	pub(crate) fn write(&self, origin: Origin, value: T) {
		let mut cell = self.cell.write();
		cell.current = Some(value);
		cell.origin = origin;
	}
}

impl<T: KnobValue> ErasedState for State<T> {
	fn fork(&self) -> Arc<dyn ErasedState> {
		let cell = self.cell.read();
		Arc::new(Self::with_parts(
			self.def.clone(),
			self.parent,
			cell.current.clone(),
			cell.origin,
		))
	}

	fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
		self
	}
}
