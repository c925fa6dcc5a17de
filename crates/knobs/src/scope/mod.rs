//! Resolved knob state.
//!
//! A [`Scope`] owns one state cell per knob it has touched. Scopes sharing a
//! [`Registry`] see the same definitions but never each other's values, which
//! is what lets a test (or a tenant) override knobs without leaking into the
//! rest of the process.
//!
//! # Lookup
//!
//! [`Scope::get`] creates the knob's cell on first access and resolves it from
//! the environment exactly once. A derived knob with no value of its own reads
//! through to its parent in the same scope on every call, so later writes to
//! the parent stay visible until the derived knob is written itself.

use std::collections::hash_map::Entry as MapEntry;
use std::fmt;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

use crate::registry::Entry;
use crate::state::{ErasedState, State};
use crate::{Definition, Environment, Knob, KnobId, KnobValue, Origin, ProcessEnv, Registry};


static DEFAULT_SCOPE: LazyLock<ArcSwap<Scope>> = LazyLock::new(|| ArcSwap::from_pointee(Scope::new()));

/// Returns the process-wide scope used by the free functions.
///
/// Created on first use, bound to [`Registry::global`] and [`ProcessEnv`].
#[inline]
pub fn default_scope() -> Arc<Scope> {
	DEFAULT_SCOPE.load_full()
}

/// Replaces the process-wide scope and returns the previous one.
///
/// Holders of the previous scope keep a valid handle to it; only lookups that
/// start after the swap see the replacement.
pub fn set_default_scope(scope: impl Into<Arc<Scope>>) -> Arc<Scope> {
	DEFAULT_SCOPE.swap(scope.into())
}

/// Isolated table of knob state.
pub struct Scope {
	registry: Arc<Registry>,
	env: Arc<dyn Environment>,
	states: RwLock<HashMap<KnobId, Arc<dyn ErasedState>>>,
}

impl Default for Scope {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Scope")
			.field("registry", &self.registry)
			.field("states", &self.len())
			.finish_non_exhaustive()
	}
}

impl Scope {
	/// Creates an empty scope over the global registry and process environment.
	pub fn new() -> Self {
		Self::builder().build()
	}

	pub fn builder() -> ScopeBuilder {
		ScopeBuilder::default()
	}

	pub fn registry(&self) -> &Arc<Registry> {
		&self.registry
	}

	/// Returns the knob's value, or `T::default()` for knobs this scope's
	/// registry does not know.
	pub fn get<T: KnobValue>(&self, knob: Knob<T>) -> T {
		self.lookup(knob.id())
			.map(|(value, _)| value)
			.unwrap_or_default()
	}

	/// Returns the provenance of the value [`get`](Self::get) would return.
	pub fn origin<T: KnobValue>(&self, knob: Knob<T>) -> Option<Origin> {
		self.lookup::<T>(knob.id()).map(|(_, origin)| origin)
	}

	/// Writes a value if `origin` is permitted.
	///
	/// Writes tagged [`Origin::Code`] always land. Any other origin must be
	/// declared on the knob's definition; derived knobs declare none.
	/// Disallowed writes and writes to unknown knobs are dropped without
	/// reporting back to the caller.
	pub fn set<T: KnobValue>(&self, knob: Knob<T>, origin: Origin, value: T) {
		let id = knob.id();
		let Some(state) = self.state::<T>(id) else {
			tracing::debug!(domain = "knobs", %id, "write to unknown knob ignored");
			return;
		};
		if !state.allows(origin) {
			tracing::debug!(domain = "knobs", %id, %origin, "write from undeclared origin ignored");
			return;
		}
		state.write(origin, value);
	}

	/// Drops this scope's state for `knob`. The next access starts fresh.
	pub fn remove<T>(&self, knob: Knob<T>) -> bool {
		self.states.write().remove(&knob.id()).is_some()
	}

	/// Drops all state held by this scope.
	pub fn clear(&self) {
		self.states.write().clear();
	}

	pub fn contains<T>(&self, knob: Knob<T>) -> bool {
		self.states.read().contains_key(&knob.id())
	}

	pub fn len(&self) -> usize {
		self.states.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.read().is_empty()
	}

	/// Creates a scope over the same registry and environment holding a copy
	/// of every cell. Resolved values carry over; unresolved cells stay lazy.
	pub fn fork(&self) -> Scope {
		let forked = Scope {
			registry: Arc::clone(&self.registry),
			env: Arc::clone(&self.env),
			states: RwLock::default(),
		};
		for (&id, state) in self.states.read().iter() {
			forked.insert(id, state.fork());
		}
		forked
	}

	fn insert(&self, id: KnobId, state: Arc<dyn ErasedState>) {
		self.states.write().insert(id, state);
	}

	/// Walks from `id` up the parent chain until a cell holds a value.
	fn lookup<T: KnobValue>(&self, mut id: KnobId) -> Option<(T, Origin)> {
		loop {
			let state = self.state::<T>(id)?;
			state.init(id, self.env.as_ref());
			if let Some(found) = state.current() {
				return Some(found);
			}
			id = state.parent()?;
		}
	}

	/// Returns the knob's cell, creating it from the registry entry if needed.
	///
	/// Creation happens under the table's write lock so concurrent first
	/// accesses agree on a single cell.
	fn state<T: KnobValue>(&self, id: KnobId) -> Option<Arc<State<T>>> {
		if let Some(existing) = self.states.read().get(&id) {
			return downcast(Arc::clone(existing));
		}

		let erased = match self.states.write().entry(id) {
			MapEntry::Occupied(occupied) => Arc::clone(occupied.get()),
			MapEntry::Vacant(vacant) => {
				let state: Arc<dyn ErasedState> = match self.registry.entry(id)? {
					Entry::Defined(def) => Arc::new(State::defined(def.downcast::<Definition<T>>().ok()?)),
					Entry::Derived { parent } => Arc::new(State::<T>::derived(parent)),
				};
				Arc::clone(vacant.insert(state))
			}
		};
		downcast(erased)
	}
}

fn downcast<T: KnobValue>(state: Arc<dyn ErasedState>) -> Option<Arc<State<T>>> {
	state.into_any().downcast::<State<T>>().ok()
}

/// Builder for [`Scope`].
#[derive(Default)]
pub struct ScopeBuilder {
	registry: Option<Arc<Registry>>,
	env: Option<Arc<dyn Environment>>,
}

impl ScopeBuilder {
	/// Resolves against `registry` instead of [`Registry::global`].
	pub fn registry(mut self, registry: Arc<Registry>) -> Self {
		self.registry = Some(registry);
		self
	}

	/// Reads `env` instead of [`ProcessEnv`].
	pub fn env(mut self, env: impl Environment + 'static) -> Self {
		self.env = Some(Arc::new(env));
		self
	}

	pub fn build(self) -> Scope {
		Scope {
			registry: self
				.registry
				.unwrap_or_else(|| Arc::clone(Registry::global())),
			env: self.env.unwrap_or_else(|| Arc::new(ProcessEnv)),
			states: RwLock::default(),
		}
	}
}
