use rustc_hash::FxHashMap;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::{EvalResult, DEFAULT_MAX_DEPTH}, function},
        operation::{core::Operation, registry::Registry},
    },
    node::core::Node,
    provider,
};

/// Variable bindings and operation definitions, saved and restored as one
/// unit.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Variable name to bound node.
    pub variables: FxHashMap<String, Node>,
    /// Operation definitions.
    pub registry:  Registry,
}

/// Stores the evaluation environment.
///
/// This struct holds the interpreter state: the current scope, the stack of
/// saved scopes used for transactional execution, and the built-in-only base
/// scope. It is owned by the driver and passed by reference into every
/// engine call; nothing in the crate is a process-wide singleton.
///
/// ## Lifecycle
///
/// `save()` pushes a copy of the current scope. `restore()` pops that copy
/// back, discarding everything defined since. `commit()` drops the marker
/// and keeps the current state. `restore_to_base()` resets the current scope
/// to the built-ins without touching the stack.
///
/// ## Example
/// ```
/// use kelvin::{
///     interpreter::{environment::Environment, operation::core::{Operation, Parameter}},
///     node::core::Node,
/// };
///
/// let mut env = Environment::new();
/// env.save();
/// env.register(Operation::unary("triple", Parameter::Any, |x, _| {
///     Ok(Some(Node::app("*", vec![3.into(), x.clone()])))
/// }));
/// assert!(env.registry().contains("triple"));
///
/// env.restore();
/// assert!(!env.registry().contains("triple"));
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    current:             Scope,
    snapshots:           Vec<Scope>,
    base:                Scope,
    pub(crate) depth:    usize,
    max_depth:           usize,
    fresh:               u64,
}

#[allow(clippy::new_without_default)]
impl Environment {
    /// Creates an environment holding the built-in operations and every
    /// stock operation provider (lists, statistics, vectors).
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Registry::new();
        function::core::install(&mut registry);
        provider::list::install(&mut registry);
        provider::stat::install(&mut registry);
        provider::vector::install(&mut registry);
        Self::from_registry(registry)
    }

    /// Creates an environment whose base scope is exactly `registry`.
    #[must_use]
    pub fn from_registry(registry: Registry) -> Self {
        let base = Scope { variables: FxHashMap::default(),
                           registry };
        Self { current:   base.clone(),
               snapshots: Vec::new(),
               base,
               depth:     0,
               max_depth: DEFAULT_MAX_DEPTH,
               fresh:     0, }
    }

    /// Sets the maximum nesting depth of `simplify`.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The maximum nesting depth of `simplify`.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Changes the maximum nesting depth of `simplify`.
    pub const fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// The current operation registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.current.registry
    }

    /// Mutable access to the current operation registry.
    pub const fn registry_mut(&mut self) -> &mut Registry {
        &mut self.current.registry
    }

    /// Registers an operation in the current scope.
    pub fn register(&mut self, operation: Operation) {
        self.current.registry.register(operation);
    }

    /// Looks up a variable binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.current.variables.get(name)
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: Node) {
        let name = name.into();
        log::debug!("bind {name} = {value}");
        self.current.variables.insert(name, value);
    }

    /// Removes the binding of `name`.
    ///
    /// # Errors
    /// `UndefinedVariable` if `name` is not bound.
    pub fn delete(&mut self, name: &str) -> EvalResult<Node> {
        self.current
            .variables
            .remove(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string() })
    }

    /// Pushes a snapshot of the current scope.
    pub fn save(&mut self) {
        self.snapshots.push(self.current.clone());
        log::debug!("scope saved (depth {})", self.snapshots.len());
    }

    /// Pops the most recent snapshot and makes it current, discarding every
    /// definition made since the matching `save()`.
    ///
    /// # Returns
    /// `false` if there was no snapshot to restore.
    pub fn restore(&mut self) -> bool {
        match self.snapshots.pop() {
            Some(scope) => {
                self.current = scope;
                log::debug!("scope restored (depth {})", self.snapshots.len());
                true
            },
            None => {
                log::warn!("restore called without a saved scope");
                false
            },
        }
    }

    /// Drops the most recent snapshot, keeping the current state.
    ///
    /// # Returns
    /// `false` if there was no snapshot to drop.
    pub fn commit(&mut self) -> bool {
        let committed = self.snapshots.pop().is_some();
        log::debug!("scope committed (depth {})", self.snapshots.len());
        committed
    }

    /// Resets the current scope to the built-in-only base scope. Saved
    /// snapshots are left untouched.
    pub fn restore_to_base(&mut self) {
        self.current = self.base.clone();
        log::debug!("scope reset to base");
    }

    /// Number of snapshots currently saved.
    #[must_use]
    pub const fn saved(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns a counter value never handed out before by this environment.
    /// Survives `restore`, so identifiers built from it never collide.
    pub(crate) const fn fresh(&mut self) -> u64 {
        self.fresh += 1;
        self.fresh
    }
}
