use rustc_hash::FxHashMap;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        operation::core::{Attributes, Operation, Parameter, Precedence, Syntax},
    },
    node::core::Node,
};

/// A syntax keyword: the spelling an external front end and the printer use
/// for an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    /// The operator or word as written, e.g. `+` or `and`.
    pub symbol:     String,
    /// Name of the operation the keyword stands for.
    pub operation:  String,
    /// How applications of the operation are rendered.
    pub syntax:     Syntax,
    /// Printing precedence.
    pub precedence: Precedence,
}

impl Keyword {
    /// Creates a keyword.
    pub fn new(symbol: impl Into<String>,
               operation: impl Into<String>,
               syntax: Syntax,
               precedence: Precedence)
               -> Self {
        Self { symbol: symbol.into(),
               operation: operation.into(),
               syntax,
               precedence }
    }
}

/// Stores operations by name, each name owning an overload set in
/// registration order.
///
/// Within one overload set no two operations share a signature: registering
/// a colliding signature replaces the old definition in place.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    operations: FxHashMap<String, Vec<Operation>>,
    keywords:   FxHashMap<String, Keyword>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `operation`, replacing any definition with the same name and
    /// signature; otherwise appends it to the overload set.
    pub fn register(&mut self, operation: Operation) {
        let overloads = self.operations.entry(operation.name.clone()).or_default();
        if let Some(existing) = overloads.iter_mut()
                                         .find(|op| op.signature == operation.signature)
        {
            log::debug!("redefining '{}' {:?}", operation.name, operation.signature);
            *existing = operation;
        } else {
            overloads.push(operation);
        }
    }

    /// Removes the operation with exactly this name and signature.
    ///
    /// # Returns
    /// Whether an operation was removed.
    pub fn remove(&mut self, name: &str, signature: &[Parameter]) -> bool {
        let Some(overloads) = self.operations.get_mut(name) else {
            return false;
        };
        let before = overloads.len();
        overloads.retain(|op| op.signature != signature);
        let removed = overloads.len() != before;
        if overloads.is_empty() {
            self.operations.remove(name);
        }
        removed
    }

    /// Removes every operation registered under `name`.
    ///
    /// # Returns
    /// The number of operations removed.
    pub fn remove_all(&mut self, name: &str) -> usize {
        self.operations.remove(name).map_or(0, |overloads| overloads.len())
    }

    /// Returns `true` if at least one operation is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// The overload set registered under `name`, in registration order.
    #[must_use]
    pub fn overloads(&self, name: &str) -> &[Operation] {
        self.operations.get(name).map_or(&[], Vec::as_slice)
    }

    /// Resolves the definition for a call of `name` with `args`.
    ///
    /// The first operation in registration order whose arity matches and
    /// whose every parameter accepts the corresponding argument wins. Failing
    /// that, the first operation with the universal signature wins. `None`
    /// means the application cannot be simplified further.
    ///
    /// # Example
    /// ```
    /// use kelvin::{
    ///     interpreter::operation::{
    ///         core::{Operation, Parameter},
    ///         registry::Registry,
    ///     },
    ///     node::core::Node,
    /// };
    ///
    /// let mut registry = Registry::new();
    /// registry.register(Operation::unary("f", Parameter::Number, |_, _| Ok(Some(1.into()))));
    /// registry.register(Operation::universal("f", |_, _| Ok(Some(2.into()))));
    ///
    /// let number = registry.resolve("f", &[3.into()]).unwrap();
    /// assert_eq!(number.signature, vec![Parameter::Number]);
    ///
    /// let fallback = registry.resolve("f", &[Node::sym("x")]).unwrap();
    /// assert!(fallback.is_universal());
    ///
    /// assert!(registry.resolve("g", &[]).is_none());
    /// ```
    #[must_use]
    pub fn resolve(&self, name: &str, args: &[Node]) -> Option<&Operation> {
        let candidates = self.overloads(name);
        candidates.iter()
                  .find(|op| op.accepts(args))
                  .or_else(|| candidates.iter().find(|op| op.is_universal()))
    }

    /// Returns `true` if any operation under `name` has the attribute
    /// selected by `attribute`.
    pub fn has_attribute(&self, name: &str, attribute: impl Fn(&Attributes) -> bool) -> bool {
        self.overloads(name).iter().any(|op| attribute(&op.attributes))
    }

    /// Returns `true` if `name` is commutative.
    #[must_use]
    pub fn is_commutative(&self, name: &str) -> bool {
        self.has_attribute(name, |a| a.commutative)
    }

    /// Returns `true` if `name` is forward commutative.
    #[must_use]
    pub fn is_forward_commutative(&self, name: &str) -> bool {
        self.has_attribute(name, |a| a.forward_commutative)
    }

    /// Returns `true` if arguments of `name` must not be pre-simplified.
    #[must_use]
    pub fn preserves_arguments(&self, name: &str) -> bool {
        self.has_attribute(name, |a| a.preserves_arguments)
    }

    /// Introduces a new syntax keyword.
    ///
    /// # Errors
    /// `DuplicateDefinition` if a keyword with the same symbol exists.
    pub fn define_keyword(&mut self, keyword: Keyword) -> EvalResult<()> {
        if self.keywords.contains_key(&keyword.symbol) {
            return Err(RuntimeError::DuplicateDefinition { keyword: keyword.symbol });
        }
        log::debug!("keyword '{}' -> '{}'", keyword.symbol, keyword.operation);
        self.keywords.insert(keyword.symbol.clone(), keyword);
        Ok(())
    }

    /// Looks up a keyword by its symbol.
    #[must_use]
    pub fn keyword(&self, symbol: &str) -> Option<&Keyword> {
        self.keywords.get(symbol)
    }

    /// Finds the keyword that spells the operation `name`, if any.
    #[must_use]
    pub fn keyword_for(&self, name: &str) -> Option<&Keyword> {
        self.keywords.values().find(|k| k.operation == name)
    }

    /// Printing syntax of `name`: its keyword when there is one, otherwise the
    /// first overload that declares a non-normal syntax, spelled by its name.
    #[must_use]
    pub fn syntax_of(&self, name: &str) -> Option<(&str, Syntax, Precedence)> {
        if let Some(k) = self.keyword_for(name) {
            return Some((&k.symbol, k.syntax, k.precedence));
        }
        self.overloads(name)
            .iter()
            .find(|op| op.syntax != Syntax::Normal)
            .map(|op| (op.name.as_str(), op.syntax, op.precedence))
    }
}
