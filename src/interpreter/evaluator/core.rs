use crate::{
    error::RuntimeError,
    interpreter::{environment::Environment, evaluator::canonical::arrange},
    node::core::Node,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Prefix that defers one simplification pass of an application.
pub const DEFER_MARKER: char = '$';

/// Default nesting limit of `simplify`.
pub const DEFAULT_MAX_DEPTH: usize = 256;

impl Environment {
    /// Rewrites `node` into its simplest canonical form.
    ///
    /// Numbers and booleans are returned as is. A bound symbol is replaced by
    /// its (simplified) value; an unbound one stays symbolic. Pairs and
    /// sequences are simplified element-wise. Applications are dispatched
    /// through the registry:
    ///
    /// 1. A name carrying the defer marker loses the marker and is returned
    ///    without further work on this pass.
    /// 2. Arguments are simplified unless the name preserves them.
    /// 3. The canonical node is built (flattened and ordered when the name is
    ///    commutative) and its arguments are handed to the resolved handler.
    ///    A returned node is simplified in turn.
    /// 4. With no result, a commutative application of more than two
    ///    arguments is regrouped pairwise and kept if that lowers its
    ///    complexity.
    /// 5. Otherwise the canonical node is returned. Never an error.
    ///
    /// # Errors
    /// Whatever a handler raises, and `RecursionLimit` once nesting exceeds
    /// the configured maximum depth.
    ///
    /// # Example
    /// ```
    /// use kelvin::{interpreter::environment::Environment, node::core::Node};
    ///
    /// let mut env = Environment::new();
    /// let sum = Node::app("+", vec![2.into(), 3.into()]);
    /// assert_eq!(env.simplify(&sum).unwrap(), Node::from(5));
    ///
    /// let symbolic = Node::app("+", vec![Node::sym("b"), Node::sym("a")]);
    /// assert_eq!(env.simplify(&symbolic).unwrap().to_string(), "+(a, b)");
    /// ```
    pub fn simplify(&mut self, node: &Node) -> EvalResult<Node> {
        if self.depth >= self.max_depth() {
            return Err(RuntimeError::RecursionLimit { depth: self.depth });
        }
        self.depth += 1;
        let result = self.simplify_node(node);
        self.depth -= 1;
        result
    }

    /// Simplifies every node of `nodes`, in order.
    pub fn simplify_all(&mut self, nodes: &[Node]) -> EvalResult<Vec<Node>> {
        nodes.iter().map(|node| self.simplify(node)).collect()
    }

    fn simplify_node(&mut self, node: &Node) -> EvalResult<Node> {
        match node {
            Node::Number(_) | Node::Boolean(_) => Ok(node.clone()),
            Node::Symbol(name) => match self.get(name).cloned() {
                Some(value) => self.simplify(&value),
                None => Ok(node.clone()),
            },
            Node::Pair(first, second) => {
                Ok(Node::pair(self.simplify(first)?, self.simplify(second)?))
            },
            Node::Sequence(elements) => Ok(Node::Sequence(self.simplify_all(elements)?)),
            Node::Application { name, args } => self.simplify_application(name, args),
        }
    }

    fn simplify_application(&mut self, name: &str, args: &[Node]) -> EvalResult<Node> {
        if let Some(unmarked) = name.strip_prefix(DEFER_MARKER) {
            return Ok(Node::app(unmarked, args.to_vec()));
        }

        let args = if self.registry().preserves_arguments(name) {
            args.to_vec()
        } else {
            self.simplify_all(args)?
        };

        let args = arrange(self.registry(), name, args);
        if let Some(result) = self.invoke(name, &args)? {
            return self.simplify(&result);
        }

        if args.len() > 2 && self.registry().is_commutative(name) {
            let regrouped = self.regroup(name, &args)?;
            let node = Node::app(name, args);
            return Ok(if regrouped.complexity() < node.complexity() { regrouped } else { node });
        }

        Ok(Node::app(name, args))
    }

    /// Resolves `name` against `args` and runs the winning handler.
    ///
    /// # Returns
    /// `None` when nothing is registered for the call or the handler
    /// declined the concrete values.
    pub fn invoke(&mut self, name: &str, args: &[Node]) -> EvalResult<Option<Node>> {
        let Some(operation) = self.registry().resolve(name, args) else {
            return Ok(None);
        };
        log::debug!("dispatch {name} {:?}", operation.signature);
        let handler = operation.handler();
        handler(args, self)
    }
}
