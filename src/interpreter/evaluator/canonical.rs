use crate::{interpreter::operation::registry::Registry, node::core::Node};

/// Inlines the arguments of directly nested applications named `name`.
///
/// # Returns
/// The new argument list and whether anything was inlined.
///
/// # Example
/// ```
/// use kelvin::{interpreter::evaluator::canonical::flatten, node::core::Node};
///
/// let nested = vec![Node::sym("a"), Node::app("+", vec![Node::sym("b"), Node::sym("c")])];
/// let (flat, changed) = flatten("+", nested);
/// assert!(changed);
/// assert_eq!(flat, vec![Node::sym("a"), Node::sym("b"), Node::sym("c")]);
/// ```
#[must_use]
pub fn flatten(name: &str, args: Vec<Node>) -> (Vec<Node>, bool) {
    let mut changed = false;
    let mut flat = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Node::Application { name: inner, args: children } if inner == name => {
                changed = true;
                flat.extend(children);
            },
            other => flat.push(other),
        }
    }
    (flat, changed)
}

/// Puts an argument list for `name` into canonical form.
///
/// For a commutative name, same-name children are flattened until nothing
/// changes and the result is sorted by the node order. Each flatten pass
/// strictly reduces the nesting depth of same-name children, so the loop
/// ends. Other names keep their arguments untouched.
#[must_use]
pub fn arrange(registry: &Registry, name: &str, args: Vec<Node>) -> Vec<Node> {
    if !registry.is_commutative(name) {
        return args;
    }
    let mut args = args;
    loop {
        let (flat, changed) = flatten(name, args);
        args = flat;
        if !changed {
            break;
        }
        log::trace!("flattened {name} into {} arguments", args.len());
    }
    args.sort();
    args
}

/// Builds the canonical application of `name` over `args`.
///
/// # Example
/// ```
/// use kelvin::{
///     interpreter::{environment::Environment, evaluator::canonical::construct},
///     node::core::Node,
/// };
///
/// let env = Environment::new();
/// let a = construct(env.registry(), "*", vec![Node::sym("y"), 2.into(), Node::sym("x")]);
/// assert_eq!(a.to_string(), "*(2, x, y)");
/// ```
#[must_use]
pub fn construct(registry: &Registry, name: &str, args: Vec<Node>) -> Node {
    Node::app(name, arrange(registry, name, args))
}
