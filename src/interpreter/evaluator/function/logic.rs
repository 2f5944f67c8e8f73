use crate::{
    interpreter::{
        environment::Environment,
        evaluator::core::EvalResult,
        operation::{
            core::{Operation, Parameter},
            registry::Registry,
        },
    },
    node::core::Node,
};

const BOOLEANS: [Parameter; 2] = [Parameter::Boolean, Parameter::Boolean];
const ANY: [Parameter; 2] = [Parameter::Any, Parameter::Any];

/// Short-circuits a connective with one boolean operand.
///
/// `absorbing` is the value that decides the result on its own (`false` for
/// `and`, `true` for `or`); the other value is the identity and yields the
/// remaining operand.
fn short_circuit(absorbing: bool, a: &Node, b: &Node) -> Option<Node> {
    match (a, b) {
        (Node::Boolean(v), _) | (_, Node::Boolean(v)) if *v == absorbing => {
            Some(Node::Boolean(absorbing))
        },
        (Node::Boolean(_), other) | (other, Node::Boolean(_)) => Some(other.clone()),
        _ => None,
    }
}

#[allow(clippy::unnecessary_wraps)]
fn xor_identity(a: &Node, b: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    Ok(match (a, b) {
        (Node::Boolean(false), other) | (other, Node::Boolean(false)) => Some(other.clone()),
        (Node::Boolean(true), other) | (other, Node::Boolean(true)) => {
            Some(Node::app("not", vec![other.clone()]))
        },
        _ => None,
    })
}

/// Installs `and`, `or`, `xor` and `not`.
///
/// # Example
/// ```
/// use kelvin::{interpreter::environment::Environment, node::core::Node};
///
/// let mut env = Environment::new();
/// let e = Node::app("and", vec![Node::sym("p"), true.into()]);
/// assert_eq!(env.simplify(&e).unwrap(), Node::sym("p"));
///
/// let f = Node::app("or", vec![Node::sym("p"), true.into()]);
/// assert_eq!(env.simplify(&f).unwrap(), Node::Boolean(true));
/// ```
pub fn install(registry: &mut Registry) {
    registry.register(Operation::binary("and", BOOLEANS, |a, b, _| {
                          Ok(Some(Node::Boolean(a.as_bool()? && b.as_bool()?)))
                      }).commutative());
    registry.register(Operation::binary("and", ANY, |a, b, _| Ok(short_circuit(false, a, b)))
                               .commutative());

    registry.register(Operation::binary("or", BOOLEANS, |a, b, _| {
                          Ok(Some(Node::Boolean(a.as_bool()? || b.as_bool()?)))
                      }).commutative());
    registry.register(Operation::binary("or", ANY, |a, b, _| Ok(short_circuit(true, a, b)))
                               .commutative());

    registry.register(Operation::binary("xor", BOOLEANS, |a, b, _| {
                          Ok(Some(Node::Boolean(a.as_bool()? ^ b.as_bool()?)))
                      }));
    registry.register(Operation::binary("xor", ANY, xor_identity));

    registry.register(Operation::unary("not", Parameter::Boolean, |a, _| {
                          Ok(Some(Node::Boolean(!a.as_bool()?)))
                      }));
    registry.register(Operation::unary("not", Parameter::Application, |a, _| {
                          Ok(match a {
                              Node::Application { name, args } if name == "not" && args.len() == 1 => {
                                  Some(args[0].clone())
                              },
                              _ => None,
                          })
                      }));
}
