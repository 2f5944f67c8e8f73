use crate::{
    interpreter::{
        environment::Environment,
        evaluator::{
            core::EvalResult,
            utils::{check_dimension, check_index},
        },
        operation::{
            core::{Operation, Parameter},
            registry::Registry,
        },
    },
    node::core::Node,
    util::num::usize_to_i64_checked,
};

/// `get(list, i)`.
fn get(list: &Node, index: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    let elements = list.as_sequence()?;
    let position = check_index(index.as_integer()?, elements.len())?;
    Ok(Some(elements[position].clone()))
}

/// `get(pair, i)` for `i` in `{0, 1}`.
fn get_half(pair: &Node, index: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    let (first, second) = pair.as_pair()?;
    let half = match check_index(index.as_integer()?, 2)? {
        0 => first,
        _ => second,
    };
    Ok(Some(half.clone()))
}

/// `zip(xs, ys)` pairs up elements of two sequences of equal length.
fn zip(xs: &Node, ys: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    let (xs, ys) = (xs.as_sequence()?, ys.as_sequence()?);
    check_dimension(xs.len(), ys.len())?;
    let pairs = xs.iter()
                  .zip(ys)
                  .map(|(x, y)| Node::pair(x.clone(), y.clone()))
                  .collect::<Vec<_>>();
    Ok(Some(Node::Sequence(pairs)))
}

/// `first(list)`.
fn first(list: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    let elements = list.as_sequence()?;
    let position = check_index(0, elements.len())?;
    Ok(Some(elements[position].clone()))
}

/// `rest(list)`: every element but the first.
fn rest(list: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    let elements = list.as_sequence()?;
    check_index(0, elements.len())?;
    Ok(Some(Node::Sequence(elements[1..].to_vec())))
}

/// Installs the list and pair operations: `list`, `tuple`, `get`, `size`,
/// `append`, `contains`, `reverse`, `zip`, `first` and `rest`.
///
/// # Example
/// ```
/// use kelvin::{interpreter::environment::Environment, node::core::Node};
///
/// let mut env = Environment::new();
/// let xs = Node::app("list", vec![1.into(), 2.into(), 3.into()]);
/// let e = Node::app("get", vec![Node::app("reverse", vec![xs]), 0.into()]);
/// assert_eq!(env.simplify(&e).unwrap(), Node::from(3));
/// ```
pub fn install(registry: &mut Registry) {
    let sequence = Parameter::Sequence;

    registry.register(Operation::universal("list", |args, _| Ok(Some(Node::Sequence(args.to_vec())))));
    registry.register(Operation::binary("tuple", [Parameter::Any, Parameter::Any], |a, b, _| {
                          Ok(Some(Node::pair(a.clone(), b.clone())))
                      }));

    registry.register(Operation::binary("get", [sequence, Parameter::Integer], get));
    registry.register(Operation::binary("get", [Parameter::Pair, Parameter::Integer], get_half));

    registry.register(Operation::unary("size", sequence, |list, _| {
                          Ok(Some(usize_to_i64_checked(list.as_sequence()?.len())?.into()))
                      }));
    registry.register(Operation::binary("append", [sequence, Parameter::Any], |list, x, _| {
                          let mut elements = list.as_sequence()?.to_vec();
                          elements.push(x.clone());
                          Ok(Some(Node::Sequence(elements)))
                      }));
    registry.register(Operation::binary("contains", [sequence, Parameter::Any], |list, x, _| {
                          Ok(Some(Node::Boolean(list.as_sequence()?.contains(x))))
                      }));
    registry.register(Operation::unary("reverse", sequence, |list, _| {
                          Ok(Some(Node::Sequence(list.as_sequence()?.iter().rev().cloned().collect())))
                      }));
    registry.register(Operation::binary("zip", [sequence, sequence], zip));
    registry.register(Operation::unary("first", sequence, first));
    registry.register(Operation::unary("rest", sequence, rest));
}
