use crate::{
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{core::EvalResult, utils::check_dimension},
        operation::{
            core::{Operation, Parameter},
            registry::Registry,
        },
    },
    node::core::Node,
};

fn mul(a: &Node, b: &Node) -> Node {
    Node::app("*", vec![a.clone(), b.clone()])
}

fn sub(a: Node, b: Node) -> Node {
    Node::app("-", vec![a, b])
}

/// `a[i] * b[j] - a[j] * b[i]`.
fn minor(a: &[Node], b: &[Node], i: usize, j: usize) -> Node {
    sub(mul(&a[i], &b[j]), mul(&a[j], &b[i]))
}

/// `dot(a, b)` as a sum of products, left to the engine to fold.
fn dot(a: &Node, b: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    let (a, b) = (a.as_sequence()?, b.as_sequence()?);
    check_dimension(a.len(), b.len())?;
    let products = a.iter().zip(b).map(|(x, y)| mul(x, y)).collect::<Vec<_>>();
    Ok(Some(Node::app("sum", vec![Node::Sequence(products)])))
}

/// `cross(a, b)`: the scalar `a0 b1 - a1 b0` for 2-D operands, the usual
/// vector product for 3-D operands.
fn cross(a: &Node, b: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    let (a, b) = (a.as_sequence()?, b.as_sequence()?);
    check_dimension(a.len(), b.len())?;
    match a.len() {
        2 => Ok(Some(minor(a, b, 0, 1))),
        3 => Ok(Some(Node::Sequence(vec![minor(a, b, 1, 2),
                                         minor(a, b, 2, 0),
                                         minor(a, b, 0, 1)]))),
        len => Err(RuntimeError::DimensionMismatch { left: len, right: 3 }),
    }
}

/// `magnitude(v)`: the Euclidean norm of a numeric vector, `(v . v) ^ 0.5`
/// otherwise.
fn magnitude(v: &Node, env: &mut Environment) -> EvalResult<Option<Node>> {
    if let Ok(values) = v.as_reals() {
        return Ok(Some(values.iter().map(|x| x * x).sum::<f64>().sqrt().into()));
    }
    let Some(squares) = dot(v, v, env)? else {
        return Ok(None);
    };
    Ok(Some(Node::app("^", vec![squares, 0.5.into()])))
}

/// Installs `dot`, `cross` and `magnitude`.
///
/// Results are built from `+`, `-`, `*` and `^` applications so symbolic
/// components stay symbolic while numeric ones fold.
///
/// # Example
/// ```
/// use kelvin::{interpreter::environment::Environment, node::core::Node};
///
/// let mut env = Environment::new();
/// let v = Node::Sequence(vec![3.into(), 4.into()]);
/// let e = Node::app("magnitude", vec![v]);
/// assert_eq!(env.simplify(&e).unwrap(), Node::from(5.0));
/// ```
pub fn install(registry: &mut Registry) {
    let sequences = [Parameter::Sequence, Parameter::Sequence];
    registry.register(Operation::binary("dot", sequences, dot));
    registry.register(Operation::binary("cross", sequences, cross));
    registry.register(Operation::unary("magnitude", Parameter::Sequence, magnitude));
}
