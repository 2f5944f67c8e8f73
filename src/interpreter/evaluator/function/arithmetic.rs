use crate::{
    interpreter::{
        environment::Environment,
        evaluator::core::EvalResult,
        operation::{
            core::{Operation, Parameter},
            registry::Registry,
        },
    },
    node::{core::Node, number::Number},
};

const NUMBERS: [Parameter; 2] = [Parameter::Number, Parameter::Number];
const ANY: [Parameter; 2] = [Parameter::Any, Parameter::Any];

/// Lifts an exact numeric operation to a binary handler.
fn numeric(op: impl Fn(&Number, &Number) -> EvalResult<Number> + 'static)
           -> impl Fn(&Node, &Node, &mut Environment) -> EvalResult<Option<Node>> + 'static {
    move |a, b, _| Ok(Some(Node::Number(op(a.as_number()?, b.as_number()?)?)))
}

fn is_zero(node: &Node) -> bool {
    node.evaluated().is_some_and(Number::is_zero)
}

fn is_one(node: &Node) -> bool {
    node.evaluated().is_some_and(Number::is_one)
}

/// Identity rules of `+`: `x + 0 = x`.
#[allow(clippy::unnecessary_wraps)]
fn add_identity(a: &Node, b: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    Ok(if is_zero(a) {
        Some(b.clone())
    } else if is_zero(b) {
        Some(a.clone())
    } else {
        None
    })
}

/// Identity rules of `*`: `x * 1 = x` and `x * 0 = 0`.
#[allow(clippy::unnecessary_wraps)]
fn mul_identity(a: &Node, b: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    Ok(if is_zero(a) {
        Some(a.clone())
    } else if is_zero(b) {
        Some(b.clone())
    } else if is_one(a) {
        Some(b.clone())
    } else if is_one(b) {
        Some(a.clone())
    } else {
        None
    })
}

/// Identity rules of `-`: `x - x = 0`, `x - 0 = x` and `0 - x = -x`.
#[allow(clippy::unnecessary_wraps)]
fn sub_identity(a: &Node, b: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    Ok(if a == b {
        Some(0.into())
    } else if is_zero(b) {
        Some(a.clone())
    } else if is_zero(a) {
        Some(Node::app("negate", vec![b.clone()]))
    } else {
        None
    })
}

/// Identity rules of `/`: `x / 1 = x`.
#[allow(clippy::unnecessary_wraps)]
fn div_identity(a: &Node, b: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    Ok(is_one(b).then(|| a.clone()))
}

/// Identity rules of `^`: `x ^ 1 = x` and `x ^ 0 = 1`.
#[allow(clippy::unnecessary_wraps)]
fn pow_identity(a: &Node, b: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    Ok(if is_one(b) {
        Some(a.clone())
    } else if is_zero(b) {
        Some(1.into())
    } else {
        None
    })
}

/// `negate(negate(x)) = x`.
#[allow(clippy::unnecessary_wraps)]
fn double_negation(a: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    Ok(match a {
        Node::Application { name, args } if name == "negate" && args.len() == 1 => {
            Some(args[0].clone())
        },
        _ => None,
    })
}

/// Installs `+`, `*`, `-`, `/`, `%`, `^`, `negate` and `!`.
///
/// Folding rules over two numbers are registered before the symbolic
/// identity rules of the same name, so they win first-match resolution.
///
/// # Example
/// ```
/// use kelvin::{interpreter::environment::Environment, node::core::Node};
///
/// let mut env = Environment::new();
/// let e = Node::app("*", vec![Node::sym("x"), 1.into()]);
/// assert_eq!(env.simplify(&e).unwrap(), Node::sym("x"));
///
/// let f = Node::app("!", vec![20.into()]);
/// assert_eq!(env.simplify(&f).unwrap().to_string(), "2432902008176640000");
/// ```
pub fn install(registry: &mut Registry) {
    registry.register(Operation::binary("+", NUMBERS, numeric(|a, b| Ok(a.add(b)))).commutative());
    registry.register(Operation::binary("+", ANY, add_identity).commutative());

    registry.register(Operation::binary("*", NUMBERS, numeric(|a, b| Ok(a.mul(b)))).commutative());
    registry.register(Operation::binary("*", ANY, mul_identity).commutative());

    registry.register(Operation::binary("-", NUMBERS, numeric(|a, b| Ok(a.sub(b))))
                               .forward_commutative());
    registry.register(Operation::binary("-", ANY, sub_identity).forward_commutative());

    registry.register(Operation::binary("/", NUMBERS, numeric(Number::div)));
    registry.register(Operation::binary("/", ANY, div_identity));

    registry.register(Operation::binary("%", NUMBERS, numeric(Number::rem)));

    registry.register(Operation::binary("^", NUMBERS, numeric(Number::pow)));
    registry.register(Operation::binary("^", ANY, pow_identity));

    registry.register(Operation::unary("negate", Parameter::Number, |a, _| {
                          Ok(Some(Node::Number(a.as_number()?.neg())))
                      }));
    registry.register(Operation::unary("negate", Parameter::Application, double_negation));

    registry.register(Operation::unary("!", Parameter::Number, |a, _| {
                          Ok(Some(Node::Number(a.as_number()?.factorial()?)))
                      }));
}
