use std::cmp::Ordering;

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

/// Builds an ordering handler that accepts the numeric ordering when `test`
/// says so. Comparisons involving `NaN` are left unsimplified.
fn ordering(test: fn(Ordering) -> bool)
            -> impl Fn(&Node, &Node, &mut Environment) -> EvalResult<Option<Node>> + 'static {
    move |a, b, _| {
        let ord = a.as_number()?.compare(b.as_number()?);
        Ok(ord.map(|ord| Node::Boolean(test(ord))))
    }
}

/// Decides whether two simplified operands are equal.
///
/// Structurally equal operands are equal. Numbers compare by value, so `2`
/// equals `2.0`. Operands without symbols or applications compare
/// structurally. Anything else is still open and yields `None`.
///
/// # Example
/// ```
/// use kelvin::{interpreter::evaluator::function::comparison::decide_equality, node::core::Node};
///
/// assert_eq!(decide_equality(&Node::from(2), &Node::from(2.0)), Some(true));
/// assert_eq!(decide_equality(&Node::sym("x"), &Node::sym("x")), Some(true));
/// assert_eq!(decide_equality(&Node::sym("x"), &Node::from(1)), None);
/// ```
#[must_use]
pub fn decide_equality(a: &Node, b: &Node) -> Option<bool> {
    if a == b {
        return Some(true);
    }
    if let (Some(x), Some(y)) = (a.evaluated(), b.evaluated()) {
        return x.compare(y).map(|ord| ord == Ordering::Equal);
    }
    (a.is_ground() && b.is_ground()).then_some(false)
}

/// Installs `<`, `>`, `<=`, `>=`, `==` and `!=`.
pub fn install(registry: &mut Registry) {
    let numbers = [Parameter::Number, Parameter::Number];
    registry.register(Operation::binary("<", numbers, ordering(Ordering::is_lt)));
    registry.register(Operation::binary(">", numbers, ordering(Ordering::is_gt)));
    registry.register(Operation::binary("<=", numbers, ordering(Ordering::is_le)));
    registry.register(Operation::binary(">=", numbers, ordering(Ordering::is_ge)));

    let any = [Parameter::Any, Parameter::Any];
    registry.register(Operation::binary("==", any, |a, b, _| {
                          Ok(decide_equality(a, b).map(Node::Boolean))
                      }));
    registry.register(Operation::binary("!=", any, |a, b, _| {
                          Ok(decide_equality(a, b).map(|eq| Node::Boolean(!eq)))
                      }));
}
