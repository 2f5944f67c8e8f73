use rand::Rng;

use crate::{
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::EvalResult,
            utils::{check_domain, check_index, check_range},
        },
        operation::{
            core::{Operation, Parameter},
            registry::Registry,
        },
    },
    node::core::Node,
    util::num::usize_to_i64_checked,
};

/// `define(f(x, ...), template)` installs a user operation and evaluates to
/// the symbol `f`.
fn define_operation(head: &Node, template: &Node, env: &mut Environment) -> EvalResult<Option<Node>> {
    let (name, params) = head.as_application()?;
    env.define_operation(name, params, template)?;
    Ok(Some(Node::sym(name)))
}

/// `define(x, value)` binds `x` and evaluates to the bound value.
fn define_variable(name: &Node, value: &Node, env: &mut Environment) -> EvalResult<Option<Node>> {
    env.define_variable(name.as_symbol()?, value).map(Some)
}

/// `del(x)` removes the binding of `x` together with every operation named
/// `x`, and evaluates to the now unbound symbol.
fn delete(name: &Node, env: &mut Environment) -> EvalResult<Option<Node>> {
    let name = name.as_symbol()?;
    let removed = env.registry_mut().remove_all(name);
    if env.delete(name).is_err() && removed == 0 {
        return Err(RuntimeError::UndefinedVariable { name: name.to_string() });
    }
    log::debug!("deleted '{name}' ({removed} operations)");
    Ok(Some(Node::sym(name)))
}

/// `if(condition, then, else)` selects a branch once the condition
/// simplifies to a boolean. Branches are never simplified eagerly.
fn branch(args: &[Node], env: &mut Environment) -> EvalResult<Option<Node>> {
    Ok(match env.simplify(&args[0])? {
        Node::Boolean(true) => Some(args[1].clone()),
        Node::Boolean(false) => Some(args[2].clone()),
        _ => None,
    })
}

/// `repeat(node, n)` is a sequence of `n` copies of `node`.
fn repeat(node: &Node, times: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    let times = times.as_integer()?;
    let count = usize::try_from(times).map_err(|_| RuntimeError::InvalidArgument { details: format!("cannot repeat {times} times") })?;
    Ok(Some(Node::Sequence(vec![node.clone(); count])))
}

/// `random(lb, ub)` draws uniformly from `[lb, ub]`.
fn random_between(lb: &Node, ub: &Node, _: &mut Environment) -> EvalResult<Option<Node>> {
    let (lb, ub) = (lb.as_real()?, ub.as_real()?);
    check_domain(lb, f64::MIN, f64::MAX)?;
    check_domain(ub, f64::MIN, f64::MAX)?;
    check_range(lb, ub)?;
    Ok(Some(rand::rng().random_range(lb..=ub).into()))
}

/// `set(xs, i, value)` replaces element `i` of the sequence bound to `xs`
/// and evaluates to the updated sequence.
fn set_element(name: &Node,
               index: &Node,
               value: &Node,
               env: &mut Environment)
               -> EvalResult<Option<Node>> {
    let name = name.as_symbol()?;
    let index = env.simplify(index)?.as_integer()?;
    let value = env.simplify(value)?;

    let bound = env.get(name)
                   .cloned()
                   .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string() })?;
    let mut elements = env.simplify(&bound)?.as_sequence()?.to_vec();
    let position = check_index(index, elements.len())?;
    elements[position] = value;

    let updated = Node::Sequence(elements);
    env.set(name, updated.clone());
    Ok(Some(updated))
}

/// Sum of `terms` as an application of `+`.
fn sum(terms: &[Node]) -> Node {
    match terms {
        [] => 0.into(),
        [single] => single.clone(),
        _ => Node::app("+", terms.to_vec()),
    }
}

/// Arithmetic mean of `terms` as `+(terms) / n`.
fn mean(terms: &[Node]) -> EvalResult<Node> {
    if terms.is_empty() {
        return Err(RuntimeError::InvalidArgument { details: "mean of an empty list".to_string() });
    }
    let count = usize_to_i64_checked(terms.len())?;
    Ok(Node::app("/", vec![sum(terms), count.into()]))
}

/// Installs `define`, `del`, `if`, `exec`, `repeat`, `random`, `set`, `sum`,
/// `mean` and `avg`.
///
/// # Example
/// ```
/// use kelvin::{interpreter::environment::Environment, node::core::Node};
///
/// let mut env = Environment::new();
/// let e = Node::app("exec", vec![
///     Node::app("define", vec![Node::sym("a"), 4.into()]),
///     Node::app("mean", vec![Node::Sequence(vec![Node::sym("a"), 2.into()])]),
/// ]);
/// assert_eq!(env.simplify(&e).unwrap(), Node::Sequence(vec![4.into(), 3.into()]));
/// ```
pub fn install(registry: &mut Registry) {
    let define = [Parameter::Application, Parameter::Any];
    registry.register(Operation::binary("define", define, define_operation).preserving_arguments());
    let define = [Parameter::Symbol, Parameter::Any];
    registry.register(Operation::binary("define", define, define_variable).preserving_arguments());
    registry.register(Operation::universal("define", |args, _| {
                          Err(RuntimeError::InvalidDefinition { details: format!("cannot define {} argument(s)", args.len()) })
                      }).preserving_arguments());

    registry.register(Operation::unary("del", Parameter::Symbol, delete).preserving_arguments());

    registry.register(Operation::new("if", vec![Parameter::Any; 3], branch).preserving_arguments());

    registry.register(Operation::universal("exec", |args, _| Ok(Some(Node::Sequence(args.to_vec())))));

    registry.register(Operation::binary("repeat", [Parameter::Any, Parameter::Integer], repeat));

    registry.register(Operation::nullary("random", |_| Ok(Some(rand::random::<f64>().into()))));
    registry.register(Operation::binary("random",
                                        [Parameter::Number, Parameter::Number],
                                        random_between));

    let set = [Parameter::Symbol, Parameter::Any, Parameter::Any];
    registry.register(Operation::ternary("set", set, set_element).preserving_arguments());

    registry.register(Operation::unary("sum", Parameter::Sequence, |list, _| {
                          Ok(Some(sum(list.as_sequence()?)))
                      }));
    registry.register(Operation::universal("sum", |args, _| Ok(Some(sum(args)))));

    for name in ["mean", "avg"] {
        registry.register(Operation::unary(name, Parameter::Sequence, |list, _| {
                              mean(list.as_sequence()?).map(Some)
                          }));
        registry.register(Operation::universal(name, |args, _| mean(args).map(Some)));
    }
}
