use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            utils::{check_domain, check_non_negative},
        },
        operation::{
            core::{Operation, Parameter},
            registry::Registry,
        },
    },
    node::{core::Node, number::Number},
};

/// Numeric payloads of `nodes`, or `None` if any of them is symbolic.
fn numbers(nodes: &[Node]) -> Option<Vec<&Number>> {
    nodes.iter().map(Node::evaluated).collect()
}

/// Ensures a sample holds at least `min` observations.
#[allow(clippy::cast_precision_loss)]
fn check_sample(len: usize, min: usize) -> EvalResult<()> {
    check_domain(len as f64, min as f64, f64::INFINITY)
}

/// Sum of squared deviations from the mean.
///
/// # Example
/// ```
/// use kelvin::provider::stat::ssx;
///
/// assert_eq!(ssx(&[2.0, 4.0, 6.0]).unwrap(), 8.0);
/// assert!(ssx(&[]).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn ssx(values: &[f64]) -> EvalResult<f64> {
    check_sample(values.len(), 1)?;
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Ok(values.iter().map(|x| (x - mean).powi(2)).sum())
}

/// Sample and population variance, in that order.
#[allow(clippy::cast_precision_loss)]
fn variances(values: &[f64]) -> EvalResult<(f64, f64)> {
    check_sample(values.len(), 2)?;
    let s = ssx(values)?;
    let n = values.len() as f64;
    Ok((s / (n - 1.0), s / n))
}

fn labelled(sample: f64, population: f64) -> Node {
    Node::Sequence(vec![Node::pair(Node::sym("sample"), sample.into()),
                        Node::pair(Node::sym("population"), population.into())])
}

/// The extreme element of `list` under `wanted`, keeping its exact
/// representation. Symbolic lists are left alone.
fn extreme(list: &[Node], wanted: Ordering) -> EvalResult<Option<Node>> {
    let Some(values) = numbers(list) else {
        return Ok(None);
    };
    let mut best: Option<&Number> = None;
    for value in values {
        let ord = match best {
            None => wanted,
            Some(current) => value.compare(current).ok_or_else(|| {
                                 RuntimeError::InvalidArgument { details: "cannot order NaN".to_string() }
                             })?,
        };
        if ord == wanted {
            best = Some(value);
        }
    }
    best.map(|n| Some(Node::Number(n.clone())))
        .ok_or_else(|| RuntimeError::InvalidArgument { details: "extremum of an empty list".to_string() })
}

/// Middle value of a numeric list; the mean of the two middle values when
/// the length is even.
fn median(list: &[Node]) -> EvalResult<Option<Node>> {
    let Some(mut values) = numbers(list) else {
        return Ok(None);
    };
    check_sample(values.len(), 1)?;
    values.sort_by(|a, b| a.compare(b).unwrap_or(Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        return Ok(Some(Node::Number(values[mid].clone())));
    }
    Ok(Some(Node::Number(values[mid - 1].add(values[mid]).div(&Number::Integer(2))?)))
}

/// Installs `variance`, `stdev`, `median`, `min`, `max` and `ssx`.
///
/// `variance` and `stdev` evaluate to `{(sample : s), (population : p)}`.
///
/// # Example
/// ```
/// use kelvin::{interpreter::environment::Environment, node::core::Node};
///
/// let mut env = Environment::new();
/// let xs = Node::Sequence(vec![3.into(), 1.into(), 2.into()]);
/// assert_eq!(env.simplify(&Node::app("max", vec![xs.clone()])).unwrap(), Node::from(3));
/// assert_eq!(env.simplify(&Node::app("median", vec![xs])).unwrap(), Node::from(2));
/// ```
pub fn install(registry: &mut Registry) {
    let sequence = Parameter::Sequence;

    registry.register(Operation::unary("ssx", sequence, |list, _| {
                          Ok(Some(ssx(&list.as_reals()?)?.into()))
                      }));
    registry.register(Operation::unary("variance", sequence, |list, _| {
                          let (sample, population) = variances(&list.as_reals()?)?;
                          Ok(Some(labelled(sample, population)))
                      }));
    registry.register(Operation::unary("stdev", sequence, |list, _| {
                          let (sample, population) = variances(&list.as_reals()?)?;
                          check_non_negative(sample)?;
                          Ok(Some(labelled(sample.sqrt(), population.sqrt())))
                      }));
    registry.register(Operation::unary("median", sequence, |list, _| {
                          median(list.as_sequence()?)
                      }));

    for (name, wanted) in [("min", Ordering::Less), ("max", Ordering::Greater)] {
        registry.register(Operation::unary(name, sequence, move |list, _| {
                              extreme(list.as_sequence()?, wanted)
                          }));
        registry.register(Operation::universal(name, move |args, _| extreme(args, wanted)));
    }
}
