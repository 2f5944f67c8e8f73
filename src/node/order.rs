use std::cmp::Ordering;

use crate::node::{core::Node, number::Number};

impl Node {
    /// Position of the variant in the canonical order.
    const fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Boolean(_) => 1,
            Self::Symbol(_) => 2,
            Self::Pair(..) => 3,
            Self::Sequence(_) => 4,
            Self::Application { .. } => 5,
        }
    }
}

/// Numbers order by value; ties between different representations of the
/// same value (`2` and `2.0`) break on the representation so the order stays
/// total and agrees with structural equality.
fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    if let (Number::Real(x), Number::Real(y)) = (a, b) {
        return x.cmp(y);
    }
    a.compare(b)
     .unwrap_or_else(|| a.to_f64().is_nan().cmp(&b.to_f64().is_nan()))
     .then_with(|| a.is_integer().cmp(&b.is_integer()).reverse())
}

/// The canonical total order used to sort the arguments of commutative
/// applications.
///
/// Nodes are ordered by variant rank (`number < boolean < symbol < pair <
/// sequence < application`), then by numeric value, name or children in
/// lexicographic order. Two nodes compare `Equal` exactly when they are
/// structurally equal.
///
/// # Example
/// ```
/// use kelvin::node::core::Node;
///
/// let mut args = vec![Node::sym("b"), Node::app("f", vec![]), 3.into(), Node::sym("a")];
/// args.sort();
/// assert_eq!(args, vec![3.into(), Node::sym("a"), Node::sym("b"), Node::app("f", vec![])]);
/// ```
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => compare_numbers(a, b),
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Symbol(a), Self::Symbol(b)) => a.cmp(b),
            (Self::Pair(a1, a2), Self::Pair(b1, b2)) => a1.cmp(b1).then_with(|| a2.cmp(b2)),
            (Self::Sequence(a), Self::Sequence(b)) => a.cmp(b),
            (Self::Application { name: n1, args: a1 }, Self::Application { name: n2, args: a2 }) => {
                n1.cmp(n2).then_with(|| a1.cmp(a2))
            },
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
