use std::fmt::Display;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, operation::core::Parameter},
    node::number::Number,
};

/// Represents one expression of the language.
///
/// `Node` is a closed set of leaves (numbers, symbols, booleans) and
/// composites (applications, pairs, sequences). Every transformation
/// produces a new node; nothing here mutates shared state.
///
/// Equality is structural: two nodes are equal when they have the same
/// variant, the same name where applicable, and pairwise equal children in
/// order. `Integer(2)` and `Real(2.0)` are therefore different nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// An exact, big or floating-point number.
    Number(Number),
    /// A variable reference. Unbound symbols stay symbolic.
    Symbol(String),
    /// A boolean literal.
    Boolean(bool),
    /// An invocation of the named operation over an ordered argument list.
    Application {
        /// Name of the operation.
        name: String,
        /// Arguments, in order.
        args: Vec<Self>,
    },
    /// An ordered pair `(first : second)`.
    Pair(Box<Self>, Box<Self>),
    /// An ordered list `{a, b, ...}`.
    Sequence(Vec<Self>),
}

/// The concrete kind of a node, used when reporting type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// An exact integer (small or big).
    Integer,
    /// A floating-point number.
    Real,
    /// A symbol.
    Symbol,
    /// A boolean.
    Boolean,
    /// An operation application.
    Application,
    /// A pair.
    Pair,
    /// A sequence.
    Sequence,
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Symbol => "symbol",
            Self::Boolean => "boolean",
            Self::Application => "application",
            Self::Pair => "pair",
            Self::Sequence => "sequence",
        };
        write!(f, "{name}")
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Number(Number::Integer(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Number> for Node {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<Self>> for Node {
    fn from(value: Vec<Self>) -> Self {
        Self::Sequence(value)
    }
}

impl Node {
    /// Builds a symbol node.
    ///
    /// # Example
    /// ```
    /// use kelvin::node::core::Node;
    ///
    /// assert_eq!(Node::sym("x"), Node::Symbol("x".to_string()));
    /// ```
    #[must_use]
    pub fn sym(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Builds a raw application node. No canonical ordering or flattening is
    /// applied; that happens when the rewrite engine reconstructs the node.
    #[must_use]
    pub fn app(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Application { name: name.into(),
                            args }
    }

    /// Builds a pair node.
    #[must_use]
    pub fn pair(first: Self, second: Self) -> Self {
        Self::Pair(Box::new(first), Box::new(second))
    }

    /// Returns the concrete kind of this node.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Number(Number::Real(_)) => Kind::Real,
            Self::Number(_) => Kind::Integer,
            Self::Symbol(_) => Kind::Symbol,
            Self::Boolean(_) => Kind::Boolean,
            Self::Application { .. } => Kind::Application,
            Self::Pair(..) => Kind::Pair,
            Self::Sequence(_) => Kind::Sequence,
        }
    }

    /// The numeric projection of this node, or `None` if it is not a number.
    #[must_use]
    pub const fn evaluated(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Structural size: `1` for a leaf, `1 +` the children's complexity for a
    /// composite. Used only to choose between equally valid rewrites.
    ///
    /// # Example
    /// ```
    /// use kelvin::node::core::Node;
    ///
    /// let e = Node::app("+", vec![Node::sym("a"), Node::app("^", vec![Node::sym("b"), 2.into()])]);
    /// assert_eq!(e.complexity(), 5);
    /// ```
    #[must_use]
    pub fn complexity(&self) -> usize {
        match self {
            Self::Number(_) | Self::Symbol(_) | Self::Boolean(_) => 1,
            Self::Application { args, .. } | Self::Sequence(args) => {
                1 + args.iter().map(Self::complexity).sum::<usize>()
            },
            Self::Pair(first, second) => 1 + first.complexity() + second.complexity(),
        }
    }

    /// Structural equality. Equivalent to `==`; kept as a named method for
    /// call sites that read better with it.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Returns the application name if this node is an application.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Application { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns `true` if no symbol or application occurs anywhere in the node.
    #[must_use]
    pub fn is_ground(&self) -> bool {
        match self {
            Self::Number(_) | Self::Boolean(_) => true,
            Self::Symbol(_) | Self::Application { .. } => false,
            Self::Pair(first, second) => first.is_ground() && second.is_ground(),
            Self::Sequence(elements) => elements.iter().all(Self::is_ground),
        }
    }

    /// Visits this node and then every descendant, depth first.
    pub fn walk(&self, visit: &mut impl FnMut(&Self)) {
        visit(self);
        match self {
            Self::Application { args, .. } | Self::Sequence(args) => {
                args.iter().for_each(|arg| arg.walk(visit));
            },
            Self::Pair(first, second) => {
                first.walk(visit);
                second.walk(visit);
            },
            Self::Number(_) | Self::Symbol(_) | Self::Boolean(_) => {},
        }
    }

    /// Rebuilds the tree bottom-up, handing every node to `replace`. Children
    /// are rebuilt before their parent sees them.
    #[must_use]
    pub fn replacing(&self, replace: &mut impl FnMut(Self) -> Self) -> Self {
        let rebuilt = match self {
            Self::Application { name, args } => {
                Self::Application { name: name.clone(),
                                    args: args.iter().map(|a| a.replacing(replace)).collect(), }
            },
            Self::Sequence(elements) => {
                Self::Sequence(elements.iter().map(|e| e.replacing(replace)).collect())
            },
            Self::Pair(first, second) => {
                Self::pair(first.replacing(replace), second.replacing(replace))
            },
            leaf => leaf.clone(),
        };
        replace(rebuilt)
    }

    fn mismatch<T>(&self, expected: Parameter) -> EvalResult<T> {
        Err(RuntimeError::TypeMismatch { expected,
                                         found: self.kind() })
    }

    /// Returns the numeric payload, or `TypeMismatch`.
    pub fn as_number(&self) -> EvalResult<&Number> {
        match self {
            Self::Number(n) => Ok(n),
            _ => self.mismatch(Parameter::Number),
        }
    }

    /// Converts the node to `f64`, or returns `TypeMismatch` if not numeric.
    ///
    /// # Example
    /// ```
    /// use kelvin::node::core::Node;
    ///
    /// assert_eq!(Node::from(10).as_real().unwrap(), 10.0);
    /// assert!(Node::sym("x").as_real().is_err());
    /// ```
    pub fn as_real(&self) -> EvalResult<f64> {
        self.as_number().map(Number::to_f64)
    }

    /// Returns the `i64` payload of an integer node, or `TypeMismatch`.
    pub fn as_integer(&self) -> EvalResult<i64> {
        match self {
            Self::Number(Number::Integer(n)) => Ok(*n),
            _ => self.mismatch(Parameter::Integer),
        }
    }

    /// Returns the boolean payload, or `TypeMismatch`.
    pub fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            _ => self.mismatch(Parameter::Boolean),
        }
    }

    /// Returns the symbol name, or `TypeMismatch`.
    pub fn as_symbol(&self) -> EvalResult<&str> {
        match self {
            Self::Symbol(name) => Ok(name),
            _ => self.mismatch(Parameter::Symbol),
        }
    }

    /// Returns the elements of a sequence, or `TypeMismatch`.
    pub fn as_sequence(&self) -> EvalResult<&[Self]> {
        match self {
            Self::Sequence(elements) => Ok(elements),
            _ => self.mismatch(Parameter::Sequence),
        }
    }

    /// Returns both halves of a pair, or `TypeMismatch`.
    pub fn as_pair(&self) -> EvalResult<(&Self, &Self)> {
        match self {
            Self::Pair(first, second) => Ok((first, second)),
            _ => self.mismatch(Parameter::Pair),
        }
    }

    /// Returns the name and arguments of an application, or `TypeMismatch`.
    pub fn as_application(&self) -> EvalResult<(&str, &[Self])> {
        match self {
            Self::Application { name, args } => Ok((name, args)),
            _ => self.mismatch(Parameter::Application),
        }
    }

    /// Specializes a sequence of numeric nodes into `f64`s.
    pub fn as_reals(&self) -> EvalResult<Vec<f64>> {
        self.as_sequence()?.iter().map(Self::as_real).collect()
    }
}

fn join(f: &mut std::fmt::Formatter<'_>, nodes: &[Node]) -> std::fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{node}")?;
    }
    Ok(())
}

/// Plain prefix rendering. Operator-aware rendering lives in
/// `interpreter::printer`.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Symbol(name) => write!(f, "{name}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Application { name, args } => {
                write!(f, "{name}(")?;
                join(f, args)?;
                write!(f, ")")
            },
            Self::Pair(first, second) => write!(f, "({first} : {second})"),
            Self::Sequence(elements) => {
                write!(f, "{{")?;
                join(f, elements)?;
                write!(f, "}}")
            },
        }
    }
}
