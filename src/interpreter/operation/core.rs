use std::{fmt::Display, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::{
    interpreter::{environment::Environment, evaluator::core::EvalResult},
    node::{core::Node, number::Number},
};

/// Type alias for operation handlers.
///
/// A handler receives the (usually already simplified) arguments and the
/// environment. `Ok(None)` means "this definition does not apply to these
/// concrete values" and is not an error; the engine then leaves the
/// application in place.
pub type Handler = Rc<dyn Fn(&[Node], &mut Environment) -> EvalResult<Option<Node>>>;

/// One per-argument kind constraint of a signature.
///
/// Matching is structural over the node variant, so resolution never needs
/// anything beyond a `match` on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    /// Any number, exact or floating.
    Number,
    /// An exact `i64` integer.
    Integer,
    /// A variable reference.
    Symbol,
    /// A boolean.
    Boolean,
    /// An operation application.
    Application,
    /// A sequence.
    Sequence,
    /// A pair.
    Pair,
    /// Any single node.
    Any,
    /// Any number of arguments of any kind. Only meaningful as the sole
    /// entry of a signature.
    Universal,
}

impl Parameter {
    /// Tests whether `node` satisfies this constraint.
    ///
    /// # Example
    /// ```
    /// use kelvin::{interpreter::operation::core::Parameter, node::core::Node};
    ///
    /// assert!(Parameter::Number.accepts(&Node::from(2.5)));
    /// assert!(!Parameter::Integer.accepts(&Node::from(2.5)));
    /// assert!(!Parameter::Universal.accepts(&Node::from(1)));
    /// ```
    #[must_use]
    pub const fn accepts(self, node: &Node) -> bool {
        match self {
            Self::Any => true,
            Self::Universal => false,
            Self::Number => matches!(node, Node::Number(_)),
            Self::Integer => matches!(node, Node::Number(Number::Integer(_))),
            Self::Symbol => matches!(node, Node::Symbol(_)),
            Self::Boolean => matches!(node, Node::Boolean(_)),
            Self::Application => matches!(node, Node::Application { .. }),
            Self::Sequence => matches!(node, Node::Sequence(_)),
            Self::Pair => matches!(node, Node::Pair(..)),
        }
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Symbol => "symbol",
            Self::Boolean => "boolean",
            Self::Application => "application",
            Self::Sequence => "sequence",
            Self::Pair => "pair",
            Self::Any => "any",
            Self::Universal => "any arguments",
        };
        write!(f, "{name}")
    }
}

/// How an application is rendered. Has no effect on simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Syntax {
    /// `name(a, b)`.
    #[default]
    Normal,
    /// `name a`, for single-argument applications.
    Prefix,
    /// `a name b`, for binary or commutative applications.
    Infix,
    /// `a name`, for single-argument applications.
    Postfix,
}

/// Binding strength used by the printer. Higher binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Precedence {
    /// Definitions and other statement-like operations.
    #[default]
    Lowest,
    /// `or`, `xor`.
    Disjunction,
    /// `and`.
    Conjunction,
    /// `==`, `!=`, `<`, `>`, `<=`, `>=`.
    Comparison,
    /// `+`, `-`.
    Translating,
    /// `*`, `/`, `%`.
    Scaling,
    /// `^`.
    Exponent,
    /// Unary prefix operators.
    Prefix,
    /// Unary postfix operators.
    Postfix,
}

/// Behavioral attributes of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Attributes {
    /// Arguments may be reordered and nested same-name applications are
    /// flattened into one n-ary application.
    pub commutative:         bool,
    /// Only commutative in the forward direction (`a - b - c`); affects
    /// parenthesization of the right-hand side when printing.
    pub forward_commutative: bool,
    /// The engine must not simplify arguments before invoking the handler.
    pub preserves_arguments: bool,
}

/// An immutable, signature-typed operation definition.
#[derive(Clone)]
pub struct Operation {
    /// Name the operation is invoked by.
    pub name:       String,
    /// Ordered per-argument constraints.
    pub signature:  Vec<Parameter>,
    /// Printing syntax.
    pub syntax:     Syntax,
    /// Printing precedence.
    pub precedence: Precedence,
    /// Behavioral attributes.
    pub attributes: Attributes,
    handler:        Handler,
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
         .field("name", &self.name)
         .field("signature", &self.signature)
         .field("syntax", &self.syntax)
         .field("precedence", &self.precedence)
         .field("attributes", &self.attributes)
         .finish_non_exhaustive()
    }
}

impl Operation {
    /// Creates an operation with normal syntax and no attributes.
    ///
    /// # Example
    /// ```
    /// use kelvin::{
    ///     interpreter::operation::core::{Operation, Parameter},
    ///     node::core::Node,
    /// };
    ///
    /// let double = Operation::new("double", vec![Parameter::Any], |args, _| {
    ///     Ok(Some(Node::app("*", vec![2.into(), args[0].clone()])))
    /// });
    /// assert_eq!(double.signature, vec![Parameter::Any]);
    /// ```
    pub fn new(name: impl Into<String>,
               signature: Vec<Parameter>,
               handler: impl Fn(&[Node], &mut Environment) -> EvalResult<Option<Node>> + 'static)
               -> Self {
        Self { name:       name.into(),
               signature,
               syntax:     Syntax::Normal,
               precedence: Precedence::Lowest,
               attributes: Attributes::default(),
               handler:    Rc::new(handler), }
    }

    /// Operation taking no arguments.
    pub fn nullary(name: impl Into<String>,
                   def: impl Fn(&mut Environment) -> EvalResult<Option<Node>> + 'static)
                   -> Self {
        Self::new(name, Vec::new(), move |_, env| def(env))
    }

    /// Operation taking one argument.
    pub fn unary(name: impl Into<String>,
                 parameter: Parameter,
                 def: impl Fn(&Node, &mut Environment) -> EvalResult<Option<Node>> + 'static)
                 -> Self {
        Self::new(name, vec![parameter], move |args, env| def(&args[0], env))
    }

    /// Operation taking two arguments.
    pub fn binary(name: impl Into<String>,
                  signature: [Parameter; 2],
                  def: impl Fn(&Node, &Node, &mut Environment) -> EvalResult<Option<Node>> + 'static)
                  -> Self {
        Self::new(name, signature.to_vec(), move |args, env| def(&args[0], &args[1], env))
    }

    /// Operation taking three arguments.
    pub fn ternary(name: impl Into<String>,
                   signature: [Parameter; 3],
                   def: impl Fn(&Node, &Node, &Node, &mut Environment) -> EvalResult<Option<Node>>
                   + 'static)
                   -> Self {
        Self::new(name, signature.to_vec(), move |args, env| {
            def(&args[0], &args[1], &args[2], env)
        })
    }

    /// Operation accepting any number of arguments of any kind.
    pub fn universal(name: impl Into<String>,
                     def: impl Fn(&[Node], &mut Environment) -> EvalResult<Option<Node>> + 'static)
                     -> Self {
        Self::new(name, vec![Parameter::Universal], def)
    }

    /// Sets the printing syntax and precedence.
    #[must_use]
    pub fn with_syntax(mut self, syntax: Syntax, precedence: Precedence) -> Self {
        self.syntax = syntax;
        self.precedence = precedence;
        self
    }

    /// Marks the operation commutative (and therefore flattenable).
    #[must_use]
    pub fn commutative(mut self) -> Self {
        self.attributes.commutative = true;
        self
    }

    /// Marks the operation forward commutative.
    #[must_use]
    pub fn forward_commutative(mut self) -> Self {
        self.attributes.forward_commutative = true;
        self
    }

    /// Keeps the engine from simplifying arguments before the handler runs.
    #[must_use]
    pub fn preserving_arguments(mut self) -> Self {
        self.attributes.preserves_arguments = true;
        self
    }

    /// Returns `true` if the signature is exactly the universal sentinel.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.signature == [Parameter::Universal]
    }

    /// Tests arity and every positional constraint against `args`.
    #[must_use]
    pub fn accepts(&self, args: &[Node]) -> bool {
        self.signature.len() == args.len()
        && self.signature
               .iter()
               .zip(args)
               .all(|(parameter, arg)| parameter.accepts(arg))
    }

    /// Returns a shared handle to the handler, so it can be invoked while the
    /// environment is mutably borrowed.
    #[must_use]
    pub fn handler(&self) -> Handler {
        Rc::clone(&self.handler)
    }
}
