use crate::{
    interpreter::{
        environment::Environment,
        operation::{
            core::{Precedence, Syntax},
            registry::Registry,
        },
    },
    node::core::Node,
};

/// Renders nodes using the syntax and precedence declared in a registry.
///
/// Printing never affects simplification. Applications whose name has no
/// keyword and no declared syntax fall back to `name(a, b)`.
///
/// # Example
/// ```
/// use kelvin::{interpreter::{environment::Environment, printer::Printer}, node::core::Node};
///
/// let env = Environment::new();
/// let sum = Node::app("+", vec![Node::sym("a"), Node::sym("b")]);
/// let e = Node::app("*", vec![sum, Node::sym("c")]);
/// assert_eq!(Printer::new(env.registry()).render(&e), "(a + b) * c");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Printer<'a> {
    registry: &'a Registry,
}

impl<'a> Printer<'a> {
    /// Creates a printer reading syntax from `registry`.
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Renders `node` as text.
    #[must_use]
    pub fn render(&self, node: &Node) -> String {
        match node {
            Node::Number(_) | Node::Symbol(_) | Node::Boolean(_) => node.to_string(),
            Node::Pair(first, second) => {
                format!("({} : {})", self.render(first), self.render(second))
            },
            Node::Sequence(elements) => format!("{{{}}}", self.render_list(elements)),
            Node::Application { name, args } => self.render_application(name, args),
        }
    }

    fn render_list(&self, nodes: &[Node]) -> String {
        nodes.iter().map(|n| self.render(n)).collect::<Vec<_>>().join(", ")
    }

    fn render_application(&self, name: &str, args: &[Node]) -> String {
        let normal = || format!("{name}({})", self.render_list(args));
        let Some((symbol, syntax, _)) = self.registry.syntax_of(name) else {
            return normal();
        };
        let spaced = symbol.chars().all(char::is_alphanumeric);
        let child = |idx: usize| {
            let text = self.render(&args[idx]);
            if self.needs_parentheses(name, args, idx) {
                format!("({text})")
            } else {
                text
            }
        };

        match (syntax, args.len()) {
            (Syntax::Infix, 1) => format!("{symbol}{}", child(0)),
            (Syntax::Infix, n) if n == 2 || (n > 2 && self.registry.is_commutative(name)) => {
                (0..n).map(&child).collect::<Vec<_>>().join(&format!(" {symbol} "))
            },
            (Syntax::Prefix, 1) if spaced => format!("{symbol} {}", child(0)),
            (Syntax::Prefix, 1) => format!("{symbol}{}", child(0)),
            (Syntax::Postfix, 1) if spaced => format!("{} {symbol}", child(0)),
            (Syntax::Postfix, 1) => format!("{}{symbol}", child(0)),
            _ => normal(),
        }
    }

    fn precedence(&self, name: &str) -> Option<Precedence> {
        self.registry.syntax_of(name).map(|(_, _, precedence)| precedence)
    }

    /// A child needs parentheses when it binds looser than its parent. At
    /// equal precedence it needs them when it is unary, or when it sits
    /// right of the first position under a parent that is not fully
    /// commutative or has a different name.
    fn needs_parentheses(&self, parent: &str, args: &[Node], idx: usize) -> bool {
        let Node::Application { name, args: children } = &args[idx] else {
            return false;
        };
        let (Some(inner), Some(outer)) = (self.precedence(name), self.precedence(parent)) else {
            return false;
        };
        if inner != outer {
            return inner < outer;
        }
        if children.len() == 1 {
            return true;
        }
        if idx == 0 {
            return false;
        }
        if self.registry.is_forward_commutative(parent) {
            return true;
        }
        if self.registry.is_commutative(parent) {
            return name != parent;
        }
        true
    }
}

impl Environment {
    /// Renders `node` with the syntax of the current registry.
    ///
    /// # Example
    /// ```
    /// use kelvin::{interpreter::environment::Environment, node::core::Node};
    ///
    /// let env = Environment::new();
    /// let diff = Node::app("-", vec![Node::sym("a"), Node::app("-", vec![Node::sym("b"), Node::sym("c")])]);
    /// assert_eq!(env.render(&diff), "a - (b - c)");
    /// ```
    #[must_use]
    pub fn render(&self, node: &Node) -> String {
        Printer::new(self.registry()).render(node)
    }
}
