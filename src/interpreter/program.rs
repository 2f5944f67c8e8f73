use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, DEFAULT_MAX_DEPTH},
    },
    node::core::Node,
};

/// Which scope a program starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopePolicy {
    /// Run on top of whatever is currently defined.
    #[default]
    UseCurrent,
    /// Run on the built-in operations only.
    UseBase,
}

/// What happens to definitions made by a program once it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Discard them, returning to the scope the program started in.
    #[default]
    Restore,
    /// Discard everything, returning to the built-in operations only.
    RestoreToBase,
    /// Keep them.
    PreserveAll,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Execution settings of a [`Program`].
///
/// # Example
/// ```
/// use kelvin::interpreter::program::{Configuration, RetentionPolicy, ScopePolicy};
///
/// let config = Configuration::default();
/// assert!(!config.verbose);
/// assert_eq!(config.scope, ScopePolicy::UseCurrent);
/// assert_eq!(config.retention, RetentionPolicy::Restore);
/// assert_eq!(config.max_depth, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Log every statement and the program output at `info` level.
    #[serde(default)]
    pub verbose:   bool,
    /// Starting scope.
    #[serde(default)]
    pub scope:     ScopePolicy,
    /// Fate of the program's definitions.
    #[serde(default)]
    pub retention: RetentionPolicy,
    /// Nesting limit of `simplify` while the program runs.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self { verbose:   false,
               scope:     ScopePolicy::default(),
               retention: RetentionPolicy::default(),
               max_depth: DEFAULT_MAX_DEPTH, }
    }
}

/// One executed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    /// The statement as given.
    pub input:  Node,
    /// What it simplified to.
    pub output: Node,
}

impl Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ">>> {}\n    {}", self.input, self.output)
    }
}

/// Result of running a program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Output {
    /// One entry per statement, in order.
    pub logs:    Vec<Log>,
    /// Concatenated text of every `print`/`println` found in the results.
    pub printed: String,
}

/// An ordered list of top-level statements executed as one transaction.
///
/// `run` saves the environment, optionally resets it to the built-ins,
/// simplifies every statement in order and finally applies the retention
/// policy. The retention policy is applied even when a statement fails, so
/// a failed program never leaks partial definitions unless asked to.
///
/// Applications named `print` and `println` are output sinks: no operation
/// is registered for them, and every one found anywhere in a result
/// contributes its rendered arguments to [`Output::printed`].
///
/// # Example
/// ```
/// use kelvin::{
///     interpreter::{environment::Environment, program::{Configuration, Program}},
///     node::core::Node,
/// };
///
/// let statements = vec![
///     Node::app("define", vec![Node::sym("x"), 5.into()]),
///     Node::app("println", vec![Node::app("*", vec![Node::sym("x"), 2.into()])]),
/// ];
/// let mut env = Environment::new();
/// let output = Program::new(statements, Configuration::default()).run(&mut env).unwrap();
///
/// assert_eq!(output.printed, "10\n");
/// assert!(env.get("x").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Program {
    statements: Vec<Node>,
    config:     Configuration,
}

impl Program {
    /// Creates a program.
    #[must_use]
    pub const fn new(statements: Vec<Node>, config: Configuration) -> Self {
        Self { statements, config }
    }

    /// The program's statements.
    #[must_use]
    pub fn statements(&self) -> &[Node] {
        &self.statements
    }

    /// The program's configuration.
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Executes the program against `env`.
    ///
    /// # Errors
    /// The first error raised by a statement. Statements after it do not
    /// run.
    pub fn run(&self, env: &mut Environment) -> EvalResult<Output> {
        let previous_depth = env.max_depth();
        env.set_max_depth(self.config.max_depth);
        env.save();
        if self.config.scope == ScopePolicy::UseBase {
            env.restore_to_base();
        }

        let result = self.execute(env);

        match self.config.retention {
            RetentionPolicy::Restore => {
                env.restore();
            },
            RetentionPolicy::RestoreToBase => {
                env.commit();
                env.restore_to_base();
            },
            RetentionPolicy::PreserveAll => {
                env.commit();
            },
        }
        env.set_max_depth(previous_depth);
        result
    }

    fn execute(&self, env: &mut Environment) -> EvalResult<Output> {
        let mut output = Output::default();
        for statement in &self.statements {
            let result = env.simplify(statement)?;
            let entry = Log { input:  statement.clone(),
                              output: result, };
            if self.config.verbose {
                log::info!("{entry}");
            }
            collect_printed(env, &entry.output, &mut output.printed);
            output.logs.push(entry);
        }
        if self.config.verbose {
            log::info!("program output:\n{}", output.printed);
        }
        Ok(output)
    }
}

/// Appends the rendered arguments of every `print`/`println` in `node`.
fn collect_printed(env: &Environment, node: &Node, printed: &mut String) {
    node.walk(&mut |n| {
            if let Node::Application { name, args } = n
               && matches!(name.as_str(), "print" | "println")
            {
                for arg in args {
                    printed.push_str(&env.render(arg));
                    if name == "println" {
                        printed.push('\n');
                    }
                }
            }
        });
}
