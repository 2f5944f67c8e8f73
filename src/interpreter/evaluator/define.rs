use crate::{
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::EvalResult,
        operation::core::{Operation, Parameter},
    },
    node::core::Node,
};

impl Environment {
    /// Simplifies `value` and binds it to `name`.
    ///
    /// # Errors
    /// `InvalidDefinition` if the simplified value still refers to `name`.
    ///
    /// # Returns
    /// The bound value.
    pub fn define_variable(&mut self, name: &str, value: &Node) -> EvalResult<Node> {
        let value = self.simplify(value)?;
        let mut circular = false;
        value.walk(&mut |node| circular |= matches!(node, Node::Symbol(s) if s == name));
        if circular {
            return Err(RuntimeError::InvalidDefinition { details: format!("'{name}' is defined in terms of itself") });
        }
        self.set(name, value.clone());
        Ok(value)
    }

    /// Installs a user operation `name(params...) = template`.
    ///
    /// Every parameter symbol in the template is first renamed to an alias
    /// no other definition can produce. A call then substitutes the aliases
    /// with its arguments by position in a single pass, so an argument that
    /// happens to share a name with a parameter is never substituted twice.
    /// Any earlier user operation of the same name and arity is replaced.
    ///
    /// # Errors
    /// `InvalidDefinition` if a parameter is not a symbol or occurs twice.
    ///
    /// # Example
    /// ```
    /// use kelvin::{interpreter::environment::Environment, node::core::Node};
    ///
    /// let mut env = Environment::new();
    /// let template = Node::app("-", vec![Node::sym("x"), Node::sym("y")]);
    /// env.define_operation("f", &[Node::sym("x"), Node::sym("y")], &template).unwrap();
    ///
    /// let call = Node::app("f", vec![Node::sym("y"), Node::sym("x")]);
    /// assert_eq!(env.simplify(&call).unwrap().to_string(), "-(y, x)");
    /// ```
    pub fn define_operation(&mut self,
                            name: &str,
                            params: &[Node],
                            template: &Node)
                            -> EvalResult<()> {
        let mut names = Vec::with_capacity(params.len());
        for param in params {
            let Node::Symbol(param) = param else {
                return Err(RuntimeError::InvalidDefinition { details: format!("parameter '{param}' of '{name}' is not a symbol") });
            };
            if names.contains(param) {
                return Err(RuntimeError::InvalidDefinition { details: format!("parameter '{param}' of '{name}' is repeated") });
            }
            names.push(param.clone());
        }

        let aliases = names.iter()
                           .map(|param| format!("{param}#{}", self.fresh()))
                           .collect::<Vec<_>>();
        let body = template.replacing(&mut |node| match node {
                               Node::Symbol(s) => match names.iter().position(|p| *p == s) {
                                   Some(i) => Node::Symbol(aliases[i].clone()),
                                   None => Node::Symbol(s),
                               },
                               other => other,
                           });

        let signature = vec![Parameter::Any; names.len()];
        log::debug!("define {name}({}) = {template}", names.join(", "));
        self.register(Operation::new(name, signature, move |args, _| {
                          Ok(Some(body.replacing(&mut |node| match node {
                                          Node::Symbol(s) => {
                                              match aliases.iter().position(|a| *a == s) {
                                                  Some(i) => args[i].clone(),
                                                  None => Node::Symbol(s),
                                              }
                                          },
                                          other => other,
                                      })))
                      }));
        Ok(())
    }
}
