use crate::{
    interpreter::{
        environment::Environment,
        evaluator::{
            canonical::{arrange, construct},
            core::EvalResult,
        },
    },
    node::core::Node,
};

impl Environment {
    /// Regroups the arguments of a commutative application pairwise.
    ///
    /// Every pair of arguments is simplified as a binary application of
    /// `name`. The first pair that folds into something smaller replaces the
    /// two arguments, the list is put back in canonical order and the search
    /// starts over. Only binary pairs are ever simplified, so nesting stays
    /// constant however many arguments fold.
    ///
    /// Every accepted fold removes one argument, so the search terminates.
    /// When the list shrank, the resulting application is offered to the
    /// registry once more, since an overload of the new arity may apply.
    pub(crate) fn regroup(&mut self, name: &str, args: &[Node]) -> EvalResult<Node> {
        let arity = args.len();
        let mut args = args.to_vec();
        while let Some((i, j, folded)) = self.fold_pair(name, &args)? {
            log::trace!("regrouped {} and {} under {name} into {folded}", args[i], args[j]);
            args.remove(j);
            args.remove(i);
            args.push(folded);
            if args.len() == 1 {
                return Ok(args.remove(0));
            }
            args = arrange(self.registry(), name, args);
        }

        if args.len() < arity
           && let Some(result) = self.invoke(name, &args)?
        {
            return self.simplify(&result);
        }
        Ok(construct(self.registry(), name, args))
    }

    /// Finds the first pair `(i, j)` with `i < j` whose binary application
    /// simplifies to something of lower complexity.
    fn fold_pair(&mut self, name: &str, args: &[Node]) -> EvalResult<Option<(usize, usize, Node)>> {
        for i in 0..args.len() {
            for j in (i + 1)..args.len() {
                let pair = Node::app(name, vec![args[i].clone(), args[j].clone()]);
                let folded = self.simplify(&pair)?;
                if folded.complexity() < pair.complexity() {
                    return Ok(Some((i, j, folded)));
                }
            }
        }
        Ok(None)
    }
}
