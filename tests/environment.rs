use kelvin::{
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::function::core::BUILTIN_KEYWORDS,
        operation::{
            core::{Operation, Parameter, Precedence, Syntax},
            registry::{Keyword, Registry},
        },
    },
    node::core::Node,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn app(name: &str, args: Vec<Node>) -> Node {
    Node::app(name, args)
}

fn double() -> Operation {
    Operation::unary("double", Parameter::Any, |x, _| {
        Ok(Some(app("*", vec![2.into(), x.clone()])))
    })
}

#[test]
fn register_then_remove() {
    init();
    let mut env = Environment::new();
    env.register(double());
    assert!(env.registry().resolve("double", &[Node::sym("x")]).is_some());
    assert_eq!(env.simplify(&app("double", vec![21.into()])).unwrap(), Node::from(42));

    assert!(env.registry_mut().remove("double", &[Parameter::Any]));
    assert!(env.registry().resolve("double", &[Node::sym("x")]).is_none());
    assert!(!env.registry_mut().remove("double", &[Parameter::Any]));

    let call = app("double", vec![21.into()]);
    assert_eq!(env.simplify(&call).unwrap(), call);
}

#[test]
fn registering_the_same_signature_replaces() {
    let mut registry = Registry::new();
    registry.register(Operation::unary("f", Parameter::Number, |_, _| Ok(Some(1.into()))));
    registry.register(Operation::unary("f", Parameter::Symbol, |_, _| Ok(Some(2.into()))));
    registry.register(Operation::unary("f", Parameter::Number, |_, _| Ok(Some(3.into()))));

    let overloads = registry.overloads("f");
    assert_eq!(overloads.len(), 2);
    assert_eq!(overloads[0].signature, vec![Parameter::Number]);
    assert_eq!(overloads[1].signature, vec![Parameter::Symbol]);

    let mut env = Environment::from_registry(registry);
    assert_eq!(env.simplify(&app("f", vec![5.into()])).unwrap(), Node::from(3));
    assert_eq!(env.simplify(&app("f", vec![Node::sym("s")])).unwrap(), Node::from(2));
}

#[test]
fn resolution_is_first_match_then_universal() {
    let mut registry = Registry::new();
    registry.register(Operation::universal("f", |_, _| Ok(Some(0.into()))));
    registry.register(Operation::unary("f", Parameter::Any, |_, _| Ok(Some(1.into()))));
    registry.register(Operation::unary("f", Parameter::Integer, |_, _| Ok(Some(2.into()))));

    let one = registry.resolve("f", &[7.into()]).unwrap();
    assert_eq!(one.signature, vec![Parameter::Any]);

    let none = registry.resolve("f", &[]).unwrap();
    assert!(none.is_universal());

    let two = registry.resolve("f", &[1.into(), 2.into()]).unwrap();
    assert!(two.is_universal());
}

#[test]
fn resolution_is_deterministic() {
    let env = Environment::new();
    let args = [Node::from(1), Node::sym("x")];
    for name in ["+", "*", "-", "==", "define", "sum", "f"] {
        let first = env.registry().resolve(name, &args);
        let second = env.registry().resolve(name, &args);
        match (first, second) {
            (Some(a), Some(b)) => assert!(std::ptr::eq(a, b)),
            (None, None) => {},
            _ => panic!("resolution of {name} changed between calls"),
        }
    }
}

#[test]
fn signature_matching_is_structural() {
    assert!(Parameter::Number.accepts(&Node::from(1)));
    assert!(Parameter::Number.accepts(&Node::from(1.5)));
    assert!(Parameter::Integer.accepts(&Node::from(1)));
    assert!(!Parameter::Integer.accepts(&Node::from(1.0)));
    assert!(Parameter::Symbol.accepts(&Node::sym("x")));
    assert!(Parameter::Boolean.accepts(&Node::Boolean(false)));
    assert!(Parameter::Application.accepts(&app("f", vec![])));
    assert!(Parameter::Sequence.accepts(&Node::Sequence(vec![])));
    assert!(Parameter::Pair.accepts(&Node::pair(1.into(), 2.into())));
    assert!(!Parameter::Pair.accepts(&Node::Sequence(vec![1.into(), 2.into()])));
    assert!(Parameter::Any.accepts(&app("f", vec![])));
}

#[test]
fn preserved_arguments_reach_the_handler_untouched() {
    init();
    let mut env = Environment::new();
    env.register(Operation::unary("quote", Parameter::Any, |_, _| Ok(None)).preserving_arguments());

    let quoted = app("quote", vec![app("+", vec![1.into(), 2.into()])]);
    assert_eq!(env.simplify(&quoted).unwrap(), quoted);

    env.register(Operation::unary("peek", Parameter::Any, |_, _| Ok(None)));
    let peeked = app("peek", vec![app("+", vec![1.into(), 2.into()])]);
    assert_eq!(env.simplify(&peeked).unwrap(), app("peek", vec![3.into()]));
}

#[test]
fn custom_commutative_operations_are_canonicalized() {
    init();
    let mut env = Environment::new();
    env.register(Operation::binary("max2", [Parameter::Number, Parameter::Number], |a, b, _| {
                     Ok(Some(if a.as_real()? >= b.as_real()? { a.clone() } else { b.clone() }))
                 }).commutative());

    let e = app("max2", vec![Node::sym("z"), app("max2", vec![Node::sym("a"), 4.into()])]);
    assert_eq!(env.simplify(&e).unwrap(),
               app("max2", vec![4.into(), Node::sym("a"), Node::sym("z")]));

    let folded = app("max2", vec![3.into(), app("max2", vec![Node::sym("a"), 9.into()]), 5.into()]);
    assert_eq!(env.simplify(&folded).unwrap(), app("max2", vec![9.into(), Node::sym("a")]));
}

#[test]
fn handlers_may_simplify_through_the_environment() {
    init();
    let mut env = Environment::new();
    env.register(Operation::unary("twice", Parameter::Any, |x, env| {
                     let once = env.simplify(&app("+", vec![x.clone(), x.clone()]))?;
                     Ok(Some(once))
                 }));
    assert_eq!(env.simplify(&app("twice", vec![4.into()])).unwrap(), Node::from(8));
}

#[test]
fn save_and_restore() {
    init();
    let mut env = Environment::new();
    env.set("kept", 1.into());

    env.save();
    env.register(Operation::unary("triple", Parameter::Any, |x, _| {
                     Ok(Some(app("*", vec![3.into(), x.clone()])))
                 }));
    env.set("temp", 2.into());
    assert!(env.registry().resolve("triple", &[1.into()]).is_some());
    assert_eq!(env.saved(), 1);

    assert!(env.restore());
    assert!(env.registry().resolve("triple", &[1.into()]).is_none());
    assert!(env.get("temp").is_none());
    assert_eq!(env.get("kept"), Some(&Node::from(1)));
    assert_eq!(env.saved(), 0);

    assert!(!env.restore());
    assert_eq!(env.get("kept"), Some(&Node::from(1)));
}

#[test]
fn nested_snapshots() {
    let mut env = Environment::new();
    env.save();
    env.set("a", 1.into());
    env.save();
    env.set("b", 2.into());

    assert!(env.restore());
    assert!(env.get("b").is_none());
    assert!(env.get("a").is_some());

    assert!(env.restore());
    assert!(env.get("a").is_none());
}

#[test]
fn commit_keeps_definitions() {
    let mut env = Environment::new();
    env.save();
    env.register(double());
    env.set("x", 3.into());

    assert!(env.commit());
    assert!(env.registry().contains("double"));
    assert_eq!(env.get("x"), Some(&Node::from(3)));
    assert!(!env.commit());
}

#[test]
fn restore_to_base_keeps_builtins_only() {
    init();
    let mut env = Environment::new();
    env.register(double());
    env.set("x", 3.into());
    env.registry_mut().remove_all("+");
    env.save();

    env.restore_to_base();
    assert!(!env.registry().contains("double"));
    assert!(env.get("x").is_none());
    assert!(env.registry().contains("+"));
    assert_eq!(env.saved(), 1);

    assert!(env.restore());
    assert!(env.registry().contains("double"));
    assert!(!env.registry().contains("+"));
}

#[test]
fn delete_reports_unbound_names() {
    let mut env = Environment::new();
    env.set("x", 1.into());
    assert_eq!(env.delete("x"), Ok(Node::from(1)));
    assert_eq!(env.delete("x"),
               Err(RuntimeError::UndefinedVariable { name: "x".to_string() }));
}

#[test]
fn user_definitions_are_alpha_renamed() {
    init();
    let mut env = Environment::new();
    let template = app("+", vec![Node::sym("x"), app("*", vec![2.into(), Node::sym("y")])]);
    env.define_operation("g", &[Node::sym("x"), Node::sym("y")], &template).unwrap();

    // An argument spelled like a parameter is substituted once, by position.
    let e = app("g", vec![Node::sym("y"), Node::sym("x")]);
    assert_eq!(env.simplify(&e).unwrap(),
               app("+", vec![Node::sym("y"), app("*", vec![2.into(), Node::sym("x")])]));
}

#[test]
fn invalid_operation_definitions() {
    let mut env = Environment::new();
    let body = Node::sym("x");
    assert!(matches!(env.define_operation("f", &[1.into()], &body),
                     Err(RuntimeError::InvalidDefinition { .. })));
    assert!(matches!(env.define_operation("f", &[Node::sym("x"), Node::sym("x")], &body),
                     Err(RuntimeError::InvalidDefinition { .. })));
    assert!(!env.registry().contains("f"));
}

#[test]
fn builtin_keywords_are_installed() {
    let env = Environment::new();
    for symbol in BUILTIN_KEYWORDS {
        assert!(env.registry().keyword(symbol).is_some(), "missing keyword {symbol}");
    }

    let define = env.registry().keyword(":=").unwrap();
    assert_eq!(define.operation, "define");
    assert_eq!(define.syntax, Syntax::Infix);

    assert_eq!(env.registry().syntax_of("!"),
               Some(("!", Syntax::Postfix, Precedence::Postfix)));
    assert_eq!(env.registry().syntax_of("negate"), None);
}

#[test]
fn keywords_are_unique() {
    let mut registry = Registry::new();
    let plus = Keyword::new("+", "+", Syntax::Infix, Precedence::Translating);
    registry.define_keyword(plus.clone()).unwrap();
    assert_eq!(registry.define_keyword(plus),
               Err(RuntimeError::DuplicateDefinition { keyword: "+".to_string() }));

    let mut env = Environment::new();
    let err = env.registry_mut()
                 .define_keyword(Keyword::new("and", "both", Syntax::Infix, Precedence::Conjunction))
                 .unwrap_err();
    assert_eq!(err, RuntimeError::DuplicateDefinition { keyword: "and".to_string() });
}

#[test]
fn precedence_is_ordered() {
    assert!(Precedence::Lowest < Precedence::Disjunction);
    assert!(Precedence::Disjunction < Precedence::Conjunction);
    assert!(Precedence::Comparison < Precedence::Translating);
    assert!(Precedence::Translating < Precedence::Scaling);
    assert!(Precedence::Scaling < Precedence::Exponent);
    assert!(Precedence::Exponent < Precedence::Prefix);
    assert!(Precedence::Prefix < Precedence::Postfix);
}

#[test]
fn depth_limit_is_configurable() {
    init();
    let mut env = Environment::new().with_max_depth(2);
    assert_eq!(env.max_depth(), 2);
    let nested = app("+", vec![app("+", vec![app("+", vec![1.into(), 1.into()]), 1.into()]), 1.into()]);
    assert!(matches!(env.simplify(&nested), Err(RuntimeError::RecursionLimit { .. })));

    env.set_max_depth(64);
    assert_eq!(env.simplify(&nested).unwrap(), Node::from(4));
}
