use kelvin::{
    error::RuntimeError,
    evaluate,
    interpreter::{
        environment::Environment,
        program::{Configuration, Program, RetentionPolicy, ScopePolicy},
    },
    node::core::Node,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sym(name: &str) -> Node {
    Node::sym(name)
}

fn app(name: &str, args: Vec<Node>) -> Node {
    Node::app(name, args)
}

fn config(scope: ScopePolicy, retention: RetentionPolicy) -> Configuration {
    Configuration { scope,
                    retention,
                    ..Configuration::default() }
}

fn assert_renders(node: &Node, expected: &str) {
    let env = Environment::new();
    assert_eq!(env.render(node), expected, "rendering {node}");
}

#[test]
fn configuration_from_toml() {
    let config: Configuration = toml::from_str(
                                               r#"
verbose = true
scope = "use_base"
retention = "preserve_all"
"#,
    ).unwrap();
    assert!(config.verbose);
    assert_eq!(config.scope, ScopePolicy::UseBase);
    assert_eq!(config.retention, RetentionPolicy::PreserveAll);
    assert_eq!(config.max_depth, 256);

    let config: Configuration = toml::from_str("retention = \"restore_to_base\"\nmax_depth = 32").unwrap();
    assert_eq!(config.retention, RetentionPolicy::RestoreToBase);
    assert_eq!(config.max_depth, 32);

    let config: Configuration = toml::from_str("").unwrap();
    assert_eq!(config, Configuration::default());

    assert!(toml::from_str::<Configuration>("scope = \"everywhere\"").is_err());
}

#[test]
fn configuration_round_trips_through_toml() {
    let config = Configuration { verbose:   true,
                                 scope:     ScopePolicy::UseBase,
                                 retention: RetentionPolicy::RestoreToBase,
                                 max_depth: 100, };
    let text = toml::to_string(&config).unwrap();
    assert!(text.contains("restore_to_base"));
    assert_eq!(toml::from_str::<Configuration>(&text).unwrap(), config);
}

#[test]
fn evaluate_logs_every_statement() {
    init();
    let statements = vec![app("define", vec![sym("x"), 4.into()]),
                          app("+", vec![sym("x"), 1.into()]),
                          app("+", vec![sym("y"), 1.into()])];
    let output = evaluate(statements.clone()).unwrap();

    assert_eq!(output.logs.len(), 3);
    for (log, statement) in output.logs.iter().zip(&statements) {
        assert_eq!(&log.input, statement);
    }
    assert_eq!(output.logs[0].output, Node::from(4));
    assert_eq!(output.logs[1].output, Node::from(5));
    assert_eq!(output.logs[2].output, app("+", vec![1.into(), sym("y")]));
    assert_eq!(output.logs[1].to_string(), ">>> +(x, 1)\n    5");
    assert!(output.printed.is_empty());
}

#[test]
fn print_sinks_collect_rendered_text() {
    init();
    let statements = vec![app("print", vec![app("+", vec![sym("b"), sym("a")])]),
                          app("println", vec![app("*", vec![2.into(), 21.into()])]),
                          app("exec", vec![app("println", vec![sym("done")])])];
    let output = evaluate(statements).unwrap();
    assert_eq!(output.printed, "a + b42\ndone\n");
}

#[test]
fn restore_discards_program_definitions() {
    init();
    let mut env = Environment::new();
    env.set("outer", 1.into());
    let statements = vec![app("define", vec![sym("x"), 2.into()]),
                          app("define", vec![app("f", vec![sym("n")]), sym("n")])];
    Program::new(statements, Configuration::default()).run(&mut env).unwrap();

    assert!(env.get("x").is_none());
    assert!(!env.registry().contains("f"));
    assert_eq!(env.get("outer"), Some(&Node::from(1)));
    assert_eq!(env.saved(), 0);
}

#[test]
fn preserve_all_keeps_program_definitions() {
    init();
    let mut env = Environment::new();
    let statements = vec![app("define", vec![sym("x"), 2.into()])];
    let program = Program::new(statements, config(ScopePolicy::UseCurrent, RetentionPolicy::PreserveAll));
    program.run(&mut env).unwrap();

    assert_eq!(env.get("x"), Some(&Node::from(2)));
    assert_eq!(env.saved(), 0);
}

#[test]
fn restore_to_base_discards_everything() {
    init();
    let mut env = Environment::new();
    env.set("outer", 1.into());
    let statements = vec![app("define", vec![sym("x"), 2.into()])];
    let program = Program::new(statements, config(ScopePolicy::UseCurrent, RetentionPolicy::RestoreToBase));
    program.run(&mut env).unwrap();

    assert!(env.get("x").is_none());
    assert!(env.get("outer").is_none());
    assert!(env.registry().contains("+"));
    assert_eq!(env.saved(), 0);
}

#[test]
fn use_base_hides_current_definitions() {
    init();
    let mut env = Environment::new();
    env.set("y", 10.into());
    let statements = vec![app("+", vec![sym("y"), 1.into()])];

    let current = Program::new(statements.clone(), Configuration::default()).run(&mut env).unwrap();
    assert_eq!(current.logs[0].output, Node::from(11));

    let base = Program::new(statements, config(ScopePolicy::UseBase, RetentionPolicy::Restore));
    let output = base.run(&mut env).unwrap();
    assert_eq!(output.logs[0].output, app("+", vec![1.into(), sym("y")]));
    assert_eq!(env.get("y"), Some(&Node::from(10)));
}

#[test]
fn failure_still_applies_retention() {
    init();
    let mut env = Environment::new();
    let statements = vec![app("define", vec![sym("x"), 2.into()]),
                          app("/", vec![sym("x"), 0.into()]),
                          app("define", vec![sym("never"), 3.into()])];
    let err = Program::new(statements, Configuration::default()).run(&mut env).unwrap_err();

    assert_eq!(err, RuntimeError::DivisionByZero);
    assert!(env.get("x").is_none());
    assert!(env.get("never").is_none());
    assert_eq!(env.saved(), 0);
}

#[test]
fn program_depth_limit_is_scoped() {
    init();
    let mut env = Environment::new();
    let head = app("spin", vec![sym("x")]);
    let statements = vec![app("define", vec![head.clone(), head]),
                          app("spin", vec![1.into()])];
    let config = Configuration { max_depth: 48,
                                 ..Configuration::default() };
    let program = Program::new(statements, config);

    assert_eq!(program.statements().len(), 2);
    assert_eq!(program.run(&mut env), Err(RuntimeError::RecursionLimit { depth: 48 }));
    assert_eq!(env.max_depth(), 256);
}

#[test]
fn verbose_programs_run_normally() {
    init();
    let mut env = Environment::new();
    let config = Configuration { verbose: true,
                                 ..Configuration::default() };
    let program = Program::new(vec![app("println", vec![app("!", vec![5.into()])])], config);
    assert!(program.config().verbose);
    assert_eq!(program.run(&mut env).unwrap().printed, "120\n");
}

#[test]
fn render_infix_by_precedence() {
    let (a, b, c) = (sym("a"), sym("b"), sym("c"));
    assert_renders(&app("+", vec![a.clone(), app("*", vec![b.clone(), c.clone()])]), "a + b * c");
    assert_renders(&app("*", vec![app("+", vec![a.clone(), b.clone()]), c.clone()]), "(a + b) * c");
    assert_renders(&app("^", vec![app("^", vec![a.clone(), b.clone()]), c.clone()]), "a ^ b ^ c");
    assert_renders(&app("^", vec![a.clone(), app("^", vec![b.clone(), c.clone()])]), "a ^ (b ^ c)");
    assert_renders(&app("+", vec![a.clone(), b.clone(), c.clone()]), "a + b + c");
    assert_renders(&app("==", vec![app("+", vec![a.clone(), 1.into()]), b.clone()]), "a + 1 == b");
}

#[test]
fn render_respects_commutativity() {
    let (a, b, c) = (sym("a"), sym("b"), sym("c"));
    assert_renders(&app("-", vec![a.clone(), app("-", vec![b.clone(), c.clone()])]), "a - (b - c)");
    assert_renders(&app("-", vec![app("-", vec![a.clone(), b.clone()]), c.clone()]), "a - b - c");
    assert_renders(&app("+", vec![a.clone(), app("+", vec![b.clone(), c.clone()])]), "a + b + c");
    assert_renders(&app("+", vec![a.clone(), app("-", vec![b.clone(), c.clone()])]), "a + (b - c)");
    assert_renders(&app("/", vec![a.clone(), app("*", vec![b.clone(), c.clone()])]), "a / (b * c)");
}

#[test]
fn render_unary_operators() {
    let (p, q) = (sym("p"), sym("q"));
    assert_renders(&app("!", vec![5.into()]), "5!");
    assert_renders(&app("not", vec![p.clone()]), "not p");
    assert_renders(&app("not", vec![app("and", vec![p.clone(), q.clone()])]), "not (p and q)");
    assert_renders(&app("-", vec![p.clone()]), "-p");
    assert_renders(&app("*", vec![app("-", vec![p.clone()]), q.clone()]), "(-p) * q");
    assert_renders(&app("negate", vec![p]), "negate(p)");
}

#[test]
fn render_composites() {
    let definition = app("define", vec![app("f", vec![sym("x")]), app("+", vec![sym("x"), 1.into()])]);
    assert_renders(&definition, "f(x) := x + 1");
    assert_renders(&app("f", vec![sym("x"), app("+", vec![sym("y"), 2.into()])]), "f(x, y + 2)");
    assert_renders(&Node::Sequence(vec![1.into(), app("+", vec![sym("a"), sym("b")])]), "{1, a + b}");
    assert_renders(&Node::pair(sym("a"), Node::from(2.5)), "(a : 2.5)");
    assert_renders(&app("and", vec![Node::Boolean(true), sym("p")]), "true and p");
    assert_renders(&app("del", vec![sym("x")]), "del x");
}
