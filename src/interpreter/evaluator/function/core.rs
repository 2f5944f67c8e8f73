use crate::interpreter::{
    evaluator::function::{arithmetic, comparison, logic, meta},
    operation::{
        core::{Precedence, Syntax},
        registry::{Keyword, Registry},
    },
};

/// Defines the built-in keywords by generating a lookup table and a symbol
/// list.
///
/// Each entry provides:
/// - the keyword symbol as written,
/// - the operation it stands for,
/// - its syntax and precedence.
///
/// The macro produces:
/// - `KeywordDef` (internal metadata),
/// - `KEYWORD_TABLE` (static table installed into every registry),
/// - `BUILTIN_KEYWORDS` (public list of keyword symbols).
macro_rules! builtin_keywords {
    (
        $(
            $symbol:literal => {
                operation: $operation:literal,
                syntax: $syntax:ident,
                precedence: $precedence:ident $(,)?
            }
        ),* $(,)?
    ) => {
        struct KeywordDef {
            symbol:     &'static str,
            operation:  &'static str,
            syntax:     Syntax,
            precedence: Precedence,
        }
        static KEYWORD_TABLE: &[KeywordDef] = &[
            $(
                KeywordDef { symbol:     $symbol,
                             operation:  $operation,
                             syntax:     Syntax::$syntax,
                             precedence: Precedence::$precedence },
            )*
        ];
        /// Symbols of every keyword installed by [`install`].
        pub const BUILTIN_KEYWORDS: &[&str] = &[
            $($symbol,)*
        ];
    };
}

builtin_keywords! {
    ":="  => { operation: "define", syntax: Infix,   precedence: Lowest },
    "del" => { operation: "del",    syntax: Prefix,  precedence: Lowest },
    "or"  => { operation: "or",     syntax: Infix,   precedence: Disjunction },
    "xor" => { operation: "xor",    syntax: Infix,   precedence: Disjunction },
    "and" => { operation: "and",    syntax: Infix,   precedence: Conjunction },
    "not" => { operation: "not",    syntax: Prefix,  precedence: Prefix },
    "=="  => { operation: "==",     syntax: Infix,   precedence: Comparison },
    "!="  => { operation: "!=",     syntax: Infix,   precedence: Comparison },
    "<"   => { operation: "<",      syntax: Infix,   precedence: Comparison },
    ">"   => { operation: ">",      syntax: Infix,   precedence: Comparison },
    "<="  => { operation: "<=",     syntax: Infix,   precedence: Comparison },
    ">="  => { operation: ">=",     syntax: Infix,   precedence: Comparison },
    "+"   => { operation: "+",      syntax: Infix,   precedence: Translating },
    "-"   => { operation: "-",      syntax: Infix,   precedence: Translating },
    "*"   => { operation: "*",      syntax: Infix,   precedence: Scaling },
    "/"   => { operation: "/",      syntax: Infix,   precedence: Scaling },
    "%"   => { operation: "%",      syntax: Infix,   precedence: Scaling },
    "^"   => { operation: "^",      syntax: Infix,   precedence: Exponent },
    "!"   => { operation: "!",      syntax: Postfix, precedence: Postfix },
}

/// Installs every built-in operation and keyword into `registry`.
///
/// # Example
/// ```
/// use kelvin::interpreter::{evaluator::function::core::install, operation::registry::Registry};
///
/// let mut registry = Registry::new();
/// install(&mut registry);
/// assert!(registry.is_commutative("+"));
/// assert!(registry.preserves_arguments("define"));
/// assert_eq!(registry.keyword("^").unwrap().operation, "^");
/// ```
pub fn install(registry: &mut Registry) {
    arithmetic::install(registry);
    comparison::install(registry);
    logic::install(registry);
    meta::install(registry);

    for def in KEYWORD_TABLE {
        let keyword = Keyword::new(def.symbol, def.operation, def.syntax, def.precedence);
        if let Err(e) = registry.define_keyword(keyword) {
            log::warn!("skipping built-in keyword: {e}");
        }
    }
}
