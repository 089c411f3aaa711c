//! Event normalization.
//!
//! The [`Normalizer`] receives parser events bottom-up, one at a time, with
//! the results of their sub-productions already substituted as arguments.
//! Each event is dispatched to its handler through an exhaustive match over
//! [`Production`]. Events outside that table pass their first argument
//! through unchanged.

mod assignments;
mod calls;
mod context;
mod control;
mod definitions;
mod expressions;
mod heredoc;
mod literals;
mod patterns;
mod production;
mod strings;
mod value;

pub use context::{Context, Position};
pub use definitions::{method_name, to_parameters};
pub use heredoc::relocate_heredocs;
pub use patterns::to_pattern;
pub use production::Production;
pub use strings::{split_content, split_escapes};
pub use value::Value;

use crate::cst::{Kind, Node};
use crate::diagnostics::ParseDiagnostic;
use crate::{err_msg, CstError};

/// Result of one handler.
pub(crate) type Handled = Result<Value, CstError>;

/// A statement body with a leading empty statement removed.
fn statements(body: Value, what: &str) -> Result<Vec<Node>, CstError> {
    let mut nodes = body.into_nodes(what)?;
    if nodes.first().is_some_and(|first| first.kind() == Kind::EmptyStatement) {
        nodes.remove(0);
    }
    Ok(nodes)
}

/// Assignment targets arrive wrapped in `var_field`; the target is its child.
fn unwrap_var_field(node: Node) -> Option<Node> {
    if node.kind() == Kind::VarField {
        node.into_first_node()
    } else {
        Some(node)
    }
}

/// Converts the argument vector of `production` into exactly `N` values.
fn arity<const N: usize>(production: Production, args: Vec<Value>) -> Result<[Value; N], CstError> {
    let found = args.len();
    args.try_into().map_err(|_| {
        err_msg!(
            Shape,
            "`{}` takes {} argument(s), found {}",
            production.name(),
            N,
            found
        )
    })
}

/// The finished tree and the diagnostics recorded while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub tree: Option<Node>,
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl Normalized {
    /// The tree in S-expression form followed by a newline. An absent tree
    /// renders as the newline alone.
    pub fn render(&self) -> String {
        let mut out = self.tree.as_ref().map(Node::pretty).unwrap_or_default();
        out.push('\n');
        out
    }

    /// Diagnostics, one `line: message` per line, followed by the tree.
    pub fn report(&self) -> String {
        let mut out = String::new();
        for diagnostic in &self.diagnostics {
            out.push_str(&diagnostic.to_string());
            out.push('\n');
        }
        out.push_str(&self.render());
        out
    }
}

#[derive(Debug, Default)]
pub struct Normalizer {
    cx: Context,
    handled: usize,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles one event. `position` and `token` describe the lexer state at
    /// the time the event fired.
    pub fn handle(
        &mut self,
        event: &str,
        args: Vec<Value>,
        position: Position,
        token: Option<String>,
    ) -> Result<Value, CstError> {
        self.cx.enter_event(position, token);
        self.handled += 1;
        match Production::from_name(event) {
            Some(production) => {
                tracing::trace!(event, line = position.line, column = position.column, "dispatch");
                self.dispatch(production, args)
            }
            None => {
                tracing::trace!(event, "pass through");
                Ok(args.into_iter().next().unwrap_or_default())
            }
        }
    }

    /// Completes the run: the root value becomes the tree and heredoc bodies
    /// are relocated.
    pub fn finish(mut self, root: Value) -> Result<Normalized, CstError> {
        let mut tree = root.into_node("root")?;
        if let Some(tree) = tree.as_mut() {
            let dropped = relocate_heredocs(tree);
            if !dropped.is_empty() {
                tracing::warn!(
                    count = dropped.len(),
                    "heredoc bodies outside any statement sequence were dropped"
                );
            }
        }
        tracing::debug!(
            events = self.handled,
            diagnostics = self.cx.diagnostics().len(),
            "normalized"
        );
        Ok(Normalized {
            tree,
            diagnostics: self.cx.take_diagnostics(),
        })
    }

    fn dispatch(&mut self, production: Production, args: Vec<Value>) -> Handled {
        use Production as P;
        let cx = &mut self.cx;
        match production {
            // ---------------------------------------------------------------
            // Scanner tokens
            // ---------------------------------------------------------------
            P::Ident => {
                let [t] = arity::<1>(production, args)?;
                expressions::leaf(Kind::Identifier, t)
            }
            P::Const => {
                let [t] = arity::<1>(production, args)?;
                expressions::leaf(Kind::Constant, t)
            }
            P::Ivar => {
                let [t] = arity::<1>(production, args)?;
                expressions::leaf(Kind::InstanceVariable, t)
            }
            P::Cvar => {
                let [t] = arity::<1>(production, args)?;
                expressions::leaf(Kind::ClassVariable, t)
            }
            P::Gvar | P::Backref => {
                let [t] = arity::<1>(production, args)?;
                expressions::leaf(Kind::GlobalVariable, t)
            }
            P::Backtick => {
                let [t] = arity::<1>(production, args)?;
                expressions::leaf(Kind::Operator, t)
            }
            P::Label => {
                let [t] = arity::<1>(production, args)?;
                expressions::leaf(Kind::HashKeySymbol, t)
            }
            P::Char => {
                let [t] = arity::<1>(production, args)?;
                expressions::leaf(Kind::Character, t)
            }
            P::Kw => {
                let [t] = arity::<1>(production, args)?;
                expressions::kw(cx, t)
            }
            P::Op => {
                let [t] = arity::<1>(production, args)?;
                expressions::op(cx, t)
            }
            P::Rparen => {
                let [_] = arity::<1>(production, args)?;
                expressions::rparen(cx)
            }
            P::Semicolon => {
                let [_] = arity::<1>(production, args)?;
                expressions::semicolon(cx)
            }
            P::EndMarker => {
                let [_] = arity::<1>(production, args)?;
                expressions::end_marker(cx)
            }
            P::TstringContent => {
                let [t] = arity::<1>(production, args)?;
                expressions::pass(t)
            }
            P::MagicComment => {
                let [_, _] = arity::<2>(production, args)?;
                Ok(Value::Nil)
            }
            P::ArgAmbiguous => {
                let [t] = arity::<1>(production, args)?;
                expressions::pass(t)
            }
            P::OperatorAmbiguous => {
                let [t, _] = arity::<2>(production, args)?;
                expressions::pass(t)
            }

            // ---------------------------------------------------------------
            // Numbers
            // ---------------------------------------------------------------
            P::Int => {
                let [t] = arity::<1>(production, args)?;
                literals::int(cx, t)
            }
            P::Float => {
                let [t] = arity::<1>(production, args)?;
                literals::float(cx, t)
            }
            P::Rational => {
                let [t] = arity::<1>(production, args)?;
                literals::rational(cx, t)
            }
            P::Imaginary => {
                let [t] = arity::<1>(production, args)?;
                literals::imaginary(cx, t)
            }

            // ---------------------------------------------------------------
            // Strings, symbols, regexps, word arrays
            // ---------------------------------------------------------------
            P::TstringBeg
            | P::Symbeg
            | P::RegexpBeg
            | P::WordsBeg
            | P::QwordsBeg
            | P::SymbolsBeg
            | P::QsymbolsBeg => {
                let [t] = arity::<1>(production, args)?;
                literals::opener(cx, t)
            }
            P::HeredocBeg => {
                let [t] = arity::<1>(production, args)?;
                literals::heredoc_beg(cx, t)
            }
            P::HeredocDedent => {
                let [_, _] = arity::<2>(production, args)?;
                literals::heredoc_dedent()
            }
            P::StringContent => {
                let [] = arity::<0>(production, args)?;
                literals::string_content(cx)
            }
            P::StringAdd | P::XstringAdd => {
                let [string, part] = arity::<2>(production, args)?;
                literals::string_add(cx, string, part)
            }
            P::StringConcat => {
                let [l, r] = arity::<2>(production, args)?;
                literals::string_concat(l, r)
            }
            P::StringDvar => {
                let [v] = arity::<1>(production, args)?;
                literals::string_dvar(v)
            }
            P::StringEmbexpr => {
                let [s] = arity::<1>(production, args)?;
                literals::string_embexpr(s)
            }
            P::StringLiteral | P::XstringLiteral => {
                let [parts] = arity::<1>(production, args)?;
                literals::string_literal(cx, parts)
            }
            P::XstringNew => {
                let [] = arity::<0>(production, args)?;
                literals::xstring_new(cx)
            }
            P::Symbol => {
                let [c] = arity::<1>(production, args)?;
                literals::symbol(cx, c)
            }
            P::SymbolLiteral => {
                let [c] = arity::<1>(production, args)?;
                literals::symbol_literal(c)
            }
            P::DynaSymbol => {
                let [c] = arity::<1>(production, args)?;
                literals::dyna_symbol(cx, c)
            }
            P::RegexpNew => {
                let [] = arity::<0>(production, args)?;
                literals::regexp_new()
            }
            P::RegexpAdd => {
                let [r, part] = arity::<2>(production, args)?;
                literals::regexp_add(cx, r, part)
            }
            P::RegexpLiteral => {
                let [r, _] = arity::<2>(production, args)?;
                literals::regexp_literal(cx, r)
            }
            P::WordsNew | P::QwordsNew => {
                let [] = arity::<0>(production, args)?;
                literals::word_array(Kind::StringArray)
            }
            P::SymbolsNew | P::QsymbolsNew => {
                let [] = arity::<0>(production, args)?;
                literals::word_array(Kind::SymbolArray)
            }
            P::WordNew => {
                let [] = arity::<0>(production, args)?;
                literals::word_new()
            }
            P::WordAdd => {
                let [w, part] = arity::<2>(production, args)?;
                literals::word_add(cx, w, part)
            }
            P::WordsAdd => {
                let [a, w] = arity::<2>(production, args)?;
                literals::add_word(Kind::BareString, a, w)
            }
            P::SymbolsAdd => {
                let [a, w] = arity::<2>(production, args)?;
                literals::add_word(Kind::BareSymbol, a, w)
            }
            P::QwordsAdd => {
                let [a, c] = arity::<2>(production, args)?;
                literals::add_raw_word(cx, Kind::BareString, a, c)
            }
            P::QsymbolsAdd => {
                let [a, c] = arity::<2>(production, args)?;
                literals::add_raw_word(cx, Kind::BareSymbol, a, c)
            }

            // ---------------------------------------------------------------
            // Arrays and hashes
            // ---------------------------------------------------------------
            P::Array => {
                let [c] = arity::<1>(production, args)?;
                literals::array(cx, c)
            }
            P::Hash => {
                let [a] = arity::<1>(production, args)?;
                literals::hash(a)
            }
            P::AssocNew => {
                let [k, v] = arity::<2>(production, args)?;
                literals::assoc_new(k, v)
            }
            P::AssocSplat => {
                let [c] = arity::<1>(production, args)?;
                literals::assoc_splat(c)
            }
            P::AssoclistFromArgs => {
                let [a] = arity::<1>(production, args)?;
                expressions::pass(a)
            }
            P::BareAssocHash => {
                let [a] = arity::<1>(production, args)?;
                calls::bare_assoc_hash(a)
            }

            // ---------------------------------------------------------------
            // Operators, variables, constants
            // ---------------------------------------------------------------
            P::Binary => {
                let [l, op, r] = arity::<3>(production, args)?;
                expressions::binary(l, op, r)
            }
            P::Unary => {
                let [op, v] = arity::<2>(production, args)?;
                expressions::unary(cx, op, v)
            }
            P::Defined => {
                let [v] = arity::<1>(production, args)?;
                expressions::defined(cx, v)
            }
            P::Paren => {
                let [c] = arity::<1>(production, args)?;
                expressions::paren(cx, c)
            }
            P::Dot2 | P::Dot3 => {
                let [b, e] = arity::<2>(production, args)?;
                expressions::range(b, e)
            }
            P::Ifop => {
                let [p, t, f] = arity::<3>(production, args)?;
                control::ifop(p, t, f)
            }
            P::VarRef | P::Vcall | P::ConstRef => {
                let [v] = arity::<1>(production, args)?;
                expressions::pass(v)
            }
            P::VarField => {
                let [v] = arity::<1>(production, args)?;
                assignments::var_field(v)
            }
            P::ConstPathRef | P::ConstPathField => {
                let [scope, name] = arity::<2>(production, args)?;
                expressions::const_path(scope, name)
            }
            P::TopConstRef | P::TopConstField => {
                let [name] = arity::<1>(production, args)?;
                expressions::top_const(name)
            }
            P::Aref | P::ArefField => {
                let [c, i] = arity::<2>(production, args)?;
                calls::aref(c, i)
            }

            // ---------------------------------------------------------------
            // Assignment
            // ---------------------------------------------------------------
            P::Assign => {
                let [l, r] = arity::<2>(production, args)?;
                assignments::assign(l, r)
            }
            P::Opassign => {
                let [l, op, r] = arity::<3>(production, args)?;
                assignments::opassign(l, op, r)
            }
            P::Massign => {
                let [l, r] = arity::<2>(production, args)?;
                assignments::massign(l, r)
            }
            P::MlhsNew => {
                let [] = arity::<0>(production, args)?;
                assignments::mlhs_new()
            }
            P::MlhsAdd => {
                let [m, p] = arity::<2>(production, args)?;
                assignments::mlhs_add(m, p)
            }
            P::MlhsAddStar => {
                let [m, p] = arity::<2>(production, args)?;
                assignments::mlhs_add_star(m, p)
            }
            P::MlhsAddPost => {
                let [s, p] = arity::<2>(production, args)?;
                assignments::mlhs_add_post(s, p)
            }
            P::MlhsParen => {
                let [c] = arity::<1>(production, args)?;
                assignments::mlhs_paren(c)
            }
            P::MrhsNew => {
                let [] = arity::<0>(production, args)?;
                assignments::mrhs_new()
            }
            P::MrhsNewFromArgs => {
                let [a] = arity::<1>(production, args)?;
                assignments::mrhs_new_from_args(a)
            }
            P::MrhsAdd => {
                let [m, p] = arity::<2>(production, args)?;
                assignments::mrhs_add(m, p)
            }
            P::MrhsAddStar => {
                let [m, p] = arity::<2>(production, args)?;
                assignments::mrhs_add_star(m, p)
            }

            // ---------------------------------------------------------------
            // Calls and arguments
            // ---------------------------------------------------------------
            P::Call => {
                let [r, op, m] = arity::<3>(production, args)?;
                calls::call(r, op, m)
            }
            P::Fcall => {
                let [m] = arity::<1>(production, args)?;
                calls::fcall(m)
            }
            P::Command => {
                let [m, a] = arity::<2>(production, args)?;
                calls::command(m, a)
            }
            P::CommandCall => {
                let [r, op, m, a] = arity::<4>(production, args)?;
                calls::command_call(r, op, m, a)
            }
            P::Field => {
                let [r, op, n] = arity::<3>(production, args)?;
                calls::field(r, op, n)
            }
            P::MethodAddArg => {
                let [m, a] = arity::<2>(production, args)?;
                calls::method_add_arg(m, a)
            }
            P::MethodAddBlock => {
                let [m, b] = arity::<2>(production, args)?;
                calls::method_add_block(m, b)
            }
            P::ArgsNew => {
                let [] = arity::<0>(production, args)?;
                calls::args_new()
            }
            P::ArgsAdd => {
                let [a, v] = arity::<2>(production, args)?;
                calls::args_add(a, v)
            }
            P::ArgsAddBlock => {
                let [a, b] = arity::<2>(production, args)?;
                calls::args_add_block(a, b)
            }
            P::ArgsAddStar => {
                let [a, v] = arity::<2>(production, args)?;
                calls::args_add_star(a, v)
            }
            P::ArgsForward => {
                let [] = arity::<0>(production, args)?;
                calls::args_forward()
            }
            P::ArgParen => {
                let [a] = arity::<1>(production, args)?;
                calls::arg_paren(a)
            }
            P::Super => {
                let [a] = arity::<1>(production, args)?;
                calls::super_(a)
            }
            P::Zsuper => {
                let [] = arity::<0>(production, args)?;
                calls::zsuper()
            }
            P::Yield => {
                let [a] = arity::<1>(production, args)?;
                calls::yield_(a)
            }
            P::Yield0 => {
                let [] = arity::<0>(production, args)?;
                calls::yield0()
            }
            P::Return => {
                let [a] = arity::<1>(production, args)?;
                calls::jump(Kind::Return, a)
            }
            P::Break => {
                let [a] = arity::<1>(production, args)?;
                calls::jump(Kind::Break, a)
            }
            P::Next => {
                let [a] = arity::<1>(production, args)?;
                calls::jump(Kind::Next, a)
            }
            P::Return0 => {
                let [] = arity::<0>(production, args)?;
                calls::return0()
            }
            P::Redo => {
                let [] = arity::<0>(production, args)?;
                Ok(Node::new(Kind::Redo).into())
            }
            P::Retry => {
                let [] = arity::<0>(production, args)?;
                Ok(Node::new(Kind::Retry).into())
            }
            P::BraceBlock => {
                let [v, s] = arity::<2>(production, args)?;
                calls::brace_block(v, s)
            }
            P::DoBlock => {
                let [v, b] = arity::<2>(production, args)?;
                calls::do_block(v, b)
            }
            P::BlockVar => {
                let [p, l] = arity::<2>(production, args)?;
                calls::block_var(p, l)
            }

            // ---------------------------------------------------------------
            // Definitions
            // ---------------------------------------------------------------
            P::Def => {
                let [n, p, b] = arity::<3>(production, args)?;
                definitions::def(n, p, b)
            }
            P::Defs => {
                let [o, op, n, p, b] = arity::<5>(production, args)?;
                definitions::defs(o, op, n, p, b)
            }
            P::Class => {
                let [n, s, b] = arity::<3>(production, args)?;
                definitions::class(n, s, b)
            }
            P::Module => {
                let [n, b] = arity::<2>(production, args)?;
                definitions::module(n, b)
            }
            P::Sclass => {
                let [o, b] = arity::<2>(production, args)?;
                definitions::sclass(o, b)
            }
            P::Params => {
                let [req, opt, rest, post, kw, kwrest, block] = arity::<7>(production, args)?;
                definitions::params(req, opt, rest, post, kw, kwrest, block)
            }
            P::RestParam => {
                let [n] = arity::<1>(production, args)?;
                definitions::rest_param(n)
            }
            P::KwrestParam => {
                let [n] = arity::<1>(production, args)?;
                definitions::kwrest_param(n)
            }
            P::NokwParam => {
                let [_] = arity::<1>(production, args)?;
                definitions::nokw_param()
            }
            P::Blockarg => {
                let [n] = arity::<1>(production, args)?;
                definitions::blockarg(n)
            }
            P::ExcessedComma => {
                let [] = arity::<0>(production, args)?;
                definitions::excessed_comma()
            }
            P::Lambda => {
                let [p, s] = arity::<2>(production, args)?;
                definitions::lambda(cx, p, s)
            }
            P::Alias | P::VarAlias => {
                let [l, r] = arity::<2>(production, args)?;
                definitions::alias(l, r)
            }
            P::Undef => {
                let [m] = arity::<1>(production, args)?;
                definitions::undef(m)
            }

            // ---------------------------------------------------------------
            // Statements and control flow
            // ---------------------------------------------------------------
            P::Program => {
                let [s] = arity::<1>(production, args)?;
                control::program(cx, s)
            }
            P::StmtsNew => {
                let [] = arity::<0>(production, args)?;
                control::stmts_new()
            }
            P::StmtsAdd => {
                let [l, s] = arity::<2>(production, args)?;
                control::stmts_add(cx, l, s)
            }
            P::VoidStmt => {
                let [] = arity::<0>(production, args)?;
                control::void_stmt(cx)
            }
            P::Bodystmt => {
                let [s, r, el, en] = arity::<4>(production, args)?;
                control::bodystmt(cx, s, r, el, en)
            }
            P::Begin => {
                let [s] = arity::<1>(production, args)?;
                control::begin(s)
            }
            P::BeginBlock => {
                let [s] = arity::<1>(production, args)?;
                control::begin_block(s)
            }
            P::EndBlock => {
                let [s] = arity::<1>(production, args)?;
                control::end_block(s)
            }
            P::If => {
                let [p, t, e] = arity::<3>(production, args)?;
                control::if_(p, t, e)
            }
            P::Unless => {
                let [p, t, e] = arity::<3>(production, args)?;
                control::unless(p, t, e)
            }
            P::Elsif => {
                let [p, t, e] = arity::<3>(production, args)?;
                control::elsif(p, t, e)
            }
            P::Else => {
                let [s] = arity::<1>(production, args)?;
                control::else_(s)
            }
            P::IfMod => {
                let [p, s] = arity::<2>(production, args)?;
                control::modifier(Kind::IfModifier, p, s)
            }
            P::UnlessMod => {
                let [p, s] = arity::<2>(production, args)?;
                control::modifier(Kind::UnlessModifier, p, s)
            }
            P::WhileMod => {
                let [p, s] = arity::<2>(production, args)?;
                control::modifier(Kind::WhileModifier, p, s)
            }
            P::UntilMod => {
                let [p, s] = arity::<2>(production, args)?;
                control::modifier(Kind::UntilModifier, p, s)
            }
            P::While => {
                let [p, s] = arity::<2>(production, args)?;
                control::loop_(Kind::While, p, s)
            }
            P::Until => {
                let [p, s] = arity::<2>(production, args)?;
                control::loop_(Kind::Until, p, s)
            }
            P::For => {
                let [i, e, s] = arity::<3>(production, args)?;
                control::for_(i, e, s)
            }
            P::Case => {
                let [s, c] = arity::<2>(production, args)?;
                control::case(s, c)
            }
            P::When => {
                let [p, s, c] = arity::<3>(production, args)?;
                control::when(p, s, c)
            }
            P::Rescue => {
                let [e, v, s, c] = arity::<4>(production, args)?;
                control::rescue(e, v, s, c)
            }
            P::RescueMod => {
                let [s, r] = arity::<2>(production, args)?;
                control::rescue_mod(s, r)
            }
            P::Ensure => {
                let [s] = arity::<1>(production, args)?;
                control::ensure(s)
            }

            // ---------------------------------------------------------------
            // Pattern matching
            // ---------------------------------------------------------------
            P::In => {
                let [p, s, c] = arity::<3>(production, args)?;
                patterns::in_(cx, p, s, c)
            }
            P::Aryptn => {
                let [k, pre, rest, post] = arity::<4>(production, args)?;
                patterns::aryptn(k, pre, rest, post)
            }
            P::Fndptn => {
                let [k, pre, values, post] = arity::<4>(production, args)?;
                patterns::fndptn(k, pre, values, post)
            }
            P::Hshptn => {
                let [k, pairs, rest] = arity::<3>(production, args)?;
                patterns::hshptn(cx, k, pairs, rest)
            }

            // ---------------------------------------------------------------
            // Recovery
            // ---------------------------------------------------------------
            P::ParseError => {
                let [m] = arity::<1>(production, args)?;
                expressions::parse_error(cx, m)
            }
            P::AliasError | P::AssignError | P::ClassNameError | P::ParamError => {
                let [m, node] = arity::<2>(production, args)?;
                expressions::recovered(cx, m, node)
            }
        }
    }
}
