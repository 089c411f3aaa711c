//! The closed set of productions the normalizer handles.
//!
//! Names are Ripper's event names. Anything outside this table follows the
//! default dispatch rule: the first argument passes through unchanged.

macro_rules! productions {
    ($($variant:ident => $name:literal,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Production {
            $($variant,)*
        }

        impl Production {
            pub const ALL: &'static [Production] = &[$(Production::$variant,)*];

            pub fn name(self) -> &'static str {
                match self {
                    $(Production::$variant => $name,)*
                }
            }

            pub fn from_name(name: &str) -> Option<Production> {
                match name {
                    $($name => Some(Production::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

productions! {
    BeginBlock => "BEGIN",
    EndBlock => "END",
    Char => "CHAR",
    EndMarker => "__end__",
    Alias => "alias",
    AliasError => "alias_error",
    Aref => "aref",
    ArefField => "aref_field",
    ArgAmbiguous => "arg_ambiguous",
    ArgParen => "arg_paren",
    ArgsAdd => "args_add",
    ArgsAddBlock => "args_add_block",
    ArgsAddStar => "args_add_star",
    ArgsForward => "args_forward",
    ArgsNew => "args_new",
    Array => "array",
    Aryptn => "aryptn",
    Assign => "assign",
    AssignError => "assign_error",
    AssocNew => "assoc_new",
    AssocSplat => "assoc_splat",
    AssoclistFromArgs => "assoclist_from_args",
    Backref => "backref",
    Backtick => "backtick",
    BareAssocHash => "bare_assoc_hash",
    Begin => "begin",
    Binary => "binary",
    BlockVar => "block_var",
    Blockarg => "blockarg",
    Bodystmt => "bodystmt",
    BraceBlock => "brace_block",
    Break => "break",
    Call => "call",
    Case => "case",
    Class => "class",
    ClassNameError => "class_name_error",
    Command => "command",
    CommandCall => "command_call",
    Const => "const",
    ConstPathField => "const_path_field",
    ConstPathRef => "const_path_ref",
    ConstRef => "const_ref",
    Cvar => "cvar",
    Def => "def",
    Defined => "defined",
    Defs => "defs",
    DoBlock => "do_block",
    Dot2 => "dot2",
    Dot3 => "dot3",
    DynaSymbol => "dyna_symbol",
    Else => "else",
    Elsif => "elsif",
    Ensure => "ensure",
    ExcessedComma => "excessed_comma",
    Fcall => "fcall",
    Field => "field",
    Float => "float",
    Fndptn => "fndptn",
    For => "for",
    Gvar => "gvar",
    Hash => "hash",
    HeredocBeg => "heredoc_beg",
    HeredocDedent => "heredoc_dedent",
    Hshptn => "hshptn",
    Ident => "ident",
    If => "if",
    IfMod => "if_mod",
    Ifop => "ifop",
    Imaginary => "imaginary",
    In => "in",
    Int => "int",
    Ivar => "ivar",
    Kw => "kw",
    KwrestParam => "kwrest_param",
    Label => "label",
    Lambda => "lambda",
    MagicComment => "magic_comment",
    Massign => "massign",
    MethodAddArg => "method_add_arg",
    MethodAddBlock => "method_add_block",
    MlhsAdd => "mlhs_add",
    MlhsAddPost => "mlhs_add_post",
    MlhsAddStar => "mlhs_add_star",
    MlhsNew => "mlhs_new",
    MlhsParen => "mlhs_paren",
    Module => "module",
    MrhsAdd => "mrhs_add",
    MrhsAddStar => "mrhs_add_star",
    MrhsNew => "mrhs_new",
    MrhsNewFromArgs => "mrhs_new_from_args",
    Next => "next",
    NokwParam => "nokw_param",
    Op => "op",
    Opassign => "opassign",
    OperatorAmbiguous => "operator_ambiguous",
    ParamError => "param_error",
    Params => "params",
    Paren => "paren",
    ParseError => "parse_error",
    Program => "program",
    QsymbolsAdd => "qsymbols_add",
    QsymbolsBeg => "qsymbols_beg",
    QsymbolsNew => "qsymbols_new",
    QwordsAdd => "qwords_add",
    QwordsBeg => "qwords_beg",
    QwordsNew => "qwords_new",
    Rational => "rational",
    Redo => "redo",
    RegexpAdd => "regexp_add",
    RegexpBeg => "regexp_beg",
    RegexpLiteral => "regexp_literal",
    RegexpNew => "regexp_new",
    Rescue => "rescue",
    RescueMod => "rescue_mod",
    RestParam => "rest_param",
    Retry => "retry",
    Return => "return",
    Return0 => "return0",
    Rparen => "rparen",
    Sclass => "sclass",
    Semicolon => "semicolon",
    StmtsAdd => "stmts_add",
    StmtsNew => "stmts_new",
    StringAdd => "string_add",
    StringConcat => "string_concat",
    StringContent => "string_content",
    StringDvar => "string_dvar",
    StringEmbexpr => "string_embexpr",
    StringLiteral => "string_literal",
    Super => "super",
    Symbeg => "symbeg",
    Symbol => "symbol",
    SymbolLiteral => "symbol_literal",
    SymbolsAdd => "symbols_add",
    SymbolsBeg => "symbols_beg",
    SymbolsNew => "symbols_new",
    TopConstField => "top_const_field",
    TopConstRef => "top_const_ref",
    TstringBeg => "tstring_beg",
    TstringContent => "tstring_content",
    Unary => "unary",
    Undef => "undef",
    Unless => "unless",
    UnlessMod => "unless_mod",
    Until => "until",
    UntilMod => "until_mod",
    VarAlias => "var_alias",
    VarField => "var_field",
    VarRef => "var_ref",
    Vcall => "vcall",
    VoidStmt => "void_stmt",
    When => "when",
    While => "while",
    WhileMod => "while_mod",
    WordAdd => "word_add",
    WordNew => "word_new",
    WordsAdd => "words_add",
    WordsBeg => "words_beg",
    WordsNew => "words_new",
    XstringAdd => "xstring_add",
    XstringLiteral => "xstring_literal",
    XstringNew => "xstring_new",
    Yield => "yield",
    Yield0 => "yield0",
    Zsuper => "zsuper",
}
