//! The closed vocabulary of node kinds.
//!
//! Printed names follow tree-sitter-ruby. A handful of kinds (`var_field`,
//! `rest_assignment`, `destructured_left_assignment`, `bare_assoc_hash`) only
//! live while the tree is being built and are unwrapped by an enclosing
//! handler.

use std::fmt;

macro_rules! kinds {
    ($($variant:ident => $name:literal,)*) => {
        /// Every tag a node can carry.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Kind {
            $($variant,)*
        }

        impl Kind {
            /// Returns the printed name of this kind.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Kind::$variant => $name,)*
                }
            }
        }
    };
}

kinds! {
    Alias => "alias",
    AlternativePattern => "alternative_pattern",
    ArgumentList => "argument_list",
    Array => "array",
    ArrayPattern => "array_pattern",
    AsPattern => "as_pattern",
    Assignment => "assignment",
    BareAssocHash => "bare_assoc_hash",
    BareString => "bare_string",
    BareSymbol => "bare_symbol",
    Begin => "begin",
    BeginBlock => "begin_block",
    Binary => "binary",
    Block => "block",
    BlockArgument => "block_argument",
    BlockBody => "block_body",
    BlockParameter => "block_parameter",
    BlockParameters => "block_parameters",
    BodyStatement => "body_statement",
    Break => "break",
    Call => "call",
    Case => "case",
    CaseMatch => "case_match",
    ChainedString => "chained_string",
    Character => "character",
    Class => "class",
    ClassVariable => "class_variable",
    Complex => "complex",
    Conditional => "conditional",
    Constant => "constant",
    DelimitedSymbol => "delimited_symbol",
    DestructuredLeftAssignment => "destructured_left_assignment",
    DestructuredParameter => "destructured_parameter",
    Do => "do",
    DoBlock => "do_block",
    ElementReference => "element_reference",
    Else => "else",
    Elsif => "elsif",
    EmptyStatement => "empty_statement",
    Encoding => "encoding",
    EndBlock => "end_block",
    Ensure => "ensure",
    Error => "error",
    EscapeSequence => "escape_sequence",
    ExceptionVariable => "exception_variable",
    Exceptions => "exceptions",
    ExpressionReferencePattern => "expression_reference_pattern",
    False => "false",
    File => "file",
    FindPattern => "find_pattern",
    Float => "float",
    For => "for",
    ForwardArgument => "forward_argument",
    ForwardParameter => "forward_parameter",
    GlobalVariable => "global_variable",
    Hash => "hash",
    HashKeySymbol => "hash_key_symbol",
    HashPattern => "hash_pattern",
    HashSplatArgument => "hash_splat_argument",
    HashSplatNil => "hash_splat_nil",
    HashSplatParameter => "hash_splat_parameter",
    HeredocBeginning => "heredoc_beginning",
    HeredocBody => "heredoc_body",
    HeredocContent => "heredoc_content",
    HeredocDedent => "heredoc_dedent",
    HeredocEnd => "heredoc_end",
    Identifier => "identifier",
    If => "if",
    IfGuard => "if_guard",
    IfModifier => "if_modifier",
    In => "in",
    InClause => "in_clause",
    InstanceVariable => "instance_variable",
    Integer => "integer",
    Interpolation => "interpolation",
    KeywordParameter => "keyword_parameter",
    KeywordPattern => "keyword_pattern",
    Lambda => "lambda",
    LambdaParameters => "lambda_parameters",
    LeftAssignmentList => "left_assignment_list",
    Line => "line",
    MatchPattern => "match_pattern",
    Method => "method",
    MethodParameters => "method_parameters",
    Module => "module",
    Next => "next",
    Nil => "nil",
    Operator => "operator",
    OperatorAssignment => "operator_assignment",
    OptionalParameter => "optional_parameter",
    Pair => "pair",
    ParenthesizedStatements => "parenthesized_statements",
    Pattern => "pattern",
    Program => "program",
    Range => "range",
    Rational => "rational",
    Redo => "redo",
    Regex => "regex",
    Rescue => "rescue",
    RescueModifier => "rescue_modifier",
    RestAssignment => "rest_assignment",
    Retry => "retry",
    Return => "return",
    RightAssignmentList => "right_assignment_list",
    ScopeResolution => "scope_resolution",
    SelfKw => "self",
    Setter => "setter",
    SimpleSymbol => "simple_symbol",
    SingletonClass => "singleton_class",
    SingletonMethod => "singleton_method",
    SplatArgument => "splat_argument",
    SplatParameter => "splat_parameter",
    String => "string",
    StringArray => "string_array",
    StringContent => "string_content",
    Subshell => "subshell",
    Super => "super",
    Superclass => "superclass",
    SymbolArray => "symbol_array",
    TestPattern => "test_pattern",
    Then => "then",
    True => "true",
    Unary => "unary",
    Undef => "undef",
    Uninterpreted => "uninterpreted",
    Unless => "unless",
    UnlessGuard => "unless_guard",
    UnlessModifier => "unless_modifier",
    Until => "until",
    UntilModifier => "until_modifier",
    VarField => "var_field",
    VariableReferencePattern => "variable_reference_pattern",
    When => "when",
    While => "while",
    WhileModifier => "while_modifier",
    Yield => "yield",
}

impl Kind {
    /// Kinds whose children are a statement sequence. Relocated heredoc
    /// bodies come to rest inside these.
    pub fn is_statement_sequence(self) -> bool {
        matches!(
            self,
            Kind::Program
                | Kind::Method
                | Kind::DoBlock
                | Kind::Do
                | Kind::SingletonMethod
                | Kind::Class
                | Kind::Module
                | Kind::SingletonClass
                | Kind::Block
                | Kind::Begin
                | Kind::Else
                | Kind::Elsif
                | Kind::Then
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printed_names() {
        assert_eq!(Kind::SelfKw.to_string(), "self");
        assert_eq!(Kind::HeredocBody.as_str(), "heredoc_body");
        assert_eq!(Kind::AlternativePattern.as_str(), "alternative_pattern");
    }

    #[test]
    fn test_statement_sequences() {
        assert!(Kind::Program.is_statement_sequence());
        assert!(Kind::Then.is_statement_sequence());
        assert!(!Kind::BodyStatement.is_statement_sequence());
        assert!(!Kind::BlockBody.is_statement_sequence());
    }
}
