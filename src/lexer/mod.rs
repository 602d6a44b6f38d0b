//! Tokenizing the advanced query language (`spec.md` §4.1).

mod span;
mod tokenizer;

pub use span::Span;
pub use tokenizer::Lexer;

/// Reserved words of the query language. Matched case-insensitively,
/// like identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    And,
    Or,
    Not,
    Null,
}

impl Keyword {
    /// Matches `text` against the keyword set, case-insensitively.
    #[must_use]
    pub fn from_str(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "not" => Some(Self::Not),
            "null" => Some(Self::Null),
            _ => None,
        }
    }
}

/// The kind of token produced by the [`Lexer`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A reserved word.
    Keyword(Keyword),
    /// A bare identifier (variable name, or RHS bare value).
    Identifier(String),
    /// A double-quoted string literal, already unescaped.
    String(String),
    /// The exact source text of a numeric literal (integer or float).
    Number(String),
    /// The exact source text of a date or datetime literal
    /// (`YYYY-MM-DD` optionally followed by a time-of-day).
    DateLiteral(String),
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `:`
    Colon,
    /// `!:`
    NotColon,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `=<`
    EqLt,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `=>`
    EqGt,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// End of input.
    Eof,
    /// A lexical error, carrying a human-readable description.
    Error(String),
}

impl TokenKind {
    /// Whether this token is [`TokenKind::Eof`].
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}

/// A single lexed token together with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The source span it occupies.
    pub span: Span,
}

impl Token {
    /// Builds a token from a kind and span.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Whether this token is [`TokenKind::Eof`].
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.kind.is_eof()
    }
}
