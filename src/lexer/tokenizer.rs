//! Query language tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};

/// A lexer that tokenizes query-language input.
pub struct Lexer<'a> {
    /// The input source text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace. The query language has no comment syntax.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        Keyword::from_str(text).map_or_else(
            || self.make_token(TokenKind::Identifier(text.to_string())),
            |keyword| self.make_token(TokenKind::Keyword(keyword)),
        )
    }

    /// Scans a double-quoted string literal, unescaping `\"` and `\\`.
    fn scan_string(&mut self) -> Token {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.peek() {
                Some('"') => break,
                Some('\\') if matches!(self.peek_next(), Some('"') | Some('\\')) => {
                    self.advance();
                    if let Some(c) = self.advance() {
                        value.push(c);
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => {
                    return self.make_token(TokenKind::Error(
                        "unterminated string literal".to_string(),
                    ));
                }
            }
        }

        self.advance(); // consume closing quote
        self.make_token(TokenKind::String(value))
    }

    /// Scans a digit run. Used both for plain numbers and as the
    /// first component of a possible date literal.
    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Looks ahead (without consuming) for the `-DD` pattern that
    /// continues a date literal.
    fn looks_like_date_continuation(&self) -> bool {
        self.peek() == Some('-') && self.peek_next().is_some_and(|c| c.is_ascii_digit())
    }

    /// Scans a numeric literal, a date literal (`YYYY-MM-DD`), or a
    /// datetime literal (`YYYY-MM-DD HH:MM[:SS]`). Unlike a SQL
    /// lexer, the exact source text is kept rather than eagerly
    /// parsed: the final type depends on the schema, not the syntax.
    fn scan_number_or_date(&mut self) -> Token {
        self.consume_digits();

        if self.looks_like_date_continuation() {
            self.advance(); // '-'
            self.consume_digits();
            if self.looks_like_date_continuation() {
                self.advance(); // '-'
                self.consume_digits();
            }
            // Optional time-of-day: a single space followed by digits.
            if self.peek() == Some(' ') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
                self.advance(); // ' '
                self.consume_digits();
                if self.peek() == Some(':') {
                    self.advance();
                    self.consume_digits();
                    if self.peek() == Some(':') {
                        self.advance();
                        self.consume_digits();
                    }
                }
            }
            let text = &self.input[self.start..self.pos];
            return self.make_token(TokenKind::DateLiteral(text.to_string()));
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // '.'
            self.consume_digits();
        }

        let text = &self.input[self.start..self.pos];
        self.make_token(TokenKind::Number(text.to_string()))
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '=' => {
                if self.peek() == Some('<') {
                    self.advance();
                    self.make_token(TokenKind::EqLt)
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_token(TokenKind::EqGt)
                } else {
                    self.make_token(TokenKind::Eq)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else if self.peek() == Some(':') {
                    self.advance();
                    self.make_token(TokenKind::NotColon)
                } else {
                    self.make_token(TokenKind::Error(format!("unexpected character: {c}")))
                }
            }
            ':' => self.make_token(TokenKind::Colon),
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::LtEq)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::GtEq)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '"' => {
                self.pos = self.start;
                self.scan_string()
            }
            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number_or_date()
            }
            c if c.is_alphabetic() || c == '_' => {
                self.pos = self.start;
                self.scan_identifier()
            }
            _ => self.make_token(TokenKind::Error(format!("unexpected character: {c}"))),
        }
    }

    /// Tokenizes the entire input and returns all tokens, including a
    /// trailing [`TokenKind::Eof`].
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
