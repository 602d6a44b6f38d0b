//! Query language parser implementation.

use super::error::ParseError;
use crate::ast::{Expr, Op, RawValue};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// Parses advanced query-language source text into an [`Expr`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
        }
    }

    /// Parses the whole input as a single expression.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the input is not well-formed, or if
    /// trailing tokens remain after a complete expression.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Eof) {
            return Ok(Expr::True);
        }
        let expr = self.parse_or_expr()?;
        if !self.check(&TokenKind::Eof) {
            return Err(ParseError::unexpected(
                "end of input",
                self.current.kind.clone(),
                self.current.span,
            ));
        }
        Ok(expr)
    }

    fn parse_or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut children = vec![self.parse_and_expr()?];
        while self.check_keyword(Keyword::Or) {
            self.advance();
            children.push(self.parse_and_expr()?);
        }
        Ok(Expr::or(children))
    }

    fn parse_and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut children = vec![self.parse_not_expr()?];
        while self.check_keyword(Keyword::And) {
            self.advance();
            children.push(self.parse_not_expr()?);
        }
        Ok(Expr::and(children))
    }

    fn parse_not_expr(&mut self) -> Result<Expr, ParseError> {
        if self.check_keyword(Keyword::Not) {
            self.advance();
            let inner = self.parse_not_expr()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            let expr = self.parse_or_expr()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(expr);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let variable = self.expect_identifier()?;
        let op = self.expect_operator()?;
        let value = self.parse_rhs()?;
        Ok(Expr::leaf(variable, op, value))
    }

    fn parse_rhs(&mut self) -> Result<RawValue, ParseError> {
        let value = match &self.current.kind {
            TokenKind::String(s) => RawValue::Str(s.clone()),
            TokenKind::Number(s) => RawValue::Number(s.clone()),
            TokenKind::DateLiteral(s) => RawValue::Date(s.clone()),
            TokenKind::Identifier(s) => RawValue::Ident(s.clone()),
            TokenKind::Keyword(Keyword::Null) => RawValue::Null,
            _ => {
                return Err(ParseError::unexpected(
                    "a value",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };
        self.advance();
        Ok(value)
    }

    fn expect_operator(&mut self) -> Result<Op, ParseError> {
        let op = match &self.current.kind {
            TokenKind::Eq => Op::Eq,
            TokenKind::NotEq => Op::NotEq,
            TokenKind::Colon => Op::Contains,
            TokenKind::NotColon => Op::NotContains,
            TokenKind::Lt => Op::Lt,
            TokenKind::LtEq | TokenKind::EqLt => Op::Le,
            TokenKind::Gt => Op::Gt,
            TokenKind::GtEq | TokenKind::EqGt => Op::Ge,
            _ => {
                return Err(ParseError::unexpected(
                    "a comparison operator",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };
        self.advance();
        Ok(op)
    }

    // --- Helper methods ---

    fn advance(&mut self) {
        self.previous = std::mem::replace(&mut self.current, self.lexer.next_token());
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                format!("{kind:?}"),
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            TokenKind::Eof => Err(ParseError::unexpected_eof(
                "a variable name",
                self.current.span,
            )),
            _ => Err(ParseError::unexpected(
                "a variable name",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }
}
