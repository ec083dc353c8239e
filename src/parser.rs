use std::mem;

use crate::{
    ast::{BoolOp, Expr, Token},
    lexer::{LexError, Lexer, Position},
    node::Node,
};

/// How deep parentheses and bracket keys may nest.
pub const MAX_NESTING: usize = 256;

/// A path that does not follow the grammar.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected} but found {found} at position {position}")]
    UnexpectedToken {
        position: Position,
        expected: &'static str,
        found: String,
    },

    #[error("expression nested deeper than {limit} levels at position {position}")]
    TooDeep { position: Position, limit: usize },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position,
            ParseError::UnexpectedToken { position, .. }
            | ParseError::TooDeep { position, .. } => *position,
        }
    }
}

/// Recursive-descent parser for path expressions.
///
/// ```text
/// expr    := and (("||" | "or") and)*
/// and     := path (("&&" | "and") path)*
/// path    := primary step*
/// primary := "$" | ident | "*" | ".." ident? | literal | "(" expr ")"
/// step    := "." ident | "." int | "." "*" | ".." ident?
///          | "[" "*" "]" | "[" ident "]" | "[" expr "]"
/// ```
pub struct Parser {
    tokens: Vec<(Token, Position)>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Result<Self, ParseError> {
        Ok(Parser {
            tokens: lexer.tokenize()?,
            cursor: 0,
            depth: 0,
        })
    }

    /// Parses the whole input as one expression.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_or()?;
        if !self.check(&Token::Eof) {
            return Err(self.unexpected("end of input"));
        }
        Ok(expr)
    }

    fn current(&self) -> &Token {
        // tokenize() always ends with Eof and the cursor never moves past it
        &self.tokens[self.cursor.min(self.tokens.len() - 1)].0
    }

    fn position(&self) -> Position {
        self.tokens[self.cursor.min(self.tokens.len() - 1)].1
    }

    fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.cursor + offset).min(last)].0
    }

    fn advance(&mut self) {
        if self.cursor < self.tokens.len() - 1 {
            self.cursor += 1;
        }
    }

    /// Takes the current token, leaving `Eof` in its slot.
    fn take(&mut self) -> Token {
        let last = self.tokens.len() - 1;
        let token = mem::replace(&mut self.tokens[self.cursor.min(last)].0, Token::Eof);
        self.advance();
        token
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(self.current()) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(description));
        }
        self.advance();
        Ok(())
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            position: self.position(),
            expected,
            found: self.current().describe(),
        }
    }

    /// Entry point for every nested expression, so the depth is checked here
    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooDeep {
                position: self.position(),
                limit: MAX_NESTING,
            });
        }
        self.depth += 1;
        let expr = self.parse_disjunction();
        self.depth -= 1;
        expr
    }

    fn parse_disjunction(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.check(&Token::OrOr) {
            let position = self.position();
            self.advance();
            let right = self.parse_and()?;
            left = Expr::boolean(position, BoolOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_path()?;
        while self.check(&Token::AndAnd) {
            let position = self.position();
            self.advance();
            let right = self.parse_path()?;
            left = Expr::boolean(position, BoolOp::And, left, right);
        }
        Ok(left)
    }

    /// Parse a primary expression followed by any number of selector steps
    fn parse_path(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            let position = self.position();
            match self.current() {
                Token::Dot => {
                    self.advance();
                    expr = match self.current() {
                        Token::Identifier(_) | Token::String(_) => {
                            let name = self.take_name().unwrap_or_default();
                            Expr::field(position, expr, name)
                        }
                        Token::Integer(n) => {
                            let n = *n;
                            self.advance();
                            Expr::index(position, expr, n)
                        }
                        Token::Star => {
                            self.advance();
                            Expr::wildcard(position, expr)
                        }
                        _ => return Err(self.unexpected("field name, index or '*' after '.'")),
                    };
                }
                Token::DotDot => {
                    self.advance();
                    expr = self.parse_descent(position, expr);
                }
                Token::LBracket => {
                    self.advance();
                    expr = self.parse_bracket(position, expr)?;
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Consumes an identifier or quoted name, if that is the current token.
    fn take_name(&mut self) -> Option<String> {
        match self.current() {
            Token::Identifier(_) | Token::String(_) => match self.take() {
                Token::Identifier(name) | Token::String(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    fn parse_descent(&mut self, position: Position, object: Expr) -> Expr {
        let field = self.take_name();
        Expr::descent(position, object, field)
    }

    fn parse_bracket(&mut self, position: Position, object: Expr) -> Result<Expr, ParseError> {
        // Inside brackets, we can have:
        // 1. * -> wildcard
        // 2. identifier -> field name
        // 3. any expression -> computed key or index
        let expr = match (self.current(), self.peek(1)) {
            (Token::Star, Token::RBracket) => {
                self.advance();
                Expr::wildcard(position, object)
            }
            (Token::Identifier(_), Token::RBracket) => {
                let name = self.take_name().unwrap_or_default();
                Expr::field(position, object, name)
            }
            _ => {
                let key = self.parse_or()?;
                Expr::field_expr(position, object, key)
            }
        };
        self.expect(Token::RBracket, "']'")?;
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let position = self.position();
        let expr = match self.take() {
            // Literals
            Token::Integer(n) => Expr::literal(position, Node::Integer(n)),
            Token::Float(n) => Expr::literal(position, Node::Float(n)),
            Token::String(s) => Expr::literal(position, Node::String(s)),
            Token::Boolean(b) => Expr::literal(position, Node::Boolean(b)),
            Token::Null => Expr::literal(position, Node::Null),

            // Paths starting at the root
            Token::Dollar => Expr::root(position),
            Token::Identifier(name) => Expr::field(position, Expr::root(position), name),
            Token::Star => Expr::wildcard(position, Expr::root(position)),
            Token::DotDot => self.parse_descent(position, Expr::root(position)),

            Token::LParen => {
                let expr = self.parse_or()?;
                self.expect(Token::RParen, "')'")?;
                expr
            }

            other => {
                return Err(ParseError::UnexpectedToken {
                    position,
                    expected: "path or literal",
                    found: other.describe(),
                });
            }
        };
        Ok(expr)
    }
}

/// Parses path text into an expression tree.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    Parser::new(Lexer::new(input))?.parse()
}
