use crate::ast::Token;

/// Character offset into the path text.
pub type Position = usize;

/// A malformed token.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message} at position {position}")]
pub struct LexError {
    pub position: Position,
    pub message: String,
}

impl LexError {
    fn new(position: Position, message: impl Into<String>) -> Self {
        LexError {
            position,
            message: message.into(),
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    // `a.0.1` is two index steps, not the float 0.1
    after_dot: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            after_dot: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    let escaped = match self.current_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('"') => '"',
                        Some('\'') => '\'',
                        Some('\\') => '\\',
                        Some('u') => self.read_unicode_escape()?,
                        Some(ch) => {
                            return Err(LexError::new(
                                self.position,
                                format!("invalid escape sequence '\\{ch}'"),
                            ));
                        }
                        None => break,
                    };
                    result.push(escaped);
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::new(start, "unterminated string"))
    }

    /// Reads the four hex digits of `\uXXXX`, leaving the cursor on the last one.
    fn read_unicode_escape(&mut self) -> Result<char, LexError> {
        let start = self.position;
        let digits: String = (1..=4).filter_map(|i| self.peek_char(i)).collect();
        let code = (digits.len() == 4)
            .then(|| u32::from_str_radix(&digits, 16).ok())
            .flatten()
            .and_then(char::from_u32)
            .ok_or_else(|| LexError::new(start, "invalid unicode escape"))?;
        self.position += 4;
        Ok(code)
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut number = String::new();
        let mut is_float = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && !self.after_dot
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let parsed = if is_float {
            number.parse::<f64>().ok().map(Token::Float)
        } else {
            number.parse::<i64>().ok().map(Token::Integer)
        };
        parsed.ok_or_else(|| LexError::new(start, format!("malformed number '{number}'")))
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn double(&mut self, second: char, token: Token) -> Result<Token, LexError> {
        let start = self.position;
        if self.peek_char(1) == Some(second) {
            self.position += 2;
            Ok(token)
        } else {
            Err(LexError::new(start, format!("expected '{second}{second}'")))
        }
    }

    /// Returns the next token with the offset it starts at.
    pub fn next_token(&mut self) -> Result<(Token, Position), LexError> {
        self.skip_whitespace();
        let start = self.position;

        let token = match self.current_char() {
            None => Token::Eof,
            Some('$') => self.single(Token::Dollar),
            Some('*') => self.single(Token::Star),
            Some('[') => self.single(Token::LBracket),
            Some(']') => self.single(Token::RBracket),
            Some('(') => self.single(Token::LParen),
            Some(')') => self.single(Token::RParen),
            Some('.') => {
                if self.peek_char(1) == Some('.') {
                    self.position += 2;
                    Token::DotDot
                } else {
                    self.single(Token::Dot)
                }
            }
            Some('&') => self.double('&', Token::AndAnd)?,
            Some('|') => self.double('|', Token::OrOr)?,
            Some('"') => Token::String(self.read_string('"')?),
            Some('\'') => Token::String(self.read_string('\'')?),
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()?
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number()?,
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();
                match ident.as_str() {
                    "and" => Token::AndAnd,
                    "or" => Token::OrOr,
                    "true" => Token::Boolean(true),
                    "false" => Token::Boolean(false),
                    "null" => Token::Null,
                    _ => Token::Identifier(ident),
                }
            }
            Some(ch) => {
                return Err(LexError::new(start, format!("unexpected character '{ch}'")));
            }
        };

        self.after_dot = token == Token::Dot;
        Ok((token, start))
    }

    /// Lexes the whole input, ending with [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<(Token, Position)>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let (token, position) = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push((token, position));
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("and or true false null");
    assert_eq!(lexer.next_token().unwrap().0, Token::AndAnd);
    assert_eq!(lexer.next_token().unwrap().0, Token::OrOr);
    assert_eq!(lexer.next_token().unwrap().0, Token::Boolean(true));
    assert_eq!(lexer.next_token().unwrap().0, Token::Boolean(false));
    assert_eq!(lexer.next_token().unwrap().0, Token::Null);
}

#[test]
fn test_index_steps_are_not_floats() {
    let tokens = Lexer::new("a.0.1 1.5").tokenize().unwrap();
    let tokens: Vec<Token> = tokens.into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        tokens,
        vec![
            Token::Identifier("a".to_string()),
            Token::Dot,
            Token::Integer(0),
            Token::Dot,
            Token::Integer(1),
            Token::Float(1.5),
            Token::Eof,
        ]
    );
}

#[test]
fn test_path_positions() {
    let tokens = Lexer::new("a..b[-1]").tokenize().unwrap();
    assert_eq!(
        tokens,
        vec![
            (Token::Identifier("a".to_string()), 0),
            (Token::DotDot, 1),
            (Token::Identifier("b".to_string()), 3),
            (Token::LBracket, 4),
            (Token::Integer(-1), 5),
            (Token::RBracket, 7),
            (Token::Eof, 8),
        ]
    );
}
