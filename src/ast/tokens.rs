#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Integer, optionally negative
    ///
    /// # Examples
    /// ```text
    /// 0
    /// 42
    /// -1
    /// ```
    Integer(i64),

    /// Floating-point number
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -0.5
    /// ```
    Float(f64),

    /// String literal enclosed in single or double quotes
    ///
    /// # Examples
    /// ```text
    /// "first name"
    /// 'b'
    /// ```
    String(String),

    /// Boolean values (`true`, `false`)
    Boolean(bool),

    /// Null value
    Null,

    // Identifiers and References
    /// Field name
    ///
    /// Starts with a letter or underscore, followed by letters, digits,
    /// underscores or dashes.
    ///
    /// # Examples
    /// ```text
    /// store
    /// first_name
    /// content-type
    /// ```
    Identifier(String),

    /// Root document reference (`$`)
    Dollar,

    // Selectors
    /// Field or index step (`.`)
    Dot,

    /// Recursive descent (`..`)
    DotDot,

    /// Wildcard (`*`)
    Star,

    // Logical
    /// Logical AND (`&&` or `and`)
    AndAnd,

    /// Logical OR (`||` or `or`)
    OrOr,

    // Delimiters
    /// Left bracket for computed selectors
    LBracket,

    /// Right bracket
    RBracket,

    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}

impl Token {
    /// Short description used in parse errors.
    pub fn describe(&self) -> String {
        match self {
            Token::Integer(n) => format!("integer {n}"),
            Token::Float(n) => format!("number {n}"),
            Token::String(s) => format!("string \"{s}\""),
            Token::Boolean(b) => format!("'{b}'"),
            Token::Null => "'null'".to_string(),
            Token::Identifier(name) => format!("identifier '{name}'"),
            Token::Dollar => "'$'".to_string(),
            Token::Dot => "'.'".to_string(),
            Token::DotDot => "'..'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::AndAnd => "'&&'".to_string(),
            Token::OrOr => "'||'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}
