// tests/lexer_tests.rs

use jsonpath_eval::ast::Token;
use jsonpath_eval::lexer::{LexError, Lexer};

fn tokens(input: &str) -> Vec<Token> {
    Lexer::new(input)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

fn lex_error(input: &str) -> LexError {
    Lexer::new(input).tokenize().unwrap_err()
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("$", Token::Dollar),
        ("*", Token::Star),
        ("(", Token::LParen),
        (")", Token::RParen),
        ("[", Token::LBracket),
        ("]", Token::RBracket),
        (".", Token::Dot),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let (token, position) = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(position, 0);
        assert_eq!(lexer.next_token().unwrap().0, Token::Eof);
    }
}

// ============================================================================
// Multi Character Tokens
// ============================================================================

#[test]
fn test_multi_char_tokens() {
    let test_cases = vec![
        ("..", Token::DotDot),
        ("&&", Token::AndAnd),
        ("||", Token::OrOr),
        ("and", Token::AndAnd),
        ("or", Token::OrOr),
    ];

    for (input, expected) in test_cases {
        assert_eq!(tokens(input), vec![expected, Token::Eof], "Failed for input: {}", input);
    }
}

#[test]
fn test_triple_dot_is_descent_then_dot() {
    assert_eq!(tokens("..."), vec![Token::DotDot, Token::Dot, Token::Eof]);
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numbers() {
    assert_eq!(tokens("42"), vec![Token::Integer(42), Token::Eof]);
    assert_eq!(tokens("-7"), vec![Token::Integer(-7), Token::Eof]);
    assert_eq!(tokens("3.25"), vec![Token::Float(3.25), Token::Eof]);
    assert_eq!(tokens("-0.5"), vec![Token::Float(-0.5), Token::Eof]);
}

#[test]
fn test_integer_overflow_is_malformed() {
    let err = lex_error("99999999999999999999");
    assert_eq!(err.position, 0);
    assert!(err.message.starts_with("malformed number"));
}

#[test]
fn test_strings() {
    assert_eq!(tokens("\"hello\""), vec![Token::String("hello".into()), Token::Eof]);
    assert_eq!(tokens("'it''s'"), vec![
        Token::String("it".into()),
        Token::String("s".into()),
        Token::Eof
    ]);
    assert_eq!(tokens(r#""a\"b""#), vec![Token::String("a\"b".into()), Token::Eof]);
    assert_eq!(tokens(r#"'A\t'"#), vec![Token::String("A\t".into()), Token::Eof]);
}

#[test]
fn test_keywords_are_not_identifiers() {
    assert_eq!(
        tokens("true false null truth"),
        vec![
            Token::Boolean(true),
            Token::Boolean(false),
            Token::Null,
            Token::Identifier("truth".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_identifiers() {
    assert_eq!(
        tokens("first_name content-type _x"),
        vec![
            Token::Identifier("first_name".into()),
            Token::Identifier("content-type".into()),
            Token::Identifier("_x".into()),
            Token::Eof,
        ]
    );
}

// ============================================================================
// Paths
// ============================================================================

#[test]
fn test_full_path() {
    assert_eq!(
        tokens("$.store.book[*].author"),
        vec![
            Token::Dollar,
            Token::Dot,
            Token::Identifier("store".into()),
            Token::Dot,
            Token::Identifier("book".into()),
            Token::LBracket,
            Token::Star,
            Token::RBracket,
            Token::Dot,
            Token::Identifier("author".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_negative_dotted_index() {
    assert_eq!(
        tokens("a.-1.b"),
        vec![
            Token::Identifier("a".into()),
            Token::Dot,
            Token::Integer(-1),
            Token::Dot,
            Token::Identifier("b".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_positions_skip_whitespace() {
    let positioned = Lexer::new("  a  &&  b").tokenize().unwrap();
    let positions: Vec<usize> = positioned.iter().map(|(_, p)| *p).collect();
    assert_eq!(positions, vec![2, 5, 9, 10]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unexpected_character() {
    let err = lex_error("a ? b");
    assert_eq!(err, LexError { position: 2, message: "unexpected character '?'".into() });
    assert_eq!(err.to_string(), "unexpected character '?' at position 2");
}

#[test]
fn test_single_ampersand() {
    let err = lex_error("a & b");
    assert_eq!(err.position, 2);
    assert_eq!(err.message, "expected '&&'");
}

#[test]
fn test_unterminated_string() {
    let err = lex_error("a['b");
    assert_eq!(err.position, 2);
    assert_eq!(err.message, "unterminated string");
}

#[test]
fn test_invalid_escape() {
    let err = lex_error(r#""a\qb""#);
    assert_eq!(err.position, 3);
    assert_eq!(err.message, "invalid escape sequence '\\q'");
}

#[test]
fn test_invalid_unicode_escape() {
    let err = lex_error(r#""\u12""#);
    assert_eq!(err.message, "invalid unicode escape");
}
