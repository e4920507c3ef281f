use logos::Logos;

/// One token set serves both source dialects: layout files use the
/// keyword and brace tokens, sequence files the chain operators. Both
/// share literals, comments and option markers.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    // Comments and whitespace (skipped)
    #[regex(r"//[^\n]*", logos::skip)]
    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    #[regex(r"[ \t\r\n]+", logos::skip)]
    Comment,

    // Keywords
    #[token("layout")]
    Layout,

    #[token("extends")]
    Extends,

    #[token("states")]
    States,

    #[token("row")]
    Row,

    #[token("key")]
    Key,

    // Operators
    #[token("=>")]
    Arrow,

    #[token("+")]
    Plus,

    #[token("&")]
    Ampersand,

    #[token("=")]
    Equals,

    // Delimiters
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    // Unicode literals
    #[regex(r"[Uu][0-9a-fA-F]{4}", |lex| {
        u32::from_str_radix(&lex.slice()[1..], 16).ok()
    })]
    Unicode(Option<u32>),

    // String literals
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    String(String),

    // Identifiers (key positions, modifier and meaning names)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Options (in comments)
    #[regex(r"@[A-Z_]+", |lex| lex.slice()[1..].to_string())]
    Option(String),

    Error,
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    #[test]
    fn test_layout_tokens() {
        let input = r#"layout "qwerty" { states = [base, shift] }"#;
        let mut lex = Token::lexer(input);

        assert_eq!(lex.next(), Some(Ok(Token::Layout)));
        assert_eq!(lex.next(), Some(Ok(Token::String("qwerty".to_string()))));
        assert_eq!(lex.next(), Some(Ok(Token::LBrace)));
        assert_eq!(lex.next(), Some(Ok(Token::States)));
        assert_eq!(lex.next(), Some(Ok(Token::Equals)));
        assert_eq!(lex.next(), Some(Ok(Token::LBracket)));
        assert_eq!(lex.next(), Some(Ok(Token::Identifier("base".to_string()))));
        assert_eq!(lex.next(), Some(Ok(Token::Comma)));
        assert_eq!(lex.next(), Some(Ok(Token::Identifier("shift".to_string()))));
        assert_eq!(lex.next(), Some(Ok(Token::RBracket)));
        assert_eq!(lex.next(), Some(Ok(Token::RBrace)));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_sequence_tokens() {
        let input = r#"acute + "e" => U00E9"#;
        let mut lex = Token::lexer(input);

        assert_eq!(lex.next(), Some(Ok(Token::Identifier("acute".to_string()))));
        assert_eq!(lex.next(), Some(Ok(Token::Plus)));
        assert_eq!(lex.next(), Some(Ok(Token::String("e".to_string()))));
        assert_eq!(lex.next(), Some(Ok(Token::Arrow)));
        assert_eq!(lex.next(), Some(Ok(Token::Unicode(Some(0x00E9)))));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_state_combination() {
        let input = "shift & fn = 'X'";
        let mut lex = Token::lexer(input);

        assert_eq!(lex.next(), Some(Ok(Token::Identifier("shift".to_string()))));
        assert_eq!(lex.next(), Some(Ok(Token::Ampersand)));
        assert_eq!(lex.next(), Some(Ok(Token::Identifier("fn".to_string()))));
        assert_eq!(lex.next(), Some(Ok(Token::Equals)));
        assert_eq!(lex.next(), Some(Ok(Token::String("X".to_string()))));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_comments_skipped() {
        let input = "// line comment\nrow /* block */ { }";
        let mut lex = Token::lexer(input);

        assert_eq!(lex.next(), Some(Ok(Token::Row)));
        assert_eq!(lex.next(), Some(Ok(Token::LBrace)));
        assert_eq!(lex.next(), Some(Ok(Token::RBrace)));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let input = r#""a\"b""#;
        let mut lex = Token::lexer(input);
        assert_eq!(lex.next(), Some(Ok(Token::String("a\\\"b".to_string()))));
        assert_eq!(lex.next(), None);
    }
}
