//! Lexer for the diagram text format.

use logos::Logos;

/// Tokens of the diagram text format.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    #[token("graph")]
    Graph,

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<usize>().ok())]
    Id(usize),

    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    StringLiteral(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    #[token("--")]
    EdgeOp,

    #[token("=")]
    Eq,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Graph => write!(f, "graph"),
            Token::Id(id) => write!(f, "{id}"),
            Token::StringLiteral(s) => write!(f, "\"{s}\""),
            Token::Identifier(s) => write!(f, "{s}"),
            Token::EdgeOp => write!(f, "--"),
            Token::Eq => write!(f, "="),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
        }
    }
}

/// A token with its span information.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize a diagram file.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken, (std::ops::Range<usize>, String)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        if let Ok(token) = result {
            tokens.push(Ok(SpannedToken { token, span }));
        } else {
            let slice = &source[span.clone()];
            tokens.push(Err((span, format!("Invalid token: '{slice}'"))));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .filter_map(Result::ok)
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_vertex_line() {
        let toks = tokens(r#"12 [color=green, label="12:1/3", pos="-1.2,3!"]"#);
        assert_eq!(toks[0], Token::Id(12));
        assert_eq!(toks[1], Token::LBracket);
        assert!(matches!(toks[2], Token::Identifier(ref s) if s == "color"));
        assert_eq!(toks[3], Token::Eq);
        assert!(matches!(toks[4], Token::Identifier(ref s) if s == "green"));
        assert!(matches!(toks[8], Token::StringLiteral(ref s) if s == "12:1/3"));
        assert!(matches!(toks[12], Token::StringLiteral(ref s) if s == "-1.2,3!"));
        assert_eq!(toks[13], Token::RBracket);
    }

    #[test]
    fn test_edge_line() {
        let toks = tokens("3 -- 7 [color=blue]");
        assert_eq!(toks[0], Token::Id(3));
        assert_eq!(toks[1], Token::EdgeOp);
        assert_eq!(toks[2], Token::Id(7));
    }

    #[test]
    fn test_invalid_token() {
        assert!(tokenize("3 -> 7").iter().any(Result::is_err));
    }
}
