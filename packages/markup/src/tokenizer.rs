use logos::Logos;
use std::ops::Range;

/// Top-level markup tokens.
///
/// A whole open tag (name plus attributes) is one token; its inside is split
/// further by [`TagToken`]. A `<` that does not start a tag falls back to
/// [`Token::Lt`] and is treated as text by the parser.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'src> {
    #[regex(r"<!--([^-]|-[^-]|--+[^->])*-*-->", |lex| lex.slice())]
    Comment(&'src str),

    #[regex(r"<![dD][oO][cC][tT][yY][pP][eE][^>]*>", |lex| lex.slice())]
    Doctype(&'src str),

    #[regex(
        r#"<[a-zA-Z][a-zA-Z0-9:_-]*(\s+[^\s"'<>/=]+(\s*=\s*("[^"]*"|'[^']*'|[^\s"'<>=`]+))?)*\s*/?>"#,
        |lex| lex.slice()
    )]
    OpenTag(&'src str),

    #[regex(r"</[a-zA-Z][a-zA-Z0-9:_-]*\s*>", |lex| lex.slice())]
    CloseTag(&'src str),

    #[token("<")]
    Lt,

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),
}

/// Tokens inside an open tag, between the `<` and the closing `>` / `/>`
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"\s+")]
pub enum TagToken<'src> {
    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#, |lex| unquote(lex.slice()))]
    #[regex(r"'[^']*'", |lex| unquote(lex.slice()))]
    Quoted(&'src str),

    #[regex(r#"[^\s"'<>=`]+"#, |lex| lex.slice())]
    Word(&'src str),
}

fn unquote(slice: &str) -> &str {
    &slice[1..slice.len() - 1]
}

/// Tokenize markup source. Never fails: anything the lexer rejects is
/// returned as text.
pub fn tokenize(source: &str) -> Vec<(Token<'_>, Range<usize>)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => tokens.push((Token::Text(lexer.slice()), span)),
        }
    }

    tokens
}

/// Split the inside of an open tag into tag-level tokens.
/// Unlexable bytes are skipped.
pub fn tokenize_tag(inner: &str) -> Vec<TagToken<'_>> {
    TagToken::lexer(inner).filter_map(Result::ok).collect()
}
