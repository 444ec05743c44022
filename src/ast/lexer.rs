use logos::{Lexer, Logos};

/// Lexer state handed to token callbacks. Strings that need unescaping are allocated into the
/// arena so that every token can borrow for the AST's lifetime.
#[derive(Clone)]
pub struct Extras<'a> {
    pub arena: &'a bumpalo::Bump,
}

/// Tokens shared by the query language and the schema definition language.
///
/// Commas are insignificant in GraphQL and are skipped together with whitespace and comments.
#[derive(Logos, Debug, PartialEq)]
#[logos(extras = Extras<'s>)]
pub enum Token<'a> {
    #[token("...")]
    Ellipsis,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(":")]
    Colon,

    #[token("=")]
    Equal,

    #[token("!")]
    Exclam,

    #[token("&")]
    Ampersand,

    #[token("|")]
    Pipe,

    #[regex(r"\$[_a-zA-Z][_0-9a-zA-Z]*", |lex| &lex.slice()[1..])]
    VariableName(&'a str),

    #[regex(r"@[_a-zA-Z][_0-9a-zA-Z]*", |lex| &lex.slice()[1..])]
    DirectiveName(&'a str),

    #[regex(r"[_a-zA-Z][_0-9a-zA-Z]*", |lex| lex.slice())]
    Name(&'a str),

    #[regex(r"-?([1-9][0-9]*|0)[.][0-9]+([eE][+-]?[0-9]+)?")]
    #[regex("-?([1-9][0-9]*|0)[eE][+-]?[0-9]+")]
    Float(&'a str),

    #[regex(r"-?([1-9][0-9]*|0)")]
    Integer(&'a str),

    #[regex(r#"""?"?"#, parse_string)]
    String(&'a str),

    #[error]
    #[regex(r"([\uFEFF ,\t\n\r\f]+|#[^\n\r]*)+", logos::skip)]
    Error,

    /// Token indicates the end of the input
    End,
}

/// Decodes the four hex digits of a `\u` escape.
fn codepoint(digits: &str) -> Option<char> {
    use lexical_core::{parse_with_options, NumberFormatBuilder, ParseIntegerOptions};
    const HEX: u128 = NumberFormatBuilder::hexadecimal();
    const OPTIONS: ParseIntegerOptions = ParseIntegerOptions::new();
    if digits.len() != 4 {
        return None;
    }
    parse_with_options::<u32, HEX>(digits.as_bytes(), &OPTIONS)
        .ok()
        .and_then(char::from_u32)
}

/// Lexes the rest of a quoted string after its opening quote.
///
/// Strings without escape sequences are borrowed from the source. Others are unescaped into the
/// arena.
fn lex_quoted<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    let remainder = lex.remainder();
    let mut unescaped: Option<String> = None;
    let mut chars = remainder.char_indices();
    while let Some((index, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(index + 1);
                return Some(match unescaped {
                    Some(output) => &*lex.extras.arena.alloc_str(&output),
                    None => &remainder[..index],
                });
            }
            '\n' | '\r' => return None,
            '\\' => {
                let output = unescaped.get_or_insert_with(|| remainder[..index].to_string());
                let escaped = match chars.next()?.1 {
                    '"' => '"',
                    '\\' => '\\',
                    '/' => '/',
                    'b' => '\u{8}',
                    'f' => '\u{c}',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'u' => {
                        let from = index + 2;
                        let digits = remainder.get(from..from + 4)?;
                        chars.nth(3)?;
                        codepoint(digits)?
                    }
                    _ => return None,
                };
                output.push(escaped);
            }
            c => {
                if let Some(output) = unescaped.as_mut() {
                    output.push(c);
                }
            }
        }
    }
    None
}

/// Lexes the rest of a block string after its opening `"""` and returns its block string value.
fn lex_block<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    let remainder = lex.remainder();
    let mut offset = 0;
    let end = loop {
        let found = offset + remainder[offset..].find(r#"""""#)?;
        if remainder[..found].ends_with('\\') {
            offset = found + 3;
        } else {
            break found;
        }
    };
    lex.bump(end + 3);
    let raw = remainder[..end].replace(r#"\""""#, r#"""""#);
    Some(lex.extras.arena.alloc_str(&dedent(&raw)))
}

/// Removes the common indentation of all lines but the first, and leading and trailing blank
/// lines.
///
/// [Reference](https://spec.graphql.org/October2021/#BlockStringValue())
fn dedent(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .split("\r\n")
        .flat_map(|line| line.split(['\n', '\r']))
        .collect();
    let is_blank = |line: &&str| line.chars().all(|c| c == ' ' || c == '\t');
    let indent = lines
        .iter()
        .skip(1)
        .filter(|line| !is_blank(line))
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut kept: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(index, &line)| match index {
            0 => line,
            _ => line.get(indent..).unwrap_or(""),
        })
        .collect();
    while kept.first().map_or(false, is_blank) {
        kept.remove(0);
    }
    while kept.last().map_or(false, is_blank) {
        kept.pop();
    }
    kept.join("\n")
}

fn parse_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    match lex.slice() {
        r#""""# => Some(""),
        r#"""""# => lex_block(lex),
        _ => lex_quoted(lex),
    }
}

#[cfg(test)]
mod tests {
    use super::{Extras, Token};
    use bumpalo::Bump;
    use logos::Logos;

    #[test]
    fn empty() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("", Extras { arena: &arena });
        assert_eq!(lex.next(), None);
        let mut lex = Token::lexer_with_extras(",,       # comment\n", Extras { arena: &arena });
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn symbols() {
        let arena = Bump::new();
        let extras = Extras { arena: &arena };
        let mut lex = Token::lexer_with_extras("[]{}()=:!&|...", extras);
        assert_eq!(lex.next(), Some(Token::BracketOpen));
        assert_eq!(lex.next(), Some(Token::BracketClose));
        assert_eq!(lex.next(), Some(Token::BraceOpen));
        assert_eq!(lex.next(), Some(Token::BraceClose));
        assert_eq!(lex.next(), Some(Token::ParenOpen));
        assert_eq!(lex.next(), Some(Token::ParenClose));
        assert_eq!(lex.next(), Some(Token::Equal));
        assert_eq!(lex.next(), Some(Token::Colon));
        assert_eq!(lex.next(), Some(Token::Exclam));
        assert_eq!(lex.next(), Some(Token::Ampersand));
        assert_eq!(lex.next(), Some(Token::Pipe));
        assert_eq!(lex.next(), Some(Token::Ellipsis));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn names() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("hello world", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Name("hello")));
        assert_eq!(lex.next(), Some(Token::Name("world")));
        assert_eq!(lex.next(), None);

        let mut lex = Token::lexer_with_extras("# comment\n hello", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Name("hello")));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn directives_and_variables() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("@skip(if: $hide)", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::DirectiveName("skip")));
        assert_eq!(lex.next(), Some(Token::ParenOpen));
        assert_eq!(lex.next(), Some(Token::Name("if")));
        assert_eq!(lex.next(), Some(Token::Colon));
        assert_eq!(lex.next(), Some(Token::VariableName("hide")));
        assert_eq!(lex.next(), Some(Token::ParenClose));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn commas_are_insignificant() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("a, b,,c", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Name("a")));
        assert_eq!(lex.next(), Some(Token::Name("b")));
        assert_eq!(lex.next(), Some(Token::Name("c")));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn integers() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("1 -1 123 -123 0", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Integer("1")));
        assert_eq!(lex.next(), Some(Token::Integer("-1")));
        assert_eq!(lex.next(), Some(Token::Integer("123")));
        assert_eq!(lex.next(), Some(Token::Integer("-123")));
        assert_eq!(lex.next(), Some(Token::Integer("0")));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn floats() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras(
            "1.0 -10.10 -10.10E10 1.1e-1 1e1 0.0",
            Extras { arena: &arena },
        );
        assert_eq!(lex.next(), Some(Token::Float("1.0")));
        assert_eq!(lex.next(), Some(Token::Float("-10.10")));
        assert_eq!(lex.next(), Some(Token::Float("-10.10E10")));
        assert_eq!(lex.next(), Some(Token::Float("1.1e-1")));
        assert_eq!(lex.next(), Some(Token::Float("1e1")));
        assert_eq!(lex.next(), Some(Token::Float("0.0")));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn strings() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("\"hello world\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("hello world")));
        assert_eq!(lex.next(), None);
        let mut lex = Token::lexer_with_extras("\"\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("")));
        assert_eq!(lex.next(), None);
        let mut lex =
            Token::lexer_with_extras("\"hello \\\" \\n world\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("hello \" \n world")));
        assert_eq!(lex.next(), None);
        let mut lex = Token::lexer_with_extras("\"caf\\u00e9 \\u00E9\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("café é")));
        assert_eq!(lex.next(), None);
        let mut lex = Token::lexer_with_extras("\"\"\"hello block\"\"\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("hello block")));
        assert_eq!(lex.next(), None);
        let mut lex = Token::lexer_with_extras("\"\"\"\"\"\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("")));
        assert_eq!(lex.next(), None);
        let mut lex = Token::lexer_with_extras(
            "\"\"\"\n    hello\r\n      #test\n    \\\"\"\" block\n  \"\"\"",
            Extras { arena: &arena },
        );
        assert_eq!(
            lex.next(),
            Some(Token::String("hello\n  #test\n\"\"\" block"))
        );
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn bad_strings() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("\"\\ \"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Error));
        let mut lex = Token::lexer_with_extras("\"\n\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Error));
        let mut lex = Token::lexer_with_extras("\"\r\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Error));
        let mut lex = Token::lexer_with_extras("\"\\u12\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Error));
        let mut lex = Token::lexer_with_extras("\"unterminated", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Error));
    }
}
