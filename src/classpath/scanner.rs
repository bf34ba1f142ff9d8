//! Top-level type declaration scanner.
//!
//! Secondary lookup needs to know which top-level types a source file
//! declares. This is answered from tokens alone: a `class`, `interface`,
//! `enum` or `record` keyword at brace depth 0 followed by an identifier.

use logos::Logos;
use smol_str::SmolStr;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum DeclToken {
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLit,

    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#)]
    TextBlock,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    CharLit,

    #[token("class")]
    Class,
    #[token("interface")]
    Interface,
    #[token("enum")]
    Enum,
    #[token("record")]
    Record,

    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*")]
    Ident,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(".")]
    Dot,
}

/// Names of the top-level types declared in `source`, in order.
pub fn declared_types(source: &str) -> Vec<SmolStr> {
    let mut lexer = DeclToken::lexer(source);
    let mut names = Vec::new();
    let mut depth = 0usize;
    let mut after_dot = false;
    let mut expecting_name = false;

    while let Some(token) = lexer.next() {
        let Ok(token) = token else {
            after_dot = false;
            expecting_name = false;
            continue;
        };
        match token {
            DeclToken::LineComment | DeclToken::BlockComment => continue,
            DeclToken::LBrace => depth += 1,
            DeclToken::RBrace => depth = depth.saturating_sub(1),
            DeclToken::Class | DeclToken::Interface | DeclToken::Enum | DeclToken::Record => {
                // `Foo.class` literals are not declarations.
                if depth == 0 && !after_dot {
                    expecting_name = true;
                    after_dot = false;
                    continue;
                }
            }
            DeclToken::Ident if expecting_name => names.push(SmolStr::new(lexer.slice())),
            _ => {}
        }
        after_dot = token == DeclToken::Dot;
        expecting_name = false;
    }
    names
}
