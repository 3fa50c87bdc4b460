//! Tokenizer for schema source text.
//!
//! The lexer turns text into a flat list of [`Token`]s, each carrying its
//! 1-based line and column and a byte [`Span`]. Newlines and comments are
//! emitted as tokens; the parser filters them. The stream always ends with
//! exactly one [`TokenKind::Eof`].
//!
//! Characters that start no token are skipped with a warning. A strict
//! lexer reports the first one as [`SchemaError::LexError`] instead.

use tracing::{debug, warn};

use crate::ast::Span;
use crate::error::{SchemaError, SchemaResult};

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier such as a model, field or type name.
    Identifier,
    /// Single or double quoted string. The token text is the unquoted content.
    String,
    /// Numeric literal, optionally negative or fractional.
    Number,
    /// `true` or `false`.
    Boolean,
    /// `model` keyword.
    Model,
    /// `enum` keyword.
    Enum,
    /// `datasource` keyword.
    Datasource,
    /// `generator` keyword.
    Generator,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `@`
    At,
    /// `@@`
    AtAt,
    /// `?`
    Question,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `=`
    Equals,
    /// `.`
    Dot,
    /// `///` comment. The token text is the trimmed comment body.
    DocComment,
    /// `//` comment. The token text is the trimmed comment body.
    Comment,
    /// A line break.
    Newline,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Human readable description used in syntax errors.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Model => "'model'",
            Self::Enum => "'enum'",
            Self::Datasource => "'datasource'",
            Self::Generator => "'generator'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::At => "'@'",
            Self::AtAt => "'@@'",
            Self::Question => "'?'",
            Self::Colon => "':'",
            Self::Comma => "','",
            Self::Equals => "'='",
            Self::Dot => "'.'",
            Self::DocComment => "doc comment",
            Self::Comment => "comment",
            Self::Newline => "newline",
            Self::Eof => "end of input",
        }
    }

    /// Newlines and plain comments carry no grammar meaning.
    pub fn is_trivia(&self) -> bool {
        matches!(self, Self::Newline | Self::Comment)
    }

    /// Keywords double as identifiers outside of top-level position.
    pub fn is_word(&self) -> bool {
        matches!(
            self,
            Self::Identifier | Self::Model | Self::Enum | Self::Datasource | Self::Generator
        )
    }

    fn keyword(word: &str) -> Self {
        const KEYWORDS: [(&str, TokenKind); 6] = [
            ("model", TokenKind::Model),
            ("enum", TokenKind::Enum),
            ("datasource", TokenKind::Datasource),
            ("generator", TokenKind::Generator),
            ("true", TokenKind::Boolean),
            ("false", TokenKind::Boolean),
        ];

        KEYWORDS
            .iter()
            .find(|(kw, _)| kw.eq_ignore_ascii_case(word))
            .map(|(_, kind)| *kind)
            .unwrap_or(Self::Identifier)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its text and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Literal text (unquoted for strings, trimmed body for comments).
    pub text: String,
    /// 1-based line of the first character.
    pub line: u32,
    /// 1-based column of the first character.
    pub column: u32,
    /// Byte range in the source.
    pub span: Span,
}

impl Token {
    /// Check the token kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// A character the lexer could not use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Skipped {
    character: char,
    offset: usize,
    line: u32,
    column: u32,
}

/// Hand-written scanner over schema source text.
#[derive(Debug)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    strict: bool,
    skipped: Vec<Skipped>,
}

impl<'a> Lexer<'a> {
    /// Create a permissive lexer over `src`.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
            strict: false,
            skipped: Vec::new(),
        }
    }

    /// Report unknown characters as errors instead of skipping them.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Tokenize the whole input.
    ///
    /// Only fails in strict mode, on the first character that starts no token.
    pub fn tokenize(mut self) -> SchemaResult<Vec<Token>> {
        let tokens = self.scan();

        if self.strict {
            if let Some(first) = self.skipped.first() {
                return Err(SchemaError::lex(
                    self.src,
                    first.offset,
                    first.character,
                    first.line,
                    first.column,
                ));
            }
        }

        Ok(tokens)
    }

    fn scan(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(c) = self.current() {
            if c != '\n' && c.is_whitespace() {
                self.bump();
                continue;
            }

            let start = self.pos;
            let (line, column) = (self.line, self.column);

            let token = match c {
                '\n' => {
                    self.bump();
                    Some((TokenKind::Newline, "\n".to_string()))
                }
                '/' if self.peek(1) == Some('/') => Some(self.comment()),
                '"' | '\'' => Some((TokenKind::String, self.string(c))),
                '0'..='9' => Some((TokenKind::Number, self.number())),
                '-' if self.peek(1).is_some_and(|n| n.is_ascii_digit()) => {
                    Some((TokenKind::Number, self.number()))
                }
                '@' if self.peek(1) == Some('@') => {
                    self.bump();
                    self.bump();
                    Some((TokenKind::AtAt, "@@".to_string()))
                }
                'a'..='z' | 'A'..='Z' | '_' => {
                    let word = self.identifier();
                    Some((TokenKind::keyword(&word), word))
                }
                _ => match Self::symbol(c) {
                    Some(kind) => {
                        self.bump();
                        Some((kind, c.to_string()))
                    }
                    None => {
                        self.skip_unknown(c, line, column);
                        None
                    }
                },
            };

            if let Some((kind, text)) = token {
                tokens.push(Token {
                    kind,
                    text,
                    line,
                    column,
                    span: Span::new(start, self.pos),
                });
            }
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            text: String::new(),
            line: self.line,
            column: self.column,
            span: Span::new(self.pos, self.pos),
        });

        debug!(
            tokens = tokens.len(),
            skipped = self.skipped.len(),
            "tokenized schema source"
        );
        tokens
    }

    fn symbol(c: char) -> Option<TokenKind> {
        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '@' => TokenKind::At,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Equals,
            '.' => TokenKind::Dot,
            _ => return None,
        };
        Some(kind)
    }

    fn skip_unknown(&mut self, character: char, line: u32, column: u32) {
        if !self.strict {
            warn!(%character, line, column, "skipping unrecognized character");
        }
        self.skipped.push(Skipped {
            character,
            offset: self.pos,
            line,
            column,
        });
        self.bump();
    }

    /// `//` or `///` up to (not including) the end of the line.
    fn comment(&mut self) -> (TokenKind, String) {
        let is_doc = self.peek(2) == Some('/');
        let prefix = if is_doc { 3 } else { 2 };
        for _ in 0..prefix {
            self.bump();
        }

        let body_start = self.pos;
        while self.current().is_some_and(|c| c != '\n') {
            self.bump();
        }

        let body = self.src[body_start..self.pos].trim().to_string();
        let kind = if is_doc {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        };
        (kind, body)
    }

    /// Quoted string. A backslash copies the next character literally.
    /// An unterminated string runs to the end of input.
    fn string(&mut self, quote: char) -> String {
        self.bump();
        let mut value = String::new();

        while let Some(c) = self.current() {
            if c == quote {
                self.bump();
                break;
            }
            if c == '\\' {
                self.bump();
                if let Some(escaped) = self.current() {
                    value.push(escaped);
                    self.bump();
                }
                continue;
            }
            value.push(c);
            self.bump();
        }

        value
    }

    fn number(&mut self) -> String {
        let start = self.pos;
        if self.current() == Some('-') {
            self.bump();
        }
        while self.current().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn identifier(&mut self) -> String {
        let start = self.pos;
        while self
            .current()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn current(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(offset)
    }

    fn bump(&mut self) {
        if let Some(c) = self.current() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

/// Tokenize `src`, skipping unrecognized characters. Never fails.
pub fn tokenize(src: &str) -> Vec<Token> {
    Lexer::new(src).scan()
}
