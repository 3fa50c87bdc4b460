//! Recursive-descent productions over the token stream.
//!
//! ```text
//! schema       := (model | enum | ignored_block)*
//! model        := 'model' IDENT '{' (field | '@@' attribute)* '}'
//! enum         := 'enum' IDENT '{' (IDENT ('@' attribute)* | '@@' attribute)* '}'
//! field        := IDENT type ('[' ']')? '?'? ('@' attribute)*
//! type         := IDENT | 'Unsupported' '(' STRING ')'
//! attribute    := IDENT ('.' IDENT)* ('(' (arg (',' arg)* ','?)? ')')?
//! arg          := (IDENT ':')? value
//! value        := STRING | NUMBER | BOOLEAN | list | IDENT ('.' IDENT)* ('(' ... ')')?
//! list         := '[' (item (',' item)* ','?)? ']'
//! ignored_block:= ('datasource' | 'generator') IDENT '{' ... '}'
//! ```

use smol_str::SmolStr;
use tracing::trace;

use crate::ast::*;
use crate::error::{SchemaError, SchemaResult};
use crate::lexer::{Token, TokenKind};

/// Parser state: the significant tokens and a cursor.
pub(crate) struct Parser<'src> {
    src: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    pending_docs: Vec<Token>,
}

impl<'src> Parser<'src> {
    /// Build a parser. Newlines and plain comments are dropped here; doc
    /// comments stay so they can attach to the next declaration.
    pub(crate) fn new(tokens: Vec<Token>, src: &'src str) -> Self {
        let mut tokens: Vec<Token> = tokens.into_iter().filter(|t| !t.kind.is_trivia()).collect();

        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = src.len();
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                line: tokens.last().map(|t| t.line).unwrap_or(1),
                column: tokens.last().map(|t| t.column).unwrap_or(1),
                span: Span::new(end, end),
            });
        }

        Self {
            src,
            tokens,
            pos: 0,
            pending_docs: Vec::new(),
        }
    }

    // -- Cursor helpers --

    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn peek_nth_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> SchemaResult<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// Identifiers and keywords both name things inside declarations.
    fn expect_word(&mut self, context: &str) -> SchemaResult<Token> {
        if self.peek_kind().is_word() {
            Ok(self.advance())
        } else {
            Err(self.unexpected(context))
        }
    }

    fn unexpected(&self, expected: &str) -> SchemaError {
        let token = self.peek();
        let found = match token.kind {
            TokenKind::Eof => token.kind.describe().to_string(),
            kind => format!("{} '{}'", kind.describe(), token.text),
        };
        self.error_at(token, format!("expected {expected}, found {found}"))
    }

    fn error_at(&self, token: &Token, message: impl Into<String>) -> SchemaError {
        SchemaError::syntax(self.src, token.span, token.line, token.column, message)
    }

    fn ident(token: &Token) -> Ident {
        Ident::new(token.text.as_str(), token.span)
    }

    /// Join buffered `///` lines into one documentation block.
    fn take_docs(&mut self) -> Option<Documentation> {
        let first = self.pending_docs.first()?.span;
        let last = self.pending_docs.last()?.span;
        let text = self
            .pending_docs
            .drain(..)
            .map(|t| t.text)
            .collect::<Vec<_>>()
            .join("\n");
        Some(Documentation::new(text, first.merge(last)))
    }

    /// A `///` comment on the same line as the previous token documents the
    /// declaration that ends there, after any leading doc lines.
    fn attach_trailing_doc(&mut self, documentation: Option<Documentation>) -> Option<Documentation> {
        let line = self.tokens[self.pos.saturating_sub(1)].line;
        if !self.at(TokenKind::DocComment) || self.peek().line != line {
            return documentation;
        }

        let trailing = self.advance();
        Some(match documentation {
            Some(mut doc) => {
                doc.text.push('\n');
                doc.text.push_str(&trailing.text);
                doc.span = doc.span.merge(trailing.span);
                doc
            }
            None => Documentation::new(trailing.text, trailing.span),
        })
    }

    fn collect_docs(&mut self) {
        while self.at(TokenKind::DocComment) {
            let token = self.advance();
            self.pending_docs.push(token);
        }
    }

    // -- Grammar productions --

    /// schema := (model | enum | ignored_block)*
    pub(crate) fn parse_schema(&mut self) -> SchemaResult<Schema> {
        let mut schema = Schema::new();

        loop {
            self.collect_docs();
            match self.peek_kind() {
                TokenKind::Eof => break,
                TokenKind::Model => {
                    let model = self.parse_model()?;
                    schema.add_model(model);
                }
                TokenKind::Enum => {
                    let e = self.parse_enum()?;
                    schema.add_enum(e);
                }
                TokenKind::Datasource | TokenKind::Generator => {
                    self.pending_docs.clear();
                    self.skip_block()?;
                }
                _ => return Err(self.unexpected("'model', 'enum', 'datasource' or 'generator'")),
            }
        }

        Ok(schema)
    }

    /// model := 'model' IDENT '{' (field | '@@' attribute)* '}'
    fn parse_model(&mut self) -> SchemaResult<Model> {
        let keyword = self.expect(TokenKind::Model)?;
        let documentation = self.take_docs();
        let name = self.expect_word("model name")?;
        self.expect(TokenKind::LBrace)?;
        self.attach_trailing_doc(None);

        let mut model = Model::new(Self::ident(&name), keyword.span);
        model.documentation = documentation;

        loop {
            self.collect_docs();
            match self.peek_kind() {
                TokenKind::RBrace => break,
                TokenKind::AtAt => {
                    self.pending_docs.clear();
                    self.advance();
                    let attr = self.parse_attribute()?;
                    model.attributes.push(attr);
                    self.attach_trailing_doc(None);
                }
                kind if kind.is_word() => {
                    let field = self.parse_field()?;
                    model.add_field(field);
                }
                _ => return Err(self.unexpected("field or '@@' attribute")),
            }
        }

        self.pending_docs.clear();
        let close = self.expect(TokenKind::RBrace)?;
        model.span = model.span.merge(close.span);

        trace!(model = %model.name, fields = model.fields.len(), "parsed model");
        Ok(model)
    }

    /// field := IDENT type ('[' ']')? '?'? ('@' attribute)*
    fn parse_field(&mut self) -> SchemaResult<Field> {
        let documentation = self.take_docs();
        let name = self.expect_word("field name")?;
        let field_type = self.parse_field_type()?;

        let is_list = if self.at(TokenKind::LBracket) {
            self.advance();
            self.expect(TokenKind::RBracket)?;
            true
        } else {
            false
        };
        let is_optional = self.eat(TokenKind::Question);

        let mut attributes = Vec::new();
        while self.eat(TokenKind::At) {
            attributes.push(self.parse_attribute()?);
        }

        let end = self.tokens[self.pos.saturating_sub(1)].span;
        let documentation = self.attach_trailing_doc(documentation);
        let mut field = Field::new(
            Self::ident(&name),
            field_type,
            TypeModifier::from_flags(is_list, is_optional),
            attributes,
            name.span.merge(end),
        );
        field.documentation = documentation;
        Ok(field)
    }

    /// type := IDENT | 'Unsupported' '(' STRING ')'
    fn parse_field_type(&mut self) -> SchemaResult<FieldType> {
        let type_name = self.expect_word("field type")?;

        if type_name.text == "Unsupported" && self.at(TokenKind::LParen) {
            self.advance();
            let raw = self.expect(TokenKind::String)?;
            self.expect(TokenKind::RParen)?;
            return Ok(FieldType::Unsupported(SmolStr::new(raw.text)));
        }

        Ok(FieldType::from_type_name(&type_name.text))
    }

    /// enum := 'enum' IDENT '{' (value | '@@' attribute)* '}'
    fn parse_enum(&mut self) -> SchemaResult<Enum> {
        let keyword = self.expect(TokenKind::Enum)?;
        let documentation = self.take_docs();
        let name = self.expect_word("enum name")?;
        self.expect(TokenKind::LBrace)?;
        self.attach_trailing_doc(None);

        let mut e = Enum::new(Self::ident(&name), keyword.span);
        e.documentation = documentation;

        loop {
            self.collect_docs();
            match self.peek_kind() {
                TokenKind::RBrace => break,
                TokenKind::AtAt => {
                    self.pending_docs.clear();
                    self.advance();
                    let attr = self.parse_attribute()?;
                    e.attributes.push(attr);
                    self.attach_trailing_doc(None);
                }
                kind if kind.is_word() => {
                    let documentation = self.take_docs();
                    let token = self.advance();
                    let mut value = EnumValue::new(Self::ident(&token), token.span);
                    while self.eat(TokenKind::At) {
                        value.attributes.push(self.parse_attribute()?);
                    }
                    value.documentation = self.attach_trailing_doc(documentation);
                    e.add_value(value);
                }
                _ => return Err(self.unexpected("enum value or '@@' attribute")),
            }
        }

        self.pending_docs.clear();
        let close = self.expect(TokenKind::RBrace)?;
        e.span = e.span.merge(close.span);

        trace!(enum_name = %e.name, values = e.values.len(), "parsed enum");
        Ok(e)
    }

    /// attribute := IDENT ('.' IDENT)* ('(' args ')')?
    ///
    /// The leading `@` or `@@` has already been consumed.
    fn parse_attribute(&mut self) -> SchemaResult<Attribute> {
        let first = self.expect_word("attribute name")?;
        let name = self.dotted_name(first)?;

        let mut args = Vec::new();
        if self.eat(TokenKind::LParen) {
            while !self.at(TokenKind::RParen) {
                args.push(self.parse_argument()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen)?;
        }

        let end = self.tokens[self.pos.saturating_sub(1)].span;
        let span = name.span.merge(end);
        Ok(Attribute::new(name, args, span))
    }

    /// Extend `first` with `.segment` parts, e.g. `db.VarChar`.
    fn dotted_name(&mut self, first: Token) -> SchemaResult<Ident> {
        let mut text = first.text;
        let mut span = first.span;
        while self.eat(TokenKind::Dot) {
            let segment = self.expect_word("name after '.'")?;
            text.push('.');
            text.push_str(&segment.text);
            span = span.merge(segment.span);
        }
        Ok(Ident::new(text, span))
    }

    /// arg := (IDENT ':')? value
    fn parse_argument(&mut self) -> SchemaResult<AttributeArg> {
        let start = self.peek().span;

        if self.peek_kind().is_word() && self.peek_nth_kind(1) == TokenKind::Colon {
            let name = self.advance();
            self.advance();
            let value = self.parse_value()?;
            let end = self.tokens[self.pos.saturating_sub(1)].span;
            return Ok(AttributeArg::named(Self::ident(&name), value, start.merge(end)));
        }

        let value = self.parse_value()?;
        let end = self.tokens[self.pos.saturating_sub(1)].span;
        Ok(AttributeArg::positional(value, start.merge(end)))
    }

    fn parse_value(&mut self) -> SchemaResult<AttributeValue> {
        match self.peek_kind() {
            TokenKind::String => Ok(AttributeValue::String(self.advance().text)),
            TokenKind::Number => {
                let token = self.advance();
                leading_number(&token.text)
                    .map(AttributeValue::Number)
                    .ok_or_else(|| self.error_at(&token, format!("invalid number '{}'", token.text)))
            }
            TokenKind::Boolean => {
                let token = self.advance();
                Ok(AttributeValue::Boolean(token.text.eq_ignore_ascii_case("true")))
            }
            TokenKind::LBracket => self.parse_list(),
            kind if kind.is_word() => {
                let first = self.advance();
                let name = self.dotted_name(first)?;
                if self.at(TokenKind::LParen) {
                    self.skip_parenthesized()?;
                    Ok(AttributeValue::FunctionCall(name.name))
                } else {
                    Ok(AttributeValue::Ident(name.name))
                }
            }
            _ => Err(self.unexpected("attribute value")),
        }
    }

    /// list := '[' (item (',' item)* ','?)? ']'
    ///
    /// Items are names or strings. A name may carry its own arguments, as in
    /// `[createdAt(sort: Desc)]`; only the name is kept.
    fn parse_list(&mut self) -> SchemaResult<AttributeValue> {
        self.expect(TokenKind::LBracket)?;
        let mut items = Vec::new();

        while !self.at(TokenKind::RBracket) {
            match self.peek_kind() {
                TokenKind::String => items.push(SmolStr::new(self.advance().text)),
                kind if kind.is_word() => {
                    let first = self.advance();
                    let name = self.dotted_name(first)?;
                    if self.at(TokenKind::LParen) {
                        self.skip_parenthesized()?;
                    }
                    items.push(name.name);
                }
                _ => return Err(self.unexpected("list item")),
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RBracket)?;
        Ok(AttributeValue::StringList(items))
    }

    /// Skip a balanced `( ... )` group.
    fn skip_parenthesized(&mut self) -> SchemaResult<()> {
        self.skip_balanced(TokenKind::LParen, TokenKind::RParen)
    }

    /// ignored_block := ('datasource' | 'generator') IDENT '{' ... '}'
    fn skip_block(&mut self) -> SchemaResult<()> {
        let keyword = self.advance();
        let name = self.expect_word("block name")?;
        trace!(kind = %keyword.text, name = %name.text, "skipping block");
        self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)
    }

    fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) -> SchemaResult<()> {
        self.expect(open)?;
        let mut depth = 1usize;

        while depth > 0 {
            let kind = self.peek_kind();
            if kind == TokenKind::Eof {
                return Err(self.unexpected(close.describe()));
            }
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
            }
            self.advance();
        }

        Ok(())
    }
}

/// Longest prefix of `text` that reads as a number, so `1.2.3` is `1.2`.
fn leading_number(text: &str) -> Option<f64> {
    (1..=text.len())
        .rev()
        .filter(|&end| text.is_char_boundary(end))
        .find_map(|end| text[..end].parse::<f64>().ok())
}
