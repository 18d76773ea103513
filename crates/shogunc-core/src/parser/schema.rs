//! Schema grammar: `CREATE TABLE` and `CREATE TYPE ... AS ENUM`.

use chrono::{Local, NaiveDateTime};

use super::cursor::Cursor;
use super::error::ParseError;
use crate::ast::{DataType, Enum, Field, SchemaItem, Table};
use crate::lexer::{Keyword, Token, TokenKind};

/// Parser for schema declarations.
pub struct SchemaParser<'a> {
    cursor: Cursor<'a>,
    /// Clock used to resolve `DEFAULT now()`.
    now: NaiveDateTime,
}

impl<'a> SchemaParser<'a> {
    /// Creates a parser whose `DEFAULT now()` resolves to the local time.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            now: Local::now().naive_local(),
        }
    }

    /// Fixes the instant `DEFAULT now()` resolves to.
    #[must_use]
    pub const fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// Parses every declaration in the input.
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError` encountered; nothing is returned for
    /// the declarations parsed before it.
    pub fn parse(mut self) -> Result<Vec<SchemaItem>, ParseError> {
        let mut items = Vec::new();
        loop {
            let kind = self.cursor.current().kind;
            match kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    self.cursor.advance();
                }
                TokenKind::Keyword(Keyword::Create) => {
                    self.cursor.advance();
                    items.push(self.parse_create()?);
                }
                _ => return Err(self.cursor.unexpected("CREATE")),
            }
        }
        Ok(items)
    }

    fn parse_create(&mut self) -> Result<SchemaItem, ParseError> {
        if self.cursor.eat_keyword(Keyword::Table) {
            Ok(SchemaItem::Table(self.parse_table()?))
        } else if self.cursor.eat_keyword(Keyword::Type) {
            Ok(SchemaItem::Enum(self.parse_enum()?))
        } else {
            Err(self.cursor.unexpected("TABLE or TYPE"))
        }
    }

    fn parse_table(&mut self) -> Result<Table, ParseError> {
        if self.cursor.eat_keyword(Keyword::If) {
            self.cursor.expect_keyword(Keyword::Not)?;
            self.cursor.expect_keyword(Keyword::Exists)?;
        }
        let name = self.parse_name("table name")?;
        self.cursor.expect(TokenKind::LeftParen, "'('")?;

        let mut fields = Vec::new();
        loop {
            fields.push(self.parse_field(fields.len())?);
            if self.cursor.eat(TokenKind::Comma) {
                continue;
            }
            self.cursor.expect(TokenKind::RightParen, "',' or ')'")?;
            break;
        }

        Ok(Table { name, fields })
    }

    fn parse_enum(&mut self) -> Result<Enum, ParseError> {
        let name = self.parse_name("type name")?;
        self.cursor.expect_keyword(Keyword::As)?;
        self.cursor.expect_keyword(Keyword::Enum)?;
        self.cursor.expect(TokenKind::LeftParen, "'('")?;

        let mut values = Vec::new();
        loop {
            let value = self.cursor.expect(TokenKind::String, "enum value")?;
            values.push(value.literal);
            if self.cursor.eat(TokenKind::Comma) {
                continue;
            }
            self.cursor.expect(TokenKind::RightParen, "',' or ')'")?;
            break;
        }

        Ok(Enum { name, values })
    }

    /// Reads a declared name. Quoted names are kept verbatim, bare names are
    /// folded to lower case.
    fn parse_name(&mut self, expected: &str) -> Result<String, ParseError> {
        let token = self.cursor.current();
        let name = match token.kind {
            TokenKind::String => token.literal.clone(),
            TokenKind::Ident | TokenKind::Keyword(_) => token.literal.to_lowercase(),
            _ => return Err(self.cursor.unexpected(expected)),
        };
        self.cursor.advance();
        Ok(name)
    }

    fn parse_field(&mut self, index: usize) -> Result<Field, ParseError> {
        let name = self
            .parse_name("column name")
            .map_err(|e| e.in_field(index))?;
        let data_type = self.parse_data_type(index)?;
        let mut field = Field::new(name, data_type);

        loop {
            let kind = self.cursor.current().kind;
            match kind {
                TokenKind::Comma | TokenKind::RightParen => break,
                TokenKind::Keyword(Keyword::Primary) => {
                    self.cursor.advance();
                    self.cursor
                        .expect_keyword(Keyword::Key)
                        .map_err(|e| e.in_field(index))?;
                    field.primary_key = true;
                }
                TokenKind::Keyword(Keyword::Not) => {
                    self.cursor.advance();
                    self.cursor
                        .expect_keyword(Keyword::Null)
                        .map_err(|e| e.in_field(index))?;
                    field.not_null = true;
                }
                TokenKind::Keyword(Keyword::Null) => {
                    self.cursor.advance();
                }
                TokenKind::Keyword(Keyword::Unique) => {
                    self.cursor.advance();
                    field.unique = true;
                }
                TokenKind::Keyword(Keyword::Default) => {
                    self.cursor.advance();
                    let value = self
                        .parse_default(&field.data_type)
                        .map_err(|e| e.in_field(index))?;
                    field.default = Some(value);
                }
                _ => {
                    return Err(self
                        .cursor
                        .unexpected("column constraint, ',' or ')'")
                        .in_field(index))
                }
            }
        }

        Ok(field)
    }

    fn parse_data_type(&mut self, index: usize) -> Result<DataType, ParseError> {
        let token = self.cursor.current().clone();
        let data_type = match token.kind {
            TokenKind::String => DataType::Enum(token.literal.clone()),
            TokenKind::Ident => DataType::from_builtin(&token.literal).ok_or_else(|| {
                ParseError {
                    found: Some(token.literal.clone()),
                    ..ParseError::new(format!("unknown data type '{}'", token.literal), token.span)
                }
                .in_field(index)
            })?,
            _ => return Err(self.cursor.unexpected("data type").in_field(index)),
        };
        self.cursor.advance();

        let data_type = match data_type {
            DataType::Varchar(_) => {
                let args = self.parse_type_args(index, 1)?;
                DataType::Varchar(args.first().copied())
            }
            DataType::Decimal { .. } => {
                let args = self.parse_type_args(index, 2)?;
                DataType::Decimal {
                    precision: args.first().copied(),
                    scale: args.get(1).copied(),
                }
            }
            other => other,
        };
        Ok(data_type)
    }

    /// Parses an optional `(n[, m])` suffix holding at most `max` numbers.
    fn parse_type_args(&mut self, index: usize, max: usize) -> Result<Vec<u32>, ParseError> {
        let mut args = Vec::new();
        if !self.cursor.eat(TokenKind::LeftParen) {
            return Ok(args);
        }
        loop {
            let token = self
                .cursor
                .expect(TokenKind::Integer, "type argument")
                .map_err(|e| e.in_field(index))?;
            let value = token.literal.parse().map_err(|_| {
                ParseError::new(format!("type argument '{}' is out of range", token.literal), token.span)
                    .in_field(index)
            })?;
            args.push(value);
            if args.len() < max && self.cursor.eat(TokenKind::Comma) {
                continue;
            }
            self.cursor
                .expect(TokenKind::RightParen, "')'")
                .map_err(|e| e.in_field(index))?;
            return Ok(args);
        }
    }

    /// Resolves the value after `DEFAULT`.
    fn parse_default(&mut self, data_type: &DataType) -> Result<String, ParseError> {
        let token = self.cursor.current().clone();
        let next = self.cursor.peek().kind;

        if token.kind == TokenKind::Ident && data_type.accepts_now_default() {
            let is_call = next == TokenKind::LeftParen;
            if is_call || matches!(token.literal.as_str(), "CURRENT_TIMESTAMP" | "CURRENT_DATE") {
                self.cursor.advance();
                if is_call {
                    self.cursor.advance();
                    self.cursor.expect(TokenKind::RightParen, "')'")?;
                }
                return Ok(self.format_now(data_type));
            }
        }

        if matches!(token.kind, TokenKind::Ident | TokenKind::String) && is_default_literal(next) {
            // `"Enum" 'value'` keeps only the value
            self.cursor.advance();
            return self.parse_default_literal();
        }

        self.parse_default_literal()
    }

    fn parse_default_literal(&mut self) -> Result<String, ParseError> {
        let token: &Token = self.cursor.current();
        if !is_default_literal(token.kind) {
            return Err(self.cursor.unexpected("default value"));
        }
        Ok(self.cursor.advance().literal)
    }

    fn format_now(&self, data_type: &DataType) -> String {
        let pattern = match data_type {
            DataType::Date => "%Y-%m-%d",
            _ => "%Y-%m-%d %H:%M:%S",
        };
        self.now.format(pattern).to_string()
    }
}

const fn is_default_literal(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::String
            | TokenKind::Integer
            | TokenKind::Keyword(Keyword::True | Keyword::False)
    )
}
