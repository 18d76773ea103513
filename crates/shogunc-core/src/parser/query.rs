//! Query grammar: one `SELECT` or `INSERT` statement per block.

use super::cursor::Cursor;
use super::error::ParseError;
use crate::ast::{
    Bind, BindValue, ComparisonOp, Condition, ConflictAction, InsertStatement, Literal,
    LogicalOp, SelectStatement, Statement,
};
use crate::lexer::{Keyword, Token, TokenKind};

/// Parser for a single query statement.
pub struct QueryParser<'a> {
    cursor: Cursor<'a>,
    /// Last position handed out to a bare `$`.
    param_counter: usize,
}

impl<'a> QueryParser<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            param_counter: 0,
        }
    }

    /// Parses the first statement of the input. Anything after its
    /// terminating `;` is ignored.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input does not start with a valid
    /// `SELECT` or `INSERT`.
    pub fn parse(mut self) -> Result<Statement, ParseError> {
        let kind = self.cursor.current().kind;
        let statement = match kind {
            TokenKind::Keyword(Keyword::Select) => Statement::Select(self.parse_select()?),
            TokenKind::Keyword(Keyword::Insert) => Statement::Insert(self.parse_insert()?),
            _ => return Err(self.cursor.unexpected("SELECT or INSERT")),
        };
        if !self.cursor.eat(TokenKind::Semicolon) && !self.cursor.current().is_eof() {
            return Err(self.cursor.unexpected("';'"));
        }
        Ok(statement)
    }

    fn parse_select(&mut self) -> Result<SelectStatement, ParseError> {
        self.cursor.expect_keyword(Keyword::Select)?;
        let distinct = self.cursor.eat_keyword(Keyword::Distinct);

        let mut columns = Vec::new();
        while !self.cursor.check_keyword(Keyword::From) && !self.cursor.current().is_eof() {
            let token = self.cursor.advance();
            if token.kind == TokenKind::Star || is_column(&token) {
                columns.push(token.literal);
            }
        }
        self.cursor.expect_keyword(Keyword::From)?;
        let table = self.parse_table_name()?;

        let conditions = if self.cursor.eat_keyword(Keyword::Where) {
            self.parse_conditions()?
        } else {
            Vec::new()
        };

        let limit = if self.cursor.eat_keyword(Keyword::Limit) {
            Some(self.cursor.expect_unsigned("integer after LIMIT")?)
        } else {
            None
        };
        let offset = if self.cursor.eat_keyword(Keyword::Offset) {
            Some(self.cursor.expect_unsigned("integer after OFFSET")?)
        } else {
            None
        };

        Ok(SelectStatement {
            distinct,
            columns,
            table,
            conditions,
            limit,
            offset,
        })
    }

    /// Builds conditions until `;`, `LIMIT`, `OFFSET` or the end of input.
    ///
    /// A condition is kept only when its column, operator and value were
    /// all found; partial conditions are dropped without error.
    fn parse_conditions(&mut self) -> Result<Vec<Condition>, ParseError> {
        let mut conditions = Vec::new();
        while !self.at_where_end() {
            let chain = match self.cursor.current().kind {
                TokenKind::Keyword(Keyword::And) => Some(LogicalOp::And),
                TokenKind::Keyword(Keyword::Or) => Some(LogicalOp::Or),
                _ => None,
            };
            if chain.is_some() {
                self.cursor.advance();
            }

            let column = if is_column(self.cursor.current()) {
                Some(self.cursor.advance().literal)
            } else {
                None
            };

            let op = comparison_op(self.cursor.current().kind);
            if op.is_some() {
                self.cursor.advance();
            }

            let kind = self.cursor.current().kind;
            let value = match kind {
                TokenKind::Dollar => Some(BindValue::Param(self.bind_position()?)),
                TokenKind::String => Some(BindValue::Literal(Literal::String(
                    self.cursor.current().literal.clone(),
                ))),
                TokenKind::Integer => Some(BindValue::Literal(Literal::Integer(
                    parse_integer(self.cursor.current())?,
                ))),
                _ => None,
            };

            if let (Some(column), Some(op), Some(value)) = (column, op, value) {
                conditions.push(Condition {
                    chain,
                    column: column.clone(),
                    op,
                    bind: Bind { column, value },
                });
            }

            if !self.at_where_end() {
                self.cursor.advance();
            }
        }
        Ok(conditions)
    }

    fn at_where_end(&self) -> bool {
        matches!(
            self.cursor.current().kind,
            TokenKind::Semicolon
                | TokenKind::Eof
                | TokenKind::Keyword(Keyword::Limit | Keyword::Offset)
        )
    }

    /// Resolves the position of the `$` under the cursor.
    ///
    /// `$N` consumes the `$` and leaves the cursor on `N`; a bare `$` takes
    /// the next automatic position and leaves the cursor on the `$`.
    fn bind_position(&mut self) -> Result<usize, ParseError> {
        if self.cursor.peek().kind != TokenKind::Integer {
            self.param_counter += 1;
            return Ok(self.param_counter);
        }
        self.cursor.advance();
        let token = self.cursor.current();
        match token.literal.parse::<usize>() {
            Ok(0) => Err(ParseError::new("bind positions start at $1", token.span)),
            Ok(position) => Ok(position),
            Err(_) => Err(ParseError::new(
                format!("bind position '{}' is out of range", token.literal),
                token.span,
            )),
        }
    }

    fn parse_insert(&mut self) -> Result<InsertStatement, ParseError> {
        self.cursor.expect_keyword(Keyword::Insert)?;
        let conflict = if self.cursor.eat_keyword(Keyword::Or) {
            let token = self.cursor.current();
            let action = ConflictAction::from_upper(&token.literal)
                .filter(|_| token.kind == TokenKind::Ident)
                .ok_or_else(|| {
                    self.cursor
                        .unexpected("REPLACE, IGNORE, ABORT, FAIL or ROLLBACK")
                })?;
            self.cursor.advance();
            Some(action)
        } else {
            None
        };

        self.cursor.expect_keyword(Keyword::Into)?;
        let table = self.parse_table_name()?;

        self.cursor.expect(TokenKind::LeftParen, "'('")?;
        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_column()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RightParen, "',' or ')'")?;

        self.cursor.expect_keyword(Keyword::Values)?;
        let mut values = Vec::new();
        loop {
            self.parse_tuple(&columns, &mut values)?;
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }

        let mut returning = Vec::new();
        if self.cursor.eat_keyword(Keyword::Returning) {
            loop {
                if self.cursor.check(TokenKind::Star) {
                    returning.push(self.cursor.advance().literal);
                } else {
                    returning.push(self.parse_column()?);
                }
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        Ok(InsertStatement {
            conflict,
            table,
            columns,
            values,
            returning,
        })
    }

    /// Parses one `( ... )` tuple, binding value `i` to `columns[i]`.
    fn parse_tuple(&mut self, columns: &[String], values: &mut Vec<Bind>) -> Result<(), ParseError> {
        let open = self.cursor.expect(TokenKind::LeftParen, "'('")?;
        let mut count = 0;
        loop {
            let value = self.parse_insert_value()?;
            if let Some(column) = columns.get(count) {
                values.push(Bind {
                    column: column.clone(),
                    value,
                });
            }
            count += 1;
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RightParen, "',' or ')'")?;

        if count == columns.len() {
            Ok(())
        } else {
            Err(ParseError::new(
                format!(
                    "VALUES tuple has {count} values for {} columns",
                    columns.len()
                ),
                open.span,
            ))
        }
    }

    fn parse_insert_value(&mut self) -> Result<BindValue, ParseError> {
        let kind = self.cursor.current().kind;
        let value = match kind {
            TokenKind::Dollar => BindValue::Param(self.bind_position()?),
            TokenKind::String => {
                BindValue::Literal(Literal::String(self.cursor.current().literal.clone()))
            }
            TokenKind::Integer => {
                BindValue::Literal(Literal::Integer(parse_integer(self.cursor.current())?))
            }
            TokenKind::Keyword(Keyword::True) => BindValue::Literal(Literal::Boolean(true)),
            TokenKind::Keyword(Keyword::False) => BindValue::Literal(Literal::Boolean(false)),
            TokenKind::Keyword(Keyword::Null) => BindValue::Literal(Literal::Null),
            _ => return Err(self.cursor.unexpected("bind parameter or literal")),
        };
        self.cursor.advance();
        Ok(value)
    }

    /// Reads a table name and folds it to lower case.
    fn parse_table_name(&mut self) -> Result<String, ParseError> {
        let token = self.cursor.current();
        if token.kind == TokenKind::String || is_column(token) {
            Ok(self.cursor.advance().literal.to_lowercase())
        } else {
            Err(self.cursor.unexpected("table name"))
        }
    }

    fn parse_column(&mut self) -> Result<String, ParseError> {
        if is_column(self.cursor.current()) {
            Ok(self.cursor.advance().literal)
        } else {
            Err(self.cursor.unexpected("column name"))
        }
    }
}

/// Identifiers and schema-only keywords can name a column.
fn is_column(token: &Token) -> bool {
    match token.kind {
        TokenKind::Ident => true,
        TokenKind::Keyword(keyword) => !keyword.is_query_reserved(),
        _ => false,
    }
}

const fn comparison_op(kind: TokenKind) -> Option<ComparisonOp> {
    match kind {
        TokenKind::Eq => Some(ComparisonOp::Eq),
        TokenKind::NotEq => Some(ComparisonOp::NotEq),
        TokenKind::Lt => Some(ComparisonOp::Lt),
        TokenKind::Gt => Some(ComparisonOp::Gt),
        TokenKind::LtEq => Some(ComparisonOp::LtEq),
        TokenKind::GtEq => Some(ComparisonOp::GtEq),
        _ => None,
    }
}

fn parse_integer(token: &Token) -> Result<i64, ParseError> {
    token.literal.parse().map_err(|_| {
        ParseError::new(
            format!("integer '{}' is out of range", token.literal),
            token.span,
        )
    })
}
