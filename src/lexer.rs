//! Single-pass scanner from query text to classified tokens.
//!
//! The scanner walks runes with a monotonically advancing cursor and
//! tracks `(line, column)` for every token it emits. `\r\n`, `\r` and
//! `\n` each count as one line; `\r\n` is never double-counted. It is
//! pull-based: the parser asks for one token at a time on the same call
//! stack.

use std::str::FromStr;
use std::sync::Arc;

use crate::ast::tokens::{
    in_table, Keyword, Token, TokenKind, AGGREGATE_FUNCTIONS, ANALYTIC_FUNCTIONS, FUNCTIONS_NTH,
    FUNCTIONS_WITH_IGNORE_NULLS, LIST_FUNCTIONS,
};
use crate::coerce::{str_to_time, DatetimeContext};
use crate::error::SyntaxError;
use crate::ternary::Ternary;

const COMPARISON_OPERATORS: &[&str] = &[">", "<", ">=", "<=", "<>", "!="];
const SUBSTITUTION_OPERATOR: &str = ":=";
const STRING_OPERATOR: &str = "||";
const VARIABLE_SIGN: char = '@';

pub struct Scanner {
    src: Vec<char>,
    src_pos: usize,
    offset: usize,

    line: usize,
    column: usize,
    source_file: Option<Arc<str>>,

    ansi_quotes: bool,
    enable_placeholders: bool,
    datetime_ctx: DatetimeContext,
}

fn is_ident_rune(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic() || ch.is_numeric()
}

fn is_operator_rune(ch: char) -> bool {
    matches!(ch, '=' | '>' | '<' | '!' | '|' | ':')
}

impl Scanner {
    pub fn new(
        src: &str,
        source_file: Option<Arc<str>>,
        ansi_quotes: bool,
        enable_placeholders: bool,
        datetime_ctx: DatetimeContext,
    ) -> Scanner {
        Scanner {
            src: src.chars().collect(),
            src_pos: 0,
            offset: 0,
            line: 1,
            column: 0,
            source_file,
            ansi_quotes,
            enable_placeholders,
            datetime_ctx,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.src_pos).copied()
    }

    fn peek_second(&self) -> Option<char> {
        self.src.get(self.src_pos + 1).copied()
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.src_pos += 1;
        self.offset += 1;
        self.column += 1;
        self.check_new_line(ch);
        Some(ch)
    }

    fn check_new_line(&mut self, ch: char) {
        if ch != '\r' && ch != '\n' {
            return;
        }
        if ch == '\r' && self.peek() == Some('\n') {
            self.src_pos += 1;
            self.offset += 1;
        }
        self.line += 1;
        self.column = 0;
    }

    fn literal(&self) -> String {
        self.src[self.src_pos - self.offset..self.src_pos]
            .iter()
            .collect()
    }

    /// Strip the surrounding quotes of the current token and resolve
    /// backslash escapes of the quote rune and of backslash itself.
    fn unescape_token_string(&self) -> String {
        let runes = &self.src[self.src_pos - self.offset..self.src_pos];
        let quote = match runes.first() {
            Some(q @ ('"' | '\'' | '`')) => *q,
            _ => return runes.iter().collect(),
        };

        let mut inner = &runes[1..];
        if let Some((last, rest)) = inner.split_last() {
            if *last == quote {
                inner = rest;
            }
        }

        let mut unescaped = String::with_capacity(inner.len());
        let mut i = 0;
        while i < inner.len() {
            if inner[i] == '\\' && i + 1 < inner.len() && (inner[i + 1] == quote || inner[i + 1] == '\\')
            {
                i += 1;
            }
            unescaped.push(inner[i]);
            i += 1;
        }
        unescaped
    }

    fn token(
        &self,
        kind: TokenKind,
        literal: String,
        quoted: bool,
        line: usize,
        column: usize,
    ) -> Token {
        Token {
            kind,
            literal,
            quoted,
            line,
            column,
            source_file: self.source_file.clone(),
        }
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> Result<Token, SyntaxError> {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }

        self.offset = 0;
        let ch = match self.next() {
            Some(ch) => ch,
            None => {
                return Ok(self.token(
                    TokenKind::Eof,
                    String::new(),
                    false,
                    self.line,
                    self.column,
                ));
            }
        };
        let line = self.line;
        let column = self.column;

        if ch.is_ascii_digit() {
            let kind = self.scan_number();
            return Ok(self.token(kind, self.literal(), false, line, column));
        }

        if is_ident_rune(ch) {
            self.scan_identifier();
            let literal = self.literal();
            let kind = classify_word(&literal);
            return Ok(self.token(kind, literal, false, line, column));
        }

        if self.enable_placeholders && ch == '?' {
            return Ok(self.token(TokenKind::Placeholder, "?".to_string(), false, line, column));
        }
        if self.enable_placeholders && ch == ':' && self.peek().is_some_and(is_ident_rune) {
            self.scan_identifier();
            return Ok(self.token(TokenKind::Placeholder, self.literal(), false, line, column));
        }

        if is_operator_rune(ch) {
            self.scan_operator();
            let literal = self.literal();
            let kind = if COMPARISON_OPERATORS.contains(&literal.as_str()) {
                TokenKind::ComparisonOp
            } else if literal == STRING_OPERATOR {
                TokenKind::StringOp
            } else if literal == SUBSTITUTION_OPERATOR {
                TokenKind::SubstitutionOp
            } else if 1 < literal.chars().count() {
                TokenKind::Uncategorized
            } else {
                TokenKind::Symbol(ch)
            };
            return Ok(self.token(kind, literal, false, line, column));
        }

        if ch == VARIABLE_SIGN {
            let kind = if self.peek() == Some(VARIABLE_SIGN) {
                self.next();
                TokenKind::Flag
            } else {
                TokenKind::Variable
            };
            // the sigils are not part of the literal
            self.offset = 0;
            self.scan_identifier();
            let literal = self.literal();
            if literal.is_empty() {
                return Err(SyntaxError::new(
                    "invalid variable symbol",
                    line,
                    column,
                    self.source_file.clone(),
                ));
            }
            return Ok(self.token(kind, literal, false, line, column));
        }

        if ch == '/' && self.peek() == Some('*') {
            self.next();
            self.scan_block_comment();
            return self.scan();
        }
        if ch == '-' && self.peek() == Some('-') {
            self.next();
            self.scan_line_comment();
            return self.scan();
        }

        match ch {
            '"' | '\'' => {
                if !self.scan_string(ch) {
                    return Err(SyntaxError::new(
                        "literal not terminated",
                        line,
                        column,
                        self.source_file.clone(),
                    ));
                }
                let literal = self.unescape_token_string();
                if self.ansi_quotes && ch == '"' {
                    return Ok(self.token(TokenKind::Identifier, literal, true, line, column));
                }
                if str_to_time(&literal, &self.datetime_ctx).is_some() {
                    Ok(self.token(TokenKind::DatetimeLit, literal, false, line, column))
                } else {
                    Ok(self.token(TokenKind::StringLit, literal, false, line, column))
                }
            }
            '`' => {
                if !self.scan_string('`') {
                    return Err(SyntaxError::new(
                        "literal not terminated",
                        line,
                        column,
                        self.source_file.clone(),
                    ));
                }
                let literal = self.unescape_token_string();
                Ok(self.token(TokenKind::Identifier, literal, true, line, column))
            }
            _ => Ok(self.token(TokenKind::Symbol(ch), ch.to_string(), false, line, column)),
        }
    }

    /// Consume until the matching unescaped quote. Returns false when
    /// the input ends first.
    fn scan_string(&mut self, quote: char) -> bool {
        loop {
            match self.next() {
                None => return false,
                Some(ch) if ch == quote => return true,
                Some('\\') => {
                    self.next();
                }
                Some(_) => {}
            }
        }
    }

    fn scan_identifier(&mut self) {
        while self.peek().is_some_and(is_ident_rune) {
            self.next();
        }
    }

    fn scan_operator(&mut self) {
        while self.peek().is_some_and(is_operator_rune) {
            self.next();
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.next();
        }
        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            self.next();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.next();
            }
            return TokenKind::FloatLit;
        }
        TokenKind::IntegerLit
    }

    // an unterminated block comment is accepted silently
    fn scan_block_comment(&mut self) {
        loop {
            match self.next() {
                None => return,
                Some('*') if self.peek() == Some('/') => {
                    self.next();
                    return;
                }
                Some(_) => {}
            }
        }
    }

    fn scan_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\r' || ch == '\n' {
                return;
            }
            self.next();
        }
    }
}

/// Classify an identifier run, in priority order: ternary literal,
/// reserved word, then the function-name tables, else a generic
/// identifier.
fn classify_word(literal: &str) -> TokenKind {
    if Ternary::from_str(literal).is_ok() {
        return TokenKind::TernaryLit;
    }
    if let Some(keyword) = Keyword::lookup(literal) {
        return TokenKind::Keyword(keyword);
    }
    if in_table(AGGREGATE_FUNCTIONS, literal) {
        return TokenKind::AggregateFunction;
    }
    if in_table(LIST_FUNCTIONS, literal) {
        return TokenKind::ListFunction;
    }
    if in_table(ANALYTIC_FUNCTIONS, literal) {
        return TokenKind::AnalyticFunction;
    }
    if in_table(FUNCTIONS_NTH, literal) {
        return TokenKind::FunctionNth;
    }
    if in_table(FUNCTIONS_WITH_IGNORE_NULLS, literal) {
        return TokenKind::FunctionWithIgnoreNulls;
    }
    TokenKind::Identifier
}
