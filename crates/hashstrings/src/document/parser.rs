use super::value::{Item, Setting, Value};
use crate::error::DocumentError;

/// Parse a whole configuration text into its top-level settings.
pub fn parse(input: &str) -> Result<Vec<Setting>, DocumentError> {
    Parser::new(input).parse()
}

/// Recursive-descent parser for the libconfig-style syntax.
pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Parse the input into top-level settings
    pub fn parse(mut self) -> Result<Vec<Setting>, DocumentError> {
        self.parse_settings(None)
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    /// Advance one byte, keeping line bookkeeping current.
    fn bump(&mut self) {
        if let Some(b) = self.peek() {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.line_start = self.pos;
            }
        }
    }

    fn error(&self, message: impl Into<String>) -> DocumentError {
        let rest = &self.input[self.line_start..];
        let excerpt = rest.lines().next().unwrap_or_default().trim_end();
        DocumentError::Syntax {
            message: message.into(),
            line: self.line,
            column: self.pos - self.line_start + 1,
            excerpt: excerpt.to_string(),
        }
    }

    /// Skip whitespace and `#`, `//` and `/* */` comments.
    fn skip_trivia(&mut self) -> Result<(), DocumentError> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(b' ' | b'\t' | b'\r' | b'\n'), _) => self.bump(),
                (Some(b'#'), _) | (Some(b'/'), Some(b'/')) => {
                    while self.peek().is_some_and(|b| b != b'\n') {
                        self.bump();
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    let unterminated = self.error("Unterminated comment");
                    self.bump();
                    self.bump();
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (Some(b'*'), Some(b'/')) => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            (Some(_), _) => self.bump(),
                            (None, _) => return Err(unterminated),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Settings up to `close`, or to the end of input when `close` is `None`.
    fn parse_settings(&mut self, close: Option<u8>) -> Result<Vec<Setting>, DocumentError> {
        let mut settings: Vec<Setting> = Vec::new();

        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => {
                    return match close {
                        None => Ok(settings),
                        Some(c) => Err(self.error(format!("Expected '{}'", c as char))),
                    };
                }
                Some(c) if Some(c) == close => {
                    self.bump();
                    return Ok(settings);
                }
                Some(b'@') => return Err(self.error("Include directives are not supported")),
                Some(_) => {}
            }

            let line = self.line;
            let name_error = self.error("Duplicate setting");
            let name = self.parse_name()?;
            if settings.iter().any(|s| s.name == name) {
                return Err(name_error);
            }

            self.skip_trivia()?;
            match self.peek() {
                Some(b'=' | b':') => self.bump(),
                _ => return Err(self.error(format!("Expected '=' or ':' after '{name}'"))),
            }

            self.skip_trivia()?;
            let value = self.parse_value()?;

            self.skip_trivia()?;
            if matches!(self.peek(), Some(b';' | b',')) {
                self.bump();
            }

            settings.push(Setting { name, value, line });
        }
    }

    /// Setting name: `[A-Za-z*][-A-Za-z0-9_*]*`.
    fn parse_name(&mut self) -> Result<String, DocumentError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == b'*' => self.bump(),
            _ => return Err(self.error("Expected a setting name")),
        }
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, b'-' | b'_' | b'*'))
        {
            self.bump();
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_value(&mut self) -> Result<Value, DocumentError> {
        match self.peek() {
            Some(b'{') => {
                self.bump();
                Ok(Value::Group(self.parse_settings(Some(b'}'))?))
            }
            Some(b'[') => {
                self.bump();
                Ok(Value::Array(self.parse_items(b']', true)?))
            }
            Some(b'(') => {
                self.bump();
                Ok(Value::List(self.parse_items(b')', false)?))
            }
            Some(b'"') => self.parse_string().map(Value::String),
            Some(c) if c.is_ascii_alphabetic() => self.parse_bool(),
            Some(c) if c.is_ascii_digit() || matches!(c, b'-' | b'+' | b'.') => {
                self.parse_number()
            }
            Some(c) => Err(self.error(format!("Unexpected character '{}'", c as char))),
            None => Err(self.error("Unexpected end of input")),
        }
    }

    /// Comma-separated values up to `close`; a trailing comma is allowed.
    fn parse_items(&mut self, close: u8, scalars_only: bool) -> Result<Vec<Item>, DocumentError> {
        let mut items = Vec::new();

        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(c) if c == close => {
                    self.bump();
                    return Ok(items);
                }
                None => return Err(self.error(format!("Expected '{}'", close as char))),
                Some(_) => {}
            }

            let line = self.line;
            let scalar_error = self.error("Arrays may only contain scalar values");
            let value = self.parse_value()?;
            if scalars_only && !value.is_scalar() {
                return Err(scalar_error);
            }
            items.push(Item { value, line });

            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.bump(),
                Some(c) if c == close => {}
                _ => {
                    return Err(self.error(format!("Expected ',' or '{}'", close as char)));
                }
            }
        }
    }

    /// One or more adjacent string literals, concatenated.
    fn parse_string(&mut self) -> Result<Vec<u8>, DocumentError> {
        let mut bytes = Vec::new();

        while self.peek() == Some(b'"') {
            let start_error = self.error("Unterminated string");
            self.bump();
            loop {
                match self.peek() {
                    Some(b'"') => {
                        self.bump();
                        break;
                    }
                    Some(b'\\') => {
                        self.bump();
                        bytes.push(self.parse_escape()?);
                    }
                    Some(c) => {
                        bytes.push(c);
                        self.bump();
                    }
                    None => return Err(start_error),
                }
            }
            self.skip_trivia()?;
        }

        Ok(bytes)
    }

    fn parse_escape(&mut self) -> Result<u8, DocumentError> {
        let escaped = match self.peek() {
            Some(b'\\') => b'\\',
            Some(b'"') => b'"',
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'f') => 0x0c,
            Some(b'x') => {
                self.bump();
                let hex = self
                    .input
                    .get(self.pos..self.pos + 2)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| self.error("Invalid '\\x' escape"))?;
                self.bump();
                self.bump();
                return Ok(hex);
            }
            _ => return Err(self.error("Invalid escape sequence")),
        };
        self.bump();
        Ok(escaped)
    }

    fn parse_bool(&mut self) -> Result<Value, DocumentError> {
        let start = self.pos;
        let error = self.error("Unknown value");
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.bump();
        }
        let word = &self.input[start..self.pos];
        if word.eq_ignore_ascii_case("true") {
            Ok(Value::Bool(true))
        } else if word.eq_ignore_ascii_case("false") {
            Ok(Value::Bool(false))
        } else {
            Err(error)
        }
    }

    fn parse_number(&mut self) -> Result<Value, DocumentError> {
        let start = self.pos;
        let error = self.error("Invalid number");
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, b'+' | b'-' | b'.'))
        {
            self.bump();
        }

        let text = &self.input[start..self.pos];
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        if let Some(hex) = unsigned
            .strip_prefix("0x")
            .or_else(|| unsigned.strip_prefix("0X"))
        {
            let digits = hex.trim_end_matches(['L', 'l']);
            let magnitude = i64::from_str_radix(digits, 16).map_err(|_| error)?;
            return Ok(Value::Integer(if negative { -magnitude } else { magnitude }));
        }

        let integer = text.trim_end_matches(['L', 'l']);
        if let Ok(value) = integer.parse::<i64>() {
            return Ok(Value::Integer(value));
        }
        text.parse::<f64>().map(Value::Float).map_err(|_| error)
    }
}
