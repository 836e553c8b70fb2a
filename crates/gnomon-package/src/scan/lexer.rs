//! Tokenizer for the leading declarations of a source file.
//!
//! Recognises enough of the lexical grammar to read a package clause and the
//! import declarations that follow it: identifiers and keywords, string
//! literals (decoded), comments and automatic semicolon insertion. Other
//! literals and operators are tokenized loosely since the parser never looks
//! inside them.

use super::cursor::{Cursor, EOF_CHAR};

const BOM: char = '\u{FEFF}';

const KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident,
    Keyword,
    /// String literal with its decoded value.
    Str(String),
    /// Numeric or rune literal.
    Literal,
    /// Explicit `;` or one inserted at a newline or end of input.
    Semicolon,
    Op,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token<'src> {
    pub kind: TokenKind,
    /// Source text. `"\n"` for inserted semicolons.
    pub text: &'src str,
    pub pos: usize,
}

impl Token<'_> {
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text == op
    }

    /// How the token reads in an "expected X, found Y" message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Semicolon if self.text == "\n" => "newline".to_string(),
            TokenKind::Ident | TokenKind::Str(_) | TokenKind::Literal => self.text.to_string(),
            TokenKind::Eof => "'EOF'".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LexError {
    pub pos: usize,
    pub message: String,
}

impl LexError {
    fn new(pos: usize, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }
}

pub(crate) struct Lexer<'src> {
    cursor: Cursor<'src>,
    /// Whether a newline or end of input ends the current statement.
    insert_semi: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut cursor = Cursor::new(source);
        cursor.eat(BOM);
        Self {
            cursor,
            insert_semi: false,
        }
    }

    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        self.cursor.line_col(pos)
    }

    pub fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        loop {
            let start = self.cursor.pos();

            if self.cursor.is_eof() {
                if std::mem::take(&mut self.insert_semi) {
                    return Ok(self.token(TokenKind::Semicolon, "\n", start));
                }
                return Ok(self.token(TokenKind::Eof, "", start));
            }

            let c = self.cursor.first();
            match c {
                ' ' | '\t' | '\r' => {
                    self.cursor.bump();
                }
                '\n' => {
                    self.cursor.bump();
                    if std::mem::take(&mut self.insert_semi) {
                        return Ok(self.token(TokenKind::Semicolon, "\n", start));
                    }
                }
                '/' if self.cursor.second() == '/' => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                '/' if self.cursor.second() == '*' => {
                    if self.block_comment(start)? && std::mem::take(&mut self.insert_semi) {
                        return Ok(self.token(TokenKind::Semicolon, "\n", start));
                    }
                }
                c if is_letter(c) => return Ok(self.ident(start)),
                c if c.is_ascii_digit() => return Ok(self.number(start)),
                '.' if self.cursor.second().is_ascii_digit() => return Ok(self.number(start)),
                '"' => return self.string(start),
                '`' => return self.raw_string(start),
                '\'' => return self.rune(start),
                BOM => return Err(LexError::new(start, "illegal byte order mark")),
                c if is_operator(c) => return Ok(self.operator(start)),
                c => return Err(LexError::new(start, illegal_character(c))),
            }
        }
    }

    fn token(&mut self, kind: TokenKind, text: &'src str, pos: usize) -> Token<'src> {
        self.insert_semi = match &kind {
            TokenKind::Ident | TokenKind::Str(_) | TokenKind::Literal => true,
            TokenKind::Keyword => matches!(text, "break" | "continue" | "fallthrough" | "return"),
            TokenKind::Op => matches!(text, ")" | "]" | "}" | "++" | "--"),
            TokenKind::Semicolon | TokenKind::Eof => false,
        };
        Token { kind, text, pos }
    }

    /// Skips a `/* */` comment, reporting whether it spanned a line break.
    fn block_comment(&mut self, start: usize) -> Result<bool, LexError> {
        self.cursor.bump();
        self.cursor.bump();
        let mut newline = false;
        loop {
            match self.cursor.bump() {
                None => return Err(LexError::new(start, "comment not terminated")),
                Some('*') if self.cursor.eat('/') => return Ok(newline),
                Some('\n') => newline = true,
                Some(_) => {}
            }
        }
    }

    fn ident(&mut self, start: usize) -> Token<'src> {
        self.cursor.eat_while(|c| is_letter(c) || is_digit(c));
        let text = self.cursor.slice_from(start);
        let kind = if KEYWORDS.contains(&text) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        self.token(kind, text, start)
    }

    fn number(&mut self, start: usize) -> Token<'src> {
        let mut prev = EOF_CHAR;
        while !self.cursor.is_eof() {
            let c = self.cursor.first();
            let exponent_sign = matches!(c, '+' | '-') && matches!(prev, 'e' | 'E' | 'p' | 'P');
            if !(c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign) {
                break;
            }
            prev = c;
            self.cursor.bump();
        }
        let text = self.cursor.slice_from(start);
        self.token(TokenKind::Literal, text, start)
    }

    fn string(&mut self, start: usize) -> Result<Token<'src>, LexError> {
        self.cursor.bump();
        let mut value = Vec::new();
        loop {
            match self.cursor.bump() {
                None | Some('\n') => {
                    return Err(LexError::new(start, "string literal not terminated"));
                }
                Some('"') => break,
                Some('\\') => self.escape('"', &mut value)?,
                Some(c) => push_char(&mut value, c),
            }
        }
        let text = self.cursor.slice_from(start);
        let value = String::from_utf8_lossy(&value).into_owned();
        Ok(self.token(TokenKind::Str(value), text, start))
    }

    fn raw_string(&mut self, start: usize) -> Result<Token<'src>, LexError> {
        self.cursor.bump();
        let mut value = String::new();
        loop {
            match self.cursor.bump() {
                None => return Err(LexError::new(start, "raw string literal not terminated")),
                Some('`') => break,
                Some('\r') => {}
                Some(c) => value.push(c),
            }
        }
        let text = self.cursor.slice_from(start);
        Ok(self.token(TokenKind::Str(value), text, start))
    }

    fn rune(&mut self, start: usize) -> Result<Token<'src>, LexError> {
        self.cursor.bump();
        let mut scratch = Vec::new();
        let mut count = 0;
        loop {
            match self.cursor.bump() {
                None | Some('\n') => {
                    return Err(LexError::new(start, "rune literal not terminated"));
                }
                Some('\'') => break,
                Some('\\') => self.escape('\'', &mut scratch)?,
                Some(_) => {}
            }
            count += 1;
        }
        if count != 1 {
            return Err(LexError::new(start, "illegal rune literal"));
        }
        let text = self.cursor.slice_from(start);
        Ok(self.token(TokenKind::Literal, text, start))
    }

    /// Decodes one escape sequence; the backslash is already consumed.
    fn escape(&mut self, quote: char, out: &mut Vec<u8>) -> Result<(), LexError> {
        let pos = self.cursor.pos() - 1;
        let c = self.cursor.first();
        if self.cursor.is_eof() {
            return Err(LexError::new(pos, "escape sequence not terminated"));
        }

        let simple = match c {
            'a' => Some(0x07),
            'b' => Some(0x08),
            'f' => Some(0x0c),
            'n' => Some(b'\n'),
            'r' => Some(b'\r'),
            't' => Some(b'\t'),
            'v' => Some(0x0b),
            '\\' => Some(b'\\'),
            c if c == quote => Some(quote as u8),
            _ => None,
        };
        if let Some(byte) = simple {
            self.cursor.bump();
            out.push(byte);
            return Ok(());
        }

        let (digits, base, max) = match c {
            '0'..='7' => (3, 8, 255),
            'x' => (2, 16, 255),
            'u' => (4, 16, u32::from(char::MAX)),
            'U' => (8, 16, u32::from(char::MAX)),
            _ => return Err(LexError::new(pos, "unknown escape sequence")),
        };
        if !c.is_ascii_digit() {
            self.cursor.bump();
        }

        let mut value: u32 = 0;
        for _ in 0..digits {
            if self.cursor.is_eof() {
                return Err(LexError::new(pos, "escape sequence not terminated"));
            }
            let d = self.cursor.first();
            match d.to_digit(base) {
                Some(digit) => value = value * base + digit,
                None => {
                    let message = format!("{} in escape sequence", illegal_character(d));
                    return Err(LexError::new(self.cursor.pos(), message));
                }
            }
            self.cursor.bump();
        }

        if value > max || (0xD800..0xE000).contains(&value) {
            return Err(LexError::new(
                pos,
                "escape sequence is invalid Unicode code point",
            ));
        }
        if base == 8 || c == 'x' {
            out.push(value as u8);
        } else if let Some(ch) = char::from_u32(value) {
            push_char(out, ch);
        }
        Ok(())
    }

    fn operator(&mut self, start: usize) -> Token<'src> {
        let c = self.cursor.first();
        self.cursor.bump();
        match c {
            '.' if self.cursor.first() == '.' && self.cursor.second() == '.' => {
                self.cursor.bump();
                self.cursor.bump();
            }
            '+' | '-' => {
                self.cursor.eat(c);
            }
            _ => {}
        }
        let text = self.cursor.slice_from(start);
        let kind = if text == ";" {
            TokenKind::Semicolon
        } else {
            TokenKind::Op
        };
        self.token(kind, text, start)
    }
}

fn is_letter(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && c.is_alphabetic())
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || (!c.is_ascii() && c.is_numeric())
}

fn is_operator(c: char) -> bool {
    "+-*/%&|^<>=!()[]{},;.:~".contains(c)
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn illegal_character(c: char) -> String {
    if c.is_control() {
        format!("illegal character U+{:04X}", u32::from(c))
    } else {
        format!("illegal character U+{:04X} '{c}'", u32::from(c))
    }
}
