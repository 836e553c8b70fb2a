//! Import scanning.
//!
//! Reads the package clause and the import declarations at the top of a
//! source file and returns the imported paths. Everything after the last
//! import declaration is left unread, so a file whose body does not compile
//! still scans as long as its header is well formed.
//!
//! ```text
//! package foo
//!
//! import "gno.land/p/demo/avl"
//! import (
//!     ufmt "gno.land/p/demo/ufmt"
//!     . "strings"
//! )
//! ```

mod cursor;
mod lexer;

use crate::error::ScanError;
use lexer::{LexError, Lexer, Token, TokenKind};

/// Characters that may not appear in an import path, besides spaces,
/// control characters and U+FFFD.
const ILLEGAL_IMPORT_CHARS: &str = "!\"#$%&'()*,:;<=>?[\\]^{|}`\u{FFFD}";

/// Returns the import paths declared by `body`, in source order.
///
/// Paths are returned as written between the quotes. Escapes are decoded
/// only to check that the path is valid; `"gno.land/\x72/x"` yields
/// `gno.land/\x72/x`.
///
/// # Errors
///
/// Returns [`ScanError`] if the package clause or any import declaration is
/// malformed, an import path is not a valid path, or the token following the
/// import block cannot be tokenized. `file` is used only for error positions.
pub fn scan_imports(file: &str, body: &str) -> Result<Vec<String>, ScanError> {
    ImportParser::new(file, body)?.parse()
}

struct ImportParser<'src> {
    file: &'src str,
    lexer: Lexer<'src>,
    tok: Token<'src>,
}

impl<'src> ImportParser<'src> {
    fn new(file: &'src str, body: &'src str) -> Result<Self, ScanError> {
        let mut lexer = Lexer::new(body);
        let tok = match lexer.next_token() {
            Ok(tok) => tok,
            Err(err) => return Err(lex_error(file, &lexer, err)),
        };
        Ok(Self { file, lexer, tok })
    }

    fn parse(mut self) -> Result<Vec<String>, ScanError> {
        if !self.tok.is_keyword("package") {
            return Err(self.expected("'package'"));
        }
        self.next()?;
        if self.tok.kind != TokenKind::Ident {
            return Err(self.expected("'IDENT'"));
        }
        self.next()?;
        self.expect_semi()?;

        let mut imports = Vec::new();
        while self.tok.is_keyword("import") {
            self.next()?;
            if self.tok.is_op("(") {
                self.next()?;
                while !self.tok.is_op(")") && self.tok.kind != TokenKind::Eof {
                    imports.push(self.import_spec()?);
                }
                if !self.tok.is_op(")") {
                    return Err(self.expected("')'"));
                }
                self.next()?;
                self.expect_semi()?;
            } else {
                imports.push(self.import_spec()?);
            }
        }
        Ok(imports)
    }

    /// `[ "." | identifier ] path ";"`
    fn import_spec(&mut self) -> Result<String, ScanError> {
        if self.tok.kind == TokenKind::Ident || self.tok.is_op(".") {
            self.next()?;
        }

        let pos = self.tok.pos;
        let path = match &self.tok.kind {
            TokenKind::Str(value) if is_valid_import(value) => literal_path(self.tok.text),
            TokenKind::Str(_) => {
                let message = format!("invalid import path: {}", self.tok.text);
                return Err(self.error(pos, message));
            }
            TokenKind::Literal => return Err(self.error(pos, "import path must be a string")),
            _ => return Err(self.error(pos, "missing import path")),
        };
        self.next()?;
        self.expect_semi()?;
        Ok(path)
    }

    /// A semicolon is optional before a closing `)` or `}`.
    fn expect_semi(&mut self) -> Result<(), ScanError> {
        if self.tok.is_op(")") || self.tok.is_op("}") {
            return Ok(());
        }
        if self.tok.kind == TokenKind::Semicolon {
            return self.next();
        }
        Err(self.expected("';'"))
    }

    fn next(&mut self) -> Result<(), ScanError> {
        match self.lexer.next_token() {
            Ok(tok) => {
                self.tok = tok;
                Ok(())
            }
            Err(err) => Err(lex_error(self.file, &self.lexer, err)),
        }
    }

    fn expected(&self, what: &str) -> ScanError {
        let message = format!("expected {what}, found {}", self.tok.describe());
        self.error(self.tok.pos, message)
    }

    fn error(&self, pos: usize, message: impl Into<String>) -> ScanError {
        let (line, column) = self.lexer.line_col(pos);
        ScanError {
            file: self.file.to_string(),
            line,
            column,
            message: message.into(),
        }
    }
}

fn lex_error(file: &str, lexer: &Lexer<'_>, err: LexError) -> ScanError {
    let (line, column) = lexer.line_col(err.pos);
    ScanError {
        file: file.to_string(),
        line,
        column,
        message: err.message,
    }
}

/// The import path as written: the literal with one leading and one
/// trailing `"` removed. Escapes are not decoded, and raw literals keep their
/// backquotes with carriage returns dropped.
fn literal_path(text: &str) -> String {
    if text.starts_with('`') {
        return text.replace('\r', "");
    }
    let text = text.strip_suffix('"').unwrap_or(text);
    text.strip_prefix('"').unwrap_or(text).to_string()
}

/// A valid import path is non-empty and made of graphic, non-space
/// characters outside [`ILLEGAL_IMPORT_CHARS`].
fn is_valid_import(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| is_graphic(c) && !c.is_whitespace() && !ILLEGAL_IMPORT_CHARS.contains(c))
}

/// Excludes control, format and private-use characters.
fn is_graphic(c: char) -> bool {
    !c.is_control()
        && !matches!(
            c,
            '\u{00AD}'
                | '\u{0600}'..='\u{0605}'
                | '\u{061C}'
                | '\u{06DD}'
                | '\u{070F}'
                | '\u{180E}'
                | '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{206F}'
                | '\u{FEFF}'
                | '\u{FFF9}'..='\u{FFFB}'
                | '\u{E000}'..='\u{F8FF}'
                | '\u{F0000}'..='\u{10FFFF}'
        )
}
