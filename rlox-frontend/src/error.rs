use std::borrow::Cow;

use crate::{token::Token, token_type::TokenTy};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    #[error("[line {line}] Error: Unexpected character '{ch}'.")]
    UnexpectedCharacter { line: usize, ch: char },
    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString { line: usize },
    #[error("[line {line}] Error: Invalid number '{lexeme}'.")]
    InvalidNumber { line: usize, lexeme: String },
}

impl ScanError {
    pub fn line(&self) -> usize {
        match self {
            ScanError::UnexpectedCharacter { line, .. }
            | ScanError::UnterminatedString { line }
            | ScanError::InvalidNumber { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("[line {}] Error{}: Expect expression.", .0.line, location(.0))]
    ExpectExpression(Token),
    #[error("[line {}] Error{}: {}", .0.line, location(.0), .1)]
    Custom(Token, Cow<'static, str>),
}

impl ParseError {
    pub fn token(&self) -> &Token {
        match self {
            ParseError::ExpectExpression(token) | ParseError::Custom(token, _) => token,
        }
    }

    pub fn line(&self) -> usize {
        self.token().line
    }
}

fn location(token: &Token) -> Cow<'_, str> {
    if token.ty == TokenTy::Eof {
        " at end".into()
    } else {
        format!(" at '{}'", token.lexeme).into()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn line(&self) -> usize {
        match self {
            Error::Scan(err) => err.line(),
            Error::Parse(err) => err.line(),
        }
    }
}

/// Collects the errors reported by the scanner and the parser during a run.
///
/// A host checks [`Diagnostics::had_error`] before trusting the tree it got
/// back, and calls [`Diagnostics::reset`] between independent runs.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, err: impl Into<Error>) {
        self.errors.push(err.into());
    }

    #[inline]
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    pub fn reset(&mut self) {
        self.errors.clear();
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
