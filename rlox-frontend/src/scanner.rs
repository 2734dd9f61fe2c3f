use crate::{
    error::{Diagnostics, ScanError},
    literal::Literal,
    token::Token,
    token_type::TokenTy,
};

static KEYWORDS: phf::Map<&'static str, TokenTy> = phf::phf_map! {
    "and" =>    TokenTy::And,
    "class" =>  TokenTy::Class,
    "else" =>   TokenTy::Else,
    "false" =>  TokenTy::False,
    "for" =>    TokenTy::For,
    "fun" =>    TokenTy::Fun,
    "if" =>     TokenTy::If,
    "nil" =>    TokenTy::Nil,
    "or" =>     TokenTy::Or,
    "print" =>  TokenTy::Print,
    "return" => TokenTy::Return,
    "super" =>  TokenTy::Super,
    "this" =>   TokenTy::This,
    "true" =>   TokenTy::True,
    "var" =>    TokenTy::Var,
    "while" =>  TokenTy::While,
};

/// Scans `source` into tokens, reporting lexical errors into `diagnostics`.
pub fn scan(source: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    Scanner::new(source).scan_tokens(diagnostics)
}

pub struct Scanner<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Always returns a sequence terminated by exactly one `Eof` token, even
    /// when errors were reported along the way.
    pub fn scan_tokens(mut self, diagnostics: &mut Diagnostics) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token(diagnostics);
        }
        self.tokens.push(Token::eof(self.line));
        self.tokens
    }

    fn scan_token(&mut self, diagnostics: &mut Diagnostics) {
        let ch = self.advance();
        match ch {
            '(' => self.add_token(TokenTy::LeftParen),
            ')' => self.add_token(TokenTy::RightParen),
            '{' => self.add_token(TokenTy::LeftBrace),
            '}' => self.add_token(TokenTy::RightBrace),
            ',' => self.add_token(TokenTy::Comma),
            '.' => self.add_token(TokenTy::Dot),
            '-' => self.add_token(TokenTy::Minus),
            '+' => self.add_token(TokenTy::Plus),
            ';' => self.add_token(TokenTy::Semicolon),
            '*' => self.add_token(TokenTy::Star),
            '!' => {
                let ty = if self.matches('=') {
                    TokenTy::BangEqual
                } else {
                    TokenTy::Bang
                };
                self.add_token(ty);
            }
            '=' => {
                let ty = if self.matches('=') {
                    TokenTy::EqualEqual
                } else {
                    TokenTy::Equal
                };
                self.add_token(ty);
            }
            '<' => {
                let ty = if self.matches('=') {
                    TokenTy::LessEqual
                } else {
                    TokenTy::Less
                };
                self.add_token(ty);
            }
            '>' => {
                let ty = if self.matches('=') {
                    TokenTy::GreaterEqual
                } else {
                    TokenTy::Greater
                };
                self.add_token(ty);
            }
            '/' => {
                if self.matches('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else if self.matches('*') {
                    self.block_comment();
                } else {
                    self.add_token(TokenTy::Slash);
                }
            }
            // skip
            ' ' | '\r' | '\t' => {}
            '\n' => {
                self.line += 1;
            }
            '"' => {
                self.string(diagnostics);
            }
            ch if ch.is_ascii_digit() => {
                self.number(diagnostics);
            }
            ch if is_identifier_start(ch) => {
                self.identifier();
            }
            _ => self.unexpected(diagnostics),
        }
    }

    // An unterminated comment runs to the end of input without a diagnostic.
    fn block_comment(&mut self) {
        while !self.is_at_end() {
            if self.peek() == '*' && self.peek_next() == '/' {
                self.current += 2;
                return;
            }
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }
    }

    fn identifier(&mut self) {
        while is_identifier_continue(self.peek()) {
            self.advance();
        }

        let text = &self.source[self.start..self.current];
        if let Some(&ty) = KEYWORDS.get(text) {
            self.add_token(ty);
        } else {
            self.add_token(TokenTy::Identifier);
        }
    }

    fn number(&mut self, diagnostics: &mut Diagnostics) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let lexeme = &self.source[self.start..self.current];
        match lexeme.parse::<f64>() {
            Ok(value) => self.add_literal(TokenTy::Number, Literal::Number(value)),
            Err(_) => diagnostics.report(ScanError::InvalidNumber {
                line: self.line,
                lexeme: lexeme.to_owned(),
            }),
        }
    }

    fn string(&mut self, diagnostics: &mut Diagnostics) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            diagnostics.report(ScanError::UnterminatedString { line: self.line });
            return;
        }

        // closing "
        self.advance();

        // trim
        let value = self.source[self.start + 1..self.current - 1].to_owned();
        self.add_literal(TokenTy::String, Literal::from(value));
    }

    fn unexpected(&mut self, diagnostics: &mut Diagnostics) {
        // report the whole character, not just its first byte
        let ch = self
            .source
            .get(self.start..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\0');
        self.current = self.start + ch.len_utf8();
        diagnostics.report(ScanError::UnexpectedCharacter {
            line: self.line,
            ch,
        });
    }

    fn peek(&self) -> char {
        self.char_at(self.current)
    }

    fn peek_next(&self) -> char {
        self.char_at(self.current + 1)
    }

    #[inline]
    fn char_at(&self, index: usize) -> char {
        self.source
            .as_bytes()
            .get(index)
            .map_or('\0', |&byte| byte.into())
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            false
        } else {
            self.current += 1;
            true
        }
    }

    fn advance(&mut self) -> char {
        let ch = self.peek();
        self.current += 1;
        ch
    }

    #[inline]
    fn add_token(&mut self, ty: TokenTy) {
        self.add_token_or_literal(ty, None)
    }

    #[inline]
    fn add_literal(&mut self, ty: TokenTy, literal: Literal) {
        self.add_token_or_literal(ty, Some(literal))
    }

    fn add_token_or_literal(&mut self, ty: TokenTy, literal: Option<Literal>) {
        let text = self.source[self.start..self.current].to_owned();
        self.tokens.push(Token::new(ty, text, literal, self.line))
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
