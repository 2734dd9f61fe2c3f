use std::borrow::Cow;

use crate::{
    error::{Diagnostics, ParseError},
    expr::Expr,
    literal::Literal,
    token::Token,
    token_type::TokenTy,
};

/// Parses `tokens` into a single expression.
///
/// Returns `None` when any syntax error was reported; every error found in
/// the run ends up in `diagnostics`.
pub fn parse(tokens: Vec<Token>, diagnostics: &mut Diagnostics) -> Option<Expr> {
    Parser::new(tokens).parse(diagnostics)
}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |token| token.ty != TokenTy::Eof) {
            let line = tokens.last().map_or(1, |token| token.line);
            tokens.push(Token::eof(line));
        }
        Self { tokens, current: 0 }
    }

    pub fn parse(mut self, diagnostics: &mut Diagnostics) -> Option<Expr> {
        let mut result = None;
        let mut had_error = false;
        loop {
            match self.expression().and_then(|expr| self.end_of_input(expr)) {
                Ok(expr) => {
                    result = Some(expr);
                }
                Err(err) => {
                    had_error = true;
                    diagnostics.report(err);
                    self.synchonize();
                }
            }
            if self.is_at_end() {
                break;
            }
        }
        if had_error {
            None
        } else {
            result
        }
    }

    fn end_of_input(&self, expr: Expr) -> Result<Expr> {
        if self.is_at_end() {
            Ok(expr)
        } else {
            Err(ParseError::Custom(
                self.peek().clone(),
                "Expect end of expression.".into(),
            ))
        }
    }

    fn expression(&mut self) -> Result<Expr> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr> {
        let mut expr = self.comparison()?;

        while self.matches([TokenTy::BangEqual, TokenTy::EqualEqual]) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr> {
        let mut expr = self.term()?;

        while self.matches([
            TokenTy::Greater,
            TokenTy::GreaterEqual,
            TokenTy::Less,
            TokenTy::LessEqual,
        ]) {
            let operator = self.previous().clone();
            let right = self.term()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut expr = self.factor()?;

        while self.matches([TokenTy::Minus, TokenTy::Plus]) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr> {
        let mut expr = self.unary()?;

        while self.matches([TokenTy::Slash, TokenTy::Star]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.matches([TokenTy::Bang, TokenTy::Minus]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            Ok(Expr::unary(operator, right))
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> Result<Expr> {
        if self.matches([TokenTy::False]) {
            Ok(Expr::Literal(Literal::Boolean(false)))
        } else if self.matches([TokenTy::True]) {
            Ok(Expr::Literal(Literal::Boolean(true)))
        } else if self.matches([TokenTy::Nil]) {
            Ok(Expr::Literal(Literal::Nil))
        } else if self.matches([TokenTy::Number, TokenTy::String]) {
            let token = self.previous();
            match &token.literal {
                Some(literal) => Ok(Expr::Literal(literal.clone())),
                None => Err(ParseError::Custom(
                    token.clone(),
                    "Literal token carries no value.".into(),
                )),
            }
        } else if self.matches([TokenTy::LeftParen]) {
            let expr = self.expression()?;
            self.consume(TokenTy::RightParen, "Expect ')' after expression.".into())?;
            Ok(Expr::grouping(expr))
        } else {
            Err(ParseError::ExpectExpression(self.peek().clone()))
        }
    }

    fn synchonize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().ty == TokenTy::Semicolon {
                return;
            }

            if self.peek().ty.starts_statement() {
                return;
            }

            self.advance();
        }
    }

    fn consume(&mut self, ty: TokenTy, message: Cow<'static, str>) -> Result<&Token> {
        if self.check(ty) {
            Ok(self.advance())
        } else {
            Err(ParseError::Custom(self.peek().clone(), message))
        }
    }

    fn matches<const N: usize>(&mut self, tys: [TokenTy; N]) -> bool {
        if tys.iter().any(|&ty| self.check(ty)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, ty: TokenTy) -> bool {
        !self.is_at_end() && self.peek().ty == ty
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().ty == TokenTy::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }
}

type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast_printer::ast_to_string, error::Error, scanner::scan};

    fn parse_source(source: &str) -> (Option<Expr>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan(source, &mut diagnostics);
        let expr = parse(tokens, &mut diagnostics);
        (expr, diagnostics)
    }

    fn parse_ok(source: &str) -> Expr {
        let (expr, diagnostics) = parse_source(source);
        assert!(!diagnostics.had_error(), "{source}: {diagnostics:?}");
        expr.expect("expression")
    }

    fn number(n: f64) -> Expr {
        Expr::Literal(Literal::Number(n))
    }

    fn op(ty: TokenTy, lexeme: &str) -> Token {
        Token::new(ty, lexeme.into(), None, 1)
    }

    fn parse_errors(source: &str) -> Vec<ParseError> {
        let (expr, diagnostics) = parse_source(source);
        assert!(expr.is_none());
        diagnostics
            .iter()
            .filter_map(|err| match err {
                Error::Parse(err) => Some(err.clone()),
                Error::Scan(_) => None,
            })
            .collect()
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expected = Expr::binary(
            Expr::binary(number(1.0), op(TokenTy::Minus, "-"), number(2.0)),
            op(TokenTy::Minus, "-"),
            number(3.0),
        );
        assert_eq!(parse_ok("1 - 2 - 3"), expected);
    }

    #[test]
    fn factor_binds_tighter_than_term() {
        let expected = Expr::binary(
            number(1.0),
            op(TokenTy::Plus, "+"),
            Expr::binary(number(2.0), op(TokenTy::Star, "*"), number(3.0)),
        );
        assert_eq!(parse_ok("1 + 2 * 3"), expected);
    }

    #[test]
    fn precedence_levels() {
        assert_eq!(
            ast_to_string(&parse_ok("1 < 2 == 3 >= 4 - 5 / 6")),
            "(== (< 1 2) (>= 3 (- 4 (/ 5 6))))"
        );
        assert_eq!(ast_to_string(&parse_ok("1 != 2 != 3")), "(!= (!= 1 2) 3)");
    }

    #[test]
    fn unary_is_right_recursive() {
        assert_eq!(ast_to_string(&parse_ok("!!true")), "(! (! true))");
        assert_eq!(ast_to_string(&parse_ok("--1 * 2")), "(* (- (- 1)) 2)");
    }

    #[test]
    fn primary_literals() {
        assert_eq!(parse_ok("nil"), Expr::Literal(Literal::Nil));
        assert_eq!(parse_ok("false"), Expr::Literal(Literal::Boolean(false)));
        assert_eq!(parse_ok("\"hi\""), Expr::Literal(Literal::from("hi")));
        assert_eq!(parse_ok("12.5"), number(12.5));
    }

    #[test]
    fn grouping() {
        assert_eq!(
            ast_to_string(&parse_ok("-123 * (45.67)")),
            "(* (- 123) (group 45.67))"
        );
        assert_eq!(
            ast_to_string(&parse_ok("(1 - (2 - 3))")),
            "(group (- 1 (group (- 2 3))))"
        );
    }

    #[test]
    fn expect_expression() {
        let errors = parse_errors("1 +");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ParseError::ExpectExpression(token) if token.ty == TokenTy::Eof
        ));
    }

    #[test]
    fn missing_right_paren() {
        let errors = parse_errors("(1 + 2");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at end: Expect ')' after expression."
        );
    }

    #[test]
    fn trailing_tokens_are_an_error() {
        let errors = parse_errors("1 2");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at '2': Expect end of expression."
        );
    }

    #[test]
    fn reports_multiple_errors() {
        let errors = parse_errors("(1 + ; (2 + 3");
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at ';': Expect expression."
        );
        assert_eq!(
            errors[1].to_string(),
            "[line 1] Error at end: Expect ')' after expression."
        );
    }

    #[test]
    fn synchronizes_after_semicolon() {
        let errors = parse_errors("1 2 ; 3 +");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].token().lexeme, "2");
        assert_eq!(errors[1].token().ty, TokenTy::Eof);
    }

    #[test]
    fn synchronizes_before_statement_keyword() {
        // the second ')' is discarded while looking for a boundary
        let errors = parse_errors(") )\nprint");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line(), 1);
        assert_eq!(errors[1].token().ty, TokenTy::Print);
        assert_eq!(errors[1].line(), 2);
    }

    #[test]
    fn empty_input() {
        let errors = parse_errors("");
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ParseError::ExpectExpression(_)));
    }

    #[test]
    fn missing_eof_is_supplied() {
        let mut diagnostics = Diagnostics::new();
        let tokens = vec![Token::new(TokenTy::Nil, "nil".into(), None, 4)];
        let expr = Parser::new(tokens).parse(&mut diagnostics);
        assert_eq!(expr, Some(Expr::Literal(Literal::Nil)));
    }
}
