use crate::{
    expr::{Expr, Visitor},
    literal::Literal,
    token::Token,
};

pub fn ast_to_string(expr: &Expr) -> String {
    expr.accept(&mut AstPrinter)
}

/// Renders an expression as a fully parenthesized prefix form, e.g.
/// `(* (- 123) (group 45.67))`.
pub struct AstPrinter;

impl AstPrinter {
    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut str = String::new();
        str.push('(');
        str.push_str(name);
        for expr in exprs {
            str.push(' ');
            str.push_str(&expr.accept(self));
        }
        str.push(')');
        str
    }
}

impl Visitor<String> for AstPrinter {
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        self.parenthesize(&operator.lexeme, &[left, right])
    }

    fn visit_grouping(&mut self, expression: &Expr) -> String {
        self.parenthesize("group", &[expression])
    }

    fn visit_literal(&mut self, value: &Literal) -> String {
        format!("{value}")
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> String {
        self.parenthesize(&operator.lexeme, &[right])
    }
}

/// Renders an expression back into source text the parser accepts.
///
/// Only explicit groupings get parentheses, so a tree that came out of the
/// parser reparses into the same tree.
pub struct InfixPrinter;

impl Visitor<String> for InfixPrinter {
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        format!(
            "{} {} {}",
            left.accept(self),
            operator.lexeme,
            right.accept(self)
        )
    }

    fn visit_grouping(&mut self, expression: &Expr) -> String {
        format!("({})", expression.accept(self))
    }

    fn visit_literal(&mut self, value: &Literal) -> String {
        match value {
            Literal::String(s) => format!("\"{s}\""),
            _ => value.to_string(),
        }
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> String {
        format!("{}{}", operator.lexeme, right.accept(self))
    }
}
