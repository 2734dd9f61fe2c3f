use crate::{literal::Literal, token::Token};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Grouping(Box<Expr>),
    Literal(Literal),
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
}

/// An operation over the expression tree, one method per node variant.
///
/// Adding an operation means writing a new visitor; adding a variant means
/// touching every visitor.
pub trait Visitor<R> {
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> R;
    fn visit_grouping(&mut self, expression: &Expr) -> R;
    fn visit_literal(&mut self, value: &Literal) -> R;
    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> R;
}

impl Expr {
    pub fn accept<R, V: Visitor<R> + ?Sized>(&self, visitor: &mut V) -> R {
        match self {
            Expr::Binary {
                left,
                operator,
                right,
            } => visitor.visit_binary(left, operator, right),
            Expr::Grouping(expression) => visitor.visit_grouping(expression),
            Expr::Literal(value) => visitor.visit_literal(value),
            Expr::Unary { operator, right } => visitor.visit_unary(operator, right),
        }
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn grouping(expression: Expr) -> Self {
        Expr::Grouping(Box::new(expression))
    }

    pub fn unary(operator: Token, right: Expr) -> Self {
        Expr::Unary {
            operator,
            right: Box::new(right),
        }
    }
}

impl<T: Into<Literal>> From<T> for Expr {
    fn from(value: T) -> Self {
        Expr::Literal(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_type::TokenTy;

    #[derive(Default)]
    struct Counter {
        binary: usize,
        grouping: usize,
        literal: usize,
        unary: usize,
    }

    impl Visitor<()> for Counter {
        fn visit_binary(&mut self, left: &Expr, _: &Token, right: &Expr) {
            self.binary += 1;
            left.accept(self);
            right.accept(self);
        }

        fn visit_grouping(&mut self, expression: &Expr) {
            self.grouping += 1;
            expression.accept(self);
        }

        fn visit_literal(&mut self, _: &Literal) {
            self.literal += 1;
        }

        fn visit_unary(&mut self, _: &Token, right: &Expr) {
            self.unary += 1;
            right.accept(self);
        }
    }

    struct Depth;

    impl Visitor<usize> for Depth {
        fn visit_binary(&mut self, left: &Expr, _: &Token, right: &Expr) -> usize {
            1 + left.accept(self).max(right.accept(self))
        }

        fn visit_grouping(&mut self, expression: &Expr) -> usize {
            1 + expression.accept(self)
        }

        fn visit_literal(&mut self, _: &Literal) -> usize {
            1
        }

        fn visit_unary(&mut self, _: &Token, right: &Expr) -> usize {
            1 + right.accept(self)
        }
    }

    fn sample() -> Expr {
        // -123 * (45.67)
        Expr::binary(
            Expr::unary(
                Token::new(TokenTy::Minus, "-".into(), None, 1),
                Expr::Literal(Literal::Number(123.0)),
            ),
            Token::new(TokenTy::Star, "*".into(), None, 1),
            Expr::grouping(Expr::Literal(Literal::Number(45.67))),
        )
    }

    #[test]
    fn dispatches_to_each_variant() {
        let mut counter = Counter::default();
        sample().accept(&mut counter);
        assert_eq!(counter.binary, 1);
        assert_eq!(counter.grouping, 1);
        assert_eq!(counter.literal, 2);
        assert_eq!(counter.unary, 1);
    }

    #[test]
    fn result_type_is_chosen_by_visitor() {
        assert_eq!(sample().accept(&mut Depth), 3);
        assert_eq!(Expr::from(()).accept(&mut Depth), 1);
    }
}
