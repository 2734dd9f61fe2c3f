//! Front end of a tree-walking Lox interpreter: a scanner producing tokens and
//! a recursive-descent parser producing an expression tree.
//!
//! ```
//! use rlox_frontend::{ast_to_string, parse, scan, Diagnostics};
//!
//! let mut diagnostics = Diagnostics::new();
//! let tokens = scan("-123 * (45.67)", &mut diagnostics);
//! let expr = parse(tokens, &mut diagnostics).unwrap();
//! assert_eq!(ast_to_string(&expr), "(* (- 123) (group 45.67))");
//! ```

pub mod ast_printer;
pub mod error;
pub mod expr;
pub mod literal;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod token_type;

pub use ast_printer::{ast_to_string, AstPrinter, InfixPrinter};
pub use error::{Diagnostics, Error, ParseError, ScanError};
pub use expr::{Expr, Visitor};
pub use literal::Literal;
pub use parser::{parse, Parser};
pub use scanner::{scan, Scanner};
pub use token::Token;
pub use token_type::TokenTy;
