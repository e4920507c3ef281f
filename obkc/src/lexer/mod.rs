mod lexer;
mod token;

pub use lexer::{extract_options, parse_options_from_comment, Lexer};
pub use token::Token;
