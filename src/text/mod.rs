//! Primitive parsers over decoded codepoints

pub mod char;
pub mod class;
pub mod span;
pub mod string;

pub use char::{any_char_of, is_char, one};
pub use class::{alpha, cr, digit, hex_digit, lf, lower, space, tab, upper};
pub use span::span;
pub use string::{any_string_of, is_string};
