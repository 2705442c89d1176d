//! # Recombine - Parser Combinator Library
//!
//! Recombine provides composable, type-safe parsers over Unicode text that can be combined
//! to build complex grammars from small building blocks. The library emphasizes:
//!
//! - **Failures as values**: every parser returns a `Result`; nothing panics on bad input
//! - **Explicit backtracking**: `or` commits to whatever the left side consumed unless it
//!   is wrapped in `attempt()`
//! - **Codepoint positions**: offsets and spans count `char`s, not bytes
//! - **Reusable parsers**: a parser value is immutable and can be run any number of times,
//!   from any number of threads once boxed
//!
//! ```
//! use recombine::prelude::*;
//! use recombine::text::{digit, is_char};
//!
//! let number = digit().some().map(|ds| ds.into_iter().collect::<String>());
//! let pair = number.left(is_char(',')).and(digit().some().map(|ds| ds.len()));
//!
//! assert_eq!(pair.run("12,345"), Ok((("12".to_string(), 3), 6)));
//! ```
//!
//! Two grammars are shipped behind Cargo features: a JSON reader (`json`) with a schema
//! checker on top of it (`validate`), and a small HTML fragment parser (`html`).

pub mod and;
pub mod attempt;
pub mod bind;
pub mod boxed;
pub mod eof;
pub mod error;
pub mod filter;
pub mod lazy;
pub mod many;
pub mod map;
pub mod map_err;
pub mod optional;
pub mod or;
pub mod parser;
pub mod position;
pub mod pure;
pub mod run;
pub mod sequence;
pub mod some;
pub mod state;
pub mod template;
pub mod text;
pub mod times;
pub mod trace;

#[cfg(feature = "html")]
pub mod html;
#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "validate")]
pub mod validate;

pub use and::and;
pub use attempt::attempt;
pub use bind::bind;
pub use boxed::BoxedParser;
pub use eof::eof;
pub use error::{Fail, Failure, Location};
pub use filter::filter;
pub use lazy::lazy;
pub use many::many;
pub use map::map;
pub use map_err::map_err;
pub use optional::optional;
pub use or::{choice, or};
pub use parser::{Parser, from_fn};
pub use position::{Span, index, with_range};
pub use pure::{empty, pure};
pub use sequence::sequence;
pub use some::some;
pub use state::State;
pub use template::template;
pub use times::times;

/// Everything needed to write grammars with method syntax
pub mod prelude {
    pub use crate::and::AndExt;
    pub use crate::attempt::AttemptExt;
    pub use crate::bind::BindExt;
    pub use crate::boxed::{BoxedExt, BoxedParser};
    pub use crate::filter::FilterExt;
    pub use crate::many::ManyExt;
    pub use crate::map::MapExt;
    pub use crate::map_err::MapErrExt;
    pub use crate::optional::OptionalExt;
    pub use crate::or::OrExt;
    pub use crate::parser::Parser;
    pub use crate::position::WithRangeExt;
    pub use crate::pure::WhenExt;
    pub use crate::run::RunExt;
    pub use crate::some::SomeExt;
    pub use crate::times::TimesExt;
    pub use crate::trace::TraceExt;
    pub use crate::{Fail, choice, eof, lazy, pure, sequence, template};
}
