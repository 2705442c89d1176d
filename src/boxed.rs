use crate::error::Fail;
use crate::parser::Parser;
use crate::state::State;
use std::fmt;
use std::sync::Arc;

type DynParser<T, E> = dyn Parser<Output = T, Error = E> + Send + Sync;

/// A type-erased, cheaply clonable parser
///
/// Boxing hides the nested combinator type, which is what lets recursive rules be written
/// as plain functions and lets parsers of different shapes share one `Vec`. The handle is
/// `Send + Sync`, so a single parser value can serve several threads at once.
pub struct BoxedParser<T, E = Fail> {
    parser: Arc<DynParser<T, E>>,
}

impl<T, E> BoxedParser<T, E> {
    pub fn new<P>(parser: P) -> Self
    where
        P: Parser<Output = T, Error = E> + Send + Sync + 'static,
    {
        BoxedParser {
            parser: Arc::new(parser),
        }
    }
}

impl<T, E> Clone for BoxedParser<T, E> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Arc::clone(&self.parser),
        }
    }
}

impl<T, E> fmt::Debug for BoxedParser<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxedParser")
    }
}

impl<T, E> Parser for BoxedParser<T, E> {
    type Output = T;
    type Error = E;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        self.parser.parse(state)
    }
}

/// Extension trait to add .boxed() method support for parsers
pub trait BoxedExt: Parser + Sized {
    fn boxed(self) -> BoxedParser<Self::Output, Self::Error>
    where
        Self: Send + Sync + 'static,
    {
        BoxedParser::new(self)
    }
}

impl<P> BoxedExt for P where P: Parser {}
