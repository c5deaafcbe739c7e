pub mod executor;
pub mod parser;

pub use executor::{QueryExecutor, search};
pub use parser::{Command, ContextWindow, ParseError, SearchRequest, parse_command};
