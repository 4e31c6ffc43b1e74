mod parse;
mod store;

pub use parse::{format_duration, parse_date, parse_duration};
pub use store::{SessionSnapshot, SessionStore, NAMESPACE_KEY};
