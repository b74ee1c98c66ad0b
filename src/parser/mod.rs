pub mod mensa_parser;

pub use mensa_parser::{MensaParser, Parser};
