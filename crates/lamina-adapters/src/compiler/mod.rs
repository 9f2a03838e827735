//! Template compiler adapters.

mod handlebars;

pub use self::handlebars::HandlebarsCompiler;
