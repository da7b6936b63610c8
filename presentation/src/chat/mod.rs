//! Interactive chat module
//!
//! Provides a line-editor based chat interface over the chat bot.

mod repl;

pub use repl::ChatRepl;
