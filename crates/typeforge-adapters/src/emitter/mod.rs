//! Code emitter adapters.

mod literal;
mod reader;
mod typescript;

pub use typescript::{EmitterSettings, TypeScriptEmitter};
