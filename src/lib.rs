pub mod ast;
pub mod config;
pub mod editor;
pub mod error;
pub mod functions;
pub mod mixer;
pub mod parser;
pub mod processor;
pub mod transform;
pub mod utility;

pub use config::Config;
pub use editor::{EditorAdapter, MemoryEditor, Prompt};
pub use error::{Error, Result};
pub use functions::regnize;
pub use mixer::mix;
pub use processor::{Expander, expand, has_dynamic_values, tokenize};
pub use utility::{Outcome, Session, Utility};
