//! Query decoded JSON documents with a small path dialect: `.name` child access,
//! `..name` descendant search and `[*]`, `[i]`, `[start:end]` array access.
//!
//! ```
//! use jpath_query::Jpath;
//!
//! let doc: Jpath = r#"{"store": {"book": [{"price": 8.95}, {"price": 12.99}]}}"#
//!     .parse()
//!     .unwrap();
//! assert_eq!(doc.floats("$..book[*].price"), vec![8.95, 12.99]);
//! ```

pub mod binder;
pub mod context;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod parser;

pub use binder::{unmarshal, Binder, FromJson};
pub use context::Context;
pub use engine::{eval_path, first, or_default, unique, Jpath};
pub use errors::{BindError, JpathError, Result};
pub use parser::{compile, compile_strict, CompiledPath, Segment};
