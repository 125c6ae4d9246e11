// Library surface for headless/integration tests and reuse.
// The binary only adds terminal setup and CLI parsing on top.
pub mod app;
pub mod config;
pub mod corpus;
pub mod error;
pub mod input;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod ui;
pub mod util;
pub mod words;

pub use error::{Error, Result};
