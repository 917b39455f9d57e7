pub mod block;
pub mod config;
pub mod diagnostics;
pub mod logging;
pub mod symbol;

pub use block::{Block, BlockGenerator, SharedBlockGenerator};
pub use config::{ConfigError, RuntimeConfig};
pub use symbol::{Symbol, SymbolError, SymbolStore, SymbolType};

#[cfg(test)]
mod tests;
