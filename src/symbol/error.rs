use super::SymbolType;
use miette::Diagnostic;
use thiserror::Error;

pub type SymbolResult<T> = Result<T, SymbolError>;

#[derive(Clone, Debug, Diagnostic, Error, PartialEq, Eq)]
pub enum SymbolError {
    #[error("Unknown symbol `{name}`")]
    #[diagnostic(
        code(gash::symbol::unknown),
        help("declare the name before referring to it")
    )]
    UnknownSymbol { name: String },

    #[error("Symbol `{name}` already has type {existing}, cannot rebind it as {requested}")]
    #[diagnostic(code(gash::symbol::type_mismatch))]
    TypeMismatch {
        name: String,
        existing: SymbolType,
        requested: SymbolType,
    },

    #[error("Symbol `{name}` is {expected} wires wide but {received} wires were supplied")]
    #[diagnostic(code(gash::symbol::width_mismatch))]
    WidthMismatch {
        name: String,
        expected: usize,
        received: usize,
    },

    #[error("Symbol `{name}` is a {found} symbol, expected {expected}")]
    #[diagnostic(code(gash::symbol::kind_mismatch))]
    KindMismatch {
        name: String,
        expected: SymbolType,
        found: SymbolType,
    },

    #[error("Symbol `{name}` version {version} inherits its shape and cannot be reshaped")]
    #[diagnostic(
        code(gash::symbol::shape_fixed),
        help("only the first binding of a name declares its width")
    )]
    ShapeFixed { name: String, version: u32 },

    #[error("Symbol `{name}` has {len} elements, no element {index}")]
    #[diagnostic(code(gash::symbol::element_out_of_range))]
    ElementOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },

    #[error("Symbol `{name}` has no version {version}")]
    #[diagnostic(code(gash::symbol::unknown_version))]
    UnknownVersion { name: String, version: u32 },
}
