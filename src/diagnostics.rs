use crate::symbol::SymbolError;
use miette::{
    Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource, Report, SourceSpan,
};
use thiserror::Error;

/// Byte range in a source file, supplied by the pass that triggered a bind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A symbol error located in user source.
#[derive(Clone, Debug)]
pub struct LocatedSymbolError {
    pub error: SymbolError,
    pub span: Span,
}

#[derive(Debug, Error, Diagnostic, Clone)]
#[error("{message}")]
pub struct SymbolDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
    message: String,
    label: String,
}

impl SymbolDiagnostic {
    pub fn from_error(src: NamedSource<String>, err: &LocatedSymbolError) -> Self {
        Self {
            src,
            span: span_to_source_span(err.span),
            help: err.error.help().map(|help| help.to_string()),
            message: err.error.to_string(),
            label: label_for(&err.error).to_string(),
        }
    }
}

fn label_for(error: &SymbolError) -> &'static str {
    match error {
        SymbolError::UnknownSymbol { .. } => "not bound in this scope",
        SymbolError::TypeMismatch { .. } => "rebound with a different type",
        SymbolError::WidthMismatch { .. } => "wire count differs from declared width",
        SymbolError::KindMismatch { .. } => "used as the wrong kind of symbol",
        SymbolError::ShapeFixed { .. } => "shape was fixed by the first binding",
        SymbolError::ElementOutOfRange { .. } => "no such array element",
        SymbolError::UnknownVersion { .. } => "version never bound",
    }
}

/// Prints each error to stderr. Returns whether anything was printed.
pub fn emit_symbol_errors(
    path: &str,
    source: &str,
    errors: &[LocatedSymbolError],
) -> bool {
    let src = NamedSource::new(path, source.to_string());
    let mut emitted = false;
    for err in errors {
        let diagnostic = SymbolDiagnostic::from_error(src.clone(), err);
        eprintln!("{:?}", Report::new(diagnostic));
        emitted = true;
    }
    emitted
}

/// Renders one error without colours, for logs and tests.
pub fn render_symbol_error(path: &str, source: &str, err: &LocatedSymbolError) -> String {
    let diagnostic =
        SymbolDiagnostic::from_error(NamedSource::new(path, source.to_string()), err);
    let mut out = String::new();
    if GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        .render_report(&mut out, &diagnostic)
        .is_err()
    {
        return diagnostic.message;
    }
    out
}

fn span_to_source_span(span: Span) -> SourceSpan {
    SourceSpan::from((span.start, span.end.saturating_sub(span.start)))
}
