//! Versioned symbols for SSA-style lowering.
//!
//! Every write to a name creates a new [`Symbol`] version whose payload has
//! the same shape as the previous one but fresh, unbound wires. The
//! [`SymbolStore`] keeps every version alive for the whole compilation unit.

mod bundle;
mod error;
mod store;


pub use bundle::{Bundle, FunctionRef, WireId};
pub use error::{SymbolError, SymbolResult};
pub use store::{SymbolId, SymbolStore};

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolType {
    Numeric,
    Array,
    Function,
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SymbolType::Numeric => "num",
            SymbolType::Array => "array",
            SymbolType::Function => "func",
        };
        f.write_str(label)
    }
}

impl FromStr for SymbolType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "num" => Ok(SymbolType::Numeric),
            "array" => Ok(SymbolType::Array),
            "func" => Ok(SymbolType::Function),
            other => Err(format!("unknown symbol type `{other}`")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Numeric(Bundle),
    Array(Vec<Bundle>),
    Function(Option<FunctionRef>),
}

impl SymbolKind {
    fn empty(ty: SymbolType) -> Self {
        match ty {
            SymbolType::Numeric => SymbolKind::Numeric(Bundle::default()),
            SymbolType::Array => SymbolKind::Array(Vec::new()),
            SymbolType::Function => SymbolKind::Function(None),
        }
    }

    pub fn ty(&self) -> SymbolType {
        match self {
            SymbolKind::Numeric(_) => SymbolType::Numeric,
            SymbolKind::Array(_) => SymbolType::Array,
            SymbolKind::Function(_) => SymbolType::Function,
        }
    }

    /// Same shape, fresh wires. Function references carry over unchanged.
    fn reshaped(&self) -> Self {
        match self {
            SymbolKind::Numeric(bundle) => SymbolKind::Numeric(bundle.reshaped()),
            SymbolKind::Array(bundles) => {
                SymbolKind::Array(bundles.iter().map(Bundle::reshaped).collect())
            }
            SymbolKind::Function(func) => SymbolKind::Function(*func),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    version: u32,
    kind: SymbolKind,
}

impl Symbol {
    /// Version 0 of `name` with an empty payload.
    pub fn declare(name: impl Into<String>, ty: SymbolType) -> Self {
        Self {
            name: name.into(),
            version: 0,
            kind: SymbolKind::empty(ty),
        }
    }

    pub fn derive_next(&self) -> Self {
        Self {
            name: self.name.clone(),
            version: self.version + 1,
            kind: self.kind.reshaped(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn ty(&self) -> SymbolType {
        self.kind.ty()
    }

    pub fn kind(&self) -> &SymbolKind {
        &self.kind
    }

    pub fn total_width(&self) -> usize {
        match &self.kind {
            SymbolKind::Numeric(bundle) => bundle.width(),
            SymbolKind::Array(bundles) => bundles.iter().map(Bundle::width).sum(),
            SymbolKind::Function(_) => 0,
        }
    }

    pub fn bundle(&self) -> SymbolResult<&Bundle> {
        match &self.kind {
            SymbolKind::Numeric(bundle) => Ok(bundle),
            other => Err(kind_mismatch(&self.name, SymbolType::Numeric, other)),
        }
    }

    fn bundle_mut(&mut self) -> SymbolResult<&mut Bundle> {
        match &mut self.kind {
            SymbolKind::Numeric(bundle) => Ok(bundle),
            other => Err(kind_mismatch(&self.name, SymbolType::Numeric, other)),
        }
    }

    /// Declares the bit width of a numeric symbol, dropping any bound wires.
    /// Only version 0 takes a shape; later versions inherit it.
    pub fn set_width(&mut self, width: usize) -> SymbolResult<()> {
        self.require_shape_open()?;
        *self.bundle_mut()? = Bundle::new(width);
        Ok(())
    }

    pub fn bind_wires(&mut self, wires: impl IntoIterator<Item = WireId>) -> SymbolResult<()> {
        let name = self.name.clone();
        self.bundle_mut()?.bind_wires(&name, wires)
    }

    pub fn elements(&self) -> SymbolResult<&[Bundle]> {
        match &self.kind {
            SymbolKind::Array(bundles) => Ok(bundles),
            other => Err(kind_mismatch(&self.name, SymbolType::Array, other)),
        }
    }

    /// Binds the wires of one array element.
    pub fn bind_element_wires(
        &mut self,
        index: usize,
        wires: impl IntoIterator<Item = WireId>,
    ) -> SymbolResult<()> {
        match &mut self.kind {
            SymbolKind::Array(bundles) => {
                let len = bundles.len();
                let bundle = bundles
                    .get_mut(index)
                    .ok_or_else(|| SymbolError::ElementOutOfRange {
                        name: self.name.clone(),
                        index,
                        len,
                    })?;
                bundle.bind_wires(&self.name, wires)
            }
            other => Err(kind_mismatch(&self.name, SymbolType::Array, other)),
        }
    }

    /// Appends an array element of the given width. Version 0 only.
    pub fn push_element(&mut self, width: usize) -> SymbolResult<()> {
        self.require_shape_open()?;
        match &mut self.kind {
            SymbolKind::Array(bundles) => {
                bundles.push(Bundle::new(width));
                Ok(())
            }
            other => Err(kind_mismatch(&self.name, SymbolType::Array, other)),
        }
    }

    pub fn function(&self) -> SymbolResult<Option<FunctionRef>> {
        match &self.kind {
            SymbolKind::Function(func) => Ok(*func),
            other => Err(kind_mismatch(&self.name, SymbolType::Function, other)),
        }
    }

    pub fn set_function(&mut self, func: FunctionRef) -> SymbolResult<()> {
        self.require_shape_open()?;
        match &mut self.kind {
            SymbolKind::Function(slot) => {
                *slot = Some(func);
                Ok(())
            }
            other => Err(kind_mismatch(&self.name, SymbolType::Function, other)),
        }
    }

    fn require_shape_open(&self) -> SymbolResult<()> {
        if self.version == 0 {
            return Ok(());
        }
        Err(SymbolError::ShapeFixed {
            name: self.name.clone(),
            version: self.version,
        })
    }
}

fn kind_mismatch(name: &str, expected: SymbolType, found: &SymbolKind) -> SymbolError {
    SymbolError::KindMismatch {
        name: name.to_string(),
        expected,
        found: found.ty(),
    }
}
