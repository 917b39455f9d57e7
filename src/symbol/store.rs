use super::{Symbol, SymbolError, SymbolResult, SymbolType};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Stable handle to one symbol version inside a [`SymbolStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(usize);

/// Append-only registry of symbol versions.
///
/// Symbols live in a single arena and are never removed; each name maps to
/// the handles of its versions in version order. Only the newest version of a
/// name can be reached mutably.
#[derive(Clone, Debug, Default)]
pub struct SymbolStore {
    arena: Vec<Symbol>,
    versions: HashMap<String, Vec<SymbolId>>,
}

impl SymbolStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.versions.contains_key(name)
    }

    pub fn require(&self, name: &str) -> SymbolResult<()> {
        self.history(name).map(|_| ())
    }

    pub fn latest_version(&self, name: &str) -> SymbolResult<u32> {
        self.latest(name).map(Symbol::version)
    }

    pub fn latest(&self, name: &str) -> SymbolResult<&Symbol> {
        let id = self.latest_id(name)?;
        Ok(&self.arena[id.0])
    }

    pub fn latest_mut(&mut self, name: &str) -> SymbolResult<&mut Symbol> {
        let id = self.latest_id(name)?;
        Ok(&mut self.arena[id.0])
    }

    pub fn latest_id(&self, name: &str) -> SymbolResult<SymbolId> {
        self.history(name)?
            .last()
            .copied()
            .ok_or_else(|| unknown(name))
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.arena.get(id.0)
    }

    pub fn version(&self, name: &str, version: u32) -> SymbolResult<&Symbol> {
        self.history(name)?
            .get(version as usize)
            .map(|id| &self.arena[id.0])
            .ok_or_else(|| SymbolError::UnknownVersion {
                name: name.to_string(),
                version,
            })
    }

    /// Every version of `name`, oldest first.
    pub fn versions<'a>(
        &'a self,
        name: &str,
    ) -> SymbolResult<impl Iterator<Item = &'a Symbol> + 'a> {
        let history = self.history(name)?;
        Ok(history.iter().map(move |id| &self.arena[id.0]))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.versions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of symbols across all names and versions.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Binds `name` to a new version of type `ty`.
    ///
    /// An unknown name starts at version 0 with an empty payload. A known name
    /// gets the next version, shaped like the previous one; asking for a
    /// different type fails and leaves the store untouched.
    pub fn bind(&mut self, name: &str, ty: SymbolType) -> SymbolResult<&mut Symbol> {
        let symbol = match self.versions.get(name).and_then(|ids| ids.last()) {
            Some(&previous) => {
                let previous = &self.arena[previous.0];
                if previous.ty() != ty {
                    return Err(SymbolError::TypeMismatch {
                        name: name.to_string(),
                        existing: previous.ty(),
                        requested: ty,
                    });
                }
                previous.derive_next()
            }
            None => Symbol::declare(name, ty),
        };
        debug!(name, version = symbol.version(), ty = %ty, "bound symbol");

        let id = SymbolId(self.arena.len());
        self.arena.push(symbol);
        self.versions.entry(name.to_string()).or_default().push(id);
        Ok(&mut self.arena[id.0])
    }

    /// True when every name's versions run 0, 1, 2, ... without gaps.
    pub fn check_consistency(&self) -> bool {
        self.versions
            .iter()
            .all(|(name, history)| self.history_is_contiguous(name, history))
    }

    pub fn check_consistency_for(&self, name: &str) -> SymbolResult<bool> {
        let history = self.history(name)?;
        Ok(self.history_is_contiguous(name, history))
    }

    fn history_is_contiguous(&self, name: &str, history: &[SymbolId]) -> bool {
        if history.is_empty() {
            warn!(name, "symbol has an empty version history");
            return false;
        }
        for (expected, id) in history.iter().enumerate() {
            let symbol = &self.arena[id.0];
            if symbol.name() != name || symbol.version() as usize != expected {
                warn!(
                    name,
                    expected,
                    found = symbol.version(),
                    "symbol version history is not contiguous"
                );
                return false;
            }
        }
        true
    }

    fn history(&self, name: &str) -> SymbolResult<&[SymbolId]> {
        self.versions
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| unknown(name))
    }

    /// Appends `symbol` to its name's history without any checks.
    #[cfg(test)]
    pub(super) fn push_unchecked(&mut self, symbol: Symbol) {
        let id = SymbolId(self.arena.len());
        let name = symbol.name().to_string();
        self.arena.push(symbol);
        self.versions.entry(name).or_default().push(id);
    }
}

fn unknown(name: &str) -> SymbolError {
    SymbolError::UnknownSymbol {
        name: name.to_string(),
    }
}
