use super::error::{SymbolError, SymbolResult};

/// Identifier of a circuit wire, assigned by the circuit-construction stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(pub u32);

/// Opaque handle to a function body owned by the lowering stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FunctionRef(pub u32);

/// A fixed-width group of wires carrying one multi-bit value.
///
/// The width is fixed when the bundle is created; the wire slots stay empty
/// until the circuit stage binds concrete wires to them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bundle {
    wires: Vec<Option<WireId>>,
}

impl Bundle {
    pub fn new(width: usize) -> Self {
        Self {
            wires: vec![None; width],
        }
    }

    /// A fresh, unbound bundle of the same width.
    pub fn reshaped(&self) -> Self {
        Self::new(self.width())
    }

    pub fn width(&self) -> usize {
        self.wires.len()
    }

    pub fn wires(&self) -> &[Option<WireId>] {
        &self.wires
    }

    pub fn is_bound(&self) -> bool {
        self.wires.iter().all(Option::is_some)
    }

    /// Binds every slot at once. `owner` names the symbol for error reporting.
    pub fn bind_wires(
        &mut self,
        owner: &str,
        wires: impl IntoIterator<Item = WireId>,
    ) -> SymbolResult<()> {
        let wires: Vec<WireId> = wires.into_iter().collect();
        if wires.len() != self.width() {
            return Err(SymbolError::WidthMismatch {
                name: owner.to_string(),
                expected: self.width(),
                received: wires.len(),
            });
        }
        for (slot, wire) in self.wires.iter_mut().zip(wires) {
            *slot = Some(wire);
        }
        Ok(())
    }
}
