//! 128-bit blocks and the lane-parallel generator that mints them.
//!
//! A [`Block`] is four 32-bit lanes, lane 0 being the least significant. The
//! two 64-bit halves used by the text encodings are `lanes[0..2]` (low) and
//! `lanes[2..4]` (high), matching the in-memory layout of an SSE register on
//! a little-endian machine.

pub mod generator;
pub(crate) mod lanes;

#[cfg(test)]
mod tests;

pub use generator::{BlockGenerator, SharedBlockGenerator};

use std::fmt;

/// Upper bound on the rendered size of a block's debug text.
pub const TEXT_CAPACITY: usize = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block([u32; 4]);

impl Block {
    pub const ZERO: Block = Block([0; 4]);

    pub const fn from_lanes(lanes: [u32; 4]) -> Self {
        Block(lanes)
    }

    pub const fn from_halves(high: u64, low: u64) -> Self {
        Block([
            low as u32,
            (low >> 32) as u32,
            high as u32,
            (high >> 32) as u32,
        ])
    }

    pub const fn lanes(&self) -> [u32; 4] {
        self.0
    }

    pub const fn low(&self) -> u64 {
        (self.0[0] as u64) | ((self.0[1] as u64) << 32)
    }

    pub const fn high(&self) -> u64 {
        (self.0[2] as u64) | ((self.0[3] as u64) << 32)
    }

    /// Bitwise equality over all 128 bits.
    pub fn equals(&self, other: &Block) -> bool {
        self.0 == other.0
    }

    /// Both halves as 16-digit hex, high half first, newline terminated.
    pub fn to_hex(&self) -> String {
        bounded_text(
            "to_hex",
            format!("{:016x} {:016x}\n", self.high(), self.low()),
        )
    }

    /// Both halves as unsigned decimal, high half first, newline terminated.
    pub fn to_decimal(&self) -> String {
        bounded_text("to_decimal", format!("{} {}\n", self.high(), self.low()))
    }
}

fn bounded_text(encoder: &str, text: String) -> String {
    assert!(
        !text.is_empty() && text.len() < TEXT_CAPACITY,
        "Buffer overflow for Block::{encoder}(): {} bytes exceeds capacity {TEXT_CAPACITY}",
        text.len()
    );
    text
}

impl From<u128> for Block {
    fn from(value: u128) -> Self {
        Block::from_halves((value >> 64) as u64, value as u64)
    }
}

impl From<Block> for u128 {
    fn from(block: Block) -> Self {
        ((block.high() as u128) << 64) | block.low() as u128
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x} {:016x}", self.high(), self.low())
    }
}

impl fmt::LowerHex for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&u128::from(*self), f)
    }
}
