//! Vizzium Z80 - a small Z80 model to debug against
//!
//! Implements enough of the processor for the console to be useful: the
//! full register file (including the shadow bank and index registers), a
//! mirrored memory of configurable size, and single-stepping over a subset
//! of the load, exchange, jump and stack instructions. Opcodes outside that
//! subset execute as NOPs.

pub mod cpu;
pub mod memory;

pub use cpu::{Registers, Z80};
pub use memory::Memory;

use thiserror::Error;

/// Errors from building a Z80 target.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Z80Error {
    #[error("Invalid memory size: {0:#x} (must be a power of two between 1 and 0x10000)")]
    InvalidMemorySize(usize),
}
