//! The debug target as seen by the console.
//!
//! The console never knows how the target executes instructions; it only
//! reads and writes memory, moves the program counter, asks for register
//! values and requests single steps.

use std::fmt;

/// 16-bit register pairs shown in the status view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterPair {
    AF,
    BC,
    DE,
    HL,
    IX,
    IY,
}

impl RegisterPair {
    /// Pairs that have a shadow copy.
    pub const BANKED: [RegisterPair; 4] = [
        RegisterPair::AF,
        RegisterPair::BC,
        RegisterPair::DE,
        RegisterPair::HL,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RegisterPair::AF => "AF",
            RegisterPair::BC => "BC",
            RegisterPair::DE => "DE",
            RegisterPair::HL => "HL",
            RegisterPair::IX => "IX",
            RegisterPair::IY => "IY",
        }
    }
}

impl fmt::Display for RegisterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A debuggable processor with a 16-bit address space.
pub trait Target {
    fn read(&self, address: u16) -> u8;
    fn write(&mut self, address: u16, value: u8);

    fn program_counter(&self) -> u16;
    fn set_program_counter(&mut self, address: u16);
    fn stack_pointer(&self) -> u16;

    /// Value of a register pair. `shadow` selects the alternate bank for
    /// pairs that have one and is ignored otherwise.
    fn register_pair(&self, pair: RegisterPair, shadow: bool) -> u16;

    /// Execute one instruction, advancing the cycle counter.
    fn step(&mut self);

    fn cycle_count(&self) -> u64;

    /// Number of distinct bytes of backing memory.
    fn memory_size(&self) -> usize;
}

/// Register and counter values captured for the status view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetSnapshot {
    pub pc: u16,
    pub sp: u16,
    /// AF, BC, DE, HL.
    pub primary: [u16; 4],
    /// AF', BC', DE', HL'.
    pub shadow: [u16; 4],
    pub ix: u16,
    pub iy: u16,
    pub cycles: u64,
}

impl TargetSnapshot {
    pub fn capture<T: Target + ?Sized>(target: &T) -> Self {
        let bank = |shadow| RegisterPair::BANKED.map(|pair| target.register_pair(pair, shadow));
        Self {
            pc: target.program_counter(),
            sp: target.stack_pointer(),
            primary: bank(false),
            shadow: bank(true),
            ix: target.register_pair(RegisterPair::IX, false),
            iy: target.register_pair(RegisterPair::IY, false),
            cycles: target.cycle_count(),
        }
    }
}
