//! Z80 register file and instruction stepping.

use vizzium_core::{RegisterPair, Target};

use crate::memory::Memory;
use crate::Z80Error;

/// Stack pointer value after reset.
pub const RESET_STACK_POINTER: u16 = 0xFFFF;

/// One bank of 8-bit registers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
}

impl Registers {
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f])
    }
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    pub fn set_af(&mut self, value: u16) {
        [self.a, self.f] = value.to_be_bytes();
    }
    pub fn set_bc(&mut self, value: u16) {
        [self.b, self.c] = value.to_be_bytes();
    }
    pub fn set_de(&mut self, value: u16) {
        [self.d, self.e] = value.to_be_bytes();
    }
    pub fn set_hl(&mut self, value: u16) {
        [self.h, self.l] = value.to_be_bytes();
    }
}

#[derive(Debug, Clone)]
pub struct Z80 {
    pub main: Registers,
    pub alternate: Registers,
    pub ix: u16,
    pub iy: u16,
    pub sp: u16,
    pub pc: u16,
    pub halted: bool,
    cycles: u64,
    memory: Memory,
}

impl Z80 {
    pub fn new(memory_size: usize) -> Result<Self, Z80Error> {
        Ok(Self {
            main: Registers::default(),
            alternate: Registers::default(),
            ix: 0,
            iy: 0,
            sp: RESET_STACK_POINTER,
            pc: 0,
            halted: false,
            cycles: 0,
            memory: Memory::new(memory_size)?,
        })
    }

    /// Execute one instruction and return the T-states it took.
    pub fn execute(&mut self) -> u8 {
        if self.halted {
            self.cycles += 4;
            return 4;
        }

        let pc = self.pc;
        let opcode = self.fetch_byte();
        let cycles = match opcode {
            0x00 => 4,
            // LD rr,nn
            0x01 | 0x11 | 0x21 | 0x31 => {
                let value = self.fetch_word();
                self.set_pair_sp((opcode >> 4) & 0x03, value);
                10
            }
            // LD r,n
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x3E => {
                let value = self.fetch_byte();
                self.set_register((opcode >> 3) & 0x07, value);
                7
            }
            // EX AF,AF'
            0x08 => {
                std::mem::swap(&mut self.main.a, &mut self.alternate.a);
                std::mem::swap(&mut self.main.f, &mut self.alternate.f);
                4
            }
            // JR e
            0x18 => {
                let offset = self.fetch_byte() as i8;
                self.pc = self.pc.wrapping_add_signed(offset.into());
                12
            }
            // LD (nn),A
            0x32 => {
                let address = self.fetch_word();
                self.memory.write(address, self.main.a);
                13
            }
            // LD A,(nn)
            0x3A => {
                let address = self.fetch_word();
                self.main.a = self.memory.read(address);
                13
            }
            0x76 => {
                self.halted = true;
                4
            }
            // POP qq
            0xC1 | 0xD1 | 0xE1 | 0xF1 => {
                let value = self.pop();
                self.set_pair_af((opcode >> 4) & 0x03, value);
                10
            }
            // JP nn
            0xC3 => {
                self.pc = self.fetch_word();
                10
            }
            // PUSH qq
            0xC5 | 0xD5 | 0xE5 | 0xF5 => {
                let value = self.pair_af((opcode >> 4) & 0x03);
                self.push(value);
                11
            }
            // EXX
            0xD9 => {
                let (main, alt) = (&mut self.main, &mut self.alternate);
                std::mem::swap(&mut main.b, &mut alt.b);
                std::mem::swap(&mut main.c, &mut alt.c);
                std::mem::swap(&mut main.d, &mut alt.d);
                std::mem::swap(&mut main.e, &mut alt.e);
                std::mem::swap(&mut main.h, &mut alt.h);
                std::mem::swap(&mut main.l, &mut alt.l);
                4
            }
            0xDD | 0xFD => self.execute_indexed(opcode == 0xDD),
            // LD SP,HL
            0xF9 => {
                self.sp = self.main.hl();
                6
            }
            _ => {
                tracing::trace!(pc, opcode, "Unsupported opcode executed as NOP");
                4
            }
        };

        self.cycles += u64::from(cycles);
        cycles
    }

    fn execute_indexed(&mut self, ix: bool) -> u8 {
        match self.fetch_byte() {
            // LD IX/IY,nn
            0x21 => {
                let value = self.fetch_word();
                if ix {
                    self.ix = value;
                } else {
                    self.iy = value;
                }
                14
            }
            opcode => {
                tracing::trace!(opcode, ix, "Unsupported indexed opcode executed as NOP");
                8
            }
        }
    }

    fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    fn fetch_word(&mut self) -> u16 {
        let value = self.memory.read_word(self.pc);
        self.pc = self.pc.wrapping_add(2);
        value
    }

    fn push(&mut self, value: u16) {
        self.sp = self.sp.wrapping_sub(2);
        self.memory.write_word(self.sp, value);
    }

    fn pop(&mut self) -> u16 {
        let value = self.memory.read_word(self.sp);
        self.sp = self.sp.wrapping_add(2);
        value
    }

    /// 8-bit register by its 3-bit opcode encoding (6, `(HL)`, is unused).
    fn set_register(&mut self, index: u8, value: u8) {
        match index {
            0 => self.main.b = value,
            1 => self.main.c = value,
            2 => self.main.d = value,
            3 => self.main.e = value,
            4 => self.main.h = value,
            5 => self.main.l = value,
            7 => self.main.a = value,
            _ => {}
        }
    }

    /// Register pair by its `rr` encoding: BC, DE, HL, SP.
    fn set_pair_sp(&mut self, index: u8, value: u16) {
        match index {
            0 => self.main.set_bc(value),
            1 => self.main.set_de(value),
            2 => self.main.set_hl(value),
            _ => self.sp = value,
        }
    }

    /// Register pair by its `qq` encoding: BC, DE, HL, AF.
    fn pair_af(&self, index: u8) -> u16 {
        match index {
            0 => self.main.bc(),
            1 => self.main.de(),
            2 => self.main.hl(),
            _ => self.main.af(),
        }
    }

    fn set_pair_af(&mut self, index: u8, value: u16) {
        match index {
            0 => self.main.set_bc(value),
            1 => self.main.set_de(value),
            2 => self.main.set_hl(value),
            _ => self.main.set_af(value),
        }
    }
}

impl Target for Z80 {
    fn read(&self, address: u16) -> u8 {
        self.memory.read(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory.write(address, value);
    }

    fn program_counter(&self) -> u16 {
        self.pc
    }

    fn set_program_counter(&mut self, address: u16) {
        self.pc = address;
        self.halted = false;
    }

    fn stack_pointer(&self) -> u16 {
        self.sp
    }

    fn register_pair(&self, pair: RegisterPair, shadow: bool) -> u16 {
        let bank = if shadow { &self.alternate } else { &self.main };
        match pair {
            RegisterPair::AF => bank.af(),
            RegisterPair::BC => bank.bc(),
            RegisterPair::DE => bank.de(),
            RegisterPair::HL => bank.hl(),
            RegisterPair::IX => self.ix,
            RegisterPair::IY => self.iy,
        }
    }

    fn step(&mut self) {
        self.execute();
    }

    fn cycle_count(&self) -> u64 {
        self.cycles
    }

    fn memory_size(&self) -> usize {
        self.memory.len()
    }
}
