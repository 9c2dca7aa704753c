//! Backing memory for the 16-bit address space.
//!
//! Physical memory may be smaller than 64 KiB; addresses above its size
//! mirror back onto it.

use crate::Z80Error;

/// Largest memory the 16-bit address bus can reach.
pub const ADDRESS_SPACE: usize = 0x10000;

#[derive(Debug, Clone)]
pub struct Memory {
    bytes: Vec<u8>,
    mask: usize,
}

impl Memory {
    pub fn new(size: usize) -> Result<Self, Z80Error> {
        if size == 0 || size > ADDRESS_SPACE || !size.is_power_of_two() {
            return Err(Z80Error::InvalidMemorySize(size));
        }
        Ok(Self {
            bytes: vec![0; size],
            mask: size - 1,
        })
    }

    pub fn read(&self, address: u16) -> u8 {
        self.bytes[address as usize & self.mask]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.bytes[address as usize & self.mask] = value;
    }

    /// Little-endian word at `address`.
    pub fn read_word(&self, address: u16) -> u16 {
        let low = self.read(address);
        let high = self.read(address.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    pub fn write_word(&mut self, address: u16, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.write(address, low);
        self.write(address.wrapping_add(1), high);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_sizes_the_bus_cannot_address() {
        assert_eq!(Memory::new(0).unwrap_err(), Z80Error::InvalidMemorySize(0));
        assert!(Memory::new(0x1800).is_err());
        assert!(Memory::new(0x20000).is_err());
        assert!(Memory::new(ADDRESS_SPACE).is_ok());
    }

    #[test]
    fn addresses_mirror_above_physical_size() {
        let mut memory = Memory::new(0x1000).unwrap();
        memory.write(0x1005, 0xAB);
        assert_eq!(memory.read(0x0005), 0xAB);
        assert_eq!(memory.read(0xF005), 0xAB);
    }

    #[test]
    fn words_are_little_endian_and_wrap() {
        let mut memory = Memory::new(ADDRESS_SPACE).unwrap();
        memory.write_word(0xFFFF, 0x1234);
        assert_eq!(memory.read(0xFFFF), 0x34);
        assert_eq!(memory.read(0x0000), 0x12);
        assert_eq!(memory.read_word(0xFFFF), 0x1234);
    }
}
