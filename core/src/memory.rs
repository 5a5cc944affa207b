use crate::constants::{ADDRESS_MASK, MEMORY_SIZE, SPRITE_SHEET};
use crate::error::{Chip8Error, Result};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// ```text
/// 0x000 - 0x04F  sprite sheet
/// 0x050 - 0x1FF  unused (reserved for the interpreter on original hardware)
/// 0x200 - 0xFFF  program and data
/// ```
///
/// Addresses are masked to 12 bits on every access so reads and writes always
/// land in range; a computed address of 0x1003 refers to 0x003.
#[derive(Copy, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr & ADDRESS_MASK) as usize]
    }

    pub fn write(&mut self, addr: u16, byte: u8) {
        self.bytes[(addr & ADDRESS_MASK) as usize] = byte;
    }

    /// Reads the big-endian word at `addr`.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn read_word(&self, addr: u16) -> u16 {
        let left = u16::from(self.read(addr));
        let right = u16::from(self.read(addr.wrapping_add(1)));
        left << 8 | right
    }

    /// Reads `len` consecutive bytes starting at `addr`, wrapping past 0xFFF
    pub fn read_range(&self, addr: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| self.read(addr.wrapping_add(offset as u16)))
            .collect()
    }

    /// Copies `bytes` into memory starting at `start`.
    ///
    /// Nothing is written if the bytes would run past the end of memory.
    pub fn load(&mut self, bytes: &[u8], start: u16) -> Result<()> {
        let start = (start & ADDRESS_MASK) as usize;
        let max = MEMORY_SIZE - start;
        if bytes.len() > max {
            return Err(Chip8Error::ProgramTooLarge {
                size: bytes.len(),
                max,
            });
        }
        self.bytes[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
