use crate::constants::{ADDRESS_MASK, INSTRUCTION_SIZE, PROGRAM_START, STACK_DEPTH};
use crate::error::{Chip8Error, Result};

/// The flag register; also general purpose but clobbered by arithmetic and drawing
pub const VF: u8 = 0xF;

/// # Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag
/// - (i) a 16-bit memory address register
/// - (pc) a 16-bit program counter
/// - (stack, sp) 16 return addresses and the number of them in use
///
/// The delay and sound timer registers live with their timers, see `crate::timer`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: u8,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn v(&self, x: u8) -> u8 {
        self.v[(x & 0xF) as usize]
    }

    pub fn set_v(&mut self, x: u8, value: u8) {
        self.v[(x & 0xF) as usize] = value;
    }

    /// All 16 general registers V0..VF
    pub fn all_v(&self) -> &[u8; 16] {
        &self.v
    }

    /// Number of return addresses on the stack
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Moves the program counter to the next instruction
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(INSTRUCTION_SIZE) & ADDRESS_MASK;
    }

    /// Skips the next instruction; the current one has already been advanced past
    pub fn skip(&mut self) {
        self.advance();
    }

    /// Jumps to `addr` within the 12-bit address space
    pub fn jump(&mut self, addr: u16) {
        self.pc = addr & ADDRESS_MASK;
    }

    /// Address of the instruction being executed, given that the pc was advanced on fetch
    fn current_instruction(&self) -> u16 {
        self.pc.wrapping_sub(INSTRUCTION_SIZE) & ADDRESS_MASK
    }

    pub fn push(&mut self, addr: u16) -> Result<()> {
        if self.sp as usize == STACK_DEPTH {
            return Err(Chip8Error::StackOverflow {
                address: self.current_instruction(),
            });
        }
        self.stack[self.sp as usize] = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow {
                address: self.current_instruction(),
            });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Vx += Vy; VF = overflow
    pub fn add(&mut self, x: u8, y: u8) {
        let (res, over) = self.v(x).overflowing_add(self.v(y));
        self.set_v(x, res);
        self.set_v(VF, over as u8);
    }

    /// Vx -= Vy; VF = !underflow
    pub fn sub(&mut self, x: u8, y: u8) {
        let (res, under) = self.v(x).overflowing_sub(self.v(y));
        self.set_v(x, res);
        self.set_v(VF, !under as u8);
    }

    /// Vx = Vy - Vx; VF = !underflow
    pub fn subn(&mut self, x: u8, y: u8) {
        let (res, under) = self.v(y).overflowing_sub(self.v(x));
        self.set_v(x, res);
        self.set_v(VF, !under as u8);
    }

    /// Vx >>= 1; VF = shifted out bit
    pub fn shr(&mut self, x: u8) {
        let value = self.v(x);
        self.set_v(x, value >> 1);
        self.set_v(VF, value & 0x1);
    }

    /// Vx <<= 1; VF = shifted out bit
    pub fn shl(&mut self, x: u8) {
        let value = self.v(x);
        self.set_v(x, value << 1);
        self.set_v(VF, value >> 7);
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
