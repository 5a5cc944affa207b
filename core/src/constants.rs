use std::time::Duration;

/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Mask applied to every address so it stays within `MEMORY_SIZE`
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Where programs are loaded and where execution starts
pub const PROGRAM_START: u16 = 0x200;

/// Largest program that fits between `PROGRAM_START` and the end of memory
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Maximum number of nested subroutine calls
pub const STACK_DEPTH: usize = 16;

/// Every instruction is two bytes long
pub const INSTRUCTION_SIZE: u16 = 2;

/// Instructions executed per `CpuTick` unless configured otherwise
pub const DEFAULT_INSTRUCTIONS_PER_TICK: u32 = 2;

/// Both timers count down at 60Hz
pub const TIMER_PERIOD: Duration = Duration::from_nanos(16_666_667);

/// Bytes per glyph in the `SPRITE_SHEET`
pub const GLYPH_SIZE: u16 = 5;

/// # Sprite Sheet
/// Glyphs for the hexadecimal digits 0..F, stored from address 0x000.
///
/// Each glyph is 5 rows of 4 pixels, e.g. `0`:
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
