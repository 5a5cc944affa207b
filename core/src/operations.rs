use log::debug;
use rand::{Rng, RngCore};

use crate::constants::GLYPH_SIZE;
use crate::display::Display;
use crate::error::Result;
use crate::opcode::Opcode;
use crate::registers::{Registers, VF};
use crate::state::{RunState, State};

// Every operation receives the state as it was after fetching, so `state.registers.pc`
// already points at the instruction following `op`.

/// clear
pub fn clr(_op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    Ok(State {
        display: Display::new(),
        draw_flag: true,
        ..*state
    })
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    let mut registers = state.registers;
    let pc = registers.pop()?;
    registers.jump(pc);
    Ok(State {
        registers,
        ..*state
    })
}

/// machine code routine at addr; not supported so this does nothing
pub fn sys(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    debug!("ignoring machine code routine at {:#05X}", op.addr());
    Ok(*state)
}

/// PC = addr
pub fn jump(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    let mut registers = state.registers;
    registers.jump(op.addr());
    Ok(State {
        registers,
        ..*state
    })
}

/// STACK.push(PC); PC = addr
pub fn call(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    let mut registers = state.registers;
    registers.push(registers.pc)?;
    registers.jump(op.addr());
    Ok(State {
        registers,
        ..*state
    })
}

/// Skips the next instruction if `condition` holds
fn skip_if(state: &State, condition: bool) -> Result<State> {
    let mut registers = state.registers;
    if condition {
        registers.skip();
    }
    Ok(State {
        registers,
        ..*state
    })
}

/// if Vx == kk then pc += 2
pub fn ske(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    skip_if(state, state.registers.v(op.x()) == op.kk())
}

/// if Vx != kk then pc += 2
pub fn skne(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    skip_if(state, state.registers.v(op.x()) != op.kk())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    skip_if(state, state.registers.v(op.x()) == state.registers.v(op.y()))
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    skip_if(state, state.registers.v(op.x()) != state.registers.v(op.y()))
}

/// Applies `f` to a copy of the registers
fn with_registers(state: &State, f: impl FnOnce(&mut Registers)) -> Result<State> {
    let mut registers = state.registers;
    f(&mut registers);
    Ok(State {
        registers,
        ..*state
    })
}

/// Vx = kk
pub fn load(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.set_v(op.x(), op.kk()))
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.set_v(op.x(), r.v(op.x()).wrapping_add(op.kk())))
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.set_v(op.x(), r.v(op.y())))
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.set_v(op.x(), r.v(op.x()) | r.v(op.y())))
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.set_v(op.x(), r.v(op.x()) & r.v(op.y())))
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.set_v(op.x(), r.v(op.x()) ^ r.v(op.y())))
}

/// Vx += Vy; VF = overflow
pub fn addr(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.add(op.x(), op.y()))
}

/// Vx -= Vy; VF = !underflow
pub fn sub(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.sub(op.x(), op.y()))
}

/// Vx >>= 1; VF = lsb
pub fn shr(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.shr(op.x()))
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.subn(op.x(), op.y()))
}

/// Vx <<= 1; VF = msb
pub fn shl(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.shl(op.x()))
}

/// I = addr
pub fn loadi(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.i = op.addr())
}

/// PC = V0 + addr
pub fn jumpi(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.jump(u16::from(r.v(0x0)) + op.addr()))
}

/// Vx = rand_byte & kk
pub fn rand(op: &dyn Opcode, state: &State, rng: &mut dyn RngCore) -> Result<State> {
    let rand_byte: u8 = rng.gen();
    with_registers(state, |r| r.set_v(op.x(), rand_byte & op.kk()))
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..n at position x, y on the display with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    let mut registers = state.registers;
    let mut display = state.display;

    let rows = state.memory.read_range(registers.i, op.n() as usize);
    let collision = display.draw_sprite(
        registers.v(op.x()) as usize,
        registers.v(op.y()) as usize,
        &rows,
    );
    registers.set_v(VF, collision as u8);

    Ok(State {
        registers,
        display,
        draw_flag: true,
        ..*state
    })
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    skip_if(state, state.keypad.is_pressed(state.registers.v(op.x())))
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    skip_if(state, !state.keypad.is_pressed(state.registers.v(op.x())))
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.set_v(op.x(), state.timers.delay.value()))
}

/// await keypress for Vx
pub fn keyd(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    let mut keypad = state.keypad;
    keypad.wait_for(op.x());
    Ok(State {
        keypad,
        run_state: RunState::WaitingForKey,
        ..*state
    })
}

/// DT = Vx
pub fn loads(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    let mut timers = state.timers;
    timers.delay.set(state.registers.v(op.x()));
    Ok(State { timers, ..*state })
}

/// ST = Vx
pub fn ld(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    let mut timers = state.timers;
    timers.sound.set(state.registers.v(op.x()));
    Ok(State { timers, ..*state })
}

/// I += Vx
pub fn addi(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.i = r.i.wrapping_add(u16::from(r.v(op.x()))))
}

/// I = Vx * 5
/// Set I to the memory address of the glyph for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    with_registers(state, |r| r.i = u16::from(r.v(op.x()) & 0xF) * GLYPH_SIZE)
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    let value = state.registers.v(op.x());
    let i = state.registers.i;
    let mut memory = state.memory;
    memory.write(i, value / 100 % 10);
    memory.write(i.wrapping_add(1), value / 10 % 10);
    memory.write(i.wrapping_add(2), value % 10);
    Ok(State { memory, ..*state })
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    let i = state.registers.i;
    let mut memory = state.memory;
    for register in 0..=op.x() {
        memory.write(i.wrapping_add(u16::from(register)), state.registers.v(register));
    }
    Ok(State { memory, ..*state })
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: &dyn Opcode, state: &State, _rng: &mut dyn RngCore) -> Result<State> {
    let i = state.registers.i;
    with_registers(state, |r| {
        for register in 0..=op.x() {
            r.set_v(register, state.memory.read(i.wrapping_add(u16::from(register))));
        }
    })
}
