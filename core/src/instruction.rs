use rand::RngCore;

use crate::error::Result;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// A single instruction's state transition
pub type Operation = fn(op: &dyn Opcode, state: &State, rng: &mut dyn RngCore) -> Result<State>;

/// Selects the correct Instruction for a given Opcode.
///
/// Returns `None` for words that match no instruction in the table.
pub fn from_op(op: &dyn Opcode) -> Option<Operation> {
    let operation: Operation = match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => clr,
        (0x0, 0x0, 0xE, 0xE) => rts,
        (0x0, ..) => sys,
        (0x1, ..) => jump,
        (0x2, ..) => call,
        (0x3, ..) => ske,
        (0x4, ..) => skne,
        (0x5, .., 0x0) => skre,
        (0x6, ..) => load,
        (0x7, ..) => add,
        (0x8, .., 0x0) => mv,
        (0x8, .., 0x1) => or,
        (0x8, .., 0x2) => and,
        (0x8, .., 0x3) => xor,
        (0x8, .., 0x4) => addr,
        (0x8, .., 0x5) => sub,
        (0x8, .., 0x6) => shr,
        (0x8, .., 0x7) => subn,
        (0x8, .., 0xE) => shl,
        (0x9, .., 0x0) => skrne,
        (0xA, ..) => loadi,
        (0xB, ..) => jumpi,
        (0xC, ..) => rand,
        (0xD, ..) => draw,
        (0xE, .., 0x9, 0xE) => skpr,
        (0xE, .., 0xA, 0x1) => skup,
        (0xF, .., 0x0, 0x7) => moved,
        (0xF, .., 0x0, 0xA) => keyd,
        (0xF, .., 0x1, 0x5) => loads,
        (0xF, .., 0x1, 0x8) => ld,
        (0xF, .., 0x1, 0xE) => addi,
        (0xF, .., 0x2, 0x9) => ldspr,
        (0xF, .., 0x3, 0x3) => bcd,
        (0xF, .., 0x5, 0x5) => stor,
        (0xF, .., 0x6, 0x5) => read,
        _ => return None,
    };
    Some(operation)
}

#[cfg(test)]
mod test_instruction {
    use super::*;
    use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
    use crate::error::Chip8Error;
    use crate::registers::VF;
    use crate::state::RunState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Executes `op` the way the cpu does: the pc is moved past it first
    fn execute(op: u16, state: &State) -> Result<State> {
        let mut state = *state;
        state.registers.advance();
        let mut rng = StdRng::seed_from_u64(0x8);
        from_op(&op).expect("opcode should decode")(&op, &state, &mut rng)
    }

    fn run(op: u16, state: &State) -> State {
        execute(op, state).unwrap()
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::new();
        state.display.draw_sprite(0, 0, &[0x80]);
        let state = run(0x00E0, &state);
        assert!(!state.display.get_cell(0, 0));
        assert!(state.draw_flag);
        assert_eq!(state.registers.pc, 0x0202);
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = State::new();
        state.registers.push(0x0ABC).unwrap();
        let state = run(0x00EE, &state);
        assert_eq!(state.registers.sp(), 0x0);
        assert_eq!(state.registers.pc, 0x0ABC);
    }

    #[test]
    fn test_00ee_ret_underflows() {
        let state = State::new();
        assert_eq!(
            execute(0x00EE, &state).err(),
            Some(Chip8Error::StackUnderflow { address: 0x200 })
        );
    }

    #[test]
    fn test_0nnn_sys_is_ignored() {
        let state = State::new();
        let state = run(0x0123, &state);
        assert_eq!(state.registers.pc, 0x0202);
    }

    #[test]
    fn test_1nnn_jp() {
        let state = State::new();
        let state = run(0x1ABC, &state);
        assert_eq!(state.registers.pc, 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let mut state = State::new();
        state.registers.pc = 0x0ABC;
        let state = run(0x2123, &state);
        assert_eq!(state.registers.sp(), 0x1);
        assert_eq!(state.registers.pc, 0x0123);
        let mut registers = state.registers;
        assert_eq!(registers.pop(), Ok(0x0ABE));
    }

    #[test]
    fn test_2nnn_call_overflows() {
        let mut state = State::new();
        for _ in 0..16 {
            state = run(0x2200, &state);
        }
        assert_eq!(
            execute(0x2200, &state).err(),
            Some(Chip8Error::StackOverflow { address: 0x200 })
        );
    }

    #[test]
    fn test_3xkk_se_skips() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        let state = run(0x3111, &state);
        assert_eq!(state.registers.pc, 0x0204);
    }

    #[test]
    fn test_3xkk_se_doesntskip() {
        let state = State::new();
        let state = run(0x3111, &state);
        assert_eq!(state.registers.pc, 0x0202);
    }

    #[test]
    fn test_4xkk_sne_skips() {
        let state = State::new();
        let state = run(0x4111, &state);
        assert_eq!(state.registers.pc, 0x0204);
    }

    #[test]
    fn test_4xkk_sne_doesntskip() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        let state = run(0x4111, &state);
        assert_eq!(state.registers.pc, 0x0202);
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        state.registers.set_v(0x2, 0x11);
        let state = run(0x5120, &state);
        assert_eq!(state.registers.pc, 0x0204);
    }

    #[test]
    fn test_5xy0_se_doesntskip() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        let state = run(0x5120, &state);
        assert_eq!(state.registers.pc, 0x0202);
    }

    #[test]
    fn test_5xy1_is_unknown() {
        assert!(from_op(&0x5121).is_none());
    }

    #[test]
    fn test_6xkk_ld() {
        let state = State::new();
        let state = run(0x6122, &state);
        assert_eq!(state.registers.v(0x1), 0x22);
    }

    #[test]
    fn test_7xkk_add() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x1);
        let state = run(0x7122, &state);
        assert_eq!(state.registers.v(0x1), 0x23);
    }

    #[test]
    fn test_7xkk_add_wraps_without_flag() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xFF);
        let state = run(0x7102, &state);
        assert_eq!(state.registers.v(0x1), 0x01);
        assert_eq!(state.registers.v(VF), 0x0);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = State::new();
        state.registers.set_v(0x2, 0x1);
        let state = run(0x8120, &state);
        assert_eq!(state.registers.v(0x1), 0x1);
    }

    #[test]
    fn test_8xy1_or() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x6);
        state.registers.set_v(0x2, 0x3);
        let state = run(0x8121, &state);
        assert_eq!(state.registers.v(0x1), 0x7);
    }

    #[test]
    fn test_8xy2_and() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x6);
        state.registers.set_v(0x2, 0x3);
        let state = run(0x8122, &state);
        assert_eq!(state.registers.v(0x1), 0x2);
    }

    #[test]
    fn test_8xy3_xor() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x6);
        state.registers.set_v(0x2, 0x3);
        let state = run(0x8123, &state);
        assert_eq!(state.registers.v(0x1), 0x5);
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xFF);
        state.registers.set_v(0x2, 0x11);
        let state = run(0x8124, &state);
        assert_eq!(state.registers.v(0x1), 0x10);
        assert_eq!(state.registers.v(VF), 0x1);
    }

    #[test]
    fn test_8xy5_sub_borrow() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        state.registers.set_v(0x2, 0x12);
        let state = run(0x8125, &state);
        assert_eq!(state.registers.v(0x1), 0xFF);
        assert_eq!(state.registers.v(VF), 0x0);
    }

    #[test]
    fn test_8xy6_shr() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x5);
        let state = run(0x8106, &state);
        assert_eq!(state.registers.v(0x1), 0x2);
        assert_eq!(state.registers.v(VF), 0x1);
    }

    #[test]
    fn test_8xy7_subn() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        state.registers.set_v(0x2, 0x33);
        let state = run(0x8127, &state);
        assert_eq!(state.registers.v(0x1), 0x22);
        assert_eq!(state.registers.v(VF), 0x1);
    }

    #[test]
    fn test_8xye_shl() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xFF);
        let state = run(0x810E, &state);
        // 0xFF * 2 = 0x01FE
        assert_eq!(state.registers.v(0x1), 0xFE);
        assert_eq!(state.registers.v(VF), 0x1);
    }

    #[test]
    fn test_8xy8_is_unknown() {
        assert!(from_op(&0x8128).is_none());
    }

    #[test]
    fn test_9xy0_sne_skips() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        let state = run(0x9120, &state);
        assert_eq!(state.registers.pc, 0x0204);
    }

    #[test]
    fn test_9xy0_sne_doesntskip() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        state.registers.set_v(0x2, 0x11);
        let state = run(0x9120, &state);
        assert_eq!(state.registers.pc, 0x0202);
    }

    #[test]
    fn test_annn_ld() {
        let state = State::new();
        let state = run(0xAABC, &state);
        assert_eq!(state.registers.i, 0xABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = State::new();
        state.registers.set_v(0x0, 0x2);
        let state = run(0xBABC, &state);
        assert_eq!(state.registers.pc, 0xABE);
    }

    #[test]
    fn test_bnnn_jp_wraps() {
        let mut state = State::new();
        state.registers.set_v(0x0, 0x10);
        let state = run(0xBFF8, &state);
        assert_eq!(state.registers.pc, 0x008);
    }

    #[test]
    fn test_cxkk_rnd_is_masked() {
        let state = State::new();
        for mask in [0x00, 0x0F, 0xF0, 0x81] {
            let state = run(0xC100 | mask, &state);
            assert_eq!(state.registers.v(0x1) & !(mask as u8), 0x0);
        }
    }

    #[test]
    fn test_cxkk_rnd_is_seeded() {
        let state = State::new();
        let first = run(0xC1FF, &state);
        let second = run(0xC1FF, &state);
        assert_eq!(first.registers.v(0x1), second.registers.v(0x1));
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = State::new();
        state.registers.set_v(0x0, 0x1);
        // Draw the 0x0 sprite with a 1x 1y offset
        let state = run(0xD005, &state);
        let mut expected = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        expected[1][1..5].copy_from_slice(&[true, true, true, true]);
        expected[2][1..5].copy_from_slice(&[true, false, false, true]);
        expected[3][1..5].copy_from_slice(&[true, false, false, true]);
        expected[4][1..5].copy_from_slice(&[true, false, false, true]);
        expected[5][1..5].copy_from_slice(&[true, true, true, true]);
        assert_eq!(state.display.frame(), expected);
        assert_eq!(state.registers.v(VF), 0x0);
        assert!(state.draw_flag);
    }

    #[test]
    fn test_dxyn_drw_collides() {
        let mut state = State::new();
        state.display.draw_sprite(0, 0, &[0x80]);
        let state = run(0xD001, &state);
        assert_eq!(state.registers.v(VF), 0x1)
    }

    #[test]
    fn test_dxyn_drw_clears_stale_collision_flag() {
        let mut state = State::new();
        state.registers.set_v(VF, 0x1);
        let state = run(0xD001, &state);
        assert_eq!(state.registers.v(VF), 0x0)
    }

    #[test]
    fn test_ex9e_skp_skips() {
        let mut state = State::new();
        state.keypad.press(0xE);
        state.registers.set_v(0x1, 0xE);
        let state = run(0xE19E, &state);
        assert_eq!(state.registers.pc, 0x0204);
    }

    #[test]
    fn test_ex9e_skp_doesntskip() {
        let state = State::new();
        let state = run(0xE19E, &state);
        assert_eq!(state.registers.pc, 0x0202);
    }

    #[test]
    fn test_exa1_sknp_skips() {
        let state = State::new();
        let state = run(0xE1A1, &state);
        assert_eq!(state.registers.pc, 0x0204);
    }

    #[test]
    fn test_exa1_sknp_doesntskip() {
        let mut state = State::new();
        state.keypad.press(0xE);
        state.registers.set_v(0x1, 0xE);
        let state = run(0xE1A1, &state);
        assert_eq!(state.registers.pc, 0x0202);
    }

    #[test]
    fn test_fx07_ld() {
        let mut state = State::new();
        state.timers.delay.set(0xF);
        let state = run(0xF107, &state);
        assert_eq!(state.registers.v(0x1), 0xF);
    }

    #[test]
    fn test_fx0a_ld_waits_for_key() {
        let mut state = State::new();
        state.run_state = RunState::Running;
        let state = run(0xF10A, &state);
        assert_eq!(state.keypad.waiting(), Some(0x1));
        assert_eq!(state.run_state, RunState::WaitingForKey);
    }

    #[test]
    fn test_fx15_ld_starts_delay_timer() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xF);
        let state = run(0xF115, &state);
        assert_eq!(state.timers.delay.value(), 0xF);
        assert!(state.timers.delay.is_running());
    }

    #[test]
    fn test_fx18_ld_starts_sound_timer() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xF);
        let state = run(0xF118, &state);
        assert_eq!(state.timers.sound.value(), 0xF);
        assert!(state.timers.sound.is_running());
    }

    #[test]
    fn test_fx1e_add() {
        let mut state = State::new();
        state.registers.i = 0x1;
        state.registers.set_v(0x1, 0x1);
        let state = run(0xF11E, &state);
        assert_eq!(state.registers.i, 0x2);
        assert_eq!(state.registers.v(VF), 0x0);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x2);
        let state = run(0xF129, &state);
        assert_eq!(state.registers.i, 0xA);
    }

    #[test]
    fn test_fx29_ld_uses_low_nibble() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x3F);
        let state = run(0xF129, &state);
        assert_eq!(state.registers.i, 0x4B);
    }

    #[test]
    fn test_fx33_ld() {
        let mut state = State::new();
        // 0x7B -> 123
        state.registers.set_v(0x1, 0x7B);
        state.registers.i = 0x300;
        let state = run(0xF133, &state);
        assert_eq!(state.memory.read_range(0x300, 3), [0x1, 0x2, 0x3]);
    }

    #[test]
    fn test_fx33_ld_wraps_at_end_of_memory() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xFF);
        state.registers.i = 0xFFF;
        let state = run(0xF133, &state);
        assert_eq!(state.memory.read(0xFFF), 0x2);
        assert_eq!(state.memory.read(0x000), 0x5);
        assert_eq!(state.memory.read(0x001), 0x5);
    }

    #[test]
    fn test_fx_55_ld() {
        let mut state = State::new();
        state.registers.i = 0x300;
        for (x, value) in [0x1, 0x2, 0x3, 0x4, 0x5].iter().enumerate() {
            state.registers.set_v(x as u8, *value);
        }
        state.registers.set_v(0x5, 0x6);
        let state = run(0xF455, &state);
        assert_eq!(state.memory.read_range(0x300, 6), [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.registers.i, 0x300);
    }

    #[test]
    fn test_fx_65_ld() {
        let mut state = State::new();
        state.registers.i = 0x300;
        state.memory.load(&[0x1, 0x2, 0x3, 0x4, 0x5, 0x6], 0x300).unwrap();
        let state = run(0xF465, &state);
        assert_eq!(state.registers.all_v()[0x0..0x6], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.registers.i, 0x300);
    }

    #[test]
    fn test_fxff_is_unknown() {
        assert!(from_op(&0xF1FF).is_none());
        assert!(from_op(&0xE1FF).is_none());
    }
}
