//! End-to-end scenarios, run against the public API the way a driving loop
//! would use it rather than against private opcode handlers.

use chip8_core::{Config, ExecError, Machine, Outcome, FONT_START};

fn machine(rom: &[u8]) -> Machine {
    Machine::load_rom(rom, Config::default()).unwrap()
}

fn assert_invariants(m: &Machine) {
    assert!(m.i <= 0x0FFF);
    assert!((m.sp as usize) <= 16);
    for &p in m.framebuffer.iter() {
        assert!(p == 0 || p == 1);
    }
    assert_eq!(
        &m.memory[FONT_START..FONT_START + chip8_core::FONT_SPRITES.len()],
        &chip8_core::FONT_SPRITES[..]
    );
}

#[test]
fn cls_then_halt() {
    let mut m = machine(&[0x00, 0xE0]);
    m.framebuffer[5] = 1;
    assert_eq!(m.execute(), Outcome::Continue);
    assert!(m.framebuffer.iter().all(|&p| p == 0));
    assert_invariants(&m);
    assert_eq!(m.execute(), Outcome::Halted);
}

#[test]
fn ld_jp_loop_runs_forever_without_drift() {
    let mut m = machine(&[0x60, 0x05, 0x61, 0x03, 0x12, 0x00]);
    for _ in 0..9 {
        m.execute();
        assert_invariants(&m);
    }
    assert_eq!(m.registers[0], 5);
    assert_eq!(m.registers[1], 3);
    assert!(m.pc == 0x200 || m.pc == 0x204);
}

#[test]
fn draw_wraps_base_then_clips_then_detects_collision() {
    // Base coordinates wrap unconditionally (Vx=64 -> x=0).
    let mut m = machine(&[0x60, 64, 0x61, 0, 0xA2, 0x08, 0xD0, 0x11, 0x80]);
    for _ in 0..4 {
        m.execute();
    }
    assert_eq!(m.framebuffer[0], 1);

    // With clipping on, a pixel that would overflow past column 63 is
    // dropped rather than wrapped to column 0.
    let mut config = Config::default();
    config.clipping = true;
    let mut m = Machine::load_rom(&[0x60, 63, 0x61, 0, 0xA2, 0x08, 0xD0, 0x11, 0xC0], config).unwrap();
    for _ in 0..4 {
        m.execute();
    }
    assert_eq!(m.framebuffer[63], 1);
    assert_eq!(m.framebuffer[0], 0);

    // Drawing the same sprite twice at the same spot clears it and raises
    // the collision flag on the second draw.
    let mut m = machine(&[
        0xA2, 0x10, 0x60, 0x00, 0x61, 0x00, 0xD0, 0x11, 0xD0, 0x11, 0xFF, 0xFF,
    ]);
    m.memory[0x210] = 0x80;
    for _ in 0..4 {
        m.execute();
    }
    assert_eq!(m.framebuffer[0], 1);
    assert_eq!(m.registers[0xF], 0);
    m.execute();
    assert_eq!(m.registers[0xF], 1);
    assert_eq!(m.framebuffer[0], 0);
}

#[test]
fn fx0a_blocks_until_key_then_resumes_from_the_same_instruction() {
    let mut m = machine(&[0xF2, 0x0A, 0x00, 0x00]);
    assert_eq!(m.execute(), Outcome::NeedKey(2));
    assert_eq!(m.pc, 0x200);

    m.set_key(9, true);
    assert_eq!(m.execute(), Outcome::Continue);
    assert_eq!(m.registers[2], 9);
    assert_eq!(m.pc, 0x202);
}

#[test]
fn call_recursion_past_sixteen_deep_crashes_with_stack_overflow() {
    let mut rom = Vec::new();
    for _ in 0..17 {
        rom.extend_from_slice(&[0x22, 0x00]);
    }
    let mut m = machine(&rom);
    for _ in 0..16 {
        assert_eq!(m.execute(), Outcome::Continue);
    }
    assert_eq!(m.execute(), Outcome::Crashed(ExecError::StackOverflow));
}
