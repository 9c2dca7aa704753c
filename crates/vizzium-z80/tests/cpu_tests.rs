//! Tests for the reference Z80 target.
//!
//! Verifies:
//! - Reset state and memory sizing
//! - The supported instruction subset and its cycle counts
//! - The `Target` view used by the console

use vizzium_core::{RegisterPair, Target, TargetSnapshot};
use vizzium_z80::{Z80Error, Z80};

fn cpu_with_program(program: &[u8]) -> Z80 {
    let mut cpu = Z80::new(0x1000).unwrap();
    for (address, byte) in program.iter().enumerate() {
        cpu.write(address as u16, *byte);
    }
    cpu
}

// ═══════════════════════════════════════════════════════════════
// Reset state
// ═══════════════════════════════════════════════════════════════

#[test]
fn reset_state() {
    let cpu = Z80::new(0x1000).unwrap();
    assert_eq!(cpu.program_counter(), 0);
    assert_eq!(cpu.stack_pointer(), 0xFFFF);
    assert_eq!(cpu.cycle_count(), 0);
    assert_eq!(cpu.memory_size(), 0x1000);
}

#[test]
fn invalid_memory_size_is_rejected() {
    assert_eq!(
        Z80::new(3000).unwrap_err(),
        Z80Error::InvalidMemorySize(3000)
    );
}

// ═══════════════════════════════════════════════════════════════
// Instruction subset
// ═══════════════════════════════════════════════════════════════

#[test]
fn nop_advances_pc_and_cycles() {
    let mut cpu = cpu_with_program(&[0x00, 0x00]);
    cpu.step();
    assert_eq!(cpu.program_counter(), 1);
    assert_eq!(cpu.cycle_count(), 4);
}

#[test]
fn load_immediate_into_registers() {
    // LD A,0x12 ; LD B,0x34 ; LD HL,0xBEEF
    let mut cpu = cpu_with_program(&[0x3E, 0x12, 0x06, 0x34, 0x21, 0xEF, 0xBE]);
    assert_eq!(cpu.execute(), 7);
    assert_eq!(cpu.execute(), 7);
    assert_eq!(cpu.execute(), 10);
    assert_eq!(cpu.main.a, 0x12);
    assert_eq!(cpu.main.b, 0x34);
    assert_eq!(cpu.register_pair(RegisterPair::HL, false), 0xBEEF);
    assert_eq!(cpu.program_counter(), 7);
    assert_eq!(cpu.cycle_count(), 24);
}

#[test]
fn exchange_instructions_swap_banks() {
    // LD A,1 ; LD BC,0x0203 ; EX AF,AF' ; EXX
    let mut cpu = cpu_with_program(&[0x3E, 0x01, 0x01, 0x03, 0x02, 0x08, 0xD9]);
    for _ in 0..4 {
        cpu.step();
    }
    assert_eq!(cpu.register_pair(RegisterPair::AF, false), 0x0000);
    assert_eq!(cpu.register_pair(RegisterPair::AF, true), 0x0100);
    assert_eq!(cpu.register_pair(RegisterPair::BC, false), 0x0000);
    assert_eq!(cpu.register_pair(RegisterPair::BC, true), 0x0203);
}

#[test]
fn jumps_move_the_program_counter() {
    // JP 0x0010 ; at 0x10: JR -2
    let mut cpu = cpu_with_program(&[0xC3, 0x10, 0x00]);
    cpu.write(0x10, 0x18);
    cpu.write(0x11, 0xFE);
    cpu.step();
    assert_eq!(cpu.program_counter(), 0x10);
    cpu.step();
    assert_eq!(cpu.program_counter(), 0x10);
    assert_eq!(cpu.cycle_count(), 22);
}

#[test]
fn memory_loads_and_stores() {
    // LD A,0x55 ; LD (0x0100),A ; LD A,0 ; LD A,(0x0100)
    let mut cpu = cpu_with_program(&[0x3E, 0x55, 0x32, 0x00, 0x01, 0x3E, 0x00, 0x3A, 0x00, 0x01]);
    for _ in 0..4 {
        cpu.step();
    }
    assert_eq!(cpu.read(0x0100), 0x55);
    assert_eq!(cpu.main.a, 0x55);
}

#[test]
fn push_and_pop_round_trip_through_stack() {
    // LD SP,0x0200 ; LD BC,0x1234 ; PUSH BC ; POP DE
    let mut cpu = cpu_with_program(&[0x31, 0x00, 0x02, 0x01, 0x34, 0x12, 0xC5, 0xD1]);
    cpu.step();
    cpu.step();
    cpu.step();
    assert_eq!(cpu.stack_pointer(), 0x01FE);
    assert_eq!(cpu.read(0x01FE), 0x34);
    assert_eq!(cpu.read(0x01FF), 0x12);
    cpu.step();
    assert_eq!(cpu.stack_pointer(), 0x0200);
    assert_eq!(cpu.register_pair(RegisterPair::DE, false), 0x1234);
}

#[test]
fn index_registers_load() {
    // LD IX,0x1111 ; LD IY,0x2222
    let mut cpu = cpu_with_program(&[0xDD, 0x21, 0x11, 0x11, 0xFD, 0x21, 0x22, 0x22]);
    assert_eq!(cpu.execute(), 14);
    assert_eq!(cpu.execute(), 14);
    assert_eq!(cpu.register_pair(RegisterPair::IX, false), 0x1111);
    assert_eq!(cpu.register_pair(RegisterPair::IY, true), 0x2222);
}

#[test]
fn halt_keeps_burning_cycles_until_pc_is_moved() {
    let mut cpu = cpu_with_program(&[0x76, 0x00]);
    cpu.step();
    cpu.step();
    assert!(cpu.halted);
    assert_eq!(cpu.program_counter(), 1);
    assert_eq!(cpu.cycle_count(), 8);

    cpu.set_program_counter(1);
    cpu.step();
    assert!(!cpu.halted);
    assert_eq!(cpu.program_counter(), 2);
}

#[test]
fn unsupported_opcode_is_a_nop() {
    // INC A is outside the subset.
    let mut cpu = cpu_with_program(&[0x3C]);
    assert_eq!(cpu.execute(), 4);
    assert_eq!(cpu.main.a, 0);
    assert_eq!(cpu.program_counter(), 1);
}

// ═══════════════════════════════════════════════════════════════
// Target view
// ═══════════════════════════════════════════════════════════════

#[test]
fn snapshot_captures_all_status_fields() {
    // LD HL,0x0102 ; EXX ; LD IX,0x0304 ; LD SP,HL
    let mut cpu = cpu_with_program(&[0x21, 0x02, 0x01, 0xD9, 0xDD, 0x21, 0x04, 0x03, 0xF9]);
    for _ in 0..4 {
        cpu.step();
    }

    let snapshot = TargetSnapshot::capture(&cpu);
    assert_eq!(snapshot.pc, 9);
    assert_eq!(snapshot.sp, 0x0000);
    assert_eq!(snapshot.primary[3], 0x0000);
    assert_eq!(snapshot.shadow[3], 0x0102);
    assert_eq!(snapshot.ix, 0x0304);
    assert_eq!(snapshot.cycles, 10 + 4 + 14 + 6);
}
