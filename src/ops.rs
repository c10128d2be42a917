//! The fourteen operations the Universal Machine recognizes, dispatched
//! through a table indexed by opcode.
//!
//! Opcodes 14 and 15 have no table entry and are rejected by the execution
//! loop before dispatch (see [`crate::machine::Machine::step`]).

use crate::decode::Instruction;
use crate::error::Fault;
use crate::io::Io;
use crate::machine::Machine;

/// Signature shared by every operation: mutate machine state (and possibly
/// perform I/O), or raise a fault.
pub type OperationFn = fn(&mut Machine, &Instruction, &mut dyn Io) -> Result<(), Fault>;

/// The dispatch table, indexed by opcode 0..13.
pub const OPERATIONS: [OperationFn; 14] = [
    cond_move,
    array_index,
    array_amendment,
    addition,
    multiplication,
    division,
    not_and,
    halt,
    allocation,
    abandonment,
    output,
    input,
    load_program,
    orthography,
];

fn cond_move(m: &mut Machine, i: &Instruction, _io: &mut dyn Io) -> Result<(), Fault> {
    if m.register(i.c) != 0 {
        m.set_register(i.a, m.register(i.b));
    }
    Ok(())
}

fn array_index(m: &mut Machine, i: &Instruction, _io: &mut dyn Io) -> Result<(), Fault> {
    let value = m.heap().read(m.register(i.b), m.register(i.c), m.finger())?;
    m.set_register(i.a, value);
    Ok(())
}

fn array_amendment(m: &mut Machine, i: &Instruction, _io: &mut dyn Io) -> Result<(), Fault> {
    let (id, offset, value) = (m.register(i.a), m.register(i.b), m.register(i.c));
    let finger = m.finger();
    m.heap_mut().write(id, offset, value, finger)
}

fn addition(m: &mut Machine, i: &Instruction, _io: &mut dyn Io) -> Result<(), Fault> {
    m.set_register(i.a, m.register(i.b).wrapping_add(m.register(i.c)));
    Ok(())
}

fn multiplication(m: &mut Machine, i: &Instruction, _io: &mut dyn Io) -> Result<(), Fault> {
    m.set_register(i.a, m.register(i.b).wrapping_mul(m.register(i.c)));
    Ok(())
}

fn division(m: &mut Machine, i: &Instruction, _io: &mut dyn Io) -> Result<(), Fault> {
    let divisor = m.register(i.c);
    if divisor == 0 {
        return Err(Fault::DivideByZero { finger: m.finger() });
    }
    m.set_register(i.a, m.register(i.b) / divisor);
    Ok(())
}

fn not_and(m: &mut Machine, i: &Instruction, _io: &mut dyn Io) -> Result<(), Fault> {
    m.set_register(i.a, !(m.register(i.b) & m.register(i.c)));
    Ok(())
}

fn halt(m: &mut Machine, _i: &Instruction, _io: &mut dyn Io) -> Result<(), Fault> {
    m.set_halted(true);
    Ok(())
}

fn allocation(m: &mut Machine, i: &Instruction, _io: &mut dyn Io) -> Result<(), Fault> {
    let size = m.register(i.c);
    let id = m.heap_mut().allocate(size)?;
    m.set_register(i.b, id);
    Ok(())
}

fn abandonment(m: &mut Machine, i: &Instruction, _io: &mut dyn Io) -> Result<(), Fault> {
    let id = m.register(i.c);
    let finger = m.finger();
    m.heap_mut().abandon(id, finger)
}

fn output(m: &mut Machine, i: &Instruction, io: &mut dyn Io) -> Result<(), Fault> {
    let value = m.register(i.c);
    let byte = u8::try_from(value).map_err(|_| Fault::BadCharacter {
        value,
        finger: m.finger(),
    })?;
    io.write_byte(byte)
}

fn input(m: &mut Machine, i: &Instruction, io: &mut dyn Io) -> Result<(), Fault> {
    let value = io.read_byte()?;
    m.set_register(i.c, value);
    Ok(())
}

fn load_program(m: &mut Machine, i: &Instruction, _io: &mut dyn Io) -> Result<(), Fault> {
    let source = m.register(i.b);
    if source != 0 {
        let finger = m.finger();
        m.heap_mut().duplicate_into_zero(source, finger)?;
    }
    m.set_finger(m.register(i.c));
    Ok(())
}

fn orthography(m: &mut Machine, i: &Instruction, _io: &mut dyn Io) -> Result<(), Fault> {
    m.set_register(i.a_special, i.imm);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::io::MemoryIo;

    fn encode(opcode: u32, a: u32, b: u32, c: u32) -> u32 {
        (opcode << 28) | (a << 6) | (b << 3) | c
    }

    #[test]
    fn addition_wraps_modulo_2_32() {
        let mut m = Machine::new(vec![]);
        m.set_register(1, 0xFFFF_FFFF);
        m.set_register(2, 1);
        let i = decode(encode(3, 0, 1, 2));
        let mut io = MemoryIo::default();
        addition(&mut m, &i, &mut io).unwrap();
        assert_eq!(m.register(0), 0);
    }

    #[test]
    fn not_and_complements_the_conjunction() {
        let mut m = Machine::new(vec![]);
        m.set_register(1, 0xFFEE_DDCC);
        m.set_register(2, 0x7654_3210);
        let i = decode(encode(6, 0, 1, 2));
        let mut io = MemoryIo::default();
        not_and(&mut m, &i, &mut io).unwrap();
        assert_eq!(m.register(0), 0x89BB_EFFF);
    }

    #[test]
    fn orthography_loads_the_immediate() {
        let mut m = Machine::new(vec![]);
        let word = (13u32 << 28) | (7 << 25) | 0x01FF_FFFF;
        let i = decode(word);
        let mut io = MemoryIo::default();
        orthography(&mut m, &i, &mut io).unwrap();
        assert_eq!(m.register(7), 0x01FF_FFFF);
    }

    #[test]
    fn allocate_index_and_amend_round_trip() {
        let mut m = Machine::new(vec![]);
        let mut io = MemoryIo::default();

        m.set_register(2, 4);
        allocation(&mut m, &decode(encode(8, 0, 1, 2)), &mut io).unwrap();
        let id = m.register(1);

        m.set_register(0, id);
        m.set_register(1, 2);
        m.set_register(2, 0xFACE_FACE);
        array_amendment(&mut m, &decode(encode(2, 0, 1, 2)), &mut io).unwrap();

        m.set_register(1, id);
        m.set_register(2, 2);
        array_index(&mut m, &decode(encode(1, 0, 1, 2)), &mut io).unwrap();
        assert_eq!(m.register(0), 0xFACE_FACE);
    }

    #[test]
    fn load_program_with_zero_source_is_a_pure_jump() {
        let mut m = Machine::new(vec![0xAAAA_AAAA, 0xBBBB_BBBB]);
        let mut io = MemoryIo::default();
        m.set_register(0, 3);
        let before: Vec<u32> = (0..2).map(|k| m.heap().read(0, k, 0).unwrap()).collect();

        let i = decode(encode(12, 9, 1, 0));
        load_program(&mut m, &i, &mut io).unwrap();

        let after: Vec<u32> = (0..2).map(|k| m.heap().read(0, k, 0).unwrap()).collect();
        assert_eq!(before, after);
        assert_eq!(m.finger(), 3);
    }

    #[test]
    fn load_program_duplicates_the_source_platter() {
        let mut m = Machine::new(vec![]);
        let mut io = MemoryIo::default();
        let id = m.heap_mut().allocate(4).unwrap();
        m.heap_mut().write(id, 3, 0xDEAD_DEAD, 0).unwrap();

        m.set_register(1, id);
        m.set_register(0, 3);
        let i = decode(encode(12, 9, 1, 0));
        load_program(&mut m, &i, &mut io).unwrap();

        assert_eq!(m.finger(), 3);
        assert_eq!(m.heap().read(0, 3, 0).unwrap(), 0xDEAD_DEAD);
    }

    #[test]
    fn division_by_zero_faults() {
        let mut m = Machine::new(vec![]);
        let mut io = MemoryIo::default();
        m.set_register(2, 0);
        let i = decode(encode(5, 0, 1, 2));
        assert!(matches!(division(&mut m, &i, &mut io), Err(Fault::DivideByZero { .. })));
    }

    #[test]
    fn output_above_255_faults() {
        let mut m = Machine::new(vec![]);
        let mut io = MemoryIo::default();
        m.set_register(2, 256);
        let i = decode(encode(10, 0, 0, 2));
        assert!(matches!(output(&mut m, &i, &mut io), Err(Fault::BadCharacter { value: 256, .. })));
    }

    #[test]
    fn abandoning_platter_zero_faults() {
        let mut m = Machine::new(vec![]);
        let mut io = MemoryIo::default();
        m.set_register(2, 0);
        let i = decode(encode(9, 0, 0, 2));
        assert!(matches!(abandonment(&mut m, &i, &mut io), Err(Fault::BadPlatter { id: 0, .. })));
    }
}
