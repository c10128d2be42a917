//! The Machine State Container: registers, finger, halt flag, and platter
//! heap, plus the fetch/decode/execute loop that drives them.

use getset::{CopyGetters, Setters};
use log::{debug, error, trace};

use crate::decode::decode;
use crate::error::Fault;
use crate::heap::Heap;
use crate::io::Io;
use crate::ops::OPERATIONS;

/// The register count fixed by the UM instruction set.
const REGISTER_COUNT: usize = 8;
/// The operation count fixed by the UM instruction set, for the optional
/// diagnostic counters.
const OPERATION_COUNT: usize = 14;

/// Owns everything a running program can observe or mutate: the eight
/// registers, the execution finger, the halt flag, and the platter heap.
///
/// `Machine` is a plain value; nothing here is a global or a singleton, so
/// any number of independent machines may coexist in one process.
#[derive(CopyGetters, Setters)]
pub struct Machine {
    registers: [u32; REGISTER_COUNT],
    #[getset(get_copy = "pub", set = "pub")]
    finger: u32,
    #[getset(get_copy = "pub", set = "pub")]
    halted: bool,
    heap: Heap,
    op_counts: [u64; OPERATION_COUNT],
}

impl Machine {
    /// Builds a machine whose platter 0 holds `program` and whose registers,
    /// finger, and halt flag start at their initial values.
    pub fn new(program: Vec<u32>) -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            finger: 0,
            halted: false,
            heap: Heap::new(program),
            op_counts: [0; OPERATION_COUNT],
        }
    }

    /// Reads register `r`.
    #[inline]
    pub fn register(&self, r: usize) -> u32 {
        self.registers[r]
    }

    /// Writes register `r`.
    #[inline]
    pub fn set_register(&mut self, r: usize, value: u32) {
        self.registers[r] = value;
    }

    /// Borrows the platter heap.
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Mutably borrows the platter heap.
    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    /// The per-opcode execution counts accumulated so far. Diagnostic only;
    /// never observable to the hosted program.
    pub fn op_counts(&self) -> &[u64; OPERATION_COUNT] {
        &self.op_counts
    }

    /// Runs until the halt flag is set or a fault is raised.
    pub fn run(&mut self, io: &mut dyn Io) -> Result<(), Fault> {
        while !self.halted {
            self.step(io)?;
        }
        debug!("halted at finger {:#010x}, op counts {:?}", self.finger, self.op_counts);
        Ok(())
    }

    /// Executes one fetch/decode/execute step.
    ///
    /// The finger advances before dispatch so that Load Program's write to
    /// the finger is not clobbered afterwards.
    fn step(&mut self, io: &mut dyn Io) -> Result<(), Fault> {
        let word = self.heap.read(0, self.finger, self.finger)?;
        self.finger = self.finger.wrapping_add(1);

        let instruction = decode(word);
        trace!("finger={:#010x} opcode={}", self.finger.wrapping_sub(1), instruction.opcode);

        if instruction.opcode >= OPERATIONS.len() as u32 {
            return Err(Fault::IllegalInstruction {
                opcode: instruction.opcode,
                finger: self.finger.wrapping_sub(1),
            });
        }

        let op = OPERATIONS[instruction.opcode as usize];
        let result = op(self, &instruction, io);
        if result.is_ok() {
            self.op_counts[instruction.opcode as usize] += 1;
        } else if let Err(ref fault) = result {
            error!("fault: {fault}");
        }
        result
    }
}
