// Copyright 2025-2026 Neil Henderson
//
//! The `interp` module defines a reference interpreter for the LLIR.
//!
//! The interpreter exists so the test suite can execute compiled B programs without an
//! external backend. It models the LLIR's contract directly: a flat byte memory indexed by
//! word indices, globals laid out word aligned, one descriptor word per function holding its
//! own word index, and native implementations of the B runtime contract (`b.putchar`,
//! `b.getchar`, `b.putnumb`, `b.putstr`, `b.char`, `b.lchar`, `b.exit`).
//!
//! Strings are EOT terminated (`0x04`). `putchar` writes a word's non-zero bytes starting
//! with the least significant, matching the character packing rule where the first character
//! of a literal occupies the lowest byte.

use std::collections::HashMap;
use std::collections::VecDeque;

use thiserror::Error;

use crate::core::Word;

use super::{BinOp, CmpOp, Function, GlobalInit, Instruction, Module, Terminator, Value, WordInit};

/// Total memory an interpreted program may touch.
const MEMORY_LIMIT: usize = 1 << 26;

/// An error raised while executing a module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InterpError {
    #[error("program entry point 'b.main' is not defined")]
    NoMain,

    #[error("relocation against undefined symbol '{0}'")]
    UndefinedSymbol(String),

    #[error("call through a value which is not a function address: {0}")]
    NotAFunction(Word),

    #[error("division by zero")]
    DivisionByZero,

    #[error("memory access out of range at word index {0}")]
    OutOfRange(Word),

    #[error("invalid IR: {0}")]
    InvalidIr(String),
}

/// The observable result of running a program.
#[derive(Debug, PartialEq, Eq)]
pub struct Run {
    /// The value `b.main` returned (0 if the program called `b.exit`).
    pub return_value: Word,

    /// Everything the program wrote to standard output.
    pub stdout: Vec<u8>,
}

impl Run {
    /// Standard output as a string, for assertions.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Runs a module's `b.main` with empty standard input.
pub fn run(module: &Module) -> Result<Run, InterpError> {
    run_with_input(module, b"")
}

/// Runs a module's `b.main` with the given standard input bytes.
pub fn run_with_input(module: &Module, stdin: &[u8]) -> Result<Run, InterpError> {
    let mut interp = Interp::new(module, stdin)?;

    let main = *interp.symbols.get("b.main").ok_or(InterpError::NoMain)?;
    let Some(Callable::Defined(main_fn)) = interp.callables.get(&main).copied() else {
        return Err(InterpError::NoMain);
    };

    match interp.call_function(main_fn, Vec::new()) {
        Ok(return_value) => Ok(Run { return_value, stdout: interp.stdout }),
        Err(Trap::Exit) => Ok(Run { return_value: 0, stdout: interp.stdout }),
        Err(Trap::Error(err)) => Err(err),
    }
}

/// What a function descriptor dispatches to.
#[derive(Copy, Clone)]
enum Callable<'a> {
    Defined(&'a Function),
    Builtin(Builtin),
}

/// The B runtime contract, implemented natively.
#[derive(Copy, Clone)]
enum Builtin {
    Putchar,
    Getchar,
    Putnumb,
    Putstr,
    Char,
    Lchar,
    Exit,
}

impl Builtin {
    fn for_symbol(name: &str) -> Option<Builtin> {
        match name {
            "b.putchar" => Some(Builtin::Putchar),
            "b.getchar" => Some(Builtin::Getchar),
            "b.putnumb" => Some(Builtin::Putnumb),
            "b.putstr" => Some(Builtin::Putstr),
            "b.char" => Some(Builtin::Char),
            "b.lchar" => Some(Builtin::Lchar),
            "b.exit" => Some(Builtin::Exit),
            _ => None,
        }
    }
}

/// Why execution stopped before a normal return.
enum Trap {
    Error(InterpError),
    Exit,
}

impl From<InterpError> for Trap {
    fn from(err: InterpError) -> Self {
        Trap::Error(err)
    }
}

struct Interp<'a> {
    module: &'a Module,
    bytes_per_word: usize,
    memory: Vec<u8>,
    symbols: HashMap<&'a str, Word>,
    callables: HashMap<Word, Callable<'a>>,
    stack_top: usize,
    stdin: VecDeque<u8>,
    stdout: Vec<u8>,
}

impl<'a> Interp<'a> {
    /// Lays out and initializes the module's globals and function descriptors.
    fn new(module: &'a Module, stdin: &[u8]) -> Result<Self, InterpError> {
        let bytes_per_word = module.target.bytes_per_word() as usize;

        let mut interp = Interp {
            module,
            bytes_per_word,
            memory: Vec::new(),
            symbols: HashMap::new(),
            callables: HashMap::new(),
            stack_top: bytes_per_word, // Word index 0 stays unused
            stdin: stdin.iter().copied().collect(),
            stdout: Vec::new(),
        };

        // First pass: assign every symbol an address, reserving zeroed storage. Initializers
        // are applied afterwards because a relocation may refer to a later symbol.
        let mut pending: Vec<(usize, &'a WordInit)> = Vec::new();

        for global in &module.globals {
            let base = interp.reserve_global_storage(global, &mut pending)?;
            interp.symbols.insert(&global.name, base);
        }

        for function in &module.functions {
            let base = interp.reserve_words(1)?;
            interp.symbols.insert(&function.name, base);
            interp.callables.insert(base, Callable::Defined(function));
            interp.write_word_at_byte(base as usize * bytes_per_word, base);
        }

        // Second pass: apply word initializers now that every symbol has an address.
        for (byte_offset, init) in pending {
            let value = interp.resolve_init(init)?;
            interp.write_word_at_byte(byte_offset, value);
        }

        Ok(interp)
    }

    /// Reserves storage for one global and queues its word initializers.
    fn reserve_global_storage(
        &mut self,
        global: &'a super::Global,
        pending: &mut Vec<(usize, &'a WordInit)>,
    ) -> Result<Word, InterpError> {
        match &global.init {
            GlobalInit::Word(init) => {
                let base = self.reserve_words(1)?;
                pending.push((base as usize * self.bytes_per_word, init));
                Ok(base)
            }

            GlobalInit::Cells(inits) => {
                let base = self.reserve_words(inits.len().max(1))?;
                for (i, init) in inits.iter().enumerate() {
                    pending.push(((base as usize + i) * self.bytes_per_word, init));
                }
                Ok(base)
            }

            GlobalInit::Bytes(bytes) => {
                let words = bytes.len().div_ceil(self.bytes_per_word).max(1);
                let base = self.reserve_words(words)?;
                let start = base as usize * self.bytes_per_word;
                self.memory[start..start + bytes.len()].copy_from_slice(bytes);
                Ok(base)
            }

            GlobalInit::External => {
                // A runtime function gets a self-valued descriptor; any other external symbol
                // gets a zero cell, and a call through it fails like an unresolved link.
                let base = self.reserve_words(1)?;
                if let Some(builtin) = Builtin::for_symbol(&global.name) {
                    self.callables.insert(base, Callable::Builtin(builtin));
                    self.write_word_at_byte(base as usize * self.bytes_per_word, base);
                }
                Ok(base)
            }
        }
    }

    fn resolve_init(&self, init: &WordInit) -> Result<Word, InterpError> {
        match init {
            WordInit::Const(w) => Ok(*w),
            WordInit::WordIndexOf(symbol) => match self.symbols.get(symbol.as_str()) {
                Some(base) => Ok(*base),
                None => Err(InterpError::UndefinedSymbol(symbol.clone())),
            },
        }
    }

    /// Reserves `words` zeroed, word-aligned cells at the top of memory; returns the word index.
    fn reserve_words(&mut self, words: usize) -> Result<Word, InterpError> {
        debug_assert!(self.stack_top % self.bytes_per_word == 0);

        let base = self.stack_top / self.bytes_per_word;
        let end = self.stack_top + words * self.bytes_per_word;
        self.ensure(end)?;
        self.stack_top = end;

        Ok(base as Word)
    }

    /// Grows memory (zero filled) to cover `end` bytes.
    fn ensure(&mut self, end: usize) -> Result<(), InterpError> {
        if end > MEMORY_LIMIT {
            return Err(InterpError::OutOfRange((end / self.bytes_per_word) as Word));
        }
        if end > self.memory.len() {
            self.memory.resize(end, 0);
        }
        Ok(())
    }

    // Memory access
    // =============

    fn byte_offset(&self, word_index: Word, extra_bytes: Word) -> Result<usize, InterpError> {
        let byte = word_index
            .checked_mul(self.bytes_per_word as Word)
            .and_then(|b| b.checked_add(extra_bytes))
            .ok_or(InterpError::OutOfRange(word_index))?;
        if byte < 0 || byte as usize >= MEMORY_LIMIT {
            return Err(InterpError::OutOfRange(word_index));
        }
        Ok(byte as usize)
    }

    fn load_word(&mut self, word_index: Word) -> Result<Word, InterpError> {
        let offset = self.byte_offset(word_index, 0)?;
        self.ensure(offset + self.bytes_per_word)?;
        Ok(self.read_word_at_byte(offset))
    }

    fn store_word(&mut self, word_index: Word, value: Word) -> Result<(), InterpError> {
        let offset = self.byte_offset(word_index, 0)?;
        self.ensure(offset + self.bytes_per_word)?;
        self.write_word_at_byte(offset, value);
        Ok(())
    }

    fn load_byte(&mut self, word_index: Word, byte_index: Word) -> Result<u8, InterpError> {
        let offset = self.byte_offset(word_index, byte_index)?;
        self.ensure(offset + 1)?;
        Ok(self.memory[offset])
    }

    fn store_byte(&mut self, word_index: Word, byte_index: Word, value: u8) -> Result<(), InterpError> {
        let offset = self.byte_offset(word_index, byte_index)?;
        self.ensure(offset + 1)?;
        self.memory[offset] = value;
        Ok(())
    }

    fn read_word_at_byte(&self, offset: usize) -> Word {
        if self.bytes_per_word == 8 {
            let bytes: [u8; 8] = self.memory[offset..offset + 8].try_into().unwrap();
            i64::from_le_bytes(bytes)
        } else {
            let bytes: [u8; 4] = self.memory[offset..offset + 4].try_into().unwrap();
            i32::from_le_bytes(bytes) as Word
        }
    }

    fn write_word_at_byte(&mut self, offset: usize, value: Word) {
        if self.bytes_per_word == 8 {
            self.memory[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
        } else {
            self.memory[offset..offset + 4].copy_from_slice(&(value as i32).to_le_bytes());
        }
    }

    // Execution
    // =========

    /// Executes a defined function with the given arguments; stack storage is released when
    /// the function returns.
    fn call_function(&mut self, function: &'a Function, args: Vec<Word>) -> Result<Word, Trap> {
        let saved_stack_top = self.stack_top;
        let mut temps: HashMap<u32, Word> = HashMap::new();
        let mut block = 0usize;
        let mut prev_block: Option<usize> = None;

        loop {
            let current = function
                .blocks
                .get(block)
                .ok_or_else(|| InterpError::InvalidIr(format!("no block {block} in '{}'", function.name)))?;

            for instruction in &current.instructions {
                self.execute(instruction, &args, &mut temps, prev_block)?;
            }

            match &current.terminator {
                Some(Terminator::Branch(target)) => {
                    prev_block = Some(block);
                    block = target.0;
                }

                Some(Terminator::CondBranch { cond, then_block, else_block }) => {
                    let cond = self.eval(cond, &args, &temps)?;
                    prev_block = Some(block);
                    block = if cond != 0 { then_block.0 } else { else_block.0 };
                }

                Some(Terminator::Return(value)) => {
                    let value = self.eval(value, &args, &temps)?;
                    self.stack_top = saved_stack_top;
                    return Ok(value);
                }

                None => {
                    let msg = format!("unterminated block '{}' in '{}'", current.label, function.name);
                    return Err(InterpError::InvalidIr(msg).into());
                }
            }
        }
    }

    fn execute(
        &mut self,
        instruction: &Instruction,
        args: &[Word],
        temps: &mut HashMap<u32, Word>,
        prev_block: Option<usize>,
    ) -> Result<(), Trap> {
        match instruction {
            Instruction::Alloca { dst, words } => {
                let base = self.reserve_words(*words)?;
                temps.insert(dst.0, base);
            }

            Instruction::Load { dst, addr } => {
                let addr = self.eval(addr, args, temps)?;
                let value = self.load_word(addr)?;
                temps.insert(dst.0, value);
            }

            Instruction::Store { addr, value } => {
                let addr = self.eval(addr, args, temps)?;
                let value = self.eval(value, args, temps)?;
                self.store_word(addr, value)?;
            }

            Instruction::Binary { dst, op, lhs, rhs } => {
                let lhs = self.eval(lhs, args, temps)?;
                let rhs = self.eval(rhs, args, temps)?;
                let value = self.apply_binary(*op, lhs, rhs)?;
                temps.insert(dst.0, value);
            }

            Instruction::Compare { dst, op, lhs, rhs } => {
                let lhs = self.eval(lhs, args, temps)?;
                let rhs = self.eval(rhs, args, temps)?;
                let truth = match op {
                    CmpOp::Eq => lhs == rhs,
                    CmpOp::Ne => lhs != rhs,
                    CmpOp::Lt => lhs < rhs,
                    CmpOp::Le => lhs <= rhs,
                    CmpOp::Gt => lhs > rhs,
                    CmpOp::Ge => lhs >= rhs,
                };
                temps.insert(dst.0, truth as Word);
            }

            Instruction::Phi { dst, incoming } => {
                let Some(prev) = prev_block else {
                    return Err(InterpError::InvalidIr("phi in an entry block".to_string()).into());
                };
                let matching = incoming.iter().find(|(block, _)| block.0 == prev);
                let Some((_, value)) = matching else {
                    return Err(InterpError::InvalidIr("phi with no matching predecessor".to_string()).into());
                };
                let value = self.eval(value, args, temps)?;
                temps.insert(dst.0, value);
            }

            Instruction::Call { dst, callee, args: call_args } => {
                let target = self.eval(callee, args, temps)?;
                let mut values = Vec::with_capacity(call_args.len());
                for arg in call_args {
                    values.push(self.eval(arg, args, temps)?);
                }

                let callable =
                    self.callables.get(&target).copied().ok_or(InterpError::NotAFunction(target))?;

                let result = match callable {
                    Callable::Defined(function) => self.call_function(function, values)?,
                    Callable::Builtin(builtin) => self.call_builtin(builtin, &values)?,
                };
                temps.insert(dst.0, result);
            }
        }

        Ok(())
    }

    fn eval(&self, value: &Value, args: &[Word], temps: &HashMap<u32, Word>) -> Result<Word, InterpError> {
        match value {
            Value::Const(w) => Ok(*w),
            Value::Param(n) => Ok(args.get(*n as usize).copied().unwrap_or(0)),
            Value::Temp(temp) => temps
                .get(&temp.0)
                .copied()
                .ok_or_else(|| InterpError::InvalidIr(format!("use of unset temp %{}", temp.0))),
            Value::Symbol(name) => self
                .symbols
                .get(name.as_str())
                .copied()
                .ok_or_else(|| InterpError::UndefinedSymbol(name.clone())),
        }
    }

    fn apply_binary(&self, op: BinOp, lhs: Word, rhs: Word) -> Result<Word, InterpError> {
        let bits = self.module.target.bits();
        let shift = (rhs as u32) & (bits - 1);

        let value = match op {
            BinOp::Add => lhs.wrapping_add(rhs),
            BinOp::Sub => lhs.wrapping_sub(rhs),
            BinOp::Mul => lhs.wrapping_mul(rhs),
            BinOp::Div => {
                if rhs == 0 {
                    return Err(InterpError::DivisionByZero);
                }
                lhs.wrapping_div(rhs)
            }
            BinOp::Rem => {
                if rhs == 0 {
                    return Err(InterpError::DivisionByZero);
                }
                lhs.wrapping_rem(rhs)
            }
            BinOp::Shl => lhs.wrapping_shl(shift),
            BinOp::Shr => {
                // Logical shift at the target word width.
                if bits == 64 { ((lhs as u64) >> shift) as Word } else { ((lhs as u32) >> shift) as Word }
            }
            BinOp::And => lhs & rhs,
            BinOp::Or => lhs | rhs,
            BinOp::Xor => lhs ^ rhs,
        };

        Ok(self.module.target.truncate(value))
    }

    // Runtime builtins
    // ================

    fn call_builtin(&mut self, builtin: Builtin, args: &[Word]) -> Result<Word, Trap> {
        let arg = |n: usize| args.get(n).copied().unwrap_or(0);

        match builtin {
            Builtin::Putchar => {
                let c = arg(0);
                for i in 0..self.bytes_per_word {
                    let byte = ((c >> (8 * i)) & 0xff) as u8;
                    if byte != 0 {
                        self.stdout.push(byte);
                    }
                }
                Ok(c)
            }

            Builtin::Getchar => Ok(match self.stdin.pop_front() {
                Some(byte) => byte as Word,
                None => -1,
            }),

            Builtin::Putnumb => {
                let n = arg(0);
                self.stdout.extend_from_slice(n.to_string().as_bytes());
                Ok(n)
            }

            Builtin::Putstr => {
                let s = arg(0);
                let mut i = 0;
                loop {
                    let byte = self.load_byte(s, i)?;
                    if byte == 0x04 {
                        return Ok(0);
                    }
                    self.stdout.push(byte);
                    i += 1;
                }
            }

            Builtin::Char => {
                let byte = self.load_byte(arg(0), arg(1))?;
                Ok(byte as Word)
            }

            Builtin::Lchar => {
                let c = arg(2);
                self.store_byte(arg(0), arg(1), (c & 0xff) as u8)?;
                Ok(c)
            }

            Builtin::Exit => Err(Trap::Exit),
        }
    }
}
