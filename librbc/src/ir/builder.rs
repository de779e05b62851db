// Copyright 2025-2026 Neil Henderson
//
//! The `builder` module defines [Builder], the narrow interface through which the emitter
//! constructs a [Module].
//!
//! The builder owns the module under construction and, while a function is being defined, an
//! insertion point: the current block of the current function. Instructions are appended at
//! the insertion point; appending to a terminated block is an emitter bug and an ICE.

use crate::ICE;
use crate::core::Target;

use super::{
    BinOp, Block, BlockId, CmpOp, Function, Global, GlobalInit, Instruction, Linkage, Module, TempId, Terminator,
    Value,
};

/// Builds a [Module] one global and one function at a time.
pub struct Builder {
    module: Module,
    current: Option<FunctionBuilder>,
}

/// The function currently being defined.
struct FunctionBuilder {
    function: Function,
    current_block: BlockId,
    next_temp: u32,
    next_block_index: u32,
}

impl Builder {
    /// Creates a builder for a new, empty module.
    pub fn new(module_name: &str, target: Target) -> Self {
        let module =
            Module { name: module_name.to_string(), target, globals: Vec::new(), functions: Vec::new() };
        Self { module, current: None }
    }

    /// The target configuration of the module being built.
    pub fn target(&self) -> Target {
        self.module.target
    }

    /// Consumes the builder and returns the finished module.
    pub fn finish(self) -> Module {
        if self.current.is_some() {
            ICE!("module finished while a function is still being defined");
        }
        self.module
    }

    // Globals
    // =======

    /// Adds a global definition. The name must be unique in the module; the emitter diagnoses
    /// duplicate B definitions before calling this.
    pub fn add_global(&mut self, name: &str, linkage: Linkage, init: GlobalInit) {
        if self.module.global(name).is_some() {
            ICE!("global '{name}' added twice");
        }
        self.module.globals.push(Global { name: name.to_string(), linkage, init });
    }

    /// Declares a symbol defined outside this translation unit. Idempotent, and a no-op if the
    /// module defines the symbol itself.
    pub fn declare_external(&mut self, name: &str) {
        if self.module.global(name).is_some() || self.module.function(name).is_some() {
            return;
        }
        self.module.globals.push(Global {
            name: name.to_string(),
            linkage: Linkage::External,
            init: GlobalInit::External,
        });
    }

    // Functions
    // =========

    /// Begins defining a function with the given number of word parameters. Creates the entry
    /// block and positions the builder there.
    pub fn begin_function(&mut self, name: &str, params: usize) -> BlockId {
        if self.current.is_some() {
            ICE!("begin_function('{name}') while another function is being defined");
        }
        if self.module.function(name).is_some() {
            ICE!("function '{name}' defined twice");
        }

        let entry = Block { label: "entry".to_string(), instructions: Vec::new(), terminator: None };
        let function = Function { name: name.to_string(), params, blocks: vec![entry] };

        self.current =
            Some(FunctionBuilder { function, current_block: BlockId(0), next_temp: 0, next_block_index: 0 });

        BlockId(0)
    }

    /// Finishes the current function and adds it to the module.
    ///
    /// Any block left without a terminator returns 0, which implements B's implicit
    /// `return 0` at the end of a function body (and closes the unreachable continuation
    /// blocks that `goto`, `break` and `return` leave behind).
    pub fn finish_function(&mut self) {
        let Some(mut fb) = self.current.take() else {
            ICE!("finish_function with no function being defined");
        };

        for block in &mut fb.function.blocks {
            if block.terminator.is_none() {
                block.terminator = Some(Terminator::Return(Value::Const(0)));
            }
        }

        self.module.functions.push(fb.function);
    }

    // Blocks
    // ======

    /// Appends a new, empty block to the current function. Does not move the insertion point.
    pub fn new_block(&mut self, name_hint: &str) -> BlockId {
        let fb = self.current_mut();
        fb.next_block_index += 1;
        let label = format!("{name_hint}{}", fb.next_block_index);

        fb.function.blocks.push(Block { label, instructions: Vec::new(), terminator: None });
        BlockId(fb.function.blocks.len() - 1)
    }

    /// Moves the insertion point to the end of the given block.
    pub fn position_at_end(&mut self, block: BlockId) {
        let fb = self.current_mut();
        if block.0 >= fb.function.blocks.len() {
            ICE!("position_at_end of a block that does not exist");
        }
        fb.current_block = block;
    }

    /// The block instructions are currently appended to.
    pub fn current_block(&self) -> BlockId {
        self.current_ref().current_block
    }

    /// Does the current block already have a terminator?
    pub fn is_terminated(&self) -> bool {
        let fb = self.current_ref();
        fb.function.blocks[fb.current_block.0].terminator.is_some()
    }

    // Instructions
    // ============

    /// Reserves `words` stack cells; yields the word index of the first.
    pub fn alloca(&mut self, words: usize) -> Value {
        let dst = self.fresh_temp();
        self.append(Instruction::Alloca { dst, words });
        Value::Temp(dst)
    }

    /// Loads the word at the given word index.
    pub fn load(&mut self, addr: Value) -> Value {
        let dst = self.fresh_temp();
        self.append(Instruction::Load { dst, addr });
        Value::Temp(dst)
    }

    /// Stores a word at the given word index.
    pub fn store(&mut self, addr: Value, value: Value) {
        self.append(Instruction::Store { addr, value });
    }

    /// Applies a binary operator.
    pub fn binary(&mut self, op: BinOp, lhs: Value, rhs: Value) -> Value {
        let dst = self.fresh_temp();
        self.append(Instruction::Binary { dst, op, lhs, rhs });
        Value::Temp(dst)
    }

    /// Applies a comparison, yielding the word 1 or 0.
    pub fn compare(&mut self, op: CmpOp, lhs: Value, rhs: Value) -> Value {
        let dst = self.fresh_temp();
        self.append(Instruction::Compare { dst, op, lhs, rhs });
        Value::Temp(dst)
    }

    /// Selects a value by predecessor block.
    pub fn phi(&mut self, incoming: Vec<(BlockId, Value)>) -> Value {
        let dst = self.fresh_temp();
        self.append(Instruction::Phi { dst, incoming });
        Value::Temp(dst)
    }

    /// Calls the function whose descriptor lives at the callee's word index.
    pub fn call(&mut self, callee: Value, args: Vec<Value>) -> Value {
        let dst = self.fresh_temp();
        self.append(Instruction::Call { dst, callee, args });
        Value::Temp(dst)
    }

    // Terminators
    // ===========

    /// Terminates the current block with an unconditional branch.
    pub fn branch(&mut self, target: BlockId) {
        self.terminate(Terminator::Branch(target));
    }

    /// Terminates the current block with a conditional branch on `cond != 0`.
    pub fn cond_branch(&mut self, cond: Value, then_block: BlockId, else_block: BlockId) {
        self.terminate(Terminator::CondBranch { cond, then_block, else_block });
    }

    /// Terminates the current block with a return.
    pub fn ret(&mut self, value: Value) {
        self.terminate(Terminator::Return(value));
    }

    // Internals
    // =========

    fn current_ref(&self) -> &FunctionBuilder {
        match &self.current {
            Some(fb) => fb,
            None => ICE!("builder used outside of a function definition"),
        }
    }

    fn current_mut(&mut self) -> &mut FunctionBuilder {
        match &mut self.current {
            Some(fb) => fb,
            None => ICE!("builder used outside of a function definition"),
        }
    }

    fn fresh_temp(&mut self) -> TempId {
        let fb = self.current_mut();
        let id = TempId(fb.next_temp);
        fb.next_temp += 1;
        id
    }

    fn append(&mut self, instruction: Instruction) {
        let fb = self.current_mut();
        let block = &mut fb.function.blocks[fb.current_block.0];
        if block.terminator.is_some() {
            ICE!("instruction appended to the terminated block '{}'", block.label);
        }
        block.instructions.push(instruction);
    }

    fn terminate(&mut self, terminator: Terminator) {
        let fb = self.current_mut();
        let block = &mut fb.function.blocks[fb.current_block.0];
        if block.terminator.is_some() {
            ICE!("second terminator for block '{}'", block.label);
        }
        block.terminator = Some(terminator);
    }
}
