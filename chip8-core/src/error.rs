/*
Copyright 2020 Anish Jewalikar

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Error types for ROM loading and opcode execution.

use thiserror::Error;

/// Raised by [`crate::Machine::load_rom`] before any instruction has run.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    #[error("ROM is empty")]
    RomEmpty,

    #[error("ROM is {len} bytes, which exceeds the {max} byte program area")]
    RomTooLarge { len: usize, max: usize },
}

/// A terminal VM programming error, raised mid-execution by an opcode
/// handler and always reported to the caller as `Crashed`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExecError {
    #[error("stack overflow: CALL with a full 16-slot call stack")]
    StackOverflow,

    #[error("stack underflow: RET with an empty call stack")]
    StackUnderflow,

    #[error("memory overflow: Fx55 write would cross address {addr:#05X}")]
    MemoryOverflow { addr: usize },
}
