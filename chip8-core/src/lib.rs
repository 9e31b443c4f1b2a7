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

//! A CHIP-8 fetch/decode/execute engine.
//!
//! This crate is the interpreter proper: memory, registers, stack, timers,
//! framebuffer and keypad; the opcode decoder; the 35 standard CHIP-8
//! instruction handlers; and ROM loading/reset. It performs no I/O and
//! drives no clock of its own — a driving loop (see the `chip8-runtime`
//! crate) is expected to call [`Machine::execute`] at a target rate and
//! [`Machine::update_timers`] at 60 Hz.

mod config;
mod decode;
mod error;
mod font;
mod machine;
mod ops;

pub use config::Config;
pub use error::{ExecError, LoadError};
pub use font::{FONT_GLYPH_SIZE, FONT_SPRITES, FONT_START};
pub use machine::{Machine, HALT_SENTINEL, MAX_ROM_SIZE, MEM_SIZE, SCREEN_H, SCREEN_W};

/// The result of executing one instruction.
///
/// Modeled as a tagged return rather than an exception: `Machine::execute`
/// never panics on a recognized-but-terminal condition, it reports one of
/// these instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Instruction executed normally; keep stepping.
    Continue,
    /// Fx0A with no key currently pressed. `pc` has been rewound so the same
    /// instruction re-runs once a key becomes available.
    NeedKey(u8),
    /// The halt sentinel was fetched.
    Halted,
    /// A VM programming error occurred (stack over/underflow, memory
    /// overflow). Terminal.
    Crashed(ExecError),
}
