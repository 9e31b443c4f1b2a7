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

//! Machine state and the ROM loader/reset logic.

use crate::config::Config;
use crate::error::LoadError;
use crate::font::{FONT_SPRITES, FONT_START};

/// Size of addressable working memory.
pub const MEM_SIZE: usize = 0x1000;
/// First address of the program area; everything below is reserved.
pub const PROGRAM_START: usize = 0x200;
/// Largest ROM the loader will accept.
pub const MAX_ROM_SIZE: usize = MEM_SIZE - PROGRAM_START;

/// Display width in pixels.
pub const SCREEN_W: usize = 64;
/// Display height in pixels.
pub const SCREEN_H: usize = 32;

/// The non-standard halt marker the loader appends after a ROM, when room
/// permits. The decoder treats a fetched `0xFFFF` as a halt rather than
/// attempting to execute it.
pub const HALT_SENTINEL: u16 = 0xFFFF;

/// The CHIP-8 machine state: memory, registers, stack, timers, framebuffer
/// and keypad. A pure value container — no I/O, no scheduling, no threads.
///
/// Mutated by exactly two writers: opcode handlers, called synchronously
/// from a driving scheduler, and [`Machine::set_key`], called by whatever
/// external task observes key events.
#[derive(Debug, Clone)]
pub struct Machine {
    pub memory: Box<[u8; MEM_SIZE]>,
    pub registers: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; 16],
    pub dt: u8,
    pub st: u8,
    pub framebuffer: Box<[u8; SCREEN_W * SCREEN_H]>,
    pub keypad: [bool; 16],
    pub config: Config,

    /// Set by Dxyn, cleared by the driving scheduler at the top of a frame.
    pub draw_sync_pending: bool,
}

impl Machine {
    /// Construct a fresh `Machine` with a ROM loaded at 0x200 and the font
    /// installed at 0x050. Fails without touching any state the caller could
    /// observe if the ROM is empty or too large for the program area.
    pub fn load_rom(rom: &[u8], config: Config) -> Result<Self, LoadError> {
        if rom.is_empty() {
            return Err(LoadError::RomEmpty);
        }
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::RomTooLarge {
                len: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }

        let mut memory = Box::new([0u8; MEM_SIZE]);
        memory[FONT_START..FONT_START + FONT_SPRITES.len()].copy_from_slice(&FONT_SPRITES);
        memory[PROGRAM_START..PROGRAM_START + rom.len()].copy_from_slice(rom);

        let sentinel_at = PROGRAM_START + rom.len();
        if sentinel_at + 2 <= MEM_SIZE {
            memory[sentinel_at..sentinel_at + 2].copy_from_slice(&HALT_SENTINEL.to_be_bytes());
        }

        Ok(Self {
            memory,
            registers: [0; 16],
            i: 0,
            pc: PROGRAM_START as u16,
            sp: 0,
            stack: [0; 16],
            dt: 0,
            st: 0,
            framebuffer: Box::new([0; SCREEN_W * SCREEN_H]),
            keypad: [false; 16],
            config,
            draw_sync_pending: false,
        })
    }

    /// Reset to the state a fresh ROM load would produce, re-installing the
    /// font and re-copying `rom`. Quirk configuration carries over from the
    /// current session.
    pub fn reset(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        let fresh = Self::load_rom(rom, self.config)?;
        *self = fresh;
        Ok(())
    }

    /// Decrement DT and ST if non-zero. Call once per 60 Hz tick.
    pub fn update_timers(&mut self) {
        if self.dt > 0 {
            self.dt -= 1;
        }
        if self.st > 0 {
            self.st -= 1;
        }
    }

    /// Whether the buzzer should be sounding.
    pub fn sound_on(&self) -> bool {
        self.st > 0
    }

    /// Record an external key-state change. `index` outside 0x0..0xF is
    /// ignored silently.
    pub fn set_key(&mut self, index: u8, pressed: bool) {
        if let Some(slot) = self.keypad.get_mut(index as usize) {
            *slot = pressed;
        }
    }

    /// Fetch the big-endian opcode at `pc` without advancing it. The address
    /// wraps within the 12-bit address space rather than panicking, the same
    /// way `Annn`/`Bnnn`/`Fx1E` wrap `I` and jump targets.
    pub(crate) fn fetch(&self) -> u16 {
        let addr = self.pc as usize & 0x0FFF;
        let hi = self.memory[addr];
        let lo = self.memory[(addr + 1) & 0x0FFF];
        u16::from_be_bytes([hi, lo])
    }
}
