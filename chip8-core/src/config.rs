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

//! Boot-time configuration: quirk flags and the default instruction rate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Quirk flags and default timing, lifted out into a standalone value so it
/// can be constructed once and handed to [`crate::Machine::load_rom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Default instructions-per-second for a freshly loaded session.
    pub tps: u32,

    /// Dxyn yields to the next 60 Hz frame boundary.
    pub display_wait: bool,

    /// Sprite pixels that extend past the right/bottom edge after base-wrap
    /// are dropped rather than wrapped.
    pub clipping: bool,

    /// 8xy6/8xyE take their input from Vy rather than Vx.
    pub shifting: bool,

    /// Fx55/Fx65 advance I by `x + 1` after the transfer.
    pub load_store_increment: bool,

    /// 8xy1/8xy2/8xy3 clear VF after the logic op.
    pub logic_resets_vf: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tps: 700,
            display_wait: true,
            clipping: true,
            shifting: false,
            load_store_increment: true,
            logic_resets_vf: true,
        }
    }
}

impl Config {
    /// Clamp `tps` to the minimum allowed rate of 1.
    pub fn clamp_tps(tps: u32) -> u32 {
        tps.max(1)
    }
}
