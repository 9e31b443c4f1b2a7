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

//! The real-time scheduler: drives `chip8_core::Machine` at a target
//! instruction rate, decrements timers and emits frames at 60 Hz, and
//! mediates the Fx0A blocking key wait — all without busy-spinning or
//! drifting.
//!
//! The loop accumulates real elapsed time into a cycle budget, runs that
//! many instructions, updates timers, and sleeps to the next frame
//! boundary, built on `tokio` because the input side here is an
//! asynchronous remote channel rather than a local windowing event loop.

use std::time::Duration;

use chip8_core::{Config, Machine, Outcome};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::proto::RunStatus;
use crate::sink::{InputEvent, InputSink, OutputSink};

const FRAME_HZ: u32 = 60;
const FRAME_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / FRAME_HZ as u64);
const FX0A_POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Drive `machine` to completion (halt, crash, or cancellation).
///
/// `cancel` is a `watch` channel; setting it to `true` stops the scheduler at
/// the next suspension point without emitting any further output.
pub async fn run(
    mut machine: Machine,
    mut input: impl InputSink,
    mut output: impl OutputSink,
    mut cancel: watch::Receiver<bool>,
) {
    let mut tps = Config::clamp_tps(machine.config.tps);
    let mut last_tick = Instant::now();
    let mut cpu_time_debt = 0.0f64;
    let mut awaiting_vx: Option<u8> = None;
    let mut last_sound_state = false;

    loop {
        if *cancel.borrow() {
            info!("scheduler cancelled");
            return;
        }

        // Step 1: clear the draw-sync flag at the top of every frame.
        machine.draw_sync_pending = false;

        if let Some(vx) = awaiting_vx {
            // Step 2: blocking key wait.
            match input.recv(FX0A_POLL_TIMEOUT).await {
                Some(InputEvent::Fx0aSatisfier { value }) => {
                    let value = value & 0xF;
                    debug!(vx, value, "fx0a satisfied");
                    // `execute()` parked `pc` pointing back at the Fx0A
                    // instruction itself (see chip8_core's NeedKey resume
                    // design). An external satisfier message completes the
                    // instruction's effect directly rather than faking a
                    // keypress and re-running it, so we write the register
                    // and step past the instruction by hand.
                    machine.registers[vx as usize] = value;
                    machine.pc = machine.pc.wrapping_add(2);
                    awaiting_vx = None;
                    last_tick = Instant::now();
                    cpu_time_debt = 0.0;
                }
                Some(InputEvent::Key { key_index, pressed }) => {
                    machine.set_key(key_index, pressed);
                }
                Some(InputEvent::SetSpeed { tps: new_tps }) => {
                    tps = Config::clamp_tps(new_tps);
                }
                None => {
                    // Timed out; no frames are emitted while waiting.
                }
            }
            continue;
        }

        // Drain any control events that arrived since the last iteration
        // without blocking — key state must be visible to the next
        // instruction that polls it.
        while let Some(event) = input.recv(Duration::ZERO).await {
            match event {
                InputEvent::Key { key_index, pressed } => machine.set_key(key_index, pressed),
                InputEvent::SetSpeed { tps: new_tps } => tps = Config::clamp_tps(new_tps),
                InputEvent::Fx0aSatisfier { .. } => {
                    // No Fx0A pending; ignored.
                }
            }
        }

        // Steps 3-4: accumulate CPU time debt and compute the cycle budget.
        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f64();
        last_tick = now;

        cpu_time_debt += dt;
        let cycles = (cpu_time_debt * tps as f64).floor() as u64;
        cpu_time_debt = (cpu_time_debt - cycles as f64 / tps as f64).max(0.0);

        // Step 5: execute up to `cycles` instructions, stopping early as needed.
        let mut crashed = false;
        for _ in 0..cycles {
            match machine.execute() {
                Outcome::Continue => {}
                Outcome::NeedKey(vx) => {
                    debug!(vx, "need key");
                    awaiting_vx = Some(vx);
                    output.send_need_key(vx);
                    break;
                }
                Outcome::Halted => {
                    info!("halted");
                    output.send_status(RunStatus::Halted);
                    return;
                }
                Outcome::Crashed(err) => {
                    warn!(error = %err, "crashed");
                    output.send_status(RunStatus::Crashed);
                    crashed = true;
                    break;
                }
            }

            if machine.config.display_wait && machine.draw_sync_pending {
                break;
            }
        }
        if crashed {
            return;
        }
        if awaiting_vx.is_some() {
            // A NeedKey break resets timing the same way the Python
            // prototype does, so resuming doesn't replay a burst of debt.
            last_tick = Instant::now();
            cpu_time_debt = 0.0;
            continue;
        }

        // Step 6: timers.
        machine.update_timers();

        // Step 7: sound edges only.
        let sound_on = machine.sound_on();
        if sound_on != last_sound_state {
            output.send_sound(sound_on);
            last_sound_state = sound_on;
        }

        // Step 8: emit the frame.
        output.send_frame(machine.framebuffer.as_slice());

        // Step 9: sleep to the next frame boundary, never negative.
        let elapsed = Instant::now().duration_since(now);
        let sleep_for = FRAME_PERIOD.saturating_sub(elapsed);
        tokio::time::sleep(sleep_for).await;
    }
}
