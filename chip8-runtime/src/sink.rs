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

//! The abstract input/output boundary the scheduler drives against.
//!
//! The real transport (WebSocket framing, ROM upload, the browser front end)
//! is an external collaborator. These traits are that collaborator's
//! contract: anything that can produce [`InputEvent`]s and consume the
//! outputs below can be wired to [`crate::scheduler::run`].

use std::time::Duration;

use crate::proto::RunStatus;

/// One event arriving from the external world, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key { key_index: u8, pressed: bool },
    SetSpeed { tps: u32 },
    Fx0aSatisfier { value: u8 },
}

/// Supplies input events to the scheduler. A single implementation owns the
/// "single writer" side of the keypad and the ordered control-event queue.
#[async_trait::async_trait]
pub trait InputSink: Send {
    /// Wait up to `timeout` for the next event. `None` means the timeout
    /// elapsed with nothing to deliver, not that the source is closed.
    async fn recv(&mut self, timeout: Duration) -> Option<InputEvent>;
}

/// Receives the core's outputs: frames, sound edges, and status messages.
///
/// Implemented synchronously so the scheduler applies back-pressure if the
/// sink blocks, rather than buffering into an unbounded queue; an async
/// transport layer can still wrap a bounded channel behind this and block
/// the scheduler thread only as long as that channel is full.
pub trait OutputSink: Send {
    fn send_frame(&mut self, framebuffer: &[u8]);
    fn send_sound(&mut self, on: bool);
    fn send_need_key(&mut self, vx: u8);
    fn send_status(&mut self, status: RunStatus);
}
