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

//! The CHIP-8 real-time scheduler and wire-message contract.
//!
//! `chip8-core` is a pure interpreter with no notion of wall-clock time or
//! I/O. This crate supplies the piece that drives it: a cooperative,
//! single-threaded scheduler that targets a given instructions-per-second
//! rate, keeps the 60 Hz timer/frame cadence, and mediates the Fx0A
//! blocking key wait — all against the abstract
//! [`sink::InputSink`]/[`sink::OutputSink`] boundary rather than a concrete
//! transport.

pub mod proto;
pub mod scheduler;
pub mod sink;

pub use scheduler::run;
pub use sink::{InputEvent, InputSink, OutputSink};
