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

//! A headless developer harness for `chip8-runtime`.
//!
//! This is deliberately crude: text commands in over stdin, ASCII frames and
//! status lines out over stdout. It exists so the scheduler is exercisable
//! from a shell without pulling in the (explicitly out-of-scope) WebSocket
//! server, ROM-upload endpoint, or browser front end. A real deployment
//! would implement [`chip8_runtime::InputSink`]/[`chip8_runtime::OutputSink`]
//! against an actual socket instead of stdin/stdout.

use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use chip8_core::{Config, Machine, SCREEN_H, SCREEN_W};
use chip8_runtime::proto::RunStatus;
use chip8_runtime::sink::{InputEvent, InputSink, OutputSink};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Run a CHIP-8 ROM headlessly, driven by stdin commands.
#[derive(Parser, Debug)]
#[command(name = "chip8-headlessd")]
struct Args {
    /// Path to a .ch8 ROM file.
    rom: std::path::PathBuf,

    /// Target instructions per second.
    #[arg(long, default_value_t = 700)]
    tps: u32,

    #[arg(long)]
    no_display_wait: bool,
    #[arg(long)]
    no_clipping: bool,
    #[arg(long)]
    shifting: bool,
    #[arg(long)]
    no_load_store_increment: bool,
    #[arg(long)]
    logic_keeps_vf: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let rom = std::fs::read(&args.rom).with_context(|| format!("reading {:?}", args.rom))?;

    let config = Config {
        tps: Config::clamp_tps(args.tps),
        display_wait: !args.no_display_wait,
        clipping: !args.no_clipping,
        shifting: args.shifting,
        load_store_increment: !args.no_load_store_increment,
        logic_resets_vf: !args.logic_keeps_vf,
    };

    let machine = Machine::load_rom(&rom, config).context("loading ROM")?;

    let input = StdinInputSink::new();
    let output = StdoutOutputSink::default();
    let (cancel_tx, cancel_rx) = watch::channel(false);

    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        let _ = cancel_tx.send(true);
    });

    chip8_runtime::run(machine, input, output, cancel_rx).await;
    Ok(())
}

/// Reads whitespace-separated commands from stdin: `down <hex>`, `up <hex>`,
/// `key <hex>` (Fx0A satisfier), `speed <tps>`.
struct StdinInputSink {
    lines: tokio::io::Lines<BufReader<tokio::io::Stdin>>,
}

impl StdinInputSink {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

fn parse_command(line: &str) -> Option<InputEvent> {
    let mut parts = line.split_whitespace();
    match (parts.next()?, parts.next()?) {
        ("down", hex) => Some(InputEvent::Key {
            key_index: u8::from_str_radix(hex, 16).ok()?,
            pressed: true,
        }),
        ("up", hex) => Some(InputEvent::Key {
            key_index: u8::from_str_radix(hex, 16).ok()?,
            pressed: false,
        }),
        ("key", hex) => Some(InputEvent::Fx0aSatisfier {
            value: u8::from_str_radix(hex, 16).ok()?,
        }),
        ("speed", tps) => Some(InputEvent::SetSpeed {
            tps: tps.parse().ok()?,
        }),
        _ => None,
    }
}

#[async_trait::async_trait]
impl InputSink for StdinInputSink {
    async fn recv(&mut self, timeout: Duration) -> Option<InputEvent> {
        match tokio::time::timeout(timeout, self.lines.next_line()).await {
            Ok(Ok(Some(line))) => parse_command(&line),
            _ => None,
        }
    }
}

/// Prints frames as ASCII art, but only when the framebuffer actually
/// changed since the last emission, so an idle ROM doesn't flood the
/// terminal at 60 Hz.
#[derive(Default)]
struct StdoutOutputSink {
    last_frame: Option<Vec<u8>>,
}

impl OutputSink for StdoutOutputSink {
    fn send_frame(&mut self, framebuffer: &[u8]) {
        if self.last_frame.as_deref() == Some(framebuffer) {
            return;
        }
        self.last_frame = Some(framebuffer.to_vec());

        let mut out = std::io::stdout().lock();
        let _ = write!(out, "\x1B[2J\x1B[H");
        for row in 0..SCREEN_H {
            for col in 0..SCREEN_W {
                let on = framebuffer[row * SCREEN_W + col] != 0;
                let _ = write!(out, "{}", if on { '#' } else { ' ' });
            }
            let _ = writeln!(out);
        }
        let _ = out.flush();
    }

    fn send_sound(&mut self, on: bool) {
        println!("[sound {}]", if on { "on" } else { "off" });
    }

    fn send_need_key(&mut self, vx: u8) {
        println!("[need key for V{vx:X}]");
    }

    fn send_status(&mut self, status: RunStatus) {
        println!("[status {status:?}]");
    }
}
