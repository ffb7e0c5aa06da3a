// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interactive demo console for the `emsh` engine.
//!
//! This is the "driver" side of the engine contract: it owns the terminal
//! (raw mode, byte-at-a-time reads) and the top-level state machine:
//!
//! ```text
//! Init ──start engine──▶ Shell ──engine stopped──▶ Command
//!   ▲                                                 │
//!   └────────────── pending task done ────────────────┘
//! ```
//!
//! While in `Shell`, every byte read from stdin is fed to the engine and
//! its output flushed. When a command suspends the engine (`sleep`), the
//! driver pumps the command's task step until it reports done, then starts
//! the engine again. `exit` ends the loop.

mod commands;
mod raw_mode;

use clap::Parser;
use commands::{Console, TaskStatus};
use emsh::{Shell, ShellConfig};
use miette::IntoDiagnostic;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "emsh-console",
    about = "Interactive demo console for the emsh engine"
)]
struct CliArg {
    /// Prompt printed before each input line.
    #[arg(long, default_value = emsh::DEFAULT_PROMPT)]
    prompt: String,

    /// History entries to keep, including the in-progress draft.
    #[arg(long, default_value_t = emsh::DEFAULT_HISTORY_CAPACITY)]
    history: usize,

    /// Ring the terminal bell when the line is full.
    #[arg(long)]
    bell: bool,

    /// Append a trace log to this file (the terminal stays clean).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsoleState {
    Init,
    Shell,
    Command,
}

fn main() -> miette::Result<()> {
    let cli_arg = CliArg::parse();

    let _log_guard = cli_arg
        .log_file
        .as_deref()
        .map(init_tracing)
        .transpose()?;

    let config = ShellConfig {
        prompt: cli_arg.prompt,
        history_capacity: cli_arg.history,
        bell_on_overflow: cli_arg.bell,
        ..ShellConfig::default()
    };
    let mut shell = Shell::new(config, Console::default());

    let _raw_mode_guard = raw_mode::RawModeGuard::new()?;
    run(&mut shell).into_diagnostic()
}

fn run(shell: &mut Shell<Console>) -> io::Result<()> {
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    let mut state = ConsoleState::Init;

    loop {
        match state {
            ConsoleState::Init => {
                shell.start(&mut stdout)?;
                stdout.flush()?;
                state = ConsoleState::Shell;
            }

            ConsoleState::Shell => {
                let mut byte = [0_u8; 1];
                if stdin.read(&mut byte)? == 0 {
                    // EOF: nothing more will arrive.
                    break;
                }
                shell.feed(byte[0], &mut stdout)?;
                stdout.flush()?;
                if !shell.is_running() {
                    state = ConsoleState::Command;
                }
            }

            ConsoleState::Command => {
                if shell.executor().should_quit() {
                    break;
                }
                if shell.executor_mut().step(&mut stdout)? == TaskStatus::Done {
                    state = ConsoleState::Init;
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(path: &std::path::Path) -> miette::Result<tracing_appender::non_blocking::WorkerGuard> {
    let file = std::fs::File::options()
        .create(true)
        .append(true)
        .open(path)
        .into_diagnostic()?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .init();
    Ok(guard)
}
