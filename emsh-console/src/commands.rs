// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The demo command set and its cooperative task loop.
//!
//! `Console` is the engine's [`Executor`]: it looks the command name up in a
//! sorted table (binary search) and runs its entry function. Commands that
//! need time (`sleep`) return [`ExecOutcome::Continue`] and leave a
//! pending task behind; the driver pumps [`Console::step`] until the task
//! reports done, then restarts the engine.

use emsh::core::decimal;
use emsh::{ExecArgs, ExecOutcome, Executor};
use std::io::{self, Write};
use std::time::Duration;

/// Result of one pump of a pending command task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Done,
    Continue,
}

#[derive(Debug)]
enum PendingTask {
    Sleep { remaining: u32 },
}

#[derive(Debug, Default)]
pub struct Console {
    quit: bool,
    pending: Option<PendingTask>,
}

struct ConsoleCommand {
    name: &'static str,
    entry: fn(&mut Console, &mut dyn Write, ExecArgs<'_>) -> io::Result<ExecOutcome>,
}

// Keep sorted by name.
const COMMANDS: &[ConsoleCommand] = &[
    ConsoleCommand {
        name: "echo",
        entry: echo,
    },
    ConsoleCommand {
        name: "exit",
        entry: exit,
    },
    ConsoleCommand {
        name: "greet",
        entry: greet,
    },
    ConsoleCommand {
        name: "sleep",
        entry: sleep,
    },
];

impl Executor for Console {
    fn exec(&mut self, term: &mut dyn Write, args: ExecArgs<'_>) -> io::Result<ExecOutcome> {
        debug_assert!(
            COMMANDS.windows(2).all(|pair| pair[0].name < pair[1].name),
            "command table must stay sorted for binary search"
        );

        let name = args.argv[0];
        match COMMANDS.binary_search_by(|command| command.name.cmp(name)) {
            Ok(index) => (COMMANDS[index].entry)(self, term, args),
            Err(_) => {
                tracing::debug!(name, "command not found");
                term.write_all(b"command not found\n")?;
                Ok(ExecOutcome::Done)
            }
        }
    }
}

impl Console {
    /// The `exit` command ran; the driver should wind down.
    #[must_use]
    pub fn should_quit(&self) -> bool { self.quit }

    /// Pump the pending command task by one step.
    ///
    /// # Errors
    ///
    /// Returns an error if writing task output fails.
    pub fn step(&mut self, term: &mut dyn Write) -> io::Result<TaskStatus> {
        match self.pending.as_mut() {
            Some(PendingTask::Sleep { remaining }) => {
                write!(term, "zzz...")?;
                term.flush()?;
                std::thread::sleep(Duration::from_secs(1));
                *remaining -= 1;
                if *remaining == 0 {
                    term.write_all(b"\n")?;
                    self.pending = None;
                    Ok(TaskStatus::Done)
                } else {
                    Ok(TaskStatus::Continue)
                }
            }
            None => Ok(TaskStatus::Done),
        }
    }
}

fn echo(_console: &mut Console, term: &mut dyn Write, args: ExecArgs<'_>) -> io::Result<ExecOutcome> {
    if let Some(word) = args.argv.get(1) {
        write!(term, "{word}")?;
    }
    for word in args.argv.iter().skip(2) {
        write!(term, " {word}")?;
    }
    term.write_all(b"\n")?;
    Ok(ExecOutcome::Done)
}

fn exit(console: &mut Console, _term: &mut dyn Write, _args: ExecArgs<'_>) -> io::Result<ExecOutcome> {
    console.quit = true;
    // Continue so the engine stops and no further prompt is printed; the
    // driver sees `should_quit` and ends instead of pumping a task.
    Ok(ExecOutcome::Continue)
}

fn greet(_console: &mut Console, term: &mut dyn Write, args: ExecArgs<'_>) -> io::Result<ExecOutcome> {
    let mut greeting: Option<&str> = Some("Hi");
    let mut name = "Somebody";

    while let Some(option) = args.opts.getopt(term, args.argv, "maenc:")? {
        match option {
            'm' => greeting = Some("Good morning"),
            'a' => greeting = Some("Good afternoon"),
            'e' => greeting = Some("Good evening"),
            'n' => greeting = Some("Good night"),
            'c' => greeting = args.opts.optarg(args.argv),
            '?' => greeting = None,
            _ => {}
        }
    }

    if let Some(positional) = args.argv.get(args.opts.optind) {
        name = positional;
    }

    if let Some(greeting) = greeting {
        writeln!(term, "{greeting}, {name}.")?;
    }
    Ok(ExecOutcome::Done)
}

fn sleep(console: &mut Console, _term: &mut dyn Write, args: ExecArgs<'_>) -> io::Result<ExecOutcome> {
    let Some(count_arg) = args.argv.get(1) else {
        return Ok(ExecOutcome::Done);
    };

    // Decline to run on a malformed count: non-numeric, trailing junk, zero.
    match decimal::parse_unsigned(count_arg.as_bytes(), u64::from(u32::MAX)) {
        Ok((count, consumed)) if consumed == count_arg.len() && count > 0 => {
            let Ok(remaining) = u32::try_from(count) else {
                return Ok(ExecOutcome::Done);
            };
            console.pending = Some(PendingTask::Sleep { remaining });
            Ok(ExecOutcome::Continue)
        }
        _ => Ok(ExecOutcome::Done),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emsh::{Shell, ShellConfig, StdoutMock};
    use pretty_assertions::assert_eq;

    fn run_line(shell: &mut Shell<Console>, stdout_mock: &mut StdoutMock, line: &str) {
        for byte in line.as_bytes() {
            shell.feed(*byte, stdout_mock).unwrap();
        }
        shell.feed(b'\n', stdout_mock).unwrap();
    }

    #[test]
    fn test_command_table_is_sorted() {
        assert!(COMMANDS.windows(2).all(|pair| pair[0].name < pair[1].name));
    }

    #[test]
    fn test_echo_joins_arguments() {
        let mut shell = Shell::new(ShellConfig::default(), Console::default());
        let mut stdout_mock = StdoutMock::default();
        shell.start(&mut stdout_mock).unwrap();
        stdout_mock.clear();

        run_line(&mut shell, &mut stdout_mock, "echo hello world");
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.contains("hello world\n"), "got: {output:?}");
    }

    #[test]
    fn test_unknown_command_reports() {
        let mut shell = Shell::new(ShellConfig::default(), Console::default());
        let mut stdout_mock = StdoutMock::default();
        shell.start(&mut stdout_mock).unwrap();

        run_line(&mut shell, &mut stdout_mock, "nope");
        assert!(
            stdout_mock
                .get_copy_of_buffer_as_string()
                .contains("command not found\n")
        );
    }

    #[test]
    fn test_greet_with_options() {
        let mut shell = Shell::new(ShellConfig::default(), Console::default());
        let mut stdout_mock = StdoutMock::default();
        shell.start(&mut stdout_mock).unwrap();
        stdout_mock.clear();

        run_line(&mut shell, &mut stdout_mock, "greet -m World");
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.contains("Good morning, World.\n"), "got: {output:?}");

        run_line(&mut shell, &mut stdout_mock, "greet -c Ahoy Crew");
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.contains("Ahoy, Crew.\n"), "got: {output:?}");

        // Unknown option suppresses the greeting entirely.
        stdout_mock.clear();
        run_line(&mut shell, &mut stdout_mock, "greet -z World");
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.contains("illegal option -- z"), "got: {output:?}");
        assert!(!output.contains("World."), "got: {output:?}");
    }

    #[test]
    fn test_sleep_declines_bad_counts() {
        let mut shell = Shell::new(ShellConfig::default(), Console::default());
        let mut stdout_mock = StdoutMock::default();
        shell.start(&mut stdout_mock).unwrap();

        for line in ["sleep", "sleep 0", "sleep abc", "sleep 2x"] {
            run_line(&mut shell, &mut stdout_mock, line);
            assert!(shell.is_running(), "line {line:?} should not suspend");
        }
    }

    #[test]
    fn test_sleep_suspends_engine_and_step_counts_down() {
        let mut shell = Shell::new(ShellConfig::default(), Console::default());
        let mut stdout_mock = StdoutMock::default();
        shell.start(&mut stdout_mock).unwrap();

        run_line(&mut shell, &mut stdout_mock, "sleep 2");
        assert!(!shell.is_running());

        let mut task_output = StdoutMock::default();
        assert_eq!(
            shell.executor_mut().step(&mut task_output).unwrap(),
            TaskStatus::Continue
        );
        assert_eq!(
            shell.executor_mut().step(&mut task_output).unwrap(),
            TaskStatus::Done
        );
        assert_eq!(
            task_output.get_copy_of_buffer_as_string(),
            "zzz...zzz...\n"
        );
    }

    #[test]
    fn test_exit_sets_quit_and_stops_engine() {
        let mut shell = Shell::new(ShellConfig::default(), Console::default());
        let mut stdout_mock = StdoutMock::default();
        shell.start(&mut stdout_mock).unwrap();

        run_line(&mut shell, &mut stdout_mock, "exit");
        assert!(!shell.is_running());
        assert!(shell.executor().should_quit());
    }
}
