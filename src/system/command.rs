//! Process spawning for system commands.

use std::ffi::OsStr;
use std::process::{Command, Output, Stdio};

/// Runs `program` to completion with all standard streams piped and returns
/// its captured output.
///
/// # Errors
///
/// Returns the spawn or wait failure, e.g. `NotFound` when the program is
/// not installed.
pub fn run_command<I: IntoIterator<Item = S>, S: AsRef<OsStr>>(
    program: &str,
    arguments: I,
) -> std::io::Result<Output> {
    let mut command = Command::new(program);

    command
        .args(arguments)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;

        // Keeps netsh from flashing a console window.
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;

        command.creation_flags(CREATE_NO_WINDOW);
    }

    tracing::debug!(program = %program, "Running system command");
    command.spawn()?.wait_with_output()
}
