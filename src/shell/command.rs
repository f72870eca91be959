//! External process execution.
//!
//! Every collaborator this tool talks to — version probes, git, generation
//! entry points, remediation commands — is a blocking child process whose
//! captured output and exit status are the only things consumed. Launch
//! failures surface as `io::Error` so callers can tell "tool not installed"
//! apart from "tool ran and failed".

use std::io;
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};

/// Result of executing an external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the process succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// First non-empty stderr lines, for compact warning display.
    pub fn stderr_excerpt(&self, max_lines: usize) -> String {
        self.stderr
            .lines()
            .filter(|l| !l.trim().is_empty())
            .take(max_lines)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn run(mut cmd: Command) -> io::Result<CommandResult> {
    let start = Instant::now();
    let output = cmd.output()?;
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a program with explicit arguments, capturing output.
///
/// No shell is involved; the program is resolved through `PATH` by the OS.
pub fn execute(program: &str, args: &[String], cwd: &Path) -> io::Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(cwd);
    run(cmd)
}

/// Execute a command line through the platform shell.
///
/// Used for remediation commands from config, which are free-form strings
/// that may use pipes or shell builtins.
pub fn run_shell(command_line: &str, cwd: &Path) -> io::Result<CommandResult> {
    let mut cmd = if cfg!(windows) {
        let comspec = std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string());
        let mut c = Command::new(comspec);
        c.arg("/C").arg(command_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_line);
        c
    };
    cmd.current_dir(cwd);
    run(cmd)
}

/// Execute a generation entry point script with arguments.
///
/// Batch files need `cmd /C` on Windows; everything else is launched
/// directly and must carry its own execute permission on Unix.
pub fn run_script(script: &Path, args: &[String], cwd: &Path) -> io::Result<CommandResult> {
    let is_batch = script
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("bat") || e.eq_ignore_ascii_case("cmd"));

    let mut cmd = if cfg!(windows) && is_batch {
        let comspec = std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string());
        let mut c = Command::new(comspec);
        c.arg("/C").arg(script);
        c
    } else {
        Command::new(script)
    };
    cmd.args(args).current_dir(cwd);
    run(cmd)
}

/// Open a URL in the default browser.
///
/// Best effort: on platforms with no known opener the caller falls back to
/// printing the URL.
pub fn open_url(url: &str) -> io::Result<()> {
    let mut cmd = if cfg!(windows) {
        let comspec = std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string());
        let mut c = Command::new(comspec);
        // "start" treats the first quoted argument as a window title.
        c.arg("/C").arg("start").arg("").arg(url);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(url);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };

    let status = cmd.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "opener exited with {:?}",
            status.code()
        )))
    }
}
