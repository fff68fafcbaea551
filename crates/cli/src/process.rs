// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking tool invocation with an optional time limit.

use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::CheckFailure;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured output of a finished tool.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, or None if the process was killed by a signal.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// Errors from running an external tool.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },

    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl From<ProcessError> for CheckFailure {
    fn from(err: ProcessError) -> Self {
        CheckFailure::new(err.to_string())
    }
}

/// Run a command to completion, capturing stdout and stderr.
///
/// If `timeout` is None, waits indefinitely. On expiry the child is killed
/// and `ProcessError::TimedOut` is returned.
pub fn run(mut cmd: Command, timeout: Option<Duration>) -> Result<ToolOutput, ProcessError> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(
        "running command: {} {:?}",
        program,
        cmd.get_args().collect::<Vec<_>>()
    );

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
        program: program.clone(),
        source,
    })?;

    // Drain pipes on their own threads so a chatty tool cannot block on a full pipe.
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = match timeout {
        Some(limit) => {
            let start = Instant::now();
            loop {
                match child.try_wait() {
                    Ok(Some(status)) => break status,
                    Ok(None) if start.elapsed() > limit => {
                        child.kill().ok();
                        child.wait().ok();
                        return Err(ProcessError::TimedOut {
                            program,
                            timeout: limit,
                        });
                    }
                    Ok(None) => thread::sleep(POLL_INTERVAL),
                    Err(source) => return Err(ProcessError::Wait { program, source }),
                }
            }
        }
        None => child
            .wait()
            .map_err(|source| ProcessError::Wait {
                program: program.clone(),
                source,
            })?,
    };

    let output = ToolOutput {
        status,
        stdout: collect(stdout),
        stderr: collect(stderr),
    };

    if output.success() {
        tracing::debug!("{} succeeded", program);
    } else {
        tracing::debug!(
            "{} failed ({:?}): {}{}",
            program,
            output.code(),
            output.stdout,
            output.stderr
        );
    }

    Ok(output)
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).ok();
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
