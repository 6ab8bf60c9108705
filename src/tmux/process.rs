//! Child-process helpers shared by the tmux driver and sudo verification.

use crate::error::DriverError;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Structured process output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Spawn and wait for a process, optionally piping stdin.
///
/// There is no timeout: a hung child blocks the caller until it exits.
pub async fn run_process(
    program: &str,
    args: &[String],
    stdin: Option<&[u8]>,
) -> Result<ExecOutput, DriverError> {
    let mut cmd = Command::new(program);
    cmd.kill_on_drop(true);
    cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
    if stdin.is_some() {
        cmd.stdin(Stdio::piped());
    } else {
        cmd.stdin(Stdio::null());
    }

    let mut child = cmd
        .spawn()
        .map_err(|e| DriverError::Spawn(format!("{program}: {e}")))?;

    if let Some(input) = stdin {
        if let Some(mut child_stdin) = child.stdin.take() {
            // A child that exits without reading stdin is judged by its exit
            // status, not by the broken pipe.
            if let Err(e) = child_stdin.write_all(input).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(DriverError::Spawn(format!("{program}: {e}")));
                }
            }
            drop(child_stdin);
        }
    }

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| DriverError::Spawn(format!("{program}: {e}")))?;

    Ok(ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Convert non-zero exit status into a contextual driver error.
pub fn ensure_success(output: ExecOutput, context: String) -> Result<ExecOutput, DriverError> {
    if output.exit_code == 0 {
        return Ok(output);
    }

    let details = if output.stderr.trim().is_empty() {
        output.stdout.trim().to_string()
    } else {
        output.stderr.trim().to_string()
    };

    Err(DriverError::Failed {
        context,
        status: output.exit_code,
        output: details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(exit_code: i32, stdout: &str, stderr: &str) -> ExecOutput {
        ExecOutput {
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn ensure_success_passes_zero_exit_through() {
        let out = ensure_success(output(0, "ok\n", ""), "ctx".into()).expect("success");
        assert_eq!(out.stdout, "ok\n");
    }

    #[test]
    fn ensure_success_prefers_stderr_details() {
        let err = ensure_success(output(1, "noise", "no server running\n"), "ctx".into())
            .expect_err("non-zero exit");
        match err {
            DriverError::Failed {
                context,
                status,
                output,
            } => {
                assert_eq!(context, "ctx");
                assert_eq!(status, 1);
                assert_eq!(output, "no server running");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn ensure_success_falls_back_to_stdout() {
        let err = ensure_success(output(2, "bad target\n", "  "), "ctx".into())
            .expect_err("non-zero exit");
        assert!(err.to_string().contains("bad target"), "got: {err}");
    }

    #[tokio::test]
    async fn run_process_reports_missing_binary_as_spawn_error() {
        let err = run_process("tmugs-definitely-missing-binary", &[], None)
            .await
            .expect_err("missing binary");
        assert!(matches!(err, DriverError::Spawn(_)), "got: {err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn run_process_pipes_stdin_to_child() {
        let out = run_process("cat", &[], Some(b"hello\n"))
            .await
            .expect("cat should run");
        assert_eq!(out.exit_code, 0);
        assert_eq!(out.stdout, "hello\n");
    }
}
