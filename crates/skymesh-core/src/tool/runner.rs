use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    /// Exit status as reported by the OS, e.g. `exit status: 1`.
    pub status: String,
    /// Stdout followed by stderr.
    pub text: String,
}

/// Starts processes on behalf of the tool wrapper and the installer.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs to completion with stdin closed and both output streams captured.
    async fn output(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput>;

    /// Runs to completion with stdout/stderr passed through to the terminal.
    /// When `stdin` is given it is written to the child and then closed.
    async fn status(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<Vec<u8>>,
    ) -> std::io::Result<CommandOutput>;

    /// Starts the program without waiting for it.
    async fn spawn(&self, program: &str, args: &[String]) -> std::io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn output(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        log::debug!("running {} {:?}", program, args);
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;

        let mut text = String::from_utf8_lossy(&output.stdout).to_string();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            text,
        })
    }

    async fn status(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<Vec<u8>>,
    ) -> std::io::Result<CommandOutput> {
        log::debug!("running {} {:?} with inherited output", program, args);
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if stdin.is_some() {
            cmd.stdin(Stdio::piped());
        }

        let mut child = cmd.spawn()?;
        if let Some(bytes) = stdin {
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(&bytes).await?;
                pipe.shutdown().await?;
            }
        }

        let status = child.wait().await?;
        Ok(CommandOutput {
            success: status.success(),
            status: status.to_string(),
            text: String::new(),
        })
    }

    async fn spawn(&self, program: &str, args: &[String]) -> std::io::Result<()> {
        log::debug!("spawning detached {} {:?}", program, args);
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}
