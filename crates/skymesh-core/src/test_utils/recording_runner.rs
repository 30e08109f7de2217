// src/test_utils/recording_runner.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::tool::{CommandOutput, CommandRunner};

/// How a call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Output,
    Status,
    Spawn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<Vec<u8>>,
}

/// Runner that never starts a process. Every call is recorded and answered
/// from canned responses keyed by the space-joined argument list.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responses: Arc<Mutex<HashMap<String, CommandOutput>>>,
    missing: Arc<Mutex<Vec<String>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `args` with a successful run printing `text`.
    pub fn respond(self, args: &str, text: &str) -> Self {
        self.insert(args, true, text);
        self
    }

    /// Answers `args` with a failed run printing `text`.
    pub fn fail(self, args: &str, text: &str) -> Self {
        self.insert(args, false, text);
        self
    }

    /// Makes every call to `program` fail as if it were not on the PATH.
    pub fn without_program(self, program: &str) -> Self {
        self.missing.lock().unwrap().push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Argument lists of every call to `program`, in order.
    pub fn args_for(&self, program: &str) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|call| call.program == program)
            .map(|call| call.args)
            .collect()
    }

    fn insert(&self, args: &str, success: bool, text: &str) {
        let status = if success { "exit status: 0" } else { "exit status: 1" };
        self.responses.lock().unwrap().insert(
            args.to_string(),
            CommandOutput {
                success,
                status: status.to_string(),
                text: text.to_string(),
            },
        );
    }

    fn record(
        &self,
        kind: CallKind,
        program: &str,
        args: &[String],
        stdin: Option<Vec<u8>>,
    ) -> std::io::Result<CommandOutput> {
        self.calls.lock().unwrap().push(RecordedCall {
            kind,
            program: program.to_string(),
            args: args.to_vec(),
            stdin,
        });

        if self.missing.lock().unwrap().iter().any(|p| p == program) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", program),
            ));
        }

        let key = args.join(" ");
        let canned = self.responses.lock().unwrap().get(&key).cloned();
        Ok(canned.unwrap_or(CommandOutput {
            success: true,
            status: "exit status: 0".to_string(),
            text: String::new(),
        }))
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn output(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        self.record(CallKind::Output, program, args, None)
    }

    async fn status(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<Vec<u8>>,
    ) -> std::io::Result<CommandOutput> {
        self.record(CallKind::Status, program, args, stdin)
    }

    async fn spawn(&self, program: &str, args: &[String]) -> std::io::Result<()> {
        self.record(CallKind::Spawn, program, args, None)?;
        Ok(())
    }
}
