// Hands control to the downstream application after authentication

use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::config::AppContext;

/// Ways the downstream handoff can fail
/// Neither is fatal to the orchestrator; both are logged and the process
/// still exits cleanly
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Exited { program: String, status: ExitStatus },
}

/// Launch the downstream program with no arguments and block until it
/// finishes, mapping its exit status to an orchestrator-level outcome
pub fn downstream(ctx: &AppContext) -> Result<(), LaunchError> {
    let program = ctx.downstream.display().to_string();
    tracing::info!(%program, "launching downstream application");

    let status = Command::new(&ctx.downstream)
        .status()
        .map_err(|source| LaunchError::Spawn {
            program: program.clone(),
            source,
        })?;

    if status.success() {
        tracing::info!(%program, "downstream application finished");
        Ok(())
    } else {
        Err(LaunchError::Exited { program, status })
    }
}
