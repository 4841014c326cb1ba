use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{CFinderError, Result};

/// Runs the external tool to completion.
pub trait ToolRunner {
    fn run(&self, executable: &Path, args: &[String]) -> Result<()>;
}

/// Spawns the executable as a child process and waits for it. The tool
/// writes its results to files, so standard streams are inherited.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, executable: &Path, args: &[String]) -> Result<()> {
        info!(executable = %executable.display(), "running CFinder");
        debug!(?args, "CFinder arguments");

        let status = Command::new(executable).args(args).status().map_err(|e| {
            debug!(error = %e, "failed to spawn CFinder");
            CFinderError::ExternalTool {
                code: None,
                args: with_executable(executable, args),
            }
        })?;

        if !status.success() {
            return Err(CFinderError::ExternalTool {
                code: status.code(),
                args: with_executable(executable, args),
            });
        }
        Ok(())
    }
}

fn with_executable(executable: &Path, args: &[String]) -> Vec<String> {
    std::iter::once(executable.display().to_string())
        .chain(args.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_executable_is_an_external_tool_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-cfinder");
        let err = ProcessRunner
            .run(&missing, &["-i".to_string(), "edges".to_string()])
            .unwrap_err();
        match err {
            CFinderError::ExternalTool { code, args } => {
                assert_eq!(code, None);
                assert_eq!(args.len(), 3);
                assert_eq!(args[1], "-i");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_reports_code() {
        let err = ProcessRunner
            .run(Path::new("sh"), &["-c".to_string(), "exit 3".to_string()])
            .unwrap_err();
        assert!(matches!(err, CFinderError::ExternalTool { code: Some(3), .. }));
    }
}
