use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::command::{FindOptions, build_args};
use crate::config::ToolConfig;
use crate::error::{CFinderError, Result};
use crate::results::{self, CFinderResults};
use crate::runner::{ProcessRunner, ToolRunner};

/// A configured CFinder installation.
pub struct CFinder<R = ProcessRunner> {
    config: ToolConfig,
    runner: R,
}

impl CFinder<ProcessRunner> {
    pub fn new(config: ToolConfig) -> Self {
        Self::with_runner(config, ProcessRunner)
    }

    /// Reads the tool location from the environment, see [`ToolConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ToolConfig::from_env()?))
    }
}

impl<R: ToolRunner> CFinder<R> {
    pub fn with_runner(config: ToolConfig, runner: R) -> Self {
        CFinder { config, runner }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs CFinder on the edge list at `input` and loads what it wrote.
    /// With `delete_output`, the output tree is removed once everything has
    /// been parsed.
    pub fn find(
        &self,
        input: &Path,
        opts: &FindOptions,
        delete_output: bool,
    ) -> Result<CFinderResults> {
        let args = build_args(&self.config, input, opts)?;
        let output = opts.output_dir(&self.config);

        self.runner.run(&self.config.executable, &args)?;
        let results = results::load(&output, opts.directed)?;

        if delete_output {
            match fs::remove_dir_all(&output) {
                Ok(()) => info!(path = %output.display(), "removed CFinder output"),
                Err(e) => {
                    warn!(path = %output.display(), error = %e, "could not remove CFinder output");
                    return Err(CFinderError::io(&output, e));
                }
            }
        }
        Ok(results)
    }

    /// Parses an existing output directory.
    pub fn load(&self, output: &Path, directed: bool) -> Result<CFinderResults> {
        results::load(output, directed)
    }
}
