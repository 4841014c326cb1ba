use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ToolConfig;
use crate::error::{CFinderError, Result};

/// Options for one CFinder run. `-W` is the upper and `-w` the lower link
/// weight threshold; `-I` takes its threshold from the lower one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindOptions {
    /// `-o`. Defaults to `<tool_dir>/output`.
    pub output: Option<PathBuf>,
    /// `-W`
    pub upper_weight: Option<f64>,
    /// `-w`
    pub lower_weight: Option<f64>,
    /// `-d`: digits used when naming the thresholded output directory.
    pub digits: Option<u32>,
    /// `-t`: maximal clique search time per node.
    pub time_max: Option<u64>,
    /// `-D`
    pub directed: bool,
    /// `-U`, also the default when neither mode is requested.
    pub undirected: bool,
    /// `-I`
    pub intensity: bool,
    /// `-k`
    pub k: Option<u32>,
}

impl FindOptions {
    pub fn output_dir(&self, config: &ToolConfig) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| config.default_output())
    }

    pub fn validate(&self) -> Result<()> {
        if self.directed && self.undirected {
            return Err(CFinderError::Configuration(
                "CFinder cannot search in directed (-D) and undirected (-U) mode at the same time"
                    .into(),
            ));
        }
        if self.intensity && self.lower_weight.is_none() {
            return Err(CFinderError::Configuration(
                "the intensity method (-I) needs a lower link weight threshold (-w)".into(),
            ));
        }
        Ok(())
    }
}

fn push_opt(args: &mut Vec<String>, flag: &str, value: Option<impl ToString>) {
    if let Some(value) = value {
        args.push(flag.to_string());
        args.push(value.to_string());
    }
}

/// Argument list (without the executable) for running CFinder on `input`.
pub fn build_args(config: &ToolConfig, input: &Path, opts: &FindOptions) -> Result<Vec<String>> {
    opts.validate()?;

    let mut args = vec![
        "-l".to_string(),
        config.licence.display().to_string(),
        "-i".to_string(),
        input.display().to_string(),
        "-o".to_string(),
        opts.output_dir(config).display().to_string(),
    ];
    push_opt(&mut args, "-W", opts.upper_weight);
    push_opt(&mut args, "-w", opts.lower_weight);
    push_opt(&mut args, "-d", opts.digits);
    push_opt(&mut args, "-t", opts.time_max);
    push_opt(&mut args, "-k", opts.k);
    if opts.intensity {
        args.push("-I".to_string());
    }
    args.push(if opts.directed { "-D" } else { "-U" }.to_string());
    Ok(args)
}
