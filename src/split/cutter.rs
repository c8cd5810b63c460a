//! External audio cutting tools.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::SplitConfig;

/// Errors from one invocation of a cutting tool.
#[derive(Debug, thiserror::Error)]
pub enum CutError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Extracts `[start, end]` of an audio file into a new file.
///
/// One call per clip, blocking, no retry.
pub trait AudioCutter {
    /// Name used in log messages.
    fn name(&self) -> &str;

    fn cut(&self, input: &Path, start: f64, end: f64, output: &Path) -> Result<(), CutError>;
}

/// Cuts with `ffmpeg` using stream copy, so no re-encoding takes place.
#[derive(Debug, Clone)]
pub struct FfmpegCutter {
    program: String,
    loglevel: String,
}

impl FfmpegCutter {
    pub fn new(program: impl Into<String>, loglevel: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            loglevel: loglevel.into(),
        }
    }

    pub fn from_config(config: &SplitConfig) -> Self {
        Self::new(&config.ffmpeg, &config.loglevel)
    }

    /// Arguments passed to ffmpeg for one clip.
    pub fn args(&self, input: &Path, start: f64, end: f64, output: &Path) -> Vec<OsString> {
        vec![
            "-nostdin".into(),
            "-y".into(),
            "-loglevel".into(),
            self.loglevel.clone().into(),
            "-i".into(),
            input.as_os_str().to_owned(),
            "-ss".into(),
            start.to_string().into(),
            "-to".into(),
            end.to_string().into(),
            "-c".into(),
            "copy".into(),
            output.as_os_str().to_owned(),
        ]
    }
}

impl Default for FfmpegCutter {
    fn default() -> Self {
        Self::from_config(&SplitConfig::default())
    }
}

impl AudioCutter for FfmpegCutter {
    fn name(&self) -> &str {
        &self.program
    }

    fn cut(&self, input: &Path, start: f64, end: f64, output: &Path) -> Result<(), CutError> {
        let result = Command::new(&self.program)
            .args(self.args(input, start, end, output))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CutError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(CutError::Failed {
                program: self.program.clone(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
