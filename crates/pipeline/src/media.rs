//! Media conversion via ffmpeg
//!
//! Browsers upload whatever container MediaRecorder produced (webm/opus,
//! ogg, mp4). The transcription service wants 16 kHz mono WAV, so the
//! converter shells out to ffmpeg: bytes in, bytes out, scoped temp files
//! in between.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use ai_interviewer_core::{ConversionError, MediaConverter};

/// Converter configuration
#[derive(Debug, Clone)]
pub struct FfmpegConfig {
    /// ffmpeg binary; resolved via PATH when not absolute
    pub ffmpeg_path: String,
    /// Canonical waveform sample rate
    pub sample_rate: u32,
    /// Subprocess timeout in milliseconds
    pub timeout_ms: u64,
    /// Scratch directory for temp files; system temp when unset
    pub work_dir: Option<PathBuf>,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            sample_rate: 16_000,
            timeout_ms: 30_000,
            work_dir: None,
        }
    }
}

/// ffmpeg-backed media converter
pub struct FfmpegConverter {
    config: FfmpegConfig,
}

impl FfmpegConverter {
    pub fn new(config: FfmpegConfig) -> Self {
        Self { config }
    }

    fn work_dir(&self) -> PathBuf {
        self.config
            .work_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

#[async_trait]
impl MediaConverter for FfmpegConverter {
    async fn to_canonical_wav(
        &self,
        input: &[u8],
        format_hint: Option<&str>,
    ) -> Result<Vec<u8>, ConversionError> {
        if input.is_empty() {
            return Err(ConversionError::UnsupportedFormat(
                "empty audio upload".to_string(),
            ));
        }

        let dir = self.work_dir();
        let extension = format_hint.unwrap_or("webm").trim_start_matches('.');
        let suffix = format!(".{extension}");

        // Both temp files are RAII guards: dropped (and unlinked) on every
        // exit path out of this function.
        let input_file = tempfile::Builder::new()
            .prefix("upload_")
            .suffix(&suffix)
            .tempfile_in(&dir)?;
        tokio::fs::write(input_file.path(), input).await?;

        let output_file = tempfile::Builder::new()
            .prefix("canonical_")
            .suffix(".wav")
            .tempfile_in(&dir)?;

        let mut cmd = Command::new(&self.config.ffmpeg_path);
        cmd.arg("-y")
            .arg("-i")
            .arg(input_file.path())
            .arg("-ar")
            .arg(self.config.sample_rate.to_string())
            .arg("-ac")
            .arg("1")
            .arg("-f")
            .arg("wav")
            .arg(output_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let timeout = Duration::from_millis(self.config.timeout_ms);
        let output = match tokio::time::timeout(timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ConversionError::EngineUnavailable(format!(
                    "failed to run {}: {e}",
                    self.config.ffmpeg_path
                )));
            }
            Err(_) => return Err(ConversionError::Timeout(self.config.timeout_ms)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                exit_code = ?output.status.code(),
                "ffmpeg could not decode uploaded audio"
            );
            return Err(ConversionError::CorruptStream(stderr_excerpt(&stderr)));
        }

        let wav = tokio::fs::read(output_file.path()).await?;
        tracing::debug!(
            input_bytes = input.len(),
            wav_bytes = wav.len(),
            "converted upload to canonical wav"
        );
        Ok(wav)
    }
}

/// Last non-empty stderr line, which is where ffmpeg puts the actual reason.
fn stderr_excerpt(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("no diagnostic output")
        .chars()
        .take(300)
        .collect()
}
