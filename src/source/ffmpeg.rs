use std::{
    path::Path,
    process::{Command, Stdio},
};

use anyhow::Context as _;

use super::video::VideoSampler;

/// [`VideoSampler`] that shells out to the system `ffprobe`/`ffmpeg` binaries.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegSampler;

impl FfmpegSampler {
    pub fn new() -> Self {
        Self
    }
}

fn tool_on_path(name: &str) -> bool {
    Command::new(name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn is_ffmpeg_on_path() -> bool {
    tool_on_path("ffmpeg")
}

pub fn is_ffprobe_on_path() -> bool {
    tool_on_path("ffprobe")
}

impl VideoSampler for FfmpegSampler {
    fn duration_secs(&self, video: &Path) -> anyhow::Result<f64> {
        #[derive(serde::Deserialize)]
        struct ProbeStream {
            codec_type: Option<String>,
            duration: Option<String>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeFormat {
            duration: Option<String>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeOut {
            #[serde(default)]
            streams: Vec<ProbeStream>,
            format: Option<ProbeFormat>,
        }

        let out = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "-show_format",
            ])
            .arg(video)
            .output()
            .context("failed to run ffprobe (is it installed and on PATH?)")?;
        anyhow::ensure!(
            out.status.success(),
            "ffprobe failed for '{}': {}",
            video.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        );

        let parsed: ProbeOut =
            serde_json::from_slice(&out.stdout).context("ffprobe json parse failed")?;
        anyhow::ensure!(
            parsed
                .streams
                .iter()
                .any(|s| s.codec_type.as_deref() == Some("video")),
            "no video stream found in '{}'",
            video.display()
        );

        let parse = |s: &Option<String>| s.as_deref().and_then(|d| d.parse::<f64>().ok());
        let duration = parsed
            .format
            .as_ref()
            .and_then(|f| parse(&f.duration))
            .or_else(|| {
                parsed
                    .streams
                    .iter()
                    .filter(|s| s.codec_type.as_deref() == Some("video"))
                    .find_map(|s| parse(&s.duration))
            })
            .unwrap_or(0.0);
        Ok(duration)
    }

    fn sample(&self, video: &Path, at_secs: f64) -> anyhow::Result<Vec<u8>> {
        let out = Command::new("ffmpeg")
            .args(["-v", "error", "-ss", &format!("{at_secs:.9}")])
            .arg("-i")
            .arg(video)
            .args([
                "-frames:v",
                "1",
                "-f",
                "image2pipe",
                "-c:v",
                "png",
                "pipe:1",
            ])
            .stdin(Stdio::null())
            .output()
            .context("failed to run ffmpeg for frame extraction")?;
        anyhow::ensure!(
            out.status.success(),
            "ffmpeg frame extraction at {at_secs:.3}s failed for '{}': {}",
            video.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        );
        anyhow::ensure!(
            !out.stdout.is_empty(),
            "ffmpeg returned no frame at {at_secs:.3}s for '{}'",
            video.display()
        );
        Ok(out.stdout)
    }
}
