// Duration measurement
//
// Tag parsing never touches the audio stream, so track length comes from a
// separate probe that demuxes the file. The probe is a trait so importing
// can be tested without decoding real audio.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;

/// Measures the playable duration of an audio file, in seconds.
///
/// Callers treat failure as "duration unknown" and fall back to 0; a probe
/// error never fails an import.
pub trait DurationProbe: Send + Sync {
    fn measure(&self, path: &Path) -> Result<f64>;
}

/// Probes duration by demuxing the file with symphonia.
pub struct SymphoniaProbe;

impl DurationProbe for SymphoniaProbe {
    fn measure(&self, path: &Path) -> Result<f64> {
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe().format(
            &hint,
            mss,
            &Default::default(),
            &Default::default(),
        )?;

        let track = probed
            .format
            .default_track()
            .ok_or_else(|| anyhow!("no default track in {}", path.display()))?;

        let n_frames = track
            .codec_params
            .n_frames
            .ok_or_else(|| anyhow!("unknown frame count in {}", path.display()))?;
        let time_base = track
            .codec_params
            .time_base
            .unwrap_or_else(|| TimeBase::new(1, 1));

        let time = time_base.calc_time(n_frames);
        Ok(time.seconds as f64 + time.frac)
    }
}

/// Runs an inner probe on a worker thread and gives up after a deadline.
///
/// A file that hangs the demuxer must not hang a whole batch import; the
/// abandoned worker finishes (or not) on its own.
pub struct TimeoutProbe<P> {
    inner: Arc<P>,
    timeout: Duration,
}

impl<P> TimeoutProbe<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        TimeoutProbe {
            inner: Arc::new(inner),
            timeout,
        }
    }
}

impl<P: DurationProbe + 'static> DurationProbe for TimeoutProbe<P> {
    fn measure(&self, path: &Path) -> Result<f64> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let path: PathBuf = path.to_path_buf();

        thread::spawn(move || {
            let _ = tx.send(inner.measure(&path));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(_) => Err(anyhow!(
                "duration probe did not finish within {:?}",
                self.timeout
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(f64);

    impl DurationProbe for FixedProbe {
        fn measure(&self, _path: &Path) -> Result<f64> {
            Ok(self.0)
        }
    }

    struct StalledProbe;

    impl DurationProbe for StalledProbe {
        fn measure(&self, _path: &Path) -> Result<f64> {
            thread::sleep(Duration::from_secs(60));
            Ok(0.0)
        }
    }

    #[test]
    fn timeout_passes_through_a_fast_probe() {
        let probe = TimeoutProbe::new(FixedProbe(184.5), Duration::from_secs(5));
        let result = probe.measure(Path::new("whatever.mp3")).unwrap();
        assert!((result - 184.5).abs() < f64::EPSILON);
    }

    #[test]
    fn timeout_abandons_a_stalled_probe() {
        let probe = TimeoutProbe::new(StalledProbe, Duration::from_millis(50));
        assert!(probe.measure(Path::new("whatever.mp3")).is_err());
    }

    #[test]
    fn symphonia_probe_rejects_garbage() {
        let dir = std::env::temp_dir().join(format!("tonearm-probe-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("garbage.mp3");
        std::fs::write(&path, b"this is not audio data at all").unwrap();

        assert!(SymphoniaProbe.measure(&path).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
