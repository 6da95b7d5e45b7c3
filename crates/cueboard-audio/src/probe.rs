// crates/cueboard-audio/src/probe.rs
//
// One-pass metadata probe: decode the whole file once with rodio's decoder
// (same codec path playback will use, so a file that probes is a file that
// plays), counting samples for the exact duration and folding block peaks
// for the crop-track waveform.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use crossbeam_channel::Sender;
use rodio::{Decoder, Source};
use uuid::Uuid;

use cueboard_core::ProbeResult;

/// Number of waveform buckets reported to the UI. The crop track is a few
/// hundred pixels wide; more resolution than this never renders.
pub const PEAK_BUCKETS: usize = 512;

/// Samples folded into one raw block before downsampling. Keeps the interim
/// peak vector small (a few thousand entries) even for long files.
const BLOCK_FRAMES: usize = 2048;

/// Probe `path` and send the outcome for `id` over `tx`.
///
/// Soft-fails: every error crosses the channel as `ProbeResult::Failed` so
/// the UI can show it next to the file — nothing here panics or retries.
pub fn probe_source(path: &Path, id: Uuid, tx: &Sender<ProbeResult>) {
    match decode_metadata(path) {
        Ok((seconds, peaks)) => {
            log::debug!("[probe] {:.2}s ← {}", seconds, path.display());
            let _ = tx.send(ProbeResult::Ready { id, seconds, peaks });
        }
        Err(e) => {
            log::warn!("[probe] failed for {}: {e:#}", path.display());
            let _ = tx.send(ProbeResult::Failed { id, msg: format!("{e:#}") });
        }
    }
}

/// Decode `path` fully, returning (duration seconds, normalized peaks).
fn decode_metadata(path: &Path) -> Result<(f64, Vec<f32>)> {
    let file = File::open(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    let decoder = Decoder::new(BufReader::new(file))
        .with_context(|| format!("cannot decode {}", path.display()))?;

    let channels = (decoder.channels() as usize).max(1);
    let rate     = decoder.sample_rate() as f64;
    if rate <= 0.0 {
        bail!("decoder reported zero sample rate");
    }

    let block_len = BLOCK_FRAMES * channels;
    let mut blocks: Vec<f32> = Vec::new();
    let mut block_peak = 0.0f32;
    let mut in_block   = 0usize;
    let mut total      = 0u64;

    for sample in decoder {
        let amp = sample.abs();
        if amp > block_peak {
            block_peak = amp;
        }
        in_block += 1;
        total    += 1;
        if in_block == block_len {
            blocks.push(block_peak);
            block_peak = 0.0;
            in_block   = 0;
        }
    }
    if in_block > 0 {
        blocks.push(block_peak);
    }

    if total == 0 {
        bail!("no audio samples decoded");
    }

    let seconds = total as f64 / (rate * channels as f64);
    Ok((seconds, downsample_peaks(&blocks, PEAK_BUCKETS)))
}

/// Max-pool `blocks` down to at most `buckets` entries and normalize so the
/// loudest bucket is 1.0. Quiet recordings still draw a visible waveform.
fn downsample_peaks(blocks: &[f32], buckets: usize) -> Vec<f32> {
    if blocks.is_empty() || buckets == 0 {
        return Vec::new();
    }
    let out_len = buckets.min(blocks.len());
    let mut out = vec![0.0f32; out_len];
    for (i, &peak) in blocks.iter().enumerate() {
        let slot = i * out_len / blocks.len();
        if peak > out[slot] {
            out[slot] = peak;
        }
    }
    let max = out.iter().cloned().fold(0.0f32, f32::max);
    if max > 0.0 {
        for v in &mut out {
            *v /= max;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_peaks() {
        assert!(downsample_peaks(&[], 512).is_empty());
        assert!(downsample_peaks(&[0.5], 0).is_empty());
    }

    #[test]
    fn short_input_keeps_one_bucket_per_block() {
        let peaks = downsample_peaks(&[0.1, 0.2, 0.4], 512);
        assert_eq!(peaks.len(), 3);
    }

    #[test]
    fn long_input_is_capped_at_bucket_count() {
        let blocks = vec![0.25f32; 10_000];
        let peaks = downsample_peaks(&blocks, 512);
        assert_eq!(peaks.len(), 512);
    }

    #[test]
    fn output_is_normalized_to_unit_peak() {
        let peaks = downsample_peaks(&[0.1, 0.5, 0.25], 512);
        let max = peaks.iter().cloned().fold(0.0f32, f32::max);
        assert!((max - 1.0).abs() < 1e-6);
        assert!(peaks.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn pooling_keeps_the_loudest_block_per_slot() {
        // 4 blocks into 2 slots: slots take max(0.1, 0.9) and max(0.2, 0.3).
        let peaks = downsample_peaks(&[0.1, 0.9, 0.2, 0.3], 2);
        assert_eq!(peaks.len(), 2);
        assert!((peaks[0] - 1.0).abs() < 1e-6);          // 0.9 normalized
        assert!((peaks[1] - 0.3 / 0.9).abs() < 1e-6);
    }

    #[test]
    fn silence_stays_zero_without_dividing() {
        let peaks = downsample_peaks(&[0.0, 0.0], 512);
        assert!(peaks.iter().all(|&p| p == 0.0));
    }
}
