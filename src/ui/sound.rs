/// Sound engine: procedural synth cues via rodio.
///
/// All cues are rendered to in-memory WAV buffers at init time.
/// Playback is fire-and-forget (non-blocking) via rodio's Sink.
///
/// Built without the "sound" feature, or with `[sound] enabled = false`,
/// `SoundEngine::new` returns a silent engine.

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use crate::domain::puzzle::PAD_DIGITS;

    const SAMPLE_RATE: u32 = 22050;
    const TAU: f32 = std::f32::consts::PI * 2.0;

    struct Output {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    /// Pre-generated WAV buffers for each cue.
    struct Cues {
        digits: Vec<Arc<Vec<u8>>>,
        solved: Arc<Vec<u8>>,
        mismatch: Arc<Vec<u8>>,
        friendship: Arc<Vec<u8>>,
        reset: Arc<Vec<u8>>,
        reject: Arc<Vec<u8>>,
        nav: Arc<Vec<u8>>,
    }

    pub struct SoundEngine {
        output: Option<(Output, Cues)>,
    }

    impl SoundEngine {
        pub fn new(enabled: bool) -> Self {
            if !enabled {
                return SoundEngine { output: None };
            }
            let output = match OutputStream::try_default() {
                Ok((stream, handle)) => Output { _stream: stream, handle },
                Err(e) => {
                    tracing::debug!(error = %e, "no audio output, running silent");
                    return SoundEngine { output: None };
                }
            };

            // ── Generate all cue buffers ──
            let cues = Cues {
                digits: PAD_DIGITS.iter()
                    .map(|&d| Arc::new(make_wav(&gen_digit(d))))
                    .collect(),
                solved: Arc::new(make_wav(&gen_solved())),
                mismatch: Arc::new(make_wav(&gen_mismatch())),
                friendship: Arc::new(make_wav(&gen_friendship())),
                reset: Arc::new(make_wav(&gen_reset())),
                reject: Arc::new(make_wav(&gen_blip(160.0, 0.06, 0.2))),
                nav: Arc::new(make_wav(&gen_blip(880.0, 0.02, 0.12))),
            };

            SoundEngine { output: Some((output, cues)) }
        }

        fn play(&self, pick: impl Fn(&Cues) -> Option<&Arc<Vec<u8>>>) {
            let Some((out, cues)) = &self.output else { return };
            let Some(buf) = pick(cues) else { return };
            if let Ok(sink) = Sink::try_new(&out.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }

        pub fn play_digit(&self, value: u8) {
            self.play(|c| {
                PAD_DIGITS.iter().position(|&d| d == value).and_then(|i| c.digits.get(i))
            });
        }
        pub fn play_solved(&self) { self.play(|c| Some(&c.solved)); }
        pub fn play_mismatch(&self) { self.play(|c| Some(&c.mismatch)); }
        pub fn play_friendship(&self) { self.play(|c| Some(&c.friendship)); }
        pub fn play_reset(&self) { self.play(|c| Some(&c.reset)); }
        pub fn play_reject(&self) { self.play(|c| Some(&c.reject)); }
        pub fn play_nav(&self) { self.play(|c| Some(&c.nav)); }
    }

    // ════════════════════════════════════════════════════════════
    //  Cue synthesis (mono f32 samples)
    // ════════════════════════════════════════════════════════════

    /// Simple sine blip at given frequency and duration
    fn gen_blip(freq: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32); // linear fade out
                (t * freq * TAU).sin() * env * volume
            })
            .collect()
    }

    /// Sine notes back to back, each with the given duration and decay.
    fn gen_notes(notes: &[(f32, f32)], harmonics: &[f32], volume: f32) -> Vec<f32> {
        let mut samples = Vec::new();
        for &(freq, dur) in notes {
            let n = (SAMPLE_RATE as f32 * dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32) * 0.6;
                let wave: f32 = harmonics.iter().enumerate()
                    .map(|(h, amp)| (t * freq * (h as f32 + 1.0) * TAU).sin() * amp)
                    .sum();
                samples.push(wave * env * volume);
            }
        }
        samples
    }

    /// Pad key: square-ish blip, pitch rises with the digit (C5 D5 E5 G5...)
    fn gen_digit(value: u8) -> Vec<f32> {
        const SCALE: [f32; 4] = [523.0, 587.0, 659.0, 784.0];
        let idx = (value.saturating_sub(1) as usize).min(SCALE.len() - 1);
        gen_notes(&[(SCALE[idx], 0.07)], &[0.7, 0.0, 0.3], 0.25)
    }

    /// Code cracked: ascending fanfare C5→E5→G5→C6 with a held top note
    fn gen_solved() -> Vec<f32> {
        let mut samples = gen_notes(
            &[(523.0, 0.1), (659.0, 0.1), (784.0, 0.1)],
            &[0.6, 0.3, 0.1],
            0.3,
        );
        let n = (SAMPLE_RATE as f32 * 0.3) as usize;
        for i in 0..n {
            let t = i as f32 / SAMPLE_RATE as f32;
            let env = 1.0 - (i as f32 / n as f32);
            samples.push((t * 1047.0 * TAU).sin() * env * 0.3);
        }
        samples
    }

    /// Wrong code: two falling notes
    fn gen_mismatch() -> Vec<f32> {
        gen_notes(&[(330.0, 0.12), (247.0, 0.2)], &[1.0], 0.3)
    }

    /// Friendship up: bright two-note chime G5, C6
    fn gen_friendship() -> Vec<f32> {
        gen_notes(&[(784.0, 0.08), (1047.0, 0.15)], &[0.7, 0.3], 0.3)
    }

    /// Reset: short descending sweep 600Hz → 200Hz
    fn gen_reset() -> Vec<f32> {
        let duration = 0.15;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 600.0 - t * 400.0;
                let ti = i as f32 / SAMPLE_RATE as f32;
                let env = (1.0 - t).powf(0.6);
                (ti * freq * TAU).sin() * env * 0.25
            })
            .collect()
    }

    // ════════════════════════════════════════════════════════════
    //  In-memory WAV encoding
    // ════════════════════════════════════════════════════════════

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let num_channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
        let block_align = num_channels * bits_per_sample / 8;
        let data_size = samples.len() as u32 * 2; // 16-bit = 2 bytes per sample
        let file_size = 36 + data_size;

        let mut buf = Vec::with_capacity(44 + data_size as usize);

        // RIFF header
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&file_size.to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        // fmt chunk
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
        buf.extend_from_slice(&1u16.to_le_bytes());  // PCM format
        buf.extend_from_slice(&num_channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits_per_sample.to_le_bytes());

        // data chunk
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());

        for &s in samples {
            let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }

        buf
    }

}

// ════════════════════════════════════════════════════════════
//  Public API (silent stand-in without the sound feature)
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new(_enabled: bool) -> Self { SoundEngine }
    pub fn play_digit(&self, _value: u8) {}
    pub fn play_solved(&self) {}
    pub fn play_mismatch(&self) {}
    pub fn play_friendship(&self) {}
    pub fn play_reset(&self) {}
    pub fn play_reject(&self) {}
    pub fn play_nav(&self) {}
}
