//! Mixer — sums rolled copies of the input into a stereo choir.

use rand::Rng;

use crate::buffer::AudioBuffer;

use super::circular::source_frame;
use super::voice::{VoiceParameters, plan_voices};

/// Per-voice gain divisor: `max(1, num_voices / 2)` with integer division.
///
/// One value is shared by both channels, so with an odd voice count the
/// left side (which gets the extra voice) ends up slightly hotter.
pub fn gain_divisor(num_voices: usize) -> f32 {
    (num_voices / 2).max(1) as f32
}

/// Interleaved stereo accumulator.
#[derive(Debug, Clone)]
pub struct StereoMixer {
    output: AudioBuffer,
}

impl StereoMixer {
    /// A zeroed stereo buffer of `total_frames` frames.
    pub fn new(total_frames: usize, sample_rate: u32) -> Self {
        StereoMixer {
            output: AudioBuffer::silent_stereo(total_frames, sample_rate),
        }
    }

    /// Add a sample into `channel` at `frame`.
    #[inline]
    pub fn add(&mut self, frame: usize, channel: usize, sample: f32) {
        self.output.samples[frame * 2 + channel] += sample;
    }

    /// Accumulate one voice: the whole input rolled by the voice's total
    /// offset, read from the matching input channel (or the only one, for
    /// mono), scaled by `1 / gain`.
    pub fn add_voice(&mut self, input: &AudioBuffer, voice: &VoiceParameters, gain: f32) {
        let total_frames = input.total_frames();
        let offset = voice.total_offset();
        let channel = voice.output_channel;

        for frame in 0..total_frames {
            let src = source_frame(frame, offset, total_frames);
            let index = if input.is_stereo() { src * 2 + channel } else { src };
            self.add(frame, channel, input.samples[index] / gain);
        }
    }

    /// Finish mixing and hand back the (unnormalized) stereo buffer.
    pub fn into_buffer(self) -> AudioBuffer {
        self.output
    }
}

/// Mix a precomputed voice plan over `input`.
///
/// The gain divisor is derived from the plan length.
pub fn mix_planned(input: &AudioBuffer, voices: &[VoiceParameters]) -> AudioBuffer {
    let gain = gain_divisor(voices.len());
    let mut mixer = StereoMixer::new(input.total_frames(), input.sample_rate);
    for voice in voices {
        mixer.add_voice(input, voice, gain);
    }
    mixer.into_buffer()
}

/// Layer `num_voices` shifted, randomly delayed copies of `input` into a
/// stereo buffer with the same frame count and sample rate.
///
/// Expects a well-formed buffer and parameters in their documented ranges
/// (see [`crate::params::ChoirParams::validate`]). The result is not
/// normalized.
pub fn mix<R: Rng + ?Sized>(
    input: &AudioBuffer,
    num_voices: usize,
    pitch_step: f64,
    max_delay_seconds: f64,
    rng: &mut R,
) -> AudioBuffer {
    let voices = plan_voices(
        num_voices,
        pitch_step,
        max_delay_seconds,
        input.total_frames(),
        input.sample_rate,
        rng,
    );
    mix_planned(input, &voices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn rng() -> Pcg64 {
        Pcg64::seed_from_u64(0xC401)
    }

    #[test]
    fn gain_divisor_values() {
        assert_eq!(gain_divisor(1), 1.0);
        assert_eq!(gain_divisor(2), 1.0);
        assert_eq!(gain_divisor(3), 1.0);
        assert_eq!(gain_divisor(4), 2.0);
        assert_eq!(gain_divisor(11), 5.0);
        assert_eq!(gain_divisor(12), 6.0);
    }

    #[test]
    fn single_voice_reproduces_input_on_left() {
        let input = AudioBuffer::mono(vec![0.1, 0.2, 0.3, 0.4], 4).unwrap();
        let out = mix(&input, 1, 1.0, 0.0, &mut rng());
        assert_eq!(out.channels, 2);
        assert_eq!(out.total_frames(), 4);
        assert_eq!(out.sample_rate, 4);
        assert_eq!(out.channel(0), vec![0.1, 0.2, 0.3, 0.4]);
        assert_eq!(out.channel(1), vec![0.0; 4]);
    }

    #[test]
    fn two_voices_split_across_channels() {
        let input = AudioBuffer::mono(vec![1.0; 10], 44100).unwrap();
        let out = mix(&input, 2, 12.0, 0.0, &mut rng());
        assert!(out.samples.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn stereo_input_feeds_matching_channel() {
        // left = 0.5 everywhere, right = -0.25 everywhere
        let samples: Vec<f32> = (0..8).flat_map(|_| [0.5, -0.25]).collect();
        let input = AudioBuffer::new(samples, 8000, 2).unwrap();
        let out = mix(&input, 2, 1.0, 0.0, &mut rng());
        assert!(out.channel(0).iter().all(|&s| s == 0.5));
        assert!(out.channel(1).iter().all(|&s| s == -0.25));
    }

    #[test]
    fn voices_are_scaled_by_gain_divisor() {
        let input = AudioBuffer::mono(vec![1.0; 16], 16).unwrap();
        let out = mix(&input, 4, 1.0, 0.0, &mut rng());
        // two voices per side, each divided by 2
        for s in out.samples {
            assert_relative_eq!(s, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn output_frame_count_matches_input() {
        let input = AudioBuffer::mono((0..1000).map(|i| (i as f32 * 0.01).sin()).collect(), 8000)
            .unwrap();
        let out = mix(&input, 7, 5.0, 0.05, &mut rng());
        assert_eq!(out.channels, 2);
        assert_eq!(out.total_frames(), 1000);
        assert_eq!(out.samples.len(), 2000);
    }

    #[test]
    fn planned_offset_rolls_the_clip() {
        let input = AudioBuffer::mono(vec![1.0, 2.0, 3.0, 4.0], 4).unwrap();
        let voice = VoiceParameters {
            index: 0,
            pitch_offset: 0.0,
            frame_shift: -1,
            random_delay: 2,
            output_channel: 0,
        };
        // total offset +1: frame 0 reads the last input frame
        let out = mix_planned(&input, &[voice]);
        assert_eq!(out.channel(0), vec![4.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn negative_shift_reads_ahead() {
        // 6 voices, step 12: offsets [-24, -12, 0, 12, 24, 36]; 100 frames
        // voice 0 shift = floor(-24 * 100 / 1200) = -2
        let input = AudioBuffer::mono((0..100).map(|i| i as f32).collect(), 100).unwrap();
        let mut r = rng();
        let plan = plan_voices(6, 12.0, 0.0, 100, 100, &mut r);
        assert_eq!(plan[0].frame_shift, -2);
        let out = mix_planned(&input, &plan[..1]);
        // single-voice plan → gain 1
        assert_eq!(out.channel(0)[0], 2.0);
        assert_eq!(out.channel(0)[99], 1.0);
    }

    #[test]
    fn same_seed_same_mix() {
        let input = AudioBuffer::mono((0..500).map(|i| (i as f32 * 0.1).cos()).collect(), 1000)
            .unwrap();
        let a = mix(&input, 6, 3.0, 0.2, &mut Pcg64::seed_from_u64(11));
        let b = mix(&input, 6, 3.0, 0.2, &mut Pcg64::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
