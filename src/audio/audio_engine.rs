use crate::audio::parameter_store::AtomicParameter;
use crate::buffer::AudioBlock;
use nih_plug::prelude::*;

/// How the engine turns the stored decibel value into per-sample gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GainPolicy {
    /// Read the parameter once per block and apply that gain to every sample.
    /// Nothing carries over between blocks, so a change between blocks is a step.
    #[default]
    PerBlock,
    /// Opt-in extension: interpolate linearly from the previous block's gain to the
    /// current one across the block, landing on the target at the last sample.
    Ramped,
}

/// Real-time gain transform for a gain plugin.
/// Never locks, allocates or logs, so it is safe to call from the audio callback.
pub struct AudioEngine {
    policy: GainPolicy,
    // Linear gain applied at the end of the previous block, only tracked when ramping
    last_gain: Option<f32>,
}

impl AudioEngine {
    pub fn new(policy: GainPolicy) -> Self {
        Self {
            policy,
            last_gain: None,
        }
    }

    pub fn policy(&self) -> GainPolicy {
        self.policy
    }

    /// Forget the remembered gain so the next block starts at its target
    pub fn reset(&mut self) {
        self.last_gain = None;
    }

    /// Apply the current gain to every active channel of `block` in place, and silence
    /// output channels that have no input behind them.
    pub fn process(&mut self, block: &mut AudioBlock, gain: &AtomicParameter) {
        block.clear_unused_outputs();

        // One read per block. Every channel sees the same value even if the control
        // path publishes a new one halfway through.
        let target = util::db_to_gain(gain.get());

        match self.policy {
            GainPolicy::PerBlock => {
                for channel in block.active_channels_mut().iter_mut() {
                    apply_gain(channel, target);
                }
            }
            GainPolicy::Ramped => {
                let start = self.last_gain.unwrap_or(target);
                for channel in block.active_channels_mut().iter_mut() {
                    apply_gain_ramp(channel, start, target);
                }
                self.last_gain = Some(target);
            }
        }
    }
}

/// Multiply every sample by a fixed linear gain
#[inline]
pub fn apply_gain(samples: &mut [f32], gain: f32) {
    for sample in samples.iter_mut() {
        *sample *= gain;
    }
}

/// Multiply by a gain moving linearly from `start` towards `end`, reaching `end` on
/// the last sample
#[inline]
pub fn apply_gain_ramp(samples: &mut [f32], start: f32, end: f32) {
    if start == end {
        apply_gain(samples, end);
        return;
    }

    let step = (end - start) / samples.len() as f32;
    for (i, sample) in samples.iter_mut().enumerate() {
        *sample *= start + step * (i + 1) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::constants::GAIN_DESCRIPTOR;

    fn assert_close(actual: f32, expected: f32) {
        let tolerance = 1e-6 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    fn process_mono(engine: &mut AudioEngine, samples: &mut [f32], db: f32) {
        let gain = AtomicParameter::declare(GAIN_DESCRIPTOR);
        gain.set(db);
        let mut channels = [samples];
        engine.process(&mut AudioBlock::new(&mut channels, 1), &gain);
    }

    #[test]
    fn test_gain_matches_decibel_formula() {
        let input = [1.0f32, -0.25, 0.5, 0.0, 0.9999, -1.0];
        for db in [-48.0f32, -30.0, -15.0, -6.0, -0.5, 0.0] {
            let mut samples = input;
            process_mono(&mut AudioEngine::new(GainPolicy::PerBlock), &mut samples, db);

            let linear = 10f32.powf(db / 20.0);
            for (out, x) in samples.iter().zip(input) {
                assert_close(*out, x * linear);
            }
        }
    }

    #[test]
    fn test_zero_db_is_identity() {
        let input = [0.3f32, -0.7, 1.0, -1.0];
        let mut samples = input;
        process_mono(&mut AudioEngine::new(GainPolicy::PerBlock), &mut samples, 0.0);
        for (out, x) in samples.iter().zip(input) {
            assert_close(*out, x);
        }
    }

    #[test]
    fn test_silence_stays_silent() {
        for db in [-48.0, -15.0, 0.0] {
            let mut samples = [0.0f32; 64];
            process_mono(&mut AudioEngine::new(GainPolicy::PerBlock), &mut samples, db);
            assert!(samples.iter().all(|&s| s == 0.0));
        }
    }

    #[test]
    fn test_full_attenuation() {
        let mut samples = [1.0f32, -1.0, 0.5];
        process_mono(&mut AudioEngine::new(GainPolicy::PerBlock), &mut samples, -48.0);

        assert!((samples[0] - 0.003981).abs() < 1e-6);
        assert!((samples[1] + 0.003981).abs() < 1e-6);
        assert!((samples[2] - 0.001991).abs() < 1e-6);
    }

    #[test]
    fn test_missing_input_channel_is_silenced() {
        let gain = AtomicParameter::declare(GAIN_DESCRIPTOR);
        gain.set(0.0);

        let mut input = [0.5f32, 0.25, -0.5];
        let mut orphan = [0.8f32, 0.8, 0.8];
        let mut channels = [&mut input[..], &mut orphan[..]];
        AudioEngine::new(GainPolicy::PerBlock)
            .process(&mut AudioBlock::new(&mut channels, 1), &gain);

        assert_eq!(input, [0.5, 0.25, -0.5]);
        assert_eq!(orphan, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_every_active_channel_gets_the_same_gain() {
        let gain = AtomicParameter::declare(GAIN_DESCRIPTOR);
        gain.set(-6.0);
        let linear = 10f32.powf(-6.0 / 20.0);

        let mut left = [1.0f32; 8];
        let mut right = [-0.5f32; 8];
        let mut channels = [&mut left[..], &mut right[..]];
        AudioEngine::new(GainPolicy::PerBlock)
            .process(&mut AudioBlock::new(&mut channels, 2), &gain);

        left.iter().for_each(|&s| assert_close(s, linear));
        right.iter().for_each(|&s| assert_close(s, -0.5 * linear));
    }

    #[test]
    fn test_per_block_keeps_no_state() {
        let mut engine = AudioEngine::new(GainPolicy::PerBlock);

        let mut first = [1.0f32; 4];
        process_mono(&mut engine, &mut first, 0.0);
        let mut second = [1.0f32; 4];
        process_mono(&mut engine, &mut second, -48.0);

        let linear = 10f32.powf(-48.0 / 20.0);
        second.iter().for_each(|&s| assert_close(s, linear));
    }

    #[test]
    fn test_ramp_starts_at_target_after_reset() {
        let mut engine = AudioEngine::new(GainPolicy::Ramped);
        assert_eq!(engine.policy(), GainPolicy::Ramped);
        let mut samples = [1.0f32; 4];
        process_mono(&mut engine, &mut samples, -6.0);

        let linear = 10f32.powf(-6.0 / 20.0);
        samples.iter().for_each(|&s| assert_close(s, linear));
    }

    #[test]
    fn test_ramp_moves_from_previous_gain_to_target() {
        let mut engine = AudioEngine::new(GainPolicy::Ramped);

        let mut first = [1.0f32; 4];
        process_mono(&mut engine, &mut first, 0.0);

        let mut second = [1.0f32; 4];
        process_mono(&mut engine, &mut second, -48.0);

        let target = 10f32.powf(-48.0 / 20.0);
        let step = (target - 1.0) / 4.0;
        for (i, &s) in second.iter().enumerate() {
            assert_close(s, 1.0 + step * (i + 1) as f32);
        }
        assert_close(second[3], target);
        assert!(second.windows(2).all(|w| w[1] < w[0]));

        engine.reset();
        let mut third = [1.0f32; 4];
        process_mono(&mut engine, &mut third, 0.0);
        third.iter().for_each(|&s| assert_close(s, 1.0));
    }

    #[test]
    fn test_ramp_on_empty_block() {
        let mut samples: [f32; 0] = [];
        apply_gain_ramp(&mut samples, 1.0, 0.5);
    }
}
