/// One host-owned block of audio, viewed as per-channel sample slices.
///
/// The host processes in place: the first `active_inputs` channels carry input audio
/// that is transformed where it sits, and any channels past that are outputs with no
/// matching input. Nothing here allocates or outlives the processing call.
pub struct AudioBlock<'a, 'b> {
    channels: &'a mut [&'b mut [f32]],
    active_inputs: usize,
}

impl<'a, 'b> AudioBlock<'a, 'b> {
    pub fn new(channels: &'a mut [&'b mut [f32]], active_inputs: usize) -> Self {
        Self {
            channels,
            active_inputs,
        }
    }

    /// Total output channels in the block
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Block size. All channels share it, so the first one decides.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.channels.first().map_or(0, |c| c.len())
    }

    /// Input channels that actually exist in this block
    #[inline]
    pub fn active_input_channels(&self) -> usize {
        self.active_inputs.min(self.channels.len())
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Channels carrying input audio
    pub fn active_channels_mut(&mut self) -> &mut [&'b mut [f32]] {
        let active = self.active_input_channels();
        &mut self.channels[..active]
    }

    /// Output channels with no matching input get silence instead of whatever the host
    /// left in them
    pub fn clear_unused_outputs(&mut self) {
        let active = self.active_input_channels();
        for channel in self.channels[active..].iter_mut() {
            channel.fill(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_inputs_are_capped_by_channel_count() {
        let mut left = [1.0f32; 4];
        let mut right = [1.0f32; 4];
        let mut channels = [&mut left[..], &mut right[..]];

        let block = AudioBlock::new(&mut channels, 8);
        assert_eq!(block.num_channels(), 2);
        assert_eq!(block.num_samples(), 4);
        assert_eq!(block.active_input_channels(), 2);
    }

    #[test]
    fn test_clear_unused_outputs_keeps_inputs() {
        let mut left = [0.5f32; 3];
        let mut right = [0.7f32; 3];
        let mut channels = [&mut left[..], &mut right[..]];

        let mut block = AudioBlock::new(&mut channels, 1);
        block.clear_unused_outputs();
        assert_eq!(block.channel(0), &[0.5, 0.5, 0.5]);
        assert_eq!(block.channel(1), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_block() {
        let mut channels: [&mut [f32]; 0] = [];
        let mut block = AudioBlock::new(&mut channels, 2);
        assert_eq!(block.num_samples(), 0);
        assert_eq!(block.active_input_channels(), 0);
        assert!(block.active_channels_mut().is_empty());
        block.clear_unused_outputs();
    }
}
