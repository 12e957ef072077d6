use crate::audio::audio_engine::{AudioEngine, GainPolicy};
use crate::audio::constants::{GAIN_DESCRIPTOR, PLUGIN_NAME, TAIL_LENGTH_SECONDS};
use crate::audio::layout::{BusesLayout, PluginVariant};
use crate::audio::parameter_store::{AtomicParameter, ParameterHandle};
use crate::buffer::AudioBlock;

/// Build-time choices for a processor instance
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessorConfig {
    pub variant: PluginVariant,
    pub policy: GainPolicy,
}

/// The gain unit without any plugin API around it.
///
/// Owns the gain parameter and the engine, remembers the negotiated bus layout, and
/// answers the host's boilerplate questions (programs, state, editor). The plugin
/// shell forwards to this, and tests drive it directly.
pub struct GainProcessor {
    gain: ParameterHandle,
    engine: AudioEngine,
    variant: PluginVariant,
    layout: BusesLayout,
}

impl GainProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            gain: AtomicParameter::declare(GAIN_DESCRIPTOR),
            engine: AudioEngine::new(config.policy),
            variant: config.variant,
            layout: config.variant.default_layout(),
        }
    }

    /// Handle shared with the control surface. Writes through it reach the next block.
    pub fn gain(&self) -> &ParameterHandle {
        &self.gain
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn variant(&self) -> PluginVariant {
        self.variant
    }

    pub fn accepts_midi(&self) -> bool {
        self.variant.accepts_midi()
    }

    pub fn produces_midi(&self) -> bool {
        self.variant.produces_midi()
    }

    pub fn is_midi_effect(&self) -> bool {
        self.variant.is_midi_effect()
    }

    pub fn tail_length_seconds(&self) -> f64 {
        TAIL_LENGTH_SECONDS
    }

    // Bus layout

    pub fn layout(&self) -> BusesLayout {
        self.layout
    }

    pub fn is_layout_supported(&self, layout: &BusesLayout) -> bool {
        self.variant.is_layout_supported(layout)
    }

    /// Take on the layout the host settled on. Refuses, and keeps the previous layout,
    /// if negotiation would have rejected it.
    pub fn prepare(&mut self, layout: BusesLayout) -> bool {
        if !self.is_layout_supported(&layout) {
            return false;
        }

        self.layout = layout;
        self.engine.reset();
        true
    }

    /// Clear any state carried between blocks. Safe on the audio thread.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn active_input_channels(&self) -> usize {
        self.layout.input_channels()
    }

    pub fn total_output_channels(&self) -> usize {
        self.layout.output_channels()
    }

    // Processing

    /// Process one host block in place.
    ///
    /// `channels` holds the output channels, with the input already copied into the
    /// first ones. Side-channel events (notes, MIDI) are drained and ignored.
    pub fn process_block<E>(
        &mut self,
        channels: &mut [&mut [f32]],
        events: impl IntoIterator<Item = E>,
    ) {
        events.into_iter().for_each(drop);

        let mut block = AudioBlock::new(channels, self.active_input_channels());
        self.engine.process(&mut block, &self.gain);
    }

    // Programs. There is exactly one and it cannot be renamed or switched.

    pub fn num_programs(&self) -> usize {
        1
    }

    pub fn current_program(&self) -> usize {
        0
    }

    pub fn set_current_program(&mut self, _index: usize) {}

    pub fn program_name(&self, _index: usize) -> &str {
        ""
    }

    pub fn change_program_name(&mut self, _index: usize, _name: &str) {}

    // State. The parameter value is not persisted, so there is nothing to save or load.

    pub fn get_state(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn set_state(&mut self, _data: &[u8]) {}

    // Editor

    pub fn has_editor(&self) -> bool {
        true
    }
}

impl Default for GainProcessor {
    fn default() -> Self {
        Self::new(ProcessorConfig::default())
    }
}
