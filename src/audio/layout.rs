//! Bus layouts and the negotiation rules the host asks us about.

use nih_plug::prelude::AudioIOLayout;
use std::num::NonZeroU32;

/// Channel arrangement of one audio bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSet {
    /// The bus does not exist or is switched off
    Disabled,
    Mono,
    Stereo,
    /// Any other channel count, such as surround formats
    Discrete(u32),
}

impl ChannelSet {
    pub fn from_channel_count(count: u32) -> Self {
        match count {
            0 => Self::Disabled,
            1 => Self::Mono,
            2 => Self::Stereo,
            n => Self::Discrete(n),
        }
    }

    pub fn channel_count(&self) -> usize {
        match self {
            Self::Disabled => 0,
            Self::Mono => 1,
            Self::Stereo => 2,
            Self::Discrete(n) => *n as usize,
        }
    }
}

impl From<Option<NonZeroU32>> for ChannelSet {
    fn from(channels: Option<NonZeroU32>) -> Self {
        Self::from_channel_count(channels.map_or(0, NonZeroU32::get))
    }
}

/// Main input and output buses as proposed by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusesLayout {
    pub input: ChannelSet,
    pub output: ChannelSet,
}

impl BusesLayout {
    pub const fn new(input: ChannelSet, output: ChannelSet) -> Self {
        Self { input, output }
    }

    pub const fn stereo() -> Self {
        Self::new(ChannelSet::Stereo, ChannelSet::Stereo)
    }

    pub const fn mono() -> Self {
        Self::new(ChannelSet::Mono, ChannelSet::Mono)
    }

    pub fn from_io_layout(layout: &AudioIOLayout) -> Self {
        Self {
            input: layout.main_input_channels.into(),
            output: layout.main_output_channels.into(),
        }
    }

    pub fn input_channels(&self) -> usize {
        self.input.channel_count()
    }

    pub fn output_channels(&self) -> usize {
        self.output.channel_count()
    }
}

/// What kind of plugin the unit is built as. Only the effect is exported, but the bus
/// topology and negotiation rules are defined for all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluginVariant {
    /// Stereo in, stereo out
    #[default]
    Effect,
    /// No audio input, stereo out
    Synth,
    /// MIDI only, no audio buses at all
    MidiEffect,
}

impl PluginVariant {
    /// Bus topology declared at construction
    pub fn default_layout(self) -> BusesLayout {
        match self {
            Self::Effect => BusesLayout::stereo(),
            Self::Synth => BusesLayout::new(ChannelSet::Disabled, ChannelSet::Stereo),
            Self::MidiEffect => BusesLayout::new(ChannelSet::Disabled, ChannelSet::Disabled),
        }
    }

    pub fn accepts_midi(self) -> bool {
        !matches!(self, Self::Effect)
    }

    pub fn produces_midi(self) -> bool {
        matches!(self, Self::MidiEffect)
    }

    pub fn is_midi_effect(self) -> bool {
        matches!(self, Self::MidiEffect)
    }

    /// Answer the host's layout proposal.
    ///
    /// MIDI effects have no audio to care about and take anything. Everything else
    /// needs a mono or stereo output, and effects additionally need the input to match
    /// the output.
    pub fn is_layout_supported(self, layout: &BusesLayout) -> bool {
        if self.is_midi_effect() {
            return true;
        }

        if !matches!(layout.output, ChannelSet::Mono | ChannelSet::Stereo) {
            return false;
        }

        match self {
            Self::Synth => true,
            _ => layout.input == layout.output,
        }
    }
}
