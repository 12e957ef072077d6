pub mod audio;
pub mod buffer;
mod editor;
pub mod error;

use audio::constants::PLUGIN_NAME;
use audio::layout::BusesLayout;
use audio::parameter_store::ParameterHandle;
use audio::processor::{GainProcessor, ProcessorConfig};
use nih_plug::prelude::*;
use nih_plug::wrapper::state::PluginState;
use nih_plug_iced::IcedState;
use std::sync::Arc;

pub struct GainTutorial {
    params: Arc<GainTutorialParams>,
    processor: GainProcessor,
    editor_state: Arc<IcedState>,
}

#[derive(Params)]
pub struct GainTutorialParams {
    /// The parameter's ID is used to identify the parameter in the wrapped plugin API. As long as
    /// these IDs remain constant, you can rename and reorder these fields as you wish. The gain is
    /// stored in decibels, exactly as the store below holds it.
    #[id = "gain"]
    pub gain: FloatParam,

    /// What the audio thread actually reads. Every host-side change to `gain` is published here.
    pub store: ParameterHandle,
}

impl GainTutorialParams {
    fn new(store: ParameterHandle) -> Self {
        let descriptor = *store.descriptor();
        let callback_store = store.clone();

        Self {
            gain: FloatParam::new(
                descriptor.display_name,
                descriptor.default,
                FloatRange::Linear {
                    min: descriptor.min,
                    max: descriptor.max,
                },
            )
            // No smoother: the engine reads the store once per block and applies it as is
            .with_callback(Arc::new(move |db: f32| callback_store.set(db)))
            // Continuous: only the display is rounded, host writes reach the store unsnapped
            .with_unit(" dB")
            .with_value_to_string(formatters::v2s_f32_rounded(1)),
            store,
        }
    }
}

impl Default for GainTutorial {
    fn default() -> Self {
        let processor = GainProcessor::new(ProcessorConfig::default());
        let params = Arc::new(GainTutorialParams::new(processor.gain().clone()));

        Self {
            params,
            processor,
            editor_state: editor::default_state(),
        }
    }
}

impl Plugin for GainTutorial {
    const NAME: &'static str = PLUGIN_NAME;
    const VENDOR: &'static str = "Cmdv";
    const URL: &'static str = env!("CARGO_PKG_HOMEPAGE");
    const EMAIL: &'static str = "info@cmdv.me";

    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    // The first audio IO layout is used as the default. Both entries pass the processor's own
    // layout negotiation, which `initialize()` checks again for whatever the host picks.
    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(2),
            main_output_channels: NonZeroU32::new(2),

            aux_input_ports: &[],
            aux_output_ports: &[],

            names: PortNames::const_default(),
        },
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(1),
            main_output_channels: NonZeroU32::new(1),
            ..AudioIOLayout::const_default()
        },
    ];

    const MIDI_INPUT: MidiConfig = MidiConfig::None;
    const MIDI_OUTPUT: MidiConfig = MidiConfig::None;

    // Blocks are not split at automation points. The gain is read once per block.
    const SAMPLE_ACCURATE_AUTOMATION: bool = false;

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    fn editor(&mut self, _async_executor: AsyncExecutor<Self>) -> Option<Box<dyn Editor>> {
        if !self.processor.has_editor() {
            return None;
        }

        nih_log!("Editor requested");
        editor::create(self.params.clone(), self.editor_state.clone())
    }

    fn initialize(
        &mut self,
        audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        let layout = BusesLayout::from_io_layout(audio_io_layout);
        if !self.processor.prepare(layout) {
            nih_error!("Unsupported bus layout: {:?}", layout);
            return false;
        }

        nih_log!(
            "Plugin initialized: {:?}, max buffer size {}, gain {} dB",
            layout,
            buffer_config.max_buffer_size,
            self.params.store.get()
        );
        true
    }

    fn reset(&mut self) {
        self.processor.reset();
    }

    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        self.processor
            .process_block(buffer.as_slice(), std::iter::from_fn(|| context.next_event()));

        ProcessStatus::Normal
    }

    // Parameter values are not persisted. Whatever a saved session or preset carries is dropped
    // before nih-plug applies it, so restoring leaves the current gain untouched.
    fn filter_state(state: &mut PluginState) {
        if !state.params.is_empty() || !state.fields.is_empty() {
            nih_log!(
                "Discarding {} saved parameter value(s) and {} field(s) from restored state",
                state.params.len(),
                state.fields.len()
            );
        }

        state.params.clear();
        state.fields.clear();
    }
}

impl ClapPlugin for GainTutorial {
    const CLAP_ID: &'static str = "me.cmdv.gain-tutorial";
    const CLAP_DESCRIPTION: Option<&'static str> = Some("A decibel gain effect");
    const CLAP_MANUAL_URL: Option<&'static str> = Some(Self::URL);
    const CLAP_SUPPORT_URL: Option<&'static str> = None;

    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Stereo,
        ClapFeature::Mono,
        ClapFeature::Utility,
    ];
}

impl Vst3Plugin for GainTutorial {
    const VST3_CLASS_ID: [u8; 16] = *b"CmdvGainTutorial";

    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Tools];
}

nih_export_clap!(GainTutorial);
nih_export_vst3!(GainTutorial);
