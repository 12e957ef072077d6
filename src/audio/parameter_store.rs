use crate::error::ParameterError;
use atomic_float::AtomicF32;
use std::ops::RangeInclusive;
use std::sync::{atomic::Ordering, Arc};

/// Static description of a ranged float parameter, as registered with the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParameterDescriptor {
    pub const fn new(
        id: &'static str,
        display_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            id,
            display_name,
            min,
            max,
            default,
        }
    }

    /// Check the range contract: finite bounds, `min <= max`, default inside.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.min.is_finite() && self.max.is_finite() && self.default.is_finite()) {
            return Err(ParameterError::NonFiniteBound { id: self.id });
        }
        if self.min > self.max {
            return Err(ParameterError::InvertedRange {
                id: self.id,
                min: self.min,
                max: self.max,
            });
        }
        if !self.range().contains(&self.default) {
            return Err(ParameterError::DefaultOutOfRange {
                id: self.id,
                default: self.default,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn range(&self) -> RangeInclusive<f32> {
        self.min..=self.max
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Shared handle to a declared parameter. The plugin owns one, and clones of it go to
/// the real-time engine and to the control surface.
pub type ParameterHandle = Arc<AtomicParameter>;

/// A single host-exposed float parameter backed by one atomic word.
///
/// Writes come from the control path (editor, automation, preset recall) and reads come
/// from the audio thread. Both are plain atomic operations on an `AtomicF32`, so a
/// reader always sees either the old or the new value in full and never blocks.
///
/// There is no ordering between a `set` and the audio thread's next `get`: the audio
/// thread may keep using the previous value for the block that is already in flight.
#[derive(Debug)]
pub struct AtomicParameter {
    descriptor: ParameterDescriptor,
    value: AtomicF32,
}

impl AtomicParameter {
    /// Declare a parameter, returning the configuration error instead of aborting.
    pub fn try_declare(descriptor: ParameterDescriptor) -> Result<ParameterHandle, ParameterError> {
        descriptor.validate()?;

        Ok(Arc::new(Self {
            descriptor,
            value: AtomicF32::new(descriptor.default),
        }))
    }

    /// Declare a parameter at construction time.
    ///
    /// # Panics
    ///
    /// An invalid descriptor is a configuration error that must stop the plugin from
    /// loading, so this panics after logging the error.
    pub fn declare(descriptor: ParameterDescriptor) -> ParameterHandle {
        match Self::try_declare(descriptor) {
            Ok(handle) => handle,
            Err(err) => {
                nih_plug::nih_error!("Refusing to declare parameter: {}", err);
                panic!("{err}");
            }
        }
    }

    /// Current value in plain units. Lock-free, safe on the audio thread.
    #[inline]
    pub fn get(&self) -> f32 {
        self.value.load(Ordering::Relaxed)
    }

    /// Publish a new value, clamped into the declared range. NaN is dropped so the
    /// stored value always stays in range.
    #[inline]
    pub fn set(&self, value: f32) {
        if value.is_nan() {
            return;
        }

        self.value
            .store(self.descriptor.clamp(value), Ordering::Relaxed);
    }

    /// Restore the declared default.
    pub fn reset(&self) {
        self.value.store(self.descriptor.default, Ordering::Relaxed);
    }

    pub fn descriptor(&self) -> &ParameterDescriptor {
        &self.descriptor
    }

    pub fn id(&self) -> &'static str {
        self.descriptor.id
    }

    pub fn display_name(&self) -> &'static str {
        self.descriptor.display_name
    }

    pub fn range(&self) -> RangeInclusive<f32> {
        self.descriptor.range()
    }

    pub fn default_value(&self) -> f32 {
        self.descriptor.default
    }
}
