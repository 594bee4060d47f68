//! Control-thread handle for a running [`PitchPlugin`](crate::PitchPlugin).

use std::sync::Arc;

use pitchtap_analysis::{PitchParameters, PitchResult};
use pitchtap_core::{AtomicFloat, ParameterRange};

use crate::protocol::ParameterInfo;

/// Cloneable view onto a plugin's parameters and latest pitch.
///
/// Writes go through the same host ranges as
/// [`AnalysisProcessor::set_parameter`](crate::AnalysisProcessor::set_parameter)
/// and are picked up at the start of the next processed block.
#[derive(Debug, Clone)]
pub struct PitchPluginHandle {
    params: Arc<PitchParameters>,
    current_pitch: Arc<AtomicFloat>,
    threshold_range: ParameterRange,
    min_bounds_range: ParameterRange,
}

impl PitchPluginHandle {
    pub(crate) fn new(params: Arc<PitchParameters>, current_pitch: Arc<AtomicFloat>) -> Self {
        Self {
            params,
            current_pitch,
            threshold_range: ParameterInfo::threshold().range,
            min_bounds_range: ParameterInfo::min_bounds().range,
        }
    }

    pub fn set_threshold(&self, threshold: f32) {
        self.params
            .set_threshold(self.threshold_range.clamp(threshold));
    }

    pub fn set_min_bounds(&self, min_bounds: f32) {
        self.params
            .set_min_bounds(self.min_bounds_range.clamp(min_bounds));
    }

    pub fn threshold(&self) -> f32 {
        self.params.threshold()
    }

    pub fn min_bounds(&self) -> f32 {
        self.params.min_bounds()
    }

    /// Latest pitch in Hz, or -1 when the last block had none.
    pub fn current_pitch(&self) -> f32 {
        self.current_pitch.get()
    }

    pub fn current_pitch_hz(&self) -> Option<f32> {
        let pitch = self.current_pitch.get();
        (pitch > 0.0).then_some(pitch)
    }

    /// Nearest note name of the latest pitch (e.g. "A4").
    pub fn current_note(&self) -> Option<String> {
        PitchResult {
            frequency: self.current_pitch.get(),
            ..PitchResult::NONE
        }
        .note_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchtap_analysis::NO_PITCH;

    fn handle() -> PitchPluginHandle {
        PitchPluginHandle::new(
            Arc::new(PitchParameters::default()),
            Arc::new(AtomicFloat::new(NO_PITCH)),
        )
    }

    #[test]
    fn test_writes_are_clamped() {
        let handle = handle();

        handle.set_threshold(5.0);
        assert_eq!(handle.threshold(), 1.0);
        handle.set_threshold(0.0);
        assert_eq!(handle.threshold(), 0.01);

        handle.set_min_bounds(500.0);
        assert_eq!(handle.min_bounds(), 200.0);
        handle.set_min_bounds(-3.0);
        assert_eq!(handle.min_bounds(), 1.0);
    }

    #[test]
    fn test_current_pitch() {
        let handle = handle();
        assert_eq!(handle.current_pitch(), -1.0);
        assert_eq!(handle.current_pitch_hz(), None);
        assert_eq!(handle.current_note(), None);

        handle.current_pitch.set(440.0);
        assert_eq!(handle.current_pitch_hz(), Some(440.0));
        assert_eq!(handle.current_note().as_deref(), Some("A4"));
    }

    #[test]
    fn test_clones_share_state() {
        let a = handle();
        let b = a.clone();
        a.set_threshold(0.3);
        assert_eq!(b.threshold(), 0.3);
    }
}
