//! Lock-free scalar cell for real-time parameter hand-off.

use atomic_float::AtomicF32;
use core::sync::atomic::Ordering;

/// Cache-line aligned atomic f32.
///
/// One writer (control thread) and one reader (audio thread). Readers take
/// the value by copy, so a store never waits on a reader and vice versa.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicFloat {
    value: AtomicF32,
}

impl AtomicFloat {
    pub fn new(value: f32) -> Self {
        Self {
            value: AtomicF32::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.value.store(value, Ordering::Release);
    }

    #[inline]
    pub fn swap(&self, value: f32) -> f32 {
        self.value.swap(value, Ordering::AcqRel)
    }
}

impl Clone for AtomicFloat {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl Default for AtomicFloat {
    fn default() -> Self {
        Self::new(0.0)
    }
}
