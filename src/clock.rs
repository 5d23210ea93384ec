//! Elapsed-time source for animation pacing
//!
//! `embedded-hal` covers blocking delays but has no notion of "now", so the
//! animation asks a [`Clock`] for a free-running millisecond counter. Only
//! differences between two readings are used and they are computed with
//! wrapping arithmetic, so the counter may roll over.

/// Free-running millisecond counter
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin
    fn now_ms(&mut self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_ms(&mut self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed between two readings of the same clock
pub fn elapsed_ms(start: u32, now: u32) -> u32 {
    now.wrapping_sub(start)
}

/// Host wall clock backed by [`std::time::Instant`]
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Start counting from now
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&mut self) -> u32 {
        self.origin.elapsed().as_millis() as u32
    }
}
