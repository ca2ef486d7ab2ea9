/// Shared T-cycle counter.
///
/// The CPU charges instruction costs into it and the GPU resets it on each
/// scanline phase change. The machine owns the only instance and lends it
/// to both in turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    cycles: u32,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    #[inline]
    pub fn set_cycles(&mut self, cycles: u32) {
        self.cycles = cycles;
    }

    #[inline]
    pub fn increment(&mut self, cycles: u32) {
        self.cycles = self.cycles.saturating_add(cycles);
    }

    #[inline]
    pub fn reset(&mut self) {
        self.cycles = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::Timer;

    #[test]
    fn starts_at_zero_and_accumulates() {
        let mut timer = Timer::new();
        assert_eq!(timer.cycles(), 0);
        timer.increment(4);
        timer.increment(12);
        assert_eq!(timer.cycles(), 16);
        timer.reset();
        assert_eq!(timer.cycles(), 0);
    }

    #[test]
    fn increment_saturates() {
        let mut timer = Timer::new();
        timer.set_cycles(u32::MAX - 1);
        timer.increment(8);
        assert_eq!(timer.cycles(), u32::MAX);
    }
}
