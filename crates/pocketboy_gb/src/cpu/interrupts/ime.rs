/// Interrupt master enable.
///
/// EI, DI and RETI do not change IME until after the following
/// instruction. Their write is held in `pending` and folded into `enabled`
/// by [`ImeState::commit`] at a fixed point of each CPU step. Interrupt
/// entry is the only immediate write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImeState {
    pub enabled: bool,
    pub pending: Option<bool>,
}

impl ImeState {
    /// EI and RETI.
    #[inline]
    pub fn schedule_enable(&mut self) {
        self.pending = Some(true);
    }

    /// DI. Replaces a pending EI.
    #[inline]
    pub fn schedule_disable(&mut self) {
        self.pending = Some(false);
    }

    /// Interrupt entry. Drops any pending write.
    #[inline]
    pub fn disable_now(&mut self) {
        self.enabled = false;
        self.pending = None;
    }

    #[inline]
    pub fn commit(&mut self) {
        if let Some(enabled) = self.pending.take() {
            self.enabled = enabled;
        }
    }
}
