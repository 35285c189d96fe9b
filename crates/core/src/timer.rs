//! OTP resend countdown.

/// Default resend window in ticks (seconds).
pub const DEFAULT_RESEND_SECS: u32 = 30;

/// One-shot countdown gating OTP resend. Driven by external one-second ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCountdown {
    window: u32,
    remaining: u32,
    can_resend: bool,
}

impl Default for OtpCountdown {
    fn default() -> Self {
        Self::new(DEFAULT_RESEND_SECS)
    }
}

impl OtpCountdown {
    /// Idle countdown with a resend window of `window` ticks.
    pub fn new(window: u32) -> Self {
        Self {
            window,
            remaining: 0,
            can_resend: false,
        }
    }

    /// Restart from the full window with resend disabled.
    pub fn restart(&mut self) {
        self.remaining = self.window;
        self.can_resend = false;
    }

    /// Advance one tick. Returns `true` when this tick enabled resend.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.can_resend = true;
            return true;
        }
        false
    }

    /// Whether ticks still have an effect.
    pub fn is_running(&self) -> bool {
        self.remaining > 0
    }

    /// Ticks left before resend is enabled.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether "Resend OTP" is enabled.
    pub fn can_resend(&self) -> bool {
        self.can_resend
    }

    /// Back to idle, keeping the configured window.
    pub fn reset(&mut self) {
        *self = Self::new(self.window);
    }
}
