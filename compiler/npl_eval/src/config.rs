//! Execution configuration.

/// Tunables for program execution.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ExecConfig {
    /// Simulated seconds covered by one step; `wait` converts its duration
    /// into steps with this.
    pub sub_step: f64,
    /// Step budget used by [`Program::tick`](crate::Program::tick).
    pub default_budget: u32,
}

impl Default for ExecConfig {
    fn default() -> Self {
        ExecConfig {
            sub_step: 0.001,
            default_budget: 100,
        }
    }
}

impl ExecConfig {
    #[must_use]
    pub fn with_sub_step(mut self, sub_step: f64) -> Self {
        self.sub_step = sub_step;
        self
    }

    #[must_use]
    pub fn with_default_budget(mut self, budget: u32) -> Self {
        self.default_budget = budget;
        self
    }

    /// Number of steps a `wait` of `duration` seconds occupies.
    ///
    /// `floor(duration / sub_step)`, with a small tolerance so that exact
    /// decimal ratios such as `0.1 / 0.001` are not lost to rounding.
    /// Negative, NaN and zero durations take no steps.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "ratio is floored, non-negative and saturates at u64::MAX"
    )]
    pub fn wait_steps(&self, duration: f64) -> u64 {
        let ratio = duration / self.sub_step + 1e-9;
        if ratio.is_nan() || ratio < 1.0 {
            0
        } else {
            ratio.floor() as u64
        }
    }
}
