//! Navigation behavior switches.

/// Options applied by [`NavController`](crate::controller::NavController).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavOptions {
    /// Skip `navigate` calls that resolve to the current top entry's
    /// template with identical parameters. Off by default, so every
    /// successful `navigate` pushes.
    pub launch_single_top: bool,
}

impl NavOptions {
    /// Set [`Self::launch_single_top`].
    pub fn with_launch_single_top(mut self, enabled: bool) -> Self {
        self.launch_single_top = enabled;
        self
    }
}
