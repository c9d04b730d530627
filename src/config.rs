use crate::error::GridcastError;

/// Tuning for a single raycast.
///
/// The default runs the walker until it hits an occupied cell or leaves the
/// grid, with no other limit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RaycastConfig {
    /// Stop with a miss after this many cell steps. Must be at least 1;
    /// [`Walker::new`](crate::Walker::new) debug-asserts [`Self::validate`].
    pub max_steps: Option<u32>,
}

impl RaycastConfig {
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn validate(&self) -> Result<(), GridcastError> {
        if self.max_steps == Some(0) {
            return Err(GridcastError::InvalidConfig("max_steps must be at least 1"));
        }
        Ok(())
    }
}
