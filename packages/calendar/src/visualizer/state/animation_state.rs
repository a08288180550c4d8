/// Lifecycle of the per-element animation loop.
///
/// `Idle` before the first connect and after a disconnect. While
/// `Animating` the host keeps scheduling frames; there is no terminal state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationState {
    Idle,
    Animating {
        /// Time origin of the loop; taken from the first tick after (re)start
        started_at_ms: Option<f64>,
    },
}

impl AnimationState {
    pub fn is_animating(&self) -> bool {
        matches!(self, AnimationState::Animating { .. })
    }

    /// Restart the time origin without leaving the animating state
    pub(crate) fn restarted(self) -> Self {
        match self {
            AnimationState::Idle => AnimationState::Idle,
            AnimationState::Animating { .. } => AnimationState::Animating { started_at_ms: None },
        }
    }
}
