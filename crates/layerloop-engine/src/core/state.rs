/// Run-loop state.
///
/// Transitions:
/// - `start()`: any → `Running`
/// - `update()`: any → `Running`, then → `Stopped` if an exit condition holds
/// - `stop()`: any → `Stopped`
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum EngineState {
    #[default]
    Stopped,
    Running,
}

impl EngineState {
    #[inline]
    pub fn is_running(self) -> bool {
        self == EngineState::Running
    }
}
