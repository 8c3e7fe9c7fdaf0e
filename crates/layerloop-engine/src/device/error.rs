use wgpu::SurfaceError;

/// What the context does after failing to acquire a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Swap chain is stale; reconfigure and try again next frame.
    Reconfigured,
    /// Transient; this frame is not drawn.
    SkipFrame,
    /// The context is lost; the window reports a close request from now on.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn for_error(err: &SurfaceError) -> Self {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => Self::Reconfigured,
            SurfaceError::Timeout | SurfaceError::Other => Self::SkipFrame,
            SurfaceError::OutOfMemory => Self::Fatal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_out_of_memory_is_fatal() {
        assert_eq!(
            SurfaceErrorAction::for_error(&SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
        for err in [SurfaceError::Lost, SurfaceError::Outdated] {
            assert_eq!(SurfaceErrorAction::for_error(&err), SurfaceErrorAction::Reconfigured);
        }
        for err in [SurfaceError::Timeout, SurfaceError::Other] {
            assert_eq!(SurfaceErrorAction::for_error(&err), SurfaceErrorAction::SkipFrame);
        }
    }
}
