//! Headless render context that records draw calls
//!
//! Stands in for a GPU backend in tools, demos and tests.

use crate::render::context::{DrawCall, RenderContext, RenderError, RenderResult};

/// Render context that keeps every submitted draw call in memory
#[derive(Debug, Default)]
pub struct DrawRecorder {
    calls: Vec<DrawCall>,
    fail_after: Option<usize>,
}

impl DrawRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that accepts `count` draws and rejects the rest
    pub fn failing_after(count: usize) -> Self {
        Self {
            calls: Vec::new(),
            fail_after: Some(count),
        }
    }

    /// Draw calls recorded so far
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of recorded draws
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// True when nothing has been drawn
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Forget recorded draws, typically at the start of a frame
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderContext for DrawRecorder {
    fn draw(&mut self, call: &DrawCall) -> RenderResult<()> {
        if self.fail_after.is_some_and(|limit| self.calls.len() >= limit) {
            return Err(RenderError::DrawFailed(format!(
                "recorder limit of {} draws reached",
                self.calls.len()
            )));
        }
        self.calls.push(call.clone());
        Ok(())
    }
}
