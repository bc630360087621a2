use std::time::Duration;

use anyhow::{ensure, Result};
use heavy_machine_gun_rendering::{FrameInput, Presentation, RenderingBackend};

use crate::autopilot;

const REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Backend that steps a fixed number of frames without opening a window.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HeadlessBackend {
    frames: u64,
    frame: Duration,
    autopilot: bool,
}

impl HeadlessBackend {
    pub(crate) fn new(frames: u64, frame: Duration, autopilot: bool) -> Self {
        Self {
            frames,
            frame,
            autopilot,
        }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Presentation),
    {
        ensure!(!self.frame.is_zero(), "headless frame interval must be positive");

        let mut presentation = presentation;
        let mut since_report = Duration::ZERO;
        tracing::info!(
            title = %presentation.window_title,
            frames = self.frames,
            frame_ms = self.frame.as_millis() as u64,
            "headless run started"
        );

        for _ in 0..self.frames {
            let input = if self.autopilot {
                autopilot::steer(&presentation)
            } else {
                FrameInput::default()
            };
            update(self.frame, input, &mut presentation);

            since_report += self.frame;
            if since_report >= REPORT_INTERVAL {
                since_report = Duration::ZERO;
                tracing::info!("{}", presentation.hud.status_line());
            }
        }

        Ok(())
    }
}
