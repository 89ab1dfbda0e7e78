//! Output seams: the display surface and the per-frame annotation hook.

use crate::sequence::FrameId;

/// Visual surface the controller updates once per tick.
pub trait FrameSink<H> {
    /// Show frame `index`. `image` is `None` while the frame is still
    /// loading; the surface should show nothing rather than wait.
    fn show_frame(&mut self, index: usize, id: &FrameId, image: Option<&H>);

    /// Toggle the loading indicator shown during initialization.
    fn set_loading(&mut self, _loading: bool) {}

    /// Replace the sequence with a diagnostic after a fatal
    /// initialization failure.
    fn show_error(&mut self, _message: &str) {}
}

/// Per-frame callback (`showInfoAtFrame` in the browser).
///
/// Called once per tick with the displayed index; must be cheap.
pub trait FrameAnnotator {
    /// Frame `index` is now on screen.
    fn annotate(&mut self, index: usize);
}

impl<F: FnMut(usize)> FrameAnnotator for F {
    fn annotate(&mut self, index: usize) {
        self(index);
    }
}

/// Annotator that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnnotation;

impl FrameAnnotator for NoAnnotation {
    fn annotate(&mut self, _index: usize) {}
}

/// Headless sink that logs frame changes.
#[derive(Debug, Default, Clone)]
pub struct LogSink {
    last_shown: Option<usize>,
    frames_shown: usize,
    blank_frames: usize,
}

impl LogSink {
    /// Frame most recently shown.
    #[must_use]
    pub fn last_shown(&self) -> Option<usize> {
        self.last_shown
    }

    /// Ticks rendered so far.
    #[must_use]
    pub fn frames_shown(&self) -> usize {
        self.frames_shown
    }

    /// Ticks whose frame was not loaded yet.
    #[must_use]
    pub fn blank_frames(&self) -> usize {
        self.blank_frames
    }
}

impl<H> FrameSink<H> for LogSink {
    fn show_frame(&mut self, index: usize, id: &FrameId, image: Option<&H>) {
        self.frames_shown += 1;
        if image.is_none() {
            self.blank_frames += 1;
        }
        if self.last_shown != Some(index) {
            log::debug!(
                "frame {index} ({id}){}",
                if image.is_some() { "" } else { " not loaded" }
            );
            self.last_shown = Some(index);
        }
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            log::info!("loading frames...");
        }
    }

    fn show_error(&mut self, message: &str) {
        log::error!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_annotators() {
        let mut seen = Vec::new();
        {
            let mut annotate = |i: usize| seen.push(i);
            annotate.annotate(3);
            annotate.annotate(4);
        }
        assert_eq!(seen, vec![3, 4]);
    }

    #[test]
    fn log_sink_counts_blank_frames() {
        let mut sink = LogSink::default();
        let id = FrameId::new("f/0000.png");
        FrameSink::<()>::show_frame(&mut sink, 0, &id, Some(&()));
        FrameSink::<()>::show_frame(&mut sink, 1, &id, None);
        assert_eq!(sink.frames_shown(), 2);
        assert_eq!(sink.blank_frames(), 1);
        assert_eq!(sink.last_shown(), Some(1));
    }
}
