/// Horizontal drag tracking for pointer scrubbing.
///
/// Armed by a press on the sequence surface, disarmed by a release
/// anywhere. While armed, each move reports the horizontal distance since
/// the previous position.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct DragTracker {
    armed: bool,
    last_x: f64,
}

impl DragTracker {
    /// Start tracking from `x`.
    pub(crate) fn press(&mut self, x: f64) {
        self.armed = true;
        self.last_x = x;
    }

    /// Horizontal delta since the last position, or `None` when not armed.
    pub(crate) fn motion(&mut self, x: f64) -> Option<f64> {
        if !self.armed {
            return None;
        }
        let dx = x - self.last_x;
        self.last_x = x;
        Some(dx)
    }

    /// Stop tracking.
    pub(crate) fn release(&mut self) {
        self.armed = false;
    }

    /// Whether a drag is in progress.
    pub(crate) fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_ignored_until_pressed() {
        let mut drag = DragTracker::default();
        assert_eq!(drag.motion(40.0), None);
        drag.press(10.0);
        assert_eq!(drag.motion(14.0), Some(4.0));
        assert_eq!(drag.motion(9.0), Some(-5.0));
        drag.release();
        assert!(!drag.is_armed());
        assert_eq!(drag.motion(100.0), None);
    }

    #[test]
    fn press_resets_origin() {
        let mut drag = DragTracker::default();
        drag.press(0.0);
        let _ = drag.motion(50.0);
        drag.release();
        drag.press(200.0);
        assert_eq!(drag.motion(201.0), Some(1.0));
    }
}
