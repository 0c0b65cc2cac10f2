//! Frame loop lifecycle across page hide/show
//!
//! The host keeps at most one animation frame pending. Hiding the page stops
//! the loop; a page restored from the back/forward cache starts it again.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLoop {
    mounted: bool,
    frame_pending: bool,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            mounted: true,
            frame_pending: false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Claim the next frame request. False when unmounted or one is already
    /// pending.
    pub fn request(&mut self) -> bool {
        if !self.mounted || self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// A requested frame arrived; returns whether to run it
    pub fn begin_frame(&mut self) -> bool {
        self.frame_pending = false;
        self.mounted
    }

    /// `pagehide`
    pub fn hide(&mut self) {
        self.mounted = false;
    }

    /// `pageshow`. Returns true when the loop needs a fresh frame request.
    pub fn show(&mut self, persisted: bool) -> bool {
        if !persisted || self.mounted {
            return false;
        }
        self.mounted = true;
        self.request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pending_frame() {
        let mut frames = FrameLoop::new();
        assert!(frames.request());
        assert!(!frames.request());
        assert!(frames.begin_frame());
        assert!(frames.request());
    }

    #[test]
    fn test_hide_stops_loop() {
        let mut frames = FrameLoop::new();
        assert!(frames.request());
        frames.hide();
        assert!(!frames.begin_frame());
        assert!(!frames.request());
    }

    #[test]
    fn test_restore_from_cache_restarts_loop() {
        let mut frames = FrameLoop::new();
        frames.request();
        frames.hide();
        assert!(!frames.begin_frame());

        assert!(frames.show(true));
        assert!(frames.is_mounted());
        assert!(frames.begin_frame());
        assert!(frames.request());
    }

    #[test]
    fn test_restore_survives_repeated_cycles() {
        let mut frames = FrameLoop::new();
        for _ in 0..3 {
            frames.request();
            frames.hide();
            assert!(!frames.begin_frame());
            assert!(frames.show(true));
            assert!(frames.begin_frame());
        }
    }

    #[test]
    fn test_show_while_frame_pending_does_not_double_request() {
        let mut frames = FrameLoop::new();
        frames.request();
        frames.hide();
        // Frozen page: the pending frame never ran before the restore
        assert!(!frames.show(true));
        assert!(frames.is_mounted());
        assert!(frames.begin_frame());
    }

    #[test]
    fn test_plain_pageshow_ignored() {
        let mut frames = FrameLoop::new();
        assert!(!frames.show(false));
        frames.hide();
        assert!(!frames.show(false));
        assert!(!frames.is_mounted());
    }
}
