//! Scroll extent, scrollbar visibility and debounced resize handling

use std::time::{Duration, Instant};

/// Default coalescing window for container resize bursts
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Default number of rows moved per wheel notch
pub const DEFAULT_WHEEL_STEP: u32 = 3;

/// Snapshot of the viewport, handed to the render backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Fraction of the scrollable range, 0 = top, 1 = bottom
    pub scroll_offset: f64,
    pub scrollbar_visible: bool,
    pub content_height: u32,
    pub content_width: u32,
    pub container_height: u32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scroll_offset: 0.0,
            scrollbar_visible: false,
            content_height: 0,
            content_width: 0,
            container_height: 0,
        }
    }
}

impl ViewportState {
    /// How far the content extends past the container
    pub fn overflow(&self) -> u32 {
        self.content_height.saturating_sub(self.container_height)
    }

    /// First content unit shown at the top of the container
    pub fn first_visible_unit(&self) -> u32 {
        (self.scroll_offset * f64::from(self.overflow())).round() as u32
    }
}

/// Single-shot timer where scheduling again cancels the pending deadline
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm the timer; returns true if a pending deadline was superseded
    pub fn schedule(&mut self, now: Instant) -> bool {
        self.deadline.replace(now + self.delay).is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    pub resize_debounce: Duration,
    pub wheel_step: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            wheel_step: DEFAULT_WHEEL_STEP,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    state: ViewportState,
    wheel_step: u32,
    resize_timer: DebounceTimer,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            state: ViewportState::default(),
            wheel_step: config.wheel_step,
            resize_timer: DebounceTimer::new(config.resize_debounce),
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn resize_pending(&self) -> bool {
        self.resize_timer.is_pending()
    }

    pub fn on_content_resize(&mut self, content_height: u32, container_height: u32) {
        self.state.content_height = content_height;
        self.state.container_height = container_height;

        // A zero container has not been measured yet
        if container_height > 0 && content_height > container_height {
            self.state.scrollbar_visible = true;
            self.state.scroll_offset = self.state.scroll_offset.clamp(0.0, 1.0);
        } else {
            self.state.scrollbar_visible = false;
            self.state.scroll_offset = 0.0;
        }
    }

    /// Record the container size without deferring anything
    pub fn set_container(&mut self, width: u32, height: u32) {
        self.state.content_width = width;
        self.state.container_height = height;
    }

    /// Stretch content to the container width now; re-check the scroll
    /// extent once the resize burst settles.
    ///
    /// The first real size after an unmeasured container applies at once.
    pub fn on_container_resize(&mut self, width: u32, height: u32, now: Instant) {
        let measured = self.state.container_height > 0;
        self.state.content_width = width;
        self.state.container_height = height;
        if !measured {
            self.resize_timer.cancel();
            self.on_content_resize(self.state.content_height, height);
            return;
        }
        if self.resize_timer.schedule(now) {
            tracing::trace!(width, height, "pending resize re-check superseded");
        }
    }

    /// Run the deferred re-check if due; returns whether it ran
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.resize_timer.fire_if_due(now) {
            return false;
        }
        let (content, container) = (self.state.content_height, self.state.container_height);
        self.on_content_resize(content, container);
        tracing::debug!(content, container, visible = self.state.scrollbar_visible, "viewport re-checked");
        true
    }

    /// Scroll by wheel notches (positive moves toward the end).
    ///
    /// `row_extent` is the height of one row in content units. Returns
    /// whether the offset changed.
    pub fn on_wheel(&mut self, notches: i32, row_extent: u32) -> bool {
        let overflow = self.state.overflow();
        if !self.state.scrollbar_visible || overflow == 0 || notches == 0 {
            return false;
        }

        let step = i64::from(notches) * i64::from(self.wheel_step) * i64::from(row_extent);
        let target = (i64::from(self.state.first_visible_unit()) + step).clamp(0, i64::from(overflow));
        let offset = target as f64 / f64::from(overflow);

        if offset == self.state.scroll_offset {
            return false;
        }
        self.state.scroll_offset = offset;
        true
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ViewportController {
        ViewportController::new(ViewportConfig {
            resize_debounce: Duration::from_millis(100),
            wheel_step: 1,
        })
    }

    #[test]
    fn test_scrollbar_visibility_follows_content() {
        let mut vp = controller();
        vp.on_content_resize(50, 20);
        assert!(vp.state().scrollbar_visible);

        vp.on_content_resize(10, 20);
        assert!(!vp.state().scrollbar_visible);
        assert_eq!(vp.state().scroll_offset, 0.0);
    }

    #[test]
    fn test_shrinking_content_resets_to_top() {
        let mut vp = controller();
        vp.on_content_resize(50, 20);
        assert!(vp.on_wheel(10, 1));
        assert!(vp.state().scroll_offset > 0.0);

        vp.on_content_resize(20, 20);
        assert_eq!(vp.state().scroll_offset, 0.0);
    }

    #[test]
    fn test_wheel_noop_when_content_fits() {
        let mut vp = controller();
        vp.on_content_resize(10, 20);
        assert!(!vp.on_wheel(1, 1));
        assert_eq!(vp.state().scroll_offset, 0.0);
    }

    #[test]
    fn test_wheel_moves_and_clamps() {
        let mut vp = controller();
        vp.on_content_resize(30, 10);

        assert!(vp.on_wheel(5, 2));
        assert_eq!(vp.state().first_visible_unit(), 10);
        assert_eq!(vp.state().scroll_offset, 0.5);

        assert!(vp.on_wheel(100, 2));
        assert_eq!(vp.state().scroll_offset, 1.0);
        assert!(!vp.on_wheel(1, 2));

        assert!(vp.on_wheel(-100, 2));
        assert_eq!(vp.state().scroll_offset, 0.0);
    }

    #[test]
    fn test_resize_burst_coalesces_to_final_size() {
        let mut vp = controller();
        vp.on_content_resize(30, 40);
        assert!(!vp.state().scrollbar_visible);

        let start = Instant::now();
        for (i, height) in [35, 28, 25, 20].into_iter().enumerate() {
            vp.on_container_resize(80, height, start + Duration::from_millis(10 * i as u64));
        }
        assert_eq!(vp.state().content_width, 80);
        assert!(vp.resize_pending());

        // 100ms after the last resize (at 30ms), not the first
        assert!(!vp.poll(start + Duration::from_millis(110)));
        assert!(!vp.state().scrollbar_visible);

        let mut runs = 0;
        for ms in [130, 140, 200, 500] {
            if vp.poll(start + Duration::from_millis(ms)) {
                runs += 1;
            }
        }
        assert_eq!(runs, 1);
        assert_eq!(vp.state().container_height, 20);
        assert!(vp.state().scrollbar_visible);
    }

    #[test]
    fn test_unmeasured_container_hides_scrollbar() {
        let mut vp = controller();
        vp.on_content_resize(50, 0);
        assert!(!vp.state().scrollbar_visible);
        assert!(!vp.on_wheel(1, 1));
    }

    #[test]
    fn test_first_container_size_skips_debounce() {
        let mut vp = controller();
        vp.on_content_resize(50, 0);

        let now = Instant::now();
        vp.on_container_resize(80, 20, now);
        assert!(vp.state().scrollbar_visible);
        assert!(!vp.resize_pending());

        // Later sizes are debounced again
        vp.on_container_resize(80, 60, now);
        assert!(vp.resize_pending());
        assert!(vp.state().scrollbar_visible);
        assert!(vp.poll(now + Duration::from_millis(100)));
        assert!(!vp.state().scrollbar_visible);
    }

    #[test]
    fn test_debounce_timer_cancel() {
        let mut timer = DebounceTimer::new(Duration::from_millis(100));
        let now = Instant::now();
        assert!(!timer.schedule(now));
        assert!(timer.schedule(now));
        timer.cancel();
        assert!(!timer.fire_if_due(now + Duration::from_secs(1)));
    }
}
