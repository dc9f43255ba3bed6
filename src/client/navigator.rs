//! Linear step navigation through the sections of the journey.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Tick period of the falling-hearts effect on the final section
pub const DECOR_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavigatorError {
    #[error("a step navigator needs at least one section")]
    NoSections,
}

/// Decoration that runs only while the final section is shown
pub trait Decor {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Runs a callback on a fixed interval in a tokio task.
///
/// `start` must be called from within a tokio runtime.
pub struct IntervalDecor {
    period: Duration,
    tick: Arc<dyn Fn() + Send + Sync>,
    handle: Option<JoinHandle<()>>,
}

impl IntervalDecor {
    pub fn new(tick: impl Fn() + Send + Sync + 'static) -> Self {
        Self::with_period(DECOR_INTERVAL, tick)
    }

    pub fn with_period(period: Duration, tick: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            period,
            tick: Arc::new(tick),
            handle: None,
        }
    }
}

impl Decor for IntervalDecor {
    fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        let tick = Arc::clone(&self.tick);
        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately; the effect starts one period in
            interval.tick().await;
            loop {
                interval.tick().await;
                tick();
            }
        }));
        tracing::debug!("Final section decor started");
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("Final section decor stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for IntervalDecor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
}

/// Visibility of the navigation controls and the progress bar width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub show_prev: bool,
    pub show_next: bool,
    pub progress_percent: f32,
}

/// Result of a step change: which section to hide and which to show
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub controls: Controls,
}

pub struct StepNavigator<D: Decor> {
    sections: usize,
    current: usize,
    decor: D,
}

impl<D: Decor> StepNavigator<D> {
    pub fn new(sections: usize, decor: D) -> Result<Self, NavigatorError> {
        if sections == 0 {
            return Err(NavigatorError::NoSections);
        }
        Ok(Self {
            sections,
            current: 0,
            decor,
        })
    }

    /// Show the first section. Also valid as a reset after [`teardown`](Self::teardown).
    pub fn init(&mut self) -> Transition {
        let from = self.current;
        self.current = 0;
        self.sync_decor(from);
        self.transition(from)
    }

    /// Stop anything still running, e.g. when the page unloads
    pub fn teardown(&mut self) {
        self.decor.stop();
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn section_count(&self) -> usize {
        self.sections
    }

    pub fn is_final(&self) -> bool {
        self.current == self.last()
    }

    pub fn decor(&self) -> &D {
        &self.decor
    }

    fn last(&self) -> usize {
        self.sections - 1
    }

    /// Move by `delta` sections, clamped to the valid range
    pub fn change_step(&mut self, delta: isize) -> Transition {
        let from = self.current;
        let target = (from as isize).saturating_add(delta);
        self.current = target.clamp(0, self.last() as isize) as usize;
        self.sync_decor(from);
        tracing::debug!("Step {} -> {}", from, self.current);
        self.transition(from)
    }

    pub fn restart(&mut self) -> Transition {
        self.change_step(-(self.current as isize))
    }

    /// Arrow keys move only when there is somewhere to go
    pub fn handle_key(&mut self, key: NavKey) -> Option<Transition> {
        match key {
            NavKey::ArrowRight if self.current < self.last() => Some(self.change_step(1)),
            NavKey::ArrowLeft if self.current > 0 => Some(self.change_step(-1)),
            _ => None,
        }
    }

    pub fn controls(&self) -> Controls {
        let last = self.last();
        Controls {
            show_prev: self.current != 0 && self.current != last,
            show_next: self.current != last,
            progress_percent: (self.current + 1) as f32 / self.sections as f32 * 100.0,
        }
    }

    fn sync_decor(&mut self, from: usize) {
        if self.is_final() {
            self.decor.start();
        } else if from == self.last() {
            self.decor.stop();
        }
    }

    fn transition(&self, from: usize) -> Transition {
        Transition {
            from,
            to: self.current,
            controls: self.controls(),
        }
    }
}
