use std::cell::Cell;
use std::rc::Rc;

/// Run flag shared between the animation-frame callback and its owners.
///
/// Stopping clears the flag; the next callback sees it and does not
/// reschedule. Clones observe the same flag.
#[derive(Clone, Debug)]
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            running: Rc::new(Cell::new(true)),
        }
    }

    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// `pagehide` handling. A page kept in the back/forward cache
    /// (`persisted`) resumes its pending frames when restored, so only a
    /// real unload stops the loop.
    pub fn on_page_hide(&self, persisted: bool) {
        if !persisted {
            self.stop();
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
