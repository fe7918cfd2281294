use std::cell::Cell;

/// Something that lays itself out again when its container changes size.
pub trait Resizable {
    fn notify_resize(&mut self);
}

/// Passes container resizes on to the active page.
///
/// Notifying a page may cause it to report another resize while the first one
/// is still being handled. Such nested calls are dropped.
#[derive(Debug, Default)]
pub struct ResizeCoordinator {
    resizing: Cell<bool>,
    passes: Cell<u64>,
}

/// Clears the in-progress flag when the child notification returns, or unwinds.
struct ResizingGuard<'a>(&'a Cell<bool>);

impl Drop for ResizingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl ResizeCoordinator {
    /// Notify `active` that it must lay itself out again, then call `restyle`.
    ///
    /// Returns `false` without doing anything if a resize is already in progress.
    pub fn handle_resize(&self, active: &mut dyn Resizable, restyle: impl FnOnce()) -> bool {
        if self.resizing.replace(true) {
            log::debug!("Dropped re-entrant resize");
            return false;
        }

        {
            let _guard = ResizingGuard(&self.resizing);
            log::trace!("Resize pass {}", self.passes.get() + 1);
            active.notify_resize();
        }
        self.passes.set(self.passes.get() + 1);

        restyle();
        true
    }

    /// Is a resize being handled right now?
    #[inline]
    pub fn is_resizing(&self) -> bool {
        self.resizing.get()
    }

    /// How many resize passes have completed.
    #[inline]
    pub fn passes(&self) -> u64 {
        self.passes.get()
    }
}
