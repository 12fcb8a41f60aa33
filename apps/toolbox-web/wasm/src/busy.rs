//! One operation in flight per tool

use std::cell::Cell;

#[derive(Debug, Default)]
pub struct BusyFlag(Cell<bool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.get()
    }

    /// Mark busy until the returned guard drops. `None` if already busy.
    pub fn begin(&self) -> Option<BusyGuard<'_>> {
        if self.0.replace(true) {
            return None;
        }
        Some(BusyGuard(&self.0))
    }
}

pub struct BusyGuard<'a>(&'a Cell<bool>);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
