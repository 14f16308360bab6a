//! Body scroll lock bookkeeping

/// Remembers the inline `overflow` in force before the menu locked scrolling.
#[derive(Debug, Default)]
pub struct OverflowLock {
    saved: Option<String>,
}

impl OverflowLock {
    /// Value to write on lock. Only the first lock records `current`, so a
    /// repeated lock cannot save `hidden` as the value to restore.
    pub fn lock(&mut self, current: impl FnOnce() -> String) -> &'static str {
        if self.saved.is_none() {
            self.saved = Some(current());
        }
        "hidden"
    }

    /// Value to write on unlock: whatever was saved, else the empty inline value.
    pub fn unlock(&mut self) -> String {
        self.saved.take().unwrap_or_default()
    }
}
