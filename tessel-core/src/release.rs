//! Release of resources that must be freed on the UI thread.
//!
//! Call [mark_ui_thread] once from the thread that drives the widgets, and [drain_release_queue]
//! from that thread's event loop. A [UiOwned] value dropped on the UI thread releases inline;
//! dropped anywhere else, its release is queued until the next drain.

use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::sync::{LazyLock, Mutex, OnceLock};
use std::thread::{self, ThreadId};

type Release = Box<dyn FnOnce() + Send>;

static UI_THREAD: OnceLock<ThreadId> = OnceLock::new();
static RELEASE_QUEUE: LazyLock<Mutex<Vec<Release>>> = LazyLock::new(|| Mutex::new(Vec::new()));

/// Record the calling thread as the UI thread. Later calls from other threads are ignored.
pub fn mark_ui_thread() {
    let current = thread::current().id();
    let marked = *UI_THREAD.get_or_init(|| current);
    if marked != current {
        log::warn!("UI thread already marked as {:?}; ignoring {:?}", marked, current);
    }
}

/// Whether the calling thread is the UI thread. False until [mark_ui_thread] has run.
pub fn is_ui_thread() -> bool {
    UI_THREAD.get() == Some(&thread::current().id())
}

/// Run `release` now if on the UI thread, otherwise queue it for [drain_release_queue].
pub fn release_on_ui_thread(release: impl FnOnce() + Send + 'static) {
    if is_ui_thread() {
        release();
        return;
    }
    log::debug!("Deferring release to the UI thread");
    match RELEASE_QUEUE.lock() {
        Ok(mut queue) => queue.push(Box::new(release)),
        Err(poisoned) => poisoned.into_inner().push(Box::new(release)),
    }
}

/// Run every queued release. Returns how many ran.
pub fn drain_release_queue() -> usize {
    let pending: Vec<Release> = match RELEASE_QUEUE.lock() {
        Ok(mut queue) => std::mem::take(&mut *queue),
        Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
    };
    let count = pending.len();
    for release in pending {
        release();
    }
    count
}

/// Exclusive owner of a value whose cleanup must run on the UI thread.
///
/// `release` consumes the value. Call [UiOwned::release_now] to release at a known point;
/// otherwise dropping does it.
pub struct UiOwned<T: Send + 'static> {
    value: ManuallyDrop<T>,
    release: Option<fn(T)>,
}

impl<T: Send + 'static> UiOwned<T> {
    /// Wrap `value`, to be finished by `release`.
    pub fn new(value: T, release: fn(T)) -> Self {
        Self {
            value: ManuallyDrop::new(value),
            release: Some(release),
        }
    }

    /// Release immediately, on this thread if it is the UI thread.
    pub fn release_now(self) {
        drop(self);
    }
}

impl<T: Send + 'static> Deref for UiOwned<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Send + 'static> DerefMut for UiOwned<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Send + 'static> Drop for UiOwned<T> {
    fn drop(&mut self) {
        // SAFETY: the value is taken exactly once, here, and never touched again.
        let value = unsafe { ManuallyDrop::take(&mut self.value) };
        match self.release.take() {
            Some(release) => release_on_ui_thread(move || release(value)),
            None => drop(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static RELEASED: AtomicUsize = AtomicUsize::new(0);

    fn count_release(_value: u32) {
        RELEASED.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn test_off_thread_drop_is_deferred() {
        let owned = UiOwned::new(7u32, count_release);
        assert_eq!(*owned, 7);

        let before = RELEASED.load(Ordering::SeqCst);
        thread::spawn(move || drop(owned)).join().unwrap();
        assert_eq!(RELEASED.load(Ordering::SeqCst), before);
        drain_release_queue();
        assert!(RELEASED.load(Ordering::SeqCst) > before);
    }
}
