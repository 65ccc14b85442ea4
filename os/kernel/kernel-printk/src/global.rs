//! # Global Console
//!
//! A `static` home for the kernel's output pipeline. Access is try-only:
//! a second caller arriving while the console is in use (an interrupt
//! handler logging over an in-progress `printk`, say) is turned away
//! instead of spinning on a lock its own CPU holds.

#![allow(unsafe_code)]

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::arg::Arg;
use crate::printk::{LineSink, printk_with_level};

pub struct Console<T> {
    busy: AtomicBool,
    inner: UnsafeCell<Option<T>>,
}

// SAFETY: `busy` grants exclusive access to `inner`; only one `&mut T`
// exists at a time.
unsafe impl<T: Send> Sync for Console<T> {}

/// Releases the console when dropped, including during unwinding.
struct Claim<'a>(&'a AtomicBool);

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T> Console<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
            inner: UnsafeCell::new(None),
        }
    }

    fn claim(&self) -> Option<Claim<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Claim(&self.busy))
    }

    /// Install `value`, returning the previous one.
    ///
    /// # Errors
    /// Hands `value` back if the console is in use.
    pub fn install(&self, value: T) -> Result<Option<T>, T> {
        let Some(_claim) = self.claim() else {
            return Err(value);
        };
        // SAFETY: the claim gives us exclusive access.
        let slot = unsafe { &mut *self.inner.get() };
        Ok(slot.replace(value))
    }

    /// Remove and return the installed value.
    pub fn take(&self) -> Option<T> {
        let _claim = self.claim()?;
        // SAFETY: the claim gives us exclusive access.
        unsafe { &mut *self.inner.get() }.take()
    }

    /// Run `f` on the installed value.
    ///
    /// Returns `None` if nothing is installed or the console is already in
    /// use further up the stack.
    pub fn try_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let _claim = self.claim()?;
        // SAFETY: the claim gives us exclusive access.
        let value = unsafe { &mut *self.inner.get() }.as_mut()?;
        Some(f(value))
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Relaxed)
    }
}

impl<T: LineSink> Console<T> {
    /// `printk` through the installed sink; returns 0 if unavailable.
    pub fn printk(&self, level: u32, fmt: &str, args: &[Arg<'_>]) -> usize {
        self.try_with(|out| printk_with_level(out, level, fmt, args))
            .unwrap_or(0)
    }
}

impl<T> Default for Console<T> {
    fn default() -> Self {
        Self::new()
    }
}
