//! Cancellable `requestAnimationFrame` loop.
//!
//! Each callback schedules its successor. The handle owns the closure and the
//! pending request id; `cancel` (or dropping the handle) revokes the pending
//! request and stops rescheduling, so a detached element leaves no loop behind.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Closure<dyn FnMut(f64)>;

struct LoopShared {
    cancelled: Cell<bool>,
    request_id: Cell<Option<i32>>,
    callback: RefCell<Option<FrameCallback>>,
}

impl LoopShared {
    fn schedule(&self) -> Result<(), String> {
        if self.cancelled.get() {
            return Ok(());
        }
        let window = web_sys::window().ok_or("no window")?;
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Ok(());
        };
        let id = window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| format!("requestAnimationFrame failed: {:?}", e))?;
        self.request_id.set(Some(id));
        Ok(())
    }
}

pub struct AnimationLoop {
    shared: Rc<LoopShared>,
}

impl AnimationLoop {
    /// Start calling `step(timestamp_ms)` once per display refresh until it
    /// returns `false` or the loop is cancelled.
    pub fn start<F>(mut step: F) -> Result<Self, String>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let shared = Rc::new(LoopShared {
            cancelled: Cell::new(false),
            request_id: Cell::new(None),
            callback: RefCell::new(None),
        });

        let weak: Weak<LoopShared> = Rc::downgrade(&shared);
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            shared.request_id.set(None);
            if shared.cancelled.get() {
                return;
            }
            if step(timestamp) {
                if let Err(e) = shared.schedule() {
                    log::error!("animation loop stopped: {}", e);
                }
            }
        }) as Box<dyn FnMut(f64)>);

        *shared.callback.borrow_mut() = Some(callback);
        shared.schedule()?;
        Ok(AnimationLoop { shared })
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.get()
    }

    /// Revoke the pending frame and stop rescheduling. Idempotent.
    pub fn cancel(&self) {
        if self.shared.cancelled.replace(true) {
            return;
        }
        if let Some(id) = self.shared.request_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        log::debug!("animation loop cancelled");
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.cancel();
        // Not running inside the callback here, so dropping the closure is safe.
        self.shared.callback.borrow_mut().take();
    }
}
