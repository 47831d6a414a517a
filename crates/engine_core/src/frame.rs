//! Per-frame callback scheduling.
//!
//! Everything here runs on the render thread: callbacks are invoked
//! synchronously, in registration order, once per presented frame. A callback
//! that is unregistered is dropped immediately and never runs again.

use std::fmt;

/// Snapshot of the clock handed to every frame callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Seconds since the scene was mounted, as reported by the host.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Zero-based index of this frame.
    pub frame: u64,
}

/// Opaque token returned by [`FrameScheduler::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

type FrameCallback = Box<dyn FnMut(&FrameTick)>;

/// Registry of per-frame callbacks driven by the host render loop.
#[derive(Default)]
pub struct FrameScheduler {
    callbacks: Vec<(FrameHandle, FrameCallback)>,
    next_id: u64,
    frame: u64,
    last_elapsed: Option<f32>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `callback` to every subsequent tick.
    pub fn register<F>(&mut self, callback: F) -> FrameHandle
    where
        F: FnMut(&FrameTick) + 'static,
    {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.callbacks.push((handle, Box::new(callback)));
        log::trace!("registered frame callback {:?}", handle);
        handle
    }

    /// Drop the callback behind `handle`. Returns false if it was already gone.
    pub fn unregister(&mut self, handle: FrameHandle) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(h, _)| *h != handle);
        let removed = self.callbacks.len() != before;
        if removed {
            log::trace!("unregistered frame callback {:?}", handle);
        }
        removed
    }

    /// Whether `handle` is still subscribed.
    pub fn is_registered(&self, handle: FrameHandle) -> bool {
        self.callbacks.iter().any(|(h, _)| *h == handle)
    }

    /// Number of live callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Run every live callback for the frame presented at `elapsed` seconds.
    pub fn tick(&mut self, elapsed: f32) {
        let delta = self
            .last_elapsed
            .map(|last| (elapsed - last).max(0.0))
            .unwrap_or(0.0);
        let tick = FrameTick {
            elapsed,
            delta,
            frame: self.frame,
        };
        for (_, callback) in &mut self.callbacks {
            callback(&tick);
        }
        self.last_elapsed = Some(elapsed);
        self.frame += 1;
    }

    /// Frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("callbacks", &self.callbacks.len())
            .field("next_id", &self.next_id)
            .field("frame", &self.frame)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn callbacks_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = FrameScheduler::new();
        let a = log.clone();
        scheduler.register(move |_| a.borrow_mut().push("a"));
        let b = log.clone();
        scheduler.register(move |_| b.borrow_mut().push("b"));

        scheduler.tick(0.0);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn unregister_stops_invocation() {
        let hits = Rc::new(RefCell::new(0));
        let mut scheduler = FrameScheduler::new();
        let h = hits.clone();
        let handle = scheduler.register(move |_| *h.borrow_mut() += 1);

        scheduler.tick(0.0);
        assert!(scheduler.unregister(handle));
        assert!(!scheduler.unregister(handle));
        scheduler.tick(0.016);

        assert_eq!(*hits.borrow(), 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn tick_reports_delta_and_frame_index() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = FrameScheduler::new();
        let s = seen.clone();
        scheduler.register(move |tick| s.borrow_mut().push(*tick));

        scheduler.tick(1.0);
        scheduler.tick(1.5);

        let seen = seen.borrow();
        assert_eq!(seen[0].delta, 0.0);
        assert_eq!(seen[1].frame, 1);
        assert!((seen[1].delta - 0.5).abs() < 1e-6);
        assert_eq!(scheduler.frame_count(), 2);
    }
}
