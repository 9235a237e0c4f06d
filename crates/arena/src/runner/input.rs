//! Input plumbing between asynchronous input sources and the frame loop.
//!
//! The pointer is last-write-wins; boost presses are queued edges, folded
//! into a single activation attempt per tick.

use protocol::{FrameInput, Point};
use std::f64::consts::TAU;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::interval;

/// Producer side, held by whatever reads the pointer and keyboard.
#[derive(Debug, Clone)]
pub struct InputHandle {
    pointer: watch::Sender<Point>,
    boost: mpsc::UnboundedSender<()>,
}

impl InputHandle {
    /// Report the pointer offset from the viewport centre.
    pub fn set_pointer(&self, offset: Point) {
        self.pointer.send_replace(offset);
    }

    /// Report a boost key press.
    pub fn press_boost(&self) {
        let _ = self.boost.send(());
    }
}

/// Consumer side, owned by the frame loop.
#[derive(Debug)]
pub struct InputReceiver {
    pointer: watch::Receiver<Point>,
    boost: mpsc::UnboundedReceiver<()>,
}

impl InputReceiver {
    /// Input for the next tick, or `None` once the producer is gone.
    pub fn sample(&mut self) -> Option<FrameInput> {
        if self.pointer.has_changed().is_err() {
            return None;
        }
        let pointer_offset = *self.pointer.borrow_and_update();

        let mut boost = false;
        while self.boost.try_recv().is_ok() {
            boost = true;
        }
        Some(FrameInput::new(pointer_offset, boost))
    }
}

/// Create a connected input pair. The pointer starts straight up.
pub fn input_channel() -> (InputHandle, InputReceiver) {
    let (pointer_tx, pointer_rx) = watch::channel(Point::new(0.0, -1.0));
    let (boost_tx, boost_rx) = mpsc::unbounded_channel();
    (
        InputHandle {
            pointer: pointer_tx,
            boost: boost_tx,
        },
        InputReceiver {
            pointer: pointer_rx,
            boost: boost_rx,
        },
    )
}

/// Headless stand-in for a human: sweeps the pointer in a slow circle and
/// taps boost every few seconds.
pub fn spawn_autopilot(handle: InputHandle, tick_interval_ms: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let step_ms = tick_interval_ms.max(1);
        let mut ticker = interval(Duration::from_millis(step_ms));
        let mut elapsed_ms = 0u64;
        loop {
            ticker.tick().await;
            elapsed_ms += step_ms;

            // One full turn every 20 seconds.
            let angle = (elapsed_ms as f64 / 20_000.0) * TAU;
            handle.set_pointer(Point::new(angle.cos(), angle.sin()) * 200.0);

            if elapsed_ms % 12_000 < step_ms {
                handle.press_boost();
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_last_write_wins() {
        let (handle, mut rx) = input_channel();
        handle.set_pointer(Point::new(1.0, 0.0));
        handle.set_pointer(Point::new(0.0, 5.0));
        let input = rx.sample().unwrap();
        assert_eq!(input.pointer_offset, Point::new(0.0, 5.0));
        assert!(!input.boost);
    }

    #[test]
    fn test_boost_presses_fold_into_one_edge() {
        let (handle, mut rx) = input_channel();
        handle.press_boost();
        handle.press_boost();
        assert!(rx.sample().unwrap().boost);
        assert!(!rx.sample().unwrap().boost);
    }

    #[test]
    fn test_closed_source_stops_sampling() {
        let (handle, mut rx) = input_channel();
        drop(handle);
        assert!(rx.sample().is_none());
    }
}
