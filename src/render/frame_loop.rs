use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::error::Result;
use crate::render::scene::Scene;
use crate::render::Surface;

/// Polled once per frame; `true` ends the loop.
pub trait CloseSignal {
    fn should_close(&self) -> Result<bool>;
}

impl CloseSignal for AtomicBool {
    fn should_close(&self) -> Result<bool> {
        Ok(self.load(Ordering::Relaxed))
    }
}

/// Presents a scene at a fixed frame rate until the close signal fires or the
/// optional frame budget is spent.
#[derive(Debug, Clone, Copy)]
pub struct FrameLoop {
    period: Duration,
    max_frames: Option<u64>,
}

impl FrameLoop {
    /// `fps` of zero is clamped to one.
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / fps.max(1),
            max_frames: None,
        }
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns the number of frames presented.
    ///
    /// The close signal is polled once per frame, before drawing.
    pub fn run<S, C>(&self, surface: &mut S, scene: &Scene, close: &C) -> Result<u64>
    where
        S: Surface,
        C: CloseSignal + ?Sized,
    {
        let mut frame: u64 = 0;
        let mut deadline = Instant::now();
        while !close.should_close()? {
            if self.max_frames.is_some_and(|max| frame >= max) {
                break;
            }
            surface.present(scene, frame)?;
            trace!(frame, "frame presented");
            frame += 1;

            deadline += self.period;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                // Fell behind; don't try to catch up with a burst.
                deadline = now;
            }
        }
        debug!(frames = frame, "frame loop stopped");
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::CanvasConfig;
    use crate::count::MoveCounter;
    use crate::keypad::graph::MoveGraph;
    use crate::keypad::layout::KeypadLayout;

    struct Recording {
        frames: Vec<u64>,
        close_after: Option<(u64, Arc<AtomicBool>)>,
    }

    impl Surface for Recording {
        fn present(&mut self, _scene: &Scene, frame: u64) -> Result<()> {
            self.frames.push(frame);
            if let Some((n, flag)) = &self.close_after {
                if self.frames.len() as u64 >= *n {
                    flag.store(true, Ordering::Relaxed);
                }
            }
            Ok(())
        }
    }

    fn scene() -> Scene {
        let graph = MoveGraph::standard();
        let report = MoveCounter::new(graph).report(2).unwrap();
        Scene::build(&KeypadLayout::phone(), graph, &report, CanvasConfig::default())
    }

    #[test]
    fn stops_after_frame_budget() {
        let mut s = Recording {
            frames: Vec::new(),
            close_after: None,
        };
        let close = AtomicBool::new(false);
        let n = FrameLoop::new(1000)
            .with_max_frames(Some(3))
            .run(&mut s, &scene(), &close)
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(s.frames, vec![0, 1, 2]);
    }

    #[test]
    fn stops_when_closed() {
        let close = Arc::new(AtomicBool::new(false));
        let mut s = Recording {
            frames: Vec::new(),
            close_after: Some((2, Arc::clone(&close))),
        };
        let n = FrameLoop::new(1000).run(&mut s, &scene(), &*close).unwrap();
        assert_eq!(n, 2);
    }

    #[test]
    fn closed_before_start_draws_nothing() {
        let mut s = Recording {
            frames: Vec::new(),
            close_after: None,
        };
        let close = AtomicBool::new(true);
        assert_eq!(FrameLoop::new(60).run(&mut s, &scene(), &close).unwrap(), 0);
        assert!(s.frames.is_empty());
    }

    #[test]
    fn period_matches_fps() {
        assert_eq!(FrameLoop::new(50).period(), Duration::from_millis(20));
        assert_eq!(FrameLoop::new(0).period(), Duration::from_secs(1));
    }
}
