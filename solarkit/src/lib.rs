pub extern crate nalgebra as na;

pub mod animation;
pub mod body;
pub mod propagator;
pub mod render;
pub mod scenario;
pub mod spinograph;
pub mod system;
pub mod units;

/// The display-sink seam: whatever consumes frames in time order — a
/// plotting backend, an image encoder, a test collector — implements this.
/// The core never assumes a specific rendering backend.
pub trait FrameSink {
    fn accept_frame(&mut self, frame: &render::Frame);
}

impl<F: FnMut(&render::Frame)> FrameSink for F {
    fn accept_frame(&mut self, frame: &render::Frame) {
        self(frame)
    }
}
