use std::time::Duration;

pub const WINDOW_WIDTH: i32 = 960;            // Initial window width
pub const WINDOW_HEIGHT: i32 = 720;           // Initial window height
pub const FPS: u32 = 60;                      // Frames per second

pub const FLICKER_STEPS: usize = 15;                              // Random images shown before each draw
pub const FLICKER_INTERVAL: Duration = Duration::from_millis(100); // Pause between flicker images

pub const DEFAULT_IMAGE_DIR: &str = "images"; // Looked up relative to the working directory

pub const BUTTON_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 48.0;
pub const BUTTON_MARGIN: f32 = 16.0;          // Gap around the start button
pub const IMAGE_FILL: f32 = 0.95;             // Fraction of the image area an image may occupy
