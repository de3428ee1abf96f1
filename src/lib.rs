//! A windowed analog clock face.
//!
//! [`ClockFace`] opens a `winit` window, samples the local wall clock once
//! per second on a background ticker thread, and repaints the whole dial
//! (ticks, numerals, three hands, center caps) into a `pixels` framebuffer
//! on every redraw. Appearance is configured once up front through
//! [`ClockStyle`].
//!
//! ```no_run
//! use clockface::{ClockFace, ClockStyle, Color};
//!
//! let style = ClockStyle::builder()
//!     .second_hand_color(Color::new(0xff, 0x80, 0x00))
//!     .build();
//! ClockFace::new(style).run().unwrap();
//! ```

use bon::Builder;
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub mod dial;
pub mod raster;
pub mod scene;

pub use dial::{RenderState, WallTime, DIAL_MARGIN, DIAL_RADIUS};
pub use raster::Canvas;
pub use scene::{DrawCommand, Scene};

/// Color of a dial element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const GRAY: Color = Color::new(0x88, 0x88, 0x88);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = String;

    /// Parses `rrggbb` or `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 {
            return Err(format!("expected a rrggbb hex color, got {s:?}"));
        }
        let value =
            u32::from_str_radix(hex, 16).map_err(|e| format!("invalid hex color {s:?}: {e}"))?;
        Ok(Self::new((value >> 16) as u8, (value >> 8) as u8, value as u8))
    }
}

/// Appearance and window options, fixed at construction.
#[derive(Debug, Clone, Builder)]
pub struct ClockStyle {
    #[builder(default = "clock".to_string())]
    pub title: String,
    #[builder(default = 400)]
    pub window_width: u32,
    #[builder(default = 400)]
    pub window_height: u32,
    /// How often the hands advance.
    #[builder(default = Duration::from_secs(1))]
    pub tick_period: Duration,

    #[builder(default = Color::RED)]
    pub second_hand_color: Color,
    /// Hands, caps, and numerals.
    #[builder(default = Color::WHITE)]
    pub content_color: Color,
    /// The small ticks between numerals.
    #[builder(default = Color::GRAY)]
    pub scale_color: Color,
    #[builder(default = Color::BLACK)]
    pub background_color: Color,

    #[builder(default = include_bytes!("DejaVuSans.ttf"))]
    pub font_data: &'static [u8],
}

impl Default for ClockStyle {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The clock widget. Owns its style; all mutable state lives in a
/// [`RenderState`] shared between the ticker thread and the event loop.
pub struct ClockFace {
    style: ClockStyle,
}

impl ClockFace {
    pub fn new(style: ClockStyle) -> Self {
        Self { style }
    }

    /// Opens the window and runs until it is closed.
    ///
    /// The once-per-`tick_period` ticker thread only mutates the shared
    /// state and requests a redraw; all drawing happens on the event loop.
    /// The ticker is stopped and joined before this returns.
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let style = self.style;
        let font =
            Font::try_from_vec(style.font_data.to_vec()).ok_or("font data failed to parse")?;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&style.title)
            .with_inner_size(LogicalSize::new(
                style.window_width as f64,
                style.window_height as f64,
            ))
            .build(&event_loop)?;
        let window = Arc::new(window);

        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let state = Arc::new(Mutex::new(RenderState::new()));
        if size.width > 0 && size.height > 0 {
            state
                .lock()
                .unwrap()
                .resize(size.width, size.height, WallTime::now());
        }
        log::info!(
            "clock window open: {}x{}, tick every {:?}",
            size.width,
            size.height,
            style.tick_period
        );

        // The ticker owns no drawing: it advances the hands and asks the
        // event loop to repaint.
        let running = Arc::new(AtomicBool::new(true));
        let ticker = {
            let running = running.clone();
            let state = state.clone();
            let window = window.clone();
            let period = style.tick_period;
            thread::spawn(move || {
                while running.load(Ordering::Relaxed) {
                    thread::sleep(period);
                    if !running.load(Ordering::Relaxed) {
                        break;
                    }
                    state.lock().unwrap().update_time();
                    window.request_redraw();
                }
                log::debug!("ticker stopped");
            })
        };

        let loop_running = running.clone();
        let loop_state = state.clone();
        let loop_window = window.clone();
        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Wait);
            if let Event::WindowEvent { event, .. } = event {
                match event {
                    WindowEvent::CloseRequested => {
                        loop_running.store(false, Ordering::Relaxed);
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if new_size.width == 0 || new_size.height == 0 {
                            log::debug!("ignoring zero-sized resize");
                        } else {
                            fb_width = new_size.width as usize;
                            fb_height = new_size.height as usize;
                            let _ = pixels.resize_buffer(new_size.width, new_size.height);
                            let _ = pixels.resize_surface(new_size.width, new_size.height);
                            loop_state.lock().unwrap().resize(
                                new_size.width,
                                new_size.height,
                                WallTime::now(),
                            );
                            log::debug!("dial refit to {}x{}", new_size.width, new_size.height);
                            loop_window.request_redraw();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        // Copy out a consistent snapshot; never rasterize
                        // while holding the lock.
                        let snapshot = *loop_state.lock().unwrap();
                        if snapshot.ready() && fb_width > 0 && fb_height > 0 {
                            let mut canvas =
                                Canvas::new(pixels.frame_mut(), fb_width, fb_height);
                            Scene::compose(&snapshot, &style).rasterize(&mut canvas, &font);
                            if let Err(err) = pixels.render() {
                                log::error!("present failed: {err}");
                                loop_running.store(false, Ordering::Relaxed);
                                window_target.exit();
                            }
                        }
                    }
                    _ => {}
                }
            }
        })?;

        running.store(false, Ordering::Relaxed);
        let _ = ticker.join();
        log::info!("clock window closed");
        Ok(())
    }
}
