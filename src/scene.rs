//! Retained-mode paint pass: the dial is composed into a list of draw
//! commands from the current [`RenderState`], then rasterized. Composition
//! is pure, so the command stream is what the unit tests inspect.

use rusttype::Font;

use crate::dial::{RenderState, DIAL_RADIUS};
use crate::raster::{self, Canvas};
use crate::{ClockStyle, Color};

/// Pixel correction applied to numeral anchor points on both axes, to
/// compensate for text baseline and advance-width bias.
const LABEL_NUDGE: f32 = 4.0;

#[derive(Clone, Debug)]
pub enum DrawCommand {
    Clear(Color),
    /// Filled circle centered on the dial origin.
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
    },
    /// Axis-aligned rectangle `[x0, x1] x [y0, y1]`, rotated clockwise by
    /// `angle` degrees about the pivot. `corner > 0` rounds the corners
    /// (the hands use a full capsule, corner = half width).
    RotRect {
        cx: f32,
        cy: f32,
        x0: f32,
        x1: f32,
        y0: f32,
        y1: f32,
        angle: f32,
        corner: f32,
        color: Color,
    },
    /// Text centered on `(x, y)`.
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        color: Color,
    },
}

pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    /// Builds the full dial for one frame. Later commands draw on top of
    /// earlier ones; the order is load-bearing (hands over numerals, caps
    /// over hands).
    ///
    /// A state that has never been resized composes to just the background
    /// clear.
    pub fn compose(state: &RenderState, style: &ClockStyle) -> Self {
        let mut scene = Self {
            commands: Vec::with_capacity(81),
        };
        scene.push(DrawCommand::Clear(style.background_color));

        let Some((ox, oy)) = state.origin else {
            return scene;
        };
        let f = state.factor;

        // Second scale: a tick per mark, except every fifth position shows
        // the mark index as a zero-padded numeral.
        for i in 1..=60u32 {
            if i % 5 != 0 {
                scene.push(rotated_rect(
                    ox,
                    oy,
                    f,
                    3.0,
                    30.0,
                    i as f32 * 6.0,
                    DIAL_RADIUS,
                    true,
                    style.scale_color,
                ));
            } else {
                scene.push(numeral(
                    ox,
                    oy,
                    f,
                    format!("{i:02}"),
                    35.0,
                    285.0,
                    i,
                    6.0,
                    style.content_color,
                ));
            }
        }

        // Hour ring, unpadded.
        for i in 1..=12u32 {
            scene.push(numeral(
                ox,
                oy,
                f,
                i.to_string(),
                70.0,
                220.0,
                i,
                30.0,
                style.content_color,
            ));
        }

        // Large cap under the hands.
        scene.push(circle(ox, oy, f, 9.0, style.content_color));

        // Hour hand: hub plus rounded body offset toward the rim.
        scene.push(rotated_rect(
            ox, oy, f, 4.0, 40.0, state.angle_hour, 0.0, false, style.content_color,
        ));
        scene.push(rotated_rect(
            ox, oy, f, 16.0, 130.0, state.angle_hour, -40.0, true, style.content_color,
        ));

        // Minute hand, longer body.
        scene.push(rotated_rect(
            ox, oy, f, 4.0, 40.0, state.angle_minute, 0.0, false, style.content_color,
        ));
        scene.push(rotated_rect(
            ox, oy, f, 16.0, 210.0, state.angle_minute, -40.0, true, style.content_color,
        ));

        // Medium cap, then the second hand spanning almost the full dial
        // with a short tail past the origin.
        scene.push(circle(ox, oy, f, 6.0, style.second_hand_color));
        scene.push(rotated_rect(
            ox,
            oy,
            f,
            4.0,
            DIAL_RADIUS + 43.0,
            state.angle_second,
            40.0,
            true,
            style.second_hand_color,
        ));

        // Innermost cap punches through the hand hubs.
        scene.push(circle(ox, oy, f, 3.0, style.background_color));

        scene
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Executes the command list against a framebuffer. A zero-sized canvas
    /// is a no-op.
    pub fn rasterize(&self, canvas: &mut Canvas, font: &Font) {
        if canvas.is_empty() {
            return;
        }
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Circle {
                    cx,
                    cy,
                    radius,
                    color,
                } => raster::fill_circle(canvas, *cx, *cy, *radius, *color),
                DrawCommand::RotRect {
                    cx,
                    cy,
                    x0,
                    x1,
                    y0,
                    y1,
                    angle,
                    corner,
                    color,
                } => raster::fill_rotated_rect(
                    canvas, *cx, *cy, *x0, *x1, *y0, *y1, *angle, *corner, *color,
                ),
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    size,
                    color,
                } => raster::draw_text(canvas, *x, *y, text, font, *size, *color),
            }
        }
    }
}

/// A rectangle `width` x `height` design units, horizontally centered on the
/// origin with its top edge `delta_y` design units below it, rotated
/// clockwise by `angle` degrees about the origin.
///
/// Hands use a negative `delta_y` (body above the origin, swept by the
/// angle); ticks sit a full `DIAL_RADIUS` out.
#[allow(clippy::too_many_arguments)]
fn rotated_rect(
    ox: f32,
    oy: f32,
    f: f32,
    width: f32,
    height: f32,
    angle: f32,
    delta_y: f32,
    rounded: bool,
    color: Color,
) -> DrawCommand {
    let w = width * f;
    let h = height * f;
    let half = w / 2.0;
    let top = oy + half + delta_y * f;
    DrawCommand::RotRect {
        cx: ox,
        cy: oy,
        x0: ox - half,
        x1: ox + half,
        y0: top - h,
        y1: top,
        angle,
        corner: if rounded { half } else { 0.0 },
        color,
    }
}

fn circle(ox: f32, oy: f32, f: f32, radius: f32, color: Color) -> DrawCommand {
    DrawCommand::Circle {
        cx: ox,
        cy: oy,
        radius: radius * f,
        color,
    }
}

/// Places `text` centered at angular position `index * angle_unit` degrees
/// (12 o'clock = 0, clockwise) on a ring of `radius` design units.
#[allow(clippy::too_many_arguments)]
fn numeral(
    ox: f32,
    oy: f32,
    f: f32,
    text: String,
    size: f32,
    radius: f32,
    index: u32,
    angle_unit: f32,
    color: Color,
) -> DrawCommand {
    let radians = (index as f32 * angle_unit).to_radians();
    let r = radius * f;
    DrawCommand::Text {
        x: ox + r * radians.sin() - LABEL_NUDGE,
        y: oy - r * radians.cos() - LABEL_NUDGE,
        text,
        size: size * f,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dial::WallTime;

    fn ready_state() -> RenderState {
        let mut state = RenderState::new();
        state.resize(
            400,
            400,
            WallTime {
                hours: 1,
                minutes: 0,
                seconds: 30,
                millis: 0,
            },
        );
        state
    }

    fn texts(scene: &Scene) -> Vec<&str> {
        scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn unsized_state_composes_only_the_clear() {
        let scene = Scene::compose(&RenderState::new(), &ClockStyle::builder().build());
        assert_eq!(scene.commands().len(), 1);
        assert!(matches!(scene.commands()[0], DrawCommand::Clear(_)));
    }

    #[test]
    fn full_dial_command_census() {
        let style = ClockStyle::builder().build();
        let scene = Scene::compose(&ready_state(), &style);

        let mut clears = 0;
        let mut circles = 0;
        let mut rects = 0;
        let mut labels = 0;
        for command in scene.commands() {
            match command {
                DrawCommand::Clear(_) => clears += 1,
                DrawCommand::Circle { .. } => circles += 1,
                DrawCommand::RotRect { .. } => rects += 1,
                DrawCommand::Text { .. } => labels += 1,
            }
        }
        // 48 ticks + 5 hand pieces; 12 scale numerals + 12 hour numerals.
        assert_eq!(clears, 1);
        assert_eq!(rects, 53);
        assert_eq!(labels, 24);
        assert_eq!(circles, 3);

        assert!(matches!(scene.commands()[0], DrawCommand::Clear(_)));
        // The innermost cap is last and wears the background color.
        match scene.commands().last() {
            Some(DrawCommand::Circle { color, .. }) => {
                assert_eq!(*color, style.background_color)
            }
            other => panic!("unexpected final command {other:?}"),
        }
    }

    #[test]
    fn scale_numerals_are_zero_padded_and_hour_numerals_are_not() {
        let scene = Scene::compose(&ready_state(), &ClockStyle::builder().build());
        let texts = texts(&scene);

        let scale = &texts[..12];
        assert_eq!(scale[0], "05");
        assert_eq!(scale[11], "60");

        let hours = &texts[12..];
        assert_eq!(hours[0], "1");
        assert_eq!(hours[4], "5");
        assert_eq!(hours[11], "12");
    }

    #[test]
    fn numerals_sit_on_their_rings() {
        let state = ready_state();
        let (ox, oy) = state.origin.unwrap();
        let f = state.factor;
        let scene = Scene::compose(&state, &ClockStyle::builder().build());

        // Hour numeral 3 lies due east of the origin: 3 * 30deg.
        let three = scene
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { x, y, text, .. } if text == "3" => Some((*x, *y)),
                _ => None,
            })
            .expect("hour numeral 3");
        assert!((three.0 - (ox + 220.0 * f - LABEL_NUDGE)).abs() < 1e-3);
        assert!((three.1 - (oy - LABEL_NUDGE)).abs() < 1e-3);
    }

    #[test]
    fn hands_follow_the_state_angles() {
        let state = ready_state(); // 01:00:30
        let scene = Scene::compose(&state, &ClockStyle::builder().build());
        let angles: Vec<f32> = scene
            .commands()
            .iter()
            .skip(61) // clear + 60 scale positions
            .filter_map(|c| match c {
                DrawCommand::RotRect { angle, .. } => Some(*angle),
                _ => None,
            })
            .collect();
        // hub + body per hand, then the second hand.
        assert_eq!(angles.len(), 5);
        assert_eq!(angles[0], state.angle_hour);
        assert_eq!(angles[1], state.angle_hour);
        assert_eq!(angles[2], state.angle_minute);
        assert_eq!(angles[3], state.angle_minute);
        assert_eq!(angles[4], 180.0);
    }
}
