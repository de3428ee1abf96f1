//! Hand angles and dial geometry.

use chrono::{Local, Timelike};

/// Radius of the dial in design units. Everything drawn on the face is
/// measured against this and scaled by [`RenderState::factor`].
pub const DIAL_RADIUS: f32 = 300.0;

/// Breathing room between the dial rim and the window edge, in design units.
pub const DIAL_MARGIN: f32 = 20.0;

/// A local time-of-day sample on the 12-hour dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    /// Hour on the dial, 0..=11.
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub millis: i64,
}

impl WallTime {
    /// Samples the local wall clock.
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            hours: (now.hour() % 12) as i64,
            minutes: now.minute() as i64,
            seconds: now.second() as i64,
            millis: (now.nanosecond() / 1_000_000) as i64,
        }
    }
}

/// Everything the paint pass reads: the uniform scale factor, the pixel
/// center of the dial, and the three hand angles in degrees, [0, 360).
///
/// `origin` is `None` until the first [`resize`](Self::resize); composing a
/// scene before then yields only the background clear.
#[derive(Debug, Clone, Copy)]
pub struct RenderState {
    pub factor: f32,
    pub origin: Option<(f32, f32)>,
    pub angle_hour: f32,
    pub angle_minute: f32,
    pub angle_second: f32,
}

impl RenderState {
    pub fn new() -> Self {
        Self {
            factor: 0.0,
            origin: None,
            angle_hour: 0.0,
            angle_minute: 0.0,
            angle_second: 0.0,
        }
    }

    /// True once the state has seen a resize and may be painted.
    pub fn ready(&self) -> bool {
        self.origin.is_some() && self.factor > 0.0
    }

    /// Samples the wall clock and updates the hand angles.
    pub fn update_time(&mut self) {
        self.set_wall_time(WallTime::now());
    }

    /// Recomputes the three hand angles from a time sample.
    ///
    /// All divisions are integer, so the hand positions advance in whole
    /// degrees. The millisecond ratio floors to zero for any millis < 1000.
    pub fn set_wall_time(&mut self, t: WallTime) {
        let seconds_today =
            t.hours * 3600 + t.minutes * 60 + t.seconds + t.millis / 1000;

        self.angle_hour = (seconds_today / 120 % 360) as f32;
        self.angle_minute = (seconds_today / 10 % 360) as f32;
        self.angle_second = (seconds_today * 6 % 360) as f32;
    }

    /// Refits the dial to a surface of `width` x `height` pixels and
    /// refreshes the angles so the next paint is not stale.
    ///
    /// Callers must filter out zero-sized surfaces.
    pub fn resize(&mut self, width: u32, height: u32, t: WallTime) {
        self.factor = width.min(height) as f32 / 2.0 / (DIAL_RADIUS + DIAL_MARGIN);
        self.origin = Some((width as f32 / 2.0, height as f32 / 2.0));
        self.set_wall_time(t);
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hours: i64, minutes: i64, seconds: i64, millis: i64) -> RenderState {
        let mut state = RenderState::new();
        state.set_wall_time(WallTime {
            hours,
            minutes,
            seconds,
            millis,
        });
        state
    }

    #[test]
    fn midnight_points_straight_up() {
        let state = at(0, 0, 0, 0);
        assert_eq!(state.angle_hour, 0.0);
        assert_eq!(state.angle_minute, 0.0);
        assert_eq!(state.angle_second, 0.0);
    }

    #[test]
    fn one_oclock() {
        let state = at(1, 0, 0, 0);
        assert_eq!(state.angle_hour, 30.0);
        assert_eq!(state.angle_minute, 0.0);
        assert_eq!(state.angle_second, 0.0);
    }

    #[test]
    fn half_past_the_minute_flips_the_second_hand() {
        let state = at(1, 0, 30, 0);
        assert_eq!(state.angle_second, 180.0);
    }

    #[test]
    fn angles_stay_on_the_circle_all_day() {
        let mut state = RenderState::new();
        for h in 0..24 {
            for m in 0..60 {
                for s in [0, 1, 29, 30, 59] {
                    state.set_wall_time(WallTime {
                        hours: h % 12,
                        minutes: m,
                        seconds: s,
                        millis: 0,
                    });
                    for angle in [state.angle_hour, state.angle_minute, state.angle_second] {
                        assert!((0.0..360.0).contains(&angle), "angle {angle} at {h}:{m}:{s}");
                    }
                }
            }
        }
    }

    #[test]
    fn milliseconds_never_move_a_hand() {
        let base = at(10, 42, 17, 0);
        let late = at(10, 42, 17, 999);
        assert_eq!(base.angle_hour, late.angle_hour);
        assert_eq!(base.angle_minute, late.angle_minute);
        assert_eq!(base.angle_second, late.angle_second);
    }

    #[test]
    fn resize_centers_the_dial() {
        let mut state = RenderState::new();
        assert!(!state.ready());

        let t = WallTime {
            hours: 0,
            minutes: 0,
            seconds: 0,
            millis: 0,
        };
        state.resize(400, 300, t);
        assert!(state.ready());
        assert_eq!(state.origin, Some((200.0, 150.0)));
        assert_eq!(state.factor, 150.0 / (DIAL_RADIUS + DIAL_MARGIN));
        assert!(state.factor > 0.0);

        state.resize(1000, 2000, t);
        assert_eq!(state.origin, Some((500.0, 1000.0)));
        assert_eq!(state.factor, 500.0 / (DIAL_RADIUS + DIAL_MARGIN));
    }

    #[test]
    fn resize_refreshes_the_angles() {
        let mut state = RenderState::new();
        state.resize(
            400,
            400,
            WallTime {
                hours: 1,
                minutes: 0,
                seconds: 0,
                millis: 0,
            },
        );
        assert_eq!(state.angle_hour, 30.0);
    }
}
