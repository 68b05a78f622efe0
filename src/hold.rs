//! Press-and-hold repetition for increment controls.
//!
//! Holding a control fires its action once straight away and then once per
//! period until the control is released. The repeater is polled with the
//! current time (seconds, as returned by the frame clock) and reports how
//! many firings fell due since the last poll, so it works inside a
//! single-threaded frame loop without any timer handles.
//!
//! Release is signalled through a [`CancelToken`]. Once cancelled, a token
//! never produces another firing.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_immediately_then_on_period() {
        let mut repeater = Repeater::default();
        let _token = repeater.press(10.0);
        assert_eq!(repeater.poll(10.0), 1);
        assert_eq!(repeater.poll(10.05), 0);
        assert_eq!(repeater.poll(10.1), 1);
        assert_eq!(repeater.poll(10.35), 2);
        assert!(repeater.is_active());
    }

    #[test]
    fn release_stops_firing() {
        let mut repeater = Repeater::default();
        repeater.press(0.0);
        assert_eq!(repeater.poll(0.0), 1);
        repeater.release();
        assert_eq!(repeater.poll(5.0), 0);
        assert!(!repeater.is_active());
    }

    #[test]
    fn cancelled_token_stops_firing() {
        let mut repeater = Repeater::new(Duration::from_millis(100));
        let token = repeater.press(0.0);
        let handle = token.clone();
        assert_eq!(repeater.poll(0.25), 3);
        handle.cancel();
        assert!(token.is_cancelled());
        assert_eq!(repeater.poll(1.0), 0);
    }

    #[test]
    fn new_press_cancels_previous_token() {
        let mut repeater = Repeater::default();
        let first = repeater.press(0.0);
        let second = repeater.press(1.0);
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(repeater.poll(1.0), 1);
    }

    #[test]
    fn following_key_level_releases_without_event() {
        let mut repeater = Repeater::default();
        assert_eq!(repeater.follow(0.0, true), 1);
        assert_eq!(repeater.follow(0.1, true), 1);
        // key seen up on the next frame, no release event delivered
        assert_eq!(repeater.follow(0.15, false), 0);
        assert!(!repeater.is_active());
        assert_eq!(repeater.follow(5.0, false), 0);
        // pressing again starts a fresh hold
        assert_eq!(repeater.follow(6.0, true), 1);
        assert_eq!(repeater.follow(6.05, true), 0);
    }

    #[test]
    fn idle_repeater_never_fires() {
        let mut repeater = Repeater::default();
        assert_eq!(repeater.poll(100.0), 0);
    }
}

/// Interval between repeated firings while a control is held.
pub const HOLD_PERIOD: Duration = Duration::from_millis(100);

/// Shared release signal for one press. Tokens live on the frame loop's
/// thread and are not `Send`.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug)]
struct Hold {
    token: CancelToken,
    next_fire: f64,
}

#[derive(Debug)]
pub struct Repeater {
    period: f64,
    hold: Option<Hold>,
}

impl Default for Repeater {
    fn default() -> Self {
        Self::new(HOLD_PERIOD)
    }
}

impl Repeater {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.as_secs_f64(),
            hold: None,
        }
    }

    /// Starts holding at time `now`. The first firing is due at `now`.
    pub fn press(&mut self, now: f64) -> CancelToken {
        self.release();
        let token = CancelToken::new();
        self.hold = Some(Hold {
            token: token.clone(),
            next_fire: now,
        });
        token
    }

    pub fn release(&mut self) {
        if let Some(hold) = self.hold.take() {
            hold.token.cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.hold
            .as_ref()
            .is_some_and(|hold| !hold.token.is_cancelled())
    }

    /// Follows the live down/up level of a control and returns the firings
    /// due at `now`. A control seen up releases the hold even when no
    /// release event arrived.
    pub fn follow(&mut self, now: f64, down: bool) -> u32 {
        match (down, self.is_active()) {
            (true, false) => {
                self.press(now);
            }
            (false, _) => self.release(),
            (true, true) => {}
        }
        self.poll(now)
    }

    /// Number of firings due at `now` that have not been reported yet.
    pub fn poll(&mut self, now: f64) -> u32 {
        let Some(hold) = self.hold.as_mut() else {
            return 0;
        };
        if hold.token.is_cancelled() {
            self.hold = None;
            return 0;
        }

        let mut fired = 0;
        // Small slack so that accumulated float error does not delay a tick.
        while hold.next_fire <= now + 1e-9 {
            fired += 1;
            hold.next_fire += self.period;
        }
        fired
    }
}
