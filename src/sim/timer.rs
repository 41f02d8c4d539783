//! Frame clock and timer queue
//!
//! The frame clock tracks two timelines: real frame time, which always
//! advances, and game time, which advances scaled by `time_scale` (zero
//! while paused). The timer queue is keyed by whichever timeline the owner
//! feeds it.

/// Slack for comparing accumulated f32 frame deltas against due times
const DUE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Timer<T> {
    handle: TimerHandle,
    due: f64,
    payload: T,
}

/// Timers ordered by due time, ties broken by scheduling order
#[derive(Debug)]
pub struct TimerQueue<T> {
    timers: Vec<Timer<T>>,
    next_handle: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_handle: 1,
        }
    }

    /// Schedule `payload` to fire `delay` seconds after `now`
    pub fn schedule(&mut self, now: f64, delay: f32, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let due = now + f64::from(delay.max(0.0));
        // Insert after every timer due at or before this one
        let pos = self.timers.partition_point(|t| t.due <= due);
        self.timers.insert(
            pos,
            Timer {
                handle,
                due,
                payload,
            },
        );
        handle
    }

    /// Remove a pending timer, returning its payload
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let pos = self.timers.iter().position(|t| t.handle == handle)?;
        Some(self.timers.remove(pos).payload)
    }

    /// Pop the earliest timer if it is due at `now`
    pub fn pop_due(&mut self, now: f64) -> Option<(TimerHandle, T)> {
        if self.timers.first()?.due > now + DUE_EPSILON {
            return None;
        }
        let timer = self.timers.remove(0);
        Some((timer.handle, timer.payload))
    }

    pub fn next_due(&self) -> Option<f64> {
        self.timers.first().map(|t| t.due)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    real: f64,
    game: f64,
    /// Scaled delta of the last frame
    delta: f32,
    time_scale: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            real: 0.0,
            game: 0.0,
            delta: 0.0,
            time_scale: 1.0,
        }
    }

    /// Advance by one frame of `dt` real seconds
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.delta = dt * self.time_scale;
        self.real += f64::from(dt);
        self.game += f64::from(self.delta);
    }

    /// Game-time delta of the last frame (0 while paused)
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn real_time(&self) -> f64 {
        self.real
    }

    pub fn game_time(&self) -> f64 {
        self.game
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_in_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(0.0, 2.0, "late");
        queue.schedule(0.0, 1.0, "early");
        queue.schedule(0.0, 1.0, "early-second");

        assert!(queue.pop_due(0.5).is_none());
        assert_eq!(queue.pop_due(1.0).map(|(_, p)| p), Some("early"));
        assert_eq!(queue.pop_due(1.0).map(|(_, p)| p), Some("early-second"));
        assert!(queue.pop_due(1.5).is_none());
        assert_eq!(queue.pop_due(2.5).map(|(_, p)| p), Some("late"));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_zero_delay_is_due_now() {
        let mut queue = TimerQueue::new();
        queue.schedule(3.25, 0.0, ());
        assert!(queue.pop_due(3.25).is_some());
    }

    #[test]
    fn test_negative_delay_clamped() {
        let mut queue = TimerQueue::new();
        queue.schedule(1.0, -5.0, ());
        assert_eq!(queue.next_due(), Some(1.0));
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule(0.0, 1.0, 'a');
        let _b = queue.schedule(0.0, 2.0, 'b');
        assert_eq!(queue.cancel(a), Some('a'));
        assert_eq!(queue.cancel(a), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(5.0).map(|(_, p)| p), Some('b'));
    }

    #[test]
    fn test_frame_deltas_reach_due_time() {
        let mut clock = FrameClock::new();
        let mut queue = TimerQueue::new();
        queue.schedule(clock.real_time(), 2.0, ());
        let mut frames = 0;
        while queue.pop_due(clock.real_time()).is_none() {
            clock.advance(1.0 / 60.0);
            frames += 1;
        }
        assert!((119..=121).contains(&frames), "fired after {frames} frames");
    }

    #[test]
    fn test_time_scale_freezes_game_time() {
        let mut clock = FrameClock::new();
        clock.advance(0.5);
        clock.set_time_scale(0.0);
        clock.advance(0.5);
        assert_eq!(clock.delta(), 0.0);
        assert_eq!(clock.game_time(), 0.5);
        assert_eq!(clock.real_time(), 1.0);
        clock.set_time_scale(1.0);
        clock.advance(0.25);
        assert_eq!(clock.delta(), 0.25);
        assert_eq!(clock.game_time(), 0.75);
    }
}
