//! Timers - repeating widget timers driven by the compositor clock
//!
//! Timers are owned by a widget and fire through
//! [`Widget::on_timer`](crate::widgets::Widget::on_timer) when the compositor
//! is ticked past their deadline. A timer keeps firing every `interval` until cancelled.

use std::time::{Duration, Instant};

use crate::widgets::WidgetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer asks its owner to do when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerAction {
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    owner: WidgetId,
    interval: Duration,
    due: Instant,
    action: TimerAction,
}

/// A timer that came due during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTimer {
    pub id: TimerId,
    pub owner: WidgetId,
    pub action: TimerAction,
}

#[derive(Debug, Default)]
pub struct Timers {
    timers: Vec<Timer>,
    next_id: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(
        &mut self,
        owner: WidgetId,
        interval: Duration,
        action: TimerAction,
        now: Instant,
    ) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            owner,
            interval,
            due: now + interval,
            action,
        });
        tracing::trace!(?id, %owner, ?interval, ?action, "timer started");
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        let cancelled = self.timers.len() != before;
        if cancelled {
            tracing::trace!(?id, "timer cancelled");
        }
        cancelled
    }

    /// Drop every timer owned by `owner`.
    pub fn cancel_owner(&mut self, owner: WidgetId) {
        self.timers.retain(|t| t.owner != owner);
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Collect timers due at `now` and reschedule each one interval after `now`.
    ///
    /// A timer fires at most once per call, however late the tick is.
    pub fn take_due(&mut self, now: Instant) -> Vec<DueTimer> {
        let mut due = Vec::new();
        for timer in &mut self.timers {
            if timer.due <= now {
                due.push(DueTimer {
                    id: timer.id,
                    owner: timer.owner,
                    action: timer.action,
                });
                timer.due = now + timer.interval;
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_50: Duration = Duration::from_millis(50);

    #[test]
    fn test_fires_after_interval() {
        let mut timers = Timers::new();
        let start = Instant::now();
        let id = timers.start(WidgetId(1), MS_50, TimerAction::ScrollDown, start);

        assert!(timers.take_due(start + Duration::from_millis(10)).is_empty());

        let due = timers.take_due(start + MS_50);
        assert_eq!(
            due,
            vec![DueTimer { id, owner: WidgetId(1), action: TimerAction::ScrollDown }]
        );
    }

    #[test]
    fn test_repeats_until_cancelled() {
        let mut timers = Timers::new();
        let start = Instant::now();
        let id = timers.start(WidgetId(1), MS_50, TimerAction::ScrollUp, start);

        assert_eq!(timers.take_due(start + MS_50).len(), 1);
        assert_eq!(timers.take_due(start + MS_50 * 2).len(), 1);

        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.take_due(start + MS_50 * 10).is_empty());
    }

    #[test]
    fn test_late_tick_fires_once() {
        let mut timers = Timers::new();
        let start = Instant::now();
        timers.start(WidgetId(1), MS_50, TimerAction::ScrollUp, start);

        let late = start + Duration::from_secs(5);
        assert_eq!(timers.take_due(late).len(), 1);
        assert_eq!(timers.next_deadline(), Some(late + MS_50));
    }

    #[test]
    fn test_cancel_owner() {
        let mut timers = Timers::new();
        let now = Instant::now();
        let a = timers.start(WidgetId(1), MS_50, TimerAction::ScrollUp, now);
        let b = timers.start(WidgetId(2), MS_50, TimerAction::ScrollUp, now);

        timers.cancel_owner(WidgetId(1));
        assert!(!timers.is_active(a));
        assert!(timers.is_active(b));
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn test_next_deadline_is_earliest() {
        let mut timers = Timers::new();
        let now = Instant::now();
        assert_eq!(timers.next_deadline(), None);

        timers.start(WidgetId(1), MS_50 * 3, TimerAction::ScrollUp, now);
        timers.start(WidgetId(1), MS_50, TimerAction::ScrollDown, now);
        assert_eq!(timers.next_deadline(), Some(now + MS_50));
    }
}
