use std::{collections::HashMap, fmt, time::Duration};

use crate::clock::Timestamp;

/// Work run by [`FrameScheduler::tick`], given the context, the scheduler
/// itself and the tick's timestamp.
pub type Task<C> = Box<dyn FnOnce(&mut C, &mut FrameScheduler<C>, Timestamp)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

struct Timer<C> {
    deadline: Timestamp,
    task: Task<C>,
}

/// Cooperative scheduler driven by frame ticks.
///
/// Continuations wait for the next tick. Timers wait for a deadline and can
/// be cancelled through their handle until they run.
pub struct FrameScheduler<C> {
    next_tick: Vec<Task<C>>,
    timers: HashMap<TimerHandle, Timer<C>>,
    next_timer: u64,
}

impl<C> Default for FrameScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for FrameScheduler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("next_tick", &self.next_tick.len())
            .field("timers", &self.timers.len())
            .finish()
    }
}

impl<C> FrameScheduler<C> {
    pub fn new() -> Self {
        Self {
            next_tick: Vec::new(),
            timers: HashMap::new(),
            next_timer: 0,
        }
    }

    pub fn defer_to_next_tick(
        &mut self,
        task: impl FnOnce(&mut C, &mut FrameScheduler<C>, Timestamp) + 'static,
    ) {
        self.next_tick.push(Box::new(task));
    }

    /// Deadlines past the end of the clock saturate at the latest timestamp.
    pub fn schedule_after(
        &mut self,
        now: Timestamp,
        delay: Duration,
        task: impl FnOnce(&mut C, &mut FrameScheduler<C>, Timestamp) + 'static,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_timer);
        self.next_timer += 1;
        self.timers.insert(
            handle,
            Timer {
                deadline: now.saturating_add(delay),
                task: Box::new(task),
            },
        );
        handle
    }

    /// Returns `false` if the timer already ran or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle).is_some()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_continuations(&self) -> usize {
        self.next_tick.len()
    }

    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.values().map(|timer| timer.deadline).min()
    }

    /// Runs the continuations queued before this tick, then every timer whose
    /// deadline has passed, earliest first.
    pub fn tick(&mut self, ctx: &mut C, now: Timestamp) {
        for task in std::mem::take(&mut self.next_tick) {
            task(ctx, self, now);
        }

        let mut expired: Vec<(Timestamp, TimerHandle)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(handle, timer)| (timer.deadline, *handle))
            .collect();
        expired.sort_unstable();

        for (_, handle) in expired {
            // an earlier task may have cancelled this one
            if let Some(timer) = self.timers.remove(&handle) {
                (timer.task)(ctx, self, now);
            }
        }
    }
}
