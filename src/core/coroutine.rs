use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{Debug, Formatter},
    time::Duration,
};
use crate::core::update::UpdateContext;

#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CoroutineId(usize);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CoroutineState {
    Starting,
    Yielding,
    Waiting,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CoroutineResponse {
    Yield,
    Wait(Duration),
    Complete,
}

pub type CoroutineFunc<O> = dyn FnMut(&mut O, &mut UpdateContext<'_>, CoroutineState) -> CoroutineResponse;

pub(crate) struct Coroutine<O> {
    func: Box<CoroutineFunc<O>>,
    wait_since: Duration,
    wait_duration: Duration,
    last_action: CoroutineState,
}

impl<O> Coroutine<O> {
    fn new<F>(func: F, now: Duration) -> Self
    where
        F: FnMut(&mut O, &mut UpdateContext<'_>, CoroutineState) -> CoroutineResponse + 'static
    {
        Self {
            func: Box::new(func),
            wait_since: now,
            wait_duration: Duration::ZERO,
            last_action: CoroutineState::Starting,
        }
    }

    fn resume(mut self, owner: &mut O, ctx: &mut UpdateContext<'_>, now: Duration) -> Option<Self> {
        if now.saturating_sub(self.wait_since) < self.wait_duration {
            return Some(self);
        }
        match (self.func)(owner, ctx, self.last_action) {
            CoroutineResponse::Yield => {
                self.last_action = CoroutineState::Yielding;
                Some(self)
            }
            CoroutineResponse::Wait(duration) => {
                self.wait_since = now;
                self.wait_duration = duration;
                self.last_action = CoroutineState::Waiting;
                Some(self)
            }
            CoroutineResponse::Complete => None,
        }
    }
}

/// Delayed and multi-frame actions belonging to one owner, timed against game time.
///
/// Game time only moves when the owner calls [`advance`](Scheduler::advance), so a paused or
/// slowed simulation delays coroutines with it.
pub struct Scheduler<O> {
    now: Duration,
    next_id: usize,
    coroutines: BTreeMap<CoroutineId, Coroutine<O>>,
    pending_removed: BTreeSet<CoroutineId>,
}

impl<O> Default for Scheduler<O> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            coroutines: BTreeMap::new(),
            pending_removed: BTreeSet::new(),
        }
    }
}

impl<O> Debug for Scheduler<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.now)
            .field("coroutines", &self.coroutines.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<O> Scheduler<O> {
    pub fn now(&self) -> Duration { self.now }
    pub fn advance(&mut self, delta: Duration) { self.now += delta; }

    pub fn len(&self) -> usize { self.coroutines.len() }
    pub fn is_empty(&self) -> bool { self.coroutines.is_empty() }
    pub fn is_running(&self, id: CoroutineId) -> bool {
        self.coroutines.contains_key(&id) && !self.pending_removed.contains(&id)
    }

    pub fn start_coroutine<F>(&mut self, func: F) -> CoroutineId
    where
        F: FnMut(&mut O, &mut UpdateContext<'_>, CoroutineState) -> CoroutineResponse + 'static
    {
        let id = CoroutineId(self.next_id);
        self.next_id += 1;
        self.coroutines.insert(id, Coroutine::new(func, self.now));
        id
    }
    pub fn start_coroutine_after<F>(&mut self, mut func: F, duration: Duration) -> CoroutineId
    where
        F: FnMut(&mut O, &mut UpdateContext<'_>, CoroutineState) -> CoroutineResponse + 'static
    {
        self.start_coroutine(move |owner, ctx, action| {
            match action {
                CoroutineState::Starting => CoroutineResponse::Wait(duration),
                _ => func(owner, ctx, action)
            }
        })
    }
    pub fn maybe_cancel_coroutine(&mut self, id: &mut Option<CoroutineId>) {
        if let Some(id) = id.take() {
            self.cancel_coroutine(id);
        }
    }
    pub fn cancel_coroutine(&mut self, id: CoroutineId) {
        if self.coroutines.remove(&id).is_none() {
            // Currently being resumed; dropped when it hands control back.
            self.pending_removed.insert(id);
        }
    }
}

/// Gives [`update_coroutines`] access to the scheduler an owner keeps inside itself.
pub trait HasScheduler: Sized {
    fn scheduler(&mut self) -> &mut Scheduler<Self>;
}

/// Resumes every due coroutine of `owner` once, in the order they were started. Coroutines
/// started during this call first run on the next call.
pub fn update_coroutines<O: HasScheduler>(owner: &mut O, ctx: &mut UpdateContext<'_>) {
    let now = owner.scheduler().now;
    let last_coroutines = std::mem::take(&mut owner.scheduler().coroutines);
    for (id, coroutine) in last_coroutines {
        if owner.scheduler().pending_removed.remove(&id) {
            continue;
        }
        let resumed = coroutine.resume(owner, ctx, now);
        let scheduler = owner.scheduler();
        if scheduler.pending_removed.remove(&id) {
            continue;
        }
        if let Some(coroutine) = resumed {
            scheduler.coroutines.insert(id, coroutine);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::Harness;

    #[derive(Default)]
    struct Owner {
        scheduler: Scheduler<Owner>,
        log: Vec<&'static str>,
    }

    impl HasScheduler for Owner {
        fn scheduler(&mut self) -> &mut Scheduler<Self> {
            &mut self.scheduler
        }
    }

    fn tick(owner: &mut Owner, harness: &mut Harness, millis: u64) {
        owner.scheduler.advance(Duration::from_millis(millis));
        update_coroutines(owner, &mut harness.ctx());
    }

    #[test]
    fn delayed_coroutine_fires_once_after_delay() {
        let mut owner = Owner::default();
        let mut harness = Harness::default();
        owner.scheduler.start_coroutine_after(|this: &mut Owner, _ctx, _state| {
            this.log.push("fired");
            CoroutineResponse::Complete
        }, Duration::from_secs(1));

        tick(&mut owner, &mut harness, 0);
        tick(&mut owner, &mut harness, 500);
        assert!(owner.log.is_empty());
        tick(&mut owner, &mut harness, 499);
        assert!(owner.log.is_empty());
        tick(&mut owner, &mut harness, 1);
        assert_eq!(owner.log, vec!["fired"]);
        tick(&mut owner, &mut harness, 5000);
        assert_eq!(owner.log, vec!["fired"]);
        assert!(owner.scheduler.is_empty());
    }

    #[test]
    fn yielding_coroutine_runs_every_update() {
        let mut owner = Owner::default();
        let mut harness = Harness::default();
        let mut remaining = 3;
        owner.scheduler.start_coroutine(move |this: &mut Owner, _ctx, _state| {
            this.log.push("tick");
            remaining -= 1;
            if remaining == 0 { CoroutineResponse::Complete } else { CoroutineResponse::Yield }
        });
        for _ in 0..5 {
            tick(&mut owner, &mut harness, 16);
        }
        assert_eq!(owner.log.len(), 3);
    }

    #[test]
    fn coroutines_run_in_start_order_and_can_be_cancelled() {
        let mut owner = Owner::default();
        let mut harness = Harness::default();
        owner.scheduler.start_coroutine(|this: &mut Owner, _ctx, _state| {
            this.log.push("first");
            CoroutineResponse::Complete
        });
        let mut second = Some(owner.scheduler.start_coroutine(|this: &mut Owner, _ctx, _state| {
            this.log.push("second");
            CoroutineResponse::Complete
        }));
        owner.scheduler.start_coroutine(|this: &mut Owner, _ctx, _state| {
            this.log.push("third");
            CoroutineResponse::Complete
        });
        owner.scheduler.maybe_cancel_coroutine(&mut second);
        assert!(second.is_none());
        tick(&mut owner, &mut harness, 0);
        assert_eq!(owner.log, vec!["first", "third"]);
    }

    #[test]
    fn coroutine_started_during_update_waits_for_next_update() {
        let mut owner = Owner::default();
        let mut harness = Harness::default();
        owner.scheduler.start_coroutine(|this: &mut Owner, _ctx, _state| {
            this.log.push("outer");
            this.scheduler.start_coroutine(|this: &mut Owner, _ctx, _state| {
                this.log.push("inner");
                CoroutineResponse::Complete
            });
            CoroutineResponse::Complete
        });
        tick(&mut owner, &mut harness, 0);
        assert_eq!(owner.log, vec!["outer"]);
        tick(&mut owner, &mut harness, 0);
        assert_eq!(owner.log, vec!["outer", "inner"]);
    }

    #[test]
    fn yielding_coroutine_can_be_cancelled_between_updates() {
        let mut owner = Owner::default();
        let mut harness = Harness::default();
        let id = owner.scheduler.start_coroutine(|this: &mut Owner, _ctx, _state| {
            this.log.push("ran");
            CoroutineResponse::Yield
        });
        tick(&mut owner, &mut harness, 0);
        assert!(owner.scheduler.is_running(id));
        owner.scheduler.cancel_coroutine(id);
        tick(&mut owner, &mut harness, 0);
        assert_eq!(owner.log, vec!["ran"]);
        assert!(!owner.scheduler.is_running(id));
    }
}
