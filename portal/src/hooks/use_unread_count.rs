use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use api_types::unread_count;
use gloo_timers::callback::Timeout;
use yew::{platform::spawn_local, prelude::*};

use crate::{
    api::{notifications_api, use_api, ApiClient, ApiError, RequestScope},
    config,
};

/// Delay between polls: the base interval after a success, doubling on each
/// consecutive failure up to a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    base_ms: u32,
    max_ms: u32,
    current_ms: u32,
}

impl Default for PollSchedule {
    fn default() -> Self {
        PollSchedule::new(
            config::NOTIFICATION_POLL_INTERVAL_MS,
            config::NOTIFICATION_POLL_MAX_INTERVAL_MS,
        )
    }
}

impl PollSchedule {
    pub fn new(base_ms: u32, max_ms: u32) -> Self {
        PollSchedule {
            base_ms,
            max_ms: max_ms.max(base_ms),
            current_ms: base_ms,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.current_ms
    }

    pub fn record_success(&mut self) {
        self.current_ms = self.base_ms;
    }

    pub fn record_failure(&mut self) {
        self.current_ms = self.current_ms.saturating_mul(2).min(self.max_ms);
    }
}

struct PollerState {
    api: ApiClient,
    on_count: Callback<usize>,
    schedule: RefCell<PollSchedule>,
    timer: RefCell<Option<Timeout>>,
    in_flight: RefCell<Option<RequestScope>>,
    cancelled: Cell<bool>,
}

/// Background task refreshing the unread badge. Dropping it cancels the
/// pending timer and aborts a request in flight.
struct Poller {
    state: Rc<PollerState>,
}

impl Poller {
    fn start(api: ApiClient, on_count: Callback<usize>) -> Self {
        let state = Rc::new(PollerState {
            api,
            on_count,
            schedule: RefCell::new(PollSchedule::default()),
            timer: RefCell::new(None),
            in_flight: RefCell::new(None),
            cancelled: Cell::new(false),
        });
        poll(state.clone());
        Poller { state }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.state.cancelled.set(true);
        // Releases the timer closure, which holds the last other reference.
        self.state.timer.borrow_mut().take();
        self.state.in_flight.borrow_mut().take();
    }
}

fn poll(state: Rc<PollerState>) {
    if state.cancelled.get() {
        return;
    }
    let scope = RequestScope::new();
    let api = state.api.scoped(&scope);
    *state.in_flight.borrow_mut() = Some(scope);

    spawn_local(async move {
        let result = notifications_api::list_notifications(&api).await;
        if state.cancelled.get() {
            return;
        }
        state.in_flight.borrow_mut().take();
        match result {
            Ok(notifications) => {
                state.schedule.borrow_mut().record_success();
                state.on_count.emit(unread_count(&notifications));
            }
            Err(ApiError::Aborted) => return,
            Err(error) => {
                state.schedule.borrow_mut().record_failure();
                log::warn!(
                    "Fail to poll notifications, next attempt in {}ms. Error={error}",
                    state.schedule.borrow().delay_ms()
                );
            }
        }
        schedule_next(state);
    });
}

fn schedule_next(state: Rc<PollerState>) {
    let delay = state.schedule.borrow().delay_ms();
    let next = state.clone();
    let timer = Timeout::new(delay, move || poll(next));
    *state.timer.borrow_mut() = Some(timer);
}

/// Unread notification count for the header badge, `None` until the first
/// poll answers. Polling runs only while someone is signed in.
#[hook]
pub fn use_unread_count() -> Option<usize> {
    let api = use_api();
    let count = use_state_eq(|| None);
    {
        let count = count.clone();
        let signed_in = api.session().is_authenticated();
        use_effect_with(signed_in, move |signed_in| {
            let poller = signed_in.then(|| {
                Poller::start(api, Callback::from(move |unread| count.set(Some(unread))))
            });
            move || drop(poller)
        });
    }
    *count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_double_the_delay_up_to_the_ceiling() {
        let mut schedule = PollSchedule::new(60_000, 600_000);
        assert_eq!(schedule.delay_ms(), 60_000);

        let delays: Vec<u32> = (0..5)
            .map(|_| {
                schedule.record_failure();
                schedule.delay_ms()
            })
            .collect();
        assert_eq!(delays, vec![120_000, 240_000, 480_000, 600_000, 600_000]);
    }

    #[test]
    fn success_resets_to_base_interval() {
        let mut schedule = PollSchedule::default();
        schedule.record_failure();
        schedule.record_failure();
        schedule.record_success();
        assert_eq!(schedule.delay_ms(), config::NOTIFICATION_POLL_INTERVAL_MS);
    }

    #[test]
    fn ceiling_below_base_is_raised_to_base() {
        let mut schedule = PollSchedule::new(5_000, 1_000);
        schedule.record_failure();
        assert_eq!(schedule.delay_ms(), 5_000);
    }
}
