//! In-memory [`Page`] with a virtual clock, used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use crate::page::{Callback, NavigationTiming, Page, RegistrationCallback};

struct Timer {
    due: Duration,
    seq: u64,
    callback: Callback,
}

#[derive(Default)]
pub struct FakePage {
    now: Cell<Duration>,
    seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    load_listeners: RefCell<Vec<Callback>>,
    attached: RefCell<BTreeSet<String>>,
    styles: RefCell<BTreeMap<(String, String), String>>,
    journal: RefCell<Vec<String>>,
    sw_supported: Cell<bool>,
    registrations: RefCell<Vec<RegistrationCallback>>,
    registration_attempts: RefCell<Vec<String>>,
    timing: Cell<Option<NavigationTiming>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(self, id: &str) -> Self {
        self.attached.borrow_mut().insert(id.to_owned());
        self
    }

    pub fn with_service_worker(self) -> Self {
        self.sw_supported.set(true);
        self
    }

    pub fn with_timing(self, timing: NavigationTiming) -> Self {
        self.timing.set(Some(timing));
        self
    }

    pub fn is_attached(&self, id: &str) -> bool {
        self.attached.borrow().contains(id)
    }

    pub fn style(&self, id: &str, property: &str) -> Option<String> {
        self.styles
            .borrow()
            .get(&(id.to_owned(), property.to_owned()))
            .cloned()
    }

    /// DOM mutations and registration attempts, in order, stamped with the
    /// virtual time at which they happened.
    pub fn journal(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn registration_attempts(&self) -> Vec<String> {
        self.registration_attempts.borrow().clone()
    }

    /// Advance the virtual clock, running due timers in order. Timers
    /// scheduled by a running timer fire in the same call if they fall due.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        while let Some(timer) = self.take_next_due(target) {
            self.now.set(timer.due);
            (timer.callback)();
        }
        self.now.set(target);
    }

    /// Dispatch the window `load` event to every listener armed so far.
    pub fn fire_load(&self) {
        let listeners = std::mem::take(&mut *self.load_listeners.borrow_mut());
        for listener in listeners {
            listener();
        }
    }

    /// Complete the oldest pending service worker registration.
    pub fn resolve_registration(&self, outcome: Result<String, String>) {
        let pending = {
            let mut queue = self.registrations.borrow_mut();
            if queue.is_empty() { None } else { Some(queue.remove(0)) }
        };
        if let Some(done) = pending {
            done(outcome);
        }
    }

    fn take_next_due(&self, target: Duration) -> Option<Timer> {
        let mut timers = self.timers.borrow_mut();
        let idx = timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        Some(timers.remove(idx))
    }

    fn log(&self, event: String) {
        let ms = self.now.get().as_millis();
        self.journal.borrow_mut().push(format!("{ms}ms {event}"));
    }
}

impl Page for FakePage {
    type Node = String;

    fn element_by_id(&self, id: &str) -> Option<String> {
        self.is_attached(id).then(|| id.to_owned())
    }

    fn set_style(&self, node: &String, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert((node.clone(), property.to_owned()), value.to_owned());
        self.log(format!("style {node} {property}={value}"));
    }

    fn remove(&self, node: &String) {
        if self.attached.borrow_mut().remove(node) {
            self.log(format!("remove {node}"));
        }
    }

    fn set_timeout(&self, delay: Duration, callback: Callback) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer { due: self.now.get() + delay, seq, callback });
    }

    fn on_load(&self, callback: Callback) {
        self.load_listeners.borrow_mut().push(callback);
    }

    fn service_worker_supported(&self) -> bool {
        self.sw_supported.get()
    }

    fn register_service_worker(&self, script_url: &str, done: RegistrationCallback) {
        self.registration_attempts.borrow_mut().push(script_url.to_owned());
        self.log(format!("register {script_url}"));
        self.registrations.borrow_mut().push(done);
    }

    fn navigation_timing(&self) -> Option<NavigationTiming> {
        self.timing.get()
    }
}
