use log::Level;

use super::*;
use crate::page_fake::FakePage;

fn worker(page: &Rc<FakePage>, diag: &Diagnostics) -> OfflineWorker<FakePage> {
    OfflineWorker::new(Rc::clone(page), "/sw.js", diag.clone())
}

#[test]
fn unsupported_never_registers() {
    let page = Rc::new(FakePage::new());
    let worker = worker(&page, &Diagnostics::recording());

    worker.arm();
    page.fire_load();

    assert_eq!(worker.state(), WorkerState::Unsupported);
    assert!(page.registration_attempts().is_empty());
}

#[test]
fn supported_waits_for_load() {
    let page = Rc::new(FakePage::new().with_service_worker());
    let worker = worker(&page, &Diagnostics::recording());

    worker.arm();

    assert_eq!(worker.state(), WorkerState::AwaitingLoad);
    assert!(page.registration_attempts().is_empty());

    page.fire_load();
    assert_eq!(worker.state(), WorkerState::Registering);
    assert_eq!(page.registration_attempts(), ["/sw.js"]);
}

#[test]
fn success_logs_scope() {
    let page = Rc::new(FakePage::new().with_service_worker());
    let diag = Diagnostics::recording();
    let worker = worker(&page, &diag);

    worker.arm();
    page.fire_load();
    page.resolve_registration(Ok("https://app.test/".to_owned()));

    assert_eq!(worker.state(), WorkerState::Registered { scope: "https://app.test/".to_owned() });
    assert_eq!(diag.messages_at(Level::Info), ["SW registered: https://app.test/"]);
}

#[test]
fn failure_is_logged_and_terminal() {
    let page = Rc::new(FakePage::new().with_service_worker());
    let diag = Diagnostics::recording();
    let worker = worker(&page, &diag);

    worker.arm();
    page.fire_load();
    page.resolve_registration(Err("SecurityError".to_owned()));

    assert_eq!(worker.state(), WorkerState::Failed { reason: "SecurityError".to_owned() });
    assert_eq!(diag.messages_at(Level::Warn), ["SW registration failed: SecurityError"]);

    worker.arm();
    page.fire_load();
    assert_eq!(page.registration_attempts().len(), 1);
}

#[test]
fn arming_twice_registers_once() {
    let page = Rc::new(FakePage::new().with_service_worker());
    let worker = worker(&page, &Diagnostics::recording());

    worker.arm();
    worker.arm();
    page.fire_load();

    assert_eq!(page.registration_attempts(), ["/sw.js"]);
}
