use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;

use log::Level;

use super::*;
use crate::error::{ServiceError, ShellError};
use crate::error_boundary::ErrorRecord;
use crate::loading::LoadingPhase;
use crate::page::NavigationTiming;
use crate::page_fake::FakePage;
use crate::worker::WorkerState;

const DEF_A: ComponentDef = ComponentDef { view_box: "0 0 1 1", paths: &["M0 0h1"] };
const DEF_B: ComponentDef = ComponentDef { view_box: "0 0 1 1", paths: &["M0 0v1"] };
const CATALOG: &[(&str, ComponentDef)] = &[("IconA", DEF_A), ("IconB", DEF_B)];

/// Service that writes its start into the shared diagnostic journal.
struct TraceService {
    name: &'static str,
    diagnostics: Diagnostics,
    fail: bool,
}

impl Service for TraceService {
    fn name(&self) -> &'static str {
        self.name
    }

    fn init(&self) -> Result<(), ServiceError> {
        self.diagnostics.debug(format!("init {}", self.name));
        if self.fail {
            return Err(ServiceError::Unavailable { service: self.name, reason: "down".to_owned() });
        }
        Ok(())
    }
}

/// Renderer that mounts only when the target exists on the fake page.
struct TraceRenderer {
    page: Rc<FakePage>,
    diagnostics: Diagnostics,
    renders: Cell<usize>,
}

impl Renderer for TraceRenderer {
    fn render(&self, selector: &str, app: &AppInstance) -> Result<(), ShellError> {
        self.renders.set(self.renders.get() + 1);
        let id = selector.trim_start_matches('#');
        if self.page.element_by_id(id).is_none() {
            return Err(ShellError::MountTargetMissing { selector: selector.to_owned() });
        }
        let names: Vec<_> = app.components().names().collect();
        self.diagnostics.debug(format!("mount {selector} [{}]", names.join(",")));
        Ok(())
    }
}

struct Fixture {
    page: Rc<FakePage>,
    diagnostics: Diagnostics,
    renderer: TraceRenderer,
    backend: TraceService,
    audio: TraceService,
}

impl Fixture {
    fn new(page: FakePage) -> Self {
        let page = Rc::new(page);
        let diagnostics = Diagnostics::recording();
        Self {
            renderer: TraceRenderer { page: Rc::clone(&page), diagnostics: diagnostics.clone(), renders: Cell::new(0) },
            backend: TraceService { name: "backend", diagnostics: diagnostics.clone(), fail: false },
            audio: TraceService { name: "audio", diagnostics: diagnostics.clone(), fail: false },
            page,
            diagnostics,
        }
    }

    fn boot(&self, config: &ShellConfig) -> Shell<FakePage> {
        let startup = Startup { catalog: CATALOG, plugins: &[], services: &[&self.backend, &self.audio] };
        boot(config, Rc::clone(&self.page), &self.renderer, startup, self.diagnostics.clone())
    }

    /// Startup steps from the journal, skipping outcome lines.
    fn steps(&self) -> Vec<String> {
        self.diagnostics
            .messages_at(Level::Debug)
            .into_iter()
            .filter(|m| m.starts_with("registered ") || m.starts_with("init ") || m.starts_with("mount "))
            .collect()
    }
}

fn dev_config() -> ShellConfig {
    ShellConfig { production: false, ..ShellConfig::default() }
}

// =============================================================
// end to end
// =============================================================

#[test]
fn startup_runs_in_order_and_tears_down_loading_screen() {
    let fx = Fixture::new(FakePage::new().with_element("app").with_element("loading"));
    let shell = fx.boot(&dev_config());

    assert_eq!(
        fx.steps(),
        [
            "registered component IconA",
            "registered component IconB",
            "init backend",
            "init audio",
            "mount #app [IconA,IconB]",
        ]
    );
    assert!(shell.app.is_mounted());
    assert!(fx.page.journal().is_empty());

    fx.page.advance(Duration::from_millis(1000));
    assert_eq!(fx.page.journal(), ["1000ms style loading opacity=0"]);

    fx.page.advance(Duration::from_millis(499));
    assert!(fx.page.is_attached("loading"));

    fx.page.advance(Duration::from_millis(1));
    assert_eq!(
        fx.page.journal(),
        ["1000ms style loading opacity=0", "1500ms remove loading"]
    );
    assert_eq!(shell.loading.phase(), LoadingPhase::Removed);
}

#[test]
fn missing_loading_node_leaves_page_untouched() {
    let fx = Fixture::new(FakePage::new().with_element("app"));
    fx.boot(&dev_config());

    fx.page.advance(Duration::from_secs(3));

    assert!(fx.page.journal().is_empty());
}

// =============================================================
// failure isolation
// =============================================================

#[test]
fn mount_failure_is_logged_and_startup_continues() {
    let fx = Fixture::new(FakePage::new().with_element("loading").with_service_worker());
    let shell = fx.boot(&dev_config());

    assert!(!shell.app.is_mounted());
    assert_eq!(fx.diagnostics.messages_at(Level::Error), ["mount failed: mount target `#app` not found"]);
    assert_eq!(shell.worker.state(), WorkerState::AwaitingLoad);

    fx.page.advance(Duration::from_millis(1500));
    assert!(!fx.page.is_attached("loading"));
}

#[test]
fn service_failure_does_not_block_mount() {
    let mut fx = Fixture::new(FakePage::new().with_element("app"));
    fx.backend.fail = true;

    let shell = fx.boot(&dev_config());

    assert!(shell.app.is_mounted());
    assert_eq!(fx.steps()[3], "init audio");
    assert_eq!(fx.diagnostics.messages_at(Level::Error).len(), 1);
}

#[test]
fn mount_is_attempted_exactly_once() {
    let fx = Fixture::new(FakePage::new().with_element("app"));
    fx.boot(&dev_config());
    assert_eq!(fx.renderer.renders.get(), 1);
}

// =============================================================
// error boundary
// =============================================================

#[derive(Debug, thiserror::Error)]
#[error("template exploded")]
struct TemplateError;

#[test]
fn error_boundary_is_installed_even_when_mount_fails() {
    let fx = Fixture::new(FakePage::new());
    let shell = fx.boot(&dev_config());

    assert!(shell.app.error_handler().is_some());

    shell.app.report_error(&ErrorRecord::new(Arc::new(TemplateError), "render"));
    assert_eq!(shell.boundary.handled(), 1);
    assert!(!shell.app.is_mounted());
}

// =============================================================
// load listeners
// =============================================================

#[test]
fn load_registers_worker_once_and_reports_timing_in_production() {
    let page = FakePage::new()
        .with_element("app")
        .with_service_worker()
        .with_timing(NavigationTiming { fetch_start: 5.0, load_event_end: 905.0 });
    let fx = Fixture::new(page);
    let config = ShellConfig { production: true, ..ShellConfig::default() };
    let shell = fx.boot(&config);

    fx.page.fire_load();
    fx.page.advance(Duration::ZERO);
    fx.page.resolve_registration(Ok("/".to_owned()));

    assert_eq!(fx.page.registration_attempts(), ["/sw.js"]);
    assert_eq!(shell.worker.state(), WorkerState::Registered { scope: "/".to_owned() });
    assert_eq!(shell.perf.load_time_ms(), Some(900.0));
    assert!(
        fx.diagnostics
            .messages_at(Level::Info)
            .contains(&"page load time: 900 ms".to_owned())
    );
}

#[test]
fn load_before_loading_timer_is_independent() {
    let page = FakePage::new().with_element("app").with_element("loading").with_service_worker();
    let fx = Fixture::new(page);
    let shell = fx.boot(&dev_config());

    fx.page.fire_load();
    assert_eq!(shell.worker.state(), WorkerState::Registering);
    assert!(fx.page.is_attached("loading"));

    fx.page.advance(Duration::from_millis(1500));
    assert!(!fx.page.is_attached("loading"));
    assert_eq!(shell.perf.load_time_ms(), None);
}
