//! Scripted lifecycle runs of the splash screen, used by the CLI.

use serde::Serialize;

use crate::features::splash::{SplashDestination, SplashHost, SplashPresenter};
use crate::presenter::Presenter;
use crate::ui::host::{
    HostEnvironment, HostError, HostEventQueue, LaunchInput, SavedState, ViewLifecycleHost,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    /// Deliver the platform start before draining the presenter delivery.
    pub start_before_delivery: bool,
    /// Rotation-style destroy/recreate cycles before finishing.
    pub recreations: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceEntry {
    pub step: String,
    pub instance: String,
    pub state: String,
    pub presenter_delivered: bool,
    pub view_attached: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub chain: String,
    pub destination: Option<SplashDestination>,
    pub retained_after_finish: bool,
    pub trace: Vec<TraceEntry>,
}

struct Recorder {
    trace: Vec<TraceEntry>,
}

impl Recorder {
    fn record(&mut self, step: &str, host: &ViewLifecycleHost<SplashHost>) {
        let view_attached = host
            .presenter()
            .is_some_and(|presenter| presenter.lock().view().is_some());
        self.trace.push(TraceEntry {
            step: step.to_string(),
            instance: host.instance().to_string(),
            state: format!("{:?}", host.state()),
            presenter_delivered: host.presenter().is_some(),
            view_attached,
        });
    }
}

/// Run create → start → (recreate)* → finish against `env`.
pub fn run(
    options: SimulationOptions,
    env: &HostEnvironment,
    launch: &LaunchInput,
) -> Result<SimulationReport, HostError> {
    let queue = HostEventQueue::new();
    let mut recorder = Recorder { trace: Vec::new() };

    let mut host =
        ViewLifecycleHost::create(SplashHost::new(), env, &queue.sender(), None, launch)?;
    recorder.record("create", &host);
    start(&queue, &mut host, options, &mut recorder);

    for round in 1..=options.recreations {
        host.on_stop();
        recorder.record(&format!("stop #{round}"), &host);

        let saved: SavedState = host.destroy_for_recreation();
        host = ViewLifecycleHost::create(
            SplashHost::new(),
            env,
            &queue.sender(),
            Some(saved),
            launch,
        )?;
        recorder.record(&format!("recreate #{round}"), &host);
        start(&queue, &mut host, options, &mut recorder);
    }

    let destination = host
        .presenter()
        .and_then(|presenter| presenter.lock().destination());
    let chain = host.chain();

    host.finish();
    recorder.record("finish", &host);
    queue.drain(&mut host);

    Ok(SimulationReport {
        chain: chain.to_string(),
        destination,
        retained_after_finish: env.registry.contains(chain),
        trace: recorder.trace,
    })
}

fn start(
    queue: &HostEventQueue<SplashPresenter>,
    host: &mut ViewLifecycleHost<SplashHost>,
    options: SimulationOptions,
    recorder: &mut Recorder,
) {
    if options.start_before_delivery {
        host.on_start();
        recorder.record("start", host);
        queue.drain(host);
        recorder.record("deliver", host);
    } else {
        queue.drain(host);
        recorder.record("deliver", host);
        host.on_start();
        recorder.record("start", host);
    }
}
