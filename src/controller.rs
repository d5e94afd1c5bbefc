use std::collections::VecDeque;
use std::time::{Duration, Instant, SystemTime};

use anyhow::Result;

use crate::content;
use crate::host::install::{DeferredInstall, InstallError, InstallOutcome};
use crate::host::store::CooldownStore;
use crate::model::config::PromptConfig;
use crate::model::environment::EnvironmentInfo;
use crate::model::phase::Phase;
use crate::msg::Msg;
use crate::view::{PromptView, Surface, Toast};

/// Work the controller needs the host to perform.
#[derive(Debug)]
pub enum Command {
    /// Invoke the native install flow with the (single-use) handle and
    /// report back via `Msg::NativeOutcome`.
    InvokeNative(Box<dyn DeferredInstall>),
}

/// Install-prompt controller: one per page load, owned by the UI root.
///
/// Drives the `Hidden → Pending → Shown → {Dismissed, InstallAttempted}`
/// visibility policy. Construction re-runs the full policy, so re-entry
/// on a later page load is just constructing a fresh controller over the
/// same store.
#[derive(Debug)]
pub struct Controller {
    phase: Phase,
    env: EnvironmentInfo,
    config: PromptConfig,
    store: Box<dyn CooldownStore>,
    deferred: Option<Box<dyn DeferredInstall>>,
    /// Presentation-delay deadline while `Pending`.
    show_at: Option<Instant>,
    /// Scheduled cooldown re-check. Cleared on cancellation; never
    /// armed while standalone.
    recheck_at: Option<Instant>,
    toast: Option<Toast>,
    toast_until: Option<Instant>,
    instructions_open: bool,
    commands: VecDeque<Command>,
}

impl Controller {
    pub fn new(config: PromptConfig, env: EnvironmentInfo, store: Box<dyn CooldownStore>) -> Self {
        let mut controller = Self {
            phase: Phase::Hidden,
            env,
            config,
            store,
            deferred: None,
            show_at: None,
            recheck_at: None,
            toast: None,
            toast_until: None,
            instructions_open: false,
            commands: VecDeque::new(),
        };
        controller.run_policy(SystemTime::now(), Instant::now());
        controller
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn environment(&self) -> &EnvironmentInfo {
        &self.env
    }

    /// True while a captured native handle is held and unconsumed.
    pub fn holds_native_handle(&self) -> bool {
        self.deferred.is_some()
    }

    /// Next piece of work for the host, if any.
    pub fn next_command(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }

    // ── MVU: Update ──────────────────────────────────────────────

    pub fn update(&mut self, msg: Msg) -> Result<()> {
        match msg {
            Msg::InstallAvailable(handle) => self.capture_handle(handle),
            Msg::NativeOutcome(outcome) => self.handle_native_outcome(outcome),
            Msg::Accept => self.handle_accept(),
            Msg::Dismiss => self.handle_dismiss(),
            Msg::CloseInstructions => self.handle_close_instructions(),
            Msg::Tick => self.handle_tick(),
        }
        Ok(())
    }

    /// Full policy evaluation: standalone check, then cooldown gate.
    fn run_policy(&mut self, now_wall: SystemTime, now: Instant) {
        self.show_at = None;
        self.recheck_at = None;

        if self.env.is_standalone {
            tracing::info!("running standalone; prompt stays hidden");
            self.phase = Phase::Hidden;
            return;
        }

        let last_dismissed = match self.store.last_dismissed() {
            Ok(last) => last,
            Err(err) => {
                // A broken store must not suppress the feature.
                tracing::warn!("cooldown state unreadable, treating as absent: {err}");
                None
            }
        };

        if let Some(remaining) = cooldown_remaining(last_dismissed, now_wall, self.config.cooldown())
        {
            tracing::info!(remaining_secs = remaining.as_secs(), "inside cooldown window");
            self.phase = Phase::Hidden;
            self.recheck_at = Some(now + remaining);
            return;
        }

        self.phase = Phase::Pending;
        self.show_at = Some(now + self.config.show_delay());
        tracing::info!(
            platform = self.env.platform.display_name(),
            browser = self.env.browser.name(),
            "prompt pending"
        );
    }

    fn capture_handle(&mut self, handle: Box<dyn DeferredInstall>) {
        tracing::info!("native install signal captured");
        // A later signal supersedes an unconsumed earlier one.
        self.deferred = Some(handle);

        // A native offer skips the presentation delay.
        if self.phase == Phase::Pending {
            self.show();
        }
    }

    fn handle_accept(&mut self) {
        if self.phase != Phase::Shown {
            return;
        }

        self.phase = Phase::InstallAttempted;

        if let Some(handle) = self.deferred.take() {
            tracing::info!("invoking native install flow");
            self.commands.push_back(Command::InvokeNative(handle));
        } else {
            // Expected on iOS and any browser without a native offer.
            tracing::info!("no native install handle; showing manual instructions");
            self.instructions_open = true;
        }
    }

    fn handle_dismiss(&mut self) {
        if self.phase != Phase::Shown {
            return;
        }

        let now_wall = SystemTime::now();
        if let Err(err) = self.store.record_dismissed(now_wall) {
            tracing::error!("failed to persist dismissal timestamp: {err}");
        }

        self.phase = Phase::Dismissed;
        self.recheck_at = Some(Instant::now() + self.config.cooldown());
        tracing::info!(
            cooldown_hours = self.config.prompt.cooldown_hours,
            "prompt dismissed"
        );
    }

    fn handle_native_outcome(&mut self, outcome: Result<InstallOutcome, InstallError>) {
        if self.phase != Phase::InstallAttempted {
            return;
        }

        match outcome {
            Ok(InstallOutcome::Accepted) => {
                tracing::info!("native install accepted");
                self.toast = Some(Toast::install_succeeded());
                self.toast_until = Some(Instant::now() + self.config.toast_duration());
                self.phase = Phase::Hidden;
            }
            Ok(InstallOutcome::Declined) => {
                // The user answered the browser's own prompt; stay quiet
                // for the rest of the session without touching cooldown.
                tracing::info!("native install declined");
                self.phase = Phase::Hidden;
            }
            Err(err) => {
                tracing::error!("native install outcome error, falling back to manual: {err}");
                self.instructions_open = true;
            }
        }
    }

    fn handle_close_instructions(&mut self) {
        if self.instructions_open {
            self.instructions_open = false;
            self.phase = Phase::Hidden;
        }
    }

    fn handle_tick(&mut self) {
        let now = Instant::now();

        if self.toast_until.is_some_and(|until| now >= until) {
            self.toast = None;
            self.toast_until = None;
        }

        if self.phase == Phase::Pending && self.show_at.is_some_and(|deadline| now >= deadline) {
            self.show();
        }

        if self.recheck_at.is_some_and(|deadline| now >= deadline) {
            self.recheck_at = None;
            if matches!(self.phase, Phase::Hidden | Phase::Dismissed) {
                tracing::info!("cooldown re-check due");
                self.run_policy(SystemTime::now(), now);
            }
        }
    }

    fn show(&mut self) {
        self.show_at = None;
        self.phase = Phase::Shown;
        tracing::info!("showing install call-to-action");
    }

    // ── MVU: View ────────────────────────────────────────────────

    pub fn view(&self) -> PromptView {
        let surface = match self.phase {
            Phase::Shown => Surface::Modal(content::modal_copy(
                self.env.platform,
                self.env.browser,
            )),
            Phase::InstallAttempted if self.instructions_open => Surface::Instructions(
                content::instructions(self.env.platform, self.env.browser),
            ),
            _ => Surface::None,
        };

        PromptView {
            surface,
            toast: self.toast.clone(),
        }
    }
}

/// Time left inside the cooldown window, or `None` once it has elapsed
/// (or never started). A timestamp from the future is treated as stale
/// rather than suppressing the prompt indefinitely.
fn cooldown_remaining(
    last_dismissed: Option<SystemTime>,
    now: SystemTime,
    window: Duration,
) -> Option<Duration> {
    let last = last_dismissed?;
    match now.duration_since(last) {
        Ok(elapsed) if elapsed < window => Some(window - elapsed),
        _ => None,
    }
}
