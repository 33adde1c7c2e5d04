use std::cell::Cell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::analyze::{resolve, AnalyzeRequest, AnalyzeResponse, Outcome, Reply};
use crate::config::{PageConfig, StepAnimation};
use crate::console;
use crate::error::PageError;
use crate::pipeline::{
    initial_states, Step, StepState, ALERT_NETWORK_FAILED, HINT_CARD_EXISTS, HINT_FAILED,
    HINT_SCORED, HINT_SEARCHING, STAGGERED_COMPLETION,
};

/// Everything the search flow does to the page.
pub trait SearchPage {
    fn show_modal(&self);
    fn hide_modal(&self);
    fn set_step_state(&self, step: Step, state: StepState);
    fn step_count(&self) -> usize;
    fn highlight_step(&self, index: usize);
    fn set_hint(&self, text: &str);
    fn alert(&self, message: &str);
    fn navigate(&self, path: &str);
}

pub trait AnalyzeClient {
    /// Resolves once the server answered, whatever the status; errors mean
    /// the request itself failed.
    fn analyze<'a>(
        &'a self,
        request: &'a AnalyzeRequest,
    ) -> LocalBoxFuture<'a, Result<Reply, PageError>>;
}

pub trait Scheduler {
    /// Handle of a repeating task. Dropping it cancels the task.
    type Repeating;

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> Self::Repeating;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank input, nothing was sent.
    Ignored,
    /// Another submission is still waiting for the server.
    Busy,
    Redirected(String),
    Failed(String),
}

/// Marks a submission as in flight until dropped.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct SearchFlow<P, C, S> {
    page: Rc<P>,
    client: C,
    scheduler: S,
    company_path: String,
    animation: StepAnimation,
    in_flight: Cell<bool>,
}

impl<P, C, S> SearchFlow<P, C, S>
where
    P: SearchPage + 'static,
    C: AnalyzeClient,
    S: Scheduler,
{
    pub fn new(page: Rc<P>, client: C, scheduler: S, config: &PageConfig) -> Self {
        Self {
            page,
            client,
            scheduler,
            company_path: config.company_path.clone(),
            animation: config.animation,
            in_flight: Cell::new(false),
        }
    }

    /// Puts the step UI back to its starting state.
    pub fn reset(&self) {
        match self.animation {
            StepAnimation::Descriptive { .. } => {
                for (step, state) in initial_states() {
                    self.page.set_step_state(step, state);
                }
                self.page.set_hint(HINT_SEARCHING);
            }
            StepAnimation::Cyclic { .. } => {
                if self.page.step_count() > 0 {
                    self.page.highlight_step(0);
                }
            }
        }
    }

    pub async fn submit(&self, raw_name: &str) -> Submission {
        let Some(request) = AnalyzeRequest::from_input(raw_name) else {
            return Submission::Ignored;
        };
        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            return Submission::Busy;
        };

        self.reset();
        self.page.show_modal();

        let cycle = self.start_cycle();
        let result = self.client.analyze(&request).await;
        drop(cycle);

        match result {
            Ok(reply) => self.settle(&reply),
            Err(error) => {
                console::error(&format!("analyze request for {:?} failed: {error}", request.name));
                self.fail_network()
            }
        }
    }

    const fn stagger_ms(&self) -> Option<u32> {
        match self.animation {
            StepAnimation::Descriptive { stagger_ms } => Some(stagger_ms),
            StepAnimation::Cyclic { .. } => None,
        }
    }

    fn start_cycle(&self) -> Option<S::Repeating> {
        let StepAnimation::Cyclic { interval_ms } = self.animation else {
            return None;
        };
        let count = self.page.step_count();
        if count == 0 {
            return None;
        }

        let page = Rc::clone(&self.page);
        let mut index = 0;
        Some(self.scheduler.every(
            interval_ms,
            Box::new(move || {
                index = (index + 1) % count;
                page.highlight_step(index);
            }),
        ))
    }

    fn settle(&self, reply: &Reply) -> Submission {
        let body = AnalyzeResponse::parse(&reply.body);
        let stagger_ms = self.stagger_ms();

        if stagger_ms.is_some() {
            self.page.set_step_state(Step::Search, StepState::Done);
            self.page.set_step_state(Step::Scoring, StepState::Active);
            self.page.set_hint(if body.card_exists() {
                HINT_CARD_EXISTS
            } else {
                HINT_SCORED
            });
        }

        match resolve(reply.status, &body, &self.company_path) {
            Outcome::Redirect(path) => {
                if let Some(stagger_ms) = stagger_ms {
                    self.complete_steps(stagger_ms);
                }
                self.page.navigate(&path);
                Submission::Redirected(path)
            }
            Outcome::Rejected(message) => {
                if stagger_ms.is_some() {
                    self.page.set_step_state(Step::Aggregation, StepState::Error);
                    self.page.set_hint(body.message().unwrap_or(HINT_FAILED));
                }
                self.page.hide_modal();
                self.page.alert(&message);
                Submission::Failed(message)
            }
        }
    }

    fn complete_steps(&self, stagger_ms: u32) {
        for (step, slot) in STAGGERED_COMPLETION {
            let page = Rc::clone(&self.page);
            self.scheduler.after(
                stagger_ms.saturating_mul(slot),
                Box::new(move || page.set_step_state(step, StepState::Done)),
            );
        }
    }

    fn fail_network(&self) -> Submission {
        if self.stagger_ms().is_some() {
            self.page.set_step_state(Step::Search, StepState::Error);
            self.page.set_hint(ALERT_NETWORK_FAILED);
        }
        self.page.hide_modal();
        self.page.alert(ALERT_NETWORK_FAILED);
        Submission::Failed(ALERT_NETWORK_FAILED.to_string())
    }
}
