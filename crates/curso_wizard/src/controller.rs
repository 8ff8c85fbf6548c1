//! Wizard navigation and the single outstanding request.
//!
//! Forward transitions are split in two. A `begin_*` call validates the
//! action, marks the controller as loading and hands back a [`Ticket`]
//! describing the request to run. The caller runs it (inline or on a
//! background task) and passes the result to [`WizardController::complete`].
//! Only the ticket issued last is accepted; back-navigation invalidates it, so
//! a response that arrives afterwards is dropped.

use crate::WizardStep;
use curso_content::{ContentRequestor, PendingRequest, StepOutcome};
use curso_core::{Course, LessonVariation, Pillar};
use curso_error::CursoResult;
use curso_interface::GenerationDriver;
use derive_getters::Getters;
use tracing::{debug, error, info, instrument, warn};

/// A request the controller is waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Ticket {
    /// Identifier to pass back to [`WizardController::complete`]
    id: u64,
    /// What to send
    request: PendingRequest,
}

/// What [`WizardController::complete`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was stored and the wizard moved to this step
    Applied(WizardStep),
    /// The request failed; the wizard stayed on this step and raised an alert
    Failed(WizardStep),
    /// The ticket was no longer outstanding; the result was discarded
    Stale,
}

/// Navigation state of one wizard session.
///
/// # Examples
///
/// ```
/// use curso_wizard::{WizardController, WizardStep};
///
/// let mut wizard = WizardController::new();
/// assert!(wizard.begin_submit_topic("   ").is_none());
///
/// let ticket = wizard.begin_submit_topic("Fotografía").unwrap();
/// assert!(wizard.is_loading());
/// assert!(wizard.begin_submit_topic("Otra cosa").is_none());
///
/// wizard.back();
/// assert!(!wizard.is_loading());
/// assert_eq!(*wizard.step(), WizardStep::Input);
/// # let _ = ticket;
/// ```
#[derive(Debug, Default, Getters)]
pub struct WizardController {
    /// Current step
    step: WizardStep,
    /// Trimmed topic of the session
    topic: String,
    /// Pillars of the last successful pillar request
    pillars: Vec<Pillar>,
    /// Pillar the user picked
    selected_pillar: Option<Pillar>,
    /// Variations of the last successful variation request
    variations: Vec<LessonVariation>,
    /// Variation the user picked
    selected_variation: Option<LessonVariation>,
    /// The finished course, only while on the course step
    course: Option<Course>,
    /// Citations of the last successful request
    sources: Vec<String>,
    #[getter(skip)]
    alert: Option<String>,
    #[getter(skip)]
    last_ticket: u64,
    #[getter(skip)]
    outstanding: Option<u64>,
}

impl WizardController {
    /// Fresh session on the topic step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Id of the outstanding ticket.
    pub fn outstanding_ticket(&self) -> Option<u64> {
        self.outstanding
    }

    /// Take the pending user-visible alert.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    fn issue(&mut self, request: PendingRequest) -> Ticket {
        self.last_ticket += 1;
        let id = self.last_ticket;
        self.outstanding = Some(id);
        self.alert = None;
        info!(ticket = id, request = request.step_name(), step = %self.step, "Issued request");
        Ticket { id, request }
    }

    /// Start the pillar request for `topic`.
    ///
    /// Returns `None` without changing anything when a request is already
    /// outstanding, the wizard is not on the topic step, or the topic is blank.
    #[instrument(skip(self))]
    pub fn begin_submit_topic(&mut self, topic: &str) -> Option<Ticket> {
        if self.is_loading() || self.step != WizardStep::Input {
            debug!(step = %self.step, loading = self.is_loading(), "Ignoring topic submission");
            return None;
        }
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }

        self.topic = topic.to_string();
        self.sources.clear();
        Some(self.issue(PendingRequest::Pillars {
            topic: self.topic.clone(),
        }))
    }

    /// Start the variation request for the pillar at `index`.
    #[instrument(skip(self))]
    pub fn begin_select_pillar(&mut self, index: usize) -> Option<Ticket> {
        if self.is_loading() || self.step != WizardStep::Pillars {
            return None;
        }
        let pillar = self.pillars.get(index)?.clone();

        let request = PendingRequest::Variations {
            topic: self.topic.clone(),
            pillar_title: pillar.title().clone(),
        };
        self.selected_pillar = Some(pillar);
        self.sources.clear();
        Some(self.issue(request))
    }

    /// Start the course request for the variation at `index`.
    ///
    /// A no-op when no pillar is selected.
    #[instrument(skip(self))]
    pub fn begin_select_variation(&mut self, index: usize) -> Option<Ticket> {
        if self.is_loading() || self.step != WizardStep::Variations {
            return None;
        }
        let Some(pillar) = &self.selected_pillar else {
            warn!("Variation selected without a pillar");
            return None;
        };
        let variation = self.variations.get(index)?.clone();

        let request = PendingRequest::Course {
            topic: self.topic.clone(),
            pillar_title: pillar.title().clone(),
            variation_title: variation.title().clone(),
        };
        self.selected_variation = Some(variation);
        self.sources.clear();
        Some(self.issue(request))
    }

    /// Settle the request behind `ticket_id`.
    ///
    /// Loading is cleared whatever the result. On failure the step and all
    /// stored data stay as they were and an alert is raised.
    #[instrument(skip(self, result), fields(ok = result.is_ok()))]
    pub fn complete(&mut self, ticket_id: u64, result: CursoResult<StepOutcome>) -> Completion {
        if self.outstanding != Some(ticket_id) {
            debug!(outstanding = ?self.outstanding, "Discarding stale result");
            return Completion::Stale;
        }
        self.outstanding = None;

        match result {
            Ok(outcome) => self.apply(outcome),
            Err(e) => {
                error!(step = %self.step, error = %e, "Request failed");
                self.alert = Some(self.step.failure_alert().to_string());
                Completion::Failed(self.step)
            }
        }
    }

    fn apply(&mut self, outcome: StepOutcome) -> Completion {
        match (self.step, outcome) {
            (WizardStep::Input, StepOutcome::Pillars(set)) => {
                let (pillars, sources) = set.into_parts();
                self.pillars = pillars;
                self.sources = sources;
                self.selected_pillar = None;
                self.variations.clear();
                self.selected_variation = None;
                self.course = None;
            }
            (WizardStep::Pillars, StepOutcome::Variations(set)) => {
                let (variations, sources) = set.into_parts();
                self.variations = variations;
                self.sources = sources;
                self.selected_variation = None;
                self.course = None;
            }
            (WizardStep::Variations, StepOutcome::Course(course)) => {
                self.sources = course.sources().clone();
                self.course = Some(course);
            }
            (step, _) => {
                warn!(step = %step, "Result does not belong to the current step");
                return Completion::Stale;
            }
        }
        self.step = self.step.next();
        info!(step = %self.step, "Advanced");
        Completion::Applied(self.step)
    }

    /// Go back one step without fetching anything.
    ///
    /// With a request outstanding, back only cancels it and the step stays.
    /// Leaving the course step discards the course.
    #[instrument(skip(self), fields(step = %self.step))]
    pub fn back(&mut self) -> WizardStep {
        if let Some(id) = self.outstanding.take() {
            info!(ticket = id, "Cancelled outstanding request");
            return self.step;
        }
        if self.step == WizardStep::Course {
            self.course = None;
        }
        self.step = self.step.previous();
        self.step
    }

    /// Drop the whole session and return to topic entry.
    ///
    /// Ticket numbering continues, so results of tickets issued before the
    /// reset are still recognised as stale.
    pub fn reset(&mut self) {
        if let Some(id) = self.outstanding {
            info!(ticket = id, "Reset cancelled outstanding request");
        }
        *self = Self {
            last_ticket: self.last_ticket,
            ..Self::default()
        };
    }

    async fn run<D: GenerationDriver>(
        &mut self,
        requestor: &ContentRequestor<D>,
        ticket: Ticket,
    ) -> Completion {
        let result = requestor.fulfil(&ticket.request).await;
        self.complete(ticket.id, result)
    }

    /// Submit a topic and wait for the pillars.
    ///
    /// `None` when the submission was ignored.
    pub async fn submit_topic<D: GenerationDriver>(
        &mut self,
        requestor: &ContentRequestor<D>,
        topic: &str,
    ) -> Option<Completion> {
        let ticket = self.begin_submit_topic(topic)?;
        Some(self.run(requestor, ticket).await)
    }

    /// Pick a pillar and wait for its variations.
    pub async fn select_pillar<D: GenerationDriver>(
        &mut self,
        requestor: &ContentRequestor<D>,
        index: usize,
    ) -> Option<Completion> {
        let ticket = self.begin_select_pillar(index)?;
        Some(self.run(requestor, ticket).await)
    }

    /// Pick a variation and wait for the course.
    pub async fn select_variation<D: GenerationDriver>(
        &mut self,
        requestor: &ContentRequestor<D>,
        index: usize,
    ) -> Option<Completion> {
        let ticket = self.begin_select_variation(index)?;
        Some(self.run(requestor, ticket).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curso_core::PillarSet;
    use curso_error::{CursoError, PayloadError};

    fn pillars(n: usize) -> PillarSet {
        let pillars = (0..n)
            .map(|i| Pillar::new(i, format!("Pilar {}", i), "d").unwrap())
            .collect();
        PillarSet::new(pillars, vec!["https://a.example".into()])
    }

    #[test]
    fn test_ticket_carries_trimmed_topic() {
        let mut wizard = WizardController::new();
        let ticket = wizard.begin_submit_topic("  Ajedrez  ").unwrap();
        assert_eq!(
            ticket.request(),
            &PendingRequest::Pillars {
                topic: "Ajedrez".into()
            }
        );
        assert_eq!(wizard.topic(), "Ajedrez");
    }

    #[test]
    fn test_failure_keeps_step_and_raises_alert() {
        let mut wizard = WizardController::new();
        let ticket = wizard.begin_submit_topic("Ajedrez").unwrap();

        let completion = wizard.complete(
            *ticket.id(),
            Err(CursoError::from(PayloadError::malformed("no JSON"))),
        );

        assert_eq!(completion, Completion::Failed(WizardStep::Input));
        assert!(!wizard.is_loading());
        assert_eq!(*wizard.step(), WizardStep::Input);
        assert!(wizard.take_alert().unwrap().contains("error generando los temas"));
        assert!(wizard.take_alert().is_none());
    }

    #[test]
    fn test_mismatched_outcome_is_not_applied() {
        let mut wizard = WizardController::new();
        let ticket = wizard.begin_submit_topic("Ajedrez").unwrap();
        let variations = curso_core::VariationSet::new(
            vec![LessonVariation::new(0, "V", "f").unwrap()],
            vec![],
        );

        let completion = wizard.complete(*ticket.id(), Ok(StepOutcome::Variations(variations)));

        assert_eq!(completion, Completion::Stale);
        assert!(!wizard.is_loading());
        assert_eq!(*wizard.step(), WizardStep::Input);
    }

    #[test]
    fn test_pillar_index_out_of_range_ignored() {
        let mut wizard = WizardController::new();
        let ticket = wizard.begin_submit_topic("Ajedrez").unwrap();
        wizard.complete(*ticket.id(), Ok(StepOutcome::Pillars(pillars(3))));

        assert!(wizard.begin_select_pillar(3).is_none());
        assert!(!wizard.is_loading());
        assert!(wizard.selected_pillar().is_none());
        assert_eq!(wizard.sources().len(), 1);
    }

    #[test]
    fn test_reset_keeps_old_tickets_stale() {
        let mut wizard = WizardController::new();
        let ticket = wizard.begin_submit_topic("Ajedrez").unwrap();
        wizard.reset();

        assert!(!wizard.is_loading());
        let fresh = wizard.begin_submit_topic("Go").unwrap();
        assert_ne!(fresh.id(), ticket.id());
        assert_eq!(
            wizard.complete(*ticket.id(), Ok(StepOutcome::Pillars(pillars(2)))),
            Completion::Stale
        );
        assert!(wizard.is_loading());
    }
}
