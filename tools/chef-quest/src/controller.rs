//! The quest state controller: sole owner of the [`QuestSession`].
//!
//! Every successful transition is published on a `watch` channel so the
//! presentation surface can re-derive its frame, and recorded in the event log.

use crate::catalog::{Recipe, CATALOG};
use crate::errors::QuestError;
use crate::fsm::{QuestSession, Transition};
use crate::logging::{JsonlLogger, LogEvent, EVENT_CONTACT, EVENT_FAULT, EVENT_TRANSITION};
use crate::rng::IndexRng;
use crate::types::QuestEvent;
use serde_json::json;
use tokio::sync::watch;

pub struct QuestController {
    session: QuestSession,
    catalog: &'static [Recipe],
    rng: Box<dyn IndexRng>,
    publisher: watch::Sender<QuestSession>,
    logger: Option<JsonlLogger>,
    log_error: Option<String>,
}

impl QuestController {
    pub fn new(rng: Box<dyn IndexRng>) -> Self {
        Self::with_catalog(&CATALOG, rng)
    }

    pub fn with_catalog(catalog: &'static [Recipe], rng: Box<dyn IndexRng>) -> Self {
        let session = QuestSession::default();
        let (publisher, _) = watch::channel(session);
        Self {
            session,
            catalog,
            rng,
            publisher,
            logger: None,
            log_error: None,
        }
    }

    pub fn with_logger(mut self, logger: JsonlLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn session(&self) -> QuestSession {
        self.session
    }

    pub fn catalog(&self) -> &'static [Recipe] {
        self.catalog
    }

    pub fn subscribe(&self) -> watch::Receiver<QuestSession> {
        self.publisher.subscribe()
    }

    /// Set once the event log failed; logging stays off afterwards.
    pub fn log_error(&self) -> Option<&str> {
        self.log_error.as_deref()
    }

    pub fn select_recipe(&mut self, choice: Option<usize>) -> Result<Transition, QuestError> {
        let result = self
            .session
            .select_recipe(choice, self.catalog, self.rng.as_mut());
        self.settle(QuestEvent::SelectRecipe, result)
    }

    pub fn start_quest(&mut self) -> Result<Transition, QuestError> {
        let result = self.session.start_quest(self.catalog, self.rng.as_mut());
        self.settle(QuestEvent::StartQuest, result)
    }

    pub fn advance_clue(&mut self) -> Result<Transition, QuestError> {
        let result = self.session.advance_clue(self.catalog);
        self.settle(QuestEvent::AdvanceClue, result)
    }

    pub fn unlock_cooking(&mut self) -> Result<Transition, QuestError> {
        let result = self.session.unlock_cooking();
        self.settle(QuestEvent::UnlockCooking, result)
    }

    pub fn reset(&mut self) -> Transition {
        let transition = self.session.reset();
        self.publish(&transition);
        transition
    }

    fn settle(
        &mut self,
        event: QuestEvent,
        result: Result<Transition, QuestError>,
    ) -> Result<Transition, QuestError> {
        match &result {
            Ok(transition) => self.publish(transition),
            Err(error) => self.record(
                "warn",
                EVENT_FAULT,
                json!({
                    "event": event.as_str(),
                    "phase": self.session.phase.as_str(),
                    "error": error.to_string(),
                }),
            ),
        }
        result
    }

    fn publish(&mut self, transition: &Transition) {
        self.publisher.send_replace(self.session);
        let recipe = self.session.selected(self.catalog).map(|recipe| recipe.name);
        self.record(
            "info",
            EVENT_TRANSITION,
            json!({
                "event": transition.event.as_str(),
                "from": transition.from.as_str(),
                "to": transition.to.as_str(),
                "recipe": recipe,
                "step": self.session.current_step,
            }),
        );
    }

    /// Logs a contact-sales attempt under the same failure rules as transitions.
    pub fn record_contact(&mut self, url: &str, opened: bool, reason: Option<&str>) {
        self.record(
            if opened { "info" } else { "warn" },
            EVENT_CONTACT,
            json!({
                "url": url,
                "opened": opened,
                "reason": reason,
            }),
        );
    }

    fn record(&mut self, level: &str, event_type: &str, payload: serde_json::Value) {
        let Some(logger) = &self.logger else {
            return;
        };
        if let Err(error) = logger.append(&LogEvent {
            level,
            event_type,
            payload,
        }) {
            self.log_error = Some(error.to_string());
            self.logger = None;
        }
    }
}
