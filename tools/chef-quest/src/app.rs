use crate::contact::{open_mail_compose, ContactKind, ContactOutcome, SalesContact};
use crate::controller::QuestController;
use crate::errors::QuestError;
use crate::hotkeys::{action_for_key, controls_legend, QuestAction};
use crate::parallax::{parallax_offset, Offset};
use crate::runtime::ProcessRunner;
use crate::tui::QuestView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppSignal {
    Continue,
    Quit,
}

/// Routes user input to the controller and holds the purely presentational
/// bits (pointer drift, status line) that are not part of the quest session.
pub struct QuestApp {
    pub controller: QuestController,
    contact: SalesContact,
    parallax_enabled: bool,
    offset: Offset,
    status: Option<String>,
}

impl QuestApp {
    pub fn new(controller: QuestController, contact: SalesContact) -> Self {
        Self {
            controller,
            contact,
            parallax_enabled: true,
            offset: Offset::default(),
            status: None,
        }
    }

    pub fn with_parallax(mut self, enabled: bool) -> Self {
        self.parallax_enabled = enabled;
        self
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn handle_key(
        &mut self,
        key: char,
        runner: &dyn ProcessRunner,
    ) -> Result<AppSignal, QuestError> {
        let phase = self.controller.session().phase;
        match action_for_key(phase, key) {
            Some(action) => self.handle_action(action, runner),
            None => Ok(AppSignal::Continue),
        }
    }

    pub fn handle_action(
        &mut self,
        action: QuestAction,
        runner: &dyn ProcessRunner,
    ) -> Result<AppSignal, QuestError> {
        self.status = None;
        match action {
            QuestAction::SelectRecipe(index) => {
                self.controller.select_recipe(Some(index))?;
            }
            QuestAction::RandomRecipe => {
                self.controller.select_recipe(None)?;
            }
            QuestAction::StartQuest => {
                self.controller.start_quest()?;
            }
            QuestAction::FoundIt => {
                self.controller.advance_clue()?;
            }
            QuestAction::ScanQr => {
                self.controller.unlock_cooking()?;
            }
            QuestAction::Reset => {
                self.controller.reset();
            }
            QuestAction::ContactSales => self.contact_sales(ContactKind::General, runner),
            QuestAction::TalkToSales => self.contact_sales(ContactKind::Interest, runner),
            QuestAction::Quit => return Ok(AppSignal::Quit),
        }
        Ok(AppSignal::Continue)
    }

    pub fn on_pointer(&mut self, x: f32, y: f32, surface_w: f32, surface_h: f32) {
        if self.parallax_enabled {
            self.offset = parallax_offset(x, y, surface_w, surface_h);
        }
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn view(&self) -> QuestView<'static> {
        let session = self.controller.session();
        let status = self.status.clone().or_else(|| {
            self.controller
                .log_error()
                .map(|error| format!("event log disabled: {error}"))
        });
        QuestView {
            session,
            catalog: self.controller.catalog(),
            parallax_columns: self.offset.columns(),
            legend: controls_legend(session.phase),
            status,
        }
    }

    fn contact_sales(&mut self, kind: ContactKind, runner: &dyn ProcessRunner) {
        let outcome = open_mail_compose(runner, &self.contact, kind);
        let (opened, reason) = match &outcome {
            ContactOutcome::Opened { .. } => (true, None),
            ContactOutcome::Failed { reason, .. } => (false, Some(reason.clone())),
        };
        self.controller
            .record_contact(outcome.url(), opened, reason.as_deref());
        self.status = Some(if opened {
            format!("Mail draft opened: {}", outcome.url())
        } else {
            format!("Write to us: {}", self.contact.email)
        });
    }
}
