use crate::catalog::{recipe, IngredientClue, Recipe};
use crate::errors::QuestError;
use crate::rng::IndexRng;
use crate::types::{Phase, QuestEvent};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestSession {
    pub phase: Phase,
    pub selected_recipe: Option<usize>,
    pub current_step: usize,
}

impl Default for QuestSession {
    fn default() -> Self {
        Self {
            phase: Phase::Selecting,
            selected_recipe: None,
            current_step: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub event: QuestEvent,
    pub from: Phase,
    pub to: Phase,
}

impl QuestSession {
    fn transition(&mut self, event: QuestEvent, next: Phase) -> Result<Transition, QuestError> {
        validate_transition(self.phase, next)?;
        let from = self.phase;
        self.phase = next;
        Ok(Transition {
            event,
            from,
            to: next,
        })
    }

    /// Picks `choice`, or a uniform random recipe when `choice` is `None`.
    /// Only the selection changes; phase and step are left alone.
    /// Outside `Selecting` this is an `InvalidTransition`, so a running quest
    /// can never have its recipe swapped under a step that no longer fits.
    pub fn select_recipe(
        &mut self,
        choice: Option<usize>,
        catalog: &[Recipe],
        rng: &mut dyn IndexRng,
    ) -> Result<Transition, QuestError> {
        require_event(self.phase, QuestEvent::SelectRecipe)?;
        if catalog.is_empty() {
            return Err(QuestError::InvalidArgument(
                "cannot select from an empty catalog".to_string(),
            ));
        }
        let index = match choice {
            Some(index) => recipe(catalog, index).map(|_| index)?,
            None => rng.next_index(catalog.len()),
        };
        self.selected_recipe = Some(index);
        self.transition(QuestEvent::SelectRecipe, Phase::Selecting)
    }

    /// Enters the quest at clue 0. A missing selection is filled in at random.
    pub fn start_quest(
        &mut self,
        catalog: &[Recipe],
        rng: &mut dyn IndexRng,
    ) -> Result<Transition, QuestError> {
        match self.selected_recipe {
            Some(index) if index < catalog.len() => {}
            Some(index) => {
                return Err(QuestError::InvalidArgument(format!(
                    "selected recipe {index} is no longer in the catalog"
                )));
            }
            None => {
                if catalog.is_empty() {
                    return Err(QuestError::InvalidArgument(
                        "cannot start a quest with an empty catalog".to_string(),
                    ));
                }
                self.selected_recipe = Some(rng.next_index(catalog.len()));
            }
        }
        let transition = self.transition(QuestEvent::StartQuest, Phase::Questing)?;
        self.current_step = 0;
        Ok(transition)
    }

    /// Marks the current ingredient found. The last one moves the session to
    /// checkout and leaves the step on the final clue.
    pub fn advance_clue(&mut self, catalog: &[Recipe]) -> Result<Transition, QuestError> {
        require_event(self.phase, QuestEvent::AdvanceClue)?;
        let total = self.ingredient_total(catalog)?;
        if self.current_step + 1 < total {
            let transition = self.transition(QuestEvent::AdvanceClue, Phase::Questing)?;
            self.current_step += 1;
            Ok(transition)
        } else {
            self.transition(QuestEvent::AdvanceClue, Phase::Checkout)
        }
    }

    pub fn unlock_cooking(&mut self) -> Result<Transition, QuestError> {
        require_event(self.phase, QuestEvent::UnlockCooking)?;
        self.transition(QuestEvent::UnlockCooking, Phase::Cooking)
    }

    pub fn reset(&mut self) -> Transition {
        let from = self.phase;
        *self = Self::default();
        Transition {
            event: QuestEvent::Reset,
            from,
            to: Phase::Selecting,
        }
    }

    pub fn selected<'a>(&self, catalog: &'a [Recipe]) -> Option<&'a Recipe> {
        self.selected_recipe.and_then(|index| catalog.get(index))
    }

    pub fn current_clue<'a>(&self, catalog: &'a [Recipe]) -> Option<&'a IngredientClue> {
        if self.phase != Phase::Questing {
            return None;
        }
        self.selected(catalog)?.ingredients.get(self.current_step)
    }

    /// Whether ingredient `idx` shows as collected on the checklist.
    pub fn is_collected(&self, idx: usize) -> bool {
        match self.phase {
            Phase::Selecting => false,
            Phase::Questing => idx <= self.current_step,
            Phase::Checkout | Phase::Cooking => true,
        }
    }

    pub fn is_last_clue(&self, catalog: &[Recipe]) -> bool {
        self.selected(catalog)
            .map(|recipe| self.current_step + 1 == recipe.ingredient_count())
            .unwrap_or(false)
    }

    fn ingredient_total(&self, catalog: &[Recipe]) -> Result<usize, QuestError> {
        let recipe = self.selected(catalog).ok_or_else(|| {
            QuestError::InvalidTransition("no recipe selected while questing".to_string())
        })?;
        if recipe.ingredients.is_empty() {
            return Err(QuestError::InvalidArgument(format!(
                "recipe {} has no ingredients",
                recipe.name
            )));
        }
        Ok(recipe.ingredient_count())
    }
}

/// Precondition table for each event, checked before anything is mutated.
pub fn require_event(phase: Phase, event: QuestEvent) -> Result<(), QuestError> {
    let allowed = match event {
        QuestEvent::SelectRecipe => phase == Phase::Selecting,
        QuestEvent::AdvanceClue => phase == Phase::Questing,
        QuestEvent::UnlockCooking => phase == Phase::Checkout,
        QuestEvent::StartQuest | QuestEvent::Reset => true,
    };
    if !allowed {
        return Err(QuestError::InvalidTransition(format!(
            "{} is not allowed while {}",
            event.as_str(),
            phase.as_str()
        )));
    }
    Ok(())
}

pub fn validate_transition(from: Phase, to: Phase) -> Result<(), QuestError> {
    use Phase as P;

    let allowed = match to {
        P::Selecting | P::Questing => true,
        P::Checkout => from == P::Questing,
        P::Cooking => from == P::Checkout,
    };

    if !allowed {
        return Err(QuestError::InvalidTransition(format!(
            "illegal transition: {:?} -> {:?}",
            from, to
        )));
    }
    Ok(())
}
