use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Selecting,
    Questing,
    Checkout,
    Cooking,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Selecting,
        Phase::Questing,
        Phase::Checkout,
        Phase::Cooking,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Selecting => "selecting",
            Self::Questing => "questing",
            Self::Checkout => "checkout",
            Self::Cooking => "cooking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestEvent {
    SelectRecipe,
    StartQuest,
    AdvanceClue,
    UnlockCooking,
    Reset,
}

impl QuestEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelectRecipe => "select_recipe",
            Self::StartQuest => "start_quest",
            Self::AdvanceClue => "advance_clue",
            Self::UnlockCooking => "unlock_cooking",
            Self::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Scripted,
    Interactive,
    Snapshot,
}
