use crate::types::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub key: char,
    pub action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestAction {
    SelectRecipe(usize),
    RandomRecipe,
    StartQuest,
    FoundIt,
    ScanQr,
    ContactSales,
    TalkToSales,
    Reset,
    Quit,
}

pub const GLOBAL_BINDINGS: [HotkeyBinding; 4] = [
    HotkeyBinding {
        key: 's',
        action: "start quest",
    },
    HotkeyBinding {
        key: 'c',
        action: "contact sales",
    },
    HotkeyBinding {
        key: 'x',
        action: "reset",
    },
    HotkeyBinding {
        key: 'q',
        action: "quit",
    },
];

pub const SELECTING_BINDINGS: [HotkeyBinding; 4] = [
    HotkeyBinding {
        key: '1',
        action: "recipe 1",
    },
    HotkeyBinding {
        key: '2',
        action: "recipe 2",
    },
    HotkeyBinding {
        key: '3',
        action: "recipe 3",
    },
    HotkeyBinding {
        key: '?',
        action: "surprise me",
    },
];

pub const QUESTING_BINDINGS: [HotkeyBinding; 2] = [
    HotkeyBinding {
        key: 'f',
        action: "found it",
    },
    HotkeyBinding {
        key: 'r',
        action: "restart",
    },
];

pub const CHECKOUT_BINDINGS: [HotkeyBinding; 1] = [HotkeyBinding {
    key: 'u',
    action: "qr scanned",
}];

pub const COOKING_BINDINGS: [HotkeyBinding; 2] = [
    HotkeyBinding {
        key: 'n',
        action: "start new quest",
    },
    HotkeyBinding {
        key: 't',
        action: "talk to sales",
    },
];

pub fn phase_bindings(phase: Phase) -> &'static [HotkeyBinding] {
    match phase {
        Phase::Selecting => &SELECTING_BINDINGS,
        Phase::Questing => &QUESTING_BINDINGS,
        Phase::Checkout => &CHECKOUT_BINDINGS,
        Phase::Cooking => &COOKING_BINDINGS,
    }
}

/// Resolves only the keys whose control is on screen in `phase`, so a key
/// press can never ask the controller for a transition it would reject.
pub fn action_for_key(phase: Phase, key: char) -> Option<QuestAction> {
    match (phase, key) {
        (_, 's') => Some(QuestAction::StartQuest),
        (_, 'c') => Some(QuestAction::ContactSales),
        (_, 'x') => Some(QuestAction::Reset),
        (_, 'q') => Some(QuestAction::Quit),
        (Phase::Selecting, '1'..='3') => key
            .to_digit(10)
            .map(|digit| QuestAction::SelectRecipe(digit as usize - 1)),
        (Phase::Selecting, '?') => Some(QuestAction::RandomRecipe),
        (Phase::Questing, 'f') => Some(QuestAction::FoundIt),
        (Phase::Questing, 'r') => Some(QuestAction::Reset),
        (Phase::Checkout, 'u') => Some(QuestAction::ScanQr),
        (Phase::Cooking, 'n') => Some(QuestAction::Reset),
        (Phase::Cooking, 't') => Some(QuestAction::TalkToSales),
        _ => None,
    }
}

pub fn controls_legend(phase: Phase) -> String {
    let mut bindings = phase_bindings(phase).to_vec();
    bindings.extend(GLOBAL_BINDINGS);
    format_bindings("Keys: ", &bindings)
}

fn format_bindings(prefix: &str, bindings: &[HotkeyBinding]) -> String {
    let parts = bindings
        .iter()
        .map(|binding| format!("{} {}", binding.key, binding.action))
        .collect::<Vec<_>>();
    format!("{prefix}{}", parts.join("  "))
}

#[cfg(test)]
mod tests {
    use super::{action_for_key, controls_legend, QuestAction};
    use crate::types::Phase;

    #[test]
    fn legend_lists_phase_keys_before_global_keys() {
        let legend = controls_legend(Phase::Checkout);
        assert_eq!(
            legend,
            "Keys: u qr scanned  s start quest  c contact sales  x reset  q quit"
        );
    }

    #[test]
    fn recipe_digits_are_zero_based() {
        assert_eq!(
            action_for_key(Phase::Selecting, '1'),
            Some(QuestAction::SelectRecipe(0))
        );
        assert_eq!(
            action_for_key(Phase::Selecting, '3'),
            Some(QuestAction::SelectRecipe(2))
        );
        assert_eq!(action_for_key(Phase::Selecting, '4'), None);
    }
}
