use chef_quest::hotkeys::{
    action_for_key, controls_legend, phase_bindings, QuestAction, GLOBAL_BINDINGS,
};
use chef_quest::types::Phase;

#[test]
fn global_keys_resolve_in_every_phase() {
    for phase in Phase::ALL {
        assert_eq!(action_for_key(phase, 's'), Some(QuestAction::StartQuest));
        assert_eq!(action_for_key(phase, 'c'), Some(QuestAction::ContactSales));
        assert_eq!(action_for_key(phase, 'x'), Some(QuestAction::Reset));
        assert_eq!(action_for_key(phase, 'q'), Some(QuestAction::Quit));
    }
}

#[test]
fn phase_keys_only_resolve_where_their_control_is_shown() {
    let cases = [
        ('1', Phase::Selecting, QuestAction::SelectRecipe(0)),
        ('?', Phase::Selecting, QuestAction::RandomRecipe),
        ('f', Phase::Questing, QuestAction::FoundIt),
        ('r', Phase::Questing, QuestAction::Reset),
        ('u', Phase::Checkout, QuestAction::ScanQr),
        ('n', Phase::Cooking, QuestAction::Reset),
        ('t', Phase::Cooking, QuestAction::TalkToSales),
    ];
    for (key, home, expected) in cases {
        for phase in Phase::ALL {
            let action = action_for_key(phase, key);
            if phase == home {
                assert_eq!(action, Some(expected), "key '{key}' in {phase:?}");
            } else {
                assert_eq!(action, None, "key '{key}' should be inert in {phase:?}");
            }
        }
    }
}

#[test]
fn unknown_keys_return_none() {
    for key in ['z', '0', '9', '!', ' '] {
        for phase in Phase::ALL {
            assert_eq!(action_for_key(phase, key), None, "key '{key}' in {phase:?}");
        }
    }
}

#[test]
fn every_listed_binding_resolves() {
    for phase in Phase::ALL {
        for binding in phase_bindings(phase).iter().chain(GLOBAL_BINDINGS.iter()) {
            assert!(
                action_for_key(phase, binding.key).is_some(),
                "binding '{}' ({}) dead in {phase:?}",
                binding.key,
                binding.action
            );
        }
    }
}

#[test]
fn legend_mentions_the_phase_controls() {
    assert!(controls_legend(Phase::Questing).contains("f found it"));
    assert!(controls_legend(Phase::Cooking).contains("t talk to sales"));
    assert!(!controls_legend(Phase::Selecting).contains("found it"));
}
