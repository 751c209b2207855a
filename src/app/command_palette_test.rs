use super::*;

fn cx(selected_len: usize) -> CommandContext {
    CommandContext {
        selected_len,
        has_undo: false,
        has_redo: true,
        has_guides: false,
    }
}

#[test]
fn every_element_type_has_an_add_command() {
    for t in ElementType::ALL {
        assert!(COMMANDS.iter().any(|c| c.id == CommandId::Add(t)), "{t:?}");
    }
}

#[test]
fn empty_query_lists_all_commands() {
    assert_eq!(filter_commands("  ").len(), COMMANDS.len());
}

#[test]
fn fuzzy_query_ranks_matches() {
    let hits = filter_commands("undo");
    assert_eq!(hits[0].0.id, CommandId::Undo);
    assert!(filter_commands("zzzz").is_empty());
}

#[test]
fn selection_commands_need_a_selection() {
    assert!(!CommandPalette::is_enabled(cx(0), CommandId::Delete));
    assert!(CommandPalette::is_enabled(cx(2), CommandId::Duplicate));
    assert!(!CommandPalette::is_enabled(cx(2), CommandId::ToggleLock));
    assert!(CommandPalette::is_enabled(cx(1), CommandId::ToggleLock));
}

#[test]
fn history_commands_follow_stacks() {
    assert!(!CommandPalette::is_enabled(cx(0), CommandId::Undo));
    assert!(CommandPalette::is_enabled(cx(0), CommandId::Redo));
    assert!(!CommandPalette::is_enabled(cx(0), CommandId::ClearGuides));
}
