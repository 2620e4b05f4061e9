use kal_ipc::{Action, Command, Config, ExecuteTarget, HostEvent, Icon, SearchResultItem};

use super::*;
use crate::bridge::testing::RecordingBridge;

fn item(id: &str) -> SearchResultItem {
    SearchResultItem::new(id, id.to_uppercase(), format!("/apps/{id}"), Icon::svg("<svg/>"))
}

fn items(ids: &[&str]) -> Vec<SearchResultItem> {
    ids.iter().map(|id| item(id)).collect()
}

fn controller() -> Controller<RecordingBridge> {
    Controller::new(RecordingBridge::new(), Config::default())
}

fn with_results(ids: &[&str]) -> Controller<RecordingBridge> {
    let mut controller = controller();
    controller.on_results_pushed(items(ids));
    controller
}

#[test]
fn next_wraps_back_to_start_after_len_steps() {
    for len in 1..=9 {
        let ids: Vec<String> = (0..len).map(|i| format!("item{i}")).collect();
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        for start in 0..len {
            let mut controller = with_results(&ids);
            for _ in 0..start {
                controller.on_navigate(Direction::Next);
            }
            assert_eq!(controller.selection(), Some(start));

            for _ in 0..len {
                controller.on_navigate(Direction::Next);
            }
            assert_eq!(controller.selection(), Some(start), "len {len} start {start}");
        }
    }
}

#[test]
fn replacement_resets_selection_regardless_of_prior_value() {
    for prior_len in 0usize..5 {
        for new_len in 0usize..5 {
            let prior: Vec<String> = (0..prior_len).map(|i| format!("p{i}")).collect();
            let prior: Vec<&str> = prior.iter().map(String::as_str).collect();
            let mut controller = with_results(&prior);
            for _ in 0..prior_len.saturating_sub(1) {
                controller.on_navigate(Direction::Next);
            }

            let next: Vec<String> = (0..new_len).map(|i| format!("n{i}")).collect();
            let next: Vec<&str> = next.iter().map(String::as_str).collect();
            controller.on_results_pushed(items(&next));

            let expected = if new_len == 0 { None } else { Some(0) };
            assert_eq!(controller.selection(), expected);
        }
    }
}

#[test]
fn empty_query_clears_locally_and_dispatches_clear() {
    let mut controller = with_results(&["a", "b", "c"]);
    controller.on_navigate(Direction::Next);

    controller.on_query_changed("").unwrap();

    assert!(controller.results().is_empty());
    assert_eq!(controller.selection(), None);
    assert_eq!(controller.bridge().sent(), vec![Command::ClearResults]);
}

#[test]
fn non_empty_query_dispatches_search_without_touching_results() {
    let mut controller = with_results(&["a", "b"]);
    controller.on_query_changed("fire").unwrap();

    assert_eq!(controller.query(), "fire");
    assert_eq!(controller.results().len(), 2);
    assert_eq!(controller.bridge().sent(), vec![Command::Search("fire".into())]);
}

#[test]
fn every_keystroke_is_dispatched() {
    let mut controller = controller();
    for text in ["f", "fi", "fir"] {
        controller.on_query_changed(text).unwrap();
    }
    assert_eq!(controller.bridge().sent().len(), 3);
}

#[test]
fn execute_without_selection_sends_nothing() {
    let mut controller = controller();
    controller.on_execute(false).unwrap();
    controller.on_execute(true).unwrap();
    assert!(controller.bridge().sent().is_empty());
}

#[test]
fn previous_from_first_wraps_to_last_then_next_twice() {
    let mut controller = with_results(&["a", "b", "c"]);
    assert_eq!(controller.selection(), Some(0));

    controller.on_navigate(Direction::Previous);
    assert_eq!(controller.selection(), Some(2));

    controller.on_navigate(Direction::Next);
    controller.on_navigate(Direction::Next);
    assert_eq!(controller.selection(), Some(1));
}

#[test]
fn empty_push_resets_selection_and_disables_execute() {
    let mut controller = with_results(&["a", "b", "c"]);
    controller.on_navigate(Direction::Previous);
    assert_eq!(controller.selection(), Some(2));

    controller.on_results_pushed(Vec::new());
    assert_eq!(controller.selection(), None);

    controller.on_execute(false).unwrap();
    assert!(controller.bridge().sent().is_empty());
}

#[test]
fn query_then_clear_dispatches_in_order() {
    let mut controller = with_results(&["x"]);
    controller.on_query_changed("abc").unwrap();
    assert_eq!(controller.results().len(), 1);

    controller.on_query_changed("").unwrap();

    assert!(controller.results().is_empty());
    assert_eq!(
        controller.bridge().sent(),
        vec![Command::Search("abc".into()), Command::ClearResults]
    );
}

#[test]
fn navigation_requests_scroll_into_view() {
    let mut controller = with_results(&["a", "b"]);
    controller.on_navigate(Direction::Next);
    controller.on_navigate(Direction::Next);

    assert_eq!(
        controller.take_effects(),
        vec![
            ViewEffect::ScrollIntoView(ScrollRequest::nearest(1)),
            ViewEffect::ScrollIntoView(ScrollRequest::nearest(0)),
        ]
    );
    assert!(controller.take_effects().is_empty());
}

#[test]
fn navigation_on_empty_list_is_a_no_op() {
    let mut controller = controller();
    assert_eq!(controller.on_navigate(Direction::Next), None);
    assert_eq!(controller.on_navigate(Direction::Previous), None);
    assert_eq!(controller.selection(), None);
    assert!(controller.take_effects().is_empty());
}

#[test]
fn execute_sends_selected_item_and_modifier() {
    let mut controller = with_results(&["a", "b"]);
    controller.on_navigate(Direction::Next);
    controller.on_execute(true).unwrap();

    assert_eq!(
        controller.bridge().sent(),
        vec![Command::Execute {
            target: ExecuteTarget::item("b"),
            modifier: true,
        }]
    );
}

#[test]
fn execute_uses_highlighted_action() {
    let mut controller = controller();
    controller.on_results_pushed(vec![
        item("file").with_actions([Action::new("open"), Action::new("open-with")]),
    ]);

    controller.on_execute(false).unwrap();
    assert_eq!(controller.on_cycle_action(Direction::Next), Some(1));
    controller.on_execute(false).unwrap();

    assert_eq!(
        controller.bridge().sent(),
        vec![
            Command::Execute {
                target: ExecuteTarget::action("open", "file"),
                modifier: false,
            },
            Command::Execute {
                target: ExecuteTarget::action("open-with", "file"),
                modifier: false,
            },
        ]
    );
}

#[test]
fn action_cursor_wraps_and_resets_on_selection_change() {
    let mut controller = controller();
    controller.on_results_pushed(vec![
        item("a").with_actions([Action::new("x"), Action::new("y"), Action::new("z")]),
        item("b"),
    ]);

    assert_eq!(controller.on_cycle_action(Direction::Previous), Some(2));
    assert_eq!(controller.on_cycle_action(Direction::Next), Some(0));
    controller.on_cycle_action(Direction::Next);
    assert_eq!(controller.action_cursor(), 1);

    controller.on_navigate(Direction::Next);
    assert_eq!(controller.action_cursor(), 0);
    assert_eq!(controller.on_cycle_action(Direction::Next), None);
}

#[test]
fn confirmation_items_execute_on_first_press() {
    let mut controller = controller();
    controller.on_results_pushed(vec![item("shutdown").needing_confirmation(), item("b")]);

    controller.on_execute(false).unwrap();

    assert_eq!(
        controller.bridge().sent(),
        vec![Command::Execute {
            target: ExecuteTarget::item("shutdown"),
            modifier: false,
        }]
    );
    assert!(controller.take_effects().is_empty());
}

#[test]
fn escape_hides_without_clearing_state() {
    let mut controller = with_results(&["a", "b"]);
    controller.on_query_changed("ab").unwrap();
    controller.bridge().clear();

    controller.on_escape().unwrap();

    assert_eq!(controller.bridge().sent(), vec![Command::HideMainWindow]);
    assert_eq!(controller.query(), "ab");
    assert_eq!(controller.results().len(), 2);
    assert_eq!(controller.selection(), Some(0));
}

#[test]
fn focus_request_queues_focus_effect() {
    let mut controller = controller();
    controller.handle_event(&HostEvent::FocusInput);
    assert_eq!(controller.take_effects(), vec![ViewEffect::FocusInput]);
}

#[test]
fn show_in_dir_sends_selection_index() {
    let mut controller = with_results(&["a", "b", "c"]);
    controller.on_show_in_dir().unwrap();
    controller.on_navigate(Direction::Previous);
    controller.on_show_in_dir().unwrap();

    assert_eq!(
        controller.bridge().sent(),
        vec![Command::ShowItemInDir(0), Command::ShowItemInDir(2)]
    );

    let mut empty = self::controller();
    empty.on_show_in_dir().unwrap();
    assert!(empty.bridge().sent().is_empty());
}

#[test]
fn refresh_flag_follows_host_completion() {
    let mut controller = controller();
    controller.on_refresh_index().unwrap();
    assert!(controller.is_refreshing());
    assert_eq!(controller.bridge().sent(), vec![Command::RefreshIndex]);

    controller.handle_event(&HostEvent::RefreshingIndexFinished);
    assert!(!controller.is_refreshing());
}

#[test]
fn failed_refresh_does_not_leave_flag_set() {
    let mut controller = controller();
    controller.bridge().disconnect();
    assert!(matches!(
        controller.on_refresh_index(),
        Err(BridgeError::Disconnected)
    ));
    assert!(!controller.is_refreshing());
}

#[test]
fn transport_failures_are_returned() {
    let mut controller = with_results(&["a"]);
    controller.bridge().disconnect();
    assert!(controller.on_query_changed("a").is_err());
    assert!(controller.on_execute(false).is_err());
    assert!(controller.on_escape().is_err());
}

#[test]
fn latest_push_wins() {
    let mut controller = controller();
    controller.on_query_changed("a").unwrap();
    controller.on_query_changed("ab").unwrap();

    controller.handle_event(&HostEvent::Results(items(&["ab1"])));
    controller.handle_event(&HostEvent::Results(items(&["a1", "a2"])));

    let ids: Vec<_> = controller.results().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a1", "a2"]);
}

#[test]
fn host_clear_and_config_events_apply() {
    let mut controller = with_results(&["a"]);
    controller.handle_event(&HostEvent::ClearResults);
    assert!(controller.results().is_empty());
    assert_eq!(controller.selection(), None);

    let mut config = Config::default();
    config.general.tab_through_action_buttons = false;
    controller.handle_event(&HostEvent::UpdateConfig(Box::new(config.clone())));
    assert_eq!(controller.config(), &config);
}

#[test]
fn keys_route_to_operations() {
    let mut controller = with_results(&["a", "b", "c"]);

    assert!(controller.handle_key(Key::ArrowUp.into()).unwrap());
    assert_eq!(controller.selection(), Some(2));
    assert!(controller.handle_key(Key::ArrowDown.into()).unwrap());
    assert_eq!(controller.selection(), Some(0));

    assert!(controller.handle_key(KeyInput::new(Key::Enter).with_shift()).unwrap());
    assert!(controller.handle_key(KeyInput::new(Key::Char('o')).with_ctrl()).unwrap());
    assert!(controller.handle_key(Key::F5.into()).unwrap());
    assert!(controller.handle_key(Key::Escape.into()).unwrap());
    assert!(!controller.handle_key(Key::Char('o').into()).unwrap());

    assert_eq!(
        controller.bridge().sent(),
        vec![
            Command::Execute {
                target: ExecuteTarget::item("a"),
                modifier: true,
            },
            Command::ShowItemInDir(0),
            Command::RefreshIndex,
            Command::HideMainWindow,
        ]
    );
}

#[test]
fn tab_cycles_actions_or_moves_selection() {
    let mut controller = controller();
    controller.on_results_pushed(vec![
        item("a").with_actions([Action::new("x"), Action::new("y")]),
        item("b"),
    ]);

    controller.handle_key(Key::Tab.into()).unwrap();
    assert_eq!(controller.selection(), Some(0));
    assert_eq!(controller.action_cursor(), 1);

    let mut config = Config::default();
    config.general.tab_through_action_buttons = false;
    controller.on_config_updated(config);

    controller.handle_key(Key::Tab.into()).unwrap();
    assert_eq!(controller.selection(), Some(1));

    // No actions on `b`, so Shift+Tab falls back to moving the selection
    // even when cycling is enabled.
    controller.on_config_updated(Config::default());
    controller.handle_key(KeyInput::new(Key::Tab).with_shift()).unwrap();
    assert_eq!(controller.selection(), Some(0));
}
