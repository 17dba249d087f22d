use pretty_assertions::assert_eq;
use test_log::test;

use self::testing::*;
use super::*;
use crate::actor::menu_bar::Menu;
use crate::sys::headless::Request;

mod testing {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sys::headless::HeadlessWindowServer;

    pub const TERMINAL: &str = "com.example.terminal";

    pub fn w(idx: u32) -> WindowId { WindowId::new(idx) }

    pub fn screen() -> Rect { Rect::from_xywh(0.0, 0.0, 1200.0, 800.0) }

    pub fn window(title: &str) -> WindowInfo {
        WindowInfo {
            pid: 10,
            title: title.to_string(),
            frame: Rect::from_xywh(100.0, 100.0, 400.0, 300.0),
            bundle_id: None,
            app_name: None,
            is_visible: true,
            is_standard: true,
        }
    }

    pub fn app_window(title: &str, bundle_id: &str) -> WindowInfo {
        WindowInfo { bundle_id: Some(bundle_id.to_string()), ..window(title) }
    }

    pub fn config() -> Config {
        let mut config = Config::default();
        config.workspaces.float_titles = vec!["Picture in Picture".into()];
        config.workspaces.apps.insert(TERMINAL.into(), "2".into());
        config
    }

    pub fn reactor() -> Reactor<HeadlessWindowServer> {
        Reactor::new(config(), HeadlessWindowServer::new(screen()), Record::none())
    }

    pub fn started() -> Reactor<HeadlessWindowServer> {
        let mut reactor = reactor();
        reactor.handle_event(Event::Start);
        reactor.server_mut().take_requests();
        reactor
    }

    /// Registers the window with the host, then reports its creation.
    pub fn create(reactor: &mut Reactor<HeadlessWindowServer>, wid: WindowId, info: WindowInfo) {
        reactor.server_mut().add_window(wid, info.clone());
        reactor.handle_event(Event::WindowCreated(wid, info));
    }

    pub fn destroy(reactor: &mut Reactor<HeadlessWindowServer>, wid: WindowId) {
        reactor.server_mut().remove_window(wid);
        reactor.handle_event(Event::WindowDestroyed(wid));
    }

    pub fn command(reactor: &mut Reactor<HeadlessWindowServer>, cmd: Command) {
        reactor.handle_event(Event::Command(cmd));
    }

    pub fn requests(reactor: &mut Reactor<HeadlessWindowServer>) -> Vec<Request> {
        reactor.server_mut().take_requests()
    }

    pub fn active_layout(reactor: &Reactor<HeadlessWindowServer>) -> (Option<WindowId>, Vec<WindowId>) {
        let engine = reactor.layout_engine();
        let layout = engine.layout(engine.active_workspace().expect("started"));
        (layout.main(), layout.others().to_vec())
    }

    pub fn assert_consistent(reactor: &Reactor<HeadlessWindowServer>) {
        assert_eq!(reactor.layout_engine().check_invariants(), Vec::<String>::new());
    }

    pub const LONE: Rect = Rect::from_xywh(5.0, 5.0, 1185.0, 790.0);
    pub const MAIN: Rect = Rect::from_xywh(603.0, 5.0, 592.0, 790.0);
    pub const STACK_FULL: Rect = Rect::from_xywh(5.0, 5.0, 592.0, 790.0);
    pub const STACK_TOP: Rect = Rect::from_xywh(5.0, 5.0, 592.0, 392.0);
    pub const STACK_BOTTOM: Rect = Rect::from_xywh(5.0, 402.0, 592.0, 392.0);
}

#[test]
fn it_ignores_events_before_start() {
    let mut reactor = reactor();
    create(&mut reactor, w(1), window("early"));
    command(&mut reactor, Command::SwitchToWorkspace("2".into()));

    assert!(!reactor.layout_engine().is_tracked(w(1)));
    assert_eq!(reactor.active_workspace_name(), None);
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
}

#[test]
fn it_adopts_existing_windows_on_start() {
    let mut reactor = reactor();
    reactor.server_mut().add_window(w(1), app_window("zsh", TERMINAL));
    reactor.server_mut().add_window(w(2), window("editor"));
    reactor.server_mut().add_window(w(3), window("Picture in Picture"));
    reactor.handle_event(Event::Start);

    assert_eq!(reactor.active_workspace_name(), Some("1"));
    assert_eq!(active_layout(&reactor), (Some(w(2)), vec![]));
    assert!(reactor.layout_engine().is_floating(w(3)));
    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetFrame(w(1), Rect::from_xywh(1200.0, 800.0, 400.0, 300.0)),
            Request::SetFrame(w(2), LONE),
            Request::Raise(w(3)),
        ]
    );
    assert_consistent(&reactor);
}

#[test]
fn it_tiles_created_windows_and_focuses_them() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    assert_eq!(
        requests(&mut reactor),
        vec![Request::SetFrame(w(1), LONE), Request::Focus(w(1))]
    );

    create(&mut reactor, w(2), window("two"));
    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetFrame(w(1), MAIN),
            Request::SetFrame(w(2), STACK_FULL),
            Request::Focus(w(2)),
        ]
    );
    assert_eq!(active_layout(&reactor), (Some(w(1)), vec![w(2)]));
    assert_consistent(&reactor);
}

#[test]
fn it_ignores_duplicate_and_unmanageable_creations() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    requests(&mut reactor);

    reactor.handle_event(Event::WindowCreated(w(1), window("one")));
    let hidden = WindowInfo { is_visible: false, ..window("hidden") };
    create(&mut reactor, w(2), hidden);
    let panel = WindowInfo { is_standard: false, ..window("panel") };
    create(&mut reactor, w(3), panel);

    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
    assert_eq!(active_layout(&reactor), (Some(w(1)), vec![]));
    assert!(!reactor.layout_engine().is_tracked(w(2)));
    assert!(!reactor.layout_engine().is_tracked(w(3)));
    assert_consistent(&reactor);
}

#[test]
fn it_hides_windows_created_for_inactive_workspaces() {
    let mut reactor = started();
    create(&mut reactor, w(1), app_window("zsh", TERMINAL));

    let two = reactor.layout_engine().find_workspace("2").unwrap();
    assert_eq!(reactor.layout_engine().layout(two).main(), Some(w(1)));
    assert_eq!(
        requests(&mut reactor),
        vec![Request::SetFrame(w(1), Rect::from_xywh(1200.0, 800.0, 400.0, 300.0))]
    );
    assert_consistent(&reactor);
}

#[test]
fn it_leaves_zero_sized_windows_in_place_when_hiding() {
    let mut reactor = started();
    let info = WindowInfo {
        frame: Rect::from_xywh(10.0, 10.0, 0.0, 0.0),
        ..app_window("zsh", TERMINAL)
    };
    create(&mut reactor, w(1), info);

    let two = reactor.layout_engine().find_workspace("2").unwrap();
    assert_eq!(reactor.layout_engine().layout(two).main(), Some(w(1)));
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
    assert_consistent(&reactor);
}

#[test]
fn it_shows_windows_created_for_the_mapped_workspace_when_active() {
    let mut reactor = started();
    command(&mut reactor, Command::SwitchToWorkspace("2".into()));
    requests(&mut reactor);

    create(&mut reactor, w(1), app_window("zsh", TERMINAL));
    assert_eq!(
        requests(&mut reactor),
        vec![Request::SetFrame(w(1), LONE), Request::Focus(w(1))]
    );
}

#[test]
fn it_floats_windows_by_rule_without_redisplay() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("Picture in Picture"));
    assert!(reactor.layout_engine().is_floating(w(1)));
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());

    create(&mut reactor, w(2), window("two"));
    assert_eq!(
        requests(&mut reactor),
        vec![Request::SetFrame(w(2), LONE), Request::Focus(w(2)), Request::Raise(w(1))]
    );
    assert_consistent(&reactor);
}

#[test]
fn it_refocuses_after_destroying_a_stack_window() {
    let mut reactor = started();
    for i in 1..=3 {
        create(&mut reactor, w(i), window("w"));
    }
    requests(&mut reactor);

    destroy(&mut reactor, w(3));
    assert_eq!(active_layout(&reactor), (Some(w(1)), vec![w(2)]));
    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetFrame(w(1), MAIN),
            Request::SetFrame(w(2), STACK_FULL),
            Request::Focus(w(2)),
        ]
    );
    assert_consistent(&reactor);
}

#[test]
fn it_promotes_the_stack_head_when_main_is_destroyed() {
    let mut reactor = started();
    for i in 1..=3 {
        create(&mut reactor, w(i), window("w"));
    }
    requests(&mut reactor);

    destroy(&mut reactor, w(1));
    assert_eq!(active_layout(&reactor), (Some(w(2)), vec![w(3)]));
    assert_eq!(reactor.server().focused_window(), Some(w(2)));
}

#[test]
fn it_destroys_windows_on_inactive_workspaces_silently() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    create(&mut reactor, w(2), app_window("zsh", TERMINAL));
    requests(&mut reactor);

    destroy(&mut reactor, w(2));
    assert!(!reactor.layout_engine().is_tracked(w(2)));
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());

    create(&mut reactor, w(3), window("Picture in Picture"));
    destroy(&mut reactor, w(3));
    assert!(!reactor.layout_engine().is_floating(w(3)));
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
}

#[test]
fn it_snaps_dragged_tiled_windows_back() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    create(&mut reactor, w(2), window("two"));
    requests(&mut reactor);

    let dragged = Rect::from_xywh(300.0, 200.0, 592.0, 790.0);
    reactor.server_mut().move_window(w(2), dragged);
    reactor.handle_event(Event::WindowMoved(w(2), dragged));

    assert_eq!(
        requests(&mut reactor),
        vec![Request::SetFrame(w(1), MAIN), Request::SetFrame(w(2), STACK_FULL)]
    );
}

#[test]
fn it_ignores_moves_that_echo_its_own_writes() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    create(&mut reactor, w(2), window("two"));
    requests(&mut reactor);

    reactor.handle_event(Event::WindowMoved(w(1), MAIN));
    reactor.handle_event(Event::WindowMoved(w(2), STACK_FULL));
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
}

#[test]
fn it_snaps_back_off_grid_siblings_when_another_window_reports_a_move() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    create(&mut reactor, w(2), window("two"));
    requests(&mut reactor);

    reactor.server_mut().move_window(w(1), Rect::from_xywh(300.0, 200.0, 592.0, 790.0));
    reactor.handle_event(Event::WindowMoved(w(2), STACK_FULL));

    assert_eq!(
        requests(&mut reactor),
        vec![Request::SetFrame(w(1), MAIN), Request::SetFrame(w(2), STACK_FULL)]
    );
    assert_eq!(reactor.server().frame(w(1)), Some(MAIN));
}

#[test]
fn it_ignores_moves_of_windows_on_inactive_workspaces() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    create(&mut reactor, w(2), app_window("zsh", TERMINAL));
    requests(&mut reactor);

    let moved = Rect::from_xywh(300.0, 200.0, 400.0, 300.0);
    reactor.server_mut().move_window(w(2), moved);
    reactor.handle_event(Event::WindowMoved(w(2), moved));

    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
    let two = reactor.layout_engine().find_workspace("2").unwrap();
    assert_eq!(reactor.layout_engine().layout(two).main(), Some(w(2)));
}

#[test]
fn it_remembers_floating_window_moves() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("Picture in Picture"));

    let moved = Rect::from_xywh(700.0, 500.0, 400.0, 300.0);
    reactor.server_mut().move_window(w(1), moved);
    reactor.handle_event(Event::WindowMoved(w(1), moved));

    let floating = reactor.layout_engine().floating_window(w(1)).unwrap();
    assert_eq!(floating.last_known_frame, moved);
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
}

#[test]
fn it_follows_focus_to_another_workspace() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    command(&mut reactor, Command::SwitchToWorkspace("2".into()));
    create(&mut reactor, w(2), window("two"));
    requests(&mut reactor);

    reactor.server_mut().set_focused(Some(w(1)));
    reactor.handle_event(Event::WindowFocused(w(1)));

    assert_eq!(reactor.active_workspace_name(), Some("1"));
    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetFrame(w(1), LONE),
            Request::Focus(w(1)),
            Request::SetFrame(w(2), Rect::from_xywh(1200.0, 800.0, 1185.0, 790.0)),
        ]
    );
    assert_consistent(&reactor);
}

#[test]
fn it_ignores_focus_within_the_active_workspace() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    create(&mut reactor, w(2), window("two"));
    requests(&mut reactor);

    reactor.server_mut().set_focused(Some(w(1)));
    reactor.handle_event(Event::WindowFocused(w(1)));
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
}

#[test]
fn it_does_not_switch_workspaces_when_a_floating_window_is_focused() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("Picture in Picture"));
    command(&mut reactor, Command::SwitchToWorkspace("2".into()));
    create(&mut reactor, w(2), window("two"));
    requests(&mut reactor);

    reactor.server_mut().set_focused(Some(w(1)));
    reactor.handle_event(Event::WindowFocused(w(1)));

    assert_eq!(reactor.active_workspace_name(), Some("2"));
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
}

#[test]
fn it_switches_workspaces_showing_before_hiding() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    create(&mut reactor, w(2), app_window("zsh", TERMINAL));
    requests(&mut reactor);

    command(&mut reactor, Command::SwitchToWorkspace("2".into()));
    assert_eq!(reactor.active_workspace_name(), Some("2"));
    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetFrame(w(2), LONE),
            Request::Focus(w(2)),
            Request::SetFrame(w(1), Rect::from_xywh(1200.0, 800.0, 1185.0, 790.0)),
        ]
    );
}

#[test]
fn it_does_nothing_when_switching_to_the_active_workspace() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    requests(&mut reactor);

    command(&mut reactor, Command::SwitchToWorkspace("1".into()));
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
}

#[test]
fn it_cycles_through_workspaces_in_creation_order() {
    let mut reactor = started();
    command(&mut reactor, Command::NextWorkspace);
    assert_eq!(reactor.active_workspace_name(), Some("1"));

    command(&mut reactor, Command::SwitchToWorkspace("2".into()));
    command(&mut reactor, Command::SwitchToWorkspace("3".into()));
    command(&mut reactor, Command::NextWorkspace);
    assert_eq!(reactor.active_workspace_name(), Some("1"));
    command(&mut reactor, Command::PrevWorkspace);
    assert_eq!(reactor.active_workspace_name(), Some("3"));
}

#[test]
fn it_sends_the_focused_window_to_another_workspace() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    create(&mut reactor, w(2), window("two"));
    requests(&mut reactor);

    command(&mut reactor, Command::SendToWorkspace("2".into()));

    let two = reactor.layout_engine().find_workspace("2").unwrap();
    assert_eq!(reactor.layout_engine().layout(two).main(), Some(w(2)));
    assert_eq!(active_layout(&reactor), (Some(w(1)), vec![]));
    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetFrame(w(2), Rect::from_xywh(1200.0, 800.0, 592.0, 790.0)),
            Request::SetFrame(w(1), LONE),
            Request::Focus(w(1)),
        ]
    );
    assert_consistent(&reactor);
}

#[test]
fn it_does_not_send_floating_windows_or_to_the_active_workspace() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    requests(&mut reactor);

    command(&mut reactor, Command::SendToWorkspace("1".into()));
    create(&mut reactor, w(2), window("Picture in Picture"));
    reactor.server_mut().set_focused(Some(w(2)));
    command(&mut reactor, Command::SendToWorkspace("2".into()));

    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
    assert_eq!(reactor.layout_engine().find_workspace("2"), None);
}

#[test]
fn it_toggles_enlargement_of_the_focused_window() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    create(&mut reactor, w(2), window("two"));
    reactor.server_mut().set_focused(Some(w(1)));
    requests(&mut reactor);

    command(&mut reactor, Command::ToggleEnlarge);
    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetFrame(w(1), Rect::from_xywh(129.0, 5.0, 1066.0, 790.0)),
            Request::SetFrame(w(2), STACK_FULL),
            Request::Focus(w(1)),
        ]
    );

    command(&mut reactor, Command::ToggleEnlarge);
    assert_eq!(requests(&mut reactor)[0], Request::SetFrame(w(1), MAIN));
}

#[test]
fn it_toggles_floating_and_back() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    create(&mut reactor, w(2), window("two"));
    requests(&mut reactor);

    command(&mut reactor, Command::ToggleFloat);
    assert!(reactor.layout_engine().is_floating(w(2)));
    assert_eq!(active_layout(&reactor), (Some(w(1)), vec![]));
    assert_eq!(
        requests(&mut reactor),
        vec![Request::SetFrame(w(1), LONE), Request::Raise(w(2))]
    );
    assert_consistent(&reactor);

    command(&mut reactor, Command::ToggleFloat);
    assert!(!reactor.layout_engine().is_floating(w(2)));
    assert_eq!(active_layout(&reactor), (Some(w(1)), vec![w(2)]));
    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetFrame(w(1), MAIN),
            Request::SetFrame(w(2), STACK_FULL),
            Request::Focus(w(2)),
        ]
    );
    assert_consistent(&reactor);
}

#[test]
fn it_moves_focus_without_redisplay() {
    let mut reactor = started();
    for i in 1..=3 {
        create(&mut reactor, w(i), window("w"));
    }
    reactor.server_mut().set_focused(Some(w(1)));
    requests(&mut reactor);

    command(&mut reactor, Command::MoveFocus(Direction::Left));
    assert_eq!(requests(&mut reactor), vec![Request::Focus(w(2))]);
    command(&mut reactor, Command::MoveFocus(Direction::Down));
    assert_eq!(requests(&mut reactor), vec![Request::Focus(w(3))]);
    command(&mut reactor, Command::MoveFocus(Direction::Down));
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
}

#[test]
fn it_moves_focus_up_the_stack_and_back_to_main() {
    let mut reactor = started();
    for i in 1..=3 {
        create(&mut reactor, w(i), window("w"));
    }
    reactor.server_mut().set_focused(Some(w(3)));
    requests(&mut reactor);

    command(&mut reactor, Command::MoveFocus(Direction::Up));
    assert_eq!(requests(&mut reactor), vec![Request::Focus(w(2))]);
    command(&mut reactor, Command::MoveFocus(Direction::Up));
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
    command(&mut reactor, Command::MoveFocus(Direction::Right));
    assert_eq!(requests(&mut reactor), vec![Request::Focus(w(1))]);
    command(&mut reactor, Command::MoveFocus(Direction::Right));
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());
}

#[test]
fn it_moves_windows_and_redisplays() {
    let mut reactor = started();
    for i in 1..=3 {
        create(&mut reactor, w(i), window("w"));
    }
    reactor.server_mut().set_focused(Some(w(1)));
    requests(&mut reactor);

    command(&mut reactor, Command::MoveWindow(Direction::Left));
    assert_eq!(active_layout(&reactor), (Some(w(2)), vec![w(1), w(3)]));
    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetFrame(w(2), MAIN),
            Request::SetFrame(w(1), STACK_TOP),
            Request::SetFrame(w(3), STACK_BOTTOM),
            Request::Focus(w(1)),
        ]
    );
    assert_consistent(&reactor);
}

#[test]
fn it_promotes_a_stack_window_moved_right() {
    let mut reactor = started();
    for i in 1..=3 {
        create(&mut reactor, w(i), window("w"));
    }
    reactor.server_mut().set_focused(Some(w(3)));
    requests(&mut reactor);

    command(&mut reactor, Command::MoveWindow(Direction::Right));
    assert_eq!(active_layout(&reactor), (Some(w(3)), vec![w(2), w(1)]));
    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetFrame(w(3), MAIN),
            Request::SetFrame(w(2), STACK_TOP),
            Request::SetFrame(w(1), STACK_BOTTOM),
            Request::Focus(w(3)),
        ]
    );
    assert_consistent(&reactor);
}

#[test]
fn it_reorders_the_stack_with_vertical_moves() {
    let mut reactor = started();
    for i in 1..=3 {
        create(&mut reactor, w(i), window("w"));
    }
    reactor.server_mut().set_focused(Some(w(2)));
    requests(&mut reactor);

    command(&mut reactor, Command::MoveWindow(Direction::Down));
    assert_eq!(active_layout(&reactor), (Some(w(1)), vec![w(3), w(2)]));
    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetFrame(w(1), MAIN),
            Request::SetFrame(w(3), STACK_TOP),
            Request::SetFrame(w(2), STACK_BOTTOM),
            Request::Focus(w(2)),
        ]
    );

    command(&mut reactor, Command::MoveWindow(Direction::Down));
    assert_eq!(requests(&mut reactor), Vec::<Request>::new());

    command(&mut reactor, Command::MoveWindow(Direction::Up));
    assert_eq!(active_layout(&reactor), (Some(w(1)), vec![w(2), w(3)]));
    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetFrame(w(1), MAIN),
            Request::SetFrame(w(2), STACK_TOP),
            Request::SetFrame(w(3), STACK_BOTTOM),
            Request::Focus(w(2)),
        ]
    );
    assert_consistent(&reactor);
}

#[test]
fn it_closes_the_focused_window() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    requests(&mut reactor);

    command(&mut reactor, Command::CloseWindow);
    assert_eq!(requests(&mut reactor), vec![Request::Close(w(1))]);
}

#[test]
fn it_cycles_switcher_through_active_and_floating_windows() {
    let mut reactor = started();
    create(&mut reactor, w(1), window("one"));
    create(&mut reactor, w(2), app_window("zsh", TERMINAL));
    create(&mut reactor, w(3), window("Picture in Picture"));
    reactor.server_mut().set_focused(Some(w(1)));
    requests(&mut reactor);

    command(&mut reactor, Command::SwitcherNext);
    assert_eq!(requests(&mut reactor), vec![Request::Focus(w(3))]);
    command(&mut reactor, Command::SwitcherNext);
    assert_eq!(requests(&mut reactor), vec![Request::Focus(w(1))]);
    command(&mut reactor, Command::SwitcherPrevious);
    assert_eq!(requests(&mut reactor), vec![Request::Focus(w(3))]);
}

#[test]
fn it_keeps_placing_windows_after_a_rejected_frame() {
    let mut reactor = started();
    reactor.server_mut().reject_frames_for(w(1));
    create(&mut reactor, w(1), window("one"));
    create(&mut reactor, w(2), window("two"));

    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::Focus(w(1)),
            Request::SetFrame(w(2), STACK_FULL),
            Request::Focus(w(2)),
        ]
    );
}

#[test]
fn it_disables_enhanced_ui_around_frame_writes() {
    let mut reactor = started();
    reactor.server_mut().set_app_enhanced_ui(10, true);
    create(&mut reactor, w(1), window("one"));

    assert_eq!(
        requests(&mut reactor),
        vec![
            Request::SetEnhancedUi(10, false),
            Request::SetFrame(w(1), LONE),
            Request::SetEnhancedUi(10, true),
            Request::Focus(w(1)),
        ]
    );
    assert_eq!(reactor.server().enhanced_ui(10), Ok(true));
}

#[test]
fn it_places_windows_when_the_enhanced_ui_flag_is_unreadable() {
    let mut reactor = started();
    reactor.server_mut().deny_accessibility_for(10);
    create(&mut reactor, w(1), window("one"));

    assert_eq!(
        requests(&mut reactor),
        vec![Request::SetFrame(w(1), LONE), Request::Focus(w(1))]
    );
}

#[test]
fn it_reports_the_workspace_label_to_the_indicator() {
    let (tx, rx) = crate::actor::channel();
    let mut menu = Menu::new(rx);
    let mut reactor = reactor().with_menu(tx);
    reactor.handle_event(Event::Start);
    menu.drain();
    assert_eq!(menu.label(), Some("1"));

    command(&mut reactor, Command::SwitchToWorkspace("3".into()));
    menu.drain();
    assert_eq!(menu.label(), Some("3"));
}

#[test]
fn it_reports_each_workspace_switch_to_the_indicator_once() {
    let (tx, mut rx) = crate::actor::channel();
    let mut reactor = reactor().with_menu(tx);
    reactor.handle_event(Event::Start);
    create(&mut reactor, w(1), window("one"));
    while rx.try_recv().is_ok() {}

    command(&mut reactor, Command::SwitchToWorkspace("2".into()));
    let sent: Vec<_> =
        std::iter::from_fn(|| rx.try_recv().ok()).map(|(_, event)| event).collect();
    assert_eq!(sent, vec![menu_bar::Event::WorkspaceChanged("2".into())]);
}
