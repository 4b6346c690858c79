// =====
// TESTS: 4
// =====
//
// End-to-end channel view scenarios.
// A viewer scrolled up in a busy channel, and a permalink jump into history.

use channel_notify::model::{HighlightState, IndicatorState, MessageId, NavigationIntent};
use pretty_assertions::assert_eq;

use crate::helpers::{
    CHANNEL, OTHER_USER, SELF_USER, permalink, post, react, scroll_to_bottom, scroll_to_top,
    test_session,
};

#[test]
fn reaction_on_latest_post_does_not_touch_bar() {
    let mut session = test_session();

    // Own starting post, seen as it lands.
    post(&mut session, 1, SELF_USER);
    assert_eq!(session.indicator_state(), IndicatorState::Hidden);

    // Viewer stays scrolled to the first post while others post; the host
    // reports geometry after each row renders.
    for id in 2..=31 {
        scroll_to_top(&mut session, id - 1);
        post(&mut session, id, OTHER_USER);
    }
    scroll_to_top(&mut session, 31);
    assert!(!session.viewport().is_at_bottom);
    let before = session.indicator_state();
    assert!(before.is_visible());

    react(&mut session, 31, "smile", OTHER_USER);
    assert_eq!(session.indicator_state(), before);
    assert_eq!(
        session.history().get(MessageId(31)).map(|m| m.reactions().len()),
        Some(1)
    );
}

#[test]
fn reaction_only_while_scrolled_up_never_shows_bar() {
    let mut session = test_session();
    for id in 1..=31 {
        post(&mut session, id, if id == 1 { SELF_USER } else { OTHER_USER });
        scroll_to_bottom(&mut session, id);
    }
    post(&mut session, 32, SELF_USER);
    scroll_to_bottom(&mut session, 32);

    scroll_to_top(&mut session, 32);
    assert!(!session.viewport().is_at_bottom);
    react(&mut session, 32, "smile", OTHER_USER);

    assert_eq!(session.indicator_state(), IndicatorState::Hidden);
    assert_eq!(session.viewport().last_seen_message_id, Some(MessageId(32)));
}

#[test]
fn permalink_highlight_expires_while_posts_arrive() {
    let mut session = test_session();
    for id in 1..=20 {
        post(&mut session, id, OTHER_USER);
    }

    session.navigate(&permalink(7));
    assert!(session.highlight_state().is_highlighted(MessageId(7)));

    for id in 21..=35 {
        post(&mut session, id, OTHER_USER);
        assert!(session.highlight_state().is_highlighted(MessageId(7)));
    }

    session.advance_to(6000);
    assert_eq!(session.highlight_state(), HighlightState::Inactive);
}

#[test]
fn search_jump_into_history_then_new_posts_show_bar() {
    let mut session = test_session();
    for id in 1..=20 {
        post(&mut session, id, OTHER_USER);
    }

    session.navigate(&NavigationIntent::search_jump(CHANNEL.into(), MessageId(1)));
    assert!(!session.viewport().is_at_bottom);
    assert_eq!(session.indicator_state(), IndicatorState::Hidden);

    for id in 21..=35 {
        post(&mut session, id, OTHER_USER);
    }
    assert_eq!(session.indicator_state(), IndicatorState::Visible { unseen: 15 });

    session.advance_to(6000);
    assert_eq!(session.highlight_state(), HighlightState::Inactive);
    assert!(session.indicator_state().is_visible());

    scroll_to_bottom(&mut session, 35);
    assert_eq!(session.indicator_state(), IndicatorState::Hidden);
}
