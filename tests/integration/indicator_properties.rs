// =====
// TESTS: 9
// =====
//
// New-message bar properties.
// Reactions never surface the bar; new posts off-bottom always do, once per id.

use channel_notify::config::NotifyConfig;
use channel_notify::model::{
    ChannelEvent, ChannelId, IndicatorState, Message, MessageId, RenderedRow, UserId,
};
use channel_notify::session::ChannelViewSession;
use pretty_assertions::assert_eq;

use crate::helpers::{
    CHANNEL, OTHER_USER, SELF_USER, post, react, scroll_to_bottom, scroll_to_top, session_with_history,
    test_session, unreact,
};

// --- Reactions never transition ---

#[test]
fn reaction_sequences_off_bottom_keep_bar_hidden() {
    let emojis = ["smile", "tada", "+1"];
    let users = [SELF_USER, OTHER_USER];

    for len in 1..=12u64 {
        let mut session = session_with_history(40);
        scroll_to_top(&mut session, 40);
        assert!(!session.viewport().is_at_bottom);

        for step in 0..len {
            let idx = usize::try_from(step).unwrap();
            let target = 40 - (step % 5);
            let emoji = emojis[idx % emojis.len()];
            let user = users[idx % users.len()];
            if step % 3 == 2 {
                unreact(&mut session, target, emoji, user);
            } else {
                react(&mut session, target, emoji, user);
            }
            assert_eq!(session.indicator_state(), IndicatorState::Hidden, "len {len} step {step}");
            assert!(!session.viewport().is_at_bottom);
        }
    }
}

#[test]
fn reaction_on_unknown_message_is_harmless() {
    let mut session = session_with_history(20);
    scroll_to_top(&mut session, 20);
    assert!(!react(&mut session, 999, "smile", OTHER_USER));
    assert_eq!(session.indicator_state(), IndicatorState::Hidden);
}

#[test]
fn reaction_does_not_change_visible_count() {
    let mut session = session_with_history(20);
    scroll_to_top(&mut session, 20);
    post(&mut session, 21, OTHER_USER);
    post(&mut session, 22, OTHER_USER);
    let before = session.indicator_state();

    react(&mut session, 22, "smile", OTHER_USER);
    unreact(&mut session, 22, "smile", OTHER_USER);
    react(&mut session, 5, "tada", SELF_USER);

    assert_eq!(session.indicator_state(), before);
    assert_eq!(before, IndicatorState::Visible { unseen: 2 });
}

// --- Posts off-bottom show the bar until bottom is reached ---

#[test]
fn any_post_off_bottom_shows_bar_until_bottom() {
    for posts in 1..=10u64 {
        let mut session = session_with_history(30);
        scroll_to_top(&mut session, 30);

        for id in 31..31 + posts {
            post(&mut session, id, OTHER_USER);
            assert!(session.indicator_state().is_visible());
            // Interleaved noise does not hide it.
            react(&mut session, id, "smile", SELF_USER);
            session.handle_event(ChannelEvent::Other);
            assert!(session.indicator_state().is_visible());
        }
        assert_eq!(session.indicator_state().unseen(), usize::try_from(posts).unwrap());

        // Scrolling around without reaching the bottom keeps it.
        scroll_to_top(&mut session, 30 + posts);
        assert!(session.indicator_state().is_visible());

        scroll_to_bottom(&mut session, 30 + posts);
        assert_eq!(session.indicator_state(), IndicatorState::Hidden);
        assert_eq!(session.viewport().last_seen_message_id, Some(MessageId(30 + posts)));
    }
}

#[test]
fn posts_at_bottom_never_show_bar() {
    let mut session = test_session();
    for id in 1..=50 {
        post(&mut session, id, OTHER_USER);
        scroll_to_bottom(&mut session, id);
        assert_eq!(session.indicator_state(), IndicatorState::Hidden);
    }
    assert_eq!(session.viewport().last_seen_message_id, Some(MessageId(50)));
}

#[test]
fn jump_to_bottom_behaves_like_scrolling_down() {
    let mut session = session_with_history(30);
    scroll_to_top(&mut session, 30);
    post(&mut session, 31, OTHER_USER);
    session.jump_to_bottom();
    assert_eq!(session.indicator_state(), IndicatorState::Hidden);
    assert_eq!(session.viewport().last_seen_message_id, Some(MessageId(31)));
    assert!(session.viewport().is_at_bottom);
}

// --- Idempotence ---

#[test]
fn duplicate_post_counts_once() {
    let mut session = session_with_history(41);
    scroll_to_top(&mut session, 41);
    assert!(post(&mut session, 42, OTHER_USER));
    assert!(!post(&mut session, 42, OTHER_USER));
    assert_eq!(session.indicator_state(), IndicatorState::Visible { unseen: 1 });
    assert_eq!(session.history().len(), 42);
}

#[test]
fn post_for_another_channel_is_ignored() {
    let mut session = session_with_history(30);
    scroll_to_top(&mut session, 30);
    let foreign = Message::new(MessageId(31), ChannelId::from("off-topic"), UserId::from(OTHER_USER), "hi");
    assert!(!session.handle_event(ChannelEvent::PostCreated(foreign)));
    assert_eq!(session.indicator_state(), IndicatorState::Hidden);
    assert_eq!(session.history().len(), 30);
}

// --- Embedded configuration ---

#[test]
fn negative_tolerance_from_config_still_dismisses_bar() {
    let config: NotifyConfig = serde_json::from_str(r#"{"bottom_tolerance": -50.0}"#).unwrap();
    let mut session = ChannelViewSession::open(ChannelId::from(CHANNEL), Some(MessageId(1)), &config);
    scroll_to_top(&mut session, 40);
    post(&mut session, 2, OTHER_USER);
    assert_eq!(session.indicator_state(), IndicatorState::Visible { unseen: 1 });

    let last = RenderedRow { message_id: MessageId(2), top: 1560.0, bottom: 1600.0 };
    session.update_viewport(1000.0, 1600.0, Some(last));
    assert!(session.viewport().is_at_bottom);
    assert_eq!(session.indicator_state(), IndicatorState::Hidden);
}
