// =====
// TESTS: 11
// =====
//
// Permalink highlight lifecycle.
// Replacement, restart, expiry timing, cancellation by handle, and teardown
// with a pending timer.

use channel_notify::config::NotifyConfig;
use channel_notify::model::{ChannelId, HighlightState, MessageId, NavigationIntent};
use channel_notify::session::ChannelViewSession;
use pretty_assertions::assert_eq;
use std::time::Duration;

use crate::helpers::{CHANNEL, OTHER_USER, permalink, post, session_with_history};

#[test]
fn replacing_target_leaves_no_residual_highlight() {
    let mut session = session_with_history(50);
    session.navigate(&permalink(10));
    session.advance_to(2000);
    session.navigate(&permalink(20));
    assert!(session.highlight_state().is_highlighted(MessageId(20)));

    // Where 10's expiry would have fired.
    assert_eq!(session.advance_to(6000), 0);
    assert!(session.highlight_state().is_highlighted(MessageId(20)));

    // 20's own expiry.
    assert_eq!(session.advance_to(8000), 1);
    assert_eq!(session.highlight_state(), HighlightState::Inactive);
}

#[test]
fn reactivating_same_target_restarts_window() {
    let mut session = session_with_history(50);
    let t = 1000;
    session.advance_to(t);
    session.navigate(&permalink(7));
    session.advance_to(t + 3000);
    session.navigate(&permalink(7));

    session.advance_to(t + 6500);
    assert!(session.highlight_state().is_highlighted(MessageId(7)));

    session.advance_to(t + 9000);
    assert_eq!(session.highlight_state(), HighlightState::Inactive);
}

#[test]
fn highlight_survives_unrelated_posts_and_expires_at_duration() {
    let mut session = session_with_history(50);
    session.navigate(&permalink(7));
    assert_eq!(
        session.highlight_state(),
        HighlightState::Highlighted { message_id: MessageId(7), expires_at: 6000 }
    );

    for id in 51..=65 {
        post(&mut session, id, OTHER_USER);
        assert!(session.highlight_state().is_highlighted(MessageId(7)));
    }

    session.advance_to(5999);
    assert!(session.highlight_state().is_highlighted(MessageId(7)));
    session.advance_to(6000);
    assert_eq!(session.highlight_state(), HighlightState::Inactive);
}

#[test]
fn unknown_target_is_highlighted_optimistically() {
    let mut session = session_with_history(5);
    session.navigate(&permalink(4242));
    assert!(session.highlight_state().is_highlighted(MessageId(4242)));
    session.advance_by(6000);
    assert_eq!(session.highlight_state(), HighlightState::Inactive);
}

#[test]
fn close_with_pending_expiry_never_fires() {
    let mut session = session_with_history(50);
    session.navigate(&permalink(7));
    session.advance_to(1000);
    session.close();

    assert_eq!(session.next_deadline(), None);
    assert_eq!(session.advance_to(60_000), 0);
    assert_eq!(session.highlight_state(), HighlightState::Inactive);
    assert_eq!(session.now(), 1000);
}

#[test]
fn sessions_do_not_share_highlights() {
    let mut a = session_with_history(50);
    let mut b =
        ChannelViewSession::open(ChannelId::from("off-topic"), Some(MessageId(9)), &NotifyConfig::default());

    a.navigate(&permalink(7));
    b.navigate(&NavigationIntent::search_jump(ChannelId::from("off-topic"), MessageId(3)));
    a.close();

    b.advance_to(3000);
    assert!(b.highlight_state().is_highlighted(MessageId(3)));
    b.advance_to(6000);
    assert_eq!(b.highlight_state(), HighlightState::Inactive);
}

#[test]
fn intent_for_another_channel_is_not_applied() {
    let mut session = session_with_history(50);
    let foreign = NavigationIntent::permalink(ChannelId::from("off-topic"), MessageId(7));
    assert!(session.navigate(&foreign).is_none());
    assert_eq!(session.highlight_state(), HighlightState::Inactive);
    assert_eq!(session.next_deadline(), None);
}

#[test]
fn configured_duration_is_used() {
    let config = NotifyConfig::default().with_highlight_duration(Duration::from_millis(1500));
    let mut session = ChannelViewSession::open(ChannelId::from(CHANNEL), Some(MessageId(3)), &config);
    session.navigate(&permalink(2));
    assert_eq!(session.next_deadline(), Some(1500));
    session.advance_to(1500);
    assert_eq!(session.highlight_state(), HighlightState::Inactive);
}

#[test]
fn cancel_by_handle_before_expiry() {
    let mut session = session_with_history(50);
    let handle = session.navigate(&permalink(7)).expect("intent is for this channel");
    session.advance_to(2000);

    assert!(session.cancel_highlight(handle));
    assert_eq!(session.highlight_state(), HighlightState::Inactive);
    assert_eq!(session.next_deadline(), None);
    assert_eq!(session.advance_to(6000), 0);
}

#[test]
fn cancel_after_expiry_is_noop() {
    let mut session = session_with_history(50);
    let handle = session.navigate(&permalink(7)).expect("intent is for this channel");
    assert_eq!(session.advance_to(6000), 1);

    assert!(!session.cancel_highlight(handle));
    assert_eq!(session.highlight_state(), HighlightState::Inactive);
}

#[test]
fn cancel_with_superseded_handle_keeps_current_highlight() {
    let mut session = session_with_history(50);
    let first = session.navigate(&permalink(7)).expect("intent is for this channel");
    session.advance_to(1000);
    let second = session.navigate(&permalink(7)).expect("intent is for this channel");
    assert_ne!(first, second);

    assert!(!session.cancel_highlight(first));
    assert_eq!(
        session.highlight_state(),
        HighlightState::Highlighted { message_id: MessageId(7), expires_at: 7000 }
    );
    assert_eq!(session.next_deadline(), Some(7000));

    assert!(session.cancel_highlight(second));
    assert_eq!(session.highlight_state(), HighlightState::Inactive);
}
