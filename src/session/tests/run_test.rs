use super::fixture::*;
use crate::backend_gateway::interface::Verdict;
use crate::preview_store::interface::PreviewStore;
use crate::session::core::{Event, Phase};
use crate::user_input::interface::UserAction;

#[test]
fn test_full_session_against_fake_backend() {
    let fixture = Fixture::new();
    let client = fixture.client.clone();
    let handle = std::thread::spawn(move || client.run());

    fixture.wait_until(|model| model.stats.is_some() && model.health.is_some());

    fixture
        .actions
        .send(UserAction::SelectImage(cat_png()))
        .expect("send");
    fixture.wait_until(|model| model.phase() == Phase::Previewing);
    assert_eq!(fixture.preview_store.live_count(), 1);

    fixture.actions.send(UserAction::Analyze).expect("send");
    let model = fixture.wait_until(|model| model.phase() == Phase::ResultReady);
    assert!(model.result().is_some());

    fixture
        .actions
        .send(UserAction::GiveFeedback(Verdict::Correct))
        .expect("send");
    fixture.wait_until(|model| {
        model.phase() == Phase::Idle
            && model
                .stats
                .as_ref()
                .is_some_and(|stats| stats.total_feedback == 1)
    });

    assert_eq!(fixture.preview_store.live_count(), 0);
    assert!(fixture.display.input_clears() >= 1);
    assert!(fixture.display.last_screen().is_some());
    assert!(fixture.logger.errors().is_empty());

    fixture.client.send(Event::User(UserAction::Quit));
    let result = handle.join().expect("join");
    assert!(result.is_ok());
}

#[test]
fn test_non_image_never_reaches_backend() {
    let fixture = Fixture::new();
    let client = fixture.client.clone();
    let handle = std::thread::spawn(move || client.run());

    fixture
        .actions
        .send(UserAction::SelectImage(notes_txt()))
        .expect("send");
    let model = fixture.wait_until(|model| model.error.is_some());

    assert_eq!(model.selection(), None);
    assert_eq!(fixture.preview_store.live_count(), 0);

    fixture.actions.send(UserAction::Quit).expect("send");
    assert!(handle.join().expect("join").is_ok());
}
