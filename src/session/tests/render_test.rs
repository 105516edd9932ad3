use super::fixture::*;
use crate::backend_gateway::interface::{FeedbackReceipt, Gender, Health};
use crate::config::Config;
use crate::display::impl_fake::DisplayFake;
use crate::display::interface::Actions;
use crate::library::logger::impl_fake::LoggerFake;
use crate::preview_store::impl_memory::PreviewStoreMemory;
use crate::preview_store::interface::{Preview, PreviewStore};
use crate::session::core::Model;
use crate::session::render::Render;
use crate::user_input::interface::UserAction;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn renderer() -> (Render, Arc<PreviewStoreMemory>, DisplayFake) {
    let preview_store = Arc::new(PreviewStoreMemory::new(Arc::new(LoggerFake::new())));
    let display = DisplayFake::new();
    let render = Render::new(
        Arc::new(Mutex::new(display.clone())),
        preview_store.clone(),
        Config::default(),
    );
    (render, preview_store, display)
}

#[test]
fn test_idle_screen() {
    let (render, _, _) = renderer();

    let screen = render.screen(&idle(), Instant::now());

    assert_eq!(
        screen.lines,
        vec!["Drop your image here or open one (PNG, JPG, JPEG up to 10MB)".to_string()]
    );
    assert_eq!(
        screen.actions,
        Actions {
            can_select: true,
            ..Actions::default()
        }
    );
}

#[test]
fn test_preview_uses_registered_image() {
    let (render, preview_store, _) = renderer();
    let model = previewing();

    let loading = render.screen(&model, Instant::now());
    assert_eq!(loading.lines[0], "Preview: cat.png (loading)");

    preview_store
        .register(Preview(0), &cat_png())
        .expect("register");
    let screen = render.screen(&model, Instant::now());

    assert_eq!(screen.lines[0], "Preview: cat.png (image/png, 0.0 KB)");
    assert_eq!(screen.lines[1], "Ready to analyze");
    assert!(screen.actions.can_analyze);
    assert!(screen.actions.can_reset);
    assert!(!screen.actions.can_give_feedback);
}

#[test]
fn test_result_screen_offers_feedback() {
    let (render, _, _) = renderer();

    let screen = render.screen(&result_ready(), Instant::now());

    assert_eq!(screen.lines[1], "Result: Female (87.5% confidence)");
    assert_eq!(screen.lines[2], "Is this prediction correct?");
    assert!(screen.actions.can_give_feedback);
    assert_eq!(screen.actions.incorrect_label, Some(Gender::Male));
    assert!(!screen.actions.can_analyze);
}

#[test]
fn test_pending_requests_disable_actions() {
    let (render, _, _) = renderer();

    for model in [predicting(), submitting_feedback()] {
        let actions = render.screen(&model, Instant::now()).actions;
        assert!(!actions.can_select);
        assert!(!actions.can_analyze);
        assert!(!actions.can_give_feedback);
        assert_eq!(actions.incorrect_label, None);
    }
}

#[test]
fn test_feedback_done_counts_down() {
    let (render, _, _) = renderer();
    let model = Model {
        last_feedback: Some(FeedbackReceipt {
            message: Some("Model learned from your feedback instantly! (No data saved)".to_string()),
            ..FeedbackReceipt::default()
        }),
        ..feedback_done()
    };
    let done_at = done_at(&model);

    let screen = render.screen(&model, done_at + Duration::from_millis(500));

    assert_eq!(
        &screen.lines[..3],
        &[
            "Model Updated!".to_string(),
            "Model learned from your feedback instantly! (No data saved)".to_string(),
            "Starting over in 1.5s".to_string(),
        ]
    );
    assert!(!screen.actions.can_give_feedback);
}

#[test]
fn test_feedback_done_without_server_message() {
    let (render, _, _) = renderer();
    let model = feedback_done();

    let screen = render.screen(&model, done_at(&model));

    assert_eq!(
        screen.lines[1],
        "AI learned from your feedback instantly. Your image was processed but not saved."
    );
    assert_eq!(screen.lines[2], "Starting over in 2.0s");
}

#[test]
fn test_error_line_and_reset() {
    let (render, _, _) = renderer();
    let (model, _) = step(idle(), user(UserAction::Analyze));

    let screen = render.screen(&model, Instant::now());

    assert!(screen
        .lines
        .contains(&"Error: Please select an image first".to_string()));
    assert!(screen.actions.can_reset);
}

#[test]
fn test_stats_and_save_gate() {
    let (render, _, _) = renderer();

    let below = render.screen(&with_stats(idle(), 9), Instant::now());
    assert!(below
        .lines
        .contains(&"Learning stats: 9 feedback | 80% accuracy | 7 correct | 9 trainings".to_string()));
    assert!(!below.actions.can_save);

    let unlocked = render.screen(&with_stats(idle(), 10), Instant::now());
    assert!(unlocked.actions.can_save);

    let (awaiting, _) = step(with_stats(idle(), 10), user(UserAction::RequestSave));
    let screen = render.screen(&awaiting, Instant::now());
    assert!(screen.actions.awaiting_save_confirmation);
    assert!(!screen.actions.can_save);
    assert!(screen
        .lines
        .contains(&"Save the current model state? This will create a backup.".to_string()));
}

#[test]
fn test_health_line() {
    let (render, _, _) = renderer();
    let model = Model {
        health: Some(Health {
            status: "healthy".to_string(),
            model_loaded: true,
        }),
        ..idle()
    };

    let screen = render.screen(&model, Instant::now());

    assert_eq!(
        screen.lines.last().map(String::as_str),
        Some("Backend: healthy (model loaded)")
    );
}

#[test]
fn test_render_shows_on_display() {
    let (render, _, display) = renderer();

    render.render(&result_ready()).expect("render");

    let screen = display.last_screen().expect("screen");
    assert!(screen.actions.can_give_feedback);
}
