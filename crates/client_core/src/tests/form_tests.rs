use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::error::{
    MALFORMED_RESPONSE_MESSAGE, TRANSPORT_FAILURE_MESSAGE, UNEXPECTED_FAILURE_MESSAGE,
};

use super::*;

struct ScriptedService {
    reply: Result<UploadResult, UploadFailure>,
    uploaded: Arc<Mutex<Vec<String>>>,
}

impl ScriptedService {
    fn replying(reply: Result<UploadResult, UploadFailure>) -> Self {
        Self {
            reply,
            uploaded: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().expect("uploaded lock").clone()
    }
}

#[async_trait]
impl CaptionService for ScriptedService {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadResult, UploadFailure> {
        self.uploaded
            .lock()
            .expect("uploaded lock")
            .push(file.name().to_string());
        self.reply.clone()
    }
}

fn image(name: &str) -> SelectedFile {
    SelectedFile::new(name, "image/jpeg", vec![0xff, 0xd8, 0xff, 0xe0])
}

fn result(captions: &[&str], songs: &[&str]) -> UploadResult {
    UploadResult {
        captions: captions.iter().map(|s| s.to_string()).collect(),
        songs: songs.iter().map(|s| s.to_string()).collect(),
    }
}

fn select(state: &FormState, file: SelectedFile) -> FormState {
    reduce(state, FormAction::FileSelected(file)).0
}

fn assert_exclusive(state: &FormState) {
    assert!(
        state.result().is_none() || state.error_message().is_none(),
        "result and error must never coexist: {state:?}"
    );
}

#[test]
fn selecting_a_file_replaces_any_previous_selection() {
    let first = select(&FormState::new(), image("first.jpg"));
    assert_eq!(first.selected_file(), Some(&image("first.jpg")));

    let failed = reduce(
        &reduce(&first, FormAction::SubmitRequested).0,
        FormAction::UploadFinished {
            token: RequestToken(1),
            outcome: Err(UploadFailure::transport("http 500")),
        },
    )
    .0;

    let second = select(&failed, image("second.png"));
    assert_eq!(second.selected_file(), Some(&image("second.png")));
    assert_eq!(second.error_message(), Some(TRANSPORT_FAILURE_MESSAGE));
}

#[test]
fn submit_without_file_only_raises_notice() {
    let state = FormState::new();
    let (next, effect) = reduce(&state, FormAction::SubmitRequested);

    assert_eq!(effect, Some(FormEffect::Notify("Please select an image file.")));
    assert_eq!(next, state);
    assert_eq!(next.last_issued(), RequestToken(0));
}

#[test]
fn submit_without_file_keeps_previous_outcome() {
    let seeded = FormState {
        outcome: FormOutcome::Ready(result(&["kept"], &["kept song"])),
        ..FormState::new()
    };
    let (next, effect) = reduce(&seeded, FormAction::SubmitRequested);

    assert!(matches!(effect, Some(FormEffect::Notify(_))));
    assert_eq!(next.result(), Some(&result(&["kept"], &["kept song"])));
}

#[test]
fn submit_issues_increasing_tokens_with_the_selected_file() {
    let state = select(&FormState::new(), image("photo.jpg"));

    let (first, effect) = reduce(&state, FormAction::SubmitRequested);
    assert_eq!(
        effect,
        Some(FormEffect::StartUpload {
            token: RequestToken(1),
            file: image("photo.jpg"),
        })
    );
    assert!(first.is_uploading());
    assert_eq!(first.selected_file(), Some(&image("photo.jpg")));

    let (second, effect) = reduce(&first, FormAction::SubmitRequested);
    assert!(matches!(
        effect,
        Some(FormEffect::StartUpload { token: RequestToken(2), .. })
    ));
    assert_eq!(second.last_issued(), RequestToken(2));
}

#[test]
fn each_failure_category_maps_to_its_own_message() {
    let cases = [
        (UploadFailure::transport("http 503"), TRANSPORT_FAILURE_MESSAGE),
        (UploadFailure::malformed("missing songs"), MALFORMED_RESPONSE_MESSAGE),
        (UploadFailure::unexpected("not json"), UNEXPECTED_FAILURE_MESSAGE),
    ];
    for (failure, expected) in cases {
        let submitted = reduce(
            &select(&FormState::new(), image("photo.png")),
            FormAction::SubmitRequested,
        )
        .0;
        let (next, effect) = reduce(
            &submitted,
            FormAction::UploadFinished {
                token: RequestToken(1),
                outcome: Err(failure),
            },
        );
        assert_eq!(effect, None);
        assert_eq!(next.error_message(), Some(expected));
        assert_eq!(next.result(), None);
        assert!(!next.is_uploading());
    }
}

#[test]
fn success_clears_previous_error_and_failure_clears_previous_result() {
    let mut state = select(&FormState::new(), image("photo.jpg"));
    let outcomes = [
        Err(UploadFailure::unexpected("boom")),
        Ok(result(&["A cat"], &["Song X"])),
        Err(UploadFailure::malformed("missing captions")),
        Ok(result(&[], &[])),
    ];

    for outcome in outcomes {
        let expect_ok = outcome.is_ok();
        let (submitted, effect) = reduce(&state, FormAction::SubmitRequested);
        let Some(FormEffect::StartUpload { token, .. }) = effect else {
            panic!("expected upload effect");
        };
        state = reduce(&submitted, FormAction::UploadFinished { token, outcome }).0;

        assert_exclusive(&state);
        assert_eq!(state.result().is_some(), expect_ok);
        assert_eq!(state.error_message().is_some(), !expect_ok);
    }
}

#[test]
fn stale_results_from_overlapping_submissions_are_discarded() {
    let state = select(&FormState::new(), image("photo.jpg"));
    let (first, _) = reduce(&state, FormAction::SubmitRequested);
    let (second, _) = reduce(&first, FormAction::SubmitRequested);

    let (after_latest, _) = reduce(
        &second,
        FormAction::UploadFinished {
            token: RequestToken(2),
            outcome: Ok(result(&["fresh"], &["new song"])),
        },
    );
    let (after_stale, effect) = reduce(
        &after_latest,
        FormAction::UploadFinished {
            token: RequestToken(1),
            outcome: Err(UploadFailure::transport("slow and failed")),
        },
    );

    assert_eq!(effect, None);
    assert_eq!(after_stale, after_latest);
    assert_eq!(after_stale.result(), Some(&result(&["fresh"], &["new song"])));
}

#[test]
fn stale_result_does_not_end_latest_upload() {
    let state = select(&FormState::new(), image("photo.jpg"));
    let (first, _) = reduce(&state, FormAction::SubmitRequested);
    let (second, _) = reduce(&first, FormAction::SubmitRequested);

    let (next, _) = reduce(
        &second,
        FormAction::UploadFinished {
            token: RequestToken(1),
            outcome: Ok(result(&["old"], &["old"])),
        },
    );
    assert!(next.is_uploading());
    assert_eq!(next.outcome(), &FormOutcome::Empty);
}

#[test]
fn render_shows_neither_region_initially() {
    let view = render(&FormState::new());
    assert_eq!(view.selected_file_label, NO_FILE_LABEL);
    assert!(!view.uploading);
    assert_eq!(view.error_line, None);
    assert_eq!(view.results, None);
}

#[test]
fn render_lists_results_in_response_order() {
    let state = FormState {
        selected_file: Some(image("photo.jpg")),
        outcome: FormOutcome::Ready(result(
            &["Sunset vibes #golden", "Chasing light"],
            &["Here Comes the Sun - The Beatles", "Golden Hour - JVKE"],
        )),
        ..FormState::new()
    };
    let view = render(&state);

    assert_eq!(view.selected_file_label, "photo.jpg");
    assert_eq!(view.error_line, None);
    let lists = view.results.clone().expect("results");
    assert_eq!(lists.captions, vec!["Sunset vibes #golden", "Chasing light"]);
    assert_eq!(
        lists.songs,
        vec!["Here Comes the Sun - The Beatles", "Golden Hour - JVKE"]
    );

    let text = view.to_text();
    let captions_at = text.find("Captions").expect("captions heading");
    let songs_at = text.find("Suggested Songs").expect("songs heading");
    assert!(captions_at < songs_at);
    assert!(text.find("Sunset vibes").expect("first") < text.find("Chasing light").expect("second"));
}

#[test]
fn render_error_state_has_no_lists() {
    let state = FormState {
        outcome: FormOutcome::Failed(MALFORMED_RESPONSE_MESSAGE.to_string()),
        ..FormState::new()
    };
    let view = render(&state);
    assert_eq!(view.error_line.as_deref(), Some(MALFORMED_RESPONSE_MESSAGE));
    assert_eq!(view.results, None);
    assert!(view.to_text().contains("Error: Unexpected response format."));
    assert!(!view.to_text().contains("Captions"));
}

#[tokio::test]
async fn drive_submission_without_file_never_calls_service() {
    let service = ScriptedService::replying(Ok(result(&["A cat"], &["Song X"])));
    let (state, notice) = drive_submission(&service, &FormState::new()).await;

    assert_eq!(notice, Some(MISSING_FILE_NOTICE));
    assert!(service.uploaded().is_empty());
    assert_eq!(state.outcome(), &FormOutcome::Empty);
}

#[tokio::test]
async fn drive_submission_applies_service_reply() {
    let service = ScriptedService::replying(Ok(result(&["A cat"], &["Song X"])));
    let selected = select(&FormState::new(), image("photo.jpg"));
    let (state, notice) = drive_submission(&service, &selected).await;

    assert_eq!(notice, None);
    assert_eq!(service.uploaded(), vec!["photo.jpg"]);
    assert_eq!(state.result(), Some(&result(&["A cat"], &["Song X"])));
    assert_eq!(state.error_message(), None);
    assert!(!state.is_uploading());
}
