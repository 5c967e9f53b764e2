//! End-to-end flows against a mock generation endpoint.

use std::sync::Arc;
use std::time::Duration;

use compose_assist_config::Config;
use compose_assist_core::controls::{self, BUSY_LABEL, TRIGGER_LABEL};
use compose_assist_core::fixtures::{self, ComposeWindow};
use compose_assist_core::{
    ActivationOutcome, ComposeAssistant, FAILURE_ALERT, GenerationError, InjectedControlSet,
    RecordingNotifier,
};
use compose_assist_dom::{SharedDocument, el};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EMAIL: &str = "Hi team, the launch moved to Friday. Can everyone make it?";

struct Flow {
    page: SharedDocument,
    notifier: RecordingNotifier,
    assistant: ComposeAssistant,
}

fn config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.generator.base_url = format!("{}/api/email", server.uri());
    config.generator.timeout_secs = 5;
    config.generator.connect_timeout_secs = 2;
    config.watcher.debounce_ms = 20;
    config.watcher.cooldown_ms = 50;
    config.watcher.initial_delay_ms = 10;
    config
}

fn start(server: &MockServer) -> Flow {
    let page = SharedDocument::new(fixtures::inbox_page(EMAIL).unwrap());
    let notifier = RecordingNotifier::new();
    let mut assistant =
        ComposeAssistant::from_config(page.clone(), &config(server), Arc::new(notifier.clone()))
            .unwrap();
    assistant.start();
    Flow {
        page,
        notifier,
        assistant,
    }
}

async fn wait_for(what: &str, condition: impl Fn() -> bool) {
    let waited = tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(waited.is_ok(), "timed out waiting for {what}");
}

fn injected(page: &SharedDocument) -> Option<InjectedControlSet> {
    page.read(controls::find_control_set)
}

fn container_count(page: &SharedDocument) -> usize {
    page.read(|doc| doc.query_selector_all(&controls::container_marker()).len())
}

async fn open_and_wait(flow: &Flow) -> (ComposeWindow, InjectedControlSet) {
    let window = fixtures::open_reply_compose(&flow.page).unwrap();
    wait_for("controls", || injected(&flow.page).is_some()).await;
    (window, injected(&flow.page).unwrap())
}

fn trigger_label(page: &SharedDocument, set: &InjectedControlSet) -> String {
    page.read(|doc| doc.inner_text(set.trigger))
}

fn is_busy(page: &SharedDocument, set: &InjectedControlSet) -> bool {
    page.read(|doc| controls::is_busy(doc, set.trigger))
}

#[tokio::test]
async fn test_reply_inserted_with_selected_tone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/generate"))
        .and(body_json(serde_json::json!({
            "emailContent": EMAIL,
            "tone": "friendly"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("Sounds good!"))
        .expect(1)
        .mount(&server)
        .await;

    let flow = start(&server);
    let mut outcomes = flow.assistant.activations();
    let (window, set) = open_and_wait(&flow).await;

    flow.page
        .mutate(|doc| controls::select_tone(doc, set.tone_selector, "friendly"))
        .unwrap();
    assert!(flow.page.click(set.trigger));
    assert_eq!(trigger_label(&flow.page, &set), BUSY_LABEL);

    let outcome = outcomes.recv().await.unwrap();
    assert!(matches!(outcome, ActivationOutcome::Inserted(ref text) if text == "Sounds good!"));
    assert_eq!(
        flow.page.read(|doc| doc.inner_text(window.compose_box)),
        "Sounds good!"
    );
    assert_eq!(trigger_label(&flow.page, &set), TRIGGER_LABEL);
    assert!(!is_busy(&flow.page, &set));
    assert!(flow.notifier.alerts().is_empty());

    flow.assistant.shutdown().await;
}

#[tokio::test]
async fn test_server_error_alerts_and_restores_trigger() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream failed"))
        .expect(1)
        .mount(&server)
        .await;

    let flow = start(&server);
    let mut outcomes = flow.assistant.activations();
    let (window, set) = open_and_wait(&flow).await;

    assert!(flow.page.click(set.trigger));
    let outcome = outcomes.recv().await.unwrap();

    assert!(matches!(
        outcome,
        ActivationOutcome::Failed(GenerationError::Status { status: 500, .. })
    ));
    assert_eq!(flow.notifier.alerts(), vec![FAILURE_ALERT.to_string()]);
    assert_eq!(flow.page.read(|doc| doc.inner_text(window.compose_box)), "");
    assert_eq!(trigger_label(&flow.page, &set), TRIGGER_LABEL);
    assert!(!is_busy(&flow.page, &set));

    flow.assistant.shutdown().await;
}

#[tokio::test]
async fn test_unreachable_endpoint_alerts() {
    let server = MockServer::start().await;
    let page = SharedDocument::new(fixtures::inbox_page(EMAIL).unwrap());
    let notifier = RecordingNotifier::new();
    let mut config = config(&server);
    config.generator.base_url = "http://127.0.0.1:1/api/email".to_string();
    let assistant =
        ComposeAssistant::from_config(page.clone(), &config, Arc::new(notifier.clone())).unwrap();

    fixtures::open_reply_compose(&page).unwrap();
    let compose_assist_core::InjectionOutcome::Injected(set) = assistant.attempt_injection() else {
        panic!("expected injection");
    };

    let outcome = assistant.activate(&set).await;
    assert!(matches!(outcome, ActivationOutcome::Failed(GenerationError::Network(_))));
    assert_eq!(notifier.alerts(), vec![FAILURE_ALERT.to_string()]);
    assert!(!is_busy(&page, &set));
}

#[tokio::test]
async fn test_second_click_while_busy_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("One reply.")
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let flow = start(&server);
    let mut outcomes = flow.assistant.activations();
    let (window, set) = open_and_wait(&flow).await;

    assert!(flow.page.click(set.trigger));
    assert!(!flow.page.click(set.trigger));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!flow.page.click(set.trigger));

    assert!(outcomes.recv().await.unwrap().is_inserted());
    assert_eq!(
        flow.page.read(|doc| doc.inner_text(window.compose_box)),
        "One reply."
    );

    flow.assistant.shutdown().await;
}

#[tokio::test]
async fn test_repeated_bursts_keep_one_container() {
    let server = MockServer::start().await;
    let flow = start(&server);
    let (window, _set) = open_and_wait(&flow).await;

    for _ in 0..5 {
        flow.page.mutate(|doc| {
            doc.append_spec(window.dialog, &el("div").class("aDh")).unwrap();
        });
        tokio::time::sleep(Duration::from_millis(40)).await;
    }
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(container_count(&flow.page), 1);
    assert!(flow.assistant.stats().already_injected >= 1);
    assert_eq!(flow.assistant.stats().injected, 1);

    flow.assistant.shutdown().await;
}

#[tokio::test]
async fn test_no_compose_surface_means_no_controls() {
    let server = MockServer::start().await;
    let flow = start(&server);

    flow.page.mutate(|doc| {
        let body = doc.body();
        doc.append_spec(body, &el("div").class("notification").text("New mail"))
            .unwrap();
    });
    wait_for("startup attempt", || flow.assistant.stats().attempts >= 1).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(container_count(&flow.page), 0);
    assert_eq!(flow.assistant.stats().no_surface, 1);

    flow.assistant.shutdown().await;
}

#[tokio::test]
async fn test_reopened_compose_gets_fresh_controls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Again."))
        .mount(&server)
        .await;

    let flow = start(&server);
    let mut outcomes = flow.assistant.activations();
    let (first_window, first_set) = open_and_wait(&flow).await;

    fixtures::close_compose(&flow.page, &first_window).unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;
    let (second_window, second_set) = open_and_wait(&flow).await;

    assert_ne!(first_set.container, second_set.container);
    assert_eq!(container_count(&flow.page), 1);

    assert!(flow.page.click(second_set.trigger));
    assert!(outcomes.recv().await.unwrap().is_inserted());
    assert_eq!(
        flow.page.read(|doc| doc.inner_text(second_window.compose_box)),
        "Again."
    );

    flow.assistant.shutdown().await;
}
