use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{extract::State, http::StatusCode, routing::post, Router};
use client_core::{
    FormController, FormEvent, HttpFormTransport, SubmitOutcome, UiState,
    DEFAULT_REQUEST_TIMEOUT,
};
use shared::{
    domain::Contribution,
    messages::Language,
    protocol::decode_body,
};
use tokio::{net::TcpListener, sync::Mutex};

/// Stands in for the hosting platform: fails the first `failures` posts, then accepts.
#[derive(Clone)]
struct FlakyIngest {
    failures: usize,
    calls: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<String>>>,
}

async fn ingest(State(state): State<FlakyIngest>, body: String) -> StatusCode {
    state.bodies.lock().await.push(body);
    let call = state.calls.fetch_add(1, Ordering::SeqCst);
    if call < state.failures {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

async fn spawn_ingest(failures: usize) -> (String, FlakyIngest) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = FlakyIngest {
        failures,
        calls: Arc::new(AtomicUsize::new(0)),
        bodies: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/", post(ingest))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/landing/page"), state)
}

fn fill_in(form: &mut FormController<HttpFormTransport>) {
    for event in [
        FormEvent::SetFirstName("Erika".into()),
        FormEvent::SetLastName("Musterfrau".into()),
        FormEvent::SetEmail("erika@example.de".into()),
        FormEvent::SetOrganisation("Verein e.V.".into()),
        FormEvent::ToggleContribution(Contribution::Expertise),
        FormEvent::ToggleContribution(Contribution::Financial),
        FormEvent::SetConsent(true),
    ] {
        assert!(form.apply(event));
    }
}

#[tokio::test]
async fn signup_reaches_ingestion_after_manual_retry() {
    let (site_url, ingest) = spawn_ingest(1).await;
    let transport = HttpFormTransport::new(&site_url, DEFAULT_REQUEST_TIMEOUT).expect("transport");
    let mut form = FormController::new(transport, Language::De);
    fill_in(&mut form);

    let first = form.submit().await;
    assert_eq!(
        first,
        SubmitOutcome::Failed("Ein Fehler ist aufgetreten. Bitte versuchen Sie es erneut.".into())
    );
    assert_eq!(ingest.calls.load(Ordering::SeqCst), 1);
    assert_eq!(form.draft().organisation, "Verein e.V.");

    assert_eq!(form.submit().await, SubmitOutcome::Submitted);
    assert_eq!(form.state(), UiState::Submitted);
    assert_eq!(ingest.calls.load(Ordering::SeqCst), 2);

    let bodies = ingest.bodies.lock().await;
    assert_eq!(bodies[0], bodies[1], "retry resends the preserved draft");
    let pairs = decode_body(&bodies[1]);
    let value = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    };
    assert_eq!(value("form-name"), "gruendungskreis");
    assert_eq!(value("vorname"), "Erika");
    assert_eq!(value("organisation"), "Verein e.V.");
    assert_eq!(value("beitrag_information"), "Nein");
    assert_eq!(value("beitrag_expertise"), "Ja");
    assert_eq!(value("beitrag_finanziell"), "Ja");
    assert_eq!(value("bot-field"), "");
}

#[tokio::test]
async fn invalid_draft_makes_no_request() {
    let (site_url, ingest) = spawn_ingest(0).await;
    let transport = HttpFormTransport::new(&site_url, DEFAULT_REQUEST_TIMEOUT).expect("transport");
    let mut form = FormController::new(transport, Language::En);
    fill_in(&mut form);
    form.apply(FormEvent::SetConsent(false));

    assert!(matches!(form.submit().await, SubmitOutcome::Invalid(_)));
    assert_eq!(ingest.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreachable_site_fails_generically_and_keeps_the_draft() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let transport =
        HttpFormTransport::new(&format!("http://{addr}"), DEFAULT_REQUEST_TIMEOUT).expect("transport");
    let mut form = FormController::new(transport, Language::En);
    fill_in(&mut form);
    let before = form.draft().clone();

    let outcome = form.submit().await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed("An error occurred. Please try again.".into())
    );
    assert_eq!(
        form.state(),
        UiState::Failed {
            message: "An error occurred. Please try again.".into()
        }
    );
    assert_eq!(form.draft(), &before);
    assert!(form.can_submit());
}
