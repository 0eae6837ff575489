use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use quiz_core::model::{ChoiceId, QuestionId};
use serde_json::json;
use services::{
    FetchError, QuestionSource, QuizConfig, QuizLoopService, RemoteQuestionSource,
    RemoteSourceConfig, SharedSession, SourceConfig, SourceKind, StaticQuestionSource,
};
use url::Url;

async fn serve(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    Url::parse(&format!("http://{addr}/questions")).expect("test url")
}

fn questions_body() -> serde_json::Value {
    json!({
        "questions": [
            {
                "id": 7,
                "text": "Favourite formation?",
                "choices": [
                    { "id": 1, "text": "4-4-2" },
                    { "id": 2, "text": "4-3-3" },
                    { "id": 3, "text": "3-5-2" }
                ]
            },
            {
                "id": 8,
                "text": "Home or away?",
                "choices": [
                    { "id": 1, "text": "home" },
                    { "id": 2, "text": "away" }
                ]
            }
        ]
    })
}

fn remote(endpoint: Url) -> RemoteQuestionSource {
    RemoteQuestionSource::new(RemoteSourceConfig::new(endpoint)).expect("build client")
}

#[tokio::test]
async fn fetches_and_validates_questions() {
    let endpoint = serve(Router::new().route("/questions", get(|| async { Json(questions_body()) }))).await;
    let source = remote(endpoint);

    let set = source.load().await.unwrap();
    assert_eq!(source.kind(), SourceKind::Remote);
    let ids: Vec<u64> = set.iter().map(|q| q.id().value()).collect();
    assert_eq!(ids, vec![7, 8]);
    assert_eq!(set.as_slice()[0].choices().len(), 3);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let endpoint = serve(Router::new().route(
        "/questions",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await;

    let err = remote(endpoint).load().await.unwrap_err();
    match err {
        FetchError::HttpStatus(status) => assert_eq!(status.as_u16(), 500),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let endpoint = serve(Router::new().route(
        "/questions",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(questions_body())
        }),
    ))
    .await;
    let config = RemoteSourceConfig::new(endpoint).with_timeout(Duration::from_millis(200));
    let source = RemoteQuestionSource::new(config).unwrap();

    let err = source.load().await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { after } if after == Duration::from_millis(200)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let endpoint = Url::parse(&format!("http://{addr}/questions")).unwrap();

    let err = remote(endpoint).load().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn malformed_body_leaves_session_untouched() {
    let endpoint = serve(Router::new().route(
        "/questions",
        get(|| async { Json(json!({ "items": [] })) }),
    ))
    .await;

    let session = SharedSession::default();
    session.load(StaticQuestionSource::new().load_static());
    session.set_answer(QuestionId::new(1), ChoiceId::new(2));
    let before = session.snapshot();

    let service = QuizLoopService::new(std::sync::Arc::new(remote(endpoint)));
    let err = service.restart(&session).await.unwrap_err();
    assert!(matches!(err, FetchError::MalformedBody(_)));

    let after = session.snapshot();
    assert_eq!(after.generation(), before.generation());
    assert_eq!(after.questions(), before.questions());
    assert_eq!(after.answers(), before.answers());
    assert_eq!(session.get_answer(QuestionId::new(1)), Some(ChoiceId::new(2)));
}

#[tokio::test]
async fn configured_fallback_serves_built_in_questions() {
    let endpoint = serve(Router::new().route(
        "/questions",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    ))
    .await;

    let config = QuizConfig {
        source: SourceConfig::Remote(RemoteSourceConfig::new(endpoint.clone())),
        fallback_to_static: true,
    };
    let service = QuizLoopService::from_config(&config).unwrap();
    assert!(service.has_fallback());
    let session = service.start_session().await.unwrap();
    assert_eq!(session.questions(), &StaticQuestionSource::new().load_static());

    let strict = QuizLoopService::from_config(&QuizConfig {
        fallback_to_static: false,
        ..config
    })
    .unwrap();
    assert!(matches!(
        strict.start_session().await,
        Err(FetchError::HttpStatus(_))
    ));
}
