//! Integration tests for the events API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::{Duration, Instant};

    use famcal::calendar::CalendarEvent;
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_string, completion_text, test_app, test_app_with_llm};

    /// Tests listing returns the seeded calendar in start order
    #[tokio::test]
    async fn it_lists_seeded_events() {
        let (app, _store) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_string(response.into_body()).await;
        let events: Vec<CalendarEvent> = serde_json::from_str(&body).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "evt_1");
        assert_eq!(events[1].id, "evt_2");
        assert_eq!(events[1].location.as_deref(), Some("Odense"));
    }

    /// Tests deleting an existing event
    #[tokio::test]
    async fn it_deletes_an_event() {
        let (app, store) = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/events/evt_1")
                    .method("DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(store.get("evt_1").is_none());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_to_string(response.into_body()).await;
        assert!(!body.contains("evt_1"));
        assert!(body.contains("evt_2"));
    }

    /// Tests deleting a missing event returns 404 and changes nothing
    #[tokio::test]
    async fn it_returns_404_for_missing_event() {
        let (app, store) = test_app();
        let before = store.list();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events/evt_missing")
                    .method("DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(store.list(), before);
    }

    /// Tests a direct delete waits for the chat turn in flight
    #[tokio::test]
    async fn it_waits_for_running_turn_before_deleting() {
        let mut server = mockito::Server::new_async().await;
        let (app, store) = test_app_with_llm(&server.url());

        // The completion is slow and records whether evt_1 was still
        // there when the model answered
        let seen_during_turn = Arc::new(AtomicBool::new(false));
        let seen = Arc::clone(&seen_during_turn);
        let turn_store = store.clone();
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |_| {
                std::thread::sleep(Duration::from_millis(500));
                seen.store(turn_store.get("evt_1").is_some(), Ordering::SeqCst);
                completion_text("Hej!").into_bytes()
            })
            .expect(1)
            .create_async()
            .await;

        let chat_app = app.clone();
        let turn = tokio::spawn(async move {
            chat_app
                .oneshot(
                    Request::builder()
                        .uri("/api/chat")
                        .method("POST")
                        .header("content-type", "application/json")
                        .body(Body::from(r#"{"message": "Hej"}"#))
                        .unwrap(),
                )
                .await
                .unwrap()
                .status()
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        let started = Instant::now();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events/evt_1")
                    .method("DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(started.elapsed() >= Duration::from_millis(200));
        assert!(seen_during_turn.load(Ordering::SeqCst));
        assert_eq!(turn.await.unwrap(), StatusCode::OK);
        assert!(store.get("evt_1").is_none());
    }
}
