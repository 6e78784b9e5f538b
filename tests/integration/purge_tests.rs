//! End-to-end executions over the pooled HTTP transport

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{TEST_CSRF, TEST_TOKEN};
    use crate::common::{ConfigFactory, IdFactory, MockEndpoint};
    use crate::{assert_err, assert_ok};
    use std::time::{Duration, Instant};
    use tokio::sync::mpsc;
    use tweet_purge::{
        ExecutionEvent, Outcome, PurgeError, SchedulerState, parse_id_list, scheduler_from_config,
    };

    /// Test that every id is deleted with the expected request shape
    #[tokio::test]
    async fn test_purge_sends_one_form_post_per_id() {
        let endpoint = MockEndpoint::start().await;
        endpoint.respond_all(200).await;

        let config = ConfigFactory::for_endpoint(&endpoint);
        let scheduler = assert_ok!(scheduler_from_config(&config));
        let ids = IdFactory::sequential(5);

        let report = assert_ok!(scheduler.submit(ids.clone()).await);

        assert_eq!(report.state, SchedulerState::Done);
        assert_eq!(report.succeeded(), 5);
        assert_eq!(report.backoff_cycles, 0);

        let requests = endpoint.deletions().await;
        assert_eq!(requests.len(), 5);
        for request in &requests {
            let header = |name: &str| {
                request
                    .headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            assert_eq!(
                header("content-type").as_deref(),
                Some("application/x-www-form-urlencoded")
            );
            assert_eq!(header("x-csrf-token").as_deref(), Some(TEST_CSRF));
            assert_eq!(
                header("authorization"),
                Some(format!("Bearer {}", TEST_TOKEN))
            );
            assert!(header("cookie").unwrap_or_default().contains("auth_token=session"));
            assert!(String::from_utf8_lossy(&request.body).starts_with("tweet_mode=extended&id="));
        }
        for id in &ids {
            assert_eq!(endpoint.deletions_of(id).await, 1);
        }
    }

    /// Test that a rate limited id is retried after the backoff window
    #[tokio::test]
    async fn test_purge_retries_after_rate_limit() {
        let endpoint = MockEndpoint::start().await;
        let ids = IdFactory::sequential(4);
        endpoint.respond_to(&ids[1], 429, 1).await;
        endpoint.respond_all(200).await;

        let config = ConfigFactory::for_endpoint(&endpoint);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = assert_ok!(scheduler_from_config(&config)).with_events(tx);

        let started = Instant::now();
        let report = assert_ok!(scheduler.submit(ids.clone()).await);

        assert_eq!(report.state, SchedulerState::Done);
        assert_eq!(report.succeeded(), 4);
        assert_eq!(report.backoff_cycles, 1);
        assert_eq!(report.waves, 2);
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert_eq!(endpoint.deletions_of(&ids[1]).await, 2);

        let mut saw_countdown = false;
        let mut last = None;
        while let Ok(event) = rx.try_recv() {
            if let ExecutionEvent::Status(text) = &event {
                saw_countdown |= text.ends_with("continuing in 1s…");
            }
            last = Some(event);
        }
        assert!(saw_countdown);
        assert_eq!(last, Some(ExecutionEvent::Finished(SchedulerState::Done)));
    }

    /// Test that client and server errors are recorded, not retried
    #[tokio::test]
    async fn test_purge_records_terminal_failures() {
        let endpoint = MockEndpoint::start().await;
        let ids = IdFactory::sequential(3);
        endpoint.respond_to(&ids[0], 404, 10).await;
        endpoint.respond_to(&ids[1], 503, 10).await;
        endpoint.respond_all(200).await;

        let config = ConfigFactory::for_endpoint(&endpoint);
        let scheduler = assert_ok!(scheduler_from_config(&config));
        let report = assert_ok!(scheduler.submit(ids.clone()).await);

        assert_eq!(report.state, SchedulerState::Done);
        assert_eq!(report.result_for(&ids[0]).unwrap().outcome, Outcome::ClientError);
        assert_eq!(report.result_for(&ids[1]).unwrap().outcome, Outcome::ServerError);
        assert_eq!(report.result_for(&ids[2]).unwrap().outcome, Outcome::Success);
        assert_eq!(endpoint.deletions().await.len(), 3);
    }

    /// Test that an unreachable endpoint yields network errors
    #[tokio::test]
    async fn test_purge_against_unreachable_endpoint() {
        let endpoint = MockEndpoint::start().await;
        let mut config = ConfigFactory::for_endpoint(&endpoint);
        config.purge.endpoint.url = "http://127.0.0.1:9/i/api/1.1/statuses/destroy.json".into();

        let scheduler = assert_ok!(scheduler_from_config(&config));
        let report = assert_ok!(scheduler.submit(IdFactory::sequential(2)).await);

        assert_eq!(report.state, SchedulerState::Done);
        assert_eq!(report.count(Outcome::NetworkError), 2);
        assert_eq!(report.backoff_cycles, 0);
    }

    /// Test that the token can be scraped from the served script
    #[tokio::test]
    async fn test_purge_with_script_credential() {
        let endpoint = MockEndpoint::start().await;
        endpoint
            .serve_script("AAAAAAAAAAAAAAAAAAAAAFromScript%3DLongerThanTheRest")
            .await;
        endpoint.respond_all(200).await;

        let mut config = ConfigFactory::for_endpoint(&endpoint);
        config.purge.credentials.token = None;
        config.purge.credentials.script_url = Some(endpoint.script_url());

        let scheduler = assert_ok!(scheduler_from_config(&config));
        let report = assert_ok!(scheduler.submit(IdFactory::sequential(1)).await);
        assert_eq!(report.succeeded(), 1);

        let requests = endpoint.deletions().await;
        let auth = requests[0]
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        assert_eq!(
            auth.as_deref(),
            Some("Bearer AAAAAAAAAAAAAAAAAAAAAFromScript%3DLongerThanTheRest")
        );
    }

    /// Test that a missing credential stops the run before any request
    #[tokio::test]
    async fn test_purge_without_credential_sends_nothing() {
        let endpoint = MockEndpoint::start().await;
        endpoint.respond_all(200).await;

        let mut config = ConfigFactory::for_endpoint(&endpoint);
        config.purge.credentials.token = None;

        let scheduler = assert_ok!(scheduler_from_config(&config));
        let error = assert_err!(scheduler.submit(IdFactory::sequential(5)).await);

        assert!(matches!(error, PurgeError::CredentialNotFound(_)));
        assert_eq!(scheduler.state(), SchedulerState::Aborted);
        assert!(endpoint.deletions().await.is_empty());
    }

    /// Test that a missing csrf cookie stops the run before any request
    #[tokio::test]
    async fn test_purge_without_csrf_cookie_sends_nothing() {
        let endpoint = MockEndpoint::start().await;
        endpoint.respond_all(200).await;

        let mut config = ConfigFactory::for_endpoint(&endpoint);
        config.purge.credentials.cookies = Some("auth_token=session".to_string());

        let scheduler = assert_ok!(scheduler_from_config(&config));
        let error = assert_err!(scheduler.submit(IdFactory::sequential(2)).await);

        assert!(matches!(error, PurgeError::MissingCsrfToken(_)));
        assert!(endpoint.deletions().await.is_empty());
    }

    /// Test that waves respect the configured cap
    #[tokio::test]
    async fn test_purge_splits_into_waves() {
        let endpoint = MockEndpoint::start().await;
        endpoint.respond_all(200).await;

        let config = ConfigFactory::with_max_concurrent(&endpoint, 4);
        let scheduler = assert_ok!(scheduler_from_config(&config));
        let report = assert_ok!(scheduler.submit(IdFactory::sequential(10)).await);

        assert_eq!(report.waves, 3);
        assert_eq!(report.succeeded(), 10);
        assert_eq!(endpoint.deletions().await.len(), 10);
    }

    /// Test that parsed status URLs reach the endpoint as bare ids
    #[tokio::test]
    async fn test_purge_from_status_urls() {
        let endpoint = MockEndpoint::start().await;
        endpoint.respond_all(200).await;

        let input = "# exported\nhttps://twitter.com/someone/status/1111\nhttps://x.com/someone/status/2222?s=20\n3333\n";
        let ids = assert_ok!(parse_id_list(input));
        assert_eq!(ids, vec!["1111", "2222", "3333"]);

        let config = ConfigFactory::for_endpoint(&endpoint);
        let scheduler = assert_ok!(scheduler_from_config(&config));
        let report = assert_ok!(scheduler.submit(ids).await);

        assert_eq!(report.succeeded(), 3);
        assert_eq!(endpoint.deletions_of("2222").await, 1);
    }

    /// Test that cancelling mid-run leaves the rest unresolved
    #[tokio::test]
    async fn test_purge_cancelled_during_backoff() {
        let endpoint = MockEndpoint::start().await;
        endpoint.respond_all(429).await;

        let mut config = ConfigFactory::for_endpoint(&endpoint);
        config.purge.executor.backoff_secs = 30;
        let scheduler = assert_ok!(scheduler_from_config(&config));

        let handle = scheduler.cancel_handle();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            handle.cancel();
        });

        let started = Instant::now();
        let report = assert_ok!(scheduler.submit(IdFactory::sequential(3)).await);

        assert_eq!(report.state, SchedulerState::Aborted);
        assert_eq!(report.unresolved.len(), 3);
        assert!(report.results.is_empty());
        assert!(started.elapsed() < Duration::from_secs(30));
    }
}
