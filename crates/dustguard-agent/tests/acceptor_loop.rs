//! Acceptor loop behaviour against an in-memory exchange.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use dustguard_agent::acceptor::DustAcceptor;
use dustguard_agent::obs::AgentMetrics;
use dustguard_core::error::{DustGuardError, ErrorClass};
use dustguard_core::DustLimitPolicy;

mod common;
use common::{request, MockClient};

fn acceptor(timeout: Duration, metrics: Arc<AgentMetrics>) -> DustAcceptor {
    DustAcceptor::new(Arc::new(DustLimitPolicy::default()), timeout, metrics)
}

#[tokio::test]
async fn burst_gets_one_decision_per_request_in_order() {
    let limits: Vec<u64> = (0..50u64).map(|i| 300 + i * 15).collect();
    let reqs = limits
        .iter()
        .enumerate()
        .map(|(i, d)| Ok(request(i as u8, *d)))
        .collect();
    let (client, mut rx) = MockClient::with_requests(reqs, 64);
    let metrics = Arc::new(AgentMetrics::default());

    let err = acceptor(Duration::from_secs(1), Arc::clone(&metrics))
        .run(&client)
        .await
        .expect_err("loop only ends with an error");
    assert!(matches!(err, DustGuardError::AcceptorClosed));

    let mut accepted = 0;
    for (i, d) in limits.iter().enumerate() {
        let resp = rx.try_recv().expect("one response per request");
        assert_eq!(resp.pending_chan_id, vec![i as u8; 32], "order broken at {i}");
        let expect = (330..=990).contains(d);
        assert_eq!(resp.decision.accept, expect, "dust_limit={d}");
        assert_eq!(resp.decision.reason.is_some(), !expect, "dust_limit={d}");
        if expect {
            accepted += 1;
        }
    }
    assert!(rx.try_recv().is_err(), "no extra responses");

    assert_eq!(metrics.decisions.get(&[("outcome", "accept")]), accepted);
    assert_eq!(metrics.decisions.get(&[("outcome", "reject")]), 50 - accepted);
    assert_eq!(metrics.send_timeouts.get(&[]), 0);
}

#[tokio::test]
async fn boundary_limits() {
    let reqs = vec![
        Ok(request(1, 330)),
        Ok(request(2, 329)),
        Ok(request(3, 990)),
        Ok(request(4, 991)),
    ];
    let (client, mut rx) = MockClient::with_requests(reqs, 8);
    let _ = acceptor(Duration::from_secs(1), Arc::default()).run(&client).await;

    let got: Vec<bool> = (0..4).map(|_| rx.try_recv().unwrap().decision.accept).collect();
    assert_eq!(got, vec![true, false, true, false]);
}

#[tokio::test]
async fn transport_error_ends_loop() {
    let reqs = vec![
        Ok(request(1, 500)),
        Err(DustGuardError::AcceptorStream("Unavailable: connection reset".into())),
        Ok(request(2, 500)),
    ];
    let (client, mut rx) = MockClient::with_requests(reqs, 8);

    let err = acceptor(Duration::from_secs(1), Arc::default())
        .run(&client)
        .await
        .expect_err("must fail");
    assert_eq!(err.class(), ErrorClass::Transport);
    assert!(err.to_string().contains("connection reset"));

    assert!(rx.try_recv().unwrap().decision.accept);
    assert!(rx.try_recv().is_err(), "requests after the error are not answered");
}

#[tokio::test]
async fn registration_failure_is_setup_error() {
    let client = MockClient::failing_acceptor(DustGuardError::AcceptorSetup(
        "PermissionDenied: verification failed".into(),
    ));
    let err = acceptor(Duration::from_secs(1), Arc::default())
        .run(&client)
        .await
        .expect_err("must fail");
    assert_eq!(err.class(), ErrorClass::Setup);
    assert_eq!(err.class().as_str(), "SETUP");
}

#[tokio::test]
async fn undelivered_decision_is_counted_and_loop_continues() {
    // Capacity 1 and nobody draining: the first decision fits, the rest
    // cannot be handed over before the timeout.
    let reqs = vec![Ok(request(1, 400)), Ok(request(2, 10)), Ok(request(3, 500))];
    let (client, mut rx) = MockClient::with_requests(reqs, 1);
    let metrics = Arc::new(AgentMetrics::default());

    let err = acceptor(Duration::from_millis(50), Arc::clone(&metrics))
        .run(&client)
        .await
        .expect_err("loop only ends with an error");
    assert!(matches!(err, DustGuardError::AcceptorClosed));

    assert_eq!(metrics.send_timeouts.get(&[]), 2);
    assert_eq!(metrics.decisions.get(&[("outcome", "accept")]), 1);

    let first = rx.try_recv().unwrap();
    assert_eq!(first.pending_chan_id, vec![1; 32]);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn closed_decision_channel_is_transport_error() {
    let (client, rx) = MockClient::with_requests(vec![Ok(request(1, 400))], 4);
    drop(rx);

    let err = acceptor(Duration::from_secs(1), Arc::default())
        .run(&client)
        .await
        .expect_err("must fail");
    assert_eq!(err.class(), ErrorClass::Transport);
    assert!(!matches!(err, DustGuardError::AcceptorClosed));
}
