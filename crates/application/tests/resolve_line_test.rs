mod helpers;

use bulkdns_application::services::ServerRing;
use bulkdns_application::use_cases::ResolveLineUseCase;
use bulkdns_domain::{
    AttemptCap, DomainError, InputLine, ResponseCode, RetryPolicy, RotationPolicy,
};
use helpers::{server, Behavior, ScriptedExchange};
use std::sync::Arc;
use std::time::Duration;

fn policy(attempt_cap: AttemptCap, rotation: RotationPolicy) -> RetryPolicy {
    RetryPolicy {
        lookup_timeout: Duration::from_millis(30),
        attempt_cap,
        rotation,
    }
}

fn use_case(
    exchange: Arc<ScriptedExchange>,
    servers: usize,
    policy: RetryPolicy,
) -> ResolveLineUseCase {
    let ring = Arc::new(ServerRing::new((1..=servers as u8).map(server).collect()).unwrap());
    ResolveLineUseCase::new(exchange, ring, policy)
}

fn line(text: &str) -> InputLine {
    InputLine::parse(text).unwrap()
}

#[tokio::test]
async fn test_first_attempt_success() {
    let exchange = Arc::new(ScriptedExchange::new(Behavior::Answer));
    let resolver = use_case(exchange.clone(), 3, RetryPolicy::default());

    let result = resolver.execute(&line("7,example.com/index.html")).await;

    assert!(result.is_success());
    assert_eq!(result.attempts, 1);
    assert_eq!(result.server, Some(server(1)));
    assert_eq!(result.addresses, ScriptedExchange::addresses_for("example.com"));
    assert_eq!(&*result.domain, "example.com");
    assert_eq!(&*result.original_line, "7,example.com/index.html");
    assert_eq!(exchange.calls(), vec![(server(1), "example.com".to_string())]);
}

#[tokio::test]
async fn test_all_timeouts_exhaust_after_ring_size_attempts() {
    let exchange = Arc::new(ScriptedExchange::new(Behavior::Hang));
    let resolver = use_case(
        exchange.clone(),
        3,
        policy(AttemptCap::RingSize, RotationPolicy::Rotate),
    );

    let result = resolver.execute(&line("slow.example.com")).await;

    assert_eq!(result.attempts, 3);
    assert!(result.addresses.is_empty());
    match result.error {
        Some(DomainError::RetriesExhausted { attempts, ref last }) => {
            assert_eq!(attempts, 3);
            assert!(matches!(**last, DomainError::NetworkTimeout { .. }));
        }
        ref other => panic!("expected RetriesExhausted, got {:?}", other),
    }
    assert!(result.error.as_ref().unwrap().is_timeout());
    assert_eq!(
        exchange.servers_called(),
        vec![server(1), server(2), server(3)]
    );
}

#[tokio::test]
async fn test_fixed_cap_can_exceed_ring_size() {
    let exchange = Arc::new(ScriptedExchange::new(Behavior::NetworkError));
    let resolver = use_case(
        exchange.clone(),
        3,
        policy(AttemptCap::Fixed(10), RotationPolicy::Rotate),
    );

    let result = resolver.execute(&line("example.com")).await;

    assert_eq!(result.attempts, 10);
    assert_eq!(exchange.call_count(), 10);
    assert!(matches!(
        result.error,
        Some(DomainError::RetriesExhausted { attempts: 10, .. })
    ));
}

#[tokio::test]
async fn test_half_ring_cap() {
    let exchange = Arc::new(ScriptedExchange::new(Behavior::NetworkError));
    let resolver = use_case(
        exchange.clone(),
        6,
        policy(AttemptCap::HalfRing, RotationPolicy::Rotate),
    );

    let result = resolver.execute(&line("example.com")).await;

    assert_eq!(result.attempts, 3);
    assert_eq!(exchange.call_count(), 3);
}

#[tokio::test]
async fn test_failover_to_next_server() {
    let exchange = Arc::new(
        ScriptedExchange::new(Behavior::Answer).with_server(server(1), Behavior::NetworkError),
    );
    let resolver = use_case(exchange.clone(), 3, RetryPolicy::default());

    let result = resolver.execute(&line("example.com")).await;

    assert!(result.is_success());
    assert_eq!(result.server, Some(server(2)));
    assert_eq!(result.attempts, 2);
}

#[tokio::test]
async fn test_servfail_is_retried_on_another_server() {
    let exchange = Arc::new(
        ScriptedExchange::new(Behavior::Answer)
            .with_server(server(1), Behavior::Rcode(ResponseCode::ServFail)),
    );
    let resolver = use_case(exchange.clone(), 2, RetryPolicy::default());

    let result = resolver.execute(&line("example.com")).await;

    assert!(result.is_success());
    assert_eq!(exchange.servers_called(), vec![server(1), server(2)]);
}

#[tokio::test]
async fn test_empty_answers_exhaust_with_no_answer_found() {
    let exchange = Arc::new(ScriptedExchange::new(Behavior::Empty));
    let resolver = use_case(
        exchange.clone(),
        4,
        policy(AttemptCap::Fixed(2), RotationPolicy::Rotate),
    );

    let result = resolver.execute(&line("example.com")).await;

    match result.error {
        Some(DomainError::RetriesExhausted { attempts: 2, last }) => {
            assert_eq!(*last, DomainError::NoAnswerFound("example.com".into()));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_domain_mismatch_is_retried() {
    let exchange = Arc::new(
        ScriptedExchange::new(Behavior::Answer).with_server(server(1), Behavior::WrongName),
    );
    let resolver = use_case(exchange.clone(), 2, RetryPolicy::default());

    let result = resolver.execute(&line("example.com")).await;

    assert!(result.is_success());
    assert_eq!(result.server, Some(server(2)));
}

#[tokio::test]
async fn test_truncated_reply_is_retried_elsewhere() {
    let exchange = Arc::new(
        ScriptedExchange::new(Behavior::Answer).with_server(server(1), Behavior::Truncated),
    );
    let resolver = use_case(exchange.clone(), 2, RetryPolicy::default());

    let result = resolver.execute(&line("example.com")).await;

    assert!(result.is_success());
    assert_eq!(result.attempts, 2);
    assert_eq!(result.server, Some(server(2)));
    assert_eq!(result.addresses, ScriptedExchange::addresses_for("example.com"));
}

#[tokio::test]
async fn test_only_truncated_replies_exhaust_as_malformed() {
    let exchange = Arc::new(ScriptedExchange::new(Behavior::Truncated));
    let resolver = use_case(
        exchange.clone(),
        3,
        policy(AttemptCap::RingSize, RotationPolicy::Rotate),
    );

    let result = resolver.execute(&line("example.com")).await;

    assert!(result.addresses.is_empty());
    match result.error {
        Some(DomainError::RetriesExhausted { attempts: 3, last }) => {
            assert!(matches!(*last, DomainError::MalformedResponse(_)));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_same_server_policy_never_rotates() {
    let exchange = Arc::new(ScriptedExchange::new(Behavior::NetworkError));
    let resolver = use_case(
        exchange.clone(),
        3,
        policy(AttemptCap::Fixed(4), RotationPolicy::SameServer),
    );

    let result = resolver.execute(&line("example.com")).await;

    assert_eq!(result.attempts, 4);
    assert_eq!(exchange.servers_called(), vec![server(1); 4]);
    assert_eq!(result.server, Some(server(1)));
}

#[tokio::test]
async fn test_ip_input_is_reverse_resolved() {
    let exchange = Arc::new(ScriptedExchange::new(Behavior::Answer));
    let resolver = use_case(exchange.clone(), 1, RetryPolicy::default());

    let result = resolver.execute(&line("192.0.2.10")).await;

    assert!(result.is_success());
    assert_eq!(result.addresses, vec!["host.example".to_string()]);
    assert_eq!(&*result.domain, "192.0.2.10");
    assert_eq!(
        exchange.calls(),
        vec![(server(1), "10.2.0.192.in-addr.arpa".to_string())]
    );
}

#[tokio::test]
async fn test_execute_from_uses_given_start_server() {
    let exchange = Arc::new(ScriptedExchange::new(Behavior::Answer));
    let resolver = use_case(exchange.clone(), 3, RetryPolicy::default());

    let result = resolver.execute_from(&line("example.com"), server(3)).await;

    assert_eq!(result.server, Some(server(3)));
}
