//! End-to-end session tests: onboarding, round-robin coordination,
//! teardown, persistence, and post-session review.

use std::sync::Arc;
use std::time::Duration;

use parley::handle::{AgentHandle, ChannelHandle, HandleError, ScriptedHandle};
use parley::scoring::{review_completed, Verdict};
use parley::session::{Coordinator, OnboardingGate, SessionError};
use parley::storage::{InMemoryStore, SubmissionStore};
use parley::types::{Action, AgentStatus, SessionStatus};
use parley::Config;

fn scripted(lines: &[&str]) -> Arc<ScriptedHandle> {
    Arc::new(ScriptedHandle::new(
        lines.iter().map(|line| line.to_string()).collect(),
    ))
}

#[tokio::test]
async fn test_full_pipeline_approves_varied_replies() {
    let config = Config::default();
    let store = InMemoryStore::new();

    let a = Arc::new(
        ScriptedHandle::new(vec![
            "ready when you are".to_string(),
            "I spent the weekend hiking in the hills".to_string(),
            "the views from the summit were incredible".to_string(),
        ])
        .with_onboarding_success(true),
    );
    let b = Arc::new(
        ScriptedHandle::new(vec![
            "here and ready".to_string(),
            "that sounds like a great way to unwind".to_string(),
            "I should plan something similar myself".to_string(),
        ])
        .with_onboarding_success(true),
    );

    let gate = OnboardingGate::new(config.clone());
    gate.run(a.as_ref()).await.unwrap();
    gate.run(b.as_ref()).await.unwrap();

    let handles: Vec<Arc<dyn AgentHandle>> = vec![a.clone(), b.clone()];
    let mut coordinator = Coordinator::admit(handles, config.clone());
    coordinator.run().await.unwrap();

    let state = coordinator.shutdown().await;
    assert_eq!(state.status, SessionStatus::Completed);
    assert_eq!(state.round, 2);
    assert_eq!(state.transcript.len(), 4);
    assert!(a.is_closed());
    assert!(b.is_closed());

    let subject = state.agents[0].label.clone();
    store
        .save_submission(&state.into_record(subject))
        .await
        .unwrap();

    let verdicts = review_completed(&store, &config).await.unwrap();
    assert_eq!(verdicts.len(), 1);
    assert_eq!(verdicts[0].1, Verdict::Approve);
}

#[tokio::test]
async fn test_full_pipeline_rejects_repetitive_subject() {
    let config = Config::default();
    let store = InMemoryStore::new();

    // Subject repeats itself across rounds
    let a = scripted(&["hi", "hi"]);
    let b = scripted(&["hello there friend", "how has your week been"]);

    let handles: Vec<Arc<dyn AgentHandle>> = vec![a, b];
    let mut coordinator = Coordinator::admit(handles, config.clone());
    coordinator.run().await.unwrap();

    let state = coordinator.shutdown().await;
    let subject = state.agents[0].label.clone();
    store
        .save_submission(&state.into_record(subject))
        .await
        .unwrap();

    let verdicts = review_completed(&store, &config).await.unwrap();
    assert_eq!(verdicts[0].1, Verdict::RejectDuplicates);
}

#[tokio::test]
async fn test_failed_onboarding_blocks_admission() {
    let candidate =
        ScriptedHandle::new(vec!["let me in".to_string()]).with_onboarding_success(false);
    let gate = OnboardingGate::new(Config::default());

    let err = gate.run(&candidate).await.unwrap_err();
    assert!(matches!(err, SessionError::ValidationFailed));
    assert_eq!(err.to_string(), "validation failed");
}

#[tokio::test(start_paused = true)]
async fn test_unresponsive_agent_times_out_at_the_bound() {
    let config = Config {
        turn_timeout_secs: 5,
        ..Config::default()
    };

    // Live handle whose remote never sends an action
    let (handle, remote) = ChannelHandle::pair();
    let handles: Vec<Arc<dyn AgentHandle>> = vec![Arc::new(handle)];
    let mut coordinator = Coordinator::admit(handles, config);

    let started = tokio::time::Instant::now();
    let err = coordinator.run().await.unwrap_err();
    assert!(started.elapsed() >= Duration::from_secs(5));

    match err {
        SessionError::Agent { label, source } => {
            assert_eq!(label, "Chat Agent 1");
            assert!(matches!(source, HandleError::Timeout { .. }));
        }
        other => panic!("expected agent timeout, got {other}"),
    }

    let state = coordinator.state();
    assert_eq!(state.agents[0].status, AgentStatus::Errored);
    assert_eq!(state.round, 0);

    drop(remote);
    coordinator.shutdown().await;
}

#[tokio::test]
async fn test_disconnect_is_distinct_from_timeout() {
    let (handle, remote) = ChannelHandle::pair();
    drop(remote);

    let handles: Vec<Arc<dyn AgentHandle>> = vec![Arc::new(handle)];
    let mut coordinator = Coordinator::admit(handles, Config::default());

    let err = coordinator.run().await.unwrap_err();
    match err {
        SessionError::Agent { source, .. } => {
            assert!(matches!(source, HandleError::Disconnected(_)));
        }
        other => panic!("expected disconnect, got {other}"),
    }

    coordinator.shutdown().await;
}

#[tokio::test]
async fn test_live_and_scripted_agents_mix() {
    let config = Config::default();

    let (live, mut remote) = ChannelHandle::pair();
    let live = Arc::new(live);
    let automated = scripted(&["glad to have you here", "until next time"]);

    // Drive the live participant: act each round, drain observations between
    let driver = tokio::spawn(async move {
        let mut observed = Vec::new();
        for line in ["hello from the live side", "signing off now"] {
            remote.actions.send(Action::say(line)).await.unwrap();
            if let Some(action) = remote.observations.recv().await {
                observed.push(action.content);
            }
        }
        observed
    });

    let handles: Vec<Arc<dyn AgentHandle>> = vec![live.clone(), automated.clone()];
    let mut coordinator = Coordinator::admit(handles, config);
    coordinator.run().await.unwrap();

    let observed = driver.await.unwrap();
    assert_eq!(
        observed,
        vec!["glad to have you here", "until next time"]
    );

    let peer_saw: Vec<String> = automated
        .observed()
        .iter()
        .map(|action| action.content.clone())
        .collect();
    assert_eq!(
        peer_saw,
        vec!["hello from the live side", "signing off now"]
    );

    let state = coordinator.shutdown().await;
    assert_eq!(state.round, 2);
}
