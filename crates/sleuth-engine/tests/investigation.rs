//! End-to-end investigations through `Session` with scripted oracles.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use sleuth_engine::oracle::{FALLBACK_RESPONSES, OracleRequest, OracleResult, QueryKind};
use sleuth_engine::{
    EngineConfig, EvidenceCategory, LineKind, OfflineOracle, Oracle, OracleError, Phase, Session,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Replays canned replies and records every request it sees.
#[derive(Default)]
struct Scripted {
    replies: VecDeque<OracleResult<String>>,
    seen: Vec<OracleRequest>,
}

impl Scripted {
    fn with(replies: Vec<OracleResult<String>>) -> Self {
        Self {
            replies: replies.into(),
            seen: Vec::new(),
        }
    }
}

impl Oracle for Scripted {
    async fn consult(&mut self, request: &OracleRequest) -> OracleResult<String> {
        self.seen.push(request.clone());
        self.replies
            .pop_front()
            .unwrap_or(Err(OracleError::Unavailable))
    }
}

struct Sleepy(Duration);

impl Oracle for Sleepy {
    async fn consult(&mut self, _request: &OracleRequest) -> OracleResult<String> {
        tokio::time::sleep(self.0).await;
        Ok("late insight".to_string())
    }
}

fn enrichment(out: &sleuth_engine::Output) -> Vec<String> {
    out.of_kind(LineKind::Enrichment)
        .map(|l| l.text.clone())
        .collect()
}

#[tokio::test]
async fn full_investigation_with_offline_oracle() {
    let mut s = Session::new(&EngineConfig::default().with_seed(7), OfflineOracle);

    let out = s.submit_at("start-case", now()).await.unwrap();
    assert!(out.mentions(LineKind::SystemBanner, "INITIALIZING"));

    for cmd in ["scan", "logs", "intercept", "decrypt", "forensics"] {
        let out = s.submit_at(cmd, now()).await.unwrap();
        assert!(out.of_kind(LineKind::Error).next().is_none(), "{cmd} failed");
    }
    assert_eq!(s.state().progress(), 75);

    let culprit = s.state().case().unwrap().solution.culprit.clone();
    let out = s.submit_at(&format!("solve {culprit}"), now()).await.unwrap();
    assert!(out.delta.solved);
    assert_eq!(s.state().phase(), Phase::Resolved);
    assert_eq!(s.state().progress(), 100);
    assert_eq!(s.state().metrics().cases_completed, 1);
}

#[tokio::test]
async fn oracle_reply_is_appended_after_local_output() {
    let oracle = Scripted::with(vec![Ok("Check the VPN logs.\nThen the exports.".to_string())]);
    let mut s = Session::new(&EngineConfig::default(), oracle);
    s.submit_at("start-case", now()).await;

    let out = s.submit_at("ask what next?", now()).await.unwrap();
    assert_eq!(
        enrichment(&out),
        vec!["Check the VPN logs.".to_string(), "Then the exports.".to_string()]
    );
    assert_eq!(out.lines.last().unwrap().kind, LineKind::Enrichment);
    assert_eq!(out.lines[0].kind, LineKind::InputEcho);

    let seen = &s.oracle().oracle().seen;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].kind, QueryKind::Ask);
    assert!(seen[0].context.case.is_some());
}

#[tokio::test]
async fn oracle_errors_never_surface() {
    let oracle = Scripted::with(vec![
        Err(OracleError::Http(500)),
        Err(OracleError::MalformedBody("garbage".to_string())),
    ]);
    let mut s = Session::new(&EngineConfig::default(), oracle);
    s.submit_at("start-case", now()).await;

    for cmd in ["ask hello", "theory the intern did it", "analyze"] {
        let out = s.submit_at(cmd, now()).await.unwrap();
        let lines = enrichment(&out);
        assert_eq!(lines.len(), 1, "{cmd}");
        assert!(FALLBACK_RESPONSES.contains(&lines[0].as_str()));
        assert!(out.of_kind(LineKind::Error).next().is_none());
    }
    assert!(s.state().evidence().contains(EvidenceCategory::Theory));
    assert!(s.state().evidence().contains(EvidenceCategory::AiAnalysis));
}

#[tokio::test]
async fn slow_oracle_times_out_into_fallback() {
    let cfg = EngineConfig::default().with_timeout(Duration::from_millis(20));
    let mut s = Session::new(&cfg, Sleepy(Duration::from_secs(30)));
    s.submit_at("start-case", now()).await;

    let out = s.submit_at("ask hello", now()).await.unwrap();
    let lines = enrichment(&out);
    assert_eq!(lines.len(), 1);
    assert!(FALLBACK_RESPONSES.contains(&lines[0].as_str()));
}

#[tokio::test]
async fn no_oracle_call_without_case() {
    let mut s = Session::new(&EngineConfig::default(), Scripted::default());
    let out = s.submit_at("ask hello", now()).await.unwrap();
    assert!(out.mentions(LineKind::Error, "No active case"));
    assert!(enrichment(&out).is_empty());
    assert!(s.oracle().oracle().seen.is_empty());
}

#[tokio::test]
async fn oracle_context_carries_recent_commands() {
    let mut s = Session::new(&EngineConfig::default(), Scripted::default());
    s.submit_at("start-case", now()).await;
    for cmd in ["scan", "logs", "decrypt", "status", "intercept"] {
        s.submit_at(cmd, now()).await;
    }
    s.submit_at("hint", now()).await;

    let seen = &s.oracle().oracle().seen;
    let ctx = &seen[0].context;
    assert_eq!(
        ctx.recent_commands,
        vec!["logs", "decrypt", "status", "intercept", "hint"]
    );
    assert_eq!(
        ctx.evidence,
        vec!["system_logs", "chat_logs", "email_records"]
    );
    assert_eq!(ctx.progress, 50);
}

#[tokio::test]
async fn hint_ladder_survives_new_case() {
    let mut s = Session::new(&EngineConfig::default(), OfflineOracle);
    s.submit_at("start-case", now()).await;
    s.submit_at("hint", now()).await;
    s.submit_at("start-case", now()).await;
    let out = s.submit_at("hint", now()).await.unwrap();
    assert_eq!(out.delta.hint, Some(sleuth_engine::HintLevel::Moderate));
}

#[tokio::test]
async fn history_records_failures() {
    let mut s = Session::new(&EngineConfig::default(), OfflineOracle);
    s.submit_at("scan", now()).await;
    s.submit_at("bogus", now()).await;
    s.submit_at("   ", now()).await;
    s.submit_at("start-case", now()).await;
    assert_eq!(
        s.state().history().entries(),
        &["scan".to_string(), "bogus".to_string(), "start-case".to_string()]
    );
    assert_eq!(s.state().metrics().commands_issued, 3);
}

#[tokio::test]
async fn failed_oracle_calls_do_not_change_later_cases() {
    let cfg = EngineConfig::default().with_seed(11);
    let mut answered = Session::new(&cfg, Scripted::with(vec![Ok("insight".to_string())]));
    let mut failed = Session::new(&cfg, OfflineOracle);

    answered.submit_at("start-case", now()).await;
    let out = answered.submit_at("ask anything?", now()).await.unwrap();
    assert_eq!(enrichment(&out), vec!["insight".to_string()]);
    answered.submit_at("start-case", now()).await;

    failed.submit_at("start-case", now()).await;
    let out = failed.submit_at("ask anything?", now()).await.unwrap();
    assert!(FALLBACK_RESPONSES.contains(&enrichment(&out)[0].as_str()));
    failed.submit_at("start-case", now()).await;

    let a = answered.state().case().unwrap();
    let b = failed.state().case().unwrap();
    assert_eq!(a.id, b.id);
    assert_eq!(a.solution.culprit, b.solution.culprit);
}
