//! Shared fake ports for unit tests.
//!
//! Each fake records the calls it receives behind a `Mutex` so tests can
//! assert on ordering and arguments after the service returns.

#![allow(dead_code, clippy::expect_used)]

use std::collections::{BTreeSet, VecDeque};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use vhostctl::application::ports::{
    CertIssuer, Clock, CommandRunner, DnsResolver, LocalAddresses, OperatorGate, PasswordHasher,
    PrivilegeCheck, ProgressReporter, UserStore, WebServer,
};
use vhostctl::domain::error::OperatorError;

use crate::helpers::{err_output, ok_output};

// ── CommandRunner ─────────────────────────────────────────────────────────────

/// One recorded process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
}

/// Records every invocation and replies with queued outputs, falling back to
/// `fallback` once the queue is empty.
pub struct RecordingRunner {
    pub calls: Mutex<Vec<Invocation>>,
    replies: Mutex<VecDeque<Output>>,
    fallback: Output,
}

impl RecordingRunner {
    pub fn succeeding(stdout: &[u8]) -> Self {
        Self::with_fallback(ok_output(stdout))
    }

    pub fn failing(code: i32, stderr: &[u8]) -> Self {
        Self::with_fallback(err_output(code, stderr))
    }

    pub fn with_fallback(fallback: Output) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            fallback,
        }
    }

    pub fn then_reply(self, output: Output) -> Self {
        self.replies.lock().expect("lock").push_back(output);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().expect("lock").clone()
    }

    fn record(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<&[u8]>,
        timeout: Option<Duration>,
    ) -> Output {
        self.calls.lock().expect("lock").push(Invocation {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            stdin: stdin.map(<[u8]>::to_vec),
            timeout,
        });
        self.replies
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        Ok(self.record(program, args, None, None))
    }
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        Ok(self.record(program, args, None, Some(timeout)))
    }
    async fn run_with_stdin(&self, program: &str, args: &[&str], stdin: &[u8]) -> Result<Output> {
        Ok(self.record(program, args, Some(stdin), None))
    }
}

/// Lets adapters borrow the recorder so the test keeps access to `calls()`.
impl CommandRunner for &RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        (*self).run(program, args).await
    }
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        (*self).run_with_timeout(program, args, timeout).await
    }
    async fn run_with_stdin(&self, program: &str, args: &[&str], stdin: &[u8]) -> Result<Output> {
        (*self).run_with_stdin(program, args, stdin).await
    }
}

// ── WebServer ─────────────────────────────────────────────────────────────────

/// Web server whose `-t` and reload exit codes are fixed per test.
pub struct FakeWebServer {
    test_code: i32,
    reload_code: i32,
    pub calls: Mutex<Vec<&'static str>>,
}

impl FakeWebServer {
    pub fn healthy() -> Self {
        Self::with_codes(0, 0)
    }

    pub fn invalid_config(code: i32) -> Self {
        Self::with_codes(code, 0)
    }

    pub fn with_codes(test_code: i32, reload_code: i32) -> Self {
        Self {
            test_code,
            reload_code,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("lock").clone()
    }

    fn reply(code: i32, stderr: &[u8]) -> Output {
        if code == 0 {
            ok_output(b"")
        } else {
            err_output(code, stderr)
        }
    }
}

impl WebServer for FakeWebServer {
    async fn test_config(&self) -> Result<Output> {
        self.calls.lock().expect("lock").push("test");
        Ok(Self::reply(self.test_code, b"nginx: configuration file test failed"))
    }
    async fn signal_reload(&self) -> Result<Output> {
        self.calls.lock().expect("lock").push("reload");
        Ok(Self::reply(self.reload_code, b"nginx: no master process"))
    }
}

// ── CertIssuer ────────────────────────────────────────────────────────────────

pub struct FakeIssuer {
    code: i32,
    pub calls: Mutex<Vec<(PathBuf, String)>>,
}

impl FakeIssuer {
    pub fn succeeding() -> Self {
        Self::exiting(0)
    }

    pub fn exiting(code: i32) -> Self {
        Self {
            code,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.lock().expect("lock").clone()
    }
}

impl CertIssuer for FakeIssuer {
    async fn issue(&self, webroot: &Path, domain: &str) -> Result<Output> {
        self.calls
            .lock()
            .expect("lock")
            .push((webroot.to_path_buf(), domain.to_string()));
        if self.code == 0 {
            Ok(ok_output(b""))
        } else {
            Ok(err_output(self.code, b"Challenge failed for domain"))
        }
    }
}

// ── DNS / network ─────────────────────────────────────────────────────────────

/// Replies from a script of lookup results, then repeats the last one.
pub struct ScriptedResolver {
    script: Mutex<VecDeque<Result<Vec<IpAddr>, String>>>,
    last: Mutex<Result<Vec<IpAddr>, String>>,
    pub lookups: Mutex<u64>,
}

impl ScriptedResolver {
    pub fn new(script: Vec<Result<Vec<IpAddr>, String>>) -> Self {
        let last = script
            .last()
            .cloned()
            .unwrap_or_else(|| Err("NXDOMAIN".to_string()));
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(last),
            lookups: Mutex::new(0),
        }
    }

    pub fn always(addrs: Vec<IpAddr>) -> Self {
        Self::new(vec![Ok(addrs)])
    }

    pub fn lookups(&self) -> u64 {
        *self.lookups.lock().expect("lock")
    }
}

impl DnsResolver for ScriptedResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        *self.lookups.lock().expect("lock") += 1;
        let next = self
            .script
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| self.last.lock().expect("lock").clone());
        next.map_err(|e| anyhow::anyhow!("resolving {host}: {e}"))
    }
}

pub struct FixedLocal(pub BTreeSet<IpAddr>);

impl FixedLocal {
    pub fn of(addrs: &[&str]) -> Self {
        Self(addrs.iter().map(|a| a.parse().expect("ip")).collect())
    }
}

impl LocalAddresses for FixedLocal {
    fn local_addresses(&self) -> Result<BTreeSet<IpAddr>> {
        Ok(self.0.clone())
    }
}

/// Clock that returns immediately and records each requested sleep.
#[derive(Default)]
pub struct RecordingClock {
    pub sleeps: Mutex<Vec<Duration>>,
}

impl RecordingClock {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().expect("lock").clone()
    }
}

impl Clock for RecordingClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().expect("lock").push(duration);
    }
}

/// Operator gate that counts confirmations and optionally declines.
#[derive(Default)]
pub struct CountingGate {
    decline: bool,
    pub confirmations: Mutex<u32>,
}

impl CountingGate {
    pub fn declining() -> Self {
        Self {
            decline: true,
            confirmations: Mutex::new(0),
        }
    }

    pub fn confirmations(&self) -> u32 {
        *self.confirmations.lock().expect("lock")
    }
}

impl OperatorGate for CountingGate {
    async fn confirm_dns_records(&self, domain: &str, _targets: &BTreeSet<IpAddr>) -> Result<()> {
        *self.confirmations.lock().expect("lock") += 1;
        if self.decline {
            return Err(OperatorError::Declined(domain.to_string()).into());
        }
        Ok(())
    }
}

// ── Reporter ──────────────────────────────────────────────────────────────────

/// Captures progress events as `"step: …"`, `"ok: …"`, `"instruct: …"`.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("lock").clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events.lock().expect("lock").push(format!("step: {message}"));
    }
    fn success(&self, message: &str) {
        self.events.lock().expect("lock").push(format!("ok: {message}"));
    }
    fn instruct(&self, message: &str) {
        self.events.lock().expect("lock").push(format!("instruct: {message}"));
    }
}

// ── Users ─────────────────────────────────────────────────────────────────────

/// In-memory htpasswd file.
pub struct MemoryUserStore {
    pub content: Mutex<String>,
    pub writes: Mutex<u32>,
}

impl MemoryUserStore {
    pub fn with(content: &str) -> Self {
        Self {
            content: Mutex::new(content.to_string()),
            writes: Mutex::new(0),
        }
    }

    pub fn content(&self) -> String {
        self.content.lock().expect("lock").clone()
    }

    pub fn writes(&self) -> u32 {
        *self.writes.lock().expect("lock")
    }
}

impl UserStore for MemoryUserStore {
    fn read(&self) -> Result<String> {
        Ok(self.content())
    }
    fn write(&self, content: &str) -> Result<()> {
        *self.content.lock().expect("lock") = content.to_string();
        *self.writes.lock().expect("lock") += 1;
        Ok(())
    }
    fn path(&self) -> PathBuf {
        PathBuf::from("/memory/htpasswd")
    }
}

/// Hasher producing `hashed(<password>)` and counting calls.
#[derive(Default)]
pub struct FakeHasher {
    pub calls: Mutex<u32>,
}

impl FakeHasher {
    pub fn calls(&self) -> u32 {
        *self.calls.lock().expect("lock")
    }
}

impl PasswordHasher for FakeHasher {
    async fn hash(&self, password: &str) -> Result<String> {
        *self.calls.lock().expect("lock") += 1;
        Ok(format!("hashed({password})"))
    }
}

pub struct FixedPrivilege(pub bool);

impl PrivilegeCheck for FixedPrivilege {
    fn is_privileged(&self) -> bool {
        self.0
    }
}
