//! Scripted runner for tests.
//!
//! Plays the role kubectl plays in production: the discovery invocation gets
//! a canned context listing, task invocations get replies keyed by the
//! `--context` (and optionally `--namespace`) values found in their argv.
//! Every invocation is recorded so tests can assert on what was (or was not)
//! executed.

use super::{CommandRunner, InvokeError};
use crate::contexts;
use std::collections::HashMap;
use std::sync::Mutex;

type Reply = Result<Vec<u8>, InvokeError>;

pub struct ScriptedRunner {
    discovery: Reply,
    replies: HashMap<String, Reply>,
    fallback: Reply,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    /// Runner whose discovery call returns the given context names, one per
    /// line. Task invocations fall back to `b"ok\n"` unless a reply is set.
    pub fn with_contexts(names: &[&str]) -> Self {
        let mut listing = names.join("\n");
        if !listing.is_empty() {
            listing.push('\n');
        }
        Self {
            discovery: Ok(listing.into_bytes()),
            replies: HashMap::new(),
            fallback: Ok(b"ok\n".to_vec()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Runner whose discovery call fails with the given error text.
    pub fn failing_discovery(message: &str) -> Self {
        Self {
            discovery: Err(InvokeError(message.to_string())),
            replies: HashMap::new(),
            fallback: Ok(b"ok\n".to_vec()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Canned success payload for tasks against `key` (a context name, or
    /// "context: namespace").
    pub fn ok(mut self, key: &str, payload: &[u8]) -> Self {
        self.replies.insert(key.to_string(), Ok(payload.to_vec()));
        self
    }

    /// Canned failure for tasks against `key`.
    pub fn err(mut self, key: &str, message: &str) -> Self {
        self.replies
            .insert(key.to_string(), Err(InvokeError(message.to_string())));
        self
    }

    /// Every argv this runner has seen, in invocation order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    fn lookup(&self, args: &[String]) -> Reply {
        let context = flag_value(args, "--context");
        let namespace = flag_value(args, "--namespace");
        if let (Some(c), Some(n)) = (&context, &namespace) {
            if let Some(reply) = self.replies.get(&format!("{c}: {n}")) {
                return reply.clone();
            }
        }
        if let Some(c) = &context {
            if let Some(reply) = self.replies.get(c) {
                return reply.clone();
            }
        }
        self.fallback.clone()
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

impl CommandRunner for ScriptedRunner {
    fn invoke(&self, args: &[String]) -> Reply {
        self.calls.lock().unwrap().push(args.to_vec());
        if args
            .iter()
            .map(String::as_str)
            .eq(contexts::LIST_CONTEXTS_ARGS)
        {
            return self.discovery.clone();
        }
        self.lookup(args)
    }
}
