//! Bounded fan-out of one kubectl invocation across many contexts.
//!
//! Tasks launch in context-major, namespace-minor order, gated by a counting
//! semaphore so at most `max_procs` kubectl processes run at once. Completion
//! order is whatever process latency dictates; the scoped-thread join is the
//! completion barrier. Shared state is exactly two things, each behind its
//! own lock: the result map, and the output stream in streaming mode.
//!
//! Known gap: there is no per-task timeout and no cancellation. A kubectl
//! invocation that hangs hangs the whole run.

use crate::rewrite;
use crate::runner::CommandRunner;
use log::debug;
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Condvar, Mutex};
use std::thread;
use unicode_width::UnicodeWidthStr;

/// Counting semaphore gating how many tasks are in flight.
struct Semaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    fn new(capacity: usize) -> Self {
        Self {
            // A capacity of zero would never admit anything.
            permits: Mutex::new(capacity.max(1)),
            available: Condvar::new(),
        }
    }

    /// Blocks until a permit is free. The permit returns on drop.
    fn acquire(&self) -> Permit<'_> {
        let mut permits = self.permits.lock().unwrap();
        while *permits == 0 {
            permits = self.available.wait(permits).unwrap();
        }
        *permits -= 1;
        Permit(self)
    }

    fn release(&self) {
        *self.permits.lock().unwrap() += 1;
        self.available.notify_one();
    }
}

struct Permit<'a>(&'a Semaphore);

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.0.release();
    }
}

/// Compound result key: the context name, qualified by the namespace when
/// one was requested.
pub fn result_key(context: &str, namespace: &str) -> String {
    if namespace.is_empty() {
        context.to_string()
    } else {
        format!("{context}: {namespace}")
    }
}

/// One streaming block: blank line, compound key, a dash divider as wide as
/// the key, then the raw task output.
fn format_block(key: &str, payload: &[u8]) -> Vec<u8> {
    let mut block = format!("\n{key}\n{}\n", "-".repeat(key.width())).into_bytes();
    block.extend_from_slice(payload);
    block
}

/// Runs the rewritten command once per (context, namespace) pair and returns
/// every task's payload keyed by [`result_key`].
///
/// A failing task contributes its error text as its payload instead of
/// aborting the batch. When `stream` is given, each task writes its block as
/// soon as it completes; blocks are written whole and never interleave, but
/// their order follows completion, not launch.
pub fn run_all<W: Write + Send>(
    runner: &dyn CommandRunner,
    contexts: &[String],
    namespaces: &[String],
    base_args: &[String],
    max_procs: usize,
    stream: Option<&mut W>,
) -> BTreeMap<String, Vec<u8>> {
    let semaphore = Semaphore::new(max_procs);
    let results = Mutex::new(BTreeMap::new());
    let sink = stream.map(Mutex::new);

    debug!(
        "scheduling {} task(s), max {} in flight",
        contexts.len() * namespaces.len(),
        max_procs
    );

    thread::scope(|scope| {
        for context in contexts {
            for namespace in namespaces {
                debug!("waiting for a free slot for {context}");
                let permit = semaphore.acquire();
                let results = &results;
                let sink = sink.as_ref();
                scope.spawn(move || {
                    let _permit = permit;
                    let args = rewrite::rewrite(base_args, context, namespace);
                    debug!("executing against {}", result_key(context, namespace));
                    let payload = match runner.invoke(&args) {
                        Ok(bytes) => bytes,
                        Err(err) => err.to_string().into_bytes(),
                    };
                    let key = result_key(context, namespace);
                    if let Some(sink) = sink {
                        let block = format_block(&key, &payload);
                        let mut out = sink.lock().unwrap();
                        let _ = out.write_all(&block);
                    }
                    results.lock().unwrap().insert(key, payload);
                });
            }
        }
    });
    debug!("all tasks completed");

    results.into_inner().unwrap()
}
