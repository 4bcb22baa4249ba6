//! # Multikube Architecture
//!
//! Multikube runs one kubectl command against many kubeconfig contexts at
//! once. The binary (`mk`) is a thin client over this library; everything
//! below `api.rs` takes plain arguments and returns plain results.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                     │
//! │  - Parses flags, initializes logging, maps errors to exit  │
//! │    codes. The ONLY place that touches stderr/exit codes.   │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                        │
//! │  - Validates the output format, discovers contexts, hands  │
//! │    the batch to the scheduler, emits the final document    │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Engine (contexts.rs, rewrite.rs, scheduler.rs, output.rs) │
//! │  - Context filtering, per-task argv rewriting, bounded     │
//! │    fan-out, thread-safe result collection and rendering    │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Runner Layer (runner/)                                    │
//! │  - Abstract CommandRunner trait                            │
//! │  - KubectlRunner (production), ScriptedRunner (testing)    │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Partial-Failure Isolation
//!
//! One context being unreachable must never spoil the batch. A failed task
//! records its captured error text as that context's result and the run
//! carries on; only setup errors (bad regex, failed discovery, unknown
//! output format) or a broken aggregation abort the whole run.
//!
//! ## Testing Strategy
//!
//! Every module carries its own unit tests against [`runner::scripted::ScriptedRunner`],
//! so nothing below `main.rs` ever spawns a real process in tests. The
//! binary surface is covered end-to-end in `tests/cli.rs`.

pub mod api;
pub mod contexts;
pub mod error;
pub mod output;
pub mod rewrite;
pub mod runner;
pub mod scheduler;
