//! # API Facade
//!
//! Single entry point for a whole run: validates the output format, discovers
//! contexts, hands the batch to the scheduler, and emits the final document.
//! Generic over [`CommandRunner`] so the entire flow can be exercised in
//! tests without spawning a process, and over the output writer so nothing in
//! here assumes a terminal.

use crate::contexts;
use crate::error::Result;
use crate::output;
use crate::runner::CommandRunner;
use crate::scheduler;
use log::debug;
use std::io::Write;

/// Options for one run, mirroring the CLI flags.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Include filter for context names; empty matches all.
    pub regex: String,
    /// Exclude filter, applied after the include filter; empty excludes none.
    pub negative_regex: String,
    /// Comma-separated namespaces; empty means each context's default.
    pub namespaces: String,
    /// Only print the matching contexts, run nothing.
    pub list_only: bool,
    /// Max kubectl processes in flight at once.
    pub max_processes: usize,
    /// Aggregated output format (json/yaml); `None` streams per task.
    pub output: Option<String>,
}

/// Runs the whole fan-out: validate, discover, schedule, emit.
///
/// `args` is the kubectl command given after `--`. All user-visible output
/// goes to `out`; fatal errors are returned to the caller, per-task failures
/// are embedded in the output.
pub fn run<W: Write + Send>(
    opts: &RunOptions,
    runner: &dyn CommandRunner,
    args: &[String],
    out: &mut W,
) -> Result<()> {
    let mut base_args = args.to_vec();
    if let Some(format) = opts.output.as_deref() {
        output::validate(format)?;
        // Aggregation needs every task's output to be parseable JSON, so the
        // wrapped command is told to emit JSON whatever the user asked for.
        base_args.push("-o".to_string());
        base_args.push("json".to_string());
    }

    let contexts = contexts::list_contexts(runner, &opts.regex, &opts.negative_regex)?;

    if opts.list_only {
        for context in &contexts {
            writeln!(out, "{context}")?;
        }
        return Ok(());
    }

    // Splitting "" yields one empty namespace: "use the context's default".
    let namespaces: Vec<String> = opts.namespaces.split(',').map(str::to_string).collect();

    let streaming = opts.output.is_none();
    let stream = if streaming { Some(&mut *out) } else { None };
    let results = scheduler::run_all(
        runner,
        &contexts,
        &namespaces,
        &base_args,
        opts.max_processes,
        stream,
    );

    if let Some(format) = opts.output.as_deref() {
        debug!("rendering aggregated {format} output");
        let document = output::render(&results, format)?;
        write!(out, "{document}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MkError;
    use crate::runner::scripted::ScriptedRunner;

    fn opts() -> RunOptions {
        RunOptions {
            max_processes: 5,
            ..RunOptions::default()
        }
    }

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unknown_output_format_runs_nothing() {
        let runner = ScriptedRunner::with_contexts(&["kind-kind"]);
        let mut out = Vec::new();
        let err = run(
            &RunOptions {
                output: Some("foo".to_string()),
                ..opts()
            },
            &runner,
            &argv(&["get", "pods"]),
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(err, MkError::UnknownOutput(_)));
        assert!(runner.calls().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn list_only_prints_contexts_in_discovery_order_and_runs_no_tasks() {
        let runner = ScriptedRunner::with_contexts(&["kind-kind", "kind-kind1", "foo"]);
        let mut out = Vec::new();
        run(
            &RunOptions {
                regex: "kind".to_string(),
                list_only: true,
                ..opts()
            },
            &runner,
            &[],
            &mut out,
        )
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "kind-kind\nkind-kind1\n");
        // Only the discovery invocation happened.
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn streaming_run_writes_one_block_per_task() {
        let runner = ScriptedRunner::with_contexts(&["kind-kind", "kind-kind1"])
            .ok("kind-kind", b"pods-a\n")
            .ok("kind-kind1", b"pods-b\n");
        let mut out = Vec::new();
        run(&opts(), &runner, &argv(&["get", "pods"]), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\nkind-kind\n---------\npods-a\n"));
        assert!(text.contains("\nkind-kind1\n----------\npods-b\n"));
    }

    #[test]
    fn aggregated_run_forces_json_onto_every_task() {
        let runner =
            ScriptedRunner::with_contexts(&["kind-kind"]).ok("kind-kind", br#"{"items": []}"#);
        let mut out = Vec::new();
        run(
            &RunOptions {
                output: Some(output::JSON.to_string()),
                ..opts()
            },
            &runner,
            &argv(&["get", "pods"]),
            &mut out,
        )
        .unwrap();

        let calls = runner.calls();
        // calls[0] is discovery; the task argv ends with the forced format
        // followed by the injected context selector.
        assert_eq!(
            calls[1],
            argv(&["get", "pods", "-o", "json", "--context", "kind-kind"])
        );
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n  \"kind-kind\": {\n    \"items\": []\n  }\n}"
        );
    }

    #[test]
    fn aggregated_yaml_renders_the_same_document() {
        let runner =
            ScriptedRunner::with_contexts(&["kind-kind"]).ok("kind-kind", br#"{"n": 1}"#);
        let mut out = Vec::new();
        run(
            &RunOptions {
                output: Some(output::YAML.to_string()),
                ..opts()
            },
            &runner,
            &argv(&["get", "pods"]),
            &mut out,
        )
        .unwrap();

        let parsed: serde_json::Value =
            serde_yaml::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(parsed, serde_json::json!({"kind-kind": {"n": 1}}));
    }

    #[test]
    fn comma_separated_namespaces_multiply_the_tasks() {
        let runner = ScriptedRunner::with_contexts(&["c1", "c2"]);
        let mut out = Vec::new();
        run(
            &RunOptions {
                namespaces: "default,kube-system".to_string(),
                ..opts()
            },
            &runner,
            &argv(&["get", "pods"]),
            &mut out,
        )
        .unwrap();

        // Discovery plus 2 contexts x 2 namespaces.
        assert_eq!(runner.calls().len(), 5);
        let text = String::from_utf8(out).unwrap();
        for key in ["c1: default", "c1: kube-system", "c2: default", "c2: kube-system"] {
            assert!(text.contains(&format!("\n{key}\n")), "missing block for {key}");
        }
    }

    #[test]
    fn failed_task_text_breaks_aggregation_but_not_streaming() {
        let failing = || {
            ScriptedRunner::with_contexts(&["good", "bad"])
                .ok("good", br#"{"ok": true}"#)
                .err("bad", "connection refused")
        };

        // Streaming embeds the error text in that context's block.
        let runner = failing();
        let mut out = Vec::new();
        run(&opts(), &runner, &argv(&["get", "pods"]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\nbad\n---\nconnection refused"));

        // Aggregation cannot parse the error text as JSON.
        let runner = failing();
        let mut out = Vec::new();
        let err = run(
            &RunOptions {
                output: Some(output::JSON.to_string()),
                ..opts()
            },
            &runner,
            &argv(&["get", "pods"]),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, MkError::Aggregation(_)));
    }

    #[test]
    fn discovery_failure_aborts_before_any_task() {
        let runner = ScriptedRunner::failing_discovery("no kubeconfig");
        let mut out = Vec::new();
        let err = run(&opts(), &runner, &argv(&["get", "pods"]), &mut out).unwrap_err();
        assert!(matches!(err, MkError::Discovery(_)));
        assert_eq!(runner.calls().len(), 1);
    }
}
