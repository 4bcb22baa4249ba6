//! Per-task argument rewriting.

/// Builds the argv for one task by injecting `--context` (and `--namespace`
/// when set) into `base`.
///
/// kubectl treats everything after `--` as the argv of a sub-invocation
/// (`kubectl exec pod -- ls /usr`), so the selector flags must land before
/// the first `--`. Later `--` tokens belong to the sub-invocation and pass
/// through untouched. Without a separator the flags go at the end.
pub fn rewrite(base: &[String], context: &str, namespace: &str) -> Vec<String> {
    let mut rewritten = Vec::with_capacity(base.len() + 4);
    let mut inserted = false;
    for arg in base {
        if !inserted && arg == "--" {
            push_selectors(&mut rewritten, context, namespace);
            inserted = true;
        }
        rewritten.push(arg.clone());
    }
    if !inserted {
        push_selectors(&mut rewritten, context, namespace);
    }
    rewritten
}

fn push_selectors(args: &mut Vec<String>, context: &str, namespace: &str) {
    args.push("--context".to_string());
    args.push(context.to_string());
    if !namespace.is_empty() {
        args.push("--namespace".to_string());
        args.push(namespace.to_string());
    }
}
