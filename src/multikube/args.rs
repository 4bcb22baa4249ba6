use clap::Parser;

/// Returns the version string, including git hash and commit date for dev builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0 (abc1234 2026-08-01)"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} ({} {})", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

const EXAMPLES: &str = "\
Examples:
  # list all kind contexts
  mk -r kind -l

  # pods in kube-system across all dev clusters
  mk -r dev -- get pods -n kube-system

  # every context with 'gke' but not 'dev' in the name, five at a time
  mk -r gke -x dev -p 5 -- get pods

  # the same command in two namespaces of every kind cluster
  mk -r kind -n default,kube-system -- get pods

  # aggregate as JSON and pick pod names per cluster with jq
  mk -r kind -o json -- get pods | jq 'keys[] as $k | \"\\($k) \\(.[$k].items[].metadata.name)\"'
";

#[derive(Parser, Debug)]
#[command(
    name = "mk",
    bin_name = "mk",
    version = get_version(),
    about = "Run kubectl commands against multiple clusters at once",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Regex to filter the context names in the kubeconfig. All contexts are used when unset
    #[arg(short = 'r', long, default_value = "")]
    pub regex: String,

    /// Regex to exclude matches from the result set. Evaluated after the include filter
    #[arg(short = 'x', long, default_value = "")]
    pub negative_regex: String,

    /// Comma-separated list of namespaces, each run as its own task.
    /// The default is the current namespace of every context
    #[arg(short = 'n', long, default_value = "")]
    pub namespaces: String,

    /// Just list the contexts matching the regex. Good for testing your regex
    #[arg(short = 'l', long)]
    pub list_only: bool,

    /// Max number of kubectl processes run in parallel
    #[arg(short = 'p', long, default_value_t = 5)]
    pub max_processes: usize,

    /// Enable debug output
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Aggregate all results into one document of this format instead of
    /// streaming them. One of json|yaml. Useful for piping into jq or yq
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// The kubectl command to run against every matching context
    #[arg(last = true)]
    pub command: Vec<String>,
}
