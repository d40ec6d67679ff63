use anyhow::{
    Context,
    Result,
    ensure,
};
use clap::{
    Parser,
    Subcommand,
};
use std::{
    path::Path,
    process::Command,
};

const SAMPLE_BIDS: &str = "fixtures/sample-bids.json";
const SAMPLE_ROUND_END: &str = "1700003600";

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Endurance helper tasks (clippy, tests, sample standings)",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run clippy for the entire workspace with warnings-as-errors
    Clippy,
    /// Run the workspace test suite
    Test {
        /// Number of cases per property test (proptest default otherwise)
        #[arg(long)]
        proptest_cases: Option<u32>,
    },
    /// Print standings for the bundled sample round
    Sample {
        /// Rank by `chrono-warrior` or `champion-time`
        #[arg(long)]
        sort: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = repo_root();

    match cli.command {
        Commands::Clippy => run_clippy(&root)?,
        Commands::Test { proptest_cases } => run_tests(&root, proptest_cases)?,
        Commands::Sample { sort } => run_sample(&root, sort.as_deref())?,
    }

    Ok(())
}

fn repo_root() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("xtask has no parent directory")
        .to_path_buf()
}

fn run_clippy(root: &Path) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("clippy")
        .arg("--workspace")
        .arg("--all-targets")
        .arg("--all-features")
        .arg("--")
        .arg("-D")
        .arg("warnings")
        .current_dir(root);
    run_command(cmd, "cargo clippy")?;
    Ok(())
}

fn run_tests(root: &Path, proptest_cases: Option<u32>) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("test").arg("--workspace").current_dir(root);
    if let Some(cases) = proptest_cases {
        cmd.env("PROPTEST_CASES", cases.to_string());
    }
    run_command(cmd, "cargo test --workspace")?;
    Ok(())
}

fn run_sample(root: &Path, sort: Option<&str>) -> Result<()> {
    let bids = root.join(SAMPLE_BIDS);
    ensure!(bids.exists(), "missing sample bid list at {}", bids.display());
    let mut cmd = Command::new("cargo");
    cmd.arg("run")
        .arg("--quiet")
        .arg("-p")
        .arg("champions-cli")
        .arg("--")
        .arg(&bids)
        .arg("--round-end")
        .arg(SAMPLE_ROUND_END)
        .current_dir(root);
    if let Some(sort) = sort {
        cmd.arg("--sort").arg(sort);
    }
    run_command(cmd, "champions (sample round)")?;
    Ok(())
}

fn run_command(mut cmd: Command, label: &str) -> Result<()> {
    println!("Running: {}", label);
    let status = cmd
        .status()
        .with_context(|| format!("failed to run {label}"))?;
    ensure!(status.success(), "{label} failed with status {status}");
    Ok(())
}
