use std::env;
use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitCode, Stdio};

#[derive(Debug)]
struct AppError {
    code: u8,
    message: String,
}

impl AppError {
    fn usage(message: impl Into<String>) -> Self {
        Self {
            code: 2,
            message: message.into(),
        }
    }

    fn command(message: impl Into<String>) -> Self {
        Self {
            code: 1,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Step {
    name: &'static str,
    program: &'static str,
    args: &'static [&'static str],
    stdin: Option<&'static [u8]>,
}

impl Step {
    const fn cargo(name: &'static str, args: &'static [&'static str]) -> Self {
        Self {
            name,
            program: "cargo",
            args,
            stdin: None,
        }
    }

    const fn with_stdin(mut self, input: &'static [u8]) -> Self {
        self.stdin = Some(input);
        self
    }
}

const FUZZ_MANIFEST: &str = "fuzz/Cargo.toml";

// Dallas, Denver, Amarillo as little-endian f64 pairs followed by a flag byte.
const PROGRESS_SEED: &[u8] = &[
    0x36, 0xab, 0x3e, 0x57, 0x5b, 0x79, 0x40, 0x40, 0x31, 0x99, 0x2a, 0x18, 0x95, 0x30, 0x58,
    0xc0, 0x02, 0x9a, 0x08, 0x1b, 0x9e, 0xde, 0x43, 0x40, 0xa5, 0x4e, 0x40, 0x13, 0x61, 0x3f,
    0x5a, 0xc0, 0x92, 0xcb, 0x7f, 0x48, 0xbf, 0x15, 0x42, 0x40, 0x29, 0xcb, 0x10, 0xc7, 0xba,
    0x58, 0x59, 0xc0, 0x02,
];

const CONFIG_SEED: &[u8] =
    b"estimator:\n  average_speed_mph: 50\nanimation:\n  duration: 3s\n  start: carry_forward\n";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.message);
            ExitCode::from(err.code)
        }
    }
}

fn run() -> Result<(), AppError> {
    let mut args = env::args().skip(1);
    let Some(subcommand) = args.next() else {
        return Err(AppError::usage(usage()));
    };

    if args.next().is_some() {
        return Err(AppError::usage(format!(
            "Unexpected extra arguments for `{subcommand}`.\n\n{}",
            usage()
        )));
    }

    match subcommand.as_str() {
        "ci" => run_ci(),
        "fuzz-smoke" => run_fuzz_smoke(),
        "release-check" => run_release_check(),
        "help" | "--help" | "-h" => {
            println!("{}", usage());
            Ok(())
        }
        _ => Err(AppError::usage(format!(
            "Unknown xtask subcommand `{subcommand}`.\n\n{}",
            usage()
        ))),
    }
}

fn run_ci() -> Result<(), AppError> {
    let steps = [
        Step::cargo("Format check", &["fmt", "--all", "--", "--check"]),
        Step::cargo(
            "Clippy lint",
            &[
                "clippy",
                "--workspace",
                "--all-targets",
                "--all-features",
                "--",
                "-D",
                "warnings",
            ],
        ),
        Step::cargo("Workspace tests", &["test", "--workspace"]),
        Step::cargo(
            "Scenario fixture harness",
            &["test", "--manifest-path", "tests/scenario_harness/Cargo.toml"],
        ),
    ];

    run_steps("ci", &steps)
}

fn run_fuzz_smoke() -> Result<(), AppError> {
    if !Path::new(FUZZ_MANIFEST).exists() {
        return Err(AppError::command(format!(
            "No fuzz hook package found at `{FUZZ_MANIFEST}`."
        )));
    }

    let steps = [
        Step::cargo(
            "Build fuzz hooks",
            &["build", "--manifest-path", FUZZ_MANIFEST, "--bins"],
        ),
        Step::cargo(
            "Progress hook (seed route)",
            &[
                "run",
                "--quiet",
                "--manifest-path",
                FUZZ_MANIFEST,
                "--bin",
                "progress_total_hook",
            ],
        )
        .with_stdin(PROGRESS_SEED),
        Step::cargo(
            "Progress hook (empty input)",
            &[
                "run",
                "--quiet",
                "--manifest-path",
                FUZZ_MANIFEST,
                "--bin",
                "progress_total_hook",
            ],
        )
        .with_stdin(b""),
        Step::cargo(
            "Config hook (seed document)",
            &[
                "run",
                "--quiet",
                "--manifest-path",
                FUZZ_MANIFEST,
                "--bin",
                "config_parse_hook",
            ],
        )
        .with_stdin(CONFIG_SEED),
    ];

    run_steps("fuzz-smoke", &steps)
}

fn run_release_check() -> Result<(), AppError> {
    let steps = [
        Step::cargo("Workspace check", &["check", "--workspace", "--all-targets"]),
        Step::cargo(
            "All-feature tests",
            &["test", "--workspace", "--all-features"],
        ),
        Step::cargo(
            "Benchmarks compile",
            &["bench", "-p", "parceltrack", "--no-run"],
        ),
        Step::cargo(
            "Config schema renders",
            &["run", "--quiet", "-p", "parceltrack-cli", "--", "schema"],
        ),
        Step::cargo("Documentation build", &["doc", "--workspace", "--no-deps"]),
    ];

    run_steps("release-check", &steps)
}

fn run_steps(name: &str, steps: &[Step]) -> Result<(), AppError> {
    println!("Running xtask `{name}` with {} step(s).", steps.len());
    for step in steps {
        run_step(step)?;
    }
    println!("xtask `{name}` completed successfully.");
    Ok(())
}

fn run_step(step: &Step) -> Result<(), AppError> {
    let rendered = format!("{} {}", step.program, step.args.join(" "));
    println!("-> {}: {rendered}", step.name);

    let launch_error = |error: std::io::Error| {
        AppError::command(format!(
            "Failed to launch step `{}` ({rendered}): {error}",
            step.name
        ))
    };

    let mut command = Command::new(step.program);
    command.args(step.args);
    let status = match step.stdin {
        None => command.status().map_err(launch_error)?,
        Some(input) => {
            let mut child = command
                .stdin(Stdio::piped())
                .spawn()
                .map_err(launch_error)?;
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(input).map_err(launch_error)?;
            }
            child.wait().map_err(launch_error)?
        }
    };

    if status.success() {
        Ok(())
    } else {
        Err(AppError::command(format!(
            "Step `{}` failed with status {}.",
            step.name, status
        )))
    }
}

fn usage() -> &'static str {
    "Usage: cargo run -p xtask -- <subcommand>\n\nSubcommands:\n  ci             Run fmt, clippy, and workspace tests\n  fuzz-smoke     Build the fuzz hooks and replay their seed inputs\n  release-check  Run workspace check, all-feature tests, bench build, schema render, and docs\n  help           Print this help\n\nExit codes:\n  0  Success\n  1  Command execution failure\n  2  Usage error"
}
