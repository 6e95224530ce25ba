use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_prisoners")
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(bin())
        .args(args)
        .output()
        .expect("prisoners should run")
}

#[test]
fn run_prints_one_line_per_trial_then_summary() {
    let output = run(&["20", "--seed", "7"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    for (index, line) in lines.iter().take(20).enumerate() {
        let run = index + 1;
        let success = format!("Run: {run} is a success.");
        let failure = format!("Run: {run} failed at: ");
        assert!(
            *line == success || (line.starts_with(&failure) && line.ends_with(" n-th prisonner.")),
            "unexpected line {line:?}"
        );
    }
    assert_eq!(lines[20], "Simulation Done with 20 runs.");
    assert!(stdout.contains("Success rate: "));
    assert!(stdout.contains("Average prisonners try before failure: "));
}

#[test]
fn json_summary_is_emitted() {
    let output = run(&["500", "--seed", "11", "--json"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("--json should emit json");
    assert_eq!(payload["runs"], 500);
    assert_eq!(payload["seed"], 11);
    let successes = payload["successes"].as_u64().unwrap_or_default();
    let failures = payload["failures"].as_u64().unwrap_or_default();
    assert_eq!(successes + failures, 500);
    assert!(payload["success_rate"].is_number());
}

#[test]
fn seeded_runs_are_reproducible() {
    let first = run(&["300", "--seed", "99", "--quiet"]);
    let second = run(&["300", "--seed", "99", "--quiet"]);
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn zero_trials_report_no_data() {
    let output = run(&["0", "--seed", "1"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Simulation Done with 0 runs."));
    assert!(stdout.contains("Success: 0"));
    assert!(stdout.contains("Failed: 0"));
    assert!(stdout.contains("n/a (no failed runs)"));
    assert!(!stdout.contains("NaN"));
}

#[test]
fn parallel_run_reports_summary() {
    let output = run(&["1000", "--seed", "3", "--workers", "2", "--json"]);

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("parallel run should emit json");
    assert_eq!(payload["runs"], 1000);
}

#[test]
fn environment_does_not_change_the_run() {
    let output = Command::new(bin())
        .args(["--seed", "5", "--quiet"])
        .env("PRISONERS_TRIALS", "12")
        .output()
        .expect("prisoners should run");
    let baseline = run(&["--seed", "5", "--quiet"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Simulation Done with 10000 runs."), "{stdout}");
    assert_eq!(output.stdout, baseline.stdout);

    let output = Command::new(bin())
        .args(["3", "--json"])
        .env("PRISONERS_SEED", "6")
        .output()
        .expect("prisoners should run");
    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json summary");
    assert_eq!(json["runs"], 3);
    assert_ne!(json["seed"], 6);
}

#[test]
fn unknown_option_returns_usage() {
    let output = run(&["--strategy", "random"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: prisoners"));
}

#[test]
fn invalid_trial_count_returns_usage() {
    let output = run(&["lots"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid trials 'lots'"));
}
