use std::{fs, process::Command};

fn dashboard() -> Command {
    Command::new(env!("CARGO_BIN_EXE_utility-dashboard"))
}

#[test]
fn failed_run_still_writes_metrics_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("metrics.prom");
    let config = dir.path().join("dashboard-config.toml");
    fs::write(
        &config,
        format!("[metrics]\nsnapshot_path = {:?}\n", snapshot.display().to_string()),
    )
    .unwrap();

    let out = dashboard()
        .arg(dir.path().join("missing.xlsx"))
        .env("DASHBOARD_CONFIG", &config)
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error: could not read"));
    assert!(snapshot.exists());
}

#[test]
fn successful_run_writes_report_and_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("metrics.prom");
    let config = dir.path().join("dashboard-config.toml");
    fs::write(
        &config,
        format!("[metrics]\nsnapshot_path = {:?}\n", snapshot.display().to_string()),
    )
    .unwrap();
    let workbook = dir.path().join("JAN.csv");
    fs::write(&workbook, "DAY,ELEC\n1,100\n2,120\n").unwrap();

    let out = dashboard()
        .arg(&workbook)
        .args(["--period", "JAN"])
        .env("DASHBOARD_CONFIG", &config)
        .output()
        .unwrap();

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Period: JAN"));
    let text = fs::read_to_string(&snapshot).unwrap();
    assert!(text.contains("dashboard_sheets_read_total"));
}
