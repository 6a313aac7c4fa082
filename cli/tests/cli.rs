//! End-to-end tests of the `fba-tools` binary.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with no ambient configuration.
fn fba_tools(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fba-tools").expect("binary is built");
    for key in [
        "FBA_TOOLS_URL",
        "FBA_TOOLS_TOKEN",
        "FBA_TOOLS_TIMEOUT_MS",
        "FBA_TOOLS_SERVICE_VERSION",
        "FBA_TOOLS_LOG_LEVEL",
        "FBA_TOOLS_ALLOW_INSECURE_HTTP",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("XDG_CONFIG_HOME", home.path()).env("HOME", home.path());
    cmd
}

/// Answers a single HTTP request with `body`; returns the URL and a handle
/// yielding the raw request.
fn serve_once(body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("http://{}", listener.local_addr().expect("addr"));

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).expect("read");
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request).to_string();
            if let Some(split) = text.find("\r\n\r\n") {
                let length = text[..split]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0usize);
                if request.len() >= split + 4 + length {
                    break;
                }
            }
            if n == 0 {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).expect("write");
        String::from_utf8_lossy(&request).to_string()
    });

    (url, handle)
}

#[test]
fn methods_lists_catalogue() {
    let home = TempDir::new().expect("tempdir");
    fba_tools(&home)
        .arg("methods")
        .assert()
        .success()
        .stdout(predicate::str::contains("gapfill_metabolic_model"))
        .stdout(predicate::str::contains("bulk_export_objects"))
        .stdout(predicate::str::contains("status"));

    fba_tools(&home)
        .args(["methods", "--category", "import"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tsv_file_to_model"))
        .stdout(predicate::str::contains("run_flux_balance_analysis").not());
}

#[test]
fn call_rejects_bad_arguments_locally() {
    let home = TempDir::new().expect("tempdir");
    fba_tools(&home)
        .args(["call", "model_to_sbml_file", "--params", "42", "--url", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be an object"));

    fba_tools(&home)
        .args(["call", "run_everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown method: run_everything"));

    fba_tools(&home)
        .args(["call", "edit_media", "--params", "{oops"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON in --params"));
}

#[test]
fn unreachable_service_reports_500() {
    let home = TempDir::new().expect("tempdir");
    fba_tools(&home)
        .args(["status", "--url", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Connection error (500)"));
}

#[test]
fn status_prints_service_status() {
    let home = TempDir::new().expect("tempdir");
    let (url, handle) =
        serve_once(r#"{"version":"1.1","result":[{"state":"OK","version":"1.7.6"}]}"#);

    fba_tools(&home)
        .args(["status", "--url", &url, "--token", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"state\": \"OK\""))
        .stdout(predicate::str::contains("1.7.6"));

    let request = handle.join().expect("server thread");
    assert!(request.contains("fba_tools.status"));
    assert!(request.to_ascii_lowercase().contains("authorization: secret"));
}

#[test]
fn token_over_remote_http_is_refused() {
    let home = TempDir::new().expect("tempdir");
    fba_tools(&home)
        .args(["status", "--url", "http://192.0.2.1:5000", "--token", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insecure HTTP"))
        .stderr(predicate::str::contains("secret").not());
}

#[test]
fn config_file_and_flags_combine() {
    let home = TempDir::new().expect("tempdir");
    let path = home.path().join("fba.toml");
    std::fs::write(
        &path,
        "[service]\nurl = \"https://kbase.us/services/fba_tools\"\n\n[auth]\ntoken = \"hidden\"\n",
    )
    .expect("write config");

    fba_tools(&home)
        .args(["config", "--config"])
        .arg(&path)
        .args(["--service-version", "beta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://kbase.us/services/fba_tools"))
        .stdout(predicate::str::contains("beta"))
        .stdout(predicate::str::contains("hidden").not());

    fba_tools(&home)
        .args(["config", "--config", "/nonexistent/fba.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
