//! Test assertion helpers.

use std::process::Output;

use serde_json::Value;

/// Assert that a command output was successful.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("Command failed:\n{}", stderr);
    }
}

/// Assert that a command output failed.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded"
    );
}

/// Get stdout as String.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as String.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert stderr contains a string.
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        err.contains(expected),
        "stderr missing '{}', got: {}",
        expected,
        err
    );
}

/// Assert stdout is exactly the protocol header, with no response body.
pub fn assert_header_only(output: &Output, header: &str) {
    assert_eq!(stdout(output), format!("{}\n", header));
}

/// Split stdout into the header line and the parsed JSON response.
pub fn response(output: &Output) -> (String, Value) {
    let out = stdout(output);
    let mut lines = out.lines();
    let header = lines.next().expect("missing header line").to_string();
    let body = lines.next().expect("missing response line");
    assert!(lines.next().is_none(), "unexpected extra output: {}", out);
    let value = serde_json::from_str(body).expect("response is not JSON");
    (header, value)
}
