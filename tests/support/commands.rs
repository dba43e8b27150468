//! Command helper methods for Test.

use super::{Test, HELPER_VARS};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a helper command with a clean environment.
    ///
    /// Returns a Command with every credential and logging variable removed
    /// and the current directory set to the test directory.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd =
            Command::cargo_bin("sops-age-helper").expect("failed to find sops-age-helper binary");
        for var in HELPER_VARS {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run `subcommand` with `request` on stdin and extra variables.
    pub fn exchange(&self, subcommand: &str, request: &str, vars: &[(&str, &str)]) -> Output {
        let mut cmd = self.cmd();
        cmd.arg(subcommand).write_stdin(request);
        for (name, value) in vars {
            cmd.env(name, value);
        }
        cmd.output().expect("failed to run sops-age-helper")
    }

    /// Shortcut for `encrypt`.
    pub fn encrypt(&self, payload: &str, vars: &[(&str, &str)]) -> Output {
        let request = serde_json::json!({ "payload": payload }).to_string();
        self.exchange("encrypt", &request, vars)
    }

    /// Shortcut for `decrypt` with base64 ciphertext and a base64 key list.
    pub fn decrypt(&self, payload: &str, key: &str) -> Output {
        let request = serde_json::json!({ "payload": payload, "key": key }).to_string();
        self.exchange("decrypt", &request, &[])
    }

    /// Shortcut for `key-provider`.
    pub fn key_provider(&self, external_data: bool, vars: &[(&str, &str)]) -> Output {
        let request = if external_data {
            serde_json::json!({ "external_data": { "source": "test" } })
        } else {
            serde_json::json!({ "external_data": null })
        };
        self.exchange("key-provider", &request.to_string(), vars)
    }
}
