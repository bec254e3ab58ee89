//! Azure CLI command execution.
//!
//! Provides utilities for running Azure CLI commands and parsing their output.

use crate::config;
use colored::Colorize;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::process::Command;
use std::sync::OnceLock;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// Run a shell command and return its stdout.
///
/// The command string is split on spaces, with quoted substrings preserved.
///
/// # Returns
/// * `Ok(String)` - The stdout output on success
/// * `Err` - If the command fails, produces too much output or non UTF-8
pub fn run(cmd: &str) -> Result<String, Box<dyn Error>> {
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let cmds: Vec<&str> = split_and_strip(cmd);
    log::trace!("split cmds={:?}", cmds);
    if cmds.is_empty() || cmds[0].is_empty() {
        return Err(format!("Empty command: {cmd:?}").into());
    }

    let mut command = Command::new(cmds[0]);
    for arg in cmds.iter().skip(1) {
        command.arg(arg);
    }

    let output = command.output().map_err(|e| {
        log::error!("Command execution failed: {}", e);
        format!("Failed to execute command {}: {}", cmds[0], e)
    })?;

    if output.status.success() {
        log::debug!("Success cmd: {cmd}");
        log::debug!("Success output.stdout.len(): {}", output.stdout.len());

        if output.stdout.len() > config::MAX_OUTPUT_BYTES {
            return Err(format!(
                "Response too large: {} bytes for command: {:?}",
                output.stdout.len(),
                cmds
            )
            .into());
        }
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        return Err(format!("ERROR running: {}", stderr.trim()).into());
    }

    let stdout = String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8: {}", e))?;

    Ok(stdout)
}

/// Run an `az` sub command, e.g. `run_az("group list")`.
pub fn run_az(args: &str) -> Result<String, Box<dyn Error>> {
    run(&format!("{} {args}", config::az_bin()))
}

/// Run an `az` sub command with `--output json` and deserialize the result.
pub fn run_az_json<T: DeserializeOwned>(args: &str) -> Result<T, Box<dyn Error>> {
    let output = run_az(&format!("{args} --output json"))?;
    parse_json(&output, args)
}

/// Deserialize `az` JSON output, reporting the failing path on error.
pub fn parse_json<T: DeserializeOwned>(output: &str, context: &str) -> Result<T, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(output);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", output);
        format!(
            "Error parsing JSON from 'az {context}': path={} error={}",
            e.path(),
            e
        )
        .into()
    })
}

/// Split a command string on spaces, preserving quoted substrings.
pub(super) fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .filter(|s| !s.is_empty())
        .collect()
}
