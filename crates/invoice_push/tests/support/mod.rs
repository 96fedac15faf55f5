#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn invoice_push_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_invoice-push"))
}

/// Run the binary with a private log directory and a clean environment for
/// the variables it reads. Verbosity comes from the flags alone.
pub fn run_cli(args: &[&str], log_dir: &Path) -> Output {
    Command::new(invoice_push_bin())
        .args(args)
        .arg("--log-dir")
        .arg(log_dir)
        .env_remove("INVOICE_PUSH_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to execute invoice-push")
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub struct ConfigValues<'a> {
    pub login_url: &'a str,
    pub push_url: &'a str,
    pub db_host: &'a str,
    pub db_port: u16,
    pub db_user: &'a str,
    pub db_password: &'a str,
    pub db_name: &'a str,
    pub db_schema: Option<&'a str>,
}

pub fn write_config(dir: &Path, values: &ConfigValues<'_>) -> PathBuf {
    let mut yaml = format!(
        "api:\n  login_url: \"{}\"\n  push_url: \"{}\"\n  username: \"ops@example.com\"\n  password: \"hunter2\"\n  timeout_secs: 5\n\
         database:\n  host: \"{}\"\n  port: {}\n  user: \"{}\"\n  password: \"{}\"\n  dbname: \"{}\"\n  sslmode: \"disable\"\n  connect_timeout_secs: 5\n",
        values.login_url,
        values.push_url,
        values.db_host,
        values.db_port,
        values.db_user,
        values.db_password,
        values.db_name,
    );
    if let Some(schema) = values.db_schema {
        yaml.push_str(&format!("  schema: \"{}\"\n", schema));
    }
    let path = dir.join("config.yaml");
    std::fs::write(&path, yaml).expect("write config");
    path
}
