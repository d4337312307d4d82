#![allow(dead_code)]

use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};
use std::time::Duration;

/// A running `courier-server` instance for e2e testing.
///
/// Spawns the server binary on a random port with a temporary data directory.
/// The server is killed when this struct is dropped.
pub struct TestServer {
    child: Option<Child>,
    addr: String,
    /// Kept alive for the duration of the test. When dropped, the temp dir
    /// (config and data) is cleaned up.
    _work_dir: tempfile::TempDir,
}

#[derive(Default)]
struct TestServerOptions {
    visibility_timeout_ms: Option<u64>,
}

impl TestServer {
    /// Start a new courier-server instance on a random port.
    pub fn start() -> Self {
        Self::start_with_options(TestServerOptions::default())
    }

    /// Start a new courier-server instance with a custom visibility timeout.
    pub fn start_with_visibility_timeout(visibility_timeout_ms: u64) -> Self {
        Self::start_with_options(TestServerOptions {
            visibility_timeout_ms: Some(visibility_timeout_ms),
        })
    }

    fn start_with_options(opts: TestServerOptions) -> Self {
        let port = free_port();
        let addr = format!("127.0.0.1:{port}");
        let work_dir = tempfile::tempdir().expect("create temp dir");

        let vt_line = match opts.visibility_timeout_ms {
            Some(vt) => format!("visibility_timeout_ms = {vt}\n"),
            None => String::new(),
        };
        let config_content = format!(
            r#"[server]
listen_addr = "{addr}"
{vt_line}"#
        );
        std::fs::write(work_dir.path().join("courier.toml"), config_content)
            .expect("write config");

        let binary = server_binary();
        assert!(
            binary.exists(),
            "courier-server binary not found at {binary:?}. Run `cargo build` first."
        );

        let child = Command::new(&binary)
            .env(
                "COURIER_DATA_DIR",
                work_dir.path().join("data").to_str().unwrap(),
            )
            .current_dir(work_dir.path())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("start courier-server");

        // Poll TCP until the server is reachable.
        let start = std::time::Instant::now();
        let mut connected = false;
        while start.elapsed() < Duration::from_secs(10) {
            if std::net::TcpStream::connect(&addr).is_ok() {
                connected = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        assert!(
            connected,
            "courier-server did not become reachable at {addr} within 10s"
        );

        Self {
            child: Some(child),
            addr: format!("http://{addr}"),
            _work_dir: work_dir,
        }
    }

    /// The HTTP address of the running server (e.g., "http://127.0.0.1:12345").
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Output from a CLI invocation.
pub struct CliOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Run the `courier` CLI binary with the given arguments and server address.
pub fn cli_run(addr: &str, args: &[&str]) -> CliOutput {
    let binary = cli_binary();
    assert!(
        binary.exists(),
        "courier CLI binary not found at {binary:?}. Run `cargo build` first."
    );

    let output: Output = Command::new(&binary)
        .arg("--addr")
        .arg(addr)
        .args(args)
        .output()
        .expect("run courier CLI");

    CliOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
    }
}

/// Connect an SDK client to the given server address.
pub async fn sdk_client(addr: &str) -> courier_sdk::CourierClient {
    courier_sdk::CourierClient::connect(addr)
        .await
        .expect("connect SDK client")
}

/// Find a free TCP port.
fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind to free port");
    listener.local_addr().unwrap().port()
}

/// Resolve the path to the courier-server binary.
fn server_binary() -> PathBuf {
    workspace_binary("courier-server")
}

/// Resolve the path to the courier CLI binary.
fn cli_binary() -> PathBuf {
    workspace_binary("courier")
}

/// Resolve a binary path from the workspace target directory.
fn workspace_binary(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates/
    path.pop(); // workspace root
    path.push("target");
    path.push("debug");
    path.push(name);
    path
}
