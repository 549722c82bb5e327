use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir =
        std::env::temp_dir().join(format!("glamtrack-{prefix}-{}-{nanos}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run_glamtrack(args: &[&str]) -> (bool, Vec<u8>, Vec<u8>) {
    let bin = std::env::var("CARGO_BIN_EXE_glamtrack").unwrap_or_else(|_| {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        if cfg!(windows) {
            path.push("glamtrack.exe");
        } else {
            path.push("glamtrack");
        }
        path.to_string_lossy().into_owned()
    });
    let mut cmd = Command::new(bin);
    cmd.args(args);
    let output = cmd.output().expect("run glamtrack");
    (output.status.success(), output.stdout, output.stderr)
}

/// Serve exactly one HTTP response on an ephemeral local port.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    let handle = thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            stream
                .set_read_timeout(Some(Duration::from_secs(5)))
                .expect("read timeout");
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let response = format!(
                "{status_line}\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    (format!("http://{addr}/"), handle)
}

fn today_utc() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

fn output_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn records_usage_row_on_fresh_file() {
    let root = unique_temp_dir("fresh");
    let output = root.join("usage.tsv");
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"<root category="Cat1"><stats><usage project="wikipedia" usage_count="5"/><usage project="wikidata" usage_count="3"/></stats></root>"#,
    );

    let (ok, stdout, stderr) = run_glamtrack(&[
        "--url",
        &url,
        "--output",
        &output_arg(&output),
        "--timezone",
        "UTC",
    ]);
    server.join().expect("stub server");
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
    assert!(String::from_utf8_lossy(&stdout).contains("Updated"));

    let content = fs::read_to_string(&output).expect("read log");
    assert_eq!(
        content,
        format!(
            "category\tdate\twikidata\twikipedia\nCat1\t{}\t3\t5\n",
            today_utc()
        )
    );

    let _ = fs::remove_dir_all(root);
}

#[test]
fn new_project_appends_wider_row_without_touching_header() {
    let root = unique_temp_dir("drift");
    let output = root.join("usage.tsv");
    fs::write(
        &output,
        "category\tdate\twikidata\twikipedia\nCat1\t2026-08-06\t3\t5\n",
    )
    .expect("seed log");

    let (url, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"<root category="Cat1"><stats><usage project="wikipedia" usage_count="5"/><usage project="wikidata" usage_count="3"/><usage project="wikispecies" usage_count="1"/></stats></root>"#,
    );

    let (ok, _stdout, stderr) = run_glamtrack(&[
        "--url",
        &url,
        "--output",
        &output_arg(&output),
        "--timezone",
        "UTC",
        "--quiet",
    ]);
    server.join().expect("stub server");
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let content = fs::read_to_string(&output).expect("read log");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "category\tdate\twikidata\twikipedia");
    assert_eq!(lines[0].split('\t').count(), 4);
    assert_eq!(
        lines[2],
        format!("Cat1\t{}\t3\t5\t1", today_utc()),
        "new row carries the wikispecies column"
    );
    assert_eq!(lines[2].split('\t').count(), 5);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn fetch_failure_creates_no_file_and_exits_zero() {
    let root = unique_temp_dir("unreachable");
    let output = root.join("usage.tsv");

    // Bind then drop to get a local port with no listener behind it.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let url = format!("http://127.0.0.1:{port}/");

    let (ok, _stdout, stderr) = run_glamtrack(&["--url", &url, "--output", &output_arg(&output)]);
    assert!(ok, "aborted runs still exit 0");
    assert!(String::from_utf8_lossy(&stderr).contains("Error fetching XML data"));
    assert!(!output.exists(), "log file must not be created");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn http_error_status_creates_no_file() {
    let root = unique_temp_dir("status");
    let output = root.join("usage.tsv");
    let (url, server) = serve_once("HTTP/1.1 500 Internal Server Error", "boom");

    let (ok, _stdout, stderr) = run_glamtrack(&["--url", &url, "--output", &output_arg(&output)]);
    server.join().expect("stub server");
    assert!(ok, "aborted runs still exit 0");
    assert!(String::from_utf8_lossy(&stderr).contains("Failed to fetch XML data. Exiting."));
    assert!(!output.exists(), "log file must not be created");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn malformed_xml_creates_no_file() {
    let root = unique_temp_dir("badxml");
    let output = root.join("usage.tsv");
    let (url, server) = serve_once("HTTP/1.1 200 OK", "<root category=\"Cat1\">");

    let (ok, _stdout, stderr) = run_glamtrack(&["--url", &url, "--output", &output_arg(&output)]);
    server.join().expect("stub server");
    assert!(ok, "aborted runs still exit 0");
    assert!(String::from_utf8_lossy(&stderr).contains("Error parsing XML data"));
    assert!(!output.exists(), "log file must not be created");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn empty_stats_records_base_columns_row() {
    let root = unique_temp_dir("nodata");
    let output = root.join("usage.tsv");
    let (url, server) = serve_once("HTTP/1.1 200 OK", r#"<root category="Cat1"/>"#);

    let (ok, _stdout, stderr) = run_glamtrack(&[
        "--url",
        &url,
        "--output",
        &output_arg(&output),
        "--timezone",
        "UTC",
        "--quiet",
    ]);
    server.join().expect("stub server");
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let content = fs::read_to_string(&output).expect("read log");
    assert_eq!(content, format!("category\tdate\nCat1\t{}\n", today_utc()));

    let _ = fs::remove_dir_all(root);
}
