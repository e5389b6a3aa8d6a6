use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use file_manager::platform::open_log_file_secure_append;
use file_manager::FileManager;
use tempfile::tempdir;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tsfmt, registry};

/// Appends written bytes into a shared in-memory buffer.
#[derive(Clone)]
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured(buf: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8_lossy(&buf.lock().unwrap()[..]).to_string()
}

#[test]
fn not_found_is_logged_at_error_level() {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufferWriter(buf.clone())
    };
    let layer = tsfmt::layer().with_writer(make_writer).with_ansi(false).compact();
    let subscriber = registry().with(EnvFilter::new("error")).with(layer);

    let td = tempdir().unwrap();
    let mut fm = FileManager::with_root(td.path()).unwrap();

    let dispatch = tracing::Dispatch::new(subscriber);
    tracing::dispatcher::with_default(&dispatch, || {
        fm.delete_file("ghost.txt");
        // Conflict is not an error-level event.
        fm.create_file("here.txt");
        fm.create_file("here.txt");
    });

    let contents = captured(&buf);
    assert!(contents.contains("ERROR"), "contents={contents}");
    assert!(contents.contains("not_found"), "contents={contents}");
    assert!(contents.contains("delete_file"), "contents={contents}");
    assert!(!contents.contains("conflict"), "contents={contents}");
}

#[test]
fn successful_operations_log_at_info() {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufferWriter(buf.clone())
    };
    let layer = tsfmt::layer().with_writer(make_writer).with_ansi(false).compact();
    let subscriber = registry().with(EnvFilter::new("info")).with(layer);

    let td = tempdir().unwrap();
    let mut fm = FileManager::with_root(td.path()).unwrap();

    let dispatch = tracing::Dispatch::new(subscriber);
    tracing::dispatcher::with_default(&dispatch, || {
        fm.create_file("report.txt");
    });

    assert!(captured(&buf).contains("File created"), "contents={}", captured(&buf));
}

#[test]
fn diagnostic_log_file_receives_events() {
    let td = tempdir().expect("tempdir");
    let log_path = td.path().join("logs").join("fms_errors.log");

    if file_manager::path_has_symlink_ancestor(&log_path).unwrap() {
        eprintln!("Skipping: path has symlink ancestor: {}", log_path.display());
        return;
    }

    let file = open_log_file_secure_append(&log_path).expect("open_log_file_secure_append");
    let (writer, guard): (tracing_appender::non_blocking::NonBlocking, WorkerGuard) =
        tracing_appender::non_blocking(file);
    let file_layer = tsfmt::layer()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .compact();
    let subscriber = registry().with(EnvFilter::new("error")).with(file_layer);

    let root = tempdir().unwrap();
    let mut fm = FileManager::with_root(root.path()).unwrap();

    let dispatch = tracing::Dispatch::new(subscriber);
    tracing::dispatcher::with_default(&dispatch, || {
        fm.rename_file("missing.txt", "x.txt");
    });
    drop(guard);

    let contents = std::fs::read_to_string(&log_path).expect("read log file");
    assert!(contents.contains("rename_file"), "log contents: {contents}");
}
