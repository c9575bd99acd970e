mod common;

use std::time::Duration;

use common::{init_tracing, with_timeout};
use tokio_util::sync::CancellationToken;

use reqtmpl::call::{BackendCommand, invoke_backend, write_body_file};
use reqtmpl::errors::ReqtmplError;
use reqtmpl::exec::Deadline;

fn command(program: &str, args: &[&str]) -> BackendCommand {
    BackendCommand {
        program: program.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
    }
}

#[tokio::test]
async fn returns_backend_stdout() {
    init_tracing();

    let cancel = CancellationToken::new();
    let out = with_timeout(invoke_backend(
        &cancel,
        Deadline::unbounded(),
        &command("echo", &["response body"]),
    ))
    .await
    .unwrap();

    assert_eq!(out, "response body\n");
}

#[tokio::test]
async fn failure_carries_exit_code_and_output() {
    let cancel = CancellationToken::new();
    let err = with_timeout(invoke_backend(
        &cancel,
        Deadline::unbounded(),
        &command("sh", &["-c", "echo partial; echo refused >&2; exit 7"]),
    ))
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), 7);
    match err {
        ReqtmplError::Backend { message, exit_code } => {
            assert_eq!(exit_code, Some(7));
            assert!(message.starts_with("Error: exit status: 7, running backend command: sh -c"), "{message}");
            assert!(message.ends_with("Error output: refused partial"), "{message}");
        }
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn backend_is_bounded_by_the_deadline() {
    let cancel = CancellationToken::new();
    let deadline = Deadline::unbounded().capped(Duration::from_secs(1));

    let err = with_timeout(invoke_backend(&cancel, deadline, &command("sleep", &["5"])))
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 1);
    assert_eq!(
        err.to_string(),
        "Backend command sleep 5 timed out after 1 seconds"
    );
}

#[tokio::test]
async fn missing_backend_binary() {
    let cancel = CancellationToken::new();
    let err = invoke_backend(
        &cancel,
        Deadline::unbounded(),
        &command("reqtmpl-no-such-backend", &[]),
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().starts_with("Could not run backend command reqtmpl-no-such-backend"));
}

#[test]
fn body_file_holds_the_body_until_dropped() {
    let file = write_body_file("{\"a\": 1}\n{\"b\": 2}").unwrap();
    let path = file.path().to_path_buf();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"a\": 1}\n{\"b\": 2}");

    drop(file);
    assert!(!path.exists());
}
