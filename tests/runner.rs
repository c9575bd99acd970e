mod common;

use std::time::{Duration, Instant};

use common::{init_tracing, with_timeout};
use tokio_util::sync::CancellationToken;

use reqtmpl::exec::{Deadline, ExecutableAndArgs, ExecutableOutput, run_executables};

fn request(program: &str, args: &[&str]) -> ExecutableAndArgs {
    ExecutableAndArgs::new(program, args.iter().map(|a| a.to_string()).collect())
}

async fn run(deadline: Deadline, requests: &[ExecutableAndArgs]) -> Vec<ExecutableOutput> {
    let cancel = CancellationToken::new();
    with_timeout(run_executables(&cancel, deadline, requests)).await
}

#[tokio::test]
async fn stdout_is_trimmed() {
    init_tracing();

    let out = run(Deadline::unbounded(), &[request("echo", &["  hello  "])]).await;

    assert_eq!(out, vec![ExecutableOutput::Output("hello".to_string())]);
}

#[tokio::test]
async fn results_follow_request_order() {
    init_tracing();

    let requests = [
        request("sh", &["-c", "sleep 0.3; echo slow"]),
        request("echo", &["fast"]),
        request("sh", &["-c", "sleep 0.1; echo middle"]),
    ];
    let out = run(Deadline::unbounded(), &requests).await;

    let values: Vec<_> = out.iter().map(|o| o.output()).collect();
    assert_eq!(values, vec![Some("slow"), Some("fast"), Some("middle")]);
}

#[tokio::test]
async fn no_requests_no_results() {
    let out = run(Deadline::unbounded(), &[]).await;
    assert!(out.is_empty());
}

#[tokio::test]
async fn non_zero_exit_reports_status_and_output() {
    init_tracing();

    let out = run(
        Deadline::unbounded(),
        &[request("sh", &["-c", "echo partial; echo broken >&2; exit 3"])],
    )
    .await;

    let fatal = out[0].fatal().expect("fatal");
    assert!(
        fatal.starts_with("Executable sh -c echo partial; echo broken >&2; exit 3 error: exit status: 3"),
        "{fatal}"
    );
    assert!(fatal.contains("partial"), "{fatal}");
    assert!(fatal.contains("broken"), "{fatal}");
}

#[tokio::test]
async fn empty_stdout_is_fatal() {
    let out = run(
        Deadline::unbounded(),
        &[request("true", &[]), request("sh", &["-c", "printf '  \\n'"])],
    )
    .await;

    assert_eq!(
        out[0].fatal(),
        Some("Executable true\nCommand produced no stdout output")
    );
    assert!(
        out[1]
            .fatal()
            .is_some_and(|f| f.ends_with("Command produced no stdout output"))
    );
}

#[tokio::test]
async fn missing_program_is_fatal() {
    let out = run(
        Deadline::unbounded(),
        &[request("reqtmpl-no-such-program", &["x"])],
    )
    .await;

    let fatal = out[0].fatal().expect("fatal");
    assert!(
        fatal.starts_with("Executable reqtmpl-no-such-program x error:"),
        "{fatal}"
    );
}

#[tokio::test]
async fn one_failure_does_not_stop_the_others() {
    let out = run(
        Deadline::unbounded(),
        &[request("false", &[]), request("echo", &["still here"])],
    )
    .await;

    assert!(out[0].fatal().is_some());
    assert_eq!(out[1].output(), Some("still here"));
}

#[tokio::test]
async fn shared_deadline_times_out_every_executable_together() {
    init_tracing();

    let started = Instant::now();
    let out = run(
        Deadline::after(Duration::from_secs(1)),
        &[request("sleep", &["5"]), request("sleep", &["4"])],
    )
    .await;

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(
        out[0].fatal(),
        Some("Executable sleep 5 timed out after 1 seconds")
    );
    assert_eq!(
        out[1].fatal(),
        Some("Executable sleep 4 timed out after 1 seconds")
    );
}

#[tokio::test]
async fn fast_executable_beats_deadline() {
    let out = run(
        Deadline::after(Duration::from_secs(5)),
        &[request("echo", &["quick"])],
    )
    .await;

    assert_eq!(out[0].output(), Some("quick"));
}

#[tokio::test]
async fn cancellation_stops_running_executables() {
    init_tracing();

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            cancel.cancel();
        });
    }

    let requests = [request("sleep", &["5"])];
    let out = with_timeout(run_executables(&cancel, Deadline::unbounded(), &requests)).await;

    assert_eq!(out[0].fatal(), Some("Executable sleep 5 was cancelled"));
}
