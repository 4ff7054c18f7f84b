use std::sync::Arc;

use gallery_dev_core::{CommandSpec, Error};
use gallery_dev_exec::{MockRunner, Mode};
use gallery_dev_tasks::*;

const WORKDIR: &str = "/home/dev/gallery";

fn context(runner: &MockRunner) -> TaskContext {
    TaskContext::new(DevConfig::new(WORKDIR), Arc::new(runner.clone()))
}

async fn run(op: Operation, runner: &MockRunner) -> Vec<CommandSpec> {
    dispatch(op, &context(runner)).await.unwrap();
    runner.commands().await
}

fn values_of<'a>(cmd: &'a CommandSpec, flag: &str) -> Vec<&'a str> {
    cmd.args
        .windows(2)
        .filter(|pair| pair[0] == flag)
        .map(|pair| pair[1].as_str())
        .collect()
}

fn count_flag(cmd: &CommandSpec, flag: &str) -> usize {
    cmd.args.iter().filter(|a| *a == flag).count()
}

fn first_args(commands: &[CommandSpec]) -> Vec<String> {
    commands
        .iter()
        .map(|c| format!("{} {}", c.program, c.args.first().cloned().unwrap_or_default()))
        .collect()
}

#[tokio::test]
async fn test_each_operation_selects_its_own_action() {
    let expected: [(Operation, &[&str]); 7] = [
        (Operation::Build, &["docker build"]),
        (Operation::BuildDeploy, &["docker build"]),
        (Operation::Start, &["docker run"]),
        (Operation::Stop, &["docker ps"]),
        (Operation::Shell, &["docker ps"]),
        (Operation::InstallBasicViewer, &["docker-compose run"]),
        (Operation::WebserviceTest, &["docker run"]),
    ];

    for (op, prefixes) in expected {
        let runner = MockRunner::new();
        let commands = run(op, &runner).await;
        let firsts = first_args(&commands);

        assert!(!firsts.is_empty(), "{op} ran nothing");
        assert_eq!(&firsts[..prefixes.len()], prefixes, "{op} ran the wrong action");
    }
}

#[tokio::test]
async fn test_stop_with_no_running_containers() {
    let runner = MockRunner::new();
    runner.push_listing("").await;

    let commands = run(Operation::Stop, &runner).await;
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].args[0], "ps");
}

#[tokio::test]
async fn test_shell_with_no_running_containers() {
    let runner = MockRunner::new();
    runner.push_listing("\n").await;

    let commands = run(Operation::Shell, &runner).await;
    assert_eq!(commands.len(), 1);
}

#[tokio::test]
async fn test_stop_kills_each_listed_container() {
    let runner = MockRunner::new();
    runner.push_listing("abc123\ndef456\n").await;

    dispatch(Operation::Stop, &context(&runner)).await.unwrap();

    let calls = runner.calls().await;
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].0, Mode::Capture);
    assert_eq!(calls[1], (Mode::Run, CommandSpec::new("docker").args(["kill", "abc123"])));
    assert_eq!(calls[2], (Mode::Run, CommandSpec::new("docker").args(["kill", "def456"])));
}

#[tokio::test]
async fn test_stop_strips_whitespace_from_listing() {
    let runner = MockRunner::new();
    runner.push_listing("  abc123  \r\n\tdef456\n\n").await;

    let commands = run(Operation::Stop, &runner).await;
    let kills: Vec<_> = commands[1..].iter().map(|c| c.args[1].as_str()).collect();
    assert_eq!(kills, vec!["abc123", "def456"]);
}

#[tokio::test]
async fn test_shell_opens_one_shell_per_container() {
    let runner = MockRunner::new();
    runner.push_listing("abc123\ndef456\n").await;

    let commands = run(Operation::Shell, &runner).await;
    assert_eq!(commands.len(), 3);
    assert_eq!(commands[1].args, vec!["exec", "-it", "abc123", "bash"]);
    assert_eq!(commands[2].args, vec!["exec", "-it", "def456", "bash"]);
}

#[tokio::test]
async fn test_stop_skips_invalid_listing_lines() {
    let runner = MockRunner::new();
    runner.push_listing("abc123\n--all\n").await;

    let commands = run(Operation::Stop, &runner).await;
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[1].args, vec!["kill", "abc123"]);
}

#[tokio::test]
async fn test_build_and_build_deploy_agree_except_switches() {
    let dev = run(Operation::Build, &MockRunner::new()).await.remove(0);
    let deploy = run(Operation::BuildDeploy, &MockRunner::new()).await.remove(0);

    assert!(values_of(&dev, "--build-arg").iter().all(|v| v.ends_with("=1")));
    assert!(values_of(&deploy, "--build-arg").iter().all(|v| v.ends_with("=0")));
    assert_eq!(values_of(&dev, "--build-arg").len(), 3);

    assert_eq!(values_of(&dev, "--tag"), values_of(&deploy, "--tag"));
    assert_eq!(values_of(&dev, "--file"), values_of(&deploy, "--file"));
}

#[tokio::test]
async fn test_start_mounts_working_directory() {
    let commands = run(Operation::Start, &MockRunner::new()).await;
    assert_eq!(commands.len(), 1);

    let start = &commands[0];
    assert_eq!(count_flag(start, "-p"), 1);
    assert_eq!(count_flag(start, "-v"), 2);
    for mount in values_of(start, "-v") {
        assert!(mount.starts_with(WORKDIR), "mount {mount} not under workdir");
    }
}

#[tokio::test]
async fn test_webservice_test_opens_both_reports() {
    let runner = MockRunner::new();
    let commands = run(Operation::WebserviceTest, &runner).await;

    assert_eq!(commands.len(), 3);
    assert_eq!(commands[0].program, "docker");
    assert!(commands[1].args.last().unwrap().ends_with("coverage.html/index.html"));
    assert!(commands[2].args.last().unwrap().ends_with("testdox.html"));
}

#[tokio::test]
async fn test_webservice_test_strict_still_opens_reports() {
    let runner = MockRunner::new();
    runner.set_exit_code("run", 2).await;

    let ctx = context(&runner).with_strict(true);
    let err = dispatch(Operation::WebserviceTest, &ctx).await.unwrap_err();

    assert!(matches!(err, Error::CommandFailed { code: Some(2), .. }));
    assert_eq!(runner.call_count().await, 3);
}

#[tokio::test]
async fn test_strict_stop_aborts_after_first_failed_kill() {
    let runner = MockRunner::new();
    runner.push_listing("abc123\ndef456\n").await;
    runner.set_exit_code("kill", 1).await;

    let ctx = context(&runner).with_strict(true);
    assert!(dispatch(Operation::Stop, &ctx).await.is_err());
    assert_eq!(runner.call_count().await, 2);
}

#[tokio::test]
async fn test_default_mode_reports_but_continues() {
    let runner = MockRunner::new();
    runner.push_listing("abc123\ndef456\n").await;
    runner.set_exit_code("kill", 1).await;

    let summary = dispatch(Operation::Stop, &context(&runner)).await.unwrap();
    assert_eq!(summary.executed, 3);
    assert_eq!(summary.failed, 2);
}

#[tokio::test]
async fn test_missing_runtime_is_an_error() {
    let runner = MockRunner::new();
    runner.set_missing("docker").await;

    let err = dispatch(Operation::Build, &context(&runner)).await.unwrap_err();
    assert!(matches!(err, Error::Spawn { .. }));
}

#[tokio::test]
async fn test_missing_browser_is_not_an_error() {
    let runner = MockRunner::new();
    for opener in ["xdg-open", "open", "cmd"] {
        runner.set_missing(opener).await;
    }

    let ctx = context(&runner).with_strict(true);
    dispatch(Operation::WebserviceTest, &ctx).await.unwrap();
    assert_eq!(runner.call_count().await, 1);
}
