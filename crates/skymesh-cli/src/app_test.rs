use std::sync::Arc;

use mockito::Matcher;
use ratatui::backend::TestBackend;
use skymesh_core::test_utils::RecordingRunner;
use skymesh_term::Key;
use skymesh_term::ScriptedKeys;
use skymesh_term::TerminalCanvas;

use super::*;

const VERSION: &str = "1.70.0\n  go version: go1.22.5\n";
const HEADER: &str = "ID    Tailnet    Account\n";

type TestApp = App<TerminalCanvas<TestBackend>, ScriptedKeys>;

fn installed() -> RecordingRunner {
    return RecordingRunner::new().respond("--version", VERSION);
}

fn app(runner: &RecordingRunner, settings: Settings, keys: Vec<Key>) -> TestApp {
    let canvas = TerminalCanvas::new(TestBackend::new(80, 24)).unwrap();
    return App::new(
        Drawer::new(canvas),
        ScriptedKeys::new(keys),
        settings,
        Arc::new(runner.clone()),
    )
    .with_target(InstallTarget::Linux);
}

fn tool_calls(runner: &RecordingRunner) -> Vec<Vec<String>> {
    return runner.args_for("tailscale");
}

fn argv(args: &[&str]) -> Vec<String> {
    return args.iter().map(|a| a.to_string()).collect();
}

fn keys(parts: &[&[Key]]) -> Vec<Key> {
    return parts.concat();
}

#[tokio::test]
async fn zero_accounts_runs_the_connect_flow() {
    let mut server = mockito::Server::new_async().await;
    let login = server
        .mock("POST", "/api/logIn")
        .match_body(Matcher::Json(serde_json::json!({
            "account": "alice",
            "password": "pw"
        })))
        .with_status(200)
        .with_body(r#"{"key":"tskey-auth-1"}"#)
        .create_async()
        .await;

    let runner = installed().respond("switch --list", HEADER);
    let settings = Settings {
        login_url: format!("{}/api/logIn", server.url()),
        ..Settings::default()
    };
    let script = keys(&[
        &[Key::Enter],
        &ScriptedKeys::typed("alice"),
        &[Key::Enter],
        &ScriptedKeys::typed("pw"),
        &[Key::Enter, Key::Enter, Key::Esc],
    ]);

    let outcome = app(&runner, settings, script).run().await.unwrap();

    assert_eq!(outcome, Outcome::Quit);
    login.assert_async().await;
    assert_eq!(
        tool_calls(&runner),
        vec![
            argv(&["--version"]),
            argv(&["switch", "--list"]),
            argv(&["login", "--authkey", "tskey-auth-1"]),
            argv(&["status"]),
        ]
    );
}

#[tokio::test]
async fn one_account_is_switched_to_without_the_menu() {
    let runner = installed().respond(
        "switch --list",
        &format!("{HEADER}1  example.com  alice@example.com\n"),
    );
    let mut app = app(&runner, Settings::default(), vec![Key::Enter, Key::Esc]);

    let outcome = app.run().await.unwrap();

    assert_eq!(outcome, Outcome::Quit);
    assert_eq!(
        tool_calls(&runner),
        vec![
            argv(&["--version"]),
            argv(&["switch", "--list"]),
            argv(&["switch", "alice@example.com"]),
        ]
    );
    assert_eq!(app.keys().remaining(), 0);
}

#[tokio::test]
async fn several_accounts_go_straight_to_the_menu() {
    let runner = installed().respond(
        "switch --list",
        &format!("{HEADER}1 a alice@example.com *\n2 b bob@example.com\n"),
    );

    let outcome = app(&runner, Settings::default(), vec![Key::Enter, Key::Esc])
        .run()
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Quit);
    assert_eq!(
        tool_calls(&runner),
        vec![argv(&["--version"]), argv(&["switch", "--list"])]
    );
}

#[tokio::test]
async fn escape_at_the_account_prompt_returns_to_the_menu() {
    let mut server = mockito::Server::new_async().await;
    let login = server
        .mock("POST", "/api/logIn")
        .expect(0)
        .create_async()
        .await;

    let runner = installed().respond("switch --list", HEADER);
    let settings = Settings {
        login_url: format!("{}/api/logIn", server.url()),
        ..Settings::default()
    };

    let outcome = app(&runner, settings, vec![Key::Enter, Key::Esc, Key::Esc])
        .run()
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Quit);
    login.assert_async().await;
    assert_eq!(tool_calls(&runner).len(), 2);
}

#[tokio::test]
async fn rejected_credentials_prompt_again() {
    let mut server = mockito::Server::new_async().await;
    let rejected = server
        .mock("POST", "/api/logIn")
        .match_body(Matcher::PartialJson(serde_json::json!({"password": "bad"})))
        .with_status(401)
        .create_async()
        .await;
    let accepted = server
        .mock("POST", "/api/logIn")
        .match_body(Matcher::PartialJson(serde_json::json!({"password": "good"})))
        .with_status(200)
        .with_body(r#"{"key":"tskey-auth-2"}"#)
        .create_async()
        .await;

    let runner = installed().respond("switch --list", HEADER);
    let settings = Settings {
        login_url: format!("{}/api/logIn", server.url()),
        ..Settings::default()
    };
    let script = keys(&[
        &[Key::Enter],
        &ScriptedKeys::typed("a"),
        &[Key::Enter],
        &ScriptedKeys::typed("bad"),
        &[Key::Enter],
        &ScriptedKeys::typed("a"),
        &[Key::Enter],
        &ScriptedKeys::typed("good"),
        &[Key::Enter, Key::Enter, Key::Esc],
    ]);

    app(&runner, settings, script).run().await.unwrap();

    rejected.assert_async().await;
    accepted.assert_async().await;
    assert!(tool_calls(&runner).contains(&argv(&["login", "--authkey", "tskey-auth-2"])));
}

#[tokio::test]
async fn switch_account_picks_another_account() {
    let runner = installed().respond(
        "switch --list",
        &format!("{HEADER}1 a alice@example.com *\n2 b bob@example.com\n"),
    );
    let script = vec![
        Key::Enter,
        Key::Down,
        Key::Enter,
        Key::Down,
        Key::Enter,
        Key::Enter,
        Key::Esc,
    ];

    app(&runner, Settings::default(), script).run().await.unwrap();

    let calls = tool_calls(&runner);
    assert_eq!(
        &calls[2..],
        &[
            argv(&["switch", "--list"]),
            argv(&["switch", "bob@example.com"]),
            argv(&["status"]),
        ]
    );
}

#[tokio::test]
async fn switch_account_refuses_the_current_account() {
    let runner = installed().respond(
        "switch --list",
        &format!("{HEADER}1 a alice@example.com *\n2 b bob@example.com\n"),
    );
    let script = vec![Key::Enter, Key::Down, Key::Enter, Key::Enter, Key::Enter, Key::Esc];

    app(&runner, Settings::default(), script).run().await.unwrap();

    assert!(!tool_calls(&runner)
        .iter()
        .any(|args| args == &argv(&["switch", "alice@example.com"])));
}

#[tokio::test]
async fn failing_flows_are_reported_and_the_menu_survives() {
    let runner = installed()
        .respond(
            "switch --list",
            &format!("{HEADER}1 a alice@example.com *\n2 b bob@example.com\n"),
        )
        .fail("logout", "not logged in");
    // Sign Out fails, then Switch Account is opened and backed out of.
    let script = vec![
        Key::Enter,
        Key::Down,
        Key::Down,
        Key::Enter,
        Key::Enter,
        Key::Down,
        Key::Enter,
        Key::Esc,
        Key::Esc,
    ];

    let outcome = app(&runner, Settings::default(), script).run().await.unwrap();

    assert_eq!(outcome, Outcome::Quit);
    let calls = tool_calls(&runner);
    assert_eq!(
        &calls[2..],
        &[argv(&["logout"]), argv(&["switch", "--list"])]
    );
}

#[tokio::test]
async fn list_information_shows_ip_and_status() {
    let runner = installed()
        .respond(
            "switch --list",
            &format!("{HEADER}1 a alice@example.com *\n2 b bob@example.com\n"),
        )
        .respond("ip", "100.64.0.7\n")
        .respond("status", "100.64.0.7  host  alice@  linux  -");
    let script = vec![Key::Enter, Key::Down, Key::Down, Key::Down, Key::Enter];

    let mut app = app(&runner, Settings::default(), script);
    let err = app.run().await.unwrap_err();

    assert_eq!(err.to_string(), "key script exhausted");
    let calls = tool_calls(&runner);
    assert_eq!(&calls[2..], &[argv(&["ip"]), argv(&["status"])]);

    let buffer = app.drawer().canvas().backend().buffer().clone();
    let first_row: String = (0..buffer.area.width)
        .map(|x| buffer[(x, 0)].symbol().to_string())
        .collect();
    assert!(first_row.starts_with("My IP: 100.64.0.7"));
}

#[tokio::test]
async fn list_information_still_shows_status_when_ip_fails() {
    let runner = installed()
        .respond(
            "switch --list",
            &format!("{HEADER}1 a alice@example.com *\n2 b bob@example.com\n"),
        )
        .fail("ip", "no addresses")
        .respond("status", "100.64.0.7  host  alice@  linux  -");
    let script = vec![
        Key::Enter,
        Key::Down,
        Key::Down,
        Key::Down,
        Key::Enter,
        Key::Enter,
        Key::Esc,
    ];

    let mut app = app(&runner, Settings::default(), script);
    let outcome = app.run().await.unwrap();

    assert_eq!(outcome, Outcome::Quit);
    let calls = tool_calls(&runner);
    assert_eq!(&calls[2..], &[argv(&["ip"]), argv(&["status"])]);
}

#[tokio::test]
async fn missing_tool_is_installed_then_exits() {
    let script_body = "#!/bin/sh\necho install\n";
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/install.sh")
        .with_status(200)
        .with_body(script_body)
        .create_async()
        .await;

    let runner = RecordingRunner::new().without_program("tailscale");
    let settings = Settings {
        install_script_url: format!("{}/install.sh", server.url()),
        ..Settings::default()
    };

    let outcome = app(&runner, settings, vec![Key::Enter]).run().await.unwrap();

    assert_eq!(outcome, Outcome::Exit(0));
    let sh = runner
        .calls()
        .into_iter()
        .find(|call| call.program == "sh")
        .unwrap();
    assert_eq!(sh.stdin.as_deref(), Some(script_body.as_bytes()));
    assert_eq!(tool_calls(&runner), vec![argv(&["--version"])]);
}

#[tokio::test]
async fn failed_installation_exits_with_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/install.sh")
        .with_status(500)
        .create_async()
        .await;

    let runner = RecordingRunner::new().without_program("tailscale");
    let settings = Settings {
        install_script_url: format!("{}/install.sh", server.url()),
        ..Settings::default()
    };

    let outcome = app(&runner, settings, vec![]).run().await.unwrap();

    assert_eq!(outcome, Outcome::Exit(1));
    assert!(runner.args_for("sh").is_empty());
}
