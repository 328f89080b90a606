use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn pixabay_mcp(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("pixabay-mcp").unwrap();
    cmd.env_remove("PIXABAY_API_KEY")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", config_home);
    cmd
}

#[test]
fn tools_listing_works_without_api_key() {
    let home = tempdir().unwrap();

    pixabay_mcp(home.path())
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("search_images"))
        .stdout(predicate::str::contains("search_videos"))
        .stdout(predicate::str::contains("get_image_by_id"))
        .stdout(predicate::str::contains("get_video_by_id"));
}

#[test]
fn tools_json_listing_has_four_descriptors() {
    let home = tempdir().unwrap();

    let output = pixabay_mcp(home.path())
        .args(["tools", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listing["tools"].as_array().unwrap().len(), 4);
}

#[test]
fn serve_answers_over_stdio_and_exits_on_eof() {
    let home = tempdir().unwrap();
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"cli-test","version":"0"}}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"search_images","arguments":{"q":"cats"}}}"#,
        "\n",
    );

    let output = pixabay_mcp(home.path())
        .arg("serve")
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let responses: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);

    let call = responses.iter().find(|r| r["id"] == 2).unwrap();
    assert_eq!(call["result"]["isError"], true);
    assert!(call["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("PIXABAY_API_KEY"));

    // Diagnostics stay off stdout.
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("PIXABAY_API_KEY is not set"));
}

#[test]
fn tools_rejects_serve_only_flags() {
    let home = tempdir().unwrap();

    pixabay_mcp(home.path())
        .args(["tools", "--timeout-secs", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only apply to serve"));
}

#[test]
fn serve_accepts_timeout_after_subcommand() {
    let home = tempdir().unwrap();

    pixabay_mcp(home.path())
        .args(["serve", "--timeout-secs", "5"])
        .write_stdin("{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\":1"));
}
