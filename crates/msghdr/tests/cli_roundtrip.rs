#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output, Stdio};

use msghdr::{Header, MessageType};

fn msghdr(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_msghdr"))
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .expect("msghdr should run")
}

fn stdout_line(output: &Output) -> String {
    String::from_utf8(output.stdout.clone())
        .expect("stdout should be utf-8")
        .trim()
        .to_string()
}

#[test]
fn encode_output_decodes_in_library() {
    let output = msghdr(&[
        "encode", "--type", "test", "--data", "this is a test", "--flag", "query", "--id", "5",
    ]);
    assert!(output.status.success());

    let buf = hex::decode(stdout_line(&output)).expect("encode should print hex");
    let header = Header::from_bytes(&buf).expect("header should decode");
    assert_eq!(header.message_type(), Some(MessageType::Test));
    assert_eq!(header.id, 5);
    assert!(header.is_query());
    assert_eq!(header.body_string(), "this is a test");
}

#[test]
fn decode_prints_json_fields() {
    let header = Header::new(MessageType::NetSend, "hi").with_addr(&msghdr::addr::NetAddr::new(
        std::net::Ipv4Addr::new(127, 0, 0, 1),
        9000,
    ));
    let hex_arg = hex::encode(header.marshal());

    let output = msghdr(&["--format", "json", "decode", "--hex", &hex_arg]);
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_str(&stdout_line(&output)).expect("decode should print json");
    assert_eq!(json["type_code"], 6);
    assert_eq!(json["type_name"], "NetSend");
    assert_eq!(json["id"], header.id);
    assert_eq!(json["body"], "hi");
    assert_eq!(json["addr"], "127.0.0.1:9000");
}

#[test]
fn decode_reads_hex_from_stdin() {
    let encoded = msghdr(&["encode", "--type", "get-port", "--uint", "42"]);
    assert!(encoded.status.success());

    let mut child = Command::new(env!("CARGO_BIN_EXE_msghdr"))
        .args(["--format", "json", "decode", "--body", "uint"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("decode should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(&encoded.stdout)
        .expect("stdin should accept input");
    let output = child.wait_with_output().expect("decode should finish");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout_line(&output)).unwrap();
    assert_eq!(json["type_name"], "GetPort");
    assert_eq!(json["body"], "42");
}

#[test]
fn malformed_input_exits_data_invalid() {
    let output = msghdr(&["decode", "--hex", "22"]);
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("decode failed"));
}

#[test]
fn types_lists_every_code() {
    let output = msghdr(&["--format", "json", "types"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout_line(&output)).unwrap();
    let rows = json.as_array().expect("types should be an array");
    assert_eq!(rows.len(), 14);
    assert_eq!(rows[13]["name"], "RandomKey");
    assert_eq!(rows[6]["carries_addr"], true);
}
