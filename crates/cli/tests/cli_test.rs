//! End-to-end tests driving the plugin binary over stdin/stdout

use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::{
    DescriptorProto, FileDescriptorProto, FileOptions, MethodDescriptorProto,
    ServiceDescriptorProto,
};
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn plugin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_protoc-gen-rest"))
}

fn run_with_stdin(mut command: Command, input: &[u8]) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(input).unwrap();
    child.wait_with_output().unwrap()
}

fn greeter_request(parameter: Option<&str>) -> CodeGeneratorRequest {
    let greeter = FileDescriptorProto {
        name: Some("greeter/greeter.proto".to_string()),
        package: Some("helloworld".to_string()),
        message_type: vec![
            DescriptorProto {
                name: Some("HelloRequest".to_string()),
                ..Default::default()
            },
            DescriptorProto {
                name: Some("HelloReply".to_string()),
                ..Default::default()
            },
        ],
        service: vec![ServiceDescriptorProto {
            name: Some("Greeter".to_string()),
            method: vec![MethodDescriptorProto {
                name: Some("SayHello".to_string()),
                input_type: Some(".helloworld.HelloRequest".to_string()),
                output_type: Some(".helloworld.HelloReply".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }],
        options: Some(FileOptions {
            go_package: Some("github.com/acme/api/greeter;greeter".to_string()),
            ..Default::default()
        }),
        syntax: Some("proto3".to_string()),
        ..Default::default()
    };

    CodeGeneratorRequest {
        file_to_generate: vec!["greeter/greeter.proto".to_string()],
        parameter: parameter.map(str::to_string),
        proto_file: vec![greeter],
        ..Default::default()
    }
}

fn decode(output: &Output) -> CodeGeneratorResponse {
    CodeGeneratorResponse::decode(output.stdout.as_slice()).unwrap()
}

#[test]
fn test_generates_over_stdio() {
    let output = run_with_stdin(plugin(), &greeter_request(None).encode_to_vec());
    assert!(output.status.success());

    let response = decode(&output);
    assert_eq!(response.error, None);
    assert_eq!(response.file.len(), 1);

    let file = &response.file[0];
    assert_eq!(
        file.name.as_deref(),
        Some("github.com/acme/api/greeter/greeter.rest.pb.go")
    );
    let content = file.content.as_deref().unwrap();
    assert!(content.contains("func RegisterGreeterServerHandlerClient("));
    assert!(content.contains("return h.srv.SayHello(ctx, in)"));
}

#[test]
fn test_source_relative_paths() {
    let request = greeter_request(Some("paths=source_relative"));
    let output = run_with_stdin(plugin(), &request.encode_to_vec());

    let response = decode(&output);
    assert_eq!(response.file[0].name.as_deref(), Some("greeter/greeter.rest.pb.go"));
}

#[test]
fn test_empty_request_reports_error() {
    let output = run_with_stdin(plugin(), &CodeGeneratorRequest::default().encode_to_vec());
    assert!(output.status.success());

    let response = decode(&output);
    assert_eq!(response.error.as_deref(), Some("no files to generate"));
    assert!(response.file.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no files to generate"));
}

#[test]
fn test_unknown_parameter_is_logged_and_ignored() {
    let request = greeter_request(Some("plugins=grpc,grpc_api_configuration=api.yaml"));
    let output = run_with_stdin(plugin(), &request.encode_to_vec());
    assert!(output.status.success());

    let response = decode(&output);
    assert_eq!(response.error, None);
    assert_eq!(response.file.len(), 1);
    assert!(String::from_utf8_lossy(&output.stderr).contains("grpc_api_configuration"));
}

#[test]
fn test_import_path_moves_output() {
    let mut request = greeter_request(Some("import_path=github.com/acme/legacy/hello"));
    request.proto_file[0].options = None;
    let output = run_with_stdin(plugin(), &request.encode_to_vec());

    let response = decode(&output);
    assert_eq!(response.error, None);
    assert_eq!(
        response.file[0].name.as_deref(),
        Some("github.com/acme/legacy/hello/greeter.rest.pb.go")
    );
    assert!(response.file[0]
        .content
        .as_deref()
        .unwrap()
        .contains("package hello\n"));
}

#[test]
fn test_bad_paths_mode_reports_error() {
    let request = greeter_request(Some("paths=flat"));
    let output = run_with_stdin(plugin(), &request.encode_to_vec());

    let response = decode(&output);
    assert!(response.error.unwrap().contains("unknown paths mode"));
    assert!(response.file.is_empty());
}

#[test]
fn test_malformed_input_reports_error() {
    let output = run_with_stdin(plugin(), &[0xff, 0xff, 0xff]);

    let response = decode(&output);
    assert!(response.error.is_some());
    assert!(response.file.is_empty());
}

#[test]
fn test_request_file_and_ir_dump() {
    let dir = tempfile::tempdir().unwrap();
    let request_path = dir.path().join("request.bin");
    let ir_path = dir.path().join("ir.json");
    std::fs::write(&request_path, greeter_request(None).encode_to_vec()).unwrap();

    let mut command = plugin();
    command
        .arg("--request")
        .arg(&request_path)
        .arg("--dump-ir")
        .arg(&ir_path);
    let output = run_with_stdin(command, &[]);
    assert!(output.status.success());
    assert_eq!(decode(&output).file.len(), 1);

    let ir: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&ir_path).unwrap()).unwrap();
    assert_eq!(ir[0]["name"], "greeter/greeter.proto");
    assert_eq!(ir[0]["go_package"]["name"], "greeter");
    assert_eq!(ir[0]["services"][0]["methods"][0]["name"], "SayHello");
}

#[test]
fn test_version_flag() {
    let output = plugin().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("protoc-gen-rest"));
}
