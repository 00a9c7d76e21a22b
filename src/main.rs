// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! fetchpad CLI - Single-Slot HTTP Request Maker
//!
//! Terminal front-end for the fetchpad library: builds requests from
//! arguments or stdin lines and polls the executor on a fixed tick.

use std::env;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;

use fetchpad::{
    CliConfig, ExecutorState, HttpClient, Method, RequestDescription, RequestExecutor,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fetchpad=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "send" => match parse_send_args(&args[2..]) {
            Ok(request) => send(request).await,
            Err(e) => {
                eprintln!("{:#}", e);
                eprintln!("Usage: fetchpad send <METHOD> <URL> [-H 'Key: Value']... [-d BODY]");
                ExitCode::from(1)
            }
        },
        "interactive" | "i" => interactive().await,
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("fetchpad {}", fetchpad::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"fetchpad - Single-Slot HTTP Request Maker

USAGE:
    fetchpad <COMMAND> [OPTIONS]

COMMANDS:
    send <METHOD> <URL>   Send one request and print the result
        -H 'Key: Value'   Add a header (repeatable, order kept)
        -d BODY           Request body
        --file PATH       Read the request from a JSON file instead
    interactive           Read requests from stdin, one per line
    help                  Show this help message
    version               Show version information

INTERACTIVE INPUT:
    METHOD URL [BODY]     Submit a request (supersedes a pending one)
    :header Key: Value    Add a header to every following request
    :headers              List headers
    :clear                Remove all headers
    :quit                 Exit

ENVIRONMENT:
    RUST_LOG                 Log filter (default fetchpad=info)
    FETCHPAD_TIMEOUT_SECS    Request timeout in seconds (default 30)
    FETCHPAD_PROXY           Proxy URL (falls back to HTTPS_PROXY)

EXAMPLES:
    fetchpad send GET https://example.com
    fetchpad send POST https://example.com/api -H 'content-type: application/json' -d '{{"a":1}}'
    fetchpad send --file request.json
"#
    );
}

fn build_executor(config: &CliConfig) -> anyhow::Result<RequestExecutor> {
    let client = HttpClient::with_config(config.client.clone())
        .context("Failed to create HTTP client")?;
    Ok(RequestExecutor::with_handle(
        client,
        Handle::current(),
        config.executor.clone(),
    ))
}

async fn send(request: RequestDescription) -> ExitCode {
    let config = CliConfig::default();
    let executor = match build_executor(&config) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(1);
        }
    };

    println!("{} {}", request.method(), request.url());
    executor.submit(request);

    let mut ticker = tokio::time::interval(config.poll_interval);
    loop {
        ticker.tick().await;
        match executor.poll() {
            ExecutorState::Pending => continue,
            ExecutorState::Completed(outcome) => {
                println!("{}", outcome);
                return if outcome.is_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(1)
                };
            }
            ExecutorState::Idle => return ExitCode::from(1),
        }
    }
}

async fn interactive() -> ExitCode {
    let config = CliConfig::default();
    let executor = match build_executor(&config) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(1);
        }
    };

    let mut headers: Vec<(String, String)> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.poll_interval);
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => match line {
                Ok(Some(line)) => match parse_input_line(&line) {
                    Ok(Input::Empty) => {}
                    Ok(Input::Quit) => break,
                    Ok(Input::AddHeader(name, value)) => headers.push((name, value)),
                    Ok(Input::ListHeaders) => {
                        for (name, value) in &headers {
                            println!("{}: {}", name, value);
                        }
                    }
                    Ok(Input::ClearHeaders) => headers.clear(),
                    Ok(Input::Request { method, url, body }) => {
                        match RequestDescription::build(method, url, headers.clone(), body) {
                            Ok(request) => {
                                let generation = executor.submit(request);
                                println!("[{}] sent", generation);
                            }
                            Err(e) => eprintln!("{}", e),
                        }
                    }
                    Err(e) => eprintln!("{:#}", e),
                },
                Ok(None) => input_open = false,
                Err(e) => {
                    eprintln!("Failed to read input: {}", e);
                    input_open = false;
                }
            },
            _ = ticker.tick() => {
                if let ExecutorState::Completed(outcome) = executor.poll() {
                    println!("[{}] {}", executor.generation(), outcome);
                }
                if !input_open && !executor.is_pending() {
                    break;
                }
            }
        }
    }

    ExitCode::SUCCESS
}

/// Parse the arguments following `send`
fn parse_send_args(args: &[String]) -> anyhow::Result<RequestDescription> {
    if args.first().map(String::as_str) == Some("--file") {
        let path = args.get(1).ok_or_else(|| anyhow!("--file needs a path"))?;
        return RequestDescription::from_json_file(path)
            .with_context(|| format!("Failed to load request from {}", path));
    }

    let (method, url) = match args {
        [method, url, ..] => (method.parse::<Method>()?, url.clone()),
        _ => bail!("Expected a method and a URL"),
    };

    let mut builder = RequestDescription::builder(method, url);
    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "-H" | "--header" => {
                let raw = rest.next().ok_or_else(|| anyhow!("{} needs a value", flag))?;
                let (name, value) = parse_header(raw)?;
                builder = builder.header(name, value);
            }
            "-d" | "--data" => {
                let body = rest.next().ok_or_else(|| anyhow!("{} needs a value", flag))?;
                builder = builder.body(body.as_str());
            }
            other => bail!("Unexpected argument: {}", other),
        }
    }

    Ok(builder.build()?)
}

fn parse_header(raw: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("Header must look like 'Key: Value', got '{}'", raw))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

/// One line of interactive input
#[derive(Debug, PartialEq)]
enum Input {
    Empty,
    Quit,
    AddHeader(String, String),
    ListHeaders,
    ClearHeaders,
    Request {
        method: Method,
        url: String,
        body: String,
    },
}

fn parse_input_line(line: &str) -> anyhow::Result<Input> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }

    if let Some(command) = line.strip_prefix(':') {
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map(|(n, a)| (n, a.trim()))
            .unwrap_or((command, ""));
        return match name {
            "q" | "quit" => Ok(Input::Quit),
            "header" => {
                let (key, value) = parse_header(arg)?;
                Ok(Input::AddHeader(key, value))
            }
            "headers" => Ok(Input::ListHeaders),
            "clear" => Ok(Input::ClearHeaders),
            other => bail!("Unknown command :{}", other),
        };
    }

    let mut parts = line.splitn(3, char::is_whitespace);
    let method = parts.next().unwrap_or_default().parse::<Method>()?;
    let url = parts.next().unwrap_or_default().to_string();
    let body = parts.next().unwrap_or_default().trim_start().to_string();

    Ok(Input::Request { method, url, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_send_args() {
        let request = parse_send_args(&args(&[
            "post",
            "https://example.test/api",
            "-H",
            "accept: text/plain",
            "-H",
            "accept: application/json",
            "-d",
            "{}",
        ]))
        .unwrap();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.url(), "https://example.test/api");
        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.headers()[1].1, "application/json");
        assert_eq!(request.body(), "{}");
    }

    #[test]
    fn test_parse_send_args_errors() {
        assert!(parse_send_args(&args(&["GET"])).is_err());
        assert!(parse_send_args(&args(&["FETCH", "https://example.test"])).is_err());
        assert!(parse_send_args(&args(&["GET", "https://example.test", "-H"])).is_err());
        assert!(parse_send_args(&args(&["GET", "https://example.test", "-H", "nocolon"])).is_err());
        assert!(parse_send_args(&args(&["GET", "https://example.test", "--bogus"])).is_err());
        assert!(parse_send_args(&args(&["--file"])).is_err());
    }

    #[test]
    fn test_parse_input_request() {
        assert_eq!(
            parse_input_line("put https://example.test/1  {\"a\": 1}").unwrap(),
            Input::Request {
                method: Method::Put,
                url: "https://example.test/1".to_string(),
                body: "{\"a\": 1}".to_string(),
            }
        );
        assert_eq!(
            parse_input_line("GET https://example.test").unwrap(),
            Input::Request {
                method: Method::Get,
                url: "https://example.test".to_string(),
                body: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_input_commands() {
        assert_eq!(parse_input_line("   ").unwrap(), Input::Empty);
        assert_eq!(parse_input_line(":q").unwrap(), Input::Quit);
        assert_eq!(parse_input_line(":headers").unwrap(), Input::ListHeaders);
        assert_eq!(parse_input_line(":clear").unwrap(), Input::ClearHeaders);
        assert_eq!(
            parse_input_line(":header X-Trace: abc:def").unwrap(),
            Input::AddHeader("X-Trace".to_string(), "abc:def".to_string())
        );
        assert!(parse_input_line(":nope").is_err());
    }

    #[test]
    fn test_method_only_yields_empty_url() {
        // the empty URL is rejected later, by RequestDescription::build
        let input = parse_input_line("DELETE").unwrap();
        assert!(matches!(input, Input::Request { ref url, .. } if url.is_empty()));
    }
}
