//! Interactive session: one client, many calls, last response on demand.

use anyhow::Result;
use crypto_client_core::catalog::{self, Category};
use crypto_client_core::{ApiClient, ApiError, HttpMethod, NotificationSink, Transport};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::output::render_catalog;

const HELP: &str = "\
commands:
  url <URL>                  set the API base URL
  catalog [category]         list endpoints (prices, config, stats, orders)
  get <endpoint>             GET a catalog endpoint by name or path
  post <endpoint> <value>    POST {\"value\": <value>} to a config endpoint
  call <METHOD> <path> [v]   raw call; v is sent as {\"value\": v}
  last                       show the last response
  status                     show base URL and in-flight calls
  help                       show this text
  quit                       leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Url(String),
    Catalog(Option<Category>),
    Get(String),
    Post { target: String, value: String },
    Call { method: HttpMethod, path: String, value: Option<String> },
    Last,
    Status,
    Help,
    Quit,
}

pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(ShellCommand::Empty);
    };
    let rest: Vec<&str> = words.collect();

    match head.to_ascii_lowercase().as_str() {
        "url" => match rest.as_slice() {
            [url] => Ok(ShellCommand::Url(url.to_string())),
            _ => Err("usage: url <URL>".to_string()),
        },
        "catalog" | "ls" => match rest.as_slice() {
            [] => Ok(ShellCommand::Catalog(None)),
            [category] => category.parse().map(|c| ShellCommand::Catalog(Some(c))),
            _ => Err("usage: catalog [category]".to_string()),
        },
        "get" if !rest.is_empty() => Ok(ShellCommand::Get(rest.join(" "))),
        "get" => Err("usage: get <endpoint>".to_string()),
        "post" => match rest.split_last() {
            Some((value, target)) if !target.is_empty() => Ok(ShellCommand::Post {
                target: target.join(" "),
                value: value.to_string(),
            }),
            _ => Err("usage: post <endpoint> <value>".to_string()),
        },
        "call" => match rest.as_slice() {
            [method, path] | [method, path, _] => {
                let method = method.parse::<HttpMethod>().map_err(|e| e.to_string())?;
                Ok(ShellCommand::Call {
                    method,
                    path: normalize_path(path),
                    value: rest.get(2).map(|v| v.to_string()),
                })
            }
            _ => Err("usage: call <METHOD> <path> [value]".to_string()),
        },
        "last" => Ok(ShellCommand::Last),
        "status" => Ok(ShellCommand::Status),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command {other:?}; type `help`")),
    }
}

/// `/` stands for the API root, whose path suffix is empty.
fn normalize_path(path: &str) -> String {
    if path == "/" {
        String::new()
    } else {
        path.to_string()
    }
}

/// Map a user-typed target to a path suffix: a catalog name or path, or
/// any literal path starting with `/`.
pub fn resolve_target(target: &str) -> Option<String> {
    if let Some(endpoint) = catalog::find(target) {
        return Some(endpoint.path.to_string());
    }
    target.starts_with('/').then(|| normalize_path(target))
}

enum Flow {
    Continue,
    Quit,
}

async fn execute<T: Transport, N: NotificationSink>(
    client: &ApiClient<T, N>,
    command: ShellCommand,
) -> Result<Flow> {
    match command {
        ShellCommand::Empty => {}
        ShellCommand::Url(url) => {
            if let Err(err) = client.configure_base_url(&url).await {
                debug!(%err, input = %url, "base URL rejected");
            }
        }
        ShellCommand::Catalog(category) => print!("{}", render_catalog(category)),
        ShellCommand::Get(target) => match resolve_target(&target) {
            Some(path) => report(client.dispatch(HttpMethod::Get, &path, None).await)?,
            None => println!("no endpoint matches {target:?}"),
        },
        ShellCommand::Post { target, value } => {
            match catalog::find(&target).and_then(|e| e.config_key()) {
                Some(key) => report(client.update_config(key, &value).await)?,
                None if target.starts_with('/') => {
                    let body = json!({ "value": value });
                    report(client.dispatch(HttpMethod::Post, &target, Some(&body)).await)?
                }
                None => println!("{target:?} is not a config endpoint"),
            }
        }
        ShellCommand::Call { method, path, value } => {
            let body = value.map(|v| json!({ "value": v }));
            report(client.dispatch(method, &path, body.as_ref()).await)?
        }
        ShellCommand::Last => match client.last_response().await {
            Some(response) => println!("{response}"),
            None => println!("no response yet"),
        },
        ShellCommand::Status => {
            let base = client.base_url().await;
            println!(
                "base URL: {}",
                base.as_ref().map(|b| b.as_str()).unwrap_or("(not set)")
            );
            println!("in flight: {}", client.session().in_flight());
            if let Some(last) = client.last_response().await {
                println!("last status: {} {}", last.status, last.status_text);
            }
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Print a dispatch outcome. Refusals were already announced by the sink;
/// anything else is a genuine failure.
fn report(outcome: Result<crypto_client_core::ApiResponse, ApiError>) -> Result<()> {
    match outcome {
        Ok(response) => println!("{response}"),
        Err(ApiError::Configuration | ApiError::Validation(_)) => {}
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

pub async fn run<T: Transport, N: NotificationSink>(client: &ApiClient<T, N>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("{HELP}");
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_line(&line) {
            Ok(command) => {
                debug!(?command, "shell command");
                if let Flow::Quit = execute(client, command).await? {
                    break;
                }
            }
            Err(message) => println!("{message}"),
        }
    }
    Ok(())
}
