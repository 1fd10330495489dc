#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]

use std::{env, net::SocketAddr};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// Credentials matching the MariaDB container used by the ignored tests
pub const MARIADB_HOST: &str = "127.0.0.1";
pub const MARIADB_PORT: u16 = 3306;
pub const MARIADB_USER: &str = "dbprobe";
pub const MARIADB_PASSWORD: &str = "secret";
pub const MARIADB_DATABASE: &str = "testdb";

pub fn skip_if_no_mariadb() -> bool {
    env::var("SKIP_MARIADB_TESTS").is_ok()
}

/// Secret payload for the MariaDB container, with the given `ssl` shape.
pub fn mariadb_secret(ssl: serde_json::Value) -> String {
    serde_json::json!({
        "engine": "mysql",
        "host": MARIADB_HOST,
        "username": MARIADB_USER,
        "password": MARIADB_PASSWORD,
        "port": MARIADB_PORT,
        "dbname": MARIADB_DATABASE,
        "ssl": ssl,
    })
    .to_string()
}

/// Spawn a minimal Secrets Manager stub on a random local port.
///
/// Answers `DescribeSecret` with canned metadata and `GetSecretValue` with the
/// given payload; `None` makes every call fail with a 400, mimicking a missing
/// secret.
pub async fn spawn_secrets_stub(secret_string: Option<String>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let secret_string = secret_string.clone();

            tokio::spawn(async move {
                let mut buf = Vec::new();
                loop {
                    let mut chunk = [0_u8; 1024];
                    let Ok(n) = stream.read(&mut chunk).await else {
                        return;
                    };
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if request_complete(&buf) {
                        break;
                    }
                }

                let request = String::from_utf8_lossy(&buf);
                let response = match secret_string {
                    None => error_response(),
                    Some(payload) => {
                        if request.contains("secretsmanager.DescribeSecret") {
                            json_response(
                                &serde_json::json!({
                                    "ARN": "arn:aws:secretsmanager:us-east-1:123456789012:secret:app/mysql-AbCdEf",
                                    "Name": "app/mysql",
                                    "VersionIdsToStages": {"v1": ["AWSCURRENT"]},
                                })
                                .to_string(),
                            )
                        } else {
                            json_response(
                                &serde_json::json!({ "SecretString": payload }).to_string(),
                            )
                        }
                    }
                };

                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    addr
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(pos) = buf.windows(4).position(|window| window == b"\r\n\r\n") else {
        return false;
    };

    let headers = String::from_utf8_lossy(&buf[..pos]);
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    buf.len() >= pos + 4 + content_length
}

fn json_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/x-amz-json-1.1\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn error_response() -> String {
    let body = r#"{"__type":"ResourceNotFoundException","Message":"Secrets Manager can't find the specified secret."}"#;
    format!(
        "HTTP/1.1 400 Bad Request\r\nContent-Type: application/x-amz-json-1.1\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}
