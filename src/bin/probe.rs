use std::{env, time::Duration};

use anyhow::Context;
use sounder::{DEFAULT_TIMEOUT, ServerEndpoint, SlpClient};

const DEFAULT_PORT: u16 = 25565;

struct ProbeConfig {
    host: String,
    port: u16,
    protocol: i32,
    timeout: Duration,
    skip_status: bool,
}

fn parse_args() -> anyhow::Result<ProbeConfig> {
    let mut host = None;
    let mut port = DEFAULT_PORT;
    let mut protocol = -1;
    let mut timeout = DEFAULT_TIMEOUT;
    let mut skip_status = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--port" => {
                let v = args.next().context("--port requires a value")?;
                port = v.parse()?;
            }
            "--protocol" => {
                let v = args.next().context("--protocol requires a value")?;
                protocol = v.parse()?;
            }
            "--timeout-ms" => {
                let v = args.next().context("--timeout-ms requires a value")?;
                timeout = Duration::from_millis(v.parse()?);
            }
            "--ping-only" => skip_status = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other if host.is_none() && !other.starts_with("--") => {
                host = Some(other.to_string());
            }
            other => return Err(anyhow::anyhow!("unknown arg: {other}")),
        }
    }

    Ok(ProbeConfig {
        host: host.context("usage: probe <host> [options], see --help")?,
        port,
        protocol,
        timeout,
        skip_status,
    })
}

fn print_help() {
    println!("probe <host> [options]:");
    println!("  --port <n>        (default {DEFAULT_PORT})");
    println!("  --protocol <n>    protocol version sent in the handshake (default -1)");
    println!("  --timeout-ms <n>  per-operation deadline (default 5000)");
    println!("  --ping-only       skip the status query");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = parse_args()?;
    let endpoint =
        ServerEndpoint::new(cfg.host, cfg.port)?.with_protocol_version(cfg.protocol)?;
    let client = SlpClient::new(endpoint).with_timeout(cfg.timeout);

    let rtt = client.ping().await?;
    println!(
        "{}:{} rtt: {rtt:.2}ms",
        client.endpoint().host(),
        client.endpoint().port()
    );

    if !cfg.skip_status {
        let json = client.status().await?;
        println!("{json}");
    }

    Ok(())
}
