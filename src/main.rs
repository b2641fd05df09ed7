//! Expiry MCP Server - Main Entry Point
//!
//! This is the main entry point for the expiry MCP server application.
//! The actual implementation is in the `expiry_mcp` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use expiry_mcp::ExpiryServerHandler;
use mcp_attr::server::serve_stdio;
use tracing::Level;

/// Expiry MCP Server - track shelf life and expiry dates via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the storage file
    file: String,

    /// Log verbosity (error, warn, info, debug, trace); logs go to stderr
    #[arg(long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();

    // stdout carries the MCP protocol, so logs must stay on stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(args.log_level)
        .init();

    let handler = ExpiryServerHandler::new(&args.file)?;
    tracing::info!(file = %args.file, "serving expiry tracker over stdio");
    serve_stdio(handler).await?;
    Ok(())
}
