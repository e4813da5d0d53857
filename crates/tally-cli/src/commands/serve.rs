//! Server command implementation

use std::path::Path;

use anyhow::Result;

use super::open_db;

pub async fn cmd_serve(db_path: &Path, host: &str, port: u16, no_encrypt: bool) -> Result<()> {
    println!("🚀 Starting Tally MCP server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}/mcp", host, port);
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;
    tally_server::start_mcp_server(db, host, port).await?;

    Ok(())
}
