use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("licprobe version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
