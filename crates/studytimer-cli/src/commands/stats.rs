use super::{CliResult, Workspace};

pub fn run() -> CliResult {
    let mut ws = Workspace::open()?;
    ws.catch_up()?;
    let timer = ws.timer();
    let stats = timer.ledger().stats(timer.now_ms());
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
