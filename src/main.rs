// src/main.rs

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use jobwatch::commands;
use jobwatch::config::AppConfig;
use jobwatch::lifecycle;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    lifecycle::init_logging();

    let config = AppConfig::from_env();
    let app = lifecycle::build(config)?;

    let scheduler = app.scheduler.clone();
    tokio::spawn(scheduler.run());

    log::info!("jobwatch started; type !jobhelp for commands");

    // The chat host proper lives outside this process; stdin stands in for
    // it, feeding the same command surface.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(command) = commands::parse(&line) {
            let reply = commands::execute(command, &app.ctx).await;
            println!("{}", reply);
        }
    }

    Ok(())
}
