use clap::Parser;
use footingplan::cli::{run, Cli};
use footingplan::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;
    run(cli).await
}
