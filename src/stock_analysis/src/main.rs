use clap::Parser;
use stock_analysis::{
    cli::{commands::Cli, run},
    logging::init_logging,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    // One pass at a time: a single-threaded runtime is all the CLI needs.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(cli))
}
