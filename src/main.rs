use clap::Parser;

use confseal::cli::Cli;
use confseal::pipeline;
use confseal::transform::CommandTransform;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let transform = CommandTransform::new(cli.transform_cmd);
    let priors: Vec<String> = cli.prior.into_iter().collect();

    pipeline::run(
        cli.mode,
        &cli.current,
        &priors,
        &cli.fields,
        &cli.out,
        &transform,
    )?;

    Ok(())
}
