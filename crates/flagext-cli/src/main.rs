use anyhow::Context;
use clap::Parser;
use flagext_cli::{CliArgs, Flagcat};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let app = Flagcat::from_args(&args).context("failed to load configuration")?;
    app.run(args)?;
    Ok(())
}
