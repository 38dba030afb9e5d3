use std::path::PathBuf;

use crate::{config::AnalysisConfig, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DefaultConfigArg {
    /// File to write the configuration to (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DefaultConfigArg) -> anyhow::Result<()> {
    util::write_json(&AnalysisConfig::default(), arg.output.as_deref())?;
    if let Some(path) = &arg.output {
        log::info!("Default configuration saved to {}", path.display());
    }
    Ok(())
}
