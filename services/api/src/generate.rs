use crate::infra::{build_mapper, load_schema, InMemoryCaseStore};
use clap::Args;
use oby_mapper::config::AppConfig;
use oby_mapper::error::AppError;
use oby_mapper::mapping::MappingResult;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// JSON seed file holding cases, clients, and family trees
    #[arg(long)]
    pub(crate) seed: PathBuf,
    /// Case to map
    #[arg(long)]
    pub(crate) case_id: String,
    /// Emit single-line JSON instead of pretty output
    #[arg(long)]
    pub(crate) compact: bool,
}

pub(crate) async fn run_generate(args: GenerateArgs) -> Result<ExitCode, AppError> {
    let config = AppConfig::load()?;
    let store = InMemoryCaseStore::load(&args.seed)?;
    let mapper = build_mapper(store, &config.mapping)?;

    let result = mapper.generate(&args.case_id).await;
    println!(
        "{}",
        render(&result, args.compact).map_err(AppError::Output)?
    );

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub(crate) fn print_schema() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let schema = load_schema(&config.mapping)?;
    let rendered = serde_json::to_string_pretty(schema.document()).map_err(AppError::Output)?;
    println!("{rendered}");
    Ok(())
}

fn render(result: &MappingResult, compact: bool) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(result)
    } else {
        serde_json::to_string_pretty(result)
    }
}
