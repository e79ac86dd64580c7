//! `run` subcommand: wire the adapters, survey the sites, stream the rows out.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use futures::StreamExt;
use washscout_cascade::{Cascade, RunSettings, SiteRunner};
use washscout_classify::{AzureVisionClassifier, GeminiKeywordClassifier, RateGate};
use washscout_core::AppConfig;
use washscout_maps::{AssetCache, GoogleMapsClient};

use crate::input::{read_sites, RowRange};
use crate::names::load_registry;
use crate::output::ReportWriter;

pub(crate) fn build_runner(
    config: &AppConfig,
    registry: Arc<washscout_names::ReferenceRegistry>,
) -> anyhow::Result<SiteRunner> {
    let retry = config.retry_policy();

    let maps = Arc::new(
        GoogleMapsClient::new(
            &config.google_maps_api_key,
            config.request_timeout_secs,
            &config.user_agent,
        )
        .context("failed to build Google Maps client")?
        .with_retry(retry),
    );

    let keyword = GeminiKeywordClassifier::new(
        &config.gemini_api_key,
        &config.gemini_model,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build Gemini client")?
    .with_retry(retry);

    let vision = AzureVisionClassifier::new(
        &config.azure_openai_endpoint,
        &config.azure_openai_api_key,
        &config.azure_openai_deployment,
        &config.azure_openai_api_version,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build Azure OpenAI client")?
    .with_retry(retry);

    let assets = AssetCache::new(config.cache_dir.clone(), maps.clone(), retry);
    let cascade = Cascade::new(
        registry,
        Arc::new(keyword),
        Arc::new(vision),
        Arc::new(assets),
        Arc::new(RateGate::new(config.llm_cooldown())),
    );

    Ok(SiteRunner::new(maps, cascade, RunSettings::from_config(config)))
}

pub(crate) async fn run_survey(
    config: &AppConfig,
    input: &Path,
    range: RowRange,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let sites = read_sites(input, range)?;
    if sites.is_empty() {
        println!("no sites in the selected range of {}", input.display());
        return Ok(());
    }

    let registry = load_registry(config.reference_csv.as_deref()).await?;
    tracing::info!(references = registry.len(), sites = sites.len(), "starting survey");

    let runner = build_runner(config, registry)?;
    let mut writer = ReportWriter::open(output_dir, runner.settings().summary_slots)?;

    let mut reports = std::pin::pin!(runner.reports(&sites));
    let mut written = 0usize;
    let mut placeholders = 0usize;
    let mut competitors = 0usize;
    while let Some(report) = reports.next().await {
        writer.write(&report)?;
        written += 1;
        match report.summary.competitor_count {
            Some(count) => competitors += count,
            None => placeholders += 1,
        }
    }

    println!(
        "surveyed {written} sites ({placeholders} skipped), {competitors} competitors found; output in {}",
        output_dir.display()
    );
    Ok(())
}
