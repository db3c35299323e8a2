use anyhow::Context;
use clap::{Parser, ValueEnum};
use quakemap::{
    EarthquakeMapRenderer, HtmlSurface, LayerControlPolicy, MapVariant, RendererConfig,
    ReqwestFeedClient, TimeZoneMode,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    /// Street tiles, earthquake markers and the depth legend
    Basic,
    /// Adds topography tiles, tectonic plates and a layer switcher
    Layers,
}

impl From<VariantArg> for MapVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Basic => MapVariant::Basic,
            VariantArg::Layers => MapVariant::LayerControl,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Always show the layer switcher, without the plates if they fail
    Degrade,
    /// Show the layer switcher only if the tectonic feed loads (default)
    RequireTectonic,
}

impl From<PolicyArg> for LayerControlPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Degrade => LayerControlPolicy::Degrade,
            PolicyArg::RequireTectonic => LayerControlPolicy::RequireTectonic,
        }
    }
}

/// Render this week's earthquakes to a self-contained HTML map
#[derive(Debug, Parser)]
#[command(name = "quakemap-app", version, about)]
struct Cli {
    /// Map variant
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Output HTML file
    #[arg(short, long, value_name = "FILE", default_value = "index.html")]
    output: PathBuf,

    /// JSON renderer configuration; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Container width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Container height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// Per-request timeout for the feeds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Show popup dates in the local time zone instead of UTC
    #[arg(long)]
    local_time: bool,

    /// Layer switcher behavior when the tectonic feed fails [default: require-tectonic]
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
}

impl Cli {
    fn renderer_config(&self) -> anyhow::Result<RendererConfig> {
        let mut config = match &self.config {
            Some(path) => RendererConfig::from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => RendererConfig::default(),
        };

        if let Some(variant) = self.variant {
            config.variant = variant.into();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.timeout_secs.is_some() {
            config.feeds.timeout_secs = self.timeout_secs;
        }
        if self.local_time {
            config.time_zone = TimeZoneMode::Local;
        }
        if let Some(policy) = self.policy {
            config.control_policy = policy.into();
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quakemap::init_logging();

    let cli = Cli::parse();
    let config = cli.renderer_config()?;

    let client = ReqwestFeedClient::from_timeout_secs(config.feeds.timeout_secs)
        .context("Failed to build HTTP client")?;
    let file = File::create(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let surface = HtmlSurface::new(BufWriter::new(file));

    let mut renderer = EarthquakeMapRenderer::new(config, client, surface)?;
    let report = renderer.render().await.context("Failed to render map")?;

    log::debug!("report: {:?}", report);
    println!("{}: {}", cli.output.display(), report);
    Ok(())
}
