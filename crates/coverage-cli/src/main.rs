//! AP-CPE Coverage CLI
//!
//! Evaluates the link budget for every CPE of one AP sector and draws the
//! vertical coverage scene.
//!
//! Usage:
//!   ap-coverage --config deployment.json \
//!               --environment Suburban --tdd-dl 80 \
//!               --output coverage_report.json \
//!               --scene coverage.svg

use anyhow::{Context, Result};
use clap::Parser;
use coverage_scene::{write_svg, Scene};
use link_budget::{loader, CoverageConfig, CoverageReport, Environment, TddSplit, CPE_HEIGHT_M};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "ap-coverage",
    about = "Link budget and vertical coverage for one AP serving multiple CPEs"
)]
struct Args {
    /// Deployment parameters JSON file (defaults are used if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Propagation environment: Rural, Suburban or Urban
    #[arg(short, long)]
    environment: Option<Environment>,

    /// Channel bandwidth in MHz (20, 40, 80, 160)
    #[arg(short, long)]
    bandwidth: Option<u32>,

    /// Fade margin in dB
    #[arg(long)]
    fade_margin: Option<f64>,

    /// Downlink airtime share in percent (50-90, steps of 5)
    #[arg(long)]
    tdd_dl: Option<u8>,

    /// Output JSON report
    #[arg(short, long, default_value = "coverage_report.json")]
    output: PathBuf,

    /// Also draw the coverage scene as SVG
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Also write the scene model as JSON
    #[arg(long)]
    scene_json: Option<PathBuf>,

    /// Seed for the decorative tree layout
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Flag values take precedence over the file
    fn apply_overrides(&self, config: &mut CoverageConfig) -> Result<()> {
        if let Some(env) = self.environment {
            config.link.environment = env;
        }
        if let Some(bw) = self.bandwidth {
            config.link.bandwidth_mhz = bw;
        }
        if let Some(margin) = self.fade_margin {
            config.link.fade_margin_db = margin;
        }
        if let Some(dl) = self.tdd_dl {
            config.link.tdd = TddSplit::new(dl)?;
        }
        config.validate()?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{}", "=".repeat(60));
    info!("AP-CPE Link Budget & Vertical Coverage");
    info!("{}", "=".repeat(60));

    let mut config = loader::load_or_default(args.config.as_deref())
        .context("failed to load deployment parameters")?;
    args.apply_overrides(&mut config)?;
    debug!("{:?}", config);

    let report = CoverageReport::generate(&config)?;

    info!("\nWriting report to {:?}", args.output);
    let file = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)?;

    if args.scene.is_some() || args.scene_json.is_some() {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scene = Scene::build(&config, &report.records, &mut rng);

        if let Some(path) = &args.scene {
            write_svg(&scene, path)?;
        }
        if let Some(path) = &args.scene_json {
            info!("Writing scene model to {:?}", path);
            scene.write_json(path)?;
        }

        let footprint = scene.beam.footprint_at(CPE_HEIGHT_M);
        match (footprint.near_m, footprint.far_m) {
            (Some(near), Some(far)) => {
                info!("Beam covers {} m height from {:.0} m to {:.0} m", CPE_HEIGHT_M, near, far)
            }
            (Some(near), None) => info!("Beam covers {} m height beyond {:.0} m", CPE_HEIGHT_M, near),
            _ => info!("Beam never reaches {} m height", CPE_HEIGHT_M),
        }
    }

    info!("\n{}", "=".repeat(60));
    info!("SUMMARY");
    info!("{}", "=".repeat(60));
    info!(
        "{} | {} MHz | fade {:.0} dB | TDD {}/{}",
        report.metadata.environment,
        report.metadata.bandwidth_mhz,
        report.metadata.fade_margin_db,
        report.metadata.tdd_dl_percent,
        report.metadata.tdd_ul_percent
    );
    info!("  CPE | dist (m) | RSSI DL | MCS DL/UL | DL (Mbps) | UL (Mbps)");
    for r in &report.records {
        info!(
            "  {:>3} | {:>8.1} | {:>7.1} | {:>4}/{:<4} | {:>9.1} | {:>9.1}",
            r.index,
            r.distance_3d_m,
            r.downlink.rssi_dbm,
            r.downlink.mcs,
            r.uplink.mcs,
            r.downlink.throughput_mbps,
            r.uplink.throughput_mbps
        );
    }
    info!(
        "Total practical throughput: {:.1} Mbps DL, {:.1} Mbps UL",
        report.metadata.total_dl_throughput_mbps, report.metadata.total_ul_throughput_mbps
    );
    if let Some(weakest) = report.weakest_downlink() {
        info!("Weakest downlink: CPE {} at {:.1} dB SNR", weakest.index, weakest.downlink.snr_db);
    }

    Ok(())
}
