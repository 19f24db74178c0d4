//! Command-line demo host: renders one cycle of the stream processing comparison on the terminal.

use anyhow::Context;
use clap::Parser;
use std::{io, time::Duration};
use stream_fusion::{
    present_timings, render_cycle, ComparisonCfg, DataSize, DemoHost, HostInput, Sleep, StageTimer,
    TerminalHost,
};

#[derive(Debug, Parser)]
#[clap(about = "Compares standard and fused stream processing times")]
struct CliArgs {
    /// Number of sample values, between 100 and 1000.
    #[clap(long, default_value_t = DataSize::DEFAULT)]
    size: usize,

    /// Seed for the sample generator; samples differ on every run when omitted.
    #[clap(long)]
    seed: Option<u64>,

    /// Simulated per-element cost of standard processing, in milliseconds.
    #[clap(long, default_value_t = 10)]
    delay_ms: u64,

    /// Number of trials to summarize after the comparison, ahead of the closing note; 1 disables the summary.
    #[clap(long, default_value_t = 1)]
    trials: usize,

    /// Print latency statistics collected from the stages' tracing spans.
    #[clap(long, action)]
    stage_timings: bool,

    /// Render the page without running the comparison.
    #[clap(long, action)]
    no_run: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CliArgs::parse();
    log::debug!("{:?}", args);

    let data_size = DataSize::new(args.size)?;
    let cfg = ComparisonCfg::default()
        .with_per_element_delay(Duration::from_millis(args.delay_ms))
        .with_seed(args.seed)
        .with_trials(args.trials);
    let input = HostInput {
        data_size,
        run: !args.no_run,
    };

    let mut host = TerminalHost::new(io::stdout().lock());

    let timer = StageTimer::new(&cfg)?;
    let (comparison, stage_timings) =
        timer.measure(|| render_cycle(&mut host, input, &cfg, &Sleep));
    let comparison = comparison.context("rendering the demo page")?;
    log::debug!("comparison ran: {}", comparison.is_some());

    if args.stage_timings {
        host.text("Stage latencies, in microseconds:")?;
        present_timings(&mut host, &stage_timings)?;
    }

    Ok(())
}
