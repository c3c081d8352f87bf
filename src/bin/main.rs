use clap::Parser;

use sentiment_report::{logging, Options, Pipeline};

/// Classifies the sentiment of a CSV of text records and charts the result
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// Input CSV file
    #[clap(short, long, default_value = "dataset.csv")]
    input: std::path::PathBuf,
    /// Output directory, created if missing
    #[clap(short, long, default_value = "outputs")]
    outdir: std::path::PathBuf,
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let args = Args::parse();
    let pipeline = Pipeline::vader()?;
    let report = pipeline.run(&Options {
        input: args.input,
        outdir: args.outdir,
    })?;

    println!("{}", report.summary());

    Ok(())
}
