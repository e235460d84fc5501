use anyhow::{bail, Context};
use clap::Parser;
use shotconv::{convert, default_output, HEIGHT, WIDTH};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Convert raw RGB565 scope screenshots to PNG")]
struct Args {
    /// Path(s) to screenshot .bin file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
    /// Output PNG path (only valid with a single input file)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Color saturation (0.0 = greyscale, 1.0 = full color)
    #[arg(long, default_value_t = 0.0)]
    saturation: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.output.is_some() && args.input.len() > 1 {
        bail!("-o/--output can only be used with a single input file");
    }

    for input in &args.input {
        let output = args.output.clone().unwrap_or_else(|| default_output(input));
        convert(input, &output, args.saturation)
            .with_context(|| format!("converting {}", input.display()))?;
        println!("Saved {} ({}x{})", output.display(), WIDTH, HEIGHT);
    }
    Ok(())
}
