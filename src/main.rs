use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "rd",
    version,
    about = "Convert Resource Descriptor documents between JRD and XRD"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Input format (json, xml)
    #[arg(short, long, value_enum)]
    from: Option<FormatArg>,
    /// Output format (json, xml)
    #[arg(short, long, value_enum)]
    to: FormatArg,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Indent the output
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    #[value(alias = "jrd")]
    Json,
    #[value(alias = "xrd")]
    Xml,
}

impl From<FormatArg> for rd::Format {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => Self::Jrd,
            FormatArg::Xml => Self::Xrd,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let from = match args.from.map(rd::Format::from) {
        Some(format) => format,
        None => match args.input.as_ref().and_then(rd::Format::from_path) {
            Some(format) => format,
            None => bail!(
                "could not infer input format; pass --from or provide an input file with extension"
            ),
        },
    };
    let to = rd::Format::from(args.to);
    debug!(?from, ?to, "converting");

    let input = read_input(args.input.as_ref())?;
    let config = rd::Config::default().with_pretty(args.pretty);
    let doc = rd::decode_with_config(&input, from.content_type(), &config)?
        .context("input format has no decoder")?;
    let mut output = rd::encode_with_config(&doc, to, &config)?;
    if !output.ends_with('\n') {
        output.push('\n');
    }

    write_output(args.output.as_ref(), output.as_bytes())
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.iter().all(u8::is_ascii_whitespace) {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
