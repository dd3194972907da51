use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use hgfetch::core::{config::FetchConfig, download::CurlSource, version};
use hgfetch::{commands, logging};

#[derive(Parser, Debug)]
#[clap(name = "hgfetch")]
#[clap(about = "Fetch and unpack the pinned mercurial-devel source archive")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Release to fetch
    #[clap(long, value_name = "VERSION", default_value = version::DEFAULT_VERSION)]
    release: String,
    /// Directory to unpack into
    #[clap(short = 'C', long, value_name = "DIR", default_value = ".")]
    directory: PathBuf,
    /// curl executable to download with
    #[clap(long, value_name = "PATH", default_value = "curl")]
    curl: PathBuf,
    /// Fail on HTTP error responses instead of trying to unpack them
    #[clap(long)]
    strict_status: bool,
    /// Print the archive URL and exit
    #[clap(long)]
    print_url: bool,
    /// Enable debug output
    #[clap(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> FetchConfig {
        FetchConfig::new(self.release.clone())
            .with_work_dir(&self.directory)
            .with_curl(&self.curl)
            .with_strict_status(self.strict_status)
    }
}

/// The archive URL for `config`, once its version is known to be usable.
fn checked_url(config: &FetchConfig) -> hgfetch::Result<String> {
    version::validate_version(&config.version)?;
    Ok(config.url())
}

fn run(cli: &Cli) -> hgfetch::Result<()> {
    let config = cli.config();

    if cli.print_url {
        println!("{}", checked_url(&config)?);
        return Ok(());
    }

    let source = CurlSource::from_config(&config)?;
    commands::fetch::fetch(&config, &source)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }

    Ok(())
}
