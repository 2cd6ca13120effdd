use clap::Parser;
use img_squeeze_api::cli::{Args, Commands};
use img_squeeze_api::info::print_image_info;
use img_squeeze_api::utils::validate_file_exists;
use img_squeeze_api::{compress_file, logger, server, CompressionOptions, ServerConfig};
use std::fs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_logging(args.verbose, args.quiet)?;

    tracing::debug!("{:?}", args);

    match args.command {
        Commands::Serve(serve_args) => {
            let config = ServerConfig::from_args(&serve_args)?;
            server::serve(config, server::shutdown_signal()).await?;
        }
        Commands::Compress {
            input,
            output,
            quality,
        } => {
            let options = CompressionOptions::new(quality.webp_quality, quality.jpeg_quality)?;
            tokio::task::spawn_blocking(move || compress_file(&input, output.as_deref(), &options))
                .await??;
        }
        Commands::Info { input } => {
            validate_file_exists(&input)?;
            let data = fs::read(&input)?;
            print_image_info(&input.display().to_string(), &data)?;
        }
    }

    Ok(())
}
