use crate::constants::{
    DEFAULT_HOST, DEFAULT_MAX_UPLOAD_SIZE, DEFAULT_PORT, MAX_IMAGE_DIMENSION,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "img-squeeze-api",
    about = "An HTTP image compression service that re-encodes uploads to WebP or JPEG",
    long_about = "img-squeeze-api accepts multipart image uploads and returns a smaller re-encoding \
                  as base64 JSON. PNG, WebP and GIF inputs become lossy WebP (quality 85); \
                  everything else becomes progressive, optimized JPEG (quality 90).",
    version,
    after_help = "EXAMPLES:\n  \
    img-squeeze-api serve --port 3000\n  \
    curl -F image=@photo.png http://localhost:3000/api/compress\n  \
    img-squeeze-api compress photo.png photo.webp\n  \
    img-squeeze-api info photo.png"
)]
pub struct Args {
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Only log warnings and errors"
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run the HTTP compression server",
        long_about = "Serve POST /api/compress (multipart field \"image\") and GET /healthz."
    )]
    Serve(ServeArgs),

    #[command(
        about = "Compress a single local image file",
        long_about = "Run the same pipeline as the HTTP endpoint on a local file and write the result. \
                      The output format is chosen from the input format."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(
            help = "Output image file path",
            long_help = "Output file path. Defaults to the input path with a .webp or .jpg extension."
        )]
        output: Option<PathBuf>,

        #[command(flatten)]
        quality: QualityArgs,
    },

    #[command(
        about = "Display image metadata and the chosen output format",
        long_about = "Probe the image header for format and dimensions without decoding pixels."
    )]
    Info {
        #[arg(help = "Image file path to analyze")]
        input: PathBuf,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct QualityArgs {
    #[arg(
        long,
        env = "IMG_SQUEEZE_WEBP_QUALITY",
        help = "WebP output quality (1-100, default: 85)"
    )]
    pub webp_quality: Option<u8>,

    #[arg(
        long,
        env = "IMG_SQUEEZE_JPEG_QUALITY",
        help = "JPEG output quality (1-100, default: 90)"
    )]
    pub jpeg_quality: Option<u8>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "IMG_SQUEEZE_HOST", default_value = DEFAULT_HOST, help = "Address to bind")]
    pub host: String,

    #[arg(
        short,
        long,
        env = "IMG_SQUEEZE_PORT",
        default_value_t = DEFAULT_PORT,
        help = "Port to listen on"
    )]
    pub port: u16,

    #[arg(
        long,
        env = "IMG_SQUEEZE_MAX_UPLOAD_SIZE",
        default_value_t = DEFAULT_MAX_UPLOAD_SIZE,
        help = "Maximum request body size in bytes"
    )]
    pub max_upload_size: usize,

    #[arg(
        long,
        env = "IMG_SQUEEZE_MAX_DIMENSION",
        default_value_t = MAX_IMAGE_DIMENSION,
        help = "Largest accepted image width or height in pixels"
    )]
    pub max_dimension: u32,

    #[arg(long, env = "IMG_SQUEEZE_CORS", help = "Allow cross-origin requests from any origin")]
    pub cors: bool,

    #[command(flatten)]
    pub quality: QualityArgs,
}
