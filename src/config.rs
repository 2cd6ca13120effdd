use crate::cli::ServeArgs;
use crate::constants::{DEFAULT_HOST, DEFAULT_MAX_UPLOAD_SIZE, DEFAULT_PORT};
use crate::error::Result;
use crate::processing::CompressionOptions;

/// Server settings resolved from command line arguments and environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_size: usize,
    pub cors: bool,
    pub options: CompressionOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            cors: false,
            options: CompressionOptions::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_args(args: &ServeArgs) -> Result<Self> {
        let options =
            CompressionOptions::new(args.quality.webp_quality, args.quality.jpeg_quality)?
                .with_limits(args.max_upload_size, args.max_dimension);

        Ok(Self {
            host: args.host.clone(),
            port: args.port,
            max_upload_size: args.max_upload_size,
            cors: args.cors,
            options,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
