use clap::{Parser, Subcommand, ValueEnum};
use lithoclient::logger::{self, LogLevel, LoggerConfig};
use lithoclient::{
    ClientConfig, GeneratedArtifact, LithoClient, ModelGenerationRequest, ModelShape,
    ShapeOptions, TextBaseRequest,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lithoclient", version, about = "Generate printable STL lithophanes")]
struct Cli {
    /// Backend base URL, overrides LITHO_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the backend is reachable
    Health,
    /// Turn an image into a lithophane STL
    Model {
        image: PathBuf,
        /// Name sent with the upload, defaults to the image's file name
        #[arg(long)]
        filename: Option<String>,
        /// Text embossed under the image
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        text_height_mm: Option<f64>,
        #[arg(long)]
        text_margin_mm: Option<f64>,
        #[arg(long, value_enum)]
        shape: Option<ShapeArg>,
        #[arg(long)]
        zoom: Option<f64>,
        #[arg(long)]
        frame_width: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        offset_x: Option<i32>,
        #[arg(long, allow_negative_numbers = true)]
        offset_y: Option<i32>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a base plate carrying the given text
    TextBase {
        text: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    Heart,
    Circle,
    Square,
}

impl From<ShapeArg> for ModelShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Heart => ModelShape::Heart,
            ShapeArg::Circle => ModelShape::Circle,
            ShapeArg::Square => ModelShape::Square,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let loaded_env = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Info };
    if let Err(e) = logger::init_with_config(LoggerConfig::new().with_level(level)) {
        eprintln!("{}", e);
    }
    if !loaded_env {
        log::debug!("No .env file found, using process environment");
    }
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    logger::log_config_info(&config);
    let client = LithoClient::new(config)?;

    match cli.command {
        Command::Health => {
            if client.health_check().await {
                println!("backend is up");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("backend is unreachable");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Model {
            image,
            filename,
            text,
            text_height_mm,
            text_margin_mm,
            shape,
            zoom,
            frame_width,
            offset_x,
            offset_y,
            output,
        } => {
            let bytes = tokio::fs::read(&image).await?;
            let mut request = ModelGenerationRequest::new(bytes).with_shaping(ShapeOptions {
                shape: shape.map(ModelShape::from),
                zoom,
                frame_width_mm: frame_width,
                offset_x,
                offset_y,
            });
            request.filename = filename.or_else(|| {
                image
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            });
            request.text = text;
            request.text_height_mm = text_height_mm;
            request.text_margin_mm = text_margin_mm;

            let artifact = client.model().generate(request).await?;
            save(&artifact, output, "litho.stl").await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::TextBase { text, output } => {
            let artifact = client
                .text_base()
                .generate(TextBaseRequest::new(text))
                .await?;
            save(&artifact, output, "text_base.stl").await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn save(
    artifact: &GeneratedArtifact,
    output: Option<PathBuf>,
    default_name: &str,
) -> std::io::Result<()> {
    let path = output_path(artifact, output, default_name);
    artifact.save(&path).await?;
    println!("{} ({} bytes)", path.display(), artifact.len());
    Ok(())
}

fn output_path(artifact: &GeneratedArtifact, output: Option<PathBuf>, default_name: &str) -> PathBuf {
    output.unwrap_or_else(|| {
        // Only the last component of the backend's suggestion is trusted.
        artifact
            .suggested_filename()
            .and_then(|name| PathBuf::from(name).file_name().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(default_name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_arg_mapping() {
        assert_eq!(ModelShape::from(ShapeArg::Heart), ModelShape::Heart);
        assert_eq!(ModelShape::from(ShapeArg::Circle), ModelShape::Circle);
        assert_eq!(ModelShape::from(ShapeArg::Square), ModelShape::Square);
    }

    #[test]
    fn test_output_path() {
        let plain = GeneratedArtifact::new(vec![1]);
        assert_eq!(output_path(&plain, None, "litho.stl"), PathBuf::from("litho.stl"));
        assert_eq!(
            output_path(&plain, Some(PathBuf::from("out/mama.stl")), "litho.stl"),
            PathBuf::from("out/mama.stl")
        );

        let suggested = GeneratedArtifact::new(vec![1])
            .with_suggested_filename("../../etc/litho_corazon_manifold.stl");
        assert_eq!(
            output_path(&suggested, None, "litho.stl"),
            PathBuf::from("litho_corazon_manifold.stl")
        );

        let dots = GeneratedArtifact::new(vec![1]).with_suggested_filename("..");
        assert_eq!(output_path(&dots, None, "text_base.stl"), PathBuf::from("text_base.stl"));
    }

    #[test]
    fn test_cli_parses_model_command() {
        let cli = Cli::try_parse_from([
            "lithoclient",
            "--api-url",
            "http://10.0.0.5:8000",
            "model",
            "photo.png",
            "--shape",
            "circle",
            "--offset-x",
            "-20",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.5:8000"));
        match cli.command {
            Command::Model {
                image,
                shape,
                offset_x,
                ..
            } => {
                assert_eq!(image, PathBuf::from("photo.png"));
                assert!(matches!(shape, Some(ShapeArg::Circle)));
                assert_eq!(offset_x, Some(-20));
            }
            _ => panic!("expected model command"),
        }
    }
}
