use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use digitrec::{
    Canvas, CanvasConfig, ClientConfig, Failure, ImageEncoder, IntensityGrid, KnnWsClient,
    PixelSampler, Point, Recognizer, DEFAULT_WS_URL,
};
use log::info;
use std::process::ExitCode;

/// Characters from blank to fully inked
const INK_RAMP: &[u8] = b" .:-=+*#%@";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the KNN web services
    #[arg(long, env = "KNN_WS_URL", default_value = DEFAULT_WS_URL)]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw strokes on a blank canvas and classify the digit
    Classify {
        /// Strokes as "x,y x,y ...", separated by ';', in logical coordinates
        #[arg(short, long)]
        strokes: String,

        /// Pen width in logical pixels
        #[arg(short, long, default_value_t = 1.0)]
        pen_width: f32,

        /// Print the canvas before classifying
        #[arg(long)]
        show: bool,
    },
    /// Fetch a stored image and its label
    Image {
        /// Id of the image, e.g. as returned by classify
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let client =
        KnnWsClient::new(ClientConfig::new(args.url)).context("Failed to create HTTP client")?;
    info!("Using KNN web services at {}", client.base_url());

    match args.command {
        Command::Classify {
            strokes,
            pen_width,
            show,
        } => classify(client, &strokes, pen_width, show).await,
        Command::Image { id } => show_image(&client, &id).await,
    }
}

async fn classify(
    client: KnnWsClient,
    strokes: &str,
    pen_width: f32,
    show: bool,
) -> anyhow::Result<ExitCode> {
    let strokes = parse_strokes(strokes)?;
    let mut canvas = Canvas::new(CanvasConfig {
        pen_width,
        ..CanvasConfig::default()
    })?;
    for stroke in &strokes {
        canvas.draw_polyline(stroke);
    }

    let recognizer = Recognizer::new(client, ImageEncoder::for_pen(canvas.pen_color())?);
    if show {
        let grid = recognizer.encoder().intensities(&PixelSampler::sample(&canvas));
        println!("{}", render(&grid));
    }

    info!("Classifying {} stroke(s)", strokes.len());
    match recognizer.recognize(&canvas).await {
        Ok(result) => {
            println!("Label: {}", result.label);
            println!("Nearest training image: {}", result.id);
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => Ok(report(&failure)),
    }
}

async fn show_image(client: &KnnWsClient, id: &str) -> anyhow::Result<ExitCode> {
    let record = match client.get_image(id).await {
        Ok(record) => record,
        Err(failure) => return Ok(report(&failure)),
    };
    println!("Label: {}", record.label.as_deref().unwrap_or("(none)"));

    let bytes = record.features.to_bytes()?;
    let side = (bytes.len() as f64).sqrt() as usize;
    if side * side != bytes.len() {
        println!("({} feature bytes, not a square image)", bytes.len());
        return Ok(ExitCode::SUCCESS);
    }
    let grid = IntensityGrid::from_bytes(side, side, bytes)?;
    println!("{}", render(&grid));
    Ok(ExitCode::SUCCESS)
}

fn report(failure: &Failure) -> ExitCode {
    for error in failure.errors() {
        eprintln!("error: {}", error.message);
    }
    ExitCode::FAILURE
}

/// Parses "x,y x,y;x,y ..." into one polyline per ';'-separated stroke.
fn parse_strokes(input: &str) -> anyhow::Result<Vec<Vec<Point>>> {
    let mut strokes = Vec::new();
    for stroke in input.split(';').filter(|s| !s.trim().is_empty()) {
        let points = stroke
            .split_whitespace()
            .map(str::parse::<Point>)
            .collect::<Result<Vec<_>, _>>()?;
        strokes.push(points);
    }
    if strokes.is_empty() {
        bail!("No strokes given");
    }
    Ok(strokes)
}

fn render(grid: &IntensityGrid) -> String {
    let scale = (INK_RAMP.len() - 1) as u32;
    grid.values()
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|&v| INK_RAMP[((v as u32 * scale + 127) / 255) as usize] as char)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
