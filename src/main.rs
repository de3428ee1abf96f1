use clap::Parser;
use clockface::{ClockFace, ClockStyle, Color};

/// A windowed analog clock.
#[derive(Debug, Parser)]
#[command(name = "clockface", version, about)]
struct Args {
    /// Window title.
    #[arg(long, default_value = "clock")]
    title: String,

    /// Initial window width in pixels.
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Initial window height in pixels.
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Second hand color as rrggbb hex.
    #[arg(long, value_name = "HEX")]
    second_hand_color: Option<Color>,

    /// Color of the hands, caps, and numerals as rrggbb hex.
    #[arg(long, value_name = "HEX")]
    content_color: Option<Color>,

    /// Color of the scale ticks as rrggbb hex.
    #[arg(long, value_name = "HEX")]
    scale_color: Option<Color>,

    /// Background color as rrggbb hex.
    #[arg(long, value_name = "HEX")]
    background_color: Option<Color>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let style = ClockStyle::builder()
        .title(args.title)
        .window_width(args.width)
        .window_height(args.height)
        .maybe_second_hand_color(args.second_hand_color)
        .maybe_content_color(args.content_color)
        .maybe_scale_color(args.scale_color)
        .maybe_background_color(args.background_color)
        .build();

    ClockFace::new(style).run()
}
