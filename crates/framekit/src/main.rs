use framekit::LaunchOptions;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let sprite = args.next().filter(|path| !path.is_empty());
    let fps = match args.next() {
        Some(fps) => match fps.parse() {
            Ok(fps) => fps,
            Err(_) => {
                eprintln!("Invalid frame rate '{}'. Usage: framekit [sprite.png] [fps]", fps);
                std::process::exit(1);
            }
        },
        None => 60,
    };

    match &sprite {
        Some(path) => log::info!("Using hero sprite: '{}'", path),
        None => log::info!("No sprite path provided, drawing the built-in hero"),
    }

    let options = LaunchOptions {
        sprite: sprite.map(Into::into),
        fps,
    };
    if let Err(err) = framekit::run(options) {
        eprintln!("framekit: {:#}", err);
        std::process::exit(1);
    }
}
