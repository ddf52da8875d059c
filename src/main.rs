use clap::Parser;
use std::error::Error;
use std::io;

use knights_tour::board::Position;
use knights_tour::config::TourConfig;
use knights_tour::display::TermRenderer;
use knights_tour::input::KeyboardInput;
use knights_tour::logging::init_logging;
use knights_tour::playback::PlaybackController;
use knights_tour::report::write_report;
use knights_tour::session::Session;
use knights_tour::timing::SpinPacer;

/// Animate a knight's tour found with Warnsdorff's rule
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Square to start from, in chess notation
    #[clap(default_value = "A8")]
    start: Position,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = TourConfig::new(Some(args.start));
    let _logging = init_logging(config.log_file.as_deref())?;

    // a bad start square is reported before the screen is taken over
    let session = Session::start(&config)?;

    let outcomes = {
        let mut renderer = TermRenderer::new()?;
        let mut input = KeyboardInput::new()?;
        let mut pacer = SpinPacer::new();
        let mut controller =
            PlaybackController::new(&mut renderer, &mut input, &mut pacer, config.playback);
        controller.play(&config, session)?
        // terminal restored here, as the renderer and input drop
    };

    let squares = config.board_size * config.board_size;
    let mut out = io::stdout();
    for outcome in &outcomes {
        write_report(&mut out, outcome, squares)?;
    }
    Ok(())
}
