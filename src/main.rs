use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::Result;
use sensortop::app::App;
use sensortop::config::load_config;
use sensortop::event::{Event, EventHandler, POLL_TIMEOUT};
use sensortop::system::source::SysRoot;
use sensortop::ui;

/// Pause between seeding the counters and the first frame, so per-core
/// usage is already populated when the dashboard appears.
const WARM_UP: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(
    name = "sensortop",
    version,
    about = "Live CPU frequency, utilization and hardware sensor dashboard"
)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _cli = Cli::parse();

    let root = SysRoot::default();
    if !root.is_supported() {
        println!("sensortop only works on Linux with /proc/stat");
        return Ok(());
    }

    #[cfg(feature = "trace-log")]
    sensortop::trace::init_file_log()?;

    let app = App::new(root, load_config());
    tokio::time::sleep(WARM_UP).await;

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, app).await;
    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, mut app: App) -> Result<()> {
    let mut events = EventHandler::new(POLL_TIMEOUT);

    while app.running {
        app.tick(Instant::now());
        terminal.draw(|frame| ui::draw(frame, &app))?;

        match events.next().await {
            Event::Key(key) => {
                let action = app.map_key(key);
                app.dispatch(action);
            }
            Event::Mouse(_) | Event::Resize | Event::Timeout | Event::Ignored => {}
        }
    }

    Ok(())
}
