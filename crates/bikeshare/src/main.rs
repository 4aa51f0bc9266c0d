mod bootstrap;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use bikeshare_core::settings::Settings;
use bikeshare_runtime::session::{run_once, Session};
use bikeshare_ui::themes::Theme;

fn main() -> Result<ExitCode> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", settings.data_dir.display());

    let theme = Theme::auto_detect(settings.no_color);

    match settings.filter_spec()? {
        Some(spec) => {
            tracing::info!("One-shot analysis for {}", spec);
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if let Err(e) = run_once(&settings.data_dir, &spec, settings.json, &theme, &mut out) {
                tracing::error!("One-shot analysis failed: {}", e);
                out.flush()?;
                eprintln!("{}", e);
                return Ok(ExitCode::FAILURE);
            }
            out.flush()?;
        }
        None => {
            let stdin = io::stdin();
            let mut session = Session::new(
                stdin.lock(),
                io::stdout(),
                settings.data_dir.clone(),
                settings.page_size(),
                theme,
            );
            session.run()?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
