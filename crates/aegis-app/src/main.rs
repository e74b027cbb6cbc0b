mod app_state;
mod cli;
mod project;
mod window_host;

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use app_state::{AegisApp, UserEvent};

fn main() -> ExitCode {
    // Parse CLI arguments
    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("aegis=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "aegis=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Aegis v{} starting...", env!("CARGO_PKG_VERSION"));

    let project_dir = args.project_dir();

    if args.init {
        return match project::init_project(&project_dir) {
            Ok(Some(path)) => {
                tracing::info!("Wrote {}", path.display());
                ExitCode::SUCCESS
            }
            Ok(None) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("Init failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let config = project::load_config(&project_dir, args.config.as_deref());
    tracing::info!(
        project = %project_dir.display(),
        main = %config.app.main,
        "Config loaded"
    );

    // wry drives WebKitGTK on Linux; GTK must be up before the first web view.
    #[cfg(target_os = "linux")]
    if let Err(e) = gtk::init() {
        tracing::error!("Failed to initialize GTK: {e}");
        return ExitCode::FAILURE;
    }

    let event_loop = match EventLoop::<UserEvent>::with_user_event().build() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };

    let proxy = Mutex::new(event_loop.create_proxy());
    let wake = Arc::new(move || {
        if let Ok(proxy) = proxy.lock() {
            let _ = proxy.send_event(UserEvent::Wake);
        }
    });

    let mut app = AegisApp::new(config, project_dir, wake);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
        return ExitCode::FAILURE;
    }
    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
