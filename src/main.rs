use backend_gateway::impl_fake::BackendGatewayFake;
use backend_gateway::impl_http::BackendGatewayHttp;
use backend_gateway::interface::BackendGateway;
use config::{BackendKind, Config, DisplayKind};
use display::impl_console::DisplayConsole;
use display::impl_gui::DisplayGui;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use preview_store::impl_memory::PreviewStoreMemory;
use session::main::ClassifierClient;
use std::sync::{Arc, Mutex};
use user_input::impl_channel::UserInputChannel;
use user_input::impl_console::UserInputConsole;

mod backend_gateway;
mod config;
mod display;
mod library;
mod preview_store;
mod selected_image;
mod session;
mod user_input;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let gateway: Arc<dyn BackendGateway + Send + Sync> = match config.backend {
        BackendKind::Http => Arc::new(BackendGatewayHttp::new(&config, logger.clone())?),
        BackendKind::Fake => Arc::new(BackendGatewayFake::new(
            logger.clone(),
            config.fake_backend_latency,
        )),
    };

    let preview_store = Arc::new(PreviewStoreMemory::new(logger.clone()));

    let _ = logger.info(&format!("Using backend at {}", config.api_url));

    match config.display {
        DisplayKind::Console => {
            let display = Arc::new(Mutex::new(DisplayConsole::new()));
            let user_input = Arc::new(UserInputConsole::new(logger.clone()));

            let client = ClassifierClient::new(
                config,
                logger,
                gateway,
                preview_store,
                display,
                user_input,
            );

            client.run()
        }
        DisplayKind::Gui => {
            let (actions, user_input) = UserInputChannel::new();
            let (display, window) = DisplayGui::new(actions);

            let client = ClassifierClient::new(
                config,
                logger.clone(),
                gateway,
                preview_store,
                Arc::new(Mutex::new(display)),
                Arc::new(user_input),
            );

            let session = std::thread::spawn(move || {
                if let Err(err) = client.run() {
                    let _ = logger.error(&format!("Session stopped: {}", err));
                }
            });

            window.run().map_err(|err| err.to_string())?;
            let _ = session.join();

            Ok(())
        }
    }
}
