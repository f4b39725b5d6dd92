mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use controller::{events::UiEvent, FormController};
use ui::{dialogs::DialogNotifier, CaptionApp};

#[derive(Parser, Debug)]
#[command(about = "Pick an image and get caption and song suggestions for it")]
struct Args {
    /// Overrides the configured upload endpoint.
    #[arg(long)]
    upload_url: Option<String>,
    #[arg(long, default_value = "info")]
    log_filter: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter.as_str())
        .init();

    let mut settings = load_settings();
    if let Some(upload_url) = args.upload_url {
        settings.upload_url = upload_url;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let _backend_worker = backend_bridge::runtime::launch(cmd_rx, ui_tx, &settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(ui::dialogs::APP_TITLE)
            .with_inner_size([640.0, 720.0])
            .with_min_inner_size([420.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        ui::dialogs::APP_TITLE,
        options,
        Box::new(|_cc| {
            let controller = FormController::new(cmd_tx, Box::new(DialogNotifier));
            Ok(Box::new(CaptionApp::new(controller, ui_rx)))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn upload_url_flag_is_optional() {
        let args = Args::try_parse_from(["caption_gui"]).expect("parse");
        assert_eq!(args.upload_url, None);
        assert_eq!(args.log_filter, "info");

        let args = Args::try_parse_from([
            "caption_gui",
            "--upload-url",
            "http://127.0.0.1:5000/upload",
        ])
        .expect("parse");
        assert_eq!(args.upload_url.as_deref(), Some("http://127.0.0.1:5000/upload"));
    }
}
