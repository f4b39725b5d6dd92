use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use client_core::{
    form::{drive_submission, reduce, render, FormAction, FormState},
    load_selected_file, load_settings, HttpCaptionService,
};

/// Exit status when no image was given.
const EXIT_MISSING_INPUT: u8 = 2;

#[derive(Parser, Debug)]
#[command(about = "Upload one image and print caption and song suggestions")]
struct Args {
    /// Image to upload.
    #[arg(long)]
    image: Option<PathBuf>,
    /// Overrides the configured upload endpoint.
    #[arg(long)]
    upload_url: Option<String>,
    /// Print the service reply as JSON instead of lists.
    #[arg(long)]
    json: bool,
    #[arg(long, default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let mut settings = load_settings();
    if let Some(upload_url) = args.upload_url {
        settings.upload_url = upload_url;
    }
    let service = HttpCaptionService::new(&settings)?;

    let mut state = FormState::new();
    if let Some(path) = &args.image {
        let file = load_selected_file(path)?;
        state = reduce(&state, FormAction::FileSelected(file)).0;
    }

    let (state, notice) = drive_submission(&service, &state).await;
    if let Some(notice) = notice {
        eprintln!("{notice}");
        return Ok(ExitCode::from(EXIT_MISSING_INPUT));
    }

    match (args.json, state.result()) {
        (true, Some(result)) => println!("{}", serde_json::to_string_pretty(result)?),
        _ => print!("{}", render(&state).to_text()),
    }

    if state.error_message().is_some() {
        tracing::debug!("upload attempt ended with an error");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
