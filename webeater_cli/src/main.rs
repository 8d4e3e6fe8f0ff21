use std::io::Write;
use std::path::Path;
use std::process::exit;

use crate::args::Args;
use crate::input::{is_valid_url, parse_input, Input, Request};
use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;
use webeater::{EaterConfig, EaterError, ExtractionFlags, HintLoader, HttpRenderer, Output, Webeater};

mod args;
mod input;

const INVALID_URL: &str = "Please provide a valid URL starting with http:// or https://";

#[tokio::main]
pub async fn main() {
    let args = Args::parse();

    // installed before the config is read, the config may still enable debug
    let logger_level = if args.silent {
        LevelFilter::Error
    } else {
        LevelFilter::Debug
    };
    if let Err(error) = TermLogger::init(
        logger_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to set up logging: {error}");
    }
    log::set_max_level(log_level(args.silent, args.debug));

    let mut config = match EaterConfig::load(&args.config, &args.hints) {
        Ok(config) => config,
        Err(error) => {
            print_error(args.silent, &format!("Failed to load {:?}: {error}", args.config));
            exit(1);
        }
    };
    config.debug |= args.debug;
    log::set_max_level(log_level(args.silent, config.debug));

    if let Err(error) = config.save() {
        log::warn!("Failed to save configuration to {:?}: {error}", config.path());
    }

    let loader = HintLoader::new(Some(args.hints_dir.as_path()));

    if let Some(html_file) = &args.html {
        match extract_file(&args, &config, &loader, html_file) {
            Ok(output) => print_output(args.silent, &html_file.to_string_lossy(), &output),
            Err(error) => {
                print_error(args.silent, &format!("Failed to extract {html_file:?}: {error}"));
                exit(1);
            }
        }
        return;
    }

    if let Some(url) = &args.url {
        if !is_valid_url(url) {
            print_error(args.silent, INVALID_URL);
            exit(1);
        }
    }

    let mut eater = match Webeater::create(config, &loader, HttpRenderer::new()).await {
        Ok(eater) => eater,
        Err(error) => {
            print_error(args.silent, &format!("Failed to start: {error}"));
            exit(1);
        }
    };

    match &args.url {
        Some(url) => {
            let request = Request {
                url: url.clone(),
                json: args.json,
                content_only: args.content_only,
            };
            process(&mut eater, &request, args.silent).await;
        }
        None => interactive(&mut eater, args.silent).await,
    }

    if let Err(error) = eater.shutdown().await {
        log::error!("Shutting down failed: {error}");
    }
}

fn log_level(silent: bool, debug: bool) -> LevelFilter {
    if silent {
        LevelFilter::Error
    } else if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

async fn interactive(eater: &mut Webeater<HttpRenderer>, silent: bool) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("Enter a URL to fetch content (or 'q' to quit): ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                log::error!("Reading input failed: {error}");
                break;
            }
        };

        match parse_input(&line) {
            Input::Quit => break,
            Input::Empty => continue,
            Input::Invalid(_) => print_error(silent, INVALID_URL),
            Input::Fetch(request) => process(eater, &request, silent).await,
        }
    }
}

async fn process(eater: &mut Webeater<HttpRenderer>, request: &Request, silent: bool) {
    let url = match Url::parse(&request.url) {
        Ok(url) => url,
        Err(error) => {
            print_error(silent, &format!("Invalid URL '{}': {error}", request.url));
            return;
        }
    };

    match eater
        .get(&url, None, request.json, request.content_only)
        .await
    {
        Some(output) => print_output(silent, url.as_str(), &output),
        None => print_error(silent, &format!("Failed to fetch content from {url}")),
    }
}

fn extract_file(
    args: &Args,
    config: &EaterConfig,
    loader: &HintLoader,
    html_file: &Path,
) -> Result<Output, EaterError> {
    let html = std::fs::read_to_string(html_file)?;

    let base_url = match &args.url {
        Some(url) => Url::parse(url)?.to_string(),
        None => String::new(),
    };
    let hints = config.combined_hints(loader);
    let flags = ExtractionFlags::new(args.json, args.content_only);

    Ok(webeater::extract(&base_url, &html, &hints, flags))
}

fn print_output(silent: bool, source: &str, output: &Output) {
    if silent {
        println!("{output}");
    } else {
        println!("Content fetched from {source}: {output}");
    }
}

fn print_error(silent: bool, message: &str) {
    if silent {
        println!("Error: {message}");
    } else {
        println!("{message}");
    }
}
