//! Ferrix - Minimal Web Fetch Engine
//!
//! Entry point for the command-line client: fetch one URL and print the
//! rendered body to stdout.

use std::env;
use std::process;

use ferrix::network::{Engine, Url};
use ferrix::{NAME, VERSION};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(raw_url) = args.get(1) else {
        eprintln!("{NAME} v{VERSION}");
        eprintln!("usage: ferrix <url>");
        process::exit(2);
    };

    let url = match Url::parse(raw_url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("failed to parse {raw_url}: {e}");
            process::exit(1);
        }
    };

    let mut engine = Engine::new();
    match engine.request(&url, None) {
        Ok(response) => print!("{}", ferrix::renderer::render(&response)),
        Err(e) => {
            eprintln!("request failed: {e}");
            process::exit(1);
        }
    }
}
