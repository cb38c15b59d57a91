//! Interactive demo: every stdin line is typed into a numeric field as one
//! raw input event, then the settled validation state is printed.
//!
//! Usage: `vinput-demo [config.json]`

use std::fs::File;
use std::sync::Arc;

use log::{debug, info};
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};
use vinput::prelude::*;

/// Host that logs presentation changes instead of rendering them.
struct LogHost;

impl FieldHost for LogHost {
    fn toggle_class(&self, class: ContainerClass, on: bool) {
        debug!("class {} -> {}", class.as_str(), on);
    }

    fn dispatch(&self, event: &ValidationChanged) {
        debug!("{} from {}", event.name(), event.field);
    }
}

#[tokio::main]
async fn main() {
    let log_file = File::create("vinput-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => FieldConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => FieldConfig::default(),
    };
    let settle_wait = config.debounce * 2;

    let field = InputField::with_config(config);
    field.set_label("Quantity");
    field.set_kind(Kind::Number);
    field.set_required(true);
    field.set_min(Some(5.0));
    field.set_max(Some(10.0));
    field.attach(Arc::new(LogHost))?;
    field.validate().await?;
    info!("demo field {} ready", field.id());

    println!("{} (number, 5..=10, required). Empty line clears, Ctrl-D quits.", field.label());
    print_state(&field);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        field.on_input(line)?;
        tokio::time::sleep(settle_wait).await;
        print_state(&field);
    }

    field.detach();
    Ok(())
}

fn print_state(field: &InputField) {
    let result = field.result();
    let status = if result.invalid { "invalid" } else { "ok" };
    println!("  value = {:?} [{}]", field.value(), status);
    for message in &result.messages {
        println!("  - {}", message);
    }
}
