use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tzclock_clock::{SystemClock, WorldClock};
use tzclock_core::markup::{CANVAS_TAG, TIME_CLASS};
use tzclock_ports::Clock;
use tzclock_runner::{Bootstrapper, Document, PageConfig, Selector, SharedDocument, WidgetHandle, mount_clock};

fn print_help() {
    eprintln!(
        r#"tzclock - live analog and digital clocks bound to IANA time zones

USAGE:
    tzclock [OPTIONS]

OPTIONS:
    --config <PATH>     Load the page (clocks and embeds) from a JSON file
    --duration <SECS>   Stop after this many seconds (default: run until Ctrl-C)
    --svg <DIR>         Write the final analog faces as SVG files into DIR
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Run the built-in demo page for five seconds
    tzclock --duration 5

    # Run a page file and keep the analog faces
    tzclock --config page.json --duration 3 --svg out/
"#
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut duration: Option<Duration> = None;
    let mut svg_dir: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--duration" | "-d" => {
                i += 1;
                let secs = args.get(i).and_then(|s| s.parse::<f64>().ok());
                match secs {
                    Some(secs) if secs >= 0.0 && secs.is_finite() => {
                        duration = Some(Duration::from_secs_f64(secs));
                    }
                    _ => {
                        eprintln!("Error: --duration requires a number of seconds");
                        std::process::exit(1);
                    }
                }
            }
            "--svg" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --svg requires a directory argument");
                    std::process::exit(1);
                }
                svg_dir = Some(PathBuf::from(&args[i]));
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let page = if let Some(path) = config_path {
        log::info!("Loading page from: {}", path);
        PageConfig::from_file(&path)?
    } else {
        log::info!("Using built-in demo page");
        PageConfig::demo()
    };
    log::info!("Clocks: {}", page.clocks.len());
    log::info!("Embeds: {}", page.embeds.len());

    let doc = build_document(&page);

    let clock: Arc<dyn Clock> = match page.start_time {
        Some(start) => {
            log::info!("Simulated clock starting at {}", start);
            WorldClock::new(Some(start))
        }
        None => Arc::new(SystemClock::new()),
    };

    let handles = Bootstrapper::new(doc.clone(), clock)
        .with_frame_interval(page.frame_interval())
        .run()
        .await;

    let mut snapshots = tokio::time::interval(Duration::from_secs(1));
    let deadline = tokio::time::sleep(duration.unwrap_or(Duration::MAX / 4));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => {
                log::info!("Duration elapsed");
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted");
                break;
            }
            _ = snapshots.tick() => log_snapshot(&doc, &handles),
        }
    }

    if let Some(dir) = svg_dir {
        write_svgs(&doc, &handles, &dir)?;
    }

    for handle in &handles {
        handle.cancel();
    }
    for handle in handles {
        handle.join().await;
    }

    log::info!("Shutdown complete");
    Ok(())
}

/// Mount every embed; unknown clock ids leave an error element behind
fn build_document(page: &PageConfig) -> SharedDocument {
    let mut doc = Document::new();
    let body = doc.body();

    for embed in &page.embeds {
        if let Err(e) = mount_clock(&mut doc, body, &page.clocks, embed.id, &embed.overrides()) {
            log::warn!("{}", e);
            let error_el = doc.create_element("div");
            doc.add_class(error_el, "tzc-error");
            doc.set_text(error_el, "Clock not found (check id).");
            doc.append_child(body, error_el);
        }
    }

    doc.mark_ready();
    doc.into_shared()
}

fn log_snapshot(doc: &SharedDocument, handles: &[WidgetHandle]) {
    let page = doc.read();
    for handle in handles {
        let root = handle.root();
        if let Some(time_el) = page.query(root, &Selector::class(TIME_CLASS)) {
            log::info!("[{}] {}", handle.name(), page.text(time_el));
        } else if let Some(canvas) = page
            .query(root, &Selector::tag(CANVAS_TAG))
            .and_then(|el| page.canvas(el))
        {
            match canvas.texts().first() {
                Some(text) => log::info!("[{}] analog: {}", handle.name(), text),
                None => log::info!(
                    "[{}] analog: {} draw ops, {} repaints",
                    handle.name(),
                    canvas.ops().len(),
                    canvas.clears()
                ),
            }
        }
    }
}

fn write_svgs(doc: &SharedDocument, handles: &[WidgetHandle], dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let page = doc.read();
    for handle in handles {
        let Some(canvas) = page
            .query(handle.root(), &Selector::tag(CANVAS_TAG))
            .and_then(|el| page.canvas(el))
        else {
            continue;
        };
        let path = dir.join(format!("{}.svg", handle.name()));
        std::fs::write(&path, canvas.to_svg())?;
        log::info!("[{}] Wrote {}", handle.name(), path.display());
    }
    Ok(())
}
