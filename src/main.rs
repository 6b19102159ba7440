use CircularQueueMini::core::config::QueueConfig;
use CircularQueueMini::core::error::ConfigError;
use CircularQueueMini::core::journal::{Journal, append_entries};
use log::{info, warn};
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};

fn main() -> Result<(), ConfigError> {
    // Optional path to a JSON config as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => QueueConfig::load(path)?,
        None => QueueConfig::default(),
    };

    if let Err(err) = TermLogger::init(
        config.level_filter()?,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("cannot initialize logger: {}", err);
    }

    let mut journal = Journal::new(config.build_queue::<String>()?);

    // Enqueue past the initial capacity so the buffer has to grow
    let initial = journal.queue().capacity();
    for i in 1..=initial.max(1) * 2 + 1 {
        journal.enqueue(format!("Item {}", i));
    }
    info!(
        "queued {} items, capacity {} -> {}",
        journal.queue().len(),
        initial,
        journal.queue().capacity()
    );

    let mut cursor = journal.queue().cursor();
    while cursor.move_next(journal.queue())? {
        info!("pending: {}", cursor.current()?);
    }

    for _ in 0..2 {
        let item = journal.dequeue()?;
        info!("dequeued {}", item);
    }

    // The cursor was taken before the dequeues, so it is stale now
    if let Err(err) = cursor.move_next(journal.queue()) {
        warn!("stale cursor: {}", err);
    }

    match &config.journal_path {
        Some(path) => {
            append_entries(journal.entries(), path)?;
            info!("appended {} journal entries to {}", journal.entries().len(), path);
        }
        None => {
            for entry in journal.entries() {
                info!("{}", entry);
            }
        }
    }
    Ok(())
}
