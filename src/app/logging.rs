// Logging setup and the call wrapper used around every controller operation.
// The terminal belongs to the UI, so records go to a file instead of stderr.
use std::fmt::{Debug, Display};
use std::fs::OpenOptions;
use std::future::Future;
use std::io::{self, Write};

use env_logger::{Env, Target};
use log::{debug, warn};

use crate::app::config::Config;

pub fn init(config: &Config) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
    Ok(())
}

// Runs `operation`, logging its name and arguments on entry and its outcome on exit.
pub async fn logged<T, E, F>(name: &str, args: impl Debug, operation: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    debug!("{name} called with {args:?}");
    match operation.await {
        Ok(value) => {
            debug!("{name} succeeded");
            Ok(value)
        }
        Err(err) => {
            warn!("{name} failed: {err}");
            Err(err)
        }
    }
}
