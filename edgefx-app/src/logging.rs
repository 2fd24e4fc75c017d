use std::path::Path;

use anyhow::Context;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}";

/// Installs log4rs, either from a YAML/JSON config file or with a single
/// console appender at `level`.
pub fn init(level: LevelFilter, config_file: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = config_file {
        log4rs::init_file(path, Default::default())
            .with_context(|| format!("failed to load log config {}", path.display()))?;
        return Ok(());
    }

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}
