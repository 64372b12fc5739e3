//! コンソールへの診断出力
//!
//! ライブラリから通知されるイベントを`tracing`のログとして標準エラー出力に書き出します。
//! ログレベルは`RUST_LOG`で変更できます(デフォルトは`info`)。

use ipadic_transcoder::{Event, Observer};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// ログの出力先を初期化します。
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// イベントをログに変換するオブザーバー
#[derive(Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn notify(&mut self, event: &Event) {
        match event {
            Event::SourceStarted { kind, path } => {
                info!("Processing {} ({kind})...", path.display());
            }
            Event::SourceMissing { kind, path } => {
                warn!("{} not found; the {kind} output is skipped.", path.display());
            }
            Event::RecordSkipped {
                kind,
                line,
                fields,
                required,
            } => {
                debug!("{kind}: skipped line {line} ({fields} fields, {required} required)");
            }
            Event::DecodeReplaced { kind, line } => {
                debug!("{kind}: replaced invalid bytes at line {line}");
            }
            Event::StreamFinished { kind, path, stats } => {
                info!(
                    written = stats.written,
                    skipped = stats.skipped,
                    replaced = stats.replaced,
                    "Saved the {kind} output to {}",
                    path.display()
                );
            }
            Event::StreamFailed { kind, message } => {
                error!("Failed to produce the {kind} output: {message}");
            }
        }
    }
}
