//! Foreground runner for the sync loop.
//!
//! Binds SIGINT/SIGTERM (Ctrl+C on Windows) to the scheduler's shutdown
//! handle so the loop stops at the next source or pass boundary.

use std::sync::Arc;
use std::time::Duration;

use crate::app::AppContext;
use crate::sync::Shutdown;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Pause between passes in milliseconds
    pub interval_ms: u64,
}

impl DaemonConfig {
    /// Parse interval string like "500ms", "5s", "30m", "6h", "1d".
    /// A bare number is taken as milliseconds.
    pub fn parse_interval(s: &str) -> Result<u64, String> {
        let s = s.trim().to_lowercase();

        let millis = if let Some(ms) = s.strip_suffix("ms") {
            ms.parse::<u64>()
                .map_err(|_| format!("Invalid milliseconds: {}", ms))?
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.parse::<u64>()
                .map_err(|_| format!("Invalid seconds: {}", secs))?
                .checked_mul(1000)
                .ok_or_else(|| "Interval too large".to_string())?
        } else if let Some(minutes) = s.strip_suffix('m') {
            minutes
                .parse::<u64>()
                .map_err(|_| format!("Invalid minutes: {}", minutes))?
                .checked_mul(60_000)
                .ok_or_else(|| "Interval too large".to_string())?
        } else if let Some(hours) = s.strip_suffix('h') {
            hours
                .parse::<u64>()
                .map_err(|_| format!("Invalid hours: {}", hours))?
                .checked_mul(3_600_000)
                .ok_or_else(|| "Interval too large".to_string())?
        } else if let Some(days) = s.strip_suffix('d') {
            days.parse::<u64>()
                .map_err(|_| format!("Invalid days: {}", days))?
                .checked_mul(86_400_000)
                .ok_or_else(|| "Interval too large".to_string())?
        } else {
            s.parse::<u64>().map_err(|_| {
                format!("Invalid interval: {}. Use format like '500ms', '5s', '30m'", s)
            })?
        };

        if millis == 0 {
            return Err("Interval must be greater than zero".to_string());
        }
        Ok(millis)
    }

    /// Format interval for display
    pub fn format_interval(millis: u64) -> String {
        if millis >= 86_400_000 && millis.is_multiple_of(86_400_000) {
            format!("{}d", millis / 86_400_000)
        } else if millis >= 3_600_000 && millis.is_multiple_of(3_600_000) {
            format!("{}h", millis / 3_600_000)
        } else if millis >= 60_000 && millis.is_multiple_of(60_000) {
            format!("{}m", millis / 60_000)
        } else if millis >= 1000 && millis.is_multiple_of(1000) {
            format!("{}s", millis / 1000)
        } else {
            format!("{}ms", millis)
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Daemon runner
pub struct Daemon {
    ctx: Arc<AppContext>,
    config: DaemonConfig,
}

impl Daemon {
    pub fn new(ctx: Arc<AppContext>, config: DaemonConfig) -> Self {
        Self { ctx, config }
    }

    /// Run the sync loop until a termination signal arrives.
    pub async fn run(&self) -> crate::app::Result<()> {
        let scheduler = self.ctx.scheduler();
        Self::forward_signals(scheduler.shutdown_handle());

        tracing::info!(
            interval = %DaemonConfig::format_interval(self.config.interval_ms),
            pid = std::process::id(),
            "feedsync daemon started"
        );

        scheduler.run(self.config.interval()).await?;

        tracing::info!("Daemon shutting down...");
        Ok(())
    }

    #[cfg(unix)]
    fn forward_signals(shutdown: Arc<Shutdown>) {
        use tokio::signal::unix::{signal, SignalKind};

        tokio::spawn(async move {
            let (mut sigterm, mut sigint) =
                match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                    (Ok(term), Ok(int)) => (term, int),
                    (Err(e), _) | (_, Err(e)) => {
                        tracing::error!("Failed to set up signal handlers: {}", e);
                        return;
                    }
                };

            tokio::select! {
                _ = sigterm.recv() => {},
                _ = sigint.recv() => {},
            }
            tracing::info!("Termination signal received");
            shutdown.trigger();
        });
    }

    #[cfg(windows)]
    fn forward_signals(shutdown: Arc<Shutdown>) {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.trigger();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval() {
        assert_eq!(DaemonConfig::parse_interval("500ms").unwrap(), 500);
        assert_eq!(DaemonConfig::parse_interval("5s").unwrap(), 5000);
        assert_eq!(DaemonConfig::parse_interval("30m").unwrap(), 1_800_000);
        assert_eq!(DaemonConfig::parse_interval("1h").unwrap(), 3_600_000);
        assert_eq!(DaemonConfig::parse_interval("1d").unwrap(), 86_400_000);
        assert_eq!(DaemonConfig::parse_interval("5000").unwrap(), 5000);
        assert_eq!(DaemonConfig::parse_interval(" 2S ").unwrap(), 2000);
        assert!(DaemonConfig::parse_interval("invalid").is_err());
        assert!(DaemonConfig::parse_interval("xms").is_err());
    }

    #[test]
    fn test_parse_interval_rejects_zero() {
        assert!(DaemonConfig::parse_interval("0").is_err());
        assert!(DaemonConfig::parse_interval("0s").is_err());
    }

    #[test]
    fn test_parse_interval_rejects_overflow() {
        assert!(DaemonConfig::parse_interval("300000000000d").is_err());
        assert!(DaemonConfig::parse_interval("18446744073709552s").is_err());
        assert_eq!(
            DaemonConfig::parse_interval("18446744073709551ms").unwrap(),
            18_446_744_073_709_551
        );
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(DaemonConfig::format_interval(500), "500ms");
        assert_eq!(DaemonConfig::format_interval(5000), "5s");
        assert_eq!(DaemonConfig::format_interval(1_800_000), "30m");
        assert_eq!(DaemonConfig::format_interval(3_600_000), "1h");
        assert_eq!(DaemonConfig::format_interval(86_400_000), "1d");
        assert_eq!(DaemonConfig::format_interval(1500), "1500ms");
    }
}
