use crate::error::LaunchError;
use std::time::Duration;
use tracing::{debug, info, warn};

pub mod platform;
pub mod strategy;

pub use platform::Platform;
pub use strategy::{CommandStrategy, DetachedStrategy, LaunchStrategy};

const CHROME_PATHS: [&str; 3] = [
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    "chrome",
];

/// Best-effort URL opener. Strategies run in order and stop at the first success.
pub struct Launcher {
    platform: Platform,
    strategies: Vec<Box<dyn LaunchStrategy>>,
}

impl Launcher {
    pub fn new(platform: Platform, strategies: Vec<Box<dyn LaunchStrategy>>) -> Self {
        Self {
            platform,
            strategies,
        }
    }

    /// Chrome install locations first, then the shell's URL handlers.
    pub fn chrome(platform: Platform, detach_grace: Duration) -> Self {
        let mut strategies: Vec<Box<dyn LaunchStrategy>> = CHROME_PATHS
            .iter()
            .map(|path| Box::new(CommandStrategy::new(*path)) as Box<dyn LaunchStrategy>)
            .collect();

        strategies.push(Box::new(CommandStrategy::with_args("cmd", ["/C", "start", ""])));
        strategies.push(Box::new(CommandStrategy::with_args(
            "rundll32",
            ["url.dll,FileProtocolHandler"],
        )));
        strategies.push(Box::new(DetachedStrategy::new(
            "cmd",
            ["/c", "start", ""],
            detach_grace,
        )));

        Self::new(platform, strategies)
    }

    pub async fn launch(&self, url: &str) -> bool {
        info!("Launcher: platform={} url={}", self.platform, url);

        if !self.platform.is_supported() {
            warn!("Launcher: {}", LaunchError::Unsupported(self.platform.to_string()));
            return false;
        }

        let mut last_error = None;
        for strategy in &self.strategies {
            debug!("Launcher: trying '{}'", strategy.name());
            match strategy.attempt(url).await {
                Ok(()) => {
                    info!("Launcher: opened {} via '{}'", url, strategy.name());
                    return true;
                }
                Err(e) => {
                    debug!("Launcher: '{}' failed: {}", strategy.name(), e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => warn!("Launcher: failed to open {}: {}", url, e),
            None => warn!("Launcher: no strategies configured for {}", url),
        }
        false
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records every attempt into a shared log and succeeds when told to.
    pub(crate) struct FakeStrategy {
        pub name: String,
        pub succeeds: bool,
        pub log: Arc<Mutex<Vec<(String, String)>>>,
    }

    #[async_trait]
    impl LaunchStrategy for FakeStrategy {
        fn name(&self) -> &str {
            &self.name
        }

        async fn attempt(&self, url: &str) -> Result<(), LaunchError> {
            self.log
                .lock()
                .unwrap()
                .push((self.name.clone(), url.to_string()));
            if self.succeeds {
                Ok(())
            } else {
                Err(LaunchError::Unsupported(format!("{} refused", self.name)))
            }
        }
    }

    pub(crate) fn fake_launcher(
        platform: Platform,
        outcomes: &[bool],
    ) -> (Launcher, Arc<Mutex<Vec<(String, String)>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let strategies = outcomes
            .iter()
            .enumerate()
            .map(|(i, &succeeds)| {
                Box::new(FakeStrategy {
                    name: format!("s{i}"),
                    succeeds,
                    log: log.clone(),
                }) as Box<dyn LaunchStrategy>
            })
            .collect();
        (Launcher::new(platform, strategies), log)
    }

    fn attempted(log: &Arc<Mutex<Vec<(String, String)>>>) -> Vec<String> {
        log.lock().unwrap().iter().map(|(n, _)| n.clone()).collect()
    }

    #[tokio::test]
    async fn test_short_circuits_on_first_success() {
        let (launcher, log) = fake_launcher(Platform::Windows, &[false, false, true, true, true]);
        assert!(launcher.launch("https://music.youtube.com/watch?v=abc123").await);
        assert_eq!(attempted(&log), vec!["s0", "s1", "s2"]);
    }

    #[tokio::test]
    async fn test_all_fail() {
        let (launcher, log) = fake_launcher(Platform::Windows, &[false; 6]);
        assert!(!launcher.launch("https://www.youtube.com/watch?v=abc123").await);
        assert_eq!(attempted(&log).len(), 6);
        assert!(log
            .lock()
            .unwrap()
            .iter()
            .all(|(_, url)| url == "https://www.youtube.com/watch?v=abc123"));
    }

    #[tokio::test]
    async fn test_unsupported_platform_attempts_nothing() {
        let (launcher, log) = fake_launcher(Platform::Other("linux".into()), &[true, true]);
        assert!(!launcher.launch("https://www.youtube.com/watch?v=abc123").await);
        assert!(attempted(&log).is_empty());
    }

    #[tokio::test]
    async fn test_empty_strategy_list_fails() {
        let launcher = Launcher::new(Platform::Windows, Vec::new());
        assert!(!launcher.launch("https://x").await);
    }

    #[test]
    fn test_chrome_order() {
        let launcher = Launcher::chrome(Platform::Windows, Duration::from_millis(800));
        let names: Vec<&str> = launcher.strategies.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                r"C:\Program Files\Google\Chrome\Application\chrome.exe",
                r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
                "chrome",
                "cmd /C start ",
                "rundll32 url.dll,FileProtocolHandler",
                "detached cmd /c start ",
            ]
        );
    }
}
