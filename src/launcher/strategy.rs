use crate::error::LaunchError;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::{sleep, timeout, Instant};

/// One way of asking the OS to open a URL.
#[async_trait]
pub trait LaunchStrategy: Send + Sync {
    fn name(&self) -> &str;
    async fn attempt(&self, url: &str) -> Result<(), LaunchError>;
}

fn command(program: &str, args: &[String], url: &str) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

/// Runs `program [args..] <url>` and waits for it. Success is a zero exit status.
pub struct CommandStrategy {
    name: String,
    program: String,
    args: Vec<String>,
}

impl CommandStrategy {
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_args(program, Vec::<String>::new())
    }

    pub fn with_args<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = program.into();
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let name = if args.is_empty() {
            program.clone()
        } else {
            format!("{} {}", program, args.join(" "))
        };
        Self { name, program, args }
    }
}

#[async_trait]
impl LaunchStrategy for CommandStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn attempt(&self, url: &str) -> Result<(), LaunchError> {
        let status = command(&self.program, &self.args, url)
            .status()
            .await
            .map_err(|source| LaunchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::ExitStatus {
                program: self.program.clone(),
                status,
            })
        }
    }
}

/// Spawns `program [args..] <url>` without waiting for it.
///
/// The child gets `grace` to fail. A spawn error or an unsuccessful exit
/// inside that window is a failure. Success is only reported once the full
/// window has elapsed, whether the child is still running or exited cleanly.
pub struct DetachedStrategy {
    name: String,
    program: String,
    args: Vec<String>,
    grace: Duration,
}

impl DetachedStrategy {
    pub fn new<I, S>(program: impl Into<String>, args: I, grace: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = program.into();
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        Self {
            name: format!("detached {} {}", program, args.join(" ")),
            program,
            args,
            grace,
        }
    }
}

#[async_trait]
impl LaunchStrategy for DetachedStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn attempt(&self, url: &str) -> Result<(), LaunchError> {
        let mut cmd = command(&self.program, &self.args, url);
        #[cfg(windows)]
        {
            const DETACHED_PROCESS: u32 = 0x0000_0008;
            const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
            cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
        }

        let started = Instant::now();
        let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        match timeout(self.grace, child.wait()).await {
            // Still running; dropping the handle leaves the process alone.
            Err(_) => Ok(()),
            Ok(Ok(status)) if status.success() => {
                sleep(self.grace.saturating_sub(started.elapsed())).await;
                Ok(())
            }
            Ok(Ok(status)) => Err(LaunchError::ExitStatus {
                program: self.program.clone(),
                status,
            }),
            Ok(Err(source)) => Err(LaunchError::Spawn {
                program: self.program.clone(),
                source,
            }),
        }
    }
}
