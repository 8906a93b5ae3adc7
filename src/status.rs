use ansi_term::Color;
use tracing::{error, info, Level};
use tracing_subscriber::fmt::{
    writer::{MakeWriterExt, OrElse, WithMaxLevel},
    MakeWriter,
};

/// Where user facing status events go
pub trait StatusSink {
    fn info(&self, message: &str);
    fn failure(&self, message: &str);
    fn success(&self, message: &str);
}

pub struct ConsoleStatus;

impl StatusSink for ConsoleStatus {
    fn info(&self, message: &str) {
        info!("ℹ️  {}", message);
    }

    fn failure(&self, message: &str) {
        error!("{}", Color::Red.paint(format!("❌  {}", message)));
    }

    fn success(&self, message: &str) {
        info!("{}", Color::Green.paint(format!("✅  {}", message)));
    }
}

/// Errors go to `stderr`, everything else to `stdout`
pub fn console_writer<E, O>(stderr: E, stdout: O) -> OrElse<WithMaxLevel<E>, O>
where
    E: for<'a> MakeWriter<'a>,
    O: for<'a> MakeWriter<'a>,
{
    stderr.with_max_level(Level::ERROR).or_else(stdout)
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failures_go_to_stderr() {
        let stderr = Captured::default();
        let stdout = Captured::default();
        let (err_handle, out_handle) = (stderr.clone(), stdout.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(console_writer(
                move || err_handle.clone(),
                move || out_handle.clone(),
            ))
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            ConsoleStatus.info("Removing Dapr from your machine...");
            ConsoleStatus.failure("Error removing Dapr: network unreachable");
            ConsoleStatus.success("Dapr has been removed successfully");
        });

        let stderr = stderr.contents();
        let stdout = stdout.contents();
        assert!(stderr.contains("network unreachable"));
        assert!(!stderr.contains("Removing Dapr"));
        assert!(!stderr.contains("removed successfully"));
        assert!(stdout.contains("Removing Dapr from your machine..."));
        assert!(stdout.contains("removed successfully"));
        assert!(!stdout.contains("network unreachable"));
    }
}
