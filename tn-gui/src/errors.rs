use tracing::warn;

/// User-facing errors collected by views during a frame and drained into
/// toasts by the app. Replaces blocking notifications: reporters keep
/// running, the message surfaces on the next frame.
#[derive(Debug, Default)]
pub struct ErrorSink(Vec<String>);

impl ErrorSink {
    pub fn report(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.0.push(message);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = String> + '_ {
        self.0.drain(..)
    }

    #[cfg(test)]
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}
