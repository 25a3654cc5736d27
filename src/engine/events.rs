use std::fmt;

/// Change notifications for hosts that would rather subscribe than poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderEvent {
    /// Fired on every load, even if the text is unchanged.
    TextLoaded { word_count: usize },
    PositionChanged { position: usize },
    PlaybackChanged { playing: bool },
    SpeedChanged { speed: u32 },
    PresentationChanged { presented: bool },
}

type Listener = Box<dyn FnMut(&ReaderEvent)>;

/// Registered callbacks, run in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    inner: Vec<Listener>,
}

impl Listeners {
    pub(crate) fn push(&mut self, listener: Listener) {
        self.inner.push(listener);
    }

    pub(crate) fn emit(&mut self, event: ReaderEvent) {
        for listener in &mut self.inner {
            listener(&event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.inner.len())
            .finish()
    }
}
