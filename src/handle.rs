//! Termination signalling for long-running brightness operations.

use tokio::sync::{mpsc, watch};

/// A handle which allows signalizing termination to a running operation and
/// waiting for it to finish.
///
/// The handle never sends anything. Dropping it (or calling
/// [await_shutdown](Handle::await_shutdown)) closes the channel held by the
/// [HandleChild], which the operation interprets as a request to stop.
#[derive(Debug)]
pub struct Handle {
    termination_sender: mpsc::Sender<()>,
    shutdown_receiver: watch::Receiver<()>,
}

impl Handle {
    /// Create a new Handle and return it and its associated child.
    ///
    /// The handle stays with whoever decides when to stop, the child is given
    /// to the operation which should be stopped.
    pub fn new() -> (Handle, HandleChild) {
        let (termination_sender, termination_receiver) = mpsc::channel(1);
        let (shutdown_notifier, shutdown_receiver) = watch::channel(());
        (
            Handle {
                termination_sender,
                shutdown_receiver,
            },
            HandleChild {
                termination_receiver,
                _shutdown_notifier: shutdown_notifier,
            },
        )
    }

    /// Signal termination and wait until the child is dropped.
    pub async fn await_shutdown(self) {
        drop(self.termination_sender);
        let mut shutdown_receiver = self.shutdown_receiver;
        let result = shutdown_receiver.changed().await;
        assert!(result.is_err());
    }
}

/// The side of the handle belonging to the running operation.
///
/// Dropping this struct must be the last thing the operation does, otherwise
/// [`Handle::await_shutdown`] returns before the operation has actually
/// stopped writing to the device.
#[derive(Debug)]
pub struct HandleChild {
    termination_receiver: mpsc::Receiver<()>,
    _shutdown_notifier: watch::Sender<()>,
}

impl HandleChild {
    /// Wait until the parent [Handle] is dropped or its
    /// [await_shutdown](`Handle::await_shutdown`) method is called.
    ///
    /// Since this function will not return until these conditions are
    /// fulfilled, you should call it within a [tokio::select!] block.
    pub async fn should_terminate(&mut self) {
        let res = self.termination_receiver.recv().await;
        assert!(res.is_none());
    }
}
