//! Background task that owns a [`ChatPanel`] and serializes its sends.
//!
//! Commands are processed FIFO with at most one gateway request in flight,
//! so replies always land in send order. The latest [`PanelView`] is
//! published on a watch channel; `pending` counts sends that are queued or
//! in flight, which a UI uses to disable its input.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use rostering_core::TranscriptEntry;

use crate::error::ClientError;
use crate::http::ChatTransport;
use crate::panel::{reply_or_fallback, ChatPanel};

const COMMAND_BUFFER: usize = 64;

/// Commands accepted by the panel task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    Open,
    Close,
    Toggle,
    SetDraft(String),
    SendDraft,
    Send(String),
    QuickAction(String),
    Reset,
}

impl PanelCommand {
    fn is_send(&self) -> bool {
        matches!(
            self,
            PanelCommand::SendDraft | PanelCommand::Send(_) | PanelCommand::QuickAction(_)
        )
    }
}

/// Snapshot of the panel published after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelView {
    pub open: bool,
    pub draft: String,
    pub transcript: Vec<TranscriptEntry>,
    /// Sends queued or in flight.
    pub pending: usize,
}

impl PanelView {
    /// Whether a send is queued or in flight.
    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }

    fn sync(&mut self, panel: &ChatPanel) {
        self.open = panel.is_open();
        self.draft = panel.draft().to_string();
        self.transcript = panel.transcript().to_vec();
    }
}

/// Cloneable handle to a running panel task.
#[derive(Clone)]
pub struct PanelHandle {
    tx: mpsc::Sender<PanelCommand>,
    view_tx: Arc<watch::Sender<PanelView>>,
    view_rx: watch::Receiver<PanelView>,
}

impl PanelHandle {
    /// Queue a command.
    pub async fn dispatch(&self, command: PanelCommand) -> Result<(), ClientError> {
        let is_send = command.is_send();
        if is_send {
            self.view_tx.send_modify(|v| v.pending += 1);
        }

        if self.tx.send(command).await.is_err() {
            if is_send {
                self.view_tx.send_modify(|v| v.pending -= 1);
            }
            return Err(ClientError::PanelClosed);
        }
        Ok(())
    }

    /// Show the panel.
    pub async fn open(&self) -> Result<(), ClientError> {
        self.dispatch(PanelCommand::Open).await
    }

    /// Hide the panel.
    pub async fn close(&self) -> Result<(), ClientError> {
        self.dispatch(PanelCommand::Close).await
    }

    /// Queue a free-text send.
    pub async fn send_user_text(&self, text: impl Into<String>) -> Result<(), ClientError> {
        self.dispatch(PanelCommand::Send(text.into())).await
    }

    /// Queue a quick-action send.
    pub async fn run_quick_action(&self, label: impl Into<String>) -> Result<(), ClientError> {
        self.dispatch(PanelCommand::QuickAction(label.into())).await
    }

    /// Latest published view.
    pub fn view(&self) -> PanelView {
        self.view_rx.borrow().clone()
    }

    /// A receiver notified on every view change.
    pub fn subscribe(&self) -> watch::Receiver<PanelView> {
        self.view_rx.clone()
    }

    /// Wait until every queued send has been answered.
    pub async fn wait_idle(&self) -> Result<PanelView, ClientError> {
        let mut rx = self.view_rx.clone();
        let view = rx
            .wait_for(|v| v.pending == 0)
            .await
            .map_err(|_| ClientError::PanelClosed)?;
        Ok(view.clone())
    }
}

/// Start a panel task talking to `transport`.
///
/// The task stops once every [`PanelHandle`] has been dropped.
pub fn spawn_panel(transport: Arc<dyn ChatTransport>) -> (PanelHandle, JoinHandle<()>) {
    let panel = ChatPanel::new();
    let mut initial = PanelView::default();
    initial.sync(&panel);

    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let (view_tx, view_rx) = watch::channel(initial);
    let view_tx = Arc::new(view_tx);

    let task = tokio::spawn(run_panel(panel, transport, rx, view_tx.clone()));

    (
        PanelHandle {
            tx,
            view_tx,
            view_rx,
        },
        task,
    )
}

async fn run_panel(
    mut panel: ChatPanel,
    transport: Arc<dyn ChatTransport>,
    mut rx: mpsc::Receiver<PanelCommand>,
    view_tx: Arc<watch::Sender<PanelView>>,
) {
    info!("Chat panel started");

    while let Some(command) = rx.recv().await {
        debug!(?command, "Panel command");
        let is_send = command.is_send();

        match command {
            PanelCommand::Open => panel.open(),
            PanelCommand::Close => panel.close(),
            PanelCommand::Toggle => panel.toggle(),
            PanelCommand::SetDraft(draft) => panel.set_draft(draft),
            PanelCommand::Reset => panel.reset(),
            PanelCommand::SendDraft => {
                let draft = panel.draft().to_string();
                send(&mut panel, transport.as_ref(), &view_tx, &draft).await;
            }
            PanelCommand::Send(text) | PanelCommand::QuickAction(text) => {
                send(&mut panel, transport.as_ref(), &view_tx, &text).await;
            }
        }

        view_tx.send_modify(|v| {
            v.sync(&panel);
            if is_send {
                v.pending -= 1;
            }
        });
    }

    info!("Chat panel stopped");
}

async fn send(
    panel: &mut ChatPanel,
    transport: &dyn ChatTransport,
    view_tx: &watch::Sender<PanelView>,
    text: &str,
) {
    let Some(conversation) = panel.push_user(text) else {
        return;
    };

    // Show the user message while the reply is outstanding.
    view_tx.send_modify(|v| v.sync(panel));

    let reply = reply_or_fallback(transport, &conversation).await;
    panel.push_assistant(reply);
}
