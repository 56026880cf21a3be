//! Plays a [`Script`] against a document session.

use anyhow::Context;
use inkpatch_core::{
    history::{HistoryChange, HistoryLimit},
    patch::Patch,
    state::{document::GestureSummary, DocumentSession, LayerID},
    util::Rect,
};

use crate::{
    global::Settings,
    script::{Script, Step},
    tools::{Dab, Fill, PenTool},
};

/// A session with its layers laid out according to `settings`.
pub struct Runner {
    session: DocumentSession,
    /// Layers in the order scripts refer to them.
    layers: Vec<LayerID>,
}
impl Runner {
    pub fn new(name: impl Into<String>, settings: &Settings) -> anyhow::Result<Self> {
        let mut session = DocumentSession::new(
            name,
            HistoryLimit::from_requested(settings.history_limit),
        );
        let layers = (0..settings.layers)
            .map(|_| {
                session.add_layer(
                    settings.canvas_width,
                    settings.canvas_height,
                    settings.bytes_per_pixel,
                )
            })
            .collect::<Result<_, _>>()
            .context("creating layers")?;
        Ok(Self { session, layers })
    }
    #[must_use]
    pub fn session(&self) -> &DocumentSession {
        &self.session
    }
    /// Log every change to the session's history.
    pub fn log_changes(&mut self) {
        let name = self.session.name.clone();
        self.session.history_mut().on_change(
            move |change: &HistoryChange<Patch, GestureSummary>| -> anyhow::Result<()> {
                let label = change
                    .changed_entry
                    .as_ref()
                    .and_then(|entry| entry.label().map(str::to_owned));
                log::info!(
                    "{name}: {} v{} {label:?}, {} entries, cursor {:?}, undo {} redo {}",
                    change.kind.as_ref(),
                    change.version,
                    change.size,
                    change.cursor,
                    change.can_undo,
                    change.can_redo,
                );
                Ok(())
            },
            true,
        );
    }
    /// Run every step in order, stopping at the first that fails.
    pub fn run(&mut self, script: &Script) -> anyhow::Result<()> {
        for (idx, step) in script.steps.iter().enumerate() {
            self.step(step)
                .with_context(|| format!("step {idx} ({})", step.as_ref()))?;
        }
        Ok(())
    }
    fn step(&mut self, step: &Step) -> anyhow::Result<()> {
        let session = &mut self.session;
        match step {
            Step::Begin { layer } => {
                let id = *self.layers.get(*layer).ok_or_else(|| {
                    anyhow::anyhow!("no layer {layer}, document has {}", self.layers.len())
                })?;
                session.begin_gesture(id)?;
            }
            Step::Dab {
                x,
                y,
                radius,
                color,
            } => Dab {
                x: *x,
                y: *y,
                radius: *radius,
                color: color.clone(),
            }
            .apply(session)?,
            Step::Fill {
                x,
                y,
                w,
                h,
                color,
            } => Fill {
                rect: Rect::new(*x, *y, *w, *h),
                color: color.clone(),
            }
            .apply(session)?,
            Step::End { label } => {
                if session.end_gesture(label.clone())?.is_none() {
                    log::info!("Gesture touched nothing, not recorded");
                }
            }
            Step::Cancel => {
                if !session.cancel_gesture()? {
                    log::info!("Nothing to cancel");
                }
            }
            Step::Undo => {
                if !session.undo()? {
                    log::info!("Nothing to undo");
                }
            }
            Step::Redo => {
                if !session.redo()? {
                    log::info!("Nothing to redo");
                }
            }
            Step::Limit { n } => {
                session.history_mut().set_limit(*n);
            }
            Step::Clear => {
                session.history_mut().clear();
            }
            Step::Relabel { label } => {
                session
                    .history_mut()
                    .update_top_with(|meta| meta.label = Some(label.clone()))
                    .ok_or_else(|| anyhow::anyhow!("nothing to relabel"))?;
            }
        }
        Ok(())
    }
    /// Digest of each layer's pixels, then a summary of the history.
    #[must_use]
    pub fn report(&self) -> String {
        use std::fmt::Write;
        let mut out = String::new();
        let layers = self.session.layers();
        for (idx, id) in self.layers.iter().enumerate() {
            if let Some(layer) = layers.get(*id) {
                let _ = writeln!(out, "layer {idx}: {}", blake3::hash(layer.bytes()).to_hex());
            }
        }
        let history = self.session.history();
        let cursor = history
            .cursor()
            .map_or_else(|| "-1".to_owned(), |cursor| cursor.to_string());
        let _ = writeln!(
            out,
            "history: {} entries, cursor {cursor}, limit {}, {} of patches",
            history.len(),
            history.limit(),
            human_bytes::human_bytes(self.session.history_bytes() as f64)
        );
        out
    }
}
