use std::collections::BTreeMap;

use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::info;

use crate::client::PredictionClient;
use crate::config::ClientConfig;
use crate::form::{DisplayMode, FormEffect, FormEvent, PredictionForm};
use crate::render::View;
use crate::widget::WidgetKind;

/// All four widgets side by side. Forms share nothing but the HTTP client;
/// each sits behind its own lock, which is never held across a request.
pub struct Dashboard {
    client: PredictionClient,
    forms: BTreeMap<WidgetKind, Mutex<PredictionForm>>,
}

impl Dashboard {
    pub fn new(client: PredictionClient, config: &ClientConfig) -> Self {
        let forms = WidgetKind::ALL
            .into_iter()
            .map(|kind| {
                let form = PredictionForm::new(kind).with_enforced_ranges(config.enforce_ranges);
                (kind, Mutex::new(form))
            })
            .collect();
        Self { client, forms }
    }

    fn form(&self, kind: WidgetKind) -> &Mutex<PredictionForm> {
        // `new` inserts every widget.
        &self.forms[&kind]
    }

    pub async fn edit(&self, kind: WidgetKind, key: &str, value: &str) -> FormEffect {
        self.form(kind).lock().await.update(FormEvent::Edit {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Submits one widget and waits for its answer. Returns the mode the
    /// widget ends in, which is not necessarily this submission's outcome
    /// when another submit for the same widget overtook it.
    pub async fn submit(&self, kind: WidgetKind) -> DisplayMode {
        let effect = self.form(kind).lock().await.update(FormEvent::Submit);
        if let FormEffect::Dispatch(ticket) = effect {
            let resolution = self.client.dispatch(ticket).await;
            let mut form = self.form(kind).lock().await;
            form.update(FormEvent::Resolved(resolution));
            return form.mode().clone();
        }
        self.mode(kind).await
    }

    /// Submits every widget concurrently.
    pub async fn submit_all(&self) -> Vec<(WidgetKind, DisplayMode)> {
        info!("submitting all widgets");
        let modes = join_all(WidgetKind::ALL.into_iter().map(|kind| self.submit(kind))).await;
        WidgetKind::ALL.into_iter().zip(modes).collect()
    }

    pub async fn mode(&self, kind: WidgetKind) -> DisplayMode {
        self.form(kind).lock().await.mode().clone()
    }

    /// Text of all four widgets in dashboard order.
    pub async fn render(&self) -> String {
        let mut out = String::new();
        for kind in WidgetKind::ALL {
            let view = View::of(self.form(kind).lock().await.mode());
            out.push_str(&format!("== {} ==\n", kind.title()));
            for line in view.lines() {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}
