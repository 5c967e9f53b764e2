//! `simulate` subcommand: run the assistant against the reference page.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use compose_assist_config::Config;
use compose_assist_core::controls::{self, InjectedControlSet};
use compose_assist_core::fixtures::{self, SAMPLE_EMAIL};
use compose_assist_core::{ActivationOutcome, ComposeAssistant, RecordingNotifier, find_tone};
use compose_assist_dom::SharedDocument;

use crate::cli::SimulateArgs;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

pub(crate) async fn handle_simulate(args: SimulateArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(base_url) = args.base_url {
        config.generator.base_url = base_url;
    }
    if find_tone(&args.tone).is_none() {
        anyhow::bail!("unknown tone {:?}; see `compose-assist tones`", args.tone);
    }
    let wait = Duration::from_secs(args.wait_secs);
    let email = args.email.unwrap_or_else(|| SAMPLE_EMAIL.to_string());

    let page = SharedDocument::new(fixtures::inbox_page(&email)?);
    let notifier = RecordingNotifier::new();
    let mut assistant =
        ComposeAssistant::from_config(page.clone(), &config, Arc::new(notifier.clone()))?;
    let mut outcomes = assistant.activations();
    assistant.start();

    let window = fixtures::open_reply_compose(&page)?;
    info!("reply compose window opened");

    let set = tokio::time::timeout(wait, wait_for_controls(&page))
        .await
        .context("controls were not injected in time")?;
    info!(?set, "controls injected");

    let selected = page.mutate(|doc| controls::select_tone(doc, set.tone_selector, &args.tone))?;
    if !selected {
        anyhow::bail!("tone {:?} missing from the injected selector", args.tone);
    }
    if !page.click(set.trigger) {
        anyhow::bail!("trigger did not accept the click");
    }

    let outcome = tokio::time::timeout(wait, outcomes.recv())
        .await
        .context("no reply in time")?
        .context("activation channel closed")?;

    println!("{}", render_report(&page, &set, window.compose_box, &notifier));
    assistant.shutdown().await;

    match outcome {
        ActivationOutcome::Inserted(_) => Ok(()),
        ActivationOutcome::Failed(err) => Err(err).context("generation failed"),
        ActivationOutcome::Ignored => anyhow::bail!("activation was ignored"),
    }
}

async fn wait_for_controls(page: &SharedDocument) -> InjectedControlSet {
    loop {
        if let Some(set) = page.read(controls::find_control_set) {
            return set;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

fn render_report(
    page: &SharedDocument,
    set: &InjectedControlSet,
    compose_box: compose_assist_dom::NodeId,
    notifier: &RecordingNotifier,
) -> String {
    page.read(|doc| {
        let mut out = String::new();
        out.push_str("Injected controls:\n");
        out.push_str(&format!(
            "  tone selector: {}\n",
            controls::selected_tone(doc, set.tone_selector)
        ));
        out.push_str(&format!("  trigger:       {}\n", doc.inner_text(set.trigger)));
        out.push_str("Compose box:\n");
        for line in doc.inner_text(compose_box).lines() {
            out.push_str(&format!("  {line}\n"));
        }
        let alerts = notifier.alerts();
        if alerts.is_empty() {
            out.push_str("Alerts: none");
        } else {
            out.push_str("Alerts:");
            for alert in alerts {
                out.push_str(&format!("\n  {alert}"));
            }
        }
        out
    })
}
