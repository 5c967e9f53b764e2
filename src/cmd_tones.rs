//! `tones` subcommand.

use compose_assist_core::{DEFAULT_TONE, TONES};

pub(crate) fn handle_tones(format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&TONES)?),
        _ => print!("{}", render_table()),
    }
    Ok(())
}

fn render_table() -> String {
    let mut out = format!("{:<15} {:<15} {}\n", "ID", "LABEL", "DEFAULT");
    out.push_str(&"-".repeat(40));
    out.push('\n');
    for tone in &TONES {
        let marker = if tone.id == DEFAULT_TONE { "*" } else { "" };
        out.push_str(&format!("{:<15} {:<15} {}\n", tone.id, tone.label, marker));
    }
    out
}
