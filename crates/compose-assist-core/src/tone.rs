//! The fixed tone catalog.

use serde::Serialize;

/// One selectable tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToneOption {
    /// Value sent to the generation endpoint.
    pub id: &'static str,
    /// Label shown in the selector.
    pub label: &'static str,
}

/// Identifier of the tone preselected in every new selector.
pub const DEFAULT_TONE: &str = "professional";

/// Catalog in display order.
pub const TONES: [ToneOption; 6] = [
    ToneOption {
        id: "professional",
        label: "Professional",
    },
    ToneOption {
        id: "friendly",
        label: "Friendly",
    },
    ToneOption {
        id: "formal",
        label: "Formal",
    },
    ToneOption {
        id: "casual",
        label: "Casual",
    },
    ToneOption {
        id: "polite",
        label: "Polite",
    },
    ToneOption {
        id: "enthusiastic",
        label: "Enthusiastic",
    },
];

/// Look up a catalog entry by identifier.
pub fn find_tone(id: &str) -> Option<&'static ToneOption> {
    TONES.iter().find(|tone| tone.id == id)
}
