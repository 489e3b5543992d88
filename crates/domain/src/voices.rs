//! Supported languages and voice selection for speech synthesis

use serde::Serialize;

/// Voice used to synthesize speech for a detected language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceSelection {
    /// Synthesis locale, e.g. `fr-FR`
    pub locale: &'static str,
    /// Provider voice identifier, e.g. `Lea`
    pub voice_id: &'static str,
}

/// A language the synthesis pipeline supports end to end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedLanguage {
    /// ISO 639-1 language code, e.g. `fr`
    pub language_code: &'static str,
    /// English display name, e.g. `French`
    pub language_name: &'static str,
    /// Synthesis locale, e.g. `fr-FR`
    pub locale: &'static str,
    /// Provider voice identifier, e.g. `Lea`
    pub voice: &'static str,
}

const SUPPORTED: &[SupportedLanguage] = &[
    SupportedLanguage {
        language_code: "en",
        language_name: "English",
        locale: "en-US",
        voice: "Joanna",
    },
    SupportedLanguage {
        language_code: "de",
        language_name: "German",
        locale: "de-DE",
        voice: "Vicki",
    },
    SupportedLanguage {
        language_code: "fr",
        language_name: "French",
        locale: "fr-FR",
        voice: "Lea",
    },
    SupportedLanguage {
        language_code: "es",
        language_name: "Spanish",
        locale: "es-ES",
        voice: "Lucia",
    },
    SupportedLanguage {
        language_code: "sv",
        language_name: "Swedish",
        locale: "sv-SE",
        voice: "Elin",
    },
    SupportedLanguage {
        language_code: "pt",
        language_name: "Portuguese",
        locale: "pt-PT",
        voice: "Ines",
    },
];

/// Locales accepted when identifying the language of uploaded audio
pub const TRANSCRIPTION_LANGUAGE_OPTIONS: &[&str] =
    &["en-US", "de-DE", "fr-FR", "es-ES", "sv-SE", "pt-PT"];

/// Pick the synthesis voice for a detected language code.
///
/// Unknown or unsupported codes fall back to the English voice so a
/// detection miss still produces audible output.
pub fn select_voice(language_code: &str) -> VoiceSelection {
    let entry = SUPPORTED
        .iter()
        .find(|lang| lang.language_code.eq_ignore_ascii_case(language_code))
        .unwrap_or(&SUPPORTED[0]);
    VoiceSelection {
        locale: entry.locale,
        voice_id: entry.voice,
    }
}

/// All supported languages, sorted by display name
pub fn supported_languages() -> Vec<SupportedLanguage> {
    let mut languages = SUPPORTED.to_vec();
    languages.sort_by_key(|lang| lang.language_name);
    languages
}
