// crates/cueboard-ui/src/helpers/format.rs
//
// UI-layer string utilities that don't belong in cueboard-core.

use cueboard_core::state::MAX_LABEL_LEN;

/// Audio containers the import dialog and the drop handler accept.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a", "aac"];

/// Normalize text-field input into a pad label: uppercase, capped at
/// MAX_LABEL_LEN characters. Cap by character count so multibyte input
/// never splits a codepoint.
pub fn sanitize_label(raw: &str) -> String {
    raw.chars()
        .take(MAX_LABEL_LEN)
        .collect::<String>()
        .to_uppercase()
}

/// Whether `path` looks like an audio file we can import.
pub fn is_audio_file(path: &std::path::Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn labels_are_uppercased() {
        assert_eq!(sanitize_label("gong cha"), "GONG CHA");
    }

    #[test]
    fn labels_are_capped_at_fifteen_chars() {
        assert_eq!(sanitize_label("open day one extended mix"), "OPEN DAY ONE EX");
        assert_eq!(sanitize_label("open day one extended mix").chars().count(), 15);
    }

    #[test]
    fn multibyte_labels_do_not_split() {
        let label = sanitize_label("éléphant à trompette");
        assert_eq!(label.chars().count(), 15);
        assert!(label.starts_with('É'));
    }

    #[test]
    fn audio_extensions_are_case_insensitive() {
        assert!(is_audio_file(Path::new("/x/horn.WAV")));
        assert!(is_audio_file(Path::new("/x/horn.mp3")));
        assert!(!is_audio_file(Path::new("/x/horn.mp4")));
        assert!(!is_audio_file(Path::new("/x/horn")));
    }
}
