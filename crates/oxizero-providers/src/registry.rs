//! Model shortcuts — short CLI names for full model identifiers.
//!
//! `oxizero run claude explain lifetimes` selects `claude-opus-4-5`; a first
//! word that is not a shortcut belongs to the prompt and the configured
//! default model is used.

/// Shortcut table: CLI short name → full model identifier.
pub static MODEL_SHORTCUTS: &[(&str, &str)] = &[
    ("claude", "claude-opus-4-5"),
    ("gpt", "gpt-5.2"),
    ("gemini", "gemini-2.5-pro"),
];

/// Resolve a shortcut to its full model identifier. Case-sensitive.
pub fn resolve_shortcut(name: &str) -> Option<&'static str> {
    MODEL_SHORTCUTS
        .iter()
        .find(|(short, _)| *short == name)
        .map(|(_, model)| *model)
}

/// Split CLI words into an optional model selection and the prompt words.
///
/// The first word is consumed only when it is a known shortcut; otherwise
/// every word is part of the prompt.
pub fn split_model_args(args: &[String]) -> (Option<&'static str>, &[String]) {
    match args.first().and_then(|a| resolve_shortcut(a)) {
        Some(model) => (Some(model), &args[1..]),
        None => (None, args),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn words(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_known_shortcuts() {
        assert_eq!(resolve_shortcut("claude"), Some("claude-opus-4-5"));
        assert_eq!(resolve_shortcut("gpt"), Some("gpt-5.2"));
        assert_eq!(resolve_shortcut("gemini"), Some("gemini-2.5-pro"));
    }

    #[test]
    fn test_resolve_unknown_shortcut() {
        assert_eq!(resolve_shortcut("llama"), None);
        // Case-sensitive: full model names are not shortcuts either
        assert_eq!(resolve_shortcut("Claude"), None);
        assert_eq!(resolve_shortcut("claude-opus-4-5"), None);
    }

    #[test]
    fn test_split_consumes_leading_shortcut() {
        let args = words(&["gpt", "write", "a", "haiku"]);
        let (model, rest) = split_model_args(&args);
        assert_eq!(model, Some("gpt-5.2"));
        assert_eq!(rest, &args[1..]);
    }

    #[test]
    fn test_split_keeps_non_shortcut_first_word() {
        let args = words(&["write", "a", "haiku"]);
        let (model, rest) = split_model_args(&args);
        assert_eq!(model, None);
        assert_eq!(rest.len(), 3);
        assert_eq!(rest[0], "write");
    }

    #[test]
    fn test_split_shortcut_only() {
        let args = words(&["claude"]);
        let (model, rest) = split_model_args(&args);
        assert_eq!(model, Some("claude-opus-4-5"));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_split_empty_args() {
        let (model, rest) = split_model_args(&[]);
        assert_eq!(model, None);
        assert!(rest.is_empty());
    }
}
