const MAX_VISIBLE_CHARS: usize = 80;

/// Truncates transcript text for safe logging. Transcripts are user speech
/// and may carry anything; log lines get a bounded preview, never the whole
/// thing.
pub fn sanitize_transcript(transcript: &str) -> String {
    let trimmed = transcript.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    if total_chars <= MAX_VISIBLE_CHARS {
        return trimmed.to_string();
    }

    let preview: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
    format!("{}... ({} chars total)", preview, total_chars)
}
