//! Prompt templates for the two generation calls. Both are exact string
//! interpolation of the transcript, no truncation.

pub fn summary_prompt(transcript: &str) -> String {
    format!("Summarize the following lecture notes:\n{}", transcript)
}

pub fn quiz_prompt(transcript: &str) -> String {
    format!("Create 5 quiz questions from this lecture:\n{}", transcript)
}
