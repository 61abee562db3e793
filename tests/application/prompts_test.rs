use lectern::application::services::prompts;

#[test]
fn given_transcript_when_building_summary_prompt_then_exact_interpolation() {
    assert_eq!(
        prompts::summary_prompt("hello world"),
        "Summarize the following lecture notes:\nhello world"
    );
}

#[test]
fn given_transcript_when_building_quiz_prompt_then_exact_interpolation() {
    assert_eq!(
        prompts::quiz_prompt("hello world"),
        "Create 5 quiz questions from this lecture:\nhello world"
    );
}

#[test]
fn given_empty_transcript_when_building_prompts_then_instruction_survives() {
    assert_eq!(
        prompts::summary_prompt(""),
        "Summarize the following lecture notes:\n"
    );
    assert_eq!(
        prompts::quiz_prompt(""),
        "Create 5 quiz questions from this lecture:\n"
    );
}
