mod notes_service_test;
mod prompts_test;
