pub mod google_translate;
pub mod llm_provider;
pub mod openai_compatible;
pub mod translation_provider;
