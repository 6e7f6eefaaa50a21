pub mod extraction_service;
pub mod fallback_service;
pub mod groq_service;
pub mod prompt_service;
pub mod recovery_service;
pub mod repair_service;
pub mod trace;
