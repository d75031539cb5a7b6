// Test modules for openai-completions crate
//
// Each source module has a matching test module focused on its behavior.
// Wire-level tests against a real HTTP server live in tests/.

// Shared fixtures and the substitute transport
pub mod helpers;
