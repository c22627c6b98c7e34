/*!
 * Main test entry point for the traductor test suite
 */

// Import common test utilities
pub mod common;

// Import unit tests
mod unit {
    // Chunking and reassembly properties
    pub mod chunker_tests;

    // App configuration tests
    pub mod app_config_tests;

    // File and folder related tests
    pub mod file_utils_tests;

    // Artifact rendering tests
    pub mod export_tests;
}

// Import integration tests
mod integration {
    // Typed text and .txt uploads
    pub mod text_workflow_tests;

    // Spreadsheet uploads
    pub mod spreadsheet_workflow_tests;

    // PDF uploads
    pub mod pdf_workflow_tests;

    // Shared engine lifetime
    pub mod engine_lifecycle_tests;
}
