use crate::logging::codes;

/// Check every stage's code registrations and limits before a run
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::validate_file_processor_codes()?;
    crate::token_table::validate_table_codes()?;
    crate::lexical::validate_lexical_setup()?;
    crate::logging::config::validate_config()?;

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 3,
        "build_profile" => crate::config::build_info::profile()
    );

    Ok(())
}
