/// Prefix every configuration reference string starts with
pub const REFERENCE_PREFIX: &str = "ref:/configs/";
/// Reference collection naming a configuration's outputs
pub const OUTPUTS_COLLECTION: &str = "outputs";
/// Reference collection naming a configuration's inputs
pub const INPUTS_COLLECTION: &str = "inputs";
/// Placeholder returned when no input field carries a given reference
pub const UNKNOWN_INPUT: &str = "unknown_input";
/// Catalog constraint meaning "latest available version"
pub const LATEST_VERSION_CONSTRAINT: &str = "*";
