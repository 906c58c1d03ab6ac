//! Command-line surface.
//!
//! Flags mirror the classic tool invocation: a mode, the sensitive-field
//! list, the current and prior documents inline as JSON, and the output
//! path for encrypt mode. An unrecognized mode is rejected here, before
//! any pipeline work begins.

use clap::Parser;

use crate::pipeline::Action;
use crate::transform::DEFAULT_PROGRAM;

#[derive(Parser, Debug)]
#[command(
    name = "confseal",
    version,
    about = "Seal or unseal sensitive fields of a JSON configuration document"
)]
pub struct Cli {
    /// Pipeline direction
    #[arg(long, value_enum)]
    pub mode: Action,

    /// Comma-separated sensitive field names; empty transforms nothing
    #[arg(long, default_value = "")]
    pub fields: String,

    /// Current config document (JSON object)
    #[arg(long = "new")]
    pub current: String,

    /// Prior config document (JSON object); required when encrypting
    #[arg(long = "old")]
    pub prior: Option<String>,

    /// Output file path (encrypt mode)
    #[arg(long, default_value = "")]
    pub out: String,

    /// External transform program invoked per field value
    #[arg(long = "transform-cmd", default_value = DEFAULT_PROGRAM)]
    pub transform_cmd: String,
}
