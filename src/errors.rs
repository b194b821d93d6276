//!
//! Crate errors
//!
//! Each variant maps to one of the stable integer codes exchanged with
//! non-Rust callers. `Ok` is code 0.
//!

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("Value out of range: {0}")]
    OutOfRange(&'static str),
    #[error("Parse failed")]
    ParseFailed,
    #[error("Formatting failed")]
    Format,
    #[error("Allocation failed")]
    Memory,
    #[error("Invalid coordinate")]
    InvalidCoord,
    #[error("Invalid UTM zone")]
    InvalidUtmZone,
    #[error("No datum transformation path")]
    DatumTransform,
    #[error("Calculation did not converge")]
    Calculation,
    #[error("Unsupported output format")]
    UnsupportedFormat,
}

impl Error {
    /// Stable integer code, 0 being reserved for success.
    pub const fn code(&self) -> u32 {
        match self {
            Error::InvalidInput(_) => 1,
            Error::OutOfRange(_) => 2,
            Error::ParseFailed => 3,
            Error::Format => 4,
            Error::Memory => 5,
            Error::InvalidCoord => 6,
            Error::InvalidUtmZone => 7,
            Error::DatumTransform => 8,
            Error::Calculation => 9,
            Error::UnsupportedFormat => 10,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
