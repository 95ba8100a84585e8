use failchain::{BoxedError, ChainErrorKind};
use failure::Fail;
use std::result::Result as StdResult;

pub type Error = BoxedError<ErrorKind>;
pub type Result<T> = StdResult<T, Error>;

#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    #[fail(display = "Could not decode level `{}`: {}", level, error)]
    Decode {
        level: String,
        error: wad::ErrorKind,
    },

    #[fail(
        display = "Boundary of sector {} is not a simple loop: {} edges left unmatched.",
        sector, unmatched
    )]
    Topology { sector: usize, unmatched: usize },

    #[fail(display = "Triangulation of sector {} failed: {}", sector, message)]
    Triangulation { sector: usize, message: String },

    #[fail(display = "Invalid conversion config: {}", _0)]
    Config(String),

    #[fail(display = "I/O error: {}", _0)]
    Io(String),
}

impl ChainErrorKind for ErrorKind {
    type Error = Error;
}

impl ErrorKind {
    pub(crate) fn decode_level<NameT: Into<String>>(level: NameT, error: &wad::Error) -> Self {
        ErrorKind::Decode {
            level: level.into(),
            error: error.kind().clone(),
        }
    }

    pub(crate) fn on_config_read() -> Self {
        ErrorKind::Io("Failed to read config file.".to_owned())
    }

    pub(crate) fn on_config_parse() -> Self {
        ErrorKind::Config("Failed to parse config file.".to_owned())
    }

    pub(crate) fn triangulation<MessageT: Into<String>>(sector: usize, message: MessageT) -> Self {
        ErrorKind::Triangulation {
            sector,
            message: message.into(),
        }
    }
}
