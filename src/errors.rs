use failure::Fail;
use std::io;
use std::result::Result as StdResult;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Invalid arguments.")]
    Arguments(#[cause] clap::Error),

    #[fail(display = "Could not read WAD file `{}`.", _0)]
    Wad(String, #[cause] wad::Error),

    #[fail(display = "Could not load config file `{}`.", _0)]
    Config(String, #[cause] brush::Error),

    #[fail(display = "Could not write map file `{}`.", _0)]
    Write(String, #[cause] io::Error),

    #[fail(display = "None of the {} requested levels could be converted.", _0)]
    NothingConverted(usize),
}

impl From<clap::Error> for Error {
    fn from(error: clap::Error) -> Self {
        Error::Arguments(error)
    }
}

pub type Result<T> = StdResult<T, Error>;
