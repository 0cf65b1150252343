use core::convert::Infallible;

use display_interface::DisplayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("peripherals already initialized")]
    AlreadyTaken,
    #[error("display interface error: {0:?}")]
    Display(DisplayError),
}

impl From<DisplayError> for Error {
    fn from(error: DisplayError) -> Self {
        Error::Display(error)
    }
}

impl From<Infallible> for Error {
    fn from(_error: Infallible) -> Self {
        unreachable!()
    }
}
