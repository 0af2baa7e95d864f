use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum AuthError {
    #[error("the password must be at least {0} characters long")]
    TooShort(usize),

    #[error("wrong password")]
    WrongPassword,
}
