use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartridgeError {
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Unsupported Mapper: {0}")]
    UnsupportedMapper(u8),
}

pub type Result<T> = std::result::Result<T, CartridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_details() {
        let err = CartridgeError::InvalidHeader("PRG size mismatch".into());
        assert_eq!(err.to_string(), "Invalid header: PRG size mismatch");

        let err = CartridgeError::UnsupportedMapper(4);
        assert_eq!(err.to_string(), "Unsupported Mapper: 4");
    }
}
