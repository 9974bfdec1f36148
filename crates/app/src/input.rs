//! Argument coercion: CLI strings into the raw bytes the worker accepts.

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid hex for {what}: {source}")]
    Hex {
        what: &'static str,
        #[source]
        source: hex::FromHexError,
    },
}

/// Decode a hex argument, accepting an optional "0x" prefix
pub fn hex_arg(value: &str, what: &'static str) -> Result<Vec<u8>, InputError> {
    let value = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(value).map_err(|source| InputError::Hex { what, source })
}

/// Message or data argument: UTF-8 bytes, or hex when `as_hex` is set
pub fn data_arg(value: &str, as_hex: bool, what: &'static str) -> Result<Vec<u8>, InputError> {
    if as_hex {
        hex_arg(value, what)
    } else {
        Ok(value.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_arg_prefix() {
        assert_eq!(hex_arg("0xdead", "x").unwrap(), vec![0xde, 0xad]);
        assert_eq!(hex_arg("beef", "x").unwrap(), vec![0xbe, 0xef]);
        assert!(hex_arg("xyz", "x").is_err());
    }

    #[test]
    fn test_data_arg_modes() {
        assert_eq!(data_arg("test", false, "message").unwrap(), b"test".to_vec());
        assert_eq!(data_arg("74657374", true, "message").unwrap(), b"test".to_vec());
    }
}
