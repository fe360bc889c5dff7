//! File encode/decode operations
//!
//! Reads a text file, runs it through the grid described by a
//! [`Config`], and writes the result.

use crate::config::Config;
use crate::error::{ErrorCategory, ErrorKind, PlayfairError, Result};
use crate::key::{KeyReader, strip_line_ending};
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Encode a text file
///
/// Reads plaintext from `input_path`, encodes it with the grid built from
/// `config` and the key from `key_reader`, and writes the ciphertext to
/// `output_path`.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn encode_file(
    input_path: &Path,
    output_path: &Path,
    config: &Config,
    key_reader: &mut dyn KeyReader,
) -> Result<()> {
    let plaintext = read_text(input_path)?;
    let config = resolve_key(config, key_reader)?;
    let encoder = config
        .encoder()
        .map_err(|e| e.with_context("failed to build grid"))?;
    let ciphertext = encoder
        .encode(&plaintext)
        .map_err(|e| e.with_context("encoding failed"))?;
    write_file_secure(output_path, ciphertext.as_bytes())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;

    debug!(
        "encoded {} chars from {} into {} chars at {}",
        plaintext.chars().count(),
        input_path.display(),
        ciphertext.chars().count(),
        output_path.display()
    );
    Ok(())
}

/// Decode a text file
///
/// Reads ciphertext from `input_path`, decodes it with the grid built from
/// `config` and the key from `key_reader`, strips the separator, and
/// writes the plaintext to `output_path`.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn decode_file(
    input_path: &Path,
    output_path: &Path,
    config: &Config,
    key_reader: &mut dyn KeyReader,
) -> Result<()> {
    let ciphertext = read_text(input_path)?;
    let config = resolve_key(config, key_reader)?;
    let decoder = config
        .decoder()
        .map_err(|e| e.with_context("failed to build grid"))?;
    let plaintext = decoder
        .decode(&ciphertext)
        .map_err(|e| e.with_context("decoding failed"))?;
    write_file_secure(output_path, plaintext.as_bytes())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;

    debug!(
        "decoded {} chars from {} into {} chars at {}",
        ciphertext.chars().count(),
        input_path.display(),
        plaintext.chars().count(),
        output_path.display()
    );
    Ok(())
}

fn resolve_key(config: &Config, key_reader: &mut dyn KeyReader) -> Result<Config> {
    let key = key_reader.read_key()?;
    Ok(config.clone().with_key(key.as_str()))
}

/// Read a UTF-8 text file, dropping one trailing line terminator.
fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| read_error(path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        PlayfairError::with_kind_and_source(
            ErrorCategory::Input,
            ErrorKind::Io,
            format!("{} is not valid UTF-8", path.display()),
            e,
        )
    })?;
    Ok(strip_line_ending(&text).to_string())
}

/// Write file with secure permissions (0o600 on Unix)
fn write_file_secure(path: &Path, contents: &[u8]) -> Result<()> {
    #[cfg(unix)]
    {
        use std::fs::OpenOptions;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .map_err(|e| {
                PlayfairError::with_kind_and_source(
                    ErrorCategory::Input,
                    ErrorKind::Io,
                    format!("failed to open {}", path.display()),
                    e,
                )
            })?;

        file.write_all(contents).map_err(|e| {
            PlayfairError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents).map_err(|e| {
            PlayfairError::with_kind_and_source(
                ErrorCategory::Input,
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }
}

fn read_error(path: &Path, err: io::Error) -> PlayfairError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::Input
    } else {
        ErrorCategory::Internal
    };
    PlayfairError::with_kind_and_source(
        category,
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::ConstantKeyReader;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    fn stored_key(config: &Config) -> ConstantKeyReader {
        ConstantKeyReader::new(config.grid_config.key.clone())
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("plain.txt");
        let crypt_path = temp_dir.path().join("crypt.txt");
        let decoded_path = temp_dir.path().join("decoded.txt");

        fs::write(&plain_path, "hello, playfair!\n").unwrap();

        let config = Config::english();
        encode_file(&plain_path, &crypt_path, &config, &mut stored_key(&config)).unwrap();
        let ciphertext = fs::read_to_string(&crypt_path).unwrap();
        assert_ne!(ciphertext, "hello, playfair!");
        assert_eq!(ciphertext.chars().count() % 2, 0);

        decode_file(&crypt_path, &decoded_path, &config, &mut stored_key(&config)).unwrap();
        let decoded = fs::read_to_string(&decoded_path).unwrap();
        assert_eq!(decoded, "hello, playfair!");
    }

    #[test]
    fn test_key_reader_overrides_config() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("plain.txt");
        let default_path = temp_dir.path().join("default.txt");
        let keyed_path = temp_dir.path().join("keyed.txt");
        let decoded_path = temp_dir.path().join("decoded.txt");

        fs::write(&plain_path, "attack at dawn").unwrap();
        let config = Config::english();

        encode_file(&plain_path, &default_path, &config, &mut stored_key(&config)).unwrap();
        let mut reader = ConstantKeyReader::new("monarchy");
        encode_file(&plain_path, &keyed_path, &config, &mut reader).unwrap();
        assert_ne!(
            fs::read_to_string(&default_path).unwrap(),
            fs::read_to_string(&keyed_path).unwrap()
        );

        let mut reader = ConstantKeyReader::new("monarchy");
        decode_file(&keyed_path, &decoded_path, &config, &mut reader).unwrap();
        assert_eq!(fs::read_to_string(&decoded_path).unwrap(), "attack at dawn");
    }

    #[test]
    fn test_bad_key_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("plain.txt");
        let crypt_path = temp_dir.path().join("crypt.txt");
        fs::write(&plain_path, "text").unwrap();

        let mut reader = ConstantKeyReader::new("JJJ");
        let err =
            encode_file(&plain_path, &crypt_path, &Config::english(), &mut reader).unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
        assert_eq!(err.category, ErrorCategory::Config);
        assert!(!crypt_path.exists());
    }

    #[test]
    fn test_separator_in_plaintext() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("plain.txt");
        let crypt_path = temp_dir.path().join("crypt.txt");
        fs::write(&plain_path, "item #1").unwrap();

        let config = Config::english();
        let err =
            encode_file(&plain_path, &crypt_path, &config, &mut stored_key(&config)).unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::SeparatorInInput));
        assert_eq!(err.category, ErrorCategory::Input);
    }

    #[test]
    fn test_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::english();
        let err = decode_file(
            &temp_dir.path().join("absent.txt"),
            &temp_dir.path().join("out.txt"),
            &config,
            &mut stored_key(&config),
        )
        .unwrap_err();
        assert_eq!(err.kind, Some(ErrorKind::Io));
        assert_eq!(err.category, ErrorCategory::Input);
    }

    #[test]
    #[cfg(unix)]
    fn test_file_permissions() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("plain.txt");
        let crypt_path = temp_dir.path().join("crypt.txt");

        fs::write(&plain_path, b"test").unwrap();
        let config = Config::english();
        encode_file(&plain_path, &crypt_path, &config, &mut stored_key(&config)).unwrap();

        let metadata = fs::metadata(&crypt_path).unwrap();
        let permissions = metadata.permissions();
        assert_eq!(permissions.mode() & 0o777, 0o600);
    }

    #[test]
    fn test_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("empty.txt");
        let crypt_path = temp_dir.path().join("empty.crypt");
        let decoded_path = temp_dir.path().join("decoded.txt");

        fs::write(&plain_path, b"").unwrap();
        let config = Config::english();
        encode_file(&plain_path, &crypt_path, &config, &mut stored_key(&config)).unwrap();
        decode_file(&crypt_path, &decoded_path, &config, &mut stored_key(&config)).unwrap();

        assert_eq!(fs::read(&decoded_path).unwrap(), b"");
    }
}
