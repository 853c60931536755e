use std::path::{Path, PathBuf};

const EXPECTED_FORMAT: &str = "AccessKeyId=XXXX\nSecretKey=XXXX";

/// Access key pair read from a keys file
#[derive(Clone, PartialEq, Eq)]
pub struct Keys {
    pub access_key_id: String,
    pub secret_key: String,
}

impl std::fmt::Debug for Keys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keys")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"****")
            .finish()
    }
}

#[derive (thiserror::Error, Debug)]
pub enum CredentialsError {
    #[error("reading keys file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("credentials are not in the right format, the expected format is:\n{}", EXPECTED_FORMAT)]
    Malformed,
}

fn find_value<'a>(label: &str, text: &'a str) -> Option<&'a str> {
    let pattern = regex::RegexBuilder::new(&format!(r"{label}[=:]([^\n\r]+)"))
        .case_insensitive(true)
        .build()
        .ok()?;
    pattern.captures(text)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str())
}

impl Keys {
    /// Load keys from `path`; `None` means anonymous access
    pub fn load(path: Option<&Path>) -> Result<Option<Keys>, CredentialsError> {
        match path {
            Some(path) => Keys::from_file(path).map(Some),
            None => Ok(None),
        }
    }

    pub fn from_file(path: &Path) -> Result<Keys, CredentialsError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| CredentialsError::Read { path: path.to_owned(), source })?;
        text.parse()
    }
}

impl std::str::FromStr for Keys {
    type Err = CredentialsError;

    /// Labels match case-insensitively anywhere in the text, so
    /// `AWSAccessKeyId=` is accepted too; the first match wins.
    fn from_str(text: &str) -> Result<Keys, Self::Err> {
        let access_key_id = find_value("AccessKeyId", text).ok_or(CredentialsError::Malformed)?;
        let secret_key = find_value("SecretKey", text).ok_or(CredentialsError::Malformed)?;
        Ok(Keys {
            access_key_id: access_key_id.to_owned(),
            secret_key: secret_key.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(access: &str, secret: &str) -> Keys {
        Keys { access_key_id: access.to_owned(), secret_key: secret.to_owned() }
    }

    #[test]
    fn parses_equals_separator() {
        let parsed: Keys = "AccessKeyId=ABC\nSecretKey=XYZ".parse().unwrap();
        assert_eq!(parsed, keys("ABC", "XYZ"));
    }

    #[test]
    fn parses_colon_separator_any_order_and_case() {
        let parsed: Keys = "secretkey:s3cr3t/+=\r\naccesskeyid:AKIA123\r\n".parse().unwrap();
        assert_eq!(parsed, keys("AKIA123", "s3cr3t/+="));
    }

    #[test]
    fn parses_prefixed_labels() {
        let parsed: Keys = "AWSAccessKeyId=AKIA\nAWSSecretKey=abc123\n".parse().unwrap();
        assert_eq!(parsed, keys("AKIA", "abc123"));
    }

    #[test]
    fn keeps_rest_of_line_verbatim() {
        let parsed: Keys = "AccessKeyId= spaced value \nSecretKey==x".parse().unwrap();
        assert_eq!(parsed, keys(" spaced value ", "=x"));
    }

    #[test]
    fn skips_empty_value_for_later_match() {
        let parsed: Keys = "AccessKeyId=\nAccessKeyId=second\nSecretKey=s".parse().unwrap();
        assert_eq!(parsed.access_key_id, "second");
    }

    #[test]
    fn missing_secret_is_malformed() {
        let err = "AccessKeyId=ABC\n".parse::<Keys>().unwrap_err();
        assert!(matches!(err, CredentialsError::Malformed));
        assert!(err.to_string().contains("AccessKeyId=XXXX\nSecretKey=XXXX"));
    }

    #[test]
    fn missing_access_key_is_malformed() {
        assert!(matches!("SecretKey=XYZ".parse::<Keys>(), Err(CredentialsError::Malformed)));
    }

    #[test]
    fn empty_values_are_malformed() {
        assert!(matches!("AccessKeyId=\nSecretKey=".parse::<Keys>(), Err(CredentialsError::Malformed)));
    }

    #[test]
    fn wrong_separator_is_malformed() {
        assert!(matches!("AccessKeyId ABC\nSecretKey XYZ".parse::<Keys>(), Err(CredentialsError::Malformed)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.txt");
        std::fs::write(&path, "AccessKeyId=ABC\nSecretKey=XYZ").unwrap();
        assert_eq!(Keys::load(Some(path.as_path())).unwrap(), Some(keys("ABC", "XYZ")));
    }

    #[test]
    fn missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = Keys::from_file(&path).unwrap_err();
        assert!(matches!(err, CredentialsError::Read { .. }));
        assert!(err.to_string().contains("absent.txt"));
    }

    #[test]
    fn no_path_is_anonymous() {
        assert_eq!(Keys::load(None).unwrap(), None);
    }

    #[test]
    fn debug_hides_secret() {
        let rendered = format!("{:?}", keys("ABC", "XYZ"));
        assert!(rendered.contains("ABC"));
        assert!(!rendered.contains("XYZ"));
    }
}
