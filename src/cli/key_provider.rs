//! Key-provider command.
//!
//! Hands the resolved recipients (and, on request, private keys) to SOPS
//! instead of encrypting anything itself.

use std::io::{Read, Write};

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::{KEY_PROVIDER_HEADER, RECIPIENT_META_PREFIX};
use crate::core::protocol::{self, KeyProviderRequest, KeyProviderResponse, Keys, Meta};
use crate::core::recipient::Deriver;
use crate::core::resolver::Resolver;
use crate::core::source::Source;
use crate::core::types::KeyPair;
use crate::error::Result;

/// Handle one key-provider exchange.
///
/// Both private keys and recipients must resolve. The decryption key is only
/// returned when the request carries `external_data`.
pub fn run<R, W, S, D>(input: &mut R, output: &mut W, resolver: &Resolver<S, D>) -> Result<()>
where
    R: Read,
    W: Write,
    S: Source,
    D: Deriver,
{
    protocol::write_header(output, KEY_PROVIDER_HEADER)?;

    let request: KeyProviderRequest = protocol::read_request(input)?;

    let pairs = resolver.private_keys()?;
    let recipients = resolver.recipients()?;

    let decryption_key = request.external_data.as_ref().map(|_| {
        let joined = Zeroizing::new(
            pairs
                .iter()
                .map(KeyPair::key)
                .collect::<Vec<_>>()
                .join(","),
        );
        protocol::encode(joined.as_bytes())
    });

    let external_data = recipients
        .iter()
        .enumerate()
        .map(|(i, r)| (format!("{}{}", RECIPIENT_META_PREFIX, i), r.clone()))
        .collect();

    let response = KeyProviderResponse {
        keys: Keys {
            encryption_key: protocol::encode(recipients.join(",").as_bytes()),
            decryption_key,
        },
        meta: Some(Meta { external_data }),
    };
    debug!(
        recipients = recipients.len(),
        decryption_key = response.keys.decryption_key.is_some(),
        "key provider output"
    );
    protocol::write_response(output, &response)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::core::source::fake::FakeSource;
    use crate::error::{CredentialError, Error};

    /// Derives `pub-<key>`.
    struct Prefix;

    impl Deriver for Prefix {
        fn derive(&self, key: &str) -> std::result::Result<String, CredentialError> {
            Ok(format!("pub-{}", key))
        }
    }

    fn exchange(request: &str, source: FakeSource) -> (String, Result<()>) {
        let resolver = Resolver::new(source, Prefix);
        let mut input = request.as_bytes();
        let mut output = Vec::new();
        let result = run(&mut input, &mut output, &resolver);
        (String::from_utf8(output).unwrap(), result)
    }

    fn body(stdout: &str) -> Value {
        let mut lines = stdout.lines();
        assert_eq!(lines.next(), Some("KeyProvider"));
        serde_json::from_str(lines.next().unwrap()).unwrap()
    }

    fn decode(value: &Value) -> String {
        protocol::decode_text("test", value.as_str().unwrap()).unwrap()
    }

    #[test]
    fn test_key_provider_without_external_data() {
        let source = FakeSource::new().with_var("AGE_KEY", "k1\nk2");

        let (stdout, result) = exchange(r#"{"external_data":null}"#, source);
        result.unwrap();

        let value = body(&stdout);
        assert_eq!(decode(&value["keys"]["encryption_key"]), "pub-k1,pub-k2");
        assert!(value["keys"].get("decryption_key").is_none());
        assert_eq!(value["meta"]["external_data"]["recipient-0"], "pub-k1");
        assert_eq!(value["meta"]["external_data"]["recipient-1"], "pub-k2");
        assert_eq!(value["meta"]["external_data"].as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_key_provider_with_external_data_returns_private_keys() {
        let source = FakeSource::new()
            .with_var("AGE_KEY_FILE", "/keys")
            .with_file("/keys", "# comment\nk1\nk2\n");

        let (stdout, result) = exchange(r#"{"external_data":{"any":"thing"}}"#, source);
        result.unwrap();

        let value = body(&stdout);
        assert_eq!(decode(&value["keys"]["decryption_key"]), "k1,k2");
        assert_eq!(decode(&value["keys"]["encryption_key"]), "pub-k1,pub-k2");
    }

    #[test]
    fn test_key_provider_empty_external_data_still_counts() {
        let source = FakeSource::new().with_var("AGE_KEY", "k1");

        let (stdout, result) = exchange(r#"{"external_data":{}}"#, source);
        result.unwrap();
        assert_eq!(decode(&body(&stdout)["keys"]["decryption_key"]), "k1");
    }

    #[test]
    fn test_key_provider_meta_matches_encryption_key() {
        let keys: Vec<String> = (0..12).map(|i| format!("k{}", i)).collect();
        let source = FakeSource::new().with_var("SOPS_AGE_KEY", &keys.join("\n"));

        let (stdout, result) = exchange("{}", source);
        result.unwrap();

        let value = body(&stdout);
        let encryption_key = decode(&value["keys"]["encryption_key"]);
        let meta = value["meta"]["external_data"].as_object().unwrap();
        assert_eq!(meta.len(), keys.len());
        for (i, recipient) in encryption_key.split(',').enumerate() {
            assert_eq!(meta[&format!("recipient-{}", i)], recipient);
        }
    }

    #[test]
    fn test_key_provider_requires_private_keys() {
        let source = FakeSource::new().with_var("AGE_RECIPIENTS", "age1only");

        let (stdout, result) = exchange(r#"{"external_data":null}"#, source);
        assert!(matches!(
            result.unwrap_err(),
            Error::Credential(CredentialError::NotFound { .. })
        ));
        assert_eq!(stdout, "KeyProvider\n");
    }

    #[test]
    fn test_key_provider_invalid_json() {
        let source = FakeSource::new().with_var("AGE_KEY", "k1");

        let (stdout, result) = exchange("nope", source);
        assert!(result.is_err());
        assert_eq!(stdout, "KeyProvider\n");
    }
}
