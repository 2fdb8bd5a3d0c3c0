use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jwe_dir_core::jwe::{DirectDecrypter, DirectEncrypter, JweError, JweHeader, JweParts};
use jwe_dir_core::{AeadError, AlgorithmSuite};

fn key_for(suite: AlgorithmSuite) -> Vec<u8> {
    (0..suite.combined_key_len()).map(|i| i as u8).collect()
}

#[test]
fn every_suite_round_trips_through_compact_form() {
    for suite in AlgorithmSuite::ALL {
        let key = key_for(suite);
        let token = DirectEncrypter::new(&key)
            .unwrap()
            .encrypt_compact(&JweHeader::new(suite), b"Hello, world!")
            .unwrap();

        let parsed = JweParts::parse(&token).unwrap();
        assert_eq!(parsed.header.enc, suite.name());
        assert!(parsed.encrypted_key.is_empty());
        assert_eq!(parsed.iv.len(), 16);
        assert_eq!(parsed.tag.len(), suite.truncated_tag_len());

        let pt = DirectDecrypter::new(&key)
            .unwrap()
            .decrypt_compact(&token)
            .unwrap();
        assert_eq!(pt.as_slice(), b"Hello, world!");
    }
}

#[test]
fn header_is_the_associated_data() {
    let key = key_for(AlgorithmSuite::A128CbcHs256);
    let parts = DirectEncrypter::new(&key)
        .unwrap()
        .encrypt(&JweHeader::new(AlgorithmSuite::A128CbcHs256), b"payload")
        .unwrap();

    let pt = jwe_dir_core::decrypt(
        AlgorithmSuite::A128CbcHs256,
        &key,
        parts.protected.as_bytes(),
        &parts.iv,
        &parts.ciphertext,
        &parts.tag,
    )
    .unwrap();
    assert_eq!(pt.as_slice(), b"payload");
}

#[test]
fn gcm_methods_are_rejected_before_encryption() {
    let key = [0u8; 32];
    let encrypter = DirectEncrypter::new(&key).unwrap();
    for enc in ["A128GCM", "A192GCM", "A256GCM", "XC20P"] {
        let mut header = JweHeader::new(AlgorithmSuite::A128CbcHs256);
        header.enc = enc.into();
        let err = encrypter.encrypt(&header, b"x").unwrap_err();
        assert!(
            matches!(err, JweError::Aead(AeadError::UnsupportedAlgorithm(_))),
            "{enc}: {err}"
        );
    }
}

#[test]
fn key_wrapping_algorithms_are_rejected() {
    let key = [0u8; 32];
    let mut header = JweHeader::new(AlgorithmSuite::A128CbcHs256);
    header.alg = "RSA-OAEP".into();
    let err = DirectEncrypter::new(&key)
        .unwrap()
        .encrypt(&header, b"x")
        .unwrap_err();
    assert!(matches!(
        err,
        JweError::Aead(AeadError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn tampering_with_any_part_is_detected() {
    let key = key_for(AlgorithmSuite::A192CbcHs384);
    let token = DirectEncrypter::new(&key)
        .unwrap()
        .encrypt_compact(&JweHeader::new(AlgorithmSuite::A192CbcHs384), b"do not touch")
        .unwrap();
    let decrypter = DirectDecrypter::new(&key).unwrap();

    for part in [2usize, 3, 4] {
        let mut fields: Vec<String> = token.split('.').map(str::to_owned).collect();
        let mut raw = URL_SAFE_NO_PAD.decode(&fields[part]).unwrap();
        raw[0] ^= 0x01;
        fields[part] = URL_SAFE_NO_PAD.encode(raw);
        let err = decrypter.decrypt_compact(&fields.join(".")).unwrap_err();
        assert!(
            matches!(err, JweError::Aead(AeadError::AuthenticationFailed)),
            "part {part}: {err}"
        );
    }
}

#[test]
fn wrong_key_fails_authentication() {
    let token = DirectEncrypter::new(&[1u8; 32])
        .unwrap()
        .encrypt_compact(&JweHeader::new(AlgorithmSuite::A128CbcHs256), b"secret")
        .unwrap();
    let err = DirectDecrypter::new(&[2u8; 32])
        .unwrap()
        .decrypt_compact(&token)
        .unwrap_err();
    assert!(matches!(err, JweError::Aead(AeadError::AuthenticationFailed)));
}

#[test]
fn key_for_other_suite_is_a_length_error() {
    let token = DirectEncrypter::new(&[1u8; 64])
        .unwrap()
        .encrypt_compact(&JweHeader::new(AlgorithmSuite::A256CbcHs512), b"secret")
        .unwrap();
    let err = DirectDecrypter::new(&[1u8; 32])
        .unwrap()
        .decrypt_compact(&token)
        .unwrap_err();
    assert!(matches!(
        err,
        JweError::Aead(AeadError::KeyLength {
            expected_bits: 512,
            actual_bits: 256
        })
    ));
}

#[test]
fn compressed_payload_round_trips() {
    let key = key_for(AlgorithmSuite::A128CbcHs256);
    let payload = r#"{"sub":"alice","scope":"read write","scope2":"read write"}"#.repeat(20);
    let header = JweHeader::new(AlgorithmSuite::A128CbcHs256)
        .with_deflate()
        .with_content_type("JWT");
    let token = DirectEncrypter::new(&key)
        .unwrap()
        .encrypt_compact(&header, payload.as_bytes())
        .unwrap();
    assert_eq!(JweParts::parse(&token).unwrap().header.zip.as_deref(), Some("DEF"));
    let pt = DirectDecrypter::new(&key)
        .unwrap()
        .decrypt_compact(&token)
        .unwrap();
    assert_eq!(pt.as_slice(), payload.as_bytes());
}

#[test]
fn token_with_critical_header_is_rejected() {
    let key = key_for(AlgorithmSuite::A128CbcHs256);
    let token = DirectEncrypter::new(&key)
        .unwrap()
        .encrypt_compact(&JweHeader::new(AlgorithmSuite::A128CbcHs256), b"payload")
        .unwrap();
    let mut fields: Vec<String> = token.split('.').map(str::to_owned).collect();
    fields[0] = URL_SAFE_NO_PAD.encode(r#"{"alg":"dir","enc":"A128CBC-HS256","crit":["exp"]}"#);

    let err = DirectDecrypter::new(&key)
        .unwrap()
        .decrypt_compact(&fields.join("."))
        .unwrap_err();
    assert!(matches!(err, JweError::UnsupportedCritical(_)), "{err}");
}
