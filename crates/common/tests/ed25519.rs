//! Ed25519 tasks executed on the worker thread

mod common;

use ::common::crypto::{KeyMaterial, KeyPair};
use ::common::{derive_keypair_sync, sign_sync, verify_sync, Error};

use self::common::*;

#[test]
fn test_derive_keypair_sync_matches_vector() {
    let pair = derive_keypair_sync(&bytes(SEED)).unwrap();
    assert_eq!(pair.public_key.to_hex(), PUBLIC_KEY);
    assert_eq!(pair.private_key.to_hex(), PRIVATE_KEY);
    assert_eq!(pair, derive_keypair_sync(&bytes(SEED)).unwrap());
}

#[test]
fn test_sign_sync_then_verify_sync() {
    let pair = derive_keypair_sync(&bytes(SEED)).unwrap();
    let signature = sign_sync(MESSAGE, &KeyMaterial::from(&pair)).unwrap();
    assert_eq!(hex::encode(signature.to_bytes()), SIGNATURE);
    assert!(verify_sync(MESSAGE, &signature.to_bytes(), &pair.public_key.to_bytes()).unwrap());
}

#[tokio::test]
async fn test_sign_with_seed() {
    let thread = setup_thread();
    let signature = thread
        .sign(MESSAGE, KeyMaterial::Seed(bytes(SEED)))
        .await
        .unwrap();
    assert_eq!(hex::encode(signature.to_bytes()), SIGNATURE);
}

#[tokio::test]
async fn test_sign_with_keypair_and_private_key() {
    let thread = setup_thread();

    let with_pair = thread
        .sign(
            MESSAGE,
            KeyMaterial::KeyPair {
                private_key: bytes(PRIVATE_KEY),
                public_key: bytes(PUBLIC_KEY),
            },
        )
        .await
        .unwrap();
    assert_eq!(hex::encode(with_pair.to_bytes()), SIGNATURE);

    let with_private = thread
        .sign(MESSAGE, KeyMaterial::from_bytes(bytes(PRIVATE_KEY)).unwrap())
        .await
        .unwrap();
    assert_eq!(with_private, with_pair);
}

#[tokio::test]
async fn test_verify_valid_and_invalid() {
    let thread = setup_thread();

    let valid = thread
        .verify(MESSAGE, bytes(SIGNATURE), bytes(PUBLIC_KEY))
        .await
        .unwrap();
    assert!(valid);

    let mut invalid = bytes(SIGNATURE);
    invalid[0] = invalid[0].wrapping_sub(1);
    let valid = thread
        .verify(MESSAGE, invalid, bytes(PUBLIC_KEY))
        .await
        .unwrap();
    assert!(!valid);
}

#[tokio::test]
async fn test_malformed_inputs_are_errors() {
    let thread = setup_thread();

    let err = thread
        .verify(MESSAGE, vec![0u8; 10], bytes(PUBLIC_KEY))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidArgumentLength {
            what: "signature",
            ..
        }
    ));

    let err = thread
        .sign(MESSAGE, KeyMaterial::Seed(vec![1u8; 12]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidKeyMaterial(_)));
}

#[tokio::test]
async fn test_round_trip_through_worker() {
    let thread = setup_thread();
    for i in 0..16u8 {
        let pair = KeyPair::generate();
        let message = vec![i; i as usize * 7];
        let signature = thread.sign(message.clone(), &pair).await.unwrap();
        let sync = sign_sync(&message, &KeyMaterial::from(&pair)).unwrap();
        assert_eq!(signature, sync);
        assert!(thread
            .verify(message, signature.to_bytes(), pair.public_key.to_bytes())
            .await
            .unwrap());
    }
}

#[test]
fn test_callback_style_sign() {
    let thread = setup_thread();
    let (tx, rx) = std::sync::mpsc::channel();
    thread.submit_sign(MESSAGE, KeyMaterial::Seed(bytes(SEED)), move |res| {
        tx.send(res).unwrap();
    });
    let signature = rx.recv().unwrap().unwrap();
    assert_eq!(hex::encode(signature.to_bytes()), SIGNATURE);
}

#[tokio::test]
async fn test_worker_signs_expanded_key_as_given() {
    let thread = setup_thread();
    let mut private_key = bytes(PRIVATE_KEY);
    private_key[63] ^= 1;
    let material = KeyMaterial::PrivateKey(private_key);

    let signature = thread.sign(MESSAGE, material.clone()).await.unwrap();
    assert_eq!(signature, sign_sync(MESSAGE, &material).unwrap());
    assert_ne!(hex::encode(signature.to_bytes()), SIGNATURE);
}

#[tokio::test]
async fn test_worker_verify_accepts_identity_key() {
    let thread = setup_thread();
    let mut identity = vec![0u8; 32];
    identity[0] = 1;
    let mut signature = identity.clone();
    signature.resize(64, 0);

    assert!(thread
        .verify(b"anything".to_vec(), signature.clone(), identity.clone())
        .await
        .unwrap());
    assert_eq!(verify_sync(b"anything", &signature, &identity), Ok(true));
}
