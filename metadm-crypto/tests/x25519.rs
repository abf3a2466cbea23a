use hex_literal::hex;
use metadm_crypto::{scalar_base_mult, scalar_mult, PublicKey, SecretKey};

#[test]
fn rfc7748_x25519_shared_secret_matches() {
    // Alice private scalar (a) and Bob private scalar (b), RFC 7748 section 6.1
    let alice = SecretKey::new(hex!(
        "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a"
    ));
    let bob = SecretKey::new(hex!(
        "5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb"
    ));

    let alice_public = scalar_base_mult(&alice);
    let bob_public = scalar_base_mult(&bob);
    assert_eq!(
        alice_public,
        PublicKey::new(hex!("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a"))
    );
    assert_eq!(
        bob_public,
        PublicKey::new(hex!("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f"))
    );

    let shared1 = scalar_mult(&alice, &bob_public).unwrap();
    let shared2 = scalar_mult(&bob, &alice_public).unwrap();

    assert_eq!(shared1, shared2);

    let expected = hex!("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");
    assert_eq!(shared1.as_bytes(), &expected);
}
