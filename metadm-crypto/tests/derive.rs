use hex_literal::hex;
use metadm_crypto::{
    derive_keys, derive_secret, scalar_base_mult, scalar_mult, Keypair, Nonce, Seed,
};
use proptest::prelude::*;

fn assert_keys(keys: &Keypair, secret: [u8; 32], public: [u8; 32]) {
    assert_eq!(keys.secret.as_bytes(), &secret);
    assert_eq!(keys.public.as_bytes(), &public);
}

#[test]
fn zero_seed_and_nonce_vector() {
    let keys = derive_keys(&Seed::new([0u8; 32]), &Nonce::new([0u8; 32]));
    assert_keys(
        &keys,
        hex!("27f892b0d6eaeee978d01785816cbc9af831c873064a1a8e32edba45bbc4fe34"),
        hex!("bc5744b696d5d36fab10413126ce53f845f4723db03fa2909a5a9d8005fd480e"),
    );
}

#[test]
fn non_utf8_nonce_vector() {
    let seed: [u8; 32] = core::array::from_fn(|i| i as u8);
    let nonce = hex!("ffc328e28241f09f9880eda080007f80c0aff4908080e0806162cebb20f88880");
    let keys = derive_keys(&Seed::new(seed), &Nonce::new(nonce));
    assert_keys(
        &keys,
        hex!("b054358a2681bc55ff25d2a886c5deba98e0117fe900921a353d2a30d4dfde88"),
        hex!("fe2e66be95145ae260dd2bf60e1fe768e5fdfe23f97733665889b3e012ca4075"),
    );
}

#[test]
fn fixed_pairs_agree_on_shared_secret() {
    let a = derive_keys(&Seed::new([1u8; 32]), &Nonce::new([2u8; 32]));
    let b = derive_keys(&Seed::new([3u8; 32]), &Nonce::new([4u8; 32]));
    assert_eq!(
        a.public.as_bytes(),
        &hex!("c1076cfe319ff5b88721cf07f6e83442083367cebdf93e17e437b4a4ae4c0d30")
    );
    assert_eq!(
        b.public.as_bytes(),
        &hex!("8270d6ec8966b86beca6ad571324a4d67492649cb31ff3bab46c9cf77840a73b")
    );

    let ab = scalar_mult(&a.secret, &b.public).unwrap();
    let ba = scalar_mult(&b.secret, &a.public).unwrap();
    assert_eq!(ab, ba);
    assert_eq!(
        ab.as_bytes(),
        &hex!("447c5d0b61a6896b555ed11c2ea1fbe15b0ba1252167011213df31e7cb506525")
    );
}

proptest! {
    #[test]
    fn derivation_is_deterministic(seed in any::<[u8; 32]>(), nonce in any::<[u8; 32]>()) {
        let (seed, nonce) = (Seed::new(seed), Nonce::new(nonce));
        prop_assert_eq!(derive_keys(&seed, &nonce), derive_keys(&seed, &nonce));
    }

    #[test]
    fn public_key_is_base_point_product(seed in any::<[u8; 32]>(), nonce in any::<[u8; 32]>()) {
        let keys = derive_keys(&Seed::new(seed), &Nonce::new(nonce));
        prop_assert_eq!(keys.public, scalar_base_mult(&keys.secret));
    }

    #[test]
    fn distinct_nonces_give_distinct_secrets(
        seed in any::<[u8; 32]>(),
        n1 in any::<[u8; 32]>(),
        n2 in any::<[u8; 32]>()
    ) {
        prop_assume!(String::from_utf8_lossy(&n1) != String::from_utf8_lossy(&n2));
        let seed = Seed::new(seed);
        prop_assert_ne!(
            derive_secret(&seed, &Nonce::new(n1)),
            derive_secret(&seed, &Nonce::new(n2))
        );
    }

    #[test]
    fn shared_secret_commutes(
        s1 in any::<[u8; 32]>(),
        n1 in any::<[u8; 32]>(),
        s2 in any::<[u8; 32]>(),
        n2 in any::<[u8; 32]>()
    ) {
        let a = derive_keys(&Seed::new(s1), &Nonce::new(n1));
        let b = derive_keys(&Seed::new(s2), &Nonce::new(n2));
        prop_assert_eq!(
            scalar_mult(&a.secret, &b.public).unwrap(),
            scalar_mult(&b.secret, &a.public).unwrap()
        );
    }
}
