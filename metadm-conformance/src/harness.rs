#![forbid(unsafe_code)]

//! Validation harness for derivation and agreement.
//!
//! Each [`Property`] is checked against a [`Case`] made of two independently drawn
//! seed/nonce pairs. The harness runs the registered properties over
//! `random_rounds` random cases, then derives the fixed conformance pair, checks it
//! the same way and writes the artifact. The first failing property aborts the run
//! with [`MetadmError::InvariantViolation`].

use rand_core::{CryptoRng, RngCore};
use std::path::PathBuf;
use tracing::{debug, error, info};

use metadm_core::{MetadmError, MetadmResult, VectorConfig};
use metadm_crypto::kdf::dm_info;
use metadm_crypto::{
    derive_keys, derive_keys_from_slices, scalar_base_mult, scalar_mult, scalar_mult_slices,
    CryptoError, Nonce, Seed, KEY_LENGTH,
};

use crate::vector::TestVector;

/// Seed of the published conformance vector.
pub const FIXED_SEED: [u8; KEY_LENGTH] = [0u8; KEY_LENGTH];
/// Nonce of the published conformance vector.
pub const FIXED_NONCE: [u8; KEY_LENGTH] = [0u8; KEY_LENGTH];

/// Buffer lengths that must be refused by every length-checked entry point.
const BAD_LENGTHS: [usize; 5] = [0, 1, 31, 33, 64];

/// Result of a property check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyResult {
    Passed,
    Failed(String),
}

impl PropertyResult {
    /// Turn a failure into an [`MetadmError::InvariantViolation`] for `property`.
    pub fn into_result(self, property: &str) -> MetadmResult<()> {
        match self {
            PropertyResult::Passed => Ok(()),
            PropertyResult::Failed(detail) => Err(MetadmError::invariant(property, detail)),
        }
    }

    fn check(ok: bool, detail: impl FnOnce() -> String) -> Self {
        if ok {
            PropertyResult::Passed
        } else {
            PropertyResult::Failed(detail())
        }
    }
}

/// Two independently drawn derivation inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub a: (Seed, Nonce),
    pub b: (Seed, Nonce),
}

impl Case {
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self {
            a: (Seed::random(rng), Nonce::random(rng)),
            b: (Seed::random(rng), Nonce::random(rng)),
        }
    }
}

/// A checkable invariant of derivation or agreement.
pub trait Property: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn test(&self, case: &Case) -> PropertyResult;
}

/// Deriving the same pair twice yields byte-identical keys.
pub fn check_determinism(seed: &Seed, nonce: &Nonce) -> PropertyResult {
    let first = derive_keys(seed, nonce);
    let second = derive_keys(seed, nonce);
    PropertyResult::check(first == second, || {
        format!("derivation for seed {:?} is not reproducible", seed.as_bytes())
    })
}

/// Distinct inputs yield distinct secrets.
///
/// Nonces are compared by their HKDF info encoding: two nonces that differ only
/// inside invalid UTF-8 runs collapse to the same info and are skipped.
pub fn check_distinctness(a: &(Seed, Nonce), b: &(Seed, Nonce)) -> PropertyResult {
    if a.0 == b.0 && dm_info(&a.1) == dm_info(&b.1) {
        return PropertyResult::Passed;
    }
    let sa = derive_keys(&a.0, &a.1).secret;
    let sb = derive_keys(&b.0, &b.1).secret;
    PropertyResult::check(sa != sb, || "distinct inputs derived the same secret".to_string())
}

/// The derived public key is the base point product of the derived secret.
pub fn check_fixed_base(seed: &Seed, nonce: &Nonce) -> PropertyResult {
    let keys = derive_keys(seed, nonce);
    PropertyResult::check(keys.public == scalar_base_mult(&keys.secret), || {
        format!("public key {:?} is not the base point product", keys.public.as_bytes())
    })
}

/// Both directions of the agreement produce the same shared secret.
pub fn check_commutativity(a: &(Seed, Nonce), b: &(Seed, Nonce)) -> PropertyResult {
    let ka = derive_keys(&a.0, &a.1);
    let kb = derive_keys(&b.0, &b.1);
    match (scalar_mult(&ka.secret, &kb.public), scalar_mult(&kb.secret, &ka.public)) {
        (Ok(ab), Ok(ba)) => PropertyResult::check(ab == ba, || {
            format!(
                "shared secrets differ for peers {:?} and {:?}",
                ka.public.as_bytes(),
                kb.public.as_bytes()
            )
        }),
        (Err(e), _) | (_, Err(e)) => PropertyResult::Failed(format!("agreement failed: {e}")),
    }
}

/// Every length-checked entry point refuses buffers that are not 32 bytes.
pub fn check_lengths(seed: &Seed, nonce: &Nonce) -> PropertyResult {
    let keys = derive_keys(seed, nonce);
    let is_length_error =
        |r: Result<_, CryptoError>| matches!(r, Err(CryptoError::InvalidInputLength { .. }));

    for len in BAD_LENGTHS {
        let bad: Vec<u8> = seed.as_bytes().iter().copied().cycle().take(len).collect();
        let refused = is_length_error(derive_keys_from_slices(&bad, nonce.as_bytes()).map(|_| ()))
            && is_length_error(derive_keys_from_slices(seed.as_bytes(), &bad).map(|_| ()))
            && is_length_error(scalar_mult_slices(&bad, keys.public.as_bytes()).map(|_| ()))
            && is_length_error(scalar_mult_slices(keys.secret.as_bytes(), &bad).map(|_| ()));
        if !refused {
            return PropertyResult::Failed(format!("{len}-byte buffer was accepted"));
        }
    }
    PropertyResult::Passed
}

struct Determinism;
struct Distinctness;
struct FixedBase;
struct Commutativity;
struct LengthValidation;

impl Property for Determinism {
    fn name(&self) -> &'static str {
        "determinism"
    }

    fn description(&self) -> &'static str {
        "identical seed and nonce always derive identical keys"
    }

    fn test(&self, case: &Case) -> PropertyResult {
        match check_determinism(&case.a.0, &case.a.1) {
            PropertyResult::Passed => check_determinism(&case.b.0, &case.b.1),
            failed => failed,
        }
    }
}

impl Property for Distinctness {
    fn name(&self) -> &'static str {
        "distinctness"
    }

    fn description(&self) -> &'static str {
        "distinct seed or nonce derives a distinct secret"
    }

    fn test(&self, case: &Case) -> PropertyResult {
        check_distinctness(&case.a, &case.b)
    }
}

impl Property for FixedBase {
    fn name(&self) -> &'static str {
        "fixed-base consistency"
    }

    fn description(&self) -> &'static str {
        "public key equals scalarBaseMult(secret)"
    }

    fn test(&self, case: &Case) -> PropertyResult {
        check_fixed_base(&case.a.0, &case.a.1)
    }
}

impl Property for Commutativity {
    fn name(&self) -> &'static str {
        "dh commutativity"
    }

    fn description(&self) -> &'static str {
        "scalarMult(a.secret, b.public) == scalarMult(b.secret, a.public)"
    }

    fn test(&self, case: &Case) -> PropertyResult {
        check_commutativity(&case.a, &case.b)
    }
}

impl Property for LengthValidation {
    fn name(&self) -> &'static str {
        "length invariants"
    }

    fn description(&self) -> &'static str {
        "buffers that are not 32 bytes are rejected"
    }

    fn test(&self, case: &Case) -> PropertyResult {
        check_lengths(&case.a.0, &case.a.1)
    }
}

/// Every built-in property, in the order the harness checks them.
pub fn default_properties() -> Vec<Box<dyn Property>> {
    vec![
        Box::new(Determinism),
        Box::new(Distinctness),
        Box::new(FixedBase),
        Box::new(Commutativity),
        Box::new(LengthValidation),
    ]
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct HarnessReport {
    /// Random cases checked.
    pub rounds: usize,
    /// Individual property checks performed, fixed case included.
    pub checks: usize,
    pub vector_path: PathBuf,
    pub vector: TestVector,
}

pub struct Harness<R> {
    config: VectorConfig,
    rng: R,
    properties: Vec<Box<dyn Property>>,
}

impl<R: RngCore + CryptoRng> Harness<R> {
    /// Create a harness with the built-in properties. `rng` only feeds the random cases.
    pub fn new(config: VectorConfig, rng: R) -> Self {
        Self { config, rng, properties: default_properties() }
    }

    pub fn config(&self) -> &VectorConfig {
        &self.config
    }

    /// Register an additional property.
    pub fn add_property(&mut self, property: Box<dyn Property>) {
        self.properties.push(property);
    }

    /// Check every property against `case`, stopping at the first failure.
    pub fn check_case(&self, case: &Case) -> MetadmResult<usize> {
        for property in &self.properties {
            let result = property.test(case);
            if let PropertyResult::Failed(ref detail) = result {
                error!(
                    property = property.name(),
                    description = property.description(),
                    %detail,
                    "invariant violated"
                );
            }
            result.into_result(property.name())?;
            debug!(property = property.name(), "passed");
        }
        Ok(self.properties.len())
    }

    /// Check all properties over `random_rounds` freshly drawn cases.
    pub fn run_random_rounds(&mut self) -> MetadmResult<usize> {
        let mut checks = 0;
        for round in 0..self.config.random_rounds {
            let case = Case::random(&mut self.rng);
            checks += self.check_case(&case)?;
            debug!(round, "random case passed");
        }
        Ok(checks)
    }

    /// Derive, validate and write the artifact for `(seed, nonce)`.
    ///
    /// The pair is checked against a random peer, and the serialized artifact is
    /// parsed and re-verified before the single write to `output_path()`.
    pub fn emit_vector(&mut self, seed: &Seed, nonce: &Nonce) -> MetadmResult<(usize, TestVector)> {
        let case = Case {
            a: (*seed, *nonce),
            b: (Seed::random(&mut self.rng), Nonce::random(&mut self.rng)),
        };
        let checks = self.check_case(&case)?;

        let keys = derive_keys(seed, nonce);
        let vector = TestVector::derived(self.config.description.clone(), seed, nonce, &keys);
        TestVector::from_json(&vector.to_json_pretty()?)?.verify()?;

        vector.write_to(self.config.output_path())?;
        Ok((checks, vector))
    }

    /// Emit the published conformance vector.
    pub fn emit_fixed_vector(&mut self) -> MetadmResult<(usize, TestVector)> {
        self.emit_vector(&Seed::new(FIXED_SEED), &Nonce::new(FIXED_NONCE))
    }

    /// Random rounds, then the fixed vector.
    pub fn run(&mut self) -> MetadmResult<HarnessReport> {
        info!(
            rounds = self.config.random_rounds,
            properties = self.properties.len(),
            "starting harness run"
        );
        let random_checks = self.run_random_rounds()?;
        let (fixed_checks, vector) = self.emit_fixed_vector()?;
        let report = HarnessReport {
            rounds: self.config.random_rounds,
            checks: random_checks + fixed_checks,
            vector_path: self.config.output_path(),
            vector,
        };
        info!(checks = report.checks, path = %report.vector_path.display(), "harness run complete");
        Ok(report)
    }
}
